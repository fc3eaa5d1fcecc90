//! Binary-level tests for the `resilience` command

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn resilience(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("resilience").unwrap();
    cmd.env("RESILIENCE_CLI_DATA_DIR", config_dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

const SNAPSHOT: &str = r#"{
  "income_sources": [
    {"id": "social_grant", "name": "Social Grant"},
    {"id": "side_hustle", "name": "Side Hustle"}
  ],
  "transactions": [
    {
      "id": "6f1c2a8e-1d7b-4c55-9b5e-0a3f5d1e2c11",
      "description": "Market stall",
      "amount": 500000,
      "type": "income",
      "date": "2025-03-01T08:00:00Z",
      "category": "Side Hustle"
    },
    {
      "id": "0b7e9d24-5a61-4f1e-8c3a-7d2e4b6a9f03",
      "description": "Stock",
      "amount": 300000,
      "type": "expense",
      "date": "2025-03-02T08:00:00Z",
      "category": "Groceries",
      "is_recurring": true
    }
  ],
  "monthly_debt": 50000,
  "savings": 300000
}"#;

#[test]
fn score_from_figures_as_json() {
    let dir = TempDir::new().unwrap();
    resilience(&dir)
        .args([
            "score", "--sources", "2", "--income", "5000", "--expenses", "3000", "--debt", "500",
            "--savings", "3000", "--format", "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"overall\": 86.25"))
        .stdout(predicate::str::contains("\"band\": \"strong\""));
}

#[test]
fn score_accepts_negative_savings() {
    let dir = TempDir::new().unwrap();
    resilience(&dir)
        .args(["score", "--income", "1000", "--savings", "-700"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Emergency Buffer"))
        .stdout(predicate::str::contains("-100/100"));
}

#[test]
fn score_from_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(&state, SNAPSHOT).unwrap();

    resilience(&dir)
        .args(["score", "--state"])
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial Resilience Score: 86/100 (Strong)"))
        .stdout(predicate::str::contains("Total income:    R5000.00"));
}

#[test]
fn score_state_conflicts_with_figures() {
    let dir = TempDir::new().unwrap();
    resilience(&dir)
        .args(["score", "--state", "x.json", "--income", "10"])
        .assert()
        .failure();
}

#[test]
fn export_snapshot_as_csv() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(&state, SNAPSHOT).unwrap();

    resilience(&dir)
        .args(["export", "--format", "csv", "--state"])
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ID,Date,Type,Description,Category,Amount,Recurring",
        ))
        .stdout(predicate::str::contains("Stock,Groceries,3000.00,true"));
}

#[test]
fn invalid_snapshot_is_rejected() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(&state, SNAPSHOT.replace("\"amount\": 300000", "\"amount\": 0")).unwrap();

    resilience(&dir)
        .args(["score", "--state"])
        .arg(&state)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import error"));
}

#[test]
fn scan_without_api_key_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    resilience(&dir)
        .args(["scan", "You", "won", "R5000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn blank_scan_is_rejected_before_any_request() {
    let dir = TempDir::new().unwrap();
    resilience(&dir)
        .args(["scan", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Message to analyze cannot be empty"));
}

#[test]
fn session_onboards_records_and_quits() {
    let dir = TempDir::new().unwrap();
    resilience(&dir)
        .arg("session")
        .write_stdin("1,2\nincome 5000 \"Side Hustle\" Market stall\nexpense 3000 Groceries Stock\ndebt 500\nsavings 3000\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected: Social Grant, Side Hustle"))
        .stdout(predicate::str::contains("Financial Resilience Score: 86/100 (Strong)"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn session_without_selection_is_cancelled() {
    let dir = TempDir::new().unwrap();
    resilience(&dir)
        .arg("session")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Onboarding cancelled."));
}

#[test]
fn config_reports_defaults() {
    let dir = TempDir::new().unwrap();
    resilience(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("gemini-2.5-flash"))
        .stdout(predicate::str::contains("API key:         missing"));
}

#[test]
fn config_init_writes_settings_file() {
    let dir = TempDir::new().unwrap();
    resilience(&dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote settings to:"));

    assert!(dir.path().join("config.json").exists());

    resilience(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults").not());
}

#[test]
fn oversized_snapshot_amount_is_rejected() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(
        &state,
        SNAPSHOT.replace("\"amount\": 500000", "\"amount\": 5000000000000000000"),
    )
    .unwrap();

    resilience(&dir)
        .args(["score", "--state"])
        .arg(&state)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is larger than R1000000000.00"));
}
