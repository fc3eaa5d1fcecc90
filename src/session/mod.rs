//! Interactive session
//!
//! Owns the application state for one run: onboarding, the dashboard, and
//! the scanner. Nothing is persisted; `export` is the only way data leaves.

pub mod command;

pub use command::{parse_command, parse_scanner_line, tokenize, Command};

use std::io::{BufRead, Write};

use tracing::{error, warn};

use crate::coach::{
    AdviceService, GenerativeBackend, ScamScanner, ADVICE_FAILURE_MESSAGE, SCAN_FAILURE_MESSAGE,
};
use crate::display::{
    format_advice, format_dashboard, format_scam_analysis, format_score_card, format_score_line,
    format_transaction_register, DisplayOptions,
};
use crate::error::{ResilienceError, ResilienceResult};
use crate::export::export_to_path;
use crate::models::{suggested_categories, FinancialState, Money};
use crate::scoring::ResilienceScore;
use crate::services::{CreateTransactionInput, LedgerService, SortKey, SortOrder, TransactionSort};
use crate::setup::onboarding::prompt_string;
use crate::setup::OnboardingWizard;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Scanner,
}

impl View {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" | "home" => Some(Self::Dashboard),
            "scanner" | "scan" => Some(Self::Scanner),
            _ => None,
        }
    }

    fn prompt(&self) -> &'static str {
        match self {
            Self::Dashboard => "> ",
            Self::Scanner => "scan> ",
        }
    }
}

/// Application state for one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub onboarded: bool,
    pub view: View,
    pub state: FinancialState,
    /// Current transaction listing order
    pub sort: TransactionSort,
}

impl AppState {
    /// Start from an existing state; onboarding is skipped when it already
    /// declares income sources
    pub fn with_state(state: FinancialState) -> Self {
        Self {
            onboarded: !state.income_sources.is_empty(),
            state,
            ..Self::default()
        }
    }

    pub fn score(&self) -> ResilienceScore {
        ResilienceScore::for_state(&self.state)
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Line-driven session over any input and output
pub struct Session<'a, R, W> {
    app: AppState,
    backend: Option<&'a dyn GenerativeBackend>,
    options: DisplayOptions,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(app: AppState, input: R, output: W) -> Self {
        Self {
            app,
            backend: None,
            options: DisplayOptions::default(),
            input,
            output,
        }
    }

    /// Backend for advice and scanning; without one both report failure
    pub fn with_backend(mut self, backend: &'a dyn GenerativeBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_display_options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    pub fn into_inner(self) -> (AppState, R, W) {
        (self.app, self.input, self.output)
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> ResilienceResult<()> {
        if !self.app.onboarded {
            let sources = OnboardingWizard::new(&mut self.input, &mut self.output).run()?;
            self.app.state = FinancialState::onboarded(sources);
            self.app.onboarded = true;
        }

        self.show_dashboard()?;
        writeln!(self.output, "Type 'help' for a list of commands.")?;

        loop {
            let Some(line) = prompt_string(&mut self.input, &mut self.output, self.app.view.prompt())? else {
                break;
            };

            let parsed = match self.app.view {
                View::Scanner => Ok(parse_scanner_line(&line)),
                View::Dashboard => parse_command(&line),
            };

            let flow = match parsed {
                Ok(Some(command)) => self.execute(command),
                Ok(None) => Ok(Flow::Continue),
                Err(e) => Err(e),
            };

            match flow {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(self.output, "Error: {}", user_message(&e))?,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> ResilienceResult<Flow> {
        let mutation = command.is_mutation();

        match command {
            Command::Record {
                kind,
                amount,
                category,
                description,
                is_recurring,
            } => {
                let recorded = LedgerService::new(&mut self.app.state).add_transaction(
                    CreateTransactionInput {
                        kind,
                        amount,
                        description,
                        category,
                        is_recurring,
                    },
                )?;
                writeln!(self.output, "Recorded {} {}", kind, recorded.transaction)?;
                if !recorded.suggested_category {
                    let suggestions = suggested_categories(kind, &self.app.state.income_sources);
                    writeln!(
                        self.output,
                        "Note: '{}' is a custom category (suggested: {})",
                        recorded.transaction.category,
                        suggestions.join(", ")
                    )?;
                }
            }
            Command::Debt(amount) => {
                LedgerService::new(&mut self.app.state).set_monthly_debt(amount)?;
                let shown = self.money(amount);
                writeln!(self.output, "Monthly debt set to {}", shown)?;
            }
            Command::Savings(amount) => {
                LedgerService::new(&mut self.app.state).set_savings(amount)?;
                let shown = self.money(amount);
                writeln!(self.output, "Savings set to {}", shown)?;
            }
            Command::List { key, order } => {
                self.app.sort = next_sort(self.app.sort, key, order);
                let listing =
                    LedgerService::new(&mut self.app.state).sorted_transactions(self.app.sort);
                write!(self.output, "{}", format_transaction_register(&listing, &self.options))?;
            }
            Command::Score => {
                write!(self.output, "{}", format_score_card(&self.app.score()))?;
            }
            Command::Dashboard => self.show_dashboard()?,
            Command::Advice => self.show_advice()?,
            Command::Scan(message) => self.scan(&message)?,
            Command::View(view) => {
                self.app.view = view;
                match view {
                    View::Dashboard => self.show_dashboard()?,
                    View::Scanner => writeln!(
                        self.output,
                        "Scam scanner: paste a suspicious SMS, WhatsApp or email message."
                    )?,
                }
            }
            Command::Export(path) => {
                let format = export_to_path(&self.app.state, &path)?;
                writeln!(self.output, "Exported to {} ({:?})", path.display(), format)?;
            }
            Command::Help => write!(self.output, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        if mutation {
            writeln!(self.output, "{}", format_score_line(&self.app.score()))?;
        }
        Ok(Flow::Continue)
    }

    fn show_dashboard(&mut self) -> ResilienceResult<()> {
        let score = self.app.score();
        write!(
            self.output,
            "{}",
            format_dashboard(&self.app.state, &score, self.app.sort, &self.options)
        )?;
        Ok(())
    }

    fn show_advice(&mut self) -> ResilienceResult<()> {
        let Some(backend) = self.backend else {
            warn!("advice requested without a configured backend");
            writeln!(self.output, "{}", ADVICE_FAILURE_MESSAGE)?;
            return Ok(());
        };

        writeln!(self.output, "Getting personalized tips...")?;
        let score = self.app.score();
        match AdviceService::new(backend).fetch_advice(&self.app.state, &score) {
            Ok(text) => write!(self.output, "{}", format_advice(&text))?,
            Err(e) => {
                error!(error = %e, "advice request failed");
                writeln!(self.output, "{}", ADVICE_FAILURE_MESSAGE)?;
            }
        }
        Ok(())
    }

    fn scan(&mut self, message: &str) -> ResilienceResult<()> {
        let Some(backend) = self.backend else {
            warn!("scan requested without a configured backend");
            writeln!(self.output, "{}", SCAN_FAILURE_MESSAGE)?;
            return Ok(());
        };

        match ScamScanner::new(backend).analyze(message) {
            Ok(analysis) => write!(self.output, "{}", format_scam_analysis(&analysis))?,
            Err(e) if e.is_validation() => return Err(e),
            Err(e) => {
                error!(error = %e, "scam analysis failed");
                writeln!(self.output, "{}", SCAN_FAILURE_MESSAGE)?;
            }
        }
        Ok(())
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.options.currency_symbol)
    }
}

/// Listing order after a `list` command
///
/// Naming the current key again without an order flips the direction.
fn next_sort(
    current: TransactionSort,
    key: Option<SortKey>,
    order: Option<SortOrder>,
) -> TransactionSort {
    match (key, order) {
        (None, None) => current,
        (None, Some(order)) => TransactionSort::new(current.key, order),
        (Some(key), Some(order)) => TransactionSort::new(key, order),
        (Some(key), None) if key == current.key => TransactionSort::new(key, current.order.toggled()),
        (Some(key), None) => TransactionSort::new(key, SortOrder::Desc),
    }
}

fn user_message(err: &ResilienceError) -> String {
    match err {
        ResilienceError::Validation(msg) => msg.clone(),
        other => other.to_string(),
    }
}

const HELP: &str = "\
Commands:
  income <amount> <category> <description...> [--recurring]
  expense <amount> <category> <description...> [--recurring]
  debt <amount>              Set total monthly debt repayments
  savings <amount>           Set current savings balance
  list [date|amount] [asc|desc]
  score                      Show the score breakdown
  dashboard                  Show totals, score and transactions
  advice                     Ask the AI coach for tips
  scan <message...>          Check a message for scam red flags
  view dashboard|scanner     Switch view (in the scanner, any other line is scanned)
  export <path>              Write a .json, .yaml or .csv snapshot
  help                       Show this help
  quit                       Leave (nothing is saved)
Quote multi-word categories, e.g. income 530 \"Social Grant\" SASSA payout
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::backend::testing::ScriptedBackend;
    use crate::models::{IncomeSource, IncomeSourceType};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_session(
        app: AppState,
        backend: Option<&dyn GenerativeBackend>,
        input: &str,
    ) -> (AppState, String) {
        let mut session = Session::new(app, Cursor::new(input.as_bytes().to_vec()), Vec::new());
        if let Some(backend) = backend {
            session = session.with_backend(backend);
        }
        session.run().unwrap();
        let (app, _, output) = session.into_inner();
        (app, String::from_utf8(output).unwrap())
    }

    fn onboarded() -> AppState {
        AppState::with_state(FinancialState::onboarded(vec![
            IncomeSource::new(IncomeSourceType::SocialGrant),
            IncomeSource::new(IncomeSourceType::SideHustle),
        ]))
    }

    #[test]
    fn test_onboarding_then_dashboard() {
        let (app, output) = run_session(AppState::default(), None, "2\nquit\n");

        assert!(app.onboarded);
        assert_eq!(app.state.income_sources.len(), 1);
        assert!(output.contains("Selected: Side Hustle"));
        assert!(output.contains("Financial Resilience Score"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_onboarding_cancelled_at_end_of_input() {
        let mut session = Session::new(AppState::default(), Cursor::new(Vec::new()), Vec::new());
        assert!(matches!(session.run(), Err(ResilienceError::Cancelled(_))));
        assert!(!session.app().onboarded);
    }

    #[test]
    fn test_mutations_rescore() {
        let input = "\
income 5000 \"Side Hustle\" Market stall
expense 3000 Groceries Stock
debt 500
savings 3000
";
        let (app, output) = run_session(onboarded(), None, input);

        assert_eq!(app.state.transactions.len(), 2);
        assert_eq!(app.state.monthly_debt.cents(), 50_000);
        assert_eq!(app.score().overall, 86.25);
        assert!(output.contains("Financial Resilience Score: 86/100 (Strong)"));
        // one headline per mutation, plus the opening dashboard
        assert_eq!(output.matches("Financial Resilience Score:").count(), 5);
    }

    #[test]
    fn test_invalid_input_keeps_state_and_continues() {
        let input = "expense 0 Groceries Bread\nsavings -5\nfrobnicate\nexpense 10 Groceries Bread\n";
        let (app, output) = run_session(onboarded(), None, input);

        assert_eq!(app.state.transactions.len(), 1);
        assert!(app.state.savings.is_zero());
        assert!(output.contains("Error: Amount must be greater than zero"));
        assert!(output.contains("Error: Savings must be greater than zero"));
        assert!(output.contains("Error: Unknown command 'frobnicate'"));
    }

    #[test]
    fn test_custom_category_note() {
        let (_, output) = run_session(onboarded(), None, "expense 100 Stokvel Monthly contribution\n");
        assert!(output.contains("Note: 'Stokvel' is a custom category"));
        assert!(output.contains("Groceries, Transport, Rent/Housing, Airtime/Data"));
    }

    #[test]
    fn test_list_sorting() {
        let input = "\
expense 10 Groceries first
expense 30 Groceries second
expense 20 Groceries third
list amount
list amount
";
        let (app, output) = run_session(onboarded(), None, input);
        assert_eq!(app.sort, TransactionSort::new(SortKey::Amount, SortOrder::Asc));

        let register = output.rsplit("Description").next().unwrap();
        let first = register.find("first").unwrap();
        let second = register.find("second").unwrap();
        let third = register.find("third").unwrap();
        assert!(first < third && third < second);
    }

    #[test]
    fn test_advice_success_and_failure() {
        let backend = ScriptedBackend::replying(vec![
            Ok("Here you go:\n* Save R10 a week\n- Sell extra airtime".into()),
            Err(ResilienceError::Service("gemini error 500".into())),
        ]);
        let before = onboarded();
        let (app, output) = run_session(before.clone(), Some(&backend), "advice\nadvice\n");

        assert!(output.contains("  • Save R10 a week"));
        assert!(output.contains("  • Sell extra airtime"));
        assert!(output.contains(ADVICE_FAILURE_MESSAGE));
        assert_eq!(app.state, before.state);
    }

    #[test]
    fn test_advice_without_backend() {
        let (_, output) = run_session(onboarded(), None, "advice\n");
        assert!(output.contains(ADVICE_FAILURE_MESSAGE));
    }

    #[test]
    fn test_scanner_view_scans_free_text() {
        let backend = ScriptedBackend::replying(vec![
            Ok(r#"{"is_scam": true, "confidence": 97, "explanation": "Upfront fee requested."}"#.into()),
            Ok("not json".into()),
        ]);
        let input = "view scanner\nCongratulations! Pay R99 to claim your prize\nscan hello\n";
        let (app, output) = run_session(onboarded(), Some(&backend), input);

        assert_eq!(app.view, View::Scanner);
        assert!(output.contains("Likely a scam (confidence 97%)"));
        assert!(output.contains(SCAN_FAILURE_MESSAGE));
        let requests = backend.requests.borrow();
        assert!(requests[0].prompt.contains("Congratulations! Pay R99 to claim your prize"));
    }

    #[test]
    fn test_scanner_never_runs_commands_from_message_text() {
        let verdict = r#"{"is_scam": true, "confidence": 90, "explanation": "Phishing link."}"#;
        let backend = ScriptedBackend::replying(vec![
            Ok(verdict.into()),
            Ok(verdict.into()),
            Ok(verdict.into()),
        ]);
        let input = "view scanner\n\
                     Income 5000 credited to your account, click link to claim\n\
                     Savings account locked, verify now\n\
                     Click \"here to verify your SASSA grant\n\
                     view dashboard\n";
        let (app, output) = run_session(onboarded(), Some(&backend), input);

        assert!(app.state.transactions.is_empty());
        assert!(app.state.savings.is_zero());
        assert_eq!(app.view, View::Dashboard);
        assert!(!output.contains("Error:"));
        assert_eq!(output.matches("Likely a scam (confidence 90%)").count(), 3);

        let requests = backend.requests.borrow();
        assert_eq!(requests.len(), 3);
        assert!(requests[0]
            .prompt
            .contains("Income 5000 credited to your account, click link to claim"));
        assert!(requests[1].prompt.contains("Savings account locked, verify now"));
        assert!(requests[2].prompt.contains("Click \"here to verify your SASSA grant"));
    }

    #[test]
    fn test_oversized_amounts_are_rejected_without_panicking() {
        let input = "income 50000000000000000 \"Formal Job\" a\n\
                     income 50000000000000000 \"Formal Job\" b\n\
                     income 1000000000 \"Formal Job\" c\n\
                     income 1000000000 \"Formal Job\" d\n";
        let (app, output) = run_session(onboarded(), None, input);

        assert_eq!(output.matches("is larger than R1000000000.00").count(), 2);
        assert_eq!(app.state.transactions.len(), 2);
        assert_eq!(app.state.total_income().cents(), 200_000_000_000);
    }

    #[test]
    fn test_blank_scan_is_a_validation_error() {
        let backend = ScriptedBackend::default();
        let (_, output) = run_session(onboarded(), Some(&backend), "scan\n");
        assert!(output.contains("Error: Message to analyze cannot be empty"));
        assert!(backend.requests.borrow().is_empty());
    }

    #[test]
    fn test_export_command() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let input = format!("savings 250\nexport {}\n", path.display());

        let (app, output) = run_session(onboarded(), None, &input);
        assert!(output.contains("Exported to"));

        let loaded = crate::export::load_state(&path).unwrap();
        assert_eq!(loaded, app.state);
        assert_eq!(loaded.savings, Money::from_cents(25_000));
    }

    #[test]
    fn test_next_sort() {
        let current = TransactionSort::default();
        assert_eq!(next_sort(current, None, None), current);
        assert_eq!(
            next_sort(current, Some(SortKey::Date), None),
            TransactionSort::new(SortKey::Date, SortOrder::Asc)
        );
        assert_eq!(
            next_sort(current, Some(SortKey::Amount), None),
            TransactionSort::new(SortKey::Amount, SortOrder::Desc)
        );
        assert_eq!(
            next_sort(current, None, Some(SortOrder::Asc)),
            TransactionSort::new(SortKey::Date, SortOrder::Asc)
        );
    }
}
