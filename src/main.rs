use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};

use resilience_cli::cli::{
    handle_advice_command, handle_config_command, handle_export_command, handle_scan_command,
    handle_score_command, handle_session_command, AdviceArgs, ConfigArgs, ExportArgs, ScanArgs,
    ScoreArgs, SessionArgs,
};
use resilience_cli::config::{ResiliencePaths, Settings};
use resilience_cli::display::DisplayOptions;
use resilience_cli::telemetry;

#[derive(Parser)]
#[command(
    name = "resilience",
    author = "Kaylee Beyene",
    version,
    about = "Financial resilience tracker for informal-economy earners",
    long_about = "Track income, expenses, debt and savings, see a 0-100 financial \
                  resilience score, get coaching tips, and check suspicious \
                  messages for scam red flags."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a snapshot or a set of figures
    Score(ScoreArgs),

    /// Get coaching tips for a snapshot
    #[command(alias = "coach")]
    Advice(AdviceArgs),

    /// Check a message for scam red flags
    Scan(ScanArgs),

    /// Start an interactive session
    #[command(alias = "ui")]
    Session(SessionArgs),

    /// Convert a snapshot to JSON, YAML or CSV
    Export(ExportArgs),

    /// Show current configuration and paths
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ResiliencePaths::new()?;
    let settings = Settings::load_or_default(&paths)?;
    telemetry::init(&settings.log_level)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Score(args)) => {
            handle_score_command(args, &DisplayOptions::from(&settings), &mut out)?;
        }
        Some(Commands::Advice(args)) => handle_advice_command(&settings, args, &mut out)?,
        Some(Commands::Scan(args)) => handle_scan_command(&settings, args, &mut out)?,
        Some(Commands::Session(args)) => {
            // the session takes its own lock on stdout
            drop(out);
            handle_session_command(&settings, args)?;
        }
        Some(Commands::Export(args)) => handle_export_command(args, &mut out)?,
        Some(Commands::Config(args)) => {
            handle_config_command(&paths, &settings, args, &mut out)?;
        }
        None => {
            println!("Resilience - financial resilience tracker");
            println!();
            println!("Run 'resilience --help' for usage information.");
            println!("Run 'resilience session' to start tracking.");
        }
    }

    Ok(())
}
