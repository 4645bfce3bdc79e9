//! # Splitwiser CLI
//!
//! Runs bill and ledger files through the balance engine.
//!
//! ## Usage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  splitwiser split dinner.json        → BillSplit JSON      (stdout)    │
//! │  splitwiser balances ledger.json     → GroupBalances JSON  (stdout)    │
//! │  splitwiser title dinner.json        → {"title": "..."}    (stdout)    │
//! │                                                                         │
//! │  --pretty   indent the JSON                                             │
//! │  --strict   run save-time validation before calculating                 │
//! │                                                                         │
//! │  logs → stderr (RUST_LOG)        errors → stderr as {code, message}     │
//! │  exit: 0 ok · 2 rejected input · 1 anything else                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Environment
//! - `SPLITWISER_SETTLE_EPSILON` - settled-balance threshold (default 0.01)
//! - `SPLITWISER_SIMPLIFY_STRATEGY` - `input_order` (default) or `largest_first`

mod commands;
mod config;
mod error;
mod ledger;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use splitwiser_core::Bill;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::ApiError;
use crate::ledger::{read_json, Ledger};

#[derive(Parser, Debug)]
#[command(name = "splitwiser")]
#[command(about = "Split bills and work out who owes whom")]
struct Cli {
    /// Pretty-print JSON output (also read from `SPLITWISER_PRETTY`).
    #[arg(long, global = true, env = "SPLITWISER_PRETTY")]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split one bill between its participants.
    Split(InputArgs),
    /// Compute balances and debts for a group's bills and settlements.
    Balances(InputArgs),
    /// Print a bill's title, generating one if it has none.
    Title(TitleArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// JSON file to read.
    path: PathBuf,

    /// Reject records that wouldn't pass save-time validation.
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct TitleArgs {
    /// Bill JSON file.
    path: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let api = ApiError::from(&err);
            eprintln!("{}", api.to_json());
            ExitCode::from(api.code.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Split(args) => {
            let bill: Bill = read_json(&args.path)?;
            render(&commands::split(&bill, args.strict)?, cli.pretty)
        }
        Command::Balances(args) => {
            let config = CliConfig::load()?;
            debug!(
                settle_epsilon = config.settle_epsilon,
                strategy = %config.strategy,
                "Configuration loaded"
            );

            let ledger: Ledger = read_json(&args.path)?;
            render(
                &commands::balances(&ledger, args.strict, &config.engine())?,
                cli.pretty,
            )
        }
        Command::Title(args) => {
            let bill: Bill = read_json(&args.path)?;
            render(&commands::title(&bill), cli.pretty)
        }
    }
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show the engine's per-person split detail
/// - `RUST_LOG=splitwiser_core=debug` - Same, for the engine only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_balances_flags() {
        let cli = Cli::parse_from(["splitwiser", "balances", "ledger.json", "--strict", "--pretty"]);
        assert!(cli.pretty);
        match cli.command {
            Command::Balances(args) => {
                assert_eq!(args.path, PathBuf::from("ledger.json"));
                assert!(args.strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_render_compact_and_pretty() {
        let value = serde_json::json!({ "a": 1 });
        assert_eq!(render(&value, false).unwrap(), r#"{"a":1}"#);
        assert_eq!(render(&value, true).unwrap(), "{\n  \"a\": 1\n}");
    }
}
