//! Routes `sqa-cli <command> [options]` to its handler.
//!
//! Nothing a handler does can take the process down: errors and panics
//! are reported here and turned into exit status 1.

use std::error::Error as _;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::commands::{self, Console, Context};
use crate::error::CliError;
use crate::VERSION;

/// Every command the CLI knows about, implemented or not
pub const COMMANDS: [&str; 11] = [
    "help",
    "version",
    "indicators",
    "show",
    "analyze",
    "backtest",
    "genetic",
    "pattern",
    "kbs",
    "stream",
    "optimize",
];

/// Lines of an error's cause chain included in a failure report
const TRACE_DEPTH: usize = 5;

pub const USAGE: &str = "\
SQA CLI - Simple Qualitative Analysis Command Line Interface

A unified interface for financial market analysis.

Usage:
  sqa-cli <command> [options]

Available Commands:
  help         Show this help message
  version      Show version information

Analysis Commands:
  indicators   List all available TA-Lib technical indicators
  show         Display stock price data with technical indicators
  analyze      Run various analysis methods (FPOP, regime, seasonal)
  backtest     Run strategy backtests on historical data
  genetic      Evolve strategy parameters using genetic programming
  pattern      Discover profitable trading patterns
  kbs          Knowledge-based strategy using RETE inference
  stream       Simulate real-time price streaming
  optimize     Portfolio optimization and risk management

Common Options:
  -h, --help      Show command-specific help

Examples:
  sqa-cli indicators --grouped
  sqa-cli show --ticker AAPL --timeframe 10 --indicators sma,rsi
  sqa-cli show -t msft -i bbands --csv msft.csv

For command-specific help:
  sqa-cli <command> --help

Environment:
  SQA_CONFIG     Path of the config file
  SQA_DATA_DIR   Directory holding <ticker>.csv / <ticker>.parquet files
  SQA_LOG        Log filter used when RUST_LOG is unset
";

pub fn version_line() -> String {
    format!("sqa-cli version {VERSION}")
}

pub struct Dispatcher {
    context: Context,
}

impl Dispatcher {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// Run one invocation; `args` excludes the program name. Returns the
    /// process exit status.
    pub fn run(&self, args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> i32 {
        let mut console = Console { out, err };
        let (command, rest) = match args.split_first() {
            Some((command, rest)) => (Some(command.as_str()), rest),
            None => (None, args),
        };
        debug!(?command, args = rest.len(), "dispatching");

        match command {
            None | Some("help" | "-h" | "--help") => {
                report(console.out, USAGE.trim_end());
                0
            }
            Some("version" | "-v" | "--version") => {
                report(console.out, &version_line());
                0
            }
            Some(name) if !COMMANDS.contains(&name) => {
                report(
                    console.err,
                    &format!("Error: Unknown command '{name}'\n\nRun 'sqa-cli help' for usage information."),
                );
                1
            }
            Some(name) => self.execute(name, rest, &mut console),
        }
    }

    fn execute(&self, name: &str, args: &[String], console: &mut Console<'_>) -> i32 {
        let Some(handler) = commands::handler(name) else {
            report(
                console.err,
                &format!(
                    "Error: Command '{name}' not yet implemented\nDetails: no handler is built in for '{name}'"
                ),
            );
            return 1;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(args, &self.context, console)));
        match outcome {
            Ok(Ok(())) => 0,
            Ok(Err(e)) => {
                debug!(command = name, error = ?e, "command failed");
                report(console.err, &failure_report(&e));
                1
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "command panicked".to_string());
                debug!(command = name, %message, "command panicked");
                report(console.err, &format!("Error executing command: {message}"));
                1
            }
        }
    }
}

/// `Error executing command: ...` followed by the error's causes
pub fn failure_report(e: &CliError) -> String {
    let mut lines = vec![format!("Error executing command: {e}")];
    let mut source = e.source();
    while let Some(cause) = source {
        if lines.len() > TRACE_DEPTH {
            break;
        }
        lines.push(format!("  caused by: {cause}"));
        source = cause.source();
    }
    lines.join("\n")
}

fn report(stream: &mut dyn Write, message: &str) {
    let _ = writeln!(stream, "{message}");
}
