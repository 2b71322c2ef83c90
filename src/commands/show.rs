//! `show`: a ticker's recent prices with indicator columns, as a table and
//! optionally a CSV file.

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use super::{parse_options, print_header, Console, Context};
use crate::error::Result;
use crate::render::{render_table, save_csv};
use crate::resolver::IndicatorResolver;
use crate::rows::build_table;

const ABOUT: &str = "Display stock price data with technical indicators in a table format.";

const AFTER_HELP: &str = "\
Any registered TA-Lib indicator can be used. Common examples:
  - Moving averages: sma, ema, dema, tema, wma
  - Momentum: rsi, macd, cmo, roc, trix
  - Volatility and statistics: bbands, stddev, var

To see all available indicators, run:
  sqa-cli indicators";

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    bin_name = "sqa-cli show",
    override_usage = "sqa-cli show [options]",
    about = ABOUT,
    after_help = AFTER_HELP,
    disable_version_flag = true
)]
pub struct ShowOptions {
    /// Stock ticker symbol
    #[arg(short, long, value_name = "SYMBOL", default_value = "AAPL", value_parser = upper)]
    pub ticker: String,

    /// Number of days to display
    #[arg(short = 'f', long, value_name = "DAYS", default_value_t = 30)]
    pub timeframe: usize,

    /// Comma-separated indicators, e.g. sma,ema,rsi,macd,bbands
    #[arg(short, long, value_name = "INDICATORS", value_delimiter = ',', value_parser = lower)]
    pub indicators: Vec<String>,

    /// Save table data to CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,
}

fn upper(raw: &str) -> std::result::Result<String, String> {
    Ok(raw.trim().to_uppercase())
}

fn lower(raw: &str) -> std::result::Result<String, String> {
    Ok(raw.trim().to_lowercase())
}

impl ShowOptions {
    /// `SMA, RSI`, or `No indicators`
    pub fn indicator_summary(&self) -> String {
        if self.indicators.is_empty() {
            "No indicators".to_string()
        } else {
            self.indicators
                .iter()
                .map(|name| name.to_uppercase())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

pub fn run(args: &[String], ctx: &Context, console: &mut Console<'_>) -> Result<()> {
    match parse_options::<ShowOptions>(args, console)? {
        Some(options) => execute(&options, ctx, console),
        None => Ok(()),
    }
}

pub fn execute(options: &ShowOptions, ctx: &Context, console: &mut Console<'_>) -> Result<()> {
    let stock = ctx.prices.load(&options.ticker)?;
    debug!(ticker = %stock.ticker, points = stock.series.len(), "loaded price history");

    print_header(console.out, &stock.title())?;
    writeln!(console.out)?;
    writeln!(console.out, "Duration: Last {} days", options.timeframe)?;
    writeln!(console.out, "Indicators: {}", options.indicator_summary())?;
    writeln!(console.out)?;

    let resolver = IndicatorResolver::new(&ctx.indicators);
    let table = build_table(&stock.series, options.timeframe, &options.indicators, &resolver);
    for warning in &table.warnings {
        writeln!(console.err, "{warning}")?;
    }

    if let Some(path) = &options.csv {
        save_csv(&table, path)?;
        info!(path = %path.display(), rows = table.rows.len(), "wrote csv");
        writeln!(console.out, "Data saved to {}", path.display())?;
        writeln!(console.out)?;
    }

    write!(console.out, "{}", render_table(&table))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ShowOptions {
        ShowOptions::try_parse_from(std::iter::once("sqa-cli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]);
        assert_eq!(options.ticker, "AAPL");
        assert_eq!(options.timeframe, 30);
        assert!(options.indicators.is_empty());
        assert_eq!(options.csv, None);
        assert_eq!(options.indicator_summary(), "No indicators");
    }

    #[test]
    fn test_overrides_normalized() {
        let options = parse(&["-t", "msft", "-f", "10", "-i", "SMA,Rsi", "--csv", "out.csv"]);
        assert_eq!(options.ticker, "MSFT");
        assert_eq!(options.timeframe, 10);
        assert_eq!(options.indicators, vec!["sma", "rsi"]);
        assert_eq!(options.csv, Some(PathBuf::from("out.csv")));
        assert_eq!(options.indicator_summary(), "SMA, RSI");
    }

    #[test]
    fn test_long_flags() {
        let options = parse(&["--ticker", "nvda", "--timeframe", "5", "--indicators", "ema"]);
        assert_eq!(options.ticker, "NVDA");
        assert_eq!(options.timeframe, 5);
        assert_eq!(options.indicators, vec!["ema"]);
    }

    #[test]
    fn test_bad_values_rejected() {
        let argv = |args: &[&'static str]| std::iter::once("sqa-cli").chain(args.to_vec());
        assert!(ShowOptions::try_parse_from(argv(&["-f", "many"])).is_err());
        assert!(ShowOptions::try_parse_from(argv(&["--frobnicate"])).is_err());
    }
}
