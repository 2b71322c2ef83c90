//! `indicators`: list every indicator the library exposes.

use clap::Parser;
use tracing::debug;

use super::{parse_options, print_columns, print_header, print_section, Console, Context};
use crate::catalog::{available_indicators, categorize};
use crate::error::Result;

#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(
    bin_name = "sqa-cli indicators",
    override_usage = "sqa-cli indicators [options]",
    about = "Display all available TA-Lib indicators.",
    disable_version_flag = true
)]
pub struct IndicatorsOptions {
    /// Group indicators by category
    #[arg(short, long)]
    pub grouped: bool,
}

pub fn run(args: &[String], ctx: &Context, console: &mut Console<'_>) -> Result<()> {
    match parse_options::<IndicatorsOptions>(args, console)? {
        Some(options) => execute(&options, ctx, console),
        None => Ok(()),
    }
}

pub fn execute(options: &IndicatorsOptions, ctx: &Context, console: &mut Console<'_>) -> Result<()> {
    let out = &mut *console.out;
    print_header(out, "Available TA-Lib Indicators")?;

    let names = available_indicators(&ctx.indicators);
    debug!(count = names.len(), grouped = options.grouped, "listing indicators");
    writeln!(out)?;
    writeln!(out, "Total: {} indicators", names.len())?;

    if options.grouped {
        for (category, members) in categorize(&names) {
            print_section(out, category)?;
            print_columns(out, &members)?;
        }
    } else {
        writeln!(out)?;
        print_columns(out, &names)?;
        writeln!(out)?;
        writeln!(out, "Use 'sqa-cli indicators --grouped' to see indicators organized by category.")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() {
        let options = IndicatorsOptions::try_parse_from(["sqa-cli"]).unwrap();
        assert!(!options.grouped);
        let options = IndicatorsOptions::try_parse_from(["sqa-cli", "-g"]).unwrap();
        assert!(options.grouped);
        let options = IndicatorsOptions::try_parse_from(["sqa-cli", "--grouped"]).unwrap();
        assert!(options.grouped);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(IndicatorsOptions::try_parse_from(["sqa-cli", "--sideways"]).is_err());
    }
}
