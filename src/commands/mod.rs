//! Command handlers and the pieces they share.
//!
//! Each handler parses its own options with clap, so `-h/--help` and
//! unknown-flag errors look the same for every command.

pub mod indicators;
pub mod show;

use std::io::{self, Write};

use clap::error::ErrorKind;
use clap::Parser;

use crate::data::PriceSource;
use crate::error::Result;
use crate::talib::IndicatorRegistry;

/// Collaborators a command works against
pub struct Context {
    pub prices: Box<dyn PriceSource>,
    pub indicators: IndicatorRegistry,
}

impl Context {
    pub fn new(prices: Box<dyn PriceSource>, indicators: IndicatorRegistry) -> Self {
        Self { prices, indicators }
    }
}

/// Output streams for one invocation
pub struct Console<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

pub type Handler = fn(&[String], &Context, &mut Console<'_>) -> Result<()>;

/// Handler for `command`, if one is built in
pub fn handler(command: &str) -> Option<Handler> {
    match command {
        "indicators" => Some(indicators::run),
        "show" => Some(show::run),
        _ => None,
    }
}

/// Parse `args` into `T`.
///
/// `Ok(None)` means help was requested and has already been printed.
pub(crate) fn parse_options<T: Parser>(args: &[String], console: &mut Console<'_>) -> Result<Option<T>> {
    let argv = std::iter::once("sqa-cli").chain(args.iter().map(String::as_str));
    match T::try_parse_from(argv) {
        Ok(options) => Ok(Some(options)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(console.out, "{}", e.render())?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Title line underlined with `=`
pub(crate) fn print_header(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

/// Section title underlined with `-`
pub(crate) fn print_section(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

/// Names six to a line, comma separated and indented
pub(crate) fn print_columns(out: &mut dyn Write, names: &[&str]) -> io::Result<()> {
    for chunk in names.chunks(6) {
        writeln!(out, "  {}", chunk.join(", "))?;
    }
    Ok(())
}
