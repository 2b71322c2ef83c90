//! Table and CSV output for the `show` command.
//!
//! Both outputs are projections of the same [`ShowTable`]: the table uses
//! fixed-width display strings, the CSV raw values rounded to 3 decimals.

use std::io::Write;
use std::path::Path;

use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
use prettytable::{Cell, Row, Table};

use crate::error::Result;
use crate::rows::ShowTable;

/// Shown in place of an absent value
pub const ABSENT: &str = "-";

pub const PRICE_HEADER: &str = "Price";
pub const PRICE_FIELD: &str = "adj_close_price";
const LEADING_HEADERS: [&str; 3] = ["timestamp", "$Change", "%Change"];

/// `%8.2f`, or the placeholder right-aligned in the same width
pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:8.2}"),
        None => format!("{ABSENT:>8}"),
    }
}

/// `%+7.2f`, or the placeholder right-aligned in the same width
pub fn format_change(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+7.2}"),
        None => format!("{ABSENT:>7}"),
    }
}

fn headers(price_header: &str, indicators: &[String]) -> Vec<String> {
    let [timestamp, dollar, percent] = LEADING_HEADERS;
    [timestamp, price_header, dollar, percent]
        .into_iter()
        .map(String::from)
        .chain(indicators.iter().map(|name| name.to_uppercase()))
        .collect()
}

/// Column titles for the terminal table
pub fn table_headers(indicators: &[String]) -> Vec<String> {
    headers(PRICE_HEADER, indicators)
}

/// Column titles for the CSV file: same order, raw field names
pub fn csv_headers(indicators: &[String]) -> Vec<String> {
    headers(PRICE_FIELD, indicators)
}

/// Fixed-width display cells, one vector per row
pub fn display_rows(table: &ShowTable) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.timestamp.to_string(),
                format_price(Some(row.price)),
                format_change(row.dollar_change),
                format_change(row.percent_change),
            ];
            cells.extend(row.indicators.iter().map(|&v| format_price(v)));
            cells
        })
        .collect()
}

/// Raw cells for the CSV file; absent values are empty
pub fn csv_records(table: &ShowTable) -> Vec<Vec<String>> {
    let cell = |v: Option<f64>| v.map(csv_number).unwrap_or_default();
    table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.timestamp.to_string(),
                csv_number(row.price),
                cell(row.dollar_change),
                cell(row.percent_change),
            ];
            cells.extend(row.indicators.iter().map(|&v| cell(v)));
            cells
        })
        .collect()
}

pub fn round3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    // avoid writing "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Plain decimal text of `value` rounded to 3 places; integral values keep `.0`
pub fn csv_number(value: f64) -> String {
    let text = round3(value).to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

/// Write header plus records with standard CSV quoting
pub fn write_csv<W: Write>(table: &ShowTable, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(csv_headers(&table.indicators))?;
    for record in csv_records(table) {
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn save_csv(table: &ShowTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, file)
}

/// Render an ASCII box table with one space of padding per cell:
///
/// ```text
/// +------------+----------+
/// | timestamp  | Price    |
/// +------------+----------+
/// | 2024-01-02 |   185.64 |
/// +------------+----------+
/// ```
pub fn render_ascii(headers: &[String], rows: &[Vec<String>]) -> String {
    let border = LineSeparator::new('-', '+', '+', '+');
    let format = FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separators(&[LinePosition::Top, LinePosition::Title, LinePosition::Bottom], border)
        .padding(1, 1)
        .build();

    let mut table = Table::new();
    table.set_format(format);
    table.set_titles(Row::new(headers.iter().map(|h| Cell::new(h)).collect()));
    for row in rows {
        table.add_row(Row::new(row.iter().map(|c| Cell::new(c)).collect()));
    }
    table.to_string()
}

/// The whole terminal table for `table`
pub fn render_table(table: &ShowTable) -> String {
    render_ascii(&table_headers(&table.indicators), &display_rows(table))
}
