//! Row building for the `show` command.
//!
//! Rows hold raw values only; the renderer decides how each one is shown.

use chrono::NaiveDate;
use tracing::debug;

use crate::data::PriceSeries;
use crate::resolver::IndicatorResolver;

/// One trading day of the display window
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestamp: NaiveDate,
    pub price: f64,
    /// Absent on the first row of the window
    pub dollar_change: Option<f64>,
    /// Absent on the first row, and when the previous price is zero
    pub percent_change: Option<f64>,
    /// One value per requested indicator, in request order
    pub indicators: Vec<Option<f64>>,
}

/// Every row of the window plus the column set that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ShowTable {
    pub indicators: Vec<String>,
    pub rows: Vec<Row>,
    /// Warnings from indicators that had to be substituted
    pub warnings: Vec<String>,
}

/// (dollar change, percent change) against the previous price
pub fn price_changes(prices: &[f64]) -> Vec<(Option<f64>, Option<f64>)> {
    let mut changes = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return changes;
    }

    changes.push((None, None));
    for pair in prices.windows(2) {
        let (prev, price) = (pair[0], pair[1]);
        let delta = price - prev;
        let percent = (prev != 0.0).then(|| delta / prev * 100.0);
        changes.push((Some(delta), percent));
    }
    changes
}

/// Build the rows for the last `timeframe` entries of `series`.
///
/// Indicators are computed over the full history so their warm-up period
/// falls before the window wherever the history allows it.
pub fn build_table(
    series: &PriceSeries,
    timeframe: usize,
    indicators: &[String],
    resolver: &IndicatorResolver<'_>,
) -> ShowTable {
    let start = series.window_start(timeframe);
    let window = series.window(start);
    let closes = series.closes();
    debug!(total = series.len(), start, rows = window.len(), "selected display window");

    let mut warnings = Vec::new();
    let columns: Vec<Vec<Option<f64>>> = indicators
        .iter()
        .map(|name| {
            let resolution = resolver.resolve(name, &closes, start, window.len());
            warnings.extend(resolution.warning);
            resolution.values
        })
        .collect();

    let prices: Vec<f64> = window.iter().map(|p| p.adj_close).collect();
    let rows = window
        .iter()
        .zip(price_changes(&prices))
        .enumerate()
        .map(|(i, (point, (dollar_change, percent_change)))| Row {
            timestamp: point.timestamp,
            price: point.adj_close,
            dollar_change,
            percent_change,
            indicators: columns.iter().map(|column| column[i]).collect(),
        })
        .collect();

    ShowTable {
        indicators: indicators.to_vec(),
        rows,
        warnings,
    }
}
