//! Price data: the series a command works on and the source it comes from.

mod file_source;

pub use file_source::FileSource;

use chrono::NaiveDate;

use crate::error::Result;

/// One trading day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: NaiveDate,
    pub adj_close: f64,
}

/// Full available history for a ticker, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting by timestamp
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Adjusted closes over the whole history
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.adj_close).collect()
    }

    /// Index where the trailing `timeframe` window begins; never negative
    pub fn window_start(&self, timeframe: usize) -> usize {
        self.points.len().saturating_sub(timeframe)
    }

    /// The suffix of the series starting at `start`
    pub fn window(&self, start: usize) -> &[PricePoint] {
        self.points.get(start..).unwrap_or(&[])
    }
}

/// A ticker's history plus whatever metadata the source knows
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    pub ticker: String,
    pub name: Option<String>,
    pub series: PriceSeries,
}

impl Stock {
    /// `AAPL - Apple Inc.` when a distinct company name is known, else the ticker
    pub fn title(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() && name != self.ticker => {
                format!("{} - {}", self.ticker, name)
            }
            _ => self.ticker.clone(),
        }
    }
}

/// Where price history comes from
pub trait PriceSource {
    fn load(&self, ticker: &str) -> Result<Stock>;
}
