//! Turns an indicator name into values aligned with the display window.
//!
//! Failures never escape: an unknown name, an indicator that returns an
//! error, or one that panics all yield a window of absent values plus a
//! warning for the user, so the remaining columns still render.

use std::panic;

use tracing::debug;

use crate::talib::{IndicatorOutput, IndicatorRegistry};

/// Aligned values for one indicator column
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub values: Vec<Option<f64>>,
    /// Set when the values were substituted with absents
    pub warning: Option<String>,
}

impl Resolution {
    fn absent(len: usize, warning: String) -> Self {
        Self {
            values: vec![None; len],
            warning: Some(warning),
        }
    }
}

pub struct IndicatorResolver<'a> {
    registry: &'a IndicatorRegistry,
}

impl<'a> IndicatorResolver<'a> {
    pub fn new(registry: &'a IndicatorRegistry) -> Self {
        Self { registry }
    }

    /// Invoke `name` over the full close history and keep the `len` values
    /// starting at `start`, the same slice the price window uses.
    pub fn resolve(&self, name: &str, closes: &[f64], start: usize, len: usize) -> Resolution {
        let name = name.to_ascii_lowercase();

        let Some(f) = self.registry.get(&name) else {
            return Resolution::absent(
                len,
                format!("Warning: Indicator '{name}' not found. Skipping."),
            );
        };

        let output = match panic::catch_unwind(|| f(closes)) {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Resolution::absent(len, format!("Warning: Error calculating {name}: {e}"));
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "indicator panicked".to_string());
                return Resolution::absent(
                    len,
                    format!("Warning: Error calculating {name}: {message}"),
                );
            }
        };

        let values = normalize(output);
        debug!(indicator = %name, produced = values.len(), start, len, "resolved indicator");

        Resolution {
            values: align(values, start, len),
            warning: None,
        }
    }
}

/// Collapse an indicator's output to one series of optional values.
///
/// Multi-output indicators contribute only their first declared series;
/// the rest are dropped. Non-finite values count as absent.
pub fn normalize(output: IndicatorOutput) -> Vec<Option<f64>> {
    let values = match output {
        IndicatorOutput::Series(values) => values,
        IndicatorOutput::Scalar(value) => vec![value],
        IndicatorOutput::Named(outputs) => outputs
            .into_iter()
            .next()
            .map(|(_, values)| values)
            .unwrap_or_default(),
    };

    values
        .into_iter()
        .map(|v| v.is_finite().then_some(v))
        .collect()
}

/// `len` values from `start`, padded at the end with absents when the
/// series runs out
pub fn align(values: Vec<Option<f64>>, start: usize, len: usize) -> Vec<Option<f64>> {
    let mut window: Vec<Option<f64>> = values.into_iter().skip(start).take(len).collect();
    window.resize(len, None);
    window
}
