//! # Indicator library
//!
//! TA-Lib style technical indicators, addressed by their TA-Lib function
//! names through an [`IndicatorRegistry`].
//!
//! Every registered function takes a close price series and applies
//! TA-Lib's default parameters. Indicators that TA-Lib defines over
//! high/low/volume data are registered too, but fail with
//! [`IndicatorError::MissingInputs`] when handed a close series alone.
//!
//! ## Example
//! ```
//! use sqa_cli::talib::{IndicatorOutput, IndicatorRegistry};
//!
//! let registry = IndicatorRegistry::talib();
//! let closes: Vec<f64> = (1..=40).map(|x| x as f64).collect();
//!
//! let sma = registry.get("SMA").unwrap();
//! match sma(&closes).unwrap() {
//!     IndicatorOutput::Series(values) => assert_eq!(values[39], 25.5),
//!     _ => unreachable!(),
//! }
//! ```

pub mod common;
pub mod math_transform;
pub mod momentum;
pub mod overlap;
pub mod statistic;

use std::collections::BTreeMap;

use thiserror::Error;

/// What an indicator function hands back.
///
/// NaN marks slots without a value.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutput {
    /// One value per input bar
    Series(Vec<f64>),
    /// A single summary value
    Scalar(f64),
    /// Several named series, in the order the function declares them
    Named(Vec<(&'static str, Vec<f64>)>),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("requires {0} input data; only a close price series is available")]
    MissingInputs(&'static str),
}

pub type IndicatorFn = fn(&[f64]) -> Result<IndicatorOutput, IndicatorError>;

/// Name → function table
#[derive(Debug, Clone, Default)]
pub struct IndicatorRegistry {
    entries: BTreeMap<&'static str, IndicatorFn>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full TA-Lib function set
    pub fn talib() -> Self {
        let mut registry = Self::new();
        for &(name, f) in TALIB_FUNCTIONS {
            registry.register(name, f);
        }
        registry
    }

    /// Add or replace an entry. Names are stored lower-cased.
    pub fn register(&mut self, name: &'static str, f: IndicatorFn) -> &mut Self {
        debug_assert!(name.chars().all(|c| !c.is_ascii_uppercase()));
        self.entries.insert(name, f);
        self
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<IndicatorFn> {
        self.entries.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn series(values: Vec<f64>) -> Result<IndicatorOutput, IndicatorError> {
    Ok(IndicatorOutput::Series(values))
}

const TALIB_FUNCTIONS: &[(&str, IndicatorFn)] = &[
    // Overlap studies
    ("sma", |c| series(overlap::sma(c, 30))),
    ("ma", |c| series(overlap::sma(c, 30))),
    ("ema", |c| series(overlap::ema(c, 30))),
    ("wma", |c| series(overlap::wma(c, 30))),
    ("dema", |c| series(overlap::dema(c, 30))),
    ("tema", |c| series(overlap::tema(c, 30))),
    ("trima", |c| series(overlap::trima(c, 30))),
    ("kama", |c| series(overlap::kama(c, 30, 2, 30))),
    ("t3", |c| series(overlap::t3(c, 5, 0.7))),
    ("midpoint", |c| series(overlap::midpoint(c, 14))),
    ("bbands", |c| {
        let (upper, middle, lower) = overlap::bbands(c, 5, 2.0, 2.0);
        Ok(IndicatorOutput::Named(vec![
            ("upper_band", upper),
            ("middle_band", middle),
            ("lower_band", lower),
        ]))
    }),
    ("mavp", |_| Err(IndicatorError::MissingInputs("per-bar period"))),
    ("accbands", needs_hlc),
    // Momentum
    ("rsi", |c| series(momentum::rsi(c, 14))),
    ("cmo", |c| series(momentum::cmo(c, 14))),
    ("mom", |c| series(momentum::mom(c, 10))),
    ("roc", |c| series(momentum::roc(c, 10))),
    ("rocp", |c| series(momentum::rocp(c, 10))),
    ("rocr", |c| series(momentum::rocr(c, 10))),
    ("rocr100", |c| series(momentum::rocr100(c, 10))),
    ("apo", |c| series(momentum::apo(c, 12, 26))),
    ("ppo", |c| series(momentum::ppo(c, 12, 26))),
    ("trix", |c| series(momentum::trix(c, 30))),
    ("macd", macd_default),
    ("macdfix", macd_default),
    ("stochrsi", |c| {
        let (fast_k, fast_d) = momentum::stochrsi(c, 14, 5, 3);
        Ok(IndicatorOutput::Named(vec![("fast_k", fast_k), ("fast_d", fast_d)]))
    }),
    ("adx", needs_hlc),
    ("adxr", needs_hlc),
    ("aroon", needs_hl),
    ("aroonosc", needs_hl),
    ("bop", needs_ohlc),
    ("cci", needs_hlc),
    ("dx", needs_hlc),
    ("imi", needs_ohlc),
    ("mfi", needs_hlcv),
    ("minus_di", needs_hlc),
    ("minus_dm", needs_hl),
    ("plus_di", needs_hlc),
    ("plus_dm", needs_hl),
    ("stoch", needs_hlc),
    ("stochf", needs_hlc),
    ("ultosc", needs_hlc),
    ("willr", needs_hlc),
    // Volume
    ("ad", needs_hlcv),
    ("adosc", needs_hlcv),
    ("obv", |_| Err(IndicatorError::MissingInputs("volume"))),
    // Volatility
    ("atr", needs_hlc),
    ("natr", needs_hlc),
    ("trange", needs_hlc),
    // Price transform
    ("avgprice", needs_ohlc),
    ("medprice", needs_hl),
    ("typprice", needs_hlc),
    ("wclprice", needs_hlc),
    ("midprice", needs_hl),
    ("sar", needs_hl),
    ("sarext", needs_hl),
    // Statistic functions
    ("stddev", |c| series(statistic::stddev(c, 5, 1.0))),
    ("var", |c| series(statistic::var(c, 5))),
    ("linearreg", |c| series(statistic::linearreg(c, 14))),
    ("linearreg_slope", |c| series(statistic::linearreg_slope(c, 14))),
    ("linearreg_intercept", |c| series(statistic::linearreg_intercept(c, 14))),
    ("linearreg_angle", |c| series(statistic::linearreg_angle(c, 14))),
    ("tsf", |c| series(statistic::tsf(c, 14))),
    ("beta", |_| Err(IndicatorError::MissingInputs("a second price series"))),
    ("correl", |_| Err(IndicatorError::MissingInputs("a second price series"))),
    // Math transforms
    ("acos", |c| series(math_transform::acos(c))),
    ("asin", |c| series(math_transform::asin(c))),
    ("atan", |c| series(math_transform::atan(c))),
    ("ceil", |c| series(math_transform::ceil(c))),
    ("cos", |c| series(math_transform::cos(c))),
    ("cosh", |c| series(math_transform::cosh(c))),
    ("exp", |c| series(math_transform::exp(c))),
    ("floor", |c| series(math_transform::floor(c))),
    ("ln", |c| series(math_transform::ln(c))),
    ("log10", |c| series(math_transform::log10(c))),
    ("sin", |c| series(math_transform::sin(c))),
    ("sinh", |c| series(math_transform::sinh(c))),
    ("sqrt", |c| series(math_transform::sqrt(c))),
    ("tan", |c| series(math_transform::tan(c))),
    ("tanh", |c| series(math_transform::tanh(c))),
];

fn macd_default(closes: &[f64]) -> Result<IndicatorOutput, IndicatorError> {
    let (line, signal, hist) = momentum::macd(closes, 12, 26, 9);
    Ok(IndicatorOutput::Named(vec![
        ("macd", line),
        ("macd_signal", signal),
        ("macd_hist", hist),
    ]))
}

fn needs_hl(_: &[f64]) -> Result<IndicatorOutput, IndicatorError> {
    Err(IndicatorError::MissingInputs("high and low"))
}

fn needs_hlc(_: &[f64]) -> Result<IndicatorOutput, IndicatorError> {
    Err(IndicatorError::MissingInputs("high, low and close"))
}

fn needs_hlcv(_: &[f64]) -> Result<IndicatorOutput, IndicatorError> {
    Err(IndicatorError::MissingInputs("high, low, close and volume"))
}

fn needs_ohlc(_: &[f64]) -> Result<IndicatorOutput, IndicatorError> {
    Err(IndicatorError::MissingInputs("open, high, low and close"))
}
