//! Overlap Studies
//!
//! Moving averages and bands that plot on the same scale as price:
//! - SMA, EMA, WMA: simple, exponential and linearly weighted averages
//! - DEMA, TEMA, T3: EMA cascades with reduced lag
//! - TRIMA: triangular (double smoothed) average
//! - KAMA: Kaufman Adaptive Moving Average
//! - BBANDS: Bollinger Bands
//! - MIDPOINT: midpoint of the highest and lowest value over a period
//!
//! Every function returns a vector as long as its input, NaN where the
//! lookback is not yet satisfied. Leading NaN input (the output of another
//! indicator) shifts the start instead of poisoning the whole series.

use super::common::{first_valid, has_enough_data, mean, nan_vec, rolling};

/// Simple Moving Average (SMA)
///
/// # Formula
/// SMA = (P1 + P2 + ... + Pn) / n
///
/// # Example
/// ```
/// use sqa_cli::talib::overlap::sma;
/// let prices = vec![2.0, 4.0, 6.0, 8.0, 10.0];
/// let result = sma(&prices, 3);
/// assert_eq!(result[2], 4.0);
/// assert_eq!(result[4], 8.0);
/// ```
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let start = first_valid(values);
    let mut result = nan_vec(n);
    if period == 0 || start + period > n {
        return result;
    }

    // Exact mean per window, no running sum
    for i in (start + period - 1)..n {
        result[i] = mean(&values[i + 1 - period..=i]);
    }

    result
}

/// Exponential Moving Average (EMA)
///
/// Seeded with the SMA of the first `period` valid values, as TA-Lib does.
///
/// # Formula
/// k = 2 / (period + 1)
/// EMA = (Price - Previous EMA) × k + Previous EMA
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    ema_with_k(values, period, 2.0 / (period as f64 + 1.0))
}

fn ema_with_k(values: &[f64], period: usize, k: f64) -> Vec<f64> {
    let n = values.len();
    let start = first_valid(values);
    let mut result = nan_vec(n);
    if period == 0 || start + period > n {
        return result;
    }

    let seed_idx = start + period - 1;
    result[seed_idx] = mean(&values[start..=seed_idx]);

    for i in (seed_idx + 1)..n {
        let prev = result[i - 1];
        result[i] = if values[i].is_nan() {
            prev
        } else {
            (values[i] - prev) * k + prev
        };
    }

    result
}

/// Weighted Moving Average (WMA)
///
/// # Formula
/// WMA = (P1×1 + P2×2 + ... + Pn×n) / (1 + 2 + ... + n)
pub fn wma(values: &[f64], period: usize) -> Vec<f64> {
    let weight_sum = (period * (period + 1)) as f64 / 2.0;
    rolling(values, period, |window| {
        window
            .iter()
            .enumerate()
            .map(|(j, &v)| v * (j + 1) as f64)
            .sum::<f64>()
            / weight_sum
    })
}

/// Double Exponential Moving Average (DEMA)
///
/// # Formula
/// DEMA = 2 × EMA(price) - EMA(EMA(price))
pub fn dema(values: &[f64], period: usize) -> Vec<f64> {
    let ema1 = ema(values, period);
    let ema2 = ema(&ema1, period);

    ema1.iter()
        .zip(&ema2)
        .map(|(&e1, &e2)| 2.0 * e1 - e2)
        .collect()
}

/// Triple Exponential Moving Average (TEMA)
///
/// # Formula
/// TEMA = 3 × EMA1 - 3 × EMA2 + EMA3
pub fn tema(values: &[f64], period: usize) -> Vec<f64> {
    let ema1 = ema(values, period);
    let ema2 = ema(&ema1, period);
    let ema3 = ema(&ema2, period);

    (0..values.len())
        .map(|i| 3.0 * ema1[i] - 3.0 * ema2[i] + ema3[i])
        .collect()
}

/// Triangular Moving Average (TRIMA)
///
/// An SMA of an SMA; the two window lengths split `period` the same way
/// TA-Lib does for odd and even periods.
pub fn trima(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return nan_vec(values.len());
    }
    let (first, second) = if period % 2 == 1 {
        let half = (period + 1) / 2;
        (half, half)
    } else {
        (period / 2, period / 2 + 1)
    };
    sma(&sma(values, first), second)
}

/// Kaufman Adaptive Moving Average (KAMA)
///
/// # Formula
/// ER = |Price - Price[period]| / Σ|Price - Price[1]|
/// SC = [ER × (fast_sc - slow_sc) + slow_sc]²
/// KAMA = Previous KAMA + SC × (Price - Previous KAMA)
///
/// # Arguments
/// * `values` - Price values
/// * `period` - Efficiency ratio period
/// * `fast` - Fast EMA period (TA-Lib fixes this at 2)
/// * `slow` - Slow EMA period (TA-Lib fixes this at 30)
pub fn kama(values: &[f64], period: usize, fast: usize, slow: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = nan_vec(n);
    if !has_enough_data(n, period + 1) {
        return result;
    }

    let fast_sc = 2.0 / (fast as f64 + 1.0);
    let slow_sc = 2.0 / (slow as f64 + 1.0);

    // Seed with the price just before the first full efficiency window
    let mut prev = values[period - 1];
    for i in period..n {
        let change = (values[i] - values[i - period]).abs();
        let volatility: f64 = ((i + 1 - period)..=i)
            .map(|j| (values[j] - values[j - 1]).abs())
            .sum();
        let er = if volatility != 0.0 { change / volatility } else { 0.0 };
        let sc = (er * (fast_sc - slow_sc) + slow_sc).powi(2);

        prev += sc * (values[i] - prev);
        result[i] = prev;
    }

    result
}

/// Tillson T3
///
/// Six chained EMAs blended with coefficients derived from the volume
/// factor `v_factor` (TA-Lib default 0.7).
pub fn t3(values: &[f64], period: usize, v_factor: f64) -> Vec<f64> {
    let e1 = ema(values, period);
    let e2 = ema(&e1, period);
    let e3 = ema(&e2, period);
    let e4 = ema(&e3, period);
    let e5 = ema(&e4, period);
    let e6 = ema(&e5, period);

    let a = v_factor;
    let c1 = -a.powi(3);
    let c2 = 3.0 * a.powi(2) + 3.0 * a.powi(3);
    let c3 = -6.0 * a.powi(2) - 3.0 * a - 3.0 * a.powi(3);
    let c4 = 1.0 + 3.0 * a + a.powi(3) + 3.0 * a.powi(2);

    (0..values.len())
        .map(|i| c1 * e6[i] + c2 * e5[i] + c3 * e4[i] + c4 * e3[i])
        .collect()
}

/// Bollinger Bands
///
/// Returns (upper, middle, lower). The middle band is an SMA; the bands sit
/// `dev_up` / `dev_down` population standard deviations away from it.
pub fn bbands(
    values: &[f64],
    period: usize,
    dev_up: f64,
    dev_down: f64,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let middle = sma(values, period);
    let std = super::statistic::stddev(values, period, 1.0);

    let upper = middle.iter().zip(&std).map(|(m, s)| m + dev_up * s).collect();
    let lower = middle.iter().zip(&std).map(|(m, s)| m - dev_down * s).collect();

    (upper, middle, lower)
}

/// Midpoint over period
///
/// # Formula
/// MIDPOINT = (Highest Value + Lowest Value) / 2
pub fn midpoint(values: &[f64], period: usize) -> Vec<f64> {
    rolling(values, period, |window| {
        let hi = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let lo = window.iter().cloned().fold(f64::INFINITY, f64::min);
        (hi + lo) / 2.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(n: usize) -> Vec<f64> {
        (1..=n).map(|x| x as f64).collect()
    }

    #[test]
    fn test_sma_basic() {
        let result = sma(&ramp(10), 5);
        assert!(result[3].is_nan());
        assert_relative_eq!(result[4], 3.0);
        assert_relative_eq!(result[9], 8.0);
    }

    #[test]
    fn test_sma_skips_leading_nan() {
        let values = vec![f64::NAN, f64::NAN, 1.0, 2.0, 3.0];
        let result = sma(&values, 2);
        assert!(result[2].is_nan());
        assert_relative_eq!(result[3], 1.5);
        assert_relative_eq!(result[4], 2.5);
    }

    #[test]
    fn test_sma_exact_over_flat_stretch() {
        let result = sma(&[0.1, 0.2, 0.3, 0.0, 0.0, 0.0, 7.0, 7.0, 7.0], 3);
        assert_eq!(result[5], 0.0);
        assert_eq!(result[8], 7.0);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let result = sma(&[1.0, 2.0], 5);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let result = ema(&ramp(10), 5);
        assert!(result[3].is_nan());
        assert_relative_eq!(result[4], 3.0);
        // k = 1/3: (6 - 3) / 3 + 3
        assert_relative_eq!(result[5], 4.0);
    }

    #[test]
    fn test_wma_basic() {
        let result = wma(&[1.0, 2.0, 3.0], 3);
        // (1 + 4 + 9) / 6
        assert_relative_eq!(result[2], 14.0 / 6.0);
    }

    #[test]
    fn test_dema_tema_track_linear_trend() {
        // On a straight line DEMA and TEMA remove EMA lag entirely
        let prices = ramp(60);
        let d = dema(&prices, 5);
        let t = tema(&prices, 5);
        assert_relative_eq!(d[59], 60.0, epsilon = 1e-6);
        assert_relative_eq!(t[59], 60.0, epsilon = 1e-6);
    }

    #[test]
    fn test_trima_odd_period() {
        // period 5 → SMA(3) of SMA(3)
        let result = trima(&ramp(10), 5);
        assert!(result[3].is_nan());
        assert_relative_eq!(result[4], 3.0);
    }

    #[test]
    fn test_kama_flat_prices() {
        let prices = vec![100.0; 40];
        let result = kama(&prices, 10, 2, 30);
        assert!(result[9].is_nan());
        assert_relative_eq!(result[39], 100.0);
    }

    #[test]
    fn test_t3_constant_series() {
        let prices = vec![50.0; 60];
        let result = t3(&prices, 5, 0.7);
        assert_relative_eq!(result[59], 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bbands_symmetric() {
        let prices = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let (upper, middle, lower) = bbands(&prices, 5, 2.0, 2.0);
        assert_relative_eq!(middle[4], 3.0);
        assert_relative_eq!(upper[4] - middle[4], middle[4] - lower[4]);
        assert_relative_eq!(upper[4], 3.0 + 2.0 * 2.0_f64.sqrt());
    }

    #[test]
    fn test_midpoint() {
        let result = midpoint(&[1.0, 5.0, 3.0, 9.0], 3);
        assert_relative_eq!(result[2], 3.0);
        assert_relative_eq!(result[3], 6.0);
    }

    #[test]
    fn test_all_same_length() {
        let prices = ramp(100);
        assert_eq!(sma(&prices, 30).len(), 100);
        assert_eq!(ema(&prices, 30).len(), 100);
        assert_eq!(wma(&prices, 30).len(), 100);
        assert_eq!(dema(&prices, 30).len(), 100);
        assert_eq!(tema(&prices, 30).len(), 100);
        assert_eq!(trima(&prices, 30).len(), 100);
        assert_eq!(kama(&prices, 30, 2, 30).len(), 100);
        assert_eq!(t3(&prices, 5, 0.7).len(), 100);
        assert_eq!(midpoint(&prices, 30).len(), 100);
    }

    #[test]
    fn test_empty_input() {
        let empty: Vec<f64> = vec![];
        assert!(sma(&empty, 14).is_empty());
        assert!(ema(&empty, 14).is_empty());
        assert!(wma(&empty, 14).is_empty());
        assert!(kama(&empty, 14, 2, 30).is_empty());
        assert!(trima(&empty, 14).is_empty());
    }
}
