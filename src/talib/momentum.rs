//! Momentum Indicators
//!
//! Oscillators and rate-of-change measures computed from a close series.

use super::common::{diff, gains_losses, has_enough_data, nan_vec, rolling, safe_div};
use super::overlap::{ema, sma};

/// Wilder-smoothed average gain and loss, indexed like the input series.
///
/// Slot `i` holds the averages over the `period` changes ending at `i`,
/// so the first populated slot is `period`.
fn wilder_gain_loss(closes: &[f64], period: usize) -> Vec<Option<(f64, f64)>> {
    let n = closes.len();
    let mut result = vec![None; n];
    if period == 0 || n < period + 1 {
        return result;
    }

    let (gains, losses) = gains_losses(&diff(closes));
    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;
    result[period] = Some((avg_gain, avg_loss));

    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        result[i + 1] = Some((avg_gain, avg_loss));
    }

    result
}

/// Relative Strength Index (Wilder's RSI)
///
/// # Formula
/// RS = Average Gain / Average Loss (Wilder's smoothing)
/// RSI = 100 - (100 / (1 + RS))
///
/// # Returns
/// Values between 0 and 100, NaN for the first `period` slots
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    wilder_gain_loss(closes, period)
        .into_iter()
        .map(|slot| match slot {
            None => f64::NAN,
            Some((gain, loss)) if loss != 0.0 => 100.0 - 100.0 / (1.0 + gain / loss),
            Some((gain, _)) if gain != 0.0 => 100.0,
            Some(_) => 50.0,
        })
        .collect()
}

/// Chande Momentum Oscillator
///
/// # Formula
/// CMO = 100 × (Average Gain - Average Loss) / (Average Gain + Average Loss)
pub fn cmo(closes: &[f64], period: usize) -> Vec<f64> {
    wilder_gain_loss(closes, period)
        .into_iter()
        .map(|slot| match slot {
            None => f64::NAN,
            Some((gain, loss)) if gain + loss != 0.0 => 100.0 * (gain - loss) / (gain + loss),
            Some(_) => 0.0,
        })
        .collect()
}

/// Momentum: Close - Close[period]
pub fn mom(closes: &[f64], period: usize) -> Vec<f64> {
    lagged(closes, period, |now, then| now - then)
}

/// Rate of change: ((Close / Close[period]) - 1) × 100
pub fn roc(closes: &[f64], period: usize) -> Vec<f64> {
    lagged(closes, period, |now, then| safe_div(now - then, then) * 100.0)
}

/// Rate of change percentage: (Close - Close[period]) / Close[period]
pub fn rocp(closes: &[f64], period: usize) -> Vec<f64> {
    lagged(closes, period, |now, then| safe_div(now - then, then))
}

/// Rate of change ratio: Close / Close[period]
pub fn rocr(closes: &[f64], period: usize) -> Vec<f64> {
    lagged(closes, period, safe_div)
}

/// Rate of change ratio on a 100 scale: (Close / Close[period]) × 100
pub fn rocr100(closes: &[f64], period: usize) -> Vec<f64> {
    lagged(closes, period, |now, then| safe_div(now, then) * 100.0)
}

fn lagged<F>(closes: &[f64], period: usize, f: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64,
{
    let n = closes.len();
    let mut result = nan_vec(n);
    if !has_enough_data(n, period + 1) {
        return result;
    }
    for i in period..n {
        result[i] = f(closes[i], closes[i - period]);
    }
    result
}

/// Absolute Price Oscillator: SMA(fast) - SMA(slow)
///
/// TA-Lib's default moving average type for APO and PPO is the SMA.
pub fn apo(closes: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    let fast_ma = sma(closes, fast);
    let slow_ma = sma(closes, slow);
    fast_ma.iter().zip(&slow_ma).map(|(f, s)| f - s).collect()
}

/// Percentage Price Oscillator: (SMA(fast) - SMA(slow)) / SMA(slow) × 100
pub fn ppo(closes: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    let fast_ma = sma(closes, fast);
    let slow_ma = sma(closes, slow);
    fast_ma
        .iter()
        .zip(&slow_ma)
        .map(|(&f, &s)| safe_div(f - s, s) * 100.0)
        .collect()
}

/// TRIX: 1-period rate of change of a triple-smoothed EMA
pub fn trix(closes: &[f64], period: usize) -> Vec<f64> {
    let e3 = ema(&ema(&ema(closes, period), period), period);
    let n = e3.len();
    let mut result = nan_vec(n);
    for i in 1..n {
        result[i] = safe_div(e3[i] - e3[i - 1], e3[i - 1]) * 100.0;
    }
    result
}

/// MACD - Moving Average Convergence Divergence
///
/// Returns (macd_line, signal_line, histogram)
///
/// Formula:
/// - MACD Line = EMA(fast) - EMA(slow)
/// - Signal Line = EMA(MACD Line, signal_period)
/// - Histogram = MACD Line - Signal Line
///
/// Both EMAs start at the slow period index, the fast one seeded from the
/// `fast` values ending there, which is how TA-Lib aligns them.
pub fn macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let n = closes.len();
    if fast == 0 || signal == 0 || fast >= slow || !has_enough_data(n, slow + signal - 1) {
        return (nan_vec(n), nan_vec(n), nan_vec(n));
    }

    let slow_start = slow - 1;
    let fast_k = 2.0 / (fast as f64 + 1.0);
    let slow_k = 2.0 / (slow as f64 + 1.0);

    let mut fast_ema = closes[(slow - fast)..slow].iter().sum::<f64>() / fast as f64;
    let mut slow_ema = closes[..slow].iter().sum::<f64>() / slow as f64;

    let mut macd_line = nan_vec(n);
    macd_line[slow_start] = fast_ema - slow_ema;
    for i in slow..n {
        fast_ema += (closes[i] - fast_ema) * fast_k;
        slow_ema += (closes[i] - slow_ema) * slow_k;
        macd_line[i] = fast_ema - slow_ema;
    }

    let signal_line = ema(&macd_line, signal);
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    (macd_line, signal_line, histogram)
}

/// Stochastic RSI
///
/// Returns (fast_k, fast_d): the stochastic of RSI values over `k_period`,
/// and its SMA over `d_period`.
pub fn stochrsi(
    closes: &[f64],
    rsi_period: usize,
    k_period: usize,
    d_period: usize,
) -> (Vec<f64>, Vec<f64>) {
    let rsi_values = rsi(closes, rsi_period);
    let fast_k = rolling(&rsi_values, k_period, |window| {
        let hi = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let lo = window.iter().cloned().fold(f64::INFINITY, f64::min);
        let last = window[window.len() - 1];
        if hi == lo {
            0.0
        } else {
            (last - lo) / (hi - lo) * 100.0
        }
    });
    let fast_d = sma(&fast_k, d_period);
    (fast_k, fast_d)
}
