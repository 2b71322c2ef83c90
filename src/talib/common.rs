//! Helpers shared by the indicator functions

/// A result vector with every slot marked as "no value"
#[inline]
pub fn nan_vec(len: usize) -> Vec<f64> {
    vec![f64::NAN; len]
}

/// True when a series of `len` values can produce at least one output for `period`
#[inline]
pub fn has_enough_data(len: usize, period: usize) -> bool {
    len >= period && period > 0
}

#[inline]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Division that yields NaN instead of an infinity
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

/// Index of the first non-NaN value, or `values.len()` when there is none
pub fn first_valid(values: &[f64]) -> usize {
    values.iter().position(|v| !v.is_nan()).unwrap_or(values.len())
}

/// Apply `f` to every full trailing window of `period` values.
///
/// Slots without a full window stay NaN, as do windows containing NaN.
pub fn rolling<F>(values: &[f64], period: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = values.len();
    let mut result = nan_vec(n);
    if !has_enough_data(n, period) {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[(i + 1 - period)..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = f(window);
    }
    result
}

/// Element-wise map that keeps NaN slots untouched
pub fn map_valid<F>(values: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    values
        .iter()
        .map(|&v| if v.is_nan() { f64::NAN } else { f(v) })
        .collect()
}

/// Pairwise differences (like np.diff)
pub fn diff(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return vec![];
    }
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Split price changes into gains and (positive) losses
pub fn gains_losses(changes: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let gains = changes.iter().map(|&c| c.max(0.0)).collect();
    let losses = changes.iter().map(|&c| (-c).max(0.0)).collect();
    (gains, losses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_vec() {
        let v = nan_vec(4);
        assert_eq!(v.len(), 4);
        assert!(v.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_has_enough_data() {
        assert!(has_enough_data(5, 5));
        assert!(!has_enough_data(4, 5));
        assert!(!has_enough_data(4, 0));
    }

    #[test]
    fn test_first_valid() {
        assert_eq!(first_valid(&[f64::NAN, f64::NAN, 3.0]), 2);
        assert_eq!(first_valid(&[f64::NAN]), 1);
        assert_eq!(first_valid(&[]), 0);
    }

    #[test]
    fn test_rolling_skips_nan_windows() {
        let v = vec![f64::NAN, 2.0, 3.0, 4.0];
        let result = rolling(&v, 2, mean);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_eq!(result[2], 2.5);
        assert_eq!(result[3], 3.5);
    }

    #[test]
    fn test_map_valid() {
        let result = map_valid(&[4.0, f64::NAN], f64::sqrt);
        assert_eq!(result[0], 2.0);
        assert!(result[1].is_nan());
    }

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(10.0, 4.0), 2.5);
        assert!(safe_div(1.0, 0.0).is_nan());
    }

    #[test]
    fn test_gains_losses() {
        let (gains, losses) = gains_losses(&diff(&[1.0, 3.0, 2.0, 2.0]));
        assert_eq!(gains, vec![2.0, 0.0, 0.0]);
        assert_eq!(losses, vec![0.0, 1.0, 0.0]);
    }
}
