//! Statistic Functions
//!
//! Rolling dispersion measures and least-squares regression over a
//! trailing window. Regression uses x = 0, 1, ..., period - 1 for the
//! window, so the newest value sits at x = period - 1.

use super::common::{mean, rolling, safe_div};

/// Rolling population standard deviation scaled by `nbdev`
pub fn stddev(values: &[f64], period: usize, nbdev: f64) -> Vec<f64> {
    var(values, period)
        .into_iter()
        .map(|v| v.sqrt() * nbdev)
        .collect()
}

/// Rolling population variance
pub fn var(values: &[f64], period: usize) -> Vec<f64> {
    rolling(values, period, |window| {
        let m = mean(window);
        window.iter().map(|x| (x - m).powi(2)).sum::<f64>() / window.len() as f64
    })
}

/// Least-squares fit of one window: (slope, intercept)
fn fit(window: &[f64]) -> (f64, f64) {
    let n = window.len() as f64;
    let sum_x = n * (n - 1.0) / 2.0;
    let sum_x2 = (n - 1.0) * n * (2.0 * n - 1.0) / 6.0;
    let sum_y: f64 = window.iter().sum();
    let sum_xy: f64 = window.iter().enumerate().map(|(x, y)| x as f64 * y).sum();

    let slope = safe_div(n * sum_xy - sum_x * sum_y, n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    (slope, intercept)
}

/// Linear regression end point: the fitted value at the newest bar
pub fn linearreg(values: &[f64], period: usize) -> Vec<f64> {
    rolling(values, period, |window| {
        let (slope, intercept) = fit(window);
        intercept + slope * (window.len() - 1) as f64
    })
}

/// Slope of the fitted regression line
pub fn linearreg_slope(values: &[f64], period: usize) -> Vec<f64> {
    rolling(values, period, |window| fit(window).0)
}

/// Intercept of the fitted regression line (its value at the oldest bar)
pub fn linearreg_intercept(values: &[f64], period: usize) -> Vec<f64> {
    rolling(values, period, |window| fit(window).1)
}

/// Angle of the fitted regression line, in degrees
pub fn linearreg_angle(values: &[f64], period: usize) -> Vec<f64> {
    rolling(values, period, |window| fit(window).0.atan().to_degrees())
}

/// Time series forecast: the regression line projected one bar ahead
pub fn tsf(values: &[f64], period: usize) -> Vec<f64> {
    rolling(values, period, |window| {
        let (slope, intercept) = fit(window);
        intercept + slope * window.len() as f64
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_var_and_stddev() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(var(&values, 8)[7], 4.0);
        assert_relative_eq!(stddev(&values, 8, 1.0)[7], 2.0);
        assert_relative_eq!(stddev(&values, 8, 2.0)[7], 4.0);
        assert!(stddev(&values, 8, 1.0)[6].is_nan());
    }

    #[test]
    fn test_regression_on_a_line() {
        // y = 3x + 10
        let values: Vec<f64> = (0..20).map(|x| 3.0 * x as f64 + 10.0).collect();
        let last = values.len() - 1;

        assert_relative_eq!(linearreg_slope(&values, 5)[last], 3.0, epsilon = 1e-9);
        assert_relative_eq!(linearreg(&values, 5)[last], values[last], epsilon = 1e-9);
        assert_relative_eq!(linearreg_intercept(&values, 5)[last], values[last - 4], epsilon = 1e-9);
        assert_relative_eq!(tsf(&values, 5)[last], values[last] + 3.0, epsilon = 1e-9);
        assert_relative_eq!(
            linearreg_angle(&values, 5)[last],
            3.0_f64.atan().to_degrees(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_regression_warmup() {
        let values: Vec<f64> = (0..20).map(|x| x as f64).collect();
        let result = linearreg(&values, 14);
        assert!(result[12].is_nan());
        assert!(!result[13].is_nan());
    }
}
