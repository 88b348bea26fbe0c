//! Least-squares linear regression projection.

/// Fit `y = a + b·x` over the trailing `period` values (`x = 0..period`) and
/// evaluate it at the last point, `x = period - 1`.
///
/// Returns `0.0` when the series is shorter than `period`. With `period == 1`
/// the fit is degenerate and the single value is returned.
pub fn linreg(series: &[f64], period: usize) -> f64 {
    assert!(period >= 1, "linreg period must be >= 1");
    if series.len() < period {
        return 0.0;
    }
    let window = &series[series.len() - period..];
    if period == 1 {
        return window[0];
    }

    let n = period as f64;
    let (sum_x, sum_y, sum_xy, sum_x2) = window.iter().enumerate().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sx2), (i, &y)| {
            let x = i as f64;
            (sx + x, sy + y, sxy + x * y, sx2 + x * x)
        },
    );
    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    slope * (n - 1.0) + intercept
}
