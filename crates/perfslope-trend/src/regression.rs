//! Ordinary least-squares line fitting.

/// Tolerance below which sums are treated as zero.
pub const EPSILON: f64 = 1e-15;

/// Result of fitting `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change in `y` per unit of `x`.
    pub slope: f64,
    /// Value of the fitted line at `x = 0`.
    pub intercept: f64,
    /// Coefficient of determination.
    ///
    /// `1.0` when every `y` is equal and the line passes through all of them,
    /// `NaN` when every `x` is equal and no line can be fitted.
    pub r_squared: f64,
}

/// Fits a least-squares line through `(x, y)` points.
///
/// Returns `None` for fewer than two points. When all `x` are equal the fit
/// is degenerate: the slope is `0.0` and R² is `NaN`.
#[must_use]
pub fn linear_regression(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), &(x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
    );
    let mean_y = sum_y / n;

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < EPSILON {
        return Some(LinearFit {
            slope: 0.0,
            intercept: mean_y,
            r_squared: f64::NAN,
        });
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    let (ss_total, ss_residual) =
        points
            .iter()
            .fold((0.0, 0.0), |(total, residual), &(x, y)| {
                let predicted = slope * x + intercept;
                (
                    total + (y - mean_y) * (y - mean_y),
                    residual + (y - predicted) * (y - predicted),
                )
            });

    let r_squared = if ss_total.abs() < EPSILON {
        if ss_residual.abs() < EPSILON { 1.0 } else { 0.0 }
    } else {
        1.0 - ss_residual / ss_total
    };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}
