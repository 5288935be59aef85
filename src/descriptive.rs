//! Descriptive statistics used by the t-test runners.
//!
//! Thin, total wrappers over `u_numflow::stats` plus the two quantities
//! the t-tests need that the numeric backend does not provide directly:
//! the standard error of the mean and the pooled standard deviation.
//!
//! All functions return `None` when the quantity is not defined for the
//! input (too few observations, or non-finite values).
//!
//! # Examples
//!
//! ```
//! use u_ttest::descriptive::{std_dev, standard_error};
//!
//! let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! let sd = std_dev(&data).unwrap();
//! assert!((sd - 2.138089935299395).abs() < 1e-12);
//! assert!((standard_error(&data).unwrap() - sd / 8f64.sqrt()).abs() < 1e-12);
//! ```

use u_numflow::stats;

/// Arithmetic mean. `None` for empty or non-finite input.
pub fn mean(data: &[f64]) -> Option<f64> {
    stats::mean(data)
}

/// Sample variance with Bessel's correction (denominator n − 1).
///
/// `None` if fewer than 2 observations or non-finite values.
pub fn variance(data: &[f64]) -> Option<f64> {
    stats::variance(data)
}

/// Sample standard deviation with Bessel's correction.
///
/// `None` if fewer than 2 observations or non-finite values.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    stats::std_dev(data)
}

/// Standard error of the mean: s / √n.
pub fn standard_error(data: &[f64]) -> Option<f64> {
    let sd = std_dev(data)?;
    Some(sd / (data.len() as f64).sqrt())
}

/// Pooled standard deviation of two groups.
///
/// sₚ = √(((n₁-1)·s₁² + (n₂-1)·s₂²) / (n₁+n₂-2))
///
/// Takes the group *variances* and sizes. `None` if n₁ + n₂ ≤ 2.
///
/// # Examples
///
/// ```
/// use u_ttest::descriptive::pooled_std_dev;
///
/// // Equal variances pool to the same value
/// let sp = pooled_std_dev(4.0, 4.0, 10, 12).unwrap();
/// assert!((sp - 2.0).abs() < 1e-12);
/// ```
pub fn pooled_std_dev(var1: f64, var2: f64, n1: usize, n2: usize) -> Option<f64> {
    if n1 + n2 <= 2 {
        return None;
    }
    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let pooled = ((n1f - 1.0) * var1 + (n2f - 1.0) * var2) / (n1f + n2f - 2.0);
    Some(pooled.sqrt())
}

/// Sample standard deviation rounded to 3 decimals, as shown in reports.
pub fn compute_sd(data: &[f64]) -> Option<f64> {
    std_dev(data).map(|sd| round_to(sd, 3))
}

/// Rounds half away from zero to `decimals` places. Non-finite values pass through.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
