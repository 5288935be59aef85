//! Variance homogeneity.
//!
//! Levene's test in the median-centred (Brown-Forsythe) form, computed as a
//! one-way ANOVA over absolute deviations from each group's median. The
//! independent t-test uses it to choose between the pooled (Student) and
//! unpooled (Welch) statistic.

use serde::{Deserialize, Serialize};
use u_numflow::{special, stats};

/// Result of Levene's test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeveneResult {
    /// F statistic on the absolute deviations. NaN if every deviation is identical.
    pub statistic: f64,
    /// Numerator degrees of freedom (k − 1).
    pub df_between: usize,
    /// Denominator degrees of freedom (N − k).
    pub df_within: usize,
    /// p-value. NaN if the statistic is undefined.
    pub p_value: f64,
}

impl LeveneResult {
    /// `p_value > alpha`. An undefined p-value never signals equal variances.
    pub fn equal_variance(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

/// Levene test for equality of variances: H₀: all groups have equal variance.
///
/// # Algorithm
///
/// 1. zᵢⱼ = |xᵢⱼ - median(groupᵢ)|
/// 2. F = MS_between / MS_within over the zᵢⱼ, df = (k-1, N-k)
///
/// When MS_within is zero, F is +∞ (p = 0) unless MS_between is also zero,
/// in which case F and p are NaN.
///
/// # Returns
///
/// `None` if fewer than 2 groups, any group < 2 observations, or non-finite values.
///
/// # References
///
/// - Levene (1960). "Robust tests for equality of variances". In
///   Olkin (Ed.), Contributions to Probability and Statistics.
/// - Brown & Forsythe (1974). "Robust tests for the equality of variances".
///   JASA, 69(346), 364–367.
///
/// # Examples
///
/// ```
/// use u_ttest::variance::levene_test;
///
/// let g1 = [4.9, 5.0, 5.0, 5.1, 5.0]; // tight cluster
/// let g2 = [0.0, 3.0, 5.0, 7.0, 10.0]; // wide spread
/// let r = levene_test(&[&g1, &g2]).unwrap();
/// assert!(r.p_value < 0.05);
/// assert!(!r.equal_variance(0.05));
/// ```
pub fn levene_test(groups: &[&[f64]]) -> Option<LeveneResult> {
    let k = groups.len();
    if k < 2 {
        return None;
    }
    for g in groups {
        if g.len() < 2 || g.iter().any(|v| !v.is_finite()) {
            return None;
        }
    }

    let z_groups: Vec<Vec<f64>> = groups
        .iter()
        .map(|g| {
            let median = stats::median(g)?;
            Some(g.iter().map(|&x| (x - median).abs()).collect())
        })
        .collect::<Option<_>>()?;

    let total_n: usize = z_groups.iter().map(Vec::len).sum();
    let grand_mean = z_groups.iter().flatten().sum::<f64>() / total_n as f64;
    let group_means: Vec<f64> = z_groups
        .iter()
        .map(|g| g.iter().sum::<f64>() / g.len() as f64)
        .collect();

    let ss_between: f64 = z_groups
        .iter()
        .zip(&group_means)
        .map(|(g, &gm)| g.len() as f64 * (gm - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = z_groups
        .iter()
        .zip(&group_means)
        .map(|(g, &gm)| g.iter().map(|&z| (z - gm).powi(2)).sum::<f64>())
        .sum();

    let df_between = k - 1;
    let df_within = total_n - k;

    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;

    let (statistic, p_value) = if ms_within > 1e-300 {
        let f = ms_between / ms_within;
        let p = 1.0 - special::f_distribution_cdf(f, df_between as f64, df_within as f64);
        (f, p.clamp(0.0, 1.0))
    } else if ms_between > 1e-300 {
        (f64::INFINITY, 0.0)
    } else {
        (f64::NAN, f64::NAN)
    };

    Some(LeveneResult {
        statistic,
        df_between,
        df_within,
        p_value,
    })
}
