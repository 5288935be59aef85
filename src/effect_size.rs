//! Cohen's d effect sizes and their qualitative magnitude.
//!
//! Each t-test family standardises the mean difference differently:
//!
//! | Family | d |
//! |--------|---|
//! | Paired | mean(diff) / sd(diff) |
//! | One-sample | (x̄ - μ) / s |
//! | Independent, equal variances | (x̄₁ - x̄₂) / sₚ |
//! | Independent, unequal variances | (x̄₁ - x̄₂) / ((s₁ + s₂) / 2) |
//!
//! The unequal-variance form averages the two standard deviations. It is
//! neither the pooled SD nor Hedges-corrected; reported effect sizes rely
//! on it staying that way.
//!
//! These functions do not guard against zero spread: a zero denominator
//! yields ±∞ or NaN, which the test runners inspect.
//!
//! # References
//!
//! Cohen (1988). *Statistical Power Analysis for the Behavioral Sciences*,
//! 2nd ed. Lawrence Erlbaum.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptive;

/// Qualitative magnitude of |d|.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectMagnitude {
    /// |d| < 0.2
    Negligible,
    /// 0.2 ≤ |d| < 0.5
    Small,
    /// 0.5 ≤ |d| < 0.8
    Medium,
    /// |d| ≥ 0.8, or not comparable (NaN)
    Large,
}

impl EffectMagnitude {
    /// Lowercase label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies |d| into Cohen's conventional buckets.
///
/// Total: NaN falls through every threshold comparison and lands in
/// [`EffectMagnitude::Large`].
///
/// # Examples
///
/// ```
/// use u_ttest::effect_size::{interpret_cohens_d, EffectMagnitude};
///
/// assert_eq!(interpret_cohens_d(0.1), EffectMagnitude::Negligible);
/// assert_eq!(interpret_cohens_d(-0.6), EffectMagnitude::Medium);
/// assert_eq!(interpret_cohens_d(1.78), EffectMagnitude::Large);
/// ```
pub fn interpret_cohens_d(d: f64) -> EffectMagnitude {
    let d = d.abs();
    if d < 0.2 {
        EffectMagnitude::Negligible
    } else if d < 0.5 {
        EffectMagnitude::Small
    } else if d < 0.8 {
        EffectMagnitude::Medium
    } else {
        EffectMagnitude::Large
    }
}

/// Paired d: mean of the differences over their standard deviation.
pub fn cohens_d_paired(diffs: &[f64]) -> Option<f64> {
    let mean = descriptive::mean(diffs)?;
    let sd = descriptive::std_dev(diffs)?;
    Some(mean / sd)
}

/// One-sample d: (x̄ - μ) / s.
pub fn cohens_d_one_sample(sample: &[f64], mu: f64) -> Option<f64> {
    let mean = descriptive::mean(sample)?;
    let sd = descriptive::std_dev(sample)?;
    Some((mean - mu) / sd)
}

/// Independent d with the pooled standard deviation.
pub fn cohens_d_pooled(group1: &[f64], group2: &[f64]) -> Option<f64> {
    let m1 = descriptive::mean(group1)?;
    let m2 = descriptive::mean(group2)?;
    let sp = descriptive::pooled_std_dev(
        descriptive::variance(group1)?,
        descriptive::variance(group2)?,
        group1.len(),
        group2.len(),
    )?;
    Some((m1 - m2) / sp)
}

/// Independent d with the arithmetic mean of the two standard deviations.
pub fn cohens_d_averaged(group1: &[f64], group2: &[f64]) -> Option<f64> {
    let m1 = descriptive::mean(group1)?;
    let m2 = descriptive::mean(group2)?;
    let s1 = descriptive::std_dev(group1)?;
    let s2 = descriptive::std_dev(group2)?;
    Some((m1 - m2) / ((s1 + s2) / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_at_boundaries() {
        assert_eq!(interpret_cohens_d(0.0), EffectMagnitude::Negligible);
        assert_eq!(interpret_cohens_d(0.19999), EffectMagnitude::Negligible);
        assert_eq!(interpret_cohens_d(0.2), EffectMagnitude::Small);
        assert_eq!(interpret_cohens_d(0.5), EffectMagnitude::Medium);
        assert_eq!(interpret_cohens_d(0.8), EffectMagnitude::Large);
        assert_eq!(interpret_cohens_d(f64::INFINITY), EffectMagnitude::Large);
        assert_eq!(interpret_cohens_d(f64::NEG_INFINITY), EffectMagnitude::Large);
    }

    #[test]
    fn nan_is_total() {
        assert_eq!(interpret_cohens_d(f64::NAN), EffectMagnitude::Large);
    }

    #[test]
    fn labels() {
        assert_eq!(EffectMagnitude::Small.to_string(), "small");
        assert_eq!(EffectMagnitude::Negligible.as_str(), "negligible");
    }

    #[test]
    fn paired_known_value() {
        // mean 86, sd √2330
        let d = cohens_d_paired(&[70.0, 100.0, 70.0, 30.0, 160.0]).expect("d");
        assert!((d - 86.0 / 2330_f64.sqrt()).abs() < 1e-12, "d = {d}");
    }

    #[test]
    fn one_sample_known_value() {
        // mean 2.0, sd √1.6
        let d = cohens_d_one_sample(&[3.6, 2.4, 1.2, 0.8], 0.0).expect("d");
        assert!((d - 2.0 / 1.6_f64.sqrt()).abs() < 1e-12, "d = {d}");
    }

    #[test]
    fn pooled_equals_averaged_for_equal_spread() {
        let g1 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let g2 = [3.0, 4.0, 5.0, 6.0, 7.0];
        let dp = cohens_d_pooled(&g1, &g2).expect("d");
        let da = cohens_d_averaged(&g1, &g2).expect("d");
        assert!((dp - da).abs() < 1e-12);
        assert!((dp + 2.0 / 2.5_f64.sqrt()).abs() < 1e-12, "d = {dp}");
    }

    #[test]
    fn averaged_differs_from_pooled_for_unequal_sizes() {
        let g1 = [1.0, 2.0, 3.0];
        let g2 = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];
        let dp = cohens_d_pooled(&g1, &g2).expect("d");
        let da = cohens_d_averaged(&g1, &g2).expect("d");
        assert!((dp - da).abs() > 1e-3);
    }

    #[test]
    fn zero_spread_is_infinite() {
        let d = cohens_d_paired(&[5.0, 5.0, 5.0]).expect("d");
        assert!(d.is_infinite());
        let d = cohens_d_paired(&[0.0, 0.0, 0.0]).expect("d");
        assert!(d.is_nan());
    }
}
