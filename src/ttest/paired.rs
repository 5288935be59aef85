//! Paired (dependent samples) t-test.

use tracing::debug;

use super::{
    assemble, check_sample, two_sided_p, Computed, NormalityEvidence, TTestResult, Tail,
    TestConfig, TestDetails, TestFamily,
};
use crate::descriptive;
use crate::effect_size::cohens_d_paired;
use crate::error::{Result, TestError};
use crate::normality::check_normality;

/// Paired t-test on `after - before`: H₀: mean difference = 0.
///
/// # Algorithm
///
/// dᵢ = afterᵢ - beforeᵢ; t = d̄ / (s_d / √n), df = n - 1.
/// Normality is screened on the differences. One-tailed p is half the
/// two-tailed p, with the direction taken from the sign of t.
/// Cohen's d = d̄ / s_d.
///
/// # Errors
///
/// - [`TestError::ShapeMismatch`] if the samples differ in length or are empty
/// - [`TestError::InsufficientData`] if fewer than 2 pairs
/// - [`TestError::NormalityFailed`] if no normality sub-test passes
/// - [`TestError::NumericUndefined`] if every difference is zero
///
/// # Examples
///
/// ```
/// use u_ttest::ttest::{run_paired, TestConfig};
///
/// let before = [580.0, 590.0, 600.0, 570.0, 510.0];
/// let after = [650.0, 690.0, 670.0, 600.0, 670.0];
/// let r = run_paired(&before, &after, TestConfig::default()).unwrap();
/// assert_eq!(r.df, 4.0);
/// assert!(r.statistic > 0.0);
/// assert!(r.significant);
/// ```
pub fn run_paired(before: &[f64], after: &[f64], config: TestConfig) -> Result<TTestResult> {
    config.validate()?;
    if before.len() != after.len() {
        return Err(TestError::ShapeMismatch(format!(
            "before has {} values but after has {}",
            before.len(),
            after.len()
        )));
    }
    check_sample("before", before)?;
    check_sample("after", after)?;

    let diffs: Vec<f64> = after.iter().zip(before).map(|(&a, &b)| a - b).collect();

    let report = check_normality(&diffs, config.alpha);
    let normality = NormalityEvidence::Differences(report);
    debug!(
        passed = report.passed,
        passed_count = report.passed_count(),
        "paired normality screen"
    );
    if !report.passed {
        return Err(TestError::NormalityFailed {
            normality,
            alternative: TestFamily::Paired.alternative(),
        });
    }

    let undefined = || TestError::NumericUndefined { normality };
    let n = diffs.len() as f64;
    let mean_difference = descriptive::mean(&diffs).ok_or_else(undefined)?;
    let sd = descriptive::std_dev(&diffs).ok_or_else(undefined)?;

    let statistic = mean_difference / (sd / n.sqrt());
    let df = n - 1.0;
    let p_two = two_sided_p(statistic, df);
    let p_value = match config.tail {
        Tail::Two => p_two,
        Tail::One => p_two / 2.0,
    };
    let cohens_d = cohens_d_paired(&diffs).ok_or_else(undefined)?;

    let details = TestDetails::Paired {
        mean_difference,
        sd_before: descriptive::compute_sd(before).ok_or_else(undefined)?,
        sd_after: descriptive::compute_sd(after).ok_or_else(undefined)?,
    };

    assemble(
        config,
        Computed {
            statistic,
            df,
            p_value,
            cohens_d,
        },
        normality,
        details,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ttest::{Direction, Warning};

    const BEFORE: [f64; 5] = [580.0, 590.0, 600.0, 570.0, 510.0];
    const AFTER: [f64; 5] = [650.0, 690.0, 670.0, 600.0, 670.0];

    #[test]
    fn paired_two_tailed_known_values() {
        let r = run_paired(&BEFORE, &AFTER, TestConfig::default()).expect("should compute");
        // d̄ = 86, s_d = √2330
        assert!((r.statistic - 3.98387).abs() < 1e-4, "t = {}", r.statistic);
        assert_eq!(r.df, 4.0);
        assert!((r.p_value - 0.01635).abs() < 1e-3, "p = {}", r.p_value);
        assert!((r.critical_value - 2.776).abs() < 1e-3, "crit = {}", r.critical_value);
        assert!(r.significant);
        assert!(r.direction.is_none());
        assert!((r.cohens_d - 1.782).abs() < 1e-9, "d = {}", r.cohens_d);
        assert_eq!(r.effect_magnitude.as_str(), "large");
        assert!(r.normality.passed());
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn paired_details() {
        let r = run_paired(&BEFORE, &AFTER, TestConfig::default()).expect("should compute");
        match r.details {
            TestDetails::Paired {
                mean_difference,
                sd_before,
                sd_after,
            } => {
                assert!((mean_difference - 86.0).abs() < 1e-12);
                assert!((sd_before - 35.355).abs() < 1e-9);
                assert!((sd_after - 34.351).abs() < 1e-9, "sd_after = {sd_after}");
            }
            other => panic!("unexpected details {other:?}"),
        }
    }

    #[test]
    fn paired_one_tailed_halves_p() {
        let two = run_paired(&BEFORE, &AFTER, TestConfig::default()).expect("two");
        let one = run_paired(&BEFORE, &AFTER, TestConfig::default().with_tail(Tail::One))
            .expect("one");
        assert!((two.p_value - 2.0 * one.p_value).abs() < 1e-9);
        assert_eq!(one.direction, Some(Direction::AfterGreater));
        assert!((one.critical_value - 2.132).abs() < 1e-3);
    }

    #[test]
    fn paired_negative_direction() {
        let r = run_paired(&AFTER, &BEFORE, TestConfig::default().with_tail(Tail::One))
            .expect("should compute");
        assert!(r.statistic < 0.0);
        assert_eq!(r.direction, Some(Direction::AfterLess));
        assert!(r.cohens_d < 0.0);
    }

    #[test]
    fn paired_identical_is_numeric_undefined() {
        let err = run_paired(&BEFORE, &BEFORE, TestConfig::default()).unwrap_err();
        match err {
            TestError::NumericUndefined { normality } => {
                assert!(matches!(normality, NormalityEvidence::Differences(_)));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn paired_constant_shift_is_infinite_with_warning() {
        let after: Vec<f64> = BEFORE.iter().map(|x| x + 10.0).collect();
        let r = run_paired(&BEFORE, &after, TestConfig::default()).expect("should compute");
        assert!(r.statistic.is_infinite());
        assert_eq!(r.p_value, 0.0);
        assert!(r.significant);
        assert!(r.warnings.contains(&Warning::UndefinedStatistic));
    }

    #[test]
    fn paired_two_pairs_warns_small_df() {
        let r = run_paired(&[1.0, 2.0], &[2.0, 4.0], TestConfig::default())
            .expect("should compute");
        assert_eq!(r.df, 1.0);
        assert!(r.warnings.contains(&Warning::SmallDegreesOfFreedom));
    }

    #[test]
    fn paired_shape_errors() {
        assert!(matches!(
            run_paired(&[1.0, 2.0, 3.0], &[1.0, 2.0], TestConfig::default()),
            Err(TestError::ShapeMismatch(_))
        ));
        assert!(matches!(
            run_paired(&[], &[], TestConfig::default()),
            Err(TestError::ShapeMismatch(_))
        ));
        assert!(matches!(
            run_paired(&[1.0], &[2.0], TestConfig::default()),
            Err(TestError::InsufficientData { .. })
        ));
    }

    #[test]
    fn paired_invalid_alpha() {
        assert!(matches!(
            run_paired(&BEFORE, &AFTER, TestConfig::default().with_alpha(0.0)),
            Err(TestError::InvalidParameter(_))
        ));
    }

    #[test]
    fn paired_non_normal_differences() {
        let before = [0.0; 20];
        let mut after = [1.0; 20];
        after[19] = 100.0;
        let err = run_paired(&before, &after, TestConfig::default()).unwrap_err();
        match err {
            TestError::NormalityFailed {
                normality,
                alternative,
            } => {
                assert!(!normality.passed());
                assert_eq!(alternative.to_string(), "Wilcoxon Signed-Rank test");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
