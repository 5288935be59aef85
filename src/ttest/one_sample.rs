//! One-sample t-test against a hypothesised mean.

use tracing::debug;

use super::{
    assemble, check_sample, lower_tail_p, two_sided_p, upper_tail_p, Computed,
    NormalityEvidence, TTestResult, Tail, TestConfig, TestDetails, TestFamily,
};
use crate::descriptive;
use crate::effect_size::cohens_d_one_sample;
use crate::error::{Result, TestError};
use crate::normality::check_normality;

/// One-sample t-test: H₀: μ = `mu`.
///
/// # Algorithm
///
/// t = (x̄ - μ) / (s / √n), df = n - 1.
/// Two-tailed p = 2·P(T > |t|). One-tailed p is taken on the side of the
/// observed t: P(T > t) when t > 0, otherwise P(T < t).
/// Cohen's d = (x̄ - μ) / s.
///
/// # Errors
///
/// - [`TestError::ShapeMismatch`] if the sample is empty
/// - [`TestError::InsufficientData`] if fewer than 2 values
/// - [`TestError::NormalityFailed`] if the screen rejects the sample
/// - [`TestError::NumericUndefined`] if the sample is constant and equal to μ
/// - [`TestError::InvalidParameter`] if `mu` is not finite
///
/// # Examples
///
/// ```
/// use u_ttest::ttest::{run_one_sample, TestConfig};
///
/// let data = [5.1, 4.9, 5.2, 5.0, 4.8, 5.3, 5.1, 4.9];
/// let r = run_one_sample(&data, 5.0, TestConfig::default()).unwrap();
/// assert!(!r.significant);
/// ```
pub fn run_one_sample(sample: &[f64], mu: f64, config: TestConfig) -> Result<TTestResult> {
    config.validate()?;
    if !mu.is_finite() {
        return Err(TestError::InvalidParameter(format!(
            "mu must be finite, got {mu}"
        )));
    }
    check_sample("sample", sample)?;

    let report = check_normality(sample, config.alpha);
    let normality = NormalityEvidence::Sample(report);
    debug!(
        passed = report.passed,
        passed_count = report.passed_count(),
        "one-sample normality screen"
    );
    if !report.passed {
        return Err(TestError::NormalityFailed {
            normality,
            alternative: TestFamily::OneSample.alternative(),
        });
    }

    let undefined = || TestError::NumericUndefined { normality };
    let sample_mean = descriptive::mean(sample).ok_or_else(undefined)?;
    let se = descriptive::standard_error(sample).ok_or_else(undefined)?;

    let statistic = (sample_mean - mu) / se;
    let df = sample.len() as f64 - 1.0;
    let p_value = match config.tail {
        Tail::Two => two_sided_p(statistic, df),
        Tail::One if statistic > 0.0 => upper_tail_p(statistic, df),
        Tail::One => lower_tail_p(statistic, df),
    };
    let cohens_d = cohens_d_one_sample(sample, mu).ok_or_else(undefined)?;

    assemble(
        config,
        Computed {
            statistic,
            df,
            p_value,
            cohens_d,
        },
        normality,
        TestDetails::OneSample { mu, sample_mean },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ttest::{Direction, Warning};

    const SAMPLE: [f64; 4] = [3.6, 2.4, 1.2, 0.8];

    #[test]
    fn one_sample_known_values() {
        let r = run_one_sample(&SAMPLE, 0.0, TestConfig::default()).expect("should compute");
        // x̄ = 2.0, s = √1.6, t = 2 / (√1.6 / 2) = √10
        assert!((r.statistic - 10_f64.sqrt()).abs() < 1e-10, "t = {}", r.statistic);
        assert_eq!(r.df, 3.0);
        assert!((r.p_value - 0.0508).abs() < 1e-3, "p = {}", r.p_value);
        assert!(!r.significant);
        assert!((r.cohens_d - 1.581).abs() < 1e-12, "d = {}", r.cohens_d);
        assert!(matches!(r.normality, NormalityEvidence::Sample(_)));
    }

    #[test]
    fn one_tailed_uses_observed_side() {
        let cfg = TestConfig::default().with_tail(Tail::One);
        let r = run_one_sample(&SAMPLE, 0.0, cfg).expect("should compute");
        assert_eq!(r.direction, Some(Direction::MuBelowSampleMean));
        assert!(r.significant, "p = {}", r.p_value);

        let r = run_one_sample(&SAMPLE, 4.0, cfg).expect("should compute");
        assert!(r.statistic < 0.0);
        assert_eq!(r.direction, Some(Direction::MuAboveSampleMean));
        assert!(r.p_value < 0.5, "p = {}", r.p_value);
    }

    #[test]
    fn two_tailed_is_twice_one_tailed() {
        for mu in [-1.0, 0.0, 1.5, 2.0, 3.0, 5.0] {
            let two = run_one_sample(&SAMPLE, mu, TestConfig::default()).expect("two");
            let one = run_one_sample(&SAMPLE, mu, TestConfig::default().with_tail(Tail::One))
                .expect("one");
            assert!(
                (two.p_value - 2.0 * one.p_value).abs() < 1e-9,
                "mu = {mu}: {} vs {}",
                two.p_value,
                one.p_value
            );
        }
    }

    #[test]
    fn mean_equal_to_mu() {
        let r = run_one_sample(&[1.0, 2.0, 3.0], 2.0, TestConfig::default())
            .expect("should compute");
        assert!(r.statistic.abs() < 1e-15);
        assert!((r.p_value - 1.0).abs() < 1e-9);
        assert_eq!(r.effect_magnitude.as_str(), "negligible");
    }

    #[test]
    fn constant_sample() {
        let r = run_one_sample(&[4.0, 4.0, 4.0], 1.0, TestConfig::default())
            .expect("should compute");
        assert!(r.warnings.contains(&Warning::UndefinedStatistic));

        let err = run_one_sample(&[4.0, 4.0, 4.0], 4.0, TestConfig::default()).unwrap_err();
        assert!(matches!(err, TestError::NumericUndefined { .. }));
    }

    #[test]
    fn input_errors() {
        assert!(matches!(
            run_one_sample(&[], 0.0, TestConfig::default()),
            Err(TestError::ShapeMismatch(_))
        ));
        assert!(matches!(
            run_one_sample(&[1.0], 0.0, TestConfig::default()),
            Err(TestError::InsufficientData { .. })
        ));
        assert!(matches!(
            run_one_sample(&SAMPLE, f64::NAN, TestConfig::default()),
            Err(TestError::InvalidParameter(_))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn p_bounded_and_verdict_consistent(
            data in proptest::collection::vec(-1e3_f64..1e3, 3..=30),
            mu in -1e3_f64..1e3,
            one_tailed in any::<bool>(),
        ) {
            let tail = if one_tailed { Tail::One } else { Tail::Two };
            if let Ok(r) = run_one_sample(&data, mu, TestConfig::new(0.05, tail)) {
                prop_assert!((0.0..=1.0).contains(&r.p_value), "p = {}", r.p_value);
                prop_assert_eq!(r.significant, r.p_value < 0.05);
                prop_assert_eq!(r.direction.is_some(), one_tailed);
            }
        }
    }
}
