//! Independent two-sample t-test with Student/Welch selection.

use tracing::debug;

use super::{
    assemble, check_sample, two_sided_p, Computed, NormalityEvidence, TTestResult, Tail,
    TestConfig, TestDetails, TestFamily, VarianceBranch,
};
use crate::descriptive;
use crate::effect_size::{cohens_d_averaged, cohens_d_pooled};
use crate::error::{Result, TestError};
use crate::normality::check_normality;
use crate::variance::levene_test;

/// Independent two-sample t-test: H₀: μ₁ = μ₂.
///
/// # Algorithm
///
/// 1. Both groups must pass the normality screen.
/// 2. Levene's test at α decides the branch: equal variances when p > α.
/// 3. Student: t = (x̄₁ - x̄₂) / (sₚ·√(1/n₁ + 1/n₂)), df = n₁ + n₂ - 2,
///    d = (x̄₁ - x̄₂) / sₚ.
/// 4. Welch: t = (x̄₁ - x̄₂) / √(s₁²/n₁ + s₂²/n₂), Welch-Satterthwaite df,
///    d = (x̄₁ - x̄₂) / ((s₁ + s₂) / 2).
///
/// One-tailed p is half the two-tailed p; a negative t reads
/// `group1 < group2`.
///
/// # Errors
///
/// - [`TestError::ShapeMismatch`] if a group is empty
/// - [`TestError::InsufficientData`] if a group has fewer than 2 values
/// - [`TestError::NormalityFailed`] if either group fails the screen
/// - [`TestError::NumericUndefined`] if t, p or d is NaN
///
/// # References
///
/// Welch (1947). "The generalization of Student's problem when several
/// different population variances are involved". Biometrika, 34, 28–35.
///
/// # Examples
///
/// ```
/// use u_ttest::ttest::{run_independent, TestConfig, VarianceBranch};
///
/// let g1 = [100.0, 102.0, 98.0, 101.0, 100.0];
/// let g2 = [110.0, 130.0, 115.0, 125.0, 120.0];
/// let r = run_independent(&g1, &g2, TestConfig::default()).unwrap();
/// assert_eq!(r.branch(), Some(VarianceBranch::Welch));
/// assert!(r.statistic < 0.0);
/// ```
pub fn run_independent(
    group1: &[f64],
    group2: &[f64],
    config: TestConfig,
) -> Result<TTestResult> {
    config.validate()?;
    check_sample("group1", group1)?;
    check_sample("group2", group2)?;

    let report1 = check_normality(group1, config.alpha);
    let report2 = check_normality(group2, config.alpha);
    let normality = NormalityEvidence::Groups {
        group1: report1,
        group2: report2,
    };
    debug!(
        group1_passed = report1.passed,
        group2_passed = report2.passed,
        "independent normality screen"
    );
    if !normality.passed() {
        return Err(TestError::NormalityFailed {
            normality,
            alternative: TestFamily::Independent.alternative(),
        });
    }

    let undefined = || TestError::NumericUndefined { normality };

    let levene = levene_test(&[group1, group2]).ok_or_else(undefined)?;
    let equal_variance = levene.equal_variance(config.alpha);
    let branch = if equal_variance {
        VarianceBranch::Student
    } else {
        VarianceBranch::Welch
    };
    debug!(
        levene_p = levene.p_value,
        branch = branch.name(),
        "variance homogeneity decided"
    );

    let m1 = descriptive::mean(group1).ok_or_else(undefined)?;
    let m2 = descriptive::mean(group2).ok_or_else(undefined)?;
    let var1 = descriptive::variance(group1).ok_or_else(undefined)?;
    let var2 = descriptive::variance(group2).ok_or_else(undefined)?;
    let n1 = group1.len() as f64;
    let n2 = group2.len() as f64;

    let (statistic, df, cohens_d) = match branch {
        VarianceBranch::Student => {
            let sp = descriptive::pooled_std_dev(var1, var2, group1.len(), group2.len())
                .ok_or_else(undefined)?;
            let se = sp * (1.0 / n1 + 1.0 / n2).sqrt();
            let d = cohens_d_pooled(group1, group2).ok_or_else(undefined)?;
            ((m1 - m2) / se, n1 + n2 - 2.0, d)
        }
        VarianceBranch::Welch => {
            let v1 = var1 / n1;
            let v2 = var2 / n2;
            let se = (v1 + v2).sqrt();
            let df = (v1 + v2).powi(2) / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0));
            let d = cohens_d_averaged(group1, group2).ok_or_else(undefined)?;
            ((m1 - m2) / se, df, d)
        }
    };

    let p_two = two_sided_p(statistic, df);
    let p_value = match config.tail {
        Tail::Two => p_two,
        Tail::One => p_two / 2.0,
    };

    let details = TestDetails::Independent {
        branch,
        levene,
        equal_variance,
        sd_group1: descriptive::compute_sd(group1).ok_or_else(undefined)?,
        sd_group2: descriptive::compute_sd(group2).ok_or_else(undefined)?,
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
