//! Assumption-screened t-tests.
//!
//! Each runner walks the same decision sequence:
//!
//! 1. Validate the configuration and sample shapes.
//! 2. Screen normality ([`check_normality`](crate::normality::check_normality));
//!    stop with [`TestError::NormalityFailed`] if the screen rejects.
//! 3. For independent samples, choose Student or Welch from Levene's test.
//! 4. Compute t, df, the critical value and the p-value for the tail mode.
//! 5. Compute Cohen's d; stop with [`TestError::NumericUndefined`] if t, p
//!    or d is NaN.
//! 6. Attach reliability warnings (df ≤ 1, infinite t or d) and return.
//!
//! # Runners
//!
//! - [`run_paired`] — dependent samples, normality on `after - before`
//! - [`run_independent`] — two groups, Student or Welch
//! - [`run_one_sample`] — one sample against μ

mod config;
mod independent;
mod one_sample;
mod paired;
mod result;

pub use config::{Tail, TestConfig};
pub use independent::run_independent;
pub use one_sample::run_one_sample;
pub use paired::run_paired;
pub use result::{
    Direction, NormalityEvidence, Nonparametric, TTestResult, TestDetails, TestFamily,
    VarianceBranch, Warning,
};

use tracing::{debug, warn};
use u_numflow::special;

use crate::descriptive;
use crate::effect_size::interpret_cohens_d;
use crate::error::{Result, TestError};

// ---------------------------------------------------------------------------
// Shared input checks
// ---------------------------------------------------------------------------

fn check_sample(name: &str, data: &[f64]) -> Result<()> {
    if data.is_empty() {
        return Err(TestError::ShapeMismatch(format!("{name} is empty")));
    }
    if data.len() < 2 {
        return Err(TestError::InsufficientData {
            needed: 2,
            got: data.len(),
        });
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(TestError::InvalidParameter(format!(
            "{name} contains non-finite values"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// t distribution helpers
// ---------------------------------------------------------------------------

/// P(T > t). NaN when t is NaN or df is not a positive finite number.
fn upper_tail_p(t: f64, df: f64) -> f64 {
    if t.is_nan() || !(df.is_finite() && df > 0.0) {
        f64::NAN
    } else if t == f64::INFINITY {
        0.0
    } else if t == f64::NEG_INFINITY {
        1.0
    } else {
        (1.0 - special::t_distribution_cdf(t, df)).clamp(0.0, 1.0)
    }
}

/// P(T < t).
fn lower_tail_p(t: f64, df: f64) -> f64 {
    upper_tail_p(-t, df)
}

/// 2·P(T > |t|).
fn two_sided_p(t: f64, df: f64) -> f64 {
    (2.0 * upper_tail_p(t.abs(), df)).clamp(0.0, 1.0)
}

/// Critical |t| for the tail mode. NaN when df is not a positive finite number.
fn critical_value(alpha: f64, tail: Tail, df: f64) -> f64 {
    if !(df.is_finite() && df > 0.0) {
        return f64::NAN;
    }
    let level = match tail {
        Tail::Two => 1.0 - alpha / 2.0,
        Tail::One => 1.0 - alpha,
    };
    special::t_distribution_quantile(level, df)
}

// ---------------------------------------------------------------------------
// Result assembly
// ---------------------------------------------------------------------------

/// Raw quantities computed by a runner before packaging.
struct Computed {
    statistic: f64,
    df: f64,
    p_value: f64,
    cohens_d: f64,
}

fn assemble(
    config: TestConfig,
    computed: Computed,
    normality: NormalityEvidence,
    details: TestDetails,
) -> Result<TTestResult> {
    let family = details.family();
    let Computed {
        statistic,
        df,
        p_value,
        cohens_d,
    } = computed;

    if statistic.is_nan() || p_value.is_nan() || cohens_d.is_nan() {
        warn!(%family, statistic, p_value, cohens_d, "t-test produced NaN");
        return Err(TestError::NumericUndefined { normality });
    }

    let mut warnings = Vec::new();
    if df <= 1.0 {
        warnings.push(Warning::SmallDegreesOfFreedom);
    }
    if statistic.is_infinite() || cohens_d.is_infinite() {
        warnings.push(Warning::UndefinedStatistic);
    }
    if !warnings.is_empty() {
        warn!(%family, ?warnings, "t-test result needs caution");
    }

    let direction = match config.tail {
        Tail::Two => None,
        Tail::One => Some(Direction::from_statistic(family, statistic)),
    };
    let significant = p_value < config.alpha;

    debug!(
        %family,
        statistic,
        df,
        p_value,
        tail = %config.tail,
        significant,
        "t-test evaluated"
    );

    Ok(TTestResult {
        statistic,
        df,
        critical_value: critical_value(config.alpha, config.tail, df),
        p_value,
        tail: config.tail,
        alpha: config.alpha,
        direction,
        significant,
        cohens_d: descriptive::round_to(cohens_d, 3),
        effect_magnitude: interpret_cohens_d(cohens_d),
        normality,
        details,
        warnings,
    })
}
