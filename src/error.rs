//! Error type returned by the t-test runners.

use crate::ttest::{NormalityEvidence, Nonparametric};

/// Why a t-test did not produce a result.
///
/// Every variant is a value returned to the caller; none of them is a
/// crash. [`TestError::NormalityFailed`] and [`TestError::NumericUndefined`]
/// carry the normality evidence that was computed before stopping.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TestError {
    /// Paired samples of different lengths, or an empty sample.
    #[error("sample shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A sample has fewer observations than the test needs.
    #[error("insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData {
        /// Minimum number of observations.
        needed: usize,
        /// Observations supplied.
        got: usize,
    },

    /// The normality screen rejected the data; a rank-based test is recommended.
    #[error(
        "Normality assumption not met{}.\nConsider using {alternative}.",
        .normality.scope_suffix()
    )]
    NormalityFailed {
        /// Screen results for every sample that was checked.
        normality: NormalityEvidence,
        /// Recommended nonparametric alternative.
        alternative: Nonparametric,
    },

    /// The test statistic, p-value or effect size came out NaN, typically
    /// because the data has zero variance.
    #[error("T-test failed: one or more test statistics could not be calculated (NaN encountered).")]
    NumericUndefined {
        /// Screen results computed before the failure.
        normality: NormalityEvidence,
    },

    /// `alpha`, the tail mode, or a sample value is outside its accepted domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl TestError {
    /// Normality evidence attached to the error, if the screen ran.
    pub fn normality(&self) -> Option<&NormalityEvidence> {
        match self {
            Self::NormalityFailed { normality, .. } | Self::NumericUndefined { normality } => {
                Some(normality)
            }
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TestError>;
