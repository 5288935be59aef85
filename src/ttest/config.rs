//! Significance level and tail mode shared by all t-test runners.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TestError};

/// Whether the alternative hypothesis is two-sided or directional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tail {
    /// H₁: the means differ in either direction.
    #[default]
    Two,
    /// H₁: the means differ in the direction of the observed effect.
    One,
}

impl Tail {
    /// `"two"` or `"one"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Two => "two",
            Self::One => "one",
        }
    }
}

impl fmt::Display for Tail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tail {
    type Err = TestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "two" => Ok(Self::Two),
            "one" => Ok(Self::One),
            other => Err(TestError::InvalidParameter(format!(
                "tail must be \"two\" or \"one\", got {other:?}"
            ))),
        }
    }
}

/// Parameters of a t-test run.
///
/// # Examples
///
/// ```
/// use u_ttest::ttest::{Tail, TestConfig};
///
/// let config = TestConfig::default().with_alpha(0.01).with_tail(Tail::One);
/// assert!(config.validate().is_ok());
/// assert!(TestConfig::new(1.5, Tail::Two).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    /// Significance level, in the open interval (0, 1).
    pub alpha: f64,
    /// Tail mode.
    pub tail: Tail,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            tail: Tail::Two,
        }
    }
}

impl TestConfig {
    /// Creates a configuration. Not validated until a runner uses it.
    pub fn new(alpha: f64, tail: Tail) -> Self {
        Self { alpha, tail }
    }

    /// Replaces the significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Replaces the tail mode.
    pub fn with_tail(mut self, tail: Tail) -> Self {
        self.tail = tail;
        self
    }

    /// Rejects `alpha` outside (0, 1) with [`TestError::InvalidParameter`].
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(TestError::InvalidParameter(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}
