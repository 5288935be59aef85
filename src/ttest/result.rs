//! Structured t-test outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::Tail;
use crate::effect_size::EffectMagnitude;
use crate::normality::NormalityReport;
use crate::variance::LeveneResult;

/// The three supported test families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestFamily {
    /// Dependent samples (before / after).
    Paired,
    /// Two independent groups.
    Independent,
    /// One sample against a hypothesised mean.
    OneSample,
}

impl TestFamily {
    /// `"paired"`, `"independent"` or `"one_sample"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paired => "paired",
            Self::Independent => "independent",
            Self::OneSample => "one_sample",
        }
    }

    /// Rank-based test to fall back to when normality is rejected.
    pub fn alternative(&self) -> Nonparametric {
        match self {
            Self::Paired | Self::OneSample => Nonparametric::WilcoxonSignedRank,
            Self::Independent => Nonparametric::MannWhitneyU,
        }
    }
}

impl fmt::Display for TestFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nonparametric test recommended when the normality screen fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nonparametric {
    /// Wilcoxon signed-rank test.
    WilcoxonSignedRank,
    /// Mann-Whitney U test.
    MannWhitneyU,
}

impl fmt::Display for Nonparametric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WilcoxonSignedRank => "Wilcoxon Signed-Rank test",
            Self::MannWhitneyU => "Mann-Whitney U test",
        })
    }
}

/// Normality screen results for every sample a test checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "screened", rename_all = "snake_case")]
pub enum NormalityEvidence {
    /// Paired test: the differences `after - before`.
    Differences(NormalityReport),
    /// One-sample test: the sample itself.
    Sample(NormalityReport),
    /// Independent test: each group separately.
    Groups {
        /// First group.
        group1: NormalityReport,
        /// Second group.
        group2: NormalityReport,
    },
}

impl NormalityEvidence {
    /// True when every screened sample passed.
    pub fn passed(&self) -> bool {
        match self {
            Self::Differences(r) | Self::Sample(r) => r.passed,
            Self::Groups { group1, group2 } => group1.passed && group2.passed,
        }
    }

    /// Whether more than one sample was screened.
    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Groups { .. })
    }

    pub(crate) fn scope_suffix(&self) -> &'static str {
        if self.is_grouped() {
            " in one or both groups"
        } else {
            ""
        }
    }

    /// Reports paired with a heading describing what was screened.
    pub fn labelled(&self) -> Vec<(&'static str, &NormalityReport)> {
        match self {
            Self::Differences(r) => vec![("Differences (after - before)", r)],
            Self::Sample(r) => vec![("Sample", r)],
            Self::Groups { group1, group2 } => vec![("Group 1", group1), ("Group 2", group2)],
        }
    }
}

/// Direction of a one-tailed result, taken from the sign of t.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Paired, t > 0.
    #[serde(rename = "after > before")]
    AfterGreater,
    /// Paired, t ≤ 0.
    #[serde(rename = "after < before")]
    AfterLess,
    /// Independent, t ≤ 0.
    #[serde(rename = "group1 < group2")]
    Group1Less,
    /// Independent, t > 0.
    #[serde(rename = "group1 > group2")]
    Group1Greater,
    /// One-sample, t > 0.
    #[serde(rename = "μ < sample mean")]
    MuBelowSampleMean,
    /// One-sample, t ≤ 0.
    #[serde(rename = "μ > sample mean")]
    MuAboveSampleMean,
}

impl Direction {
    /// Direction label for `family` given the observed t statistic.
    pub fn from_statistic(family: TestFamily, t: f64) -> Self {
        let positive = t > 0.0;
        match (family, positive) {
            (TestFamily::Paired, true) => Self::AfterGreater,
            (TestFamily::Paired, false) => Self::AfterLess,
            (TestFamily::Independent, true) => Self::Group1Greater,
            (TestFamily::Independent, false) => Self::Group1Less,
            (TestFamily::OneSample, true) => Self::MuBelowSampleMean,
            (TestFamily::OneSample, false) => Self::MuAboveSampleMean,
        }
    }

    /// Human-readable label, e.g. `"after > before"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AfterGreater => "after > before",
            Self::AfterLess => "after < before",
            Self::Group1Less => "group1 < group2",
            Self::Group1Greater => "group1 > group2",
            Self::MuBelowSampleMean => "μ < sample mean",
            Self::MuAboveSampleMean => "μ > sample mean",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which independent-samples formula produced the statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceBranch {
    /// Pooled variance, df = n₁ + n₂ − 2.
    Student,
    /// Unpooled variance, Welch-Satterthwaite df.
    Welch,
}

impl VarianceBranch {
    /// Display name of the test that was run.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Student => "Student's t-test",
            Self::Welch => "Welch's t-test",
        }
    }
}

/// Reliability notes that accompany a result without changing its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    /// df ≤ 1: p-value and t are not reliable.
    SmallDegreesOfFreedom,
    /// t or Cohen's d is infinite because the spread is zero.
    UndefinedStatistic,
}

impl Warning {
    /// Note shown under the t-test block of a report. A paired test
    /// describes its differences rather than its values.
    pub fn message(&self, family: TestFamily) -> &'static str {
        match (self, family) {
            (Self::SmallDegreesOfFreedom, _) => {
                "Note: Sample size is extremely small (df ≤ 1). \
                 Interpretation of p-value and t-statistic may not be reliable."
            }
            (Self::UndefinedStatistic, TestFamily::Paired) => {
                "Note: All differences were identical. \
                 Standard deviation is zero, so t and Cohen's d are undefined (∞). \
                 Interpretation requires caution."
            }
            (Self::UndefinedStatistic, _) => {
                "Note: All values were identical. \
                 Standard deviation is zero, so t and Cohen's d are undefined (∞). \
                 Interpretation requires caution."
            }
        }
    }
}

/// Family-specific quantities reported alongside the common fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum TestDetails {
    /// Paired test.
    Paired {
        /// Mean of `after - before`.
        mean_difference: f64,
        /// SD of the `before` sample, rounded to 3 decimals.
        sd_before: f64,
        /// SD of the `after` sample, rounded to 3 decimals.
        sd_after: f64,
    },
    /// Independent two-sample test.
    Independent {
        /// Formula branch chosen by Levene's test.
        branch: VarianceBranch,
        /// Levene's test on the two groups.
        levene: LeveneResult,
        /// `levene.p_value > alpha`.
        equal_variance: bool,
        /// SD of group 1, rounded to 3 decimals.
        sd_group1: f64,
        /// SD of group 2, rounded to 3 decimals.
        sd_group2: f64,
    },
    /// One-sample test.
    OneSample {
        /// Hypothesised population mean.
        mu: f64,
        /// Observed sample mean.
        sample_mean: f64,
    },
}

impl TestDetails {
    /// Family these details belong to.
    pub fn family(&self) -> TestFamily {
        match self {
            Self::Paired { .. } => TestFamily::Paired,
            Self::Independent { .. } => TestFamily::Independent,
            Self::OneSample { .. } => TestFamily::OneSample,
        }
    }
}

/// Successful t-test outcome.
///
/// `significant` is exactly `p_value < alpha`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    /// t statistic.
    pub statistic: f64,
    /// Degrees of freedom (fractional for Welch).
    pub df: f64,
    /// Critical |t| at α/2 (two-tailed) or α (one-tailed).
    pub critical_value: f64,
    /// p-value under the configured tail mode.
    pub p_value: f64,
    /// Tail mode.
    pub tail: Tail,
    /// Significance level.
    pub alpha: f64,
    /// Direction of the effect; `Some` only for one-tailed tests.
    pub direction: Option<Direction>,
    /// `p_value < alpha`.
    pub significant: bool,
    /// Cohen's d rounded to 3 decimals.
    pub cohens_d: f64,
    /// Magnitude of the unrounded d.
    pub effect_magnitude: EffectMagnitude,
    /// Normality screen that allowed the test to proceed.
    pub normality: NormalityEvidence,
    /// Family-specific quantities.
    pub details: TestDetails,
    /// Reliability notes.
    pub warnings: Vec<Warning>,
}

impl TTestResult {
    /// Test family that produced this result.
    pub fn family(&self) -> TestFamily {
        self.details.family()
    }

    /// Formula branch, for independent tests.
    pub fn branch(&self) -> Option<VarianceBranch> {
        match self.details {
            TestDetails::Independent { branch, .. } => Some(branch),
            _ => None,
        }
    }

    /// `"Significant"` or `"Not Significant"`.
    pub fn verdict(&self) -> &'static str {
        if self.significant {
            "Significant"
        } else {
            "Not Significant"
        }
    }
}
