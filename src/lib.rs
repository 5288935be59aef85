//! # u-ttest
//!
//! Parametric t-tests with assumption screening, effect sizes and
//! APA-style reporting.
//!
//! Every test first screens normality (Shapiro-Wilk, Kolmogorov-Smirnov,
//! Anderson-Darling; at least one must pass). The independent test then
//! chooses Student's or Welch's form with Levene's test. Results carry the
//! statistic, degrees of freedom, critical value, p-value, verdict and
//! Cohen's d with its magnitude label.
//!
//! ## Modules
//!
//! - [`ttest`] — Paired, independent and one-sample runners
//! - [`normality`] — Normality screen and its three sub-tests
//! - [`variance`] — Levene's test for equal variances
//! - [`effect_size`] — Cohen's d variants and interpretation
//! - [`descriptive`] — Mean, variance, standard deviation, rounding
//! - [`report`] — Plain-text result reports and APA references
//! - [`parse`] — Comma-separated numeric input
//! - [`table`] — APA table model, edits and export planning
//!
//! ## Example
//!
//! ```
//! use u_ttest::ttest::{run_paired, Tail, TestConfig};
//!
//! let before = [580.0, 590.0, 600.0, 570.0, 510.0];
//! let after = [650.0, 690.0, 670.0, 600.0, 670.0];
//! let config = TestConfig::default().with_tail(Tail::Two);
//!
//! let result = run_paired(&before, &after, config).unwrap();
//! assert_eq!(result.df, 4.0);
//! assert!(result.significant);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Values, not exceptions**: failed assumptions and undefined
//!   statistics come back as [`TestError`] variants
//! - **Pure computation**: no shared state, safe to call from any thread
//! - **Research-backed**: algorithms cite their sources

pub mod descriptive;
pub mod effect_size;
pub mod error;
pub mod normality;
pub mod parse;
pub mod report;
pub mod table;
pub mod ttest;
pub mod variance;

pub use error::{Result, TestError};
