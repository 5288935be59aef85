//! Plain-text reports for t-test outcomes.
//!
//! Pure string templating over [`TTestResult`] and [`TestError`]; no
//! statistical decisions are made here.
//!
//! A successful report has four parts:
//!
//! 1. Title and normality block (4-decimal p-values)
//! 2. t-test block (3-decimal t and critical value, 4-decimal p, verdict,
//!    reason, Cohen's d, family-specific lines)
//! 3. Reliability notes, if any
//! 4. APA reference block chosen by family and tags
//!
//! # Examples
//!
//! ```
//! use u_ttest::report::render;
//! use u_ttest::ttest::{run_paired, TestConfig};
//!
//! let before = [580.0, 590.0, 600.0, 570.0, 510.0];
//! let after = [650.0, 690.0, 670.0, 600.0, 670.0];
//! let r = run_paired(&before, &after, TestConfig::default()).unwrap();
//! let text = render(&r);
//! assert!(text.starts_with("Paired t-test (two-tailed) result:"));
//! assert!(text.contains("t(4) = 3.984"));
//! ```

mod references;

pub use references::{citations, references_for, ReferenceTag};

use std::fmt::Write as _;

use crate::error::{Result, TestError};
use crate::normality::NormalityReport;
use crate::ttest::{
    NormalityEvidence, Nonparametric, TTestResult, TestDetails, TestFamily, VarianceBranch,
};

use references::RULE_WIDTH;

const TITLE_RULE_WIDTH: usize = 58;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn title(family: TestFamily) -> &'static str {
    match family {
        TestFamily::Paired => "Paired t-test",
        TestFamily::Independent => "Independent t-test",
        TestFamily::OneSample => "One-sample t-test",
    }
}

fn pass_label(passed: bool) -> &'static str {
    if passed {
        "passed"
    } else {
        "failed"
    }
}

/// Integral df as `4`, fractional (Welch) df as `4.28`.
fn format_df(df: f64) -> String {
    if df.is_finite() && df.fract() == 0.0 {
        format!("{df:.0}")
    } else {
        format!("{df:.2}")
    }
}

fn normality_lines(out: &mut String, heading: &str, report: &NormalityReport) {
    let sw = &report.shapiro_wilk;
    let ks = &report.kolmogorov_smirnov;
    let ad = &report.anderson_darling;
    let _ = writeln!(out, "Normality Test on {heading}:");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(
        out,
        "Shapiro-Wilk:        {} (p = {:.4})",
        pass_label(sw.passed),
        sw.p_value
    );
    let _ = writeln!(
        out,
        "Kolmogorov-Smirnov:  {} (p = {:.4})",
        pass_label(ks.passed),
        ks.p_value
    );
    let _ = writeln!(
        out,
        "Anderson-Darling:    {} (stat = {:.4}, crit = {:.4})",
        pass_label(ad.passed),
        ad.statistic,
        ad.critical_value
    );
}

/// Normality sub-test lines for every screened sample.
pub fn render_normality(evidence: &NormalityEvidence) -> String {
    let mut out = String::new();
    for (i, (heading, report)) in evidence.labelled().into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        normality_lines(&mut out, heading, report);
    }
    out
}

fn reference_tags(result: &TTestResult) -> Vec<ReferenceTag> {
    match result.branch() {
        Some(VarianceBranch::Welch) => vec![ReferenceTag::Welch],
        _ => Vec::new(),
    }
}

/// Full report for a successful test.
pub fn render(result: &TTestResult) -> String {
    let family = result.family();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({}-tailed) result:",
        title(family),
        result.tail
    );
    let _ = writeln!(out, "{}", "=".repeat(TITLE_RULE_WIDTH));
    out.push('\n');
    out.push_str(&render_normality(&result.normality));
    out.push('\n');
    out.push_str("Normality assumption met (at least 1 test passed). Proceeding to t-test...\n\n");

    let _ = writeln!(out, "T-test Result:");
    let _ = writeln!(out, "{}", rule());

    if let TestDetails::Independent {
        branch,
        levene,
        equal_variance,
        ..
    } = result.details
    {
        let _ = writeln!(out, "Test Used: {}", branch.name());
        let _ = writeln!(
            out,
            "Variance Equality: {} (Levene’s p = {:.4})",
            if equal_variance { "Passed" } else { "Failed" },
            levene.p_value
        );
    }
    if let TestDetails::OneSample { mu, sample_mean } = result.details {
        let _ = writeln!(out, "Population mean (μ) = {mu}");
        let _ = writeln!(out, "Sample mean = {sample_mean:.3}");
    }
    if let Some(direction) = result.direction {
        let _ = writeln!(out, "Direction: {direction}");
    }

    let significant = result.significant;
    let _ = writeln!(
        out,
        "Critical value = ±{:.3} (α = {})",
        result.critical_value, result.alpha
    );
    let _ = writeln!(
        out,
        "t({}) = {:.3}",
        format_df(result.df),
        result.statistic
    );
    let _ = writeln!(
        out,
        "p-value = {:.4} ({}-tailed)",
        result.p_value, result.tail
    );
    let _ = writeln!(
        out,
        "Test Result = {}",
        if significant {
            "significant"
        } else {
            "not significant"
        }
    );
    let _ = writeln!(
        out,
        "Reason: The t-statistic ({:.3}) {} the critical value (±{:.3}).",
        result.statistic,
        if significant {
            "exceeds"
        } else {
            "does not exceed"
        },
        result.critical_value
    );
    let _ = writeln!(
        out,
        "        The p-value ({:.4}) is {} than the alpha level (α = {}).",
        result.p_value,
        if significant { "less" } else { "greater" },
        result.alpha
    );
    let _ = writeln!(
        out,
        "Cohen’s d = {} ({})",
        result.cohens_d, result.effect_magnitude
    );

    match result.details {
        TestDetails::Paired {
            sd_before,
            sd_after,
            ..
        } => {
            let _ = writeln!(out, "SD(before) = {sd_before}");
            let _ = writeln!(out, "SD(after) = {sd_after}");
        }
        TestDetails::Independent {
            sd_group1,
            sd_group2,
            ..
        } => {
            let _ = writeln!(out, "SD(Group 1) = {sd_group1}");
            let _ = writeln!(out, "SD(Group 2) = {sd_group2}");
        }
        TestDetails::OneSample { .. } => {}
    }
    out.push_str(&rule());

    for warning in &result.warnings {
        let _ = write!(out, "\n⚠️ {}\n{}", warning.message(family), rule());
    }

    out.push_str("\n\n");
    out.push_str(&references_for(family, &reference_tags(result)));
    out
}

/// Report for a test that stopped with an error.
///
/// The error message comes first, followed by any normality evidence the
/// error carries and the reference block. A Wilcoxon recommendation adds
/// the Wilcoxon citation.
pub fn render_error(family: TestFamily, error: &TestError) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{error}");

    if let Some(evidence) = error.normality() {
        out.push('\n');
        out.push_str(&render_normality(evidence));
        out.push_str(&rule());
    }

    let tags: &[ReferenceTag] = match error {
        TestError::NormalityFailed {
            alternative: Nonparametric::WilcoxonSignedRank,
            ..
        } => &[ReferenceTag::Wilcoxon],
        _ => &[],
    };

    out.push_str("\n\n");
    out.push_str(&references_for(family, tags));
    out
}

/// Renders either outcome of a runner.
pub fn render_outcome(family: TestFamily, outcome: &Result<TTestResult>) -> String {
    match outcome {
        Ok(result) => render(result),
        Err(error) => render_error(family, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ttest::{run_independent, run_one_sample, run_paired, Tail, TestConfig};

    const BEFORE: [f64; 5] = [580.0, 590.0, 600.0, 570.0, 510.0];
    const AFTER: [f64; 5] = [650.0, 690.0, 670.0, 600.0, 670.0];

    #[test]
    fn paired_report_layout() {
        let r = run_paired(&BEFORE, &AFTER, TestConfig::default()).expect("should compute");
        let text = render(&r);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Paired t-test (two-tailed) result:");
        assert_eq!(lines[1], "=".repeat(58));
        assert_eq!(lines[3], "Normality Test on Differences (after - before):");
        assert!(lines[5].starts_with("Shapiro-Wilk:        passed (p = 0.6"));
        assert!(text.contains("Critical value = ±2.776 (α = 0.05)\n"));
        assert!(text.contains("t(4) = 3.984\n"));
        assert!(text.contains("Test Result = significant\n"));
        assert!(text.contains("Cohen’s d = 1.782 (large)\n"));
        assert!(text.contains("SD(before) = 35.355\nSD(after) = 34.351\n"));
        assert!(!text.contains("Welch, B. L."));
        assert!(!text.contains("Note:"));
    }

    #[test]
    fn independent_report_mentions_branch() {
        let g1 = [100.0, 102.0, 98.0, 101.0, 100.0];
        let g2 = [110.0, 130.0, 115.0, 125.0, 120.0];
        let cfg = TestConfig::default().with_tail(Tail::One);
        let r = run_independent(&g1, &g2, cfg).expect("should compute");
        let text = render(&r);
        assert!(text.starts_with("Independent t-test (one-tailed) result:"));
        assert!(text.contains("Test Used: Welch's t-test\n"));
        assert!(text.contains("Variance Equality: Failed (Levene’s p = 0.03"));
        assert!(text.contains("Direction: group1 < group2\n"));
        assert!(text.contains("Normality Test on Group 1:"));
        assert!(text.contains("Normality Test on Group 2:"));
        // fractional Welch df
        assert!(text.contains("t(4.28) = -5.504\n"), "{text}");
        assert!(text.contains("Welch, B. L. (1947)"));
    }

    #[test]
    fn one_sample_report_lines() {
        let r = run_one_sample(&[3.6, 2.4, 1.2, 0.8], 0.0, TestConfig::default())
            .expect("should compute");
        let text = render(&r);
        assert!(text.contains("Population mean (μ) = 0\n"));
        assert!(text.contains("Sample mean = 2.000\n"));
        assert!(text.contains("Test Result = not significant\n"));
        assert!(text.contains("does not exceed"));
    }

    #[test]
    fn warnings_are_rendered() {
        let after: Vec<f64> = BEFORE.iter().map(|x| x + 10.0).collect();
        let r = run_paired(&BEFORE, &after, TestConfig::default()).expect("should compute");
        let text = render(&r);
        assert!(text.contains("⚠️ Note: All differences were identical."));

        let r = run_one_sample(&[4.0, 4.0, 4.0], 1.0, TestConfig::default())
            .expect("should compute");
        assert!(render(&r).contains("⚠️ Note: All values were identical."));
    }

    #[test]
    fn error_report_carries_normality() {
        let err = run_paired(&BEFORE, &BEFORE, TestConfig::default()).unwrap_err();
        let text = render_error(TestFamily::Paired, &err);
        assert!(text.starts_with("T-test failed:"));
        assert!(text.contains("Normality Test on Differences (after - before):"));
        assert!(text.contains("Kolmogorov-Smirnov:  failed (p = NaN)"));
        assert!(text.contains("References (APA 7th Edition):"));
    }

    #[test]
    fn normality_failure_adds_wilcoxon() {
        let before = [0.0; 20];
        let mut after = [1.0; 20];
        after[19] = 100.0;
        let outcome = run_paired(&before, &after, TestConfig::default());
        let text = render_outcome(TestFamily::Paired, &outcome);
        assert!(text.starts_with(
            "Normality assumption not met.\nConsider using Wilcoxon Signed-Rank test.\n"
        ));
        assert!(text.contains("Wilcoxon, F. (1945)"));
    }

    #[test]
    fn shape_error_has_no_normality_block() {
        let err = run_paired(&[1.0, 2.0], &[1.0], TestConfig::default()).unwrap_err();
        let text = render_error(TestFamily::Paired, &err);
        assert!(!text.contains("Normality Test"));
        assert!(text.starts_with("sample shape mismatch:"));
    }

    #[test]
    fn df_formatting() {
        assert_eq!(format_df(4.0), "4");
        assert_eq!(format_df(4.2811), "4.28");
        assert_eq!(format_df(f64::NAN), "NaN");
    }
}
