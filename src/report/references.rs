//! APA 7th edition citation blocks.

use serde::{Deserialize, Serialize};

use crate::ttest::TestFamily;

/// Optional citations added on top of the family defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceTag {
    /// Welch (1947), for the unequal-variance branch.
    Welch,
    /// Wilcoxon (1945), when a signed-rank test is recommended.
    Wilcoxon,
}

const SCIPY: &str = "Virtanen, P., Gommers, R., Oliphant, T. E., Haberland, M., Reddy, T., \
Cournapeau, D., Burovski, E., Peterson, P., Weckesser, W., Bright, J., van der Walt, S. J., \
Brett, M., Wilson, J., Millman, K. J., Mayorov, N., Nelson, A. R. J., Jones, E., Kern, R., \
Larson, E., Carey, C. J., ... van Mulbregt, P. (2020). SciPy 1.0: Fundamental algorithms for \
scientific computing in Python. *Nature Methods, 17*(3), 261–272. \
https://doi.org/10.1038/s41592-019-0686-2";

const GOSSET: &str = "Gosset, W. S. (1908). The probable error of a mean. \
*Biometrika, 6*(1), 1–25. https://doi.org/10.1093/biomet/6.1.1";

const WELCH: &str = "Welch, B. L. (1947). The generalization of Student's problem when \
several different population variances are involved. *Biometrika, 34*(1–2), 28–35. \
https://doi.org/10.1093/biomet/34.1-2.28";

const WILCOXON: &str = "Wilcoxon, F. (1945). Individual comparisons by ranking methods. \
*Biometrics Bulletin, 1*(6), 80–83. https://doi.org/10.2307/3001968";

/// Width of the rule that closes every reference block.
pub(crate) const RULE_WIDTH: usize = 77;

/// Citations for `family` plus `tags`, in fixed order: SciPy, Gosset,
/// Welch, Wilcoxon. Every t-test family cites SciPy and Gosset.
pub fn citations(_family: TestFamily, tags: &[ReferenceTag]) -> Vec<&'static str> {
    let mut refs = vec![SCIPY, GOSSET];
    if tags.contains(&ReferenceTag::Welch) {
        refs.push(WELCH);
    }
    if tags.contains(&ReferenceTag::Wilcoxon) {
        refs.push(WILCOXON);
    }
    refs
}

/// Formatted reference block for `family` plus `tags`.
///
/// # Examples
///
/// ```
/// use u_ttest::report::{references_for, ReferenceTag};
/// use u_ttest::ttest::TestFamily;
///
/// let block = references_for(TestFamily::Independent, &[ReferenceTag::Welch]);
/// assert!(block.starts_with("References (APA 7th Edition):\n\n"));
/// assert!(block.contains("Welch, B. L. (1947)"));
/// assert!(!block.contains("Wilcoxon"));
/// ```
pub fn references_for(family: TestFamily, tags: &[ReferenceTag]) -> String {
    format!(
        "References (APA 7th Edition):\n\n{}\n{}\n",
        citations(family, tags).join("\n\n"),
        "-".repeat(RULE_WIDTH)
    )
}
