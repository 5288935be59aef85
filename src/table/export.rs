//! Export planning: merged spans and text alignment per visible cell.

use serde::{Deserialize, Serialize};

use super::{Align, Border, Table};

/// A visible cell as it should appear in an exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCell {
    pub row: usize,
    pub col: usize,
    /// Number of grid columns covered, including hidden cells merged in.
    pub span: usize,
    pub text: String,
    pub alignment: Align,
    pub border_top: Border,
    pub border_bottom: Border,
}

/// `true` for plain decimals such as `"3"`, `"3.6"` or `".49"`.
///
/// At most one `.` is allowed and everything else must be an ASCII digit.
/// Signs, exponents and trailing markers like `***` do not count.
pub fn is_numeric_text(text: &str) -> bool {
    let digits = text.replacen('.', "", 1);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Visible cells of `table`, row by row.
///
/// Every maximal run of hidden cells directly after a visible cell widens
/// that cell's span. Numeric text is centred and everything else is left
/// aligned, regardless of the on-screen alignment.
///
/// # Examples
///
/// ```
/// use u_ttest::table::{default_table, export_plan, Align};
///
/// let plan = export_plan(&default_table());
/// let footnote = plan.last().unwrap();
/// assert_eq!(footnote.span, 7);
/// assert_eq!(footnote.alignment, Align::Left);
/// ```
pub fn export_plan(table: &Table) -> Vec<ExportCell> {
    let mut plan = Vec::new();
    for (i, row) in table.rows().iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            if !cell.visible {
                continue;
            }
            let hidden_after = row[j + 1..].iter().take_while(|c| !c.visible).count();
            let alignment = if is_numeric_text(&cell.value) {
                Align::Center
            } else {
                Align::Left
            };
            plan.push(ExportCell {
                row: i,
                col: j,
                span: 1 + hidden_after,
                text: cell.value.clone(),
                alignment,
                border_top: cell.border_top,
                border_bottom: cell.border_bottom,
            });
        }
    }
    plan
}
