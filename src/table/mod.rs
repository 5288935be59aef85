//! APA-style table model.
//!
//! A [`Table`] is a rectangular grid of [`Cell`] records. Edits are plain
//! methods that report out-of-range indices instead of panicking, and
//! [`export_plan`] turns the grid into merged, aligned cells ready for a
//! document writer.
//!
//! # Examples
//!
//! ```
//! use u_ttest::table::{default_table, BorderSide};
//!
//! let mut table = default_table();
//! assert!(table.update_cell(1, 1, "4.1"));
//! assert!(table.toggle_border_thickness(0, 1, BorderSide::Bottom).is_some());
//! assert!(!table.update_cell(99, 0, "x"));
//! ```

mod cell;
mod export;
mod state;

pub use cell::{Align, Border, BorderColor, BorderSide, Cell, DEFAULT_WIDTH};
pub use export::{export_plan, is_numeric_text, ExportCell};
pub use state::{EditorMode, EditorState};

use serde::{Deserialize, Serialize};

/// Width of the footnote cell, spanning the whole template.
const FOOTNOTE_WIDTH: u32 = 680;

/// Grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row; 0 for an empty table.
    pub fn n_cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Replaces the text of a cell. Returns `false` if out of range.
    pub fn update_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        match self.cell_mut(row, col) {
            Some(cell) => {
                cell.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Flips a border between black and white, keeping its thickness.
    /// Returns the new border, or `None` if out of range.
    pub fn toggle_border_color(
        &mut self,
        row: usize,
        col: usize,
        side: BorderSide,
    ) -> Option<Border> {
        let border = self.cell_mut(row, col)?.border_mut(side);
        border.color = border.color.toggled();
        Some(*border)
    }

    /// Flips a border between thickness 1 and 2, keeping its colour.
    /// Any thickness other than 1 becomes 1.
    pub fn toggle_border_thickness(
        &mut self,
        row: usize,
        col: usize,
        side: BorderSide,
    ) -> Option<Border> {
        let border = self.cell_mut(row, col)?.border_mut(side);
        border.thickness = if border.thickness == 1 { 2 } else { 1 };
        Some(*border)
    }

    /// Inserts a copy of row `row` directly below it.
    pub fn add_row(&mut self, row: usize) -> bool {
        let Some(copy) = self.rows.get(row).cloned() else {
            return false;
        };
        self.rows.insert(row + 1, copy);
        true
    }

    /// Inserts a copy of column `col` directly to its right, in every row.
    /// Nothing changes unless every row has a cell at `col`.
    pub fn add_column(&mut self, col: usize) -> bool {
        if self.rows.is_empty() || self.rows.iter().any(|r| col >= r.len()) {
            return false;
        }
        for row in &mut self.rows {
            let copy = row[col].clone();
            row.insert(col + 1, copy);
        }
        true
    }
}

/// The starter APA table: column headings, four data rows and a footnote
/// spanning the full width.
pub fn default_table() -> Table {
    let black = Border::BLACK;
    let heading = |v: &str| Cell::new(v).with_bottom(black);
    let label = |v: &str| Cell::new(v).with_align(Align::Left);

    let mut rows = vec![vec![
        label(""),
        heading("M"),
        heading("SD"),
        heading("M"),
        heading("SD"),
        heading(""),
        heading(""),
    ]];

    let data: [[&str; 7]; 4] = [
        ["Row 1", "3.6", ".49", "9.2", "1.02", "69.9***", ".12"],
        ["Row 2", "2.4", ".67", "10.1", ".08", "42.7***", ".23"],
        ["Row 3", "1.2", ".78", "3.6", ".46", "53.9***", ".34"],
        ["Row 4", "0.8", ".93", "4.7", ".71", "21.1***", ".45"],
    ];
    for values in data {
        let mut row: Vec<Cell> = values.iter().map(|v| Cell::new(*v)).collect();
        row[0].align = Align::Left;
        rows.push(row);
    }
    if let Some(last) = rows.last_mut().and_then(|r| r.last_mut()) {
        last.border_bottom = black;
    }

    let mut footnote = vec![Cell::new("***p < .01.")
        .with_align(Align::Left)
        .with_width(FOOTNOTE_WIDTH)];
    footnote.extend((0..6).map(|_| Cell::hidden()));
    rows.push(footnote);

    Table::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_shape() {
        let t = default_table();
        assert_eq!(t.n_rows(), 6);
        assert_eq!(t.n_cols(), 7);
        assert!(t.rows().iter().all(|r| r.len() == 7));
        assert_eq!(t.cell(0, 1).map(|c| c.value.as_str()), Some("M"));
        assert_eq!(t.cell(0, 1).map(|c| c.border_bottom), Some(Border::BLACK));
        assert_eq!(t.cell(0, 0).map(|c| c.border_bottom), Some(Border::WHITE));
        assert_eq!(t.cell(1, 0).map(|c| c.align), Some(Align::Left));
        assert_eq!(t.cell(1, 1).map(|c| c.align), Some(Align::Center));
        assert_eq!(t.cell(4, 6).map(|c| c.border_bottom), Some(Border::BLACK));

        let footnote = &t.rows()[5];
        assert_eq!(footnote[0].value, "***p < .01.");
        assert_eq!(footnote[0].width, 680);
        assert_eq!(footnote.iter().filter(|c| !c.visible).count(), 6);
    }

    #[test]
    fn update_cell_in_and_out_of_range() {
        let mut t = default_table();
        assert!(t.update_cell(2, 3, "11.0"));
        assert_eq!(t.cell(2, 3).map(|c| c.value.as_str()), Some("11.0"));
        assert!(!t.update_cell(2, 7, "x"));
        assert!(!t.update_cell(6, 0, "x"));
    }

    #[test]
    fn toggle_color_keeps_thickness() {
        let mut t = default_table();
        t.toggle_border_thickness(1, 1, BorderSide::Top);
        let b = t.toggle_border_color(1, 1, BorderSide::Top).expect("in range");
        assert_eq!(b.color, BorderColor::Black);
        assert_eq!(b.thickness, 2);
        let b = t.toggle_border_color(1, 1, BorderSide::Top).expect("in range");
        assert_eq!(b.color, BorderColor::White);
        assert!(t.toggle_border_color(10, 1, BorderSide::Top).is_none());
    }

    #[test]
    fn toggle_thickness_cycles() {
        let mut t = default_table();
        let side = BorderSide::Bottom;
        assert_eq!(t.toggle_border_thickness(0, 2, side).map(|b| b.thickness), Some(2));
        assert_eq!(t.toggle_border_thickness(0, 2, side).map(|b| b.thickness), Some(1));
        assert_eq!(t.cell(0, 2).map(|c| c.border_bottom.color), Some(BorderColor::Black));
    }

    #[test]
    fn add_row_clones_below() {
        let mut t = default_table();
        assert!(t.add_row(2));
        assert_eq!(t.n_rows(), 7);
        assert_eq!(t.rows()[3], t.rows()[2]);
        assert_eq!(t.cell(4, 0).map(|c| c.value.as_str()), Some("Row 3"));
        assert!(!t.add_row(7));
    }

    #[test]
    fn add_column_clones_right() {
        let mut t = default_table();
        assert!(t.add_column(6));
        assert_eq!(t.n_cols(), 8);
        assert!(t.rows().iter().all(|r| r.len() == 8 && r[7] == r[6]));
        assert!(!t.add_column(8));
    }

    #[test]
    fn add_column_on_ragged_table_is_rejected() {
        let mut t = Table::new(vec![vec![Cell::new("a"), Cell::new("b")], vec![Cell::new("c")]]);
        assert!(!t.add_column(1));
        assert_eq!(t.rows()[0].len(), 2);
        assert!(!Table::default().add_column(0));
    }

    #[test]
    fn serializes_as_nested_arrays() {
        let t = default_table();
        let json = serde_json::to_value(&t).expect("serialize");
        assert_eq!(json.as_array().map(Vec::len), Some(6));
        assert_eq!(json[5][1]["visible"], false);
        let back: Table = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, t);
    }
}
