//! Editor selection and mode.

use serde::{Deserialize, Serialize};

/// What a click on a cell does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Clicks select cells and toggle borders.
    #[default]
    View,
    /// Clicks edit cell text.
    Edit,
}

/// Selection and mode of a table editor.
///
/// Transitions consume the state and return the next one.
///
/// ```
/// use u_ttest::table::{EditorMode, EditorState};
///
/// let state = EditorState::default().select(2, 3).toggle_mode();
/// assert_eq!(state.selected, Some((2, 3)));
/// assert_eq!(state.mode, EditorMode::Edit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorState {
    /// Selected `(row, col)`, if any.
    pub selected: Option<(usize, usize)>,
    pub mode: EditorMode,
}

impl EditorState {
    #[must_use]
    pub fn select(self, row: usize, col: usize) -> Self {
        Self {
            selected: Some((row, col)),
            ..self
        }
    }

    #[must_use]
    pub fn clear_selection(self) -> Self {
        Self {
            selected: None,
            ..self
        }
    }

    /// Switches between view and edit mode; the selection is kept.
    #[must_use]
    pub fn toggle_mode(self) -> Self {
        let mode = match self.mode {
            EditorMode::View => EditorMode::Edit,
            EditorMode::Edit => EditorMode::View,
        };
        Self { mode, ..self }
    }
}
