//! Inline cell editing state machine.
//!
//! `Viewing → Editing(row, column, draft) → Viewing`. At most one cell is edited at a time;
//! beginning a new edit abandons the previous one without committing it.

use crate::column::ColumnType;
use crate::error::CoercionError;
use crate::value::{CellValue, RowId};

/// The cell currently being edited.
#[derive(Clone, Debug, PartialEq)]
pub struct EditingCell {
    /// Row being edited.
    pub row_id: RowId,
    /// Column being edited.
    pub column_id: String,
    /// Text currently in the editor control.
    pub draft: String,
    /// Value displayed before editing began.
    pub original: CellValue,
}

/// A committed edit handed to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct CellEdit {
    /// Row that changed.
    pub row_id: RowId,
    /// Column that changed.
    pub column_id: String,
    /// Coerced new value.
    pub value: CellValue,
}

/// Keys the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKey {
    /// Commit.
    Enter,
    /// Discard.
    Escape,
    /// Anything else; keeps editing.
    Other,
}

impl EditKey {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// Result of an editor transition.
#[derive(Clone, Debug, PartialEq)]
pub enum EditOutcome {
    /// The draft differed from the original and was committed.
    Committed(CellEdit),
    /// The editor closed; the draft equalled the original.
    Unchanged,
    /// The editor closed without committing (Escape).
    Discarded,
    /// The editor closed because the draft could not be coerced.
    Rejected(CoercionError),
    /// Still editing.
    Editing,
    /// No edit was in progress.
    Idle,
}

/// Inline-edit state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EditState {
    /// No cell is being edited.
    #[default]
    Viewing,
    /// One cell is being edited.
    Editing(EditingCell),
}

impl EditState {
    /// The cell being edited, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&EditingCell> {
        match self {
            Self::Viewing => None,
            Self::Editing(cell) => Some(cell),
        }
    }

    /// Whether the given cell is the one being edited.
    #[must_use]
    pub fn is_editing(&self, row_id: &RowId, column_id: &str) -> bool {
        self.current()
            .is_some_and(|cell| &cell.row_id == row_id && cell.column_id == column_id)
    }

    /// Start editing a cell; returns the abandoned edit when another cell was open.
    pub fn begin(
        &mut self,
        row_id: RowId,
        column_id: impl Into<String>,
        original: CellValue,
    ) -> Option<EditingCell> {
        let next = Self::Editing(EditingCell {
            row_id,
            column_id: column_id.into(),
            draft: original.to_display_string(),
            original,
        });
        match std::mem::replace(self, next) {
            Self::Viewing => None,
            Self::Editing(previous) => Some(previous),
        }
    }

    /// Replace the draft text; ignored when not editing.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match self {
            Self::Viewing => false,
            Self::Editing(cell) => {
                cell.draft = text.into();
                true
            }
        }
    }

    /// Close the editor, producing a commit when the coerced draft differs from the original.
    pub fn commit(&mut self, kind: ColumnType) -> EditOutcome {
        let Self::Editing(cell) = std::mem::take(self) else {
            return EditOutcome::Idle;
        };
        match coerce(kind, &cell.draft) {
            Ok(value) if value == cell.original => EditOutcome::Unchanged,
            Ok(value) => EditOutcome::Committed(CellEdit {
                row_id: cell.row_id,
                column_id: cell.column_id,
                value,
            }),
            Err(err) => EditOutcome::Rejected(err),
        }
    }

    /// Close the editor without committing.
    pub fn discard(&mut self) -> EditOutcome {
        match std::mem::take(self) {
            Self::Viewing => EditOutcome::Idle,
            Self::Editing(_) => EditOutcome::Discarded,
        }
    }

    /// Enter commits, Escape discards, other keys keep editing.
    pub fn handle_key(&mut self, key: EditKey, kind: ColumnType) -> EditOutcome {
        if matches!(self, Self::Viewing) {
            return EditOutcome::Idle;
        }
        match key {
            EditKey::Enter => self.commit(kind),
            EditKey::Escape => self.discard(),
            EditKey::Other => EditOutcome::Editing,
        }
    }
}

/// Convert editor text into a value of the column's type.
///
/// # Errors
/// Returns [`CoercionError::NotANumber`] when a number column receives non-numeric text.
pub fn coerce(kind: ColumnType, raw: &str) -> Result<CellValue, CoercionError> {
    match kind {
        ColumnType::Number => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(CellValue::Null);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|value| !value.is_nan())
                .map(CellValue::Number)
                .ok_or_else(|| CoercionError::NotANumber {
                    value: raw.to_string(),
                })
        }
        ColumnType::Boolean => Ok(CellValue::Bool(raw == "true")),
        ColumnType::Date | ColumnType::Text => Ok(CellValue::Text(raw.to_string())),
    }
}
