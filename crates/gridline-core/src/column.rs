//! Column definitions.

use serde::{Deserialize, Serialize};

/// Declared data type of a column; drives filtering, sorting and edit coercion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text (default).
    #[default]
    Text,
    /// Numeric values.
    Number,
    /// Calendar dates (`YYYY-MM-DD` or RFC 3339 strings).
    Date,
    /// Boolean flags.
    Boolean,
}

/// A selectable value offered for a column (filter dropdowns, edit selects).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOption {
    /// Stored value.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

impl ColumnOption {
    /// Build an option from a value and label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Column configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column id; must match a row field key.
    pub id: String,
    /// Header text.
    pub header: String,
    /// Declared type.
    #[serde(rename = "type", default)]
    pub kind: ColumnType,
    /// Explicit editability; `None` means editable.
    #[serde(default)]
    pub editable: Option<bool>,
    /// Fixed value choices.
    #[serde(default)]
    pub options: Vec<ColumnOption>,
    /// Whether header clicks sort by this column.
    #[serde(default = "default_sortable")]
    pub sortable: bool,
}

const fn default_sortable() -> bool {
    true
}

impl Column {
    /// Create a sortable, editable text column.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            kind: ColumnType::Text,
            editable: None,
            options: Vec::new(),
            sortable: true,
        }
    }

    /// Set the declared type.
    #[must_use]
    pub const fn kind(mut self, kind: ColumnType) -> Self {
        self.kind = kind;
        self
    }

    /// Mark the column explicitly editable or read-only.
    #[must_use]
    pub const fn editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    /// Attach fixed value choices.
    #[must_use]
    pub fn options(mut self, options: Vec<ColumnOption>) -> Self {
        self.options = options;
        self
    }

    /// Disable header-click sorting.
    #[must_use]
    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Editability unspecified counts as editable.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.editable != Some(false)
    }

    /// Label for a stored value when the column declares options.
    #[must_use]
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }
}

/// Look up a column by id.
#[must_use]
pub fn find_column<'a>(columns: &'a [Column], id: &str) -> Option<&'a Column> {
    columns.iter().find(|column| column.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_editability_is_editable() {
        assert!(Column::new("name", "Name").is_editable());
        assert!(Column::new("name", "Name").editable(true).is_editable());
        assert!(!Column::new("name", "Name").editable(false).is_editable());
    }

    #[test]
    fn column_json_uses_type_key_and_defaults() -> Result<(), serde_json::Error> {
        let column: Column = serde_json::from_str(r#"{"id":"age","header":"Age","type":"number"}"#)?;
        assert_eq!(column.kind, ColumnType::Number);
        assert!(column.sortable);
        assert_eq!(column.editable, None);

        let plain: Column = serde_json::from_str(r#"{"id":"name","header":"Name"}"#)?;
        assert_eq!(plain.kind, ColumnType::Text);
        Ok(())
    }

    #[test]
    fn option_labels_resolve() {
        let column = Column::new("role", "Role").options(vec![
            ColumnOption::new("admin", "Administrator"),
            ColumnOption::new("user", "User"),
        ]);
        assert_eq!(column.label_for("admin"), Some("Administrator"));
        assert_eq!(column.label_for("guest"), None);
    }
}
