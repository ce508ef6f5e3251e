//! Cell values and the row abstraction consumed by the derivation pipeline.
//!
//! # Design
//! - Rows are opaque to the grid; only the id and per-column lookups are required.
//! - Values are a small tagged union so comparison and stringification live in one place.
//! - Mixed-type comparisons rank by variant so sorting never panics on heterogeneous data.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a row, used for selection, expansion and editing.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Wrap an identifier string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for RowId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A single cell value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing or explicitly empty value.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Free text (also used for raw date strings).
    Text(String),
}

impl CellValue {
    /// Whether the value is [`CellValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Render the value the way it appears in a cell and in substring matching.
    ///
    /// Integral numbers are printed without a fractional part.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_number(*value),
            Self::Text(value) => value.clone(),
        }
    }

    /// Interpret the value as a number where that is unambiguous.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Self::Number(value) => (!value.is_nan()).then_some(*value),
            Self::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|parsed| !parsed.is_nan())
            }
        }
    }

    /// Loose truthiness used by boolean filters.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Text(value) => !value.is_empty(),
        }
    }

    /// Three-way comparison used by the sort stage.
    ///
    /// Values of the same kind compare naturally and `NaN` sorts after every other number,
    /// so the ordering stays total. Mixed kinds order as `Null < Bool < Number < Text`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Number(left), Self::Number(right)) => compare_numbers(*left, *right),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

fn compare_numbers(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Row abstraction consumed by the grid.
///
/// Implement this for domain structs to render them without converting to [`Record`].
pub trait GridRow: Clone {
    /// Unique identifier for this row.
    fn row_id(&self) -> RowId;

    /// Value for the given column, or `None` when the row has no such field.
    fn field(&self, column_id: &str) -> Option<CellValue>;

    /// Overwrite the value for the given column (used by optimistic edit commits).
    fn set_field(&mut self, column_id: &str, value: CellValue);
}

/// Generic row keyed by column id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Row identifier.
    pub id: RowId,
    /// Field values keyed by column id.
    #[serde(flatten)]
    pub fields: BTreeMap<String, CellValue>,
}

impl Record {
    /// Create an empty record with the given id.
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with(mut self, column_id: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(column_id.into(), value.into());
        self
    }
}

impl GridRow for Record {
    fn row_id(&self) -> RowId {
        self.id.clone()
    }

    fn field(&self, column_id: &str) -> Option<CellValue> {
        if let Some(value) = self.fields.get(column_id) {
            return Some(value.clone());
        }
        (column_id == "id").then(|| CellValue::Text(self.id.to_string()))
    }

    fn set_field(&mut self, column_id: &str, value: CellValue) {
        self.fields.insert(column_id.to_string(), value);
    }
}
