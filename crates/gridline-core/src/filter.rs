//! Typed column filters.
//!
//! # Design
//! - One dispatch (`matches`) keyed by `(ColumnType, FilterOp)`; no ad hoc string checks elsewhere.
//! - Missing, null, or unparsable values never match; nothing here can fail loudly.
//! - Text comparisons are case-insensitive.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::column::ColumnType;
use crate::value::{CellValue, GridRow};

/// Comparison applied by a column filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOp {
    /// Case-insensitive substring match (valid for every column type).
    Contains,
    /// Exact match (case-insensitive for text, same day for dates).
    Equals,
    /// Case-insensitive prefix match.
    StartsWith,
    /// Case-insensitive suffix match.
    EndsWith,
    /// Strictly greater than a number.
    GreaterThan,
    /// Strictly less than a number.
    LessThan,
    /// Inclusive `"low,high"` range for numbers or dates.
    Between,
    /// Strictly earlier than a date.
    Before,
    /// Strictly later than a date.
    After,
}

const TEXT_OPS: [FilterOp; 4] = [
    FilterOp::Contains,
    FilterOp::Equals,
    FilterOp::StartsWith,
    FilterOp::EndsWith,
];
const NUMBER_OPS: [FilterOp; 4] = [
    FilterOp::Equals,
    FilterOp::GreaterThan,
    FilterOp::LessThan,
    FilterOp::Between,
];
const DATE_OPS: [FilterOp; 4] = [
    FilterOp::Equals,
    FilterOp::Before,
    FilterOp::After,
    FilterOp::Between,
];
const BOOLEAN_OPS: [FilterOp; 1] = [FilterOp::Equals];

impl FilterOp {
    /// Operator preselected for a freshly filtered column.
    #[must_use]
    pub const fn default_for(kind: ColumnType) -> Self {
        match kind {
            ColumnType::Text => Self::Contains,
            ColumnType::Number | ColumnType::Date | ColumnType::Boolean => Self::Equals,
        }
    }

    /// Operators offered in the filter picker for a column type.
    #[must_use]
    pub const fn supported_for(kind: ColumnType) -> &'static [Self] {
        match kind {
            ColumnType::Text => &TEXT_OPS,
            ColumnType::Number => &NUMBER_OPS,
            ColumnType::Date => &DATE_OPS,
            ColumnType::Boolean => &BOOLEAN_OPS,
        }
    }

    /// Whether the operator can be selected for a column type.
    #[must_use]
    pub fn is_supported_for(self, kind: ColumnType) -> bool {
        self == Self::Contains || Self::supported_for(kind).contains(&self)
    }

    /// Wire name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::Between => "between",
            Self::Before => "before",
            Self::After => "after",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "contains" => Some(Self::Contains),
            "equals" => Some(Self::Equals),
            "startsWith" => Some(Self::StartsWith),
            "endsWith" => Some(Self::EndsWith),
            "greaterThan" => Some(Self::GreaterThan),
            "lessThan" => Some(Self::LessThan),
            "between" => Some(Self::Between),
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            _ => None,
        }
    }

    /// Label shown in the operator picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Contains => "Contains",
            Self::Equals => "Equals",
            Self::StartsWith => "Starts with",
            Self::EndsWith => "Ends with",
            Self::GreaterThan => "Greater than",
            Self::LessThan => "Less than",
            Self::Between => "Between",
            Self::Before => "Before",
            Self::After => "After",
        }
    }
}

/// Most distinct values a column may have and still get a filter dropdown.
pub const FILTER_CHOICE_LIMIT: usize = 10;

/// Active filter for one column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    /// Comparison to apply.
    pub op: FilterOp,
    /// Raw filter text as entered (ranges are `"low,high"`).
    pub value: String,
}

impl ColumnFilter {
    /// Build a filter.
    pub fn new(op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            op,
            value: value.into(),
        }
    }

    /// Plain substring filter.
    pub fn contains(value: impl Into<String>) -> Self {
        Self::new(FilterOp::Contains, value)
    }

    /// Empty filter text disables the filter.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Decide whether a cell passes a filter for a column of the given type.
///
/// `None` (missing field) and [`CellValue::Null`] never match.
#[must_use]
pub fn matches(kind: ColumnType, filter: &ColumnFilter, cell: Option<&CellValue>) -> bool {
    let Some(cell) = cell.filter(|value| !value.is_null()) else {
        return false;
    };
    match (kind, filter.op) {
        (_, FilterOp::Contains) => contains_folded(&cell.to_display_string(), &filter.value),
        (ColumnType::Text, op) => match_text(op, &cell.to_display_string(), &filter.value),
        (ColumnType::Number, op) => match_number(op, cell, &filter.value),
        (ColumnType::Date, op) => match_date(op, cell, &filter.value),
        (ColumnType::Boolean, FilterOp::Equals) => cell.is_truthy() == (filter.value == "true"),
        (ColumnType::Boolean, _) => false,
    }
}

/// Case-insensitive substring test shared with the global search stage.
#[must_use]
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn match_text(op: FilterOp, value: &str, filter: &str) -> bool {
    let value = value.to_lowercase();
    let filter = filter.to_lowercase();
    match op {
        FilterOp::Equals => value == filter,
        FilterOp::StartsWith => value.starts_with(&filter),
        FilterOp::EndsWith => value.ends_with(&filter),
        FilterOp::Contains => value.contains(&filter),
        _ => false,
    }
}

#[allow(clippy::float_cmp)]
fn match_number(op: FilterOp, cell: &CellValue, filter: &str) -> bool {
    let Some(value) = cell.as_number() else {
        return false;
    };
    match op {
        FilterOp::Equals => parse_number(filter).is_some_and(|target| value == target),
        FilterOp::GreaterThan => parse_number(filter).is_some_and(|target| value > target),
        FilterOp::LessThan => parse_number(filter).is_some_and(|target| value < target),
        FilterOp::Between => split_range(filter)
            .and_then(|(low, high)| Some((parse_number(low)?, parse_number(high)?)))
            .is_some_and(|(low, high)| low <= value && value <= high),
        _ => false,
    }
}

fn match_date(op: FilterOp, cell: &CellValue, filter: &str) -> bool {
    let Some(value) = cell_date(cell) else {
        return false;
    };
    match op {
        FilterOp::Equals => parse_date(filter).is_some_and(|target| value.date() == target.date()),
        FilterOp::Before => parse_date(filter).is_some_and(|target| value < target),
        FilterOp::After => parse_date(filter).is_some_and(|target| value > target),
        FilterOp::Between => split_range(filter)
            .and_then(|(start, end)| Some((parse_date(start)?, parse_date(end)?)))
            .is_some_and(|(start, end)| start <= value && value <= end),
        _ => false,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| !value.is_nan())
}

fn split_range(raw: &str) -> Option<(&str, &str)> {
    raw.split_once(',')
}

#[allow(clippy::cast_possible_truncation)]
fn cell_date(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::Text(raw) => parse_date(raw),
        CellValue::Number(millis) if millis.is_finite() => {
            DateTime::from_timestamp_millis(*millis as i64).map(|value| value.naive_utc())
        }
        _ => None,
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]`, or RFC 3339 text into a naive UTC timestamp.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Distinct non-null values of a column in first-seen order (filter dropdown source).
#[must_use]
pub fn distinct_values<R: GridRow>(rows: &[R], column_id: &str) -> Vec<CellValue> {
    let mut values: Vec<CellValue> = Vec::new();
    for value in rows.iter().filter_map(|row| row.field(column_id)) {
        if !value.is_null() && !values.contains(&value) {
            values.push(value);
        }
    }
    values
}
