//! Row and column fixtures.

use anyhow::{Context, Result};
use gridline_core::{CellValue, Column, ColumnOption, ColumnType, Record, RowId};

/// The user-directory columns used throughout the suites.
#[must_use]
pub fn user_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("role", "Role").options(vec![
            ColumnOption::new("admin", "Admin"),
            ColumnOption::new("user", "User"),
        ]),
        Column::new("age", "Age").kind(ColumnType::Number),
        Column::new("joined", "Joined").kind(ColumnType::Date),
        Column::new("active", "Active")
            .kind(ColumnType::Boolean)
            .editable(false),
    ]
}

/// Three users: John (30), Bob (20), Joanna (25) with ids 1, 2, 3.
#[must_use]
pub fn user_rows() -> Vec<Record> {
    vec![
        user(1, "John", "admin", 30, "2023-01-15", true),
        user(2, "Bob", "user", 20, "2023-06-01", false),
        user(3, "Joanna", "user", 25, "2024-02-29", true),
    ]
}

fn user(id: u64, name: &str, role: &str, age: i64, joined: &str, active: bool) -> Record {
    Record::new(id)
        .with("name", name)
        .with("email", format!("{}@example.com", name.to_lowercase()))
        .with("role", role)
        .with("age", age)
        .with("joined", joined)
        .with("active", active)
}

/// `count` rows with ids `1..=count`, a `name` of `"Row {id}"`, and `age` equal to the id.
#[must_use]
pub fn numbered_rows(count: u32) -> Vec<Record> {
    (1..=count)
        .map(|id| {
            Record::new(u64::from(id))
                .with("name", format!("Row {id}"))
                .with("age", CellValue::Number(f64::from(id)))
        })
        .collect()
}

/// Parse a JSON array of records (`[{"id": "1", "name": "John"}, ...]`).
///
/// # Errors
/// Returns an error when the payload is not a valid record array.
pub fn records_from_json(raw: &str) -> Result<Vec<Record>> {
    serde_json::from_str(raw).context("failed to parse record fixture")
}

/// Row ids from integers.
#[must_use]
pub fn ids(values: &[u64]) -> Vec<RowId> {
    values.iter().copied().map(RowId::from).collect()
}
