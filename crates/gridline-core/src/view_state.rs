//! Component-owned view state.
//!
//! # Design
//! - Fields are crate-private; the controller is the only writer so the column-order
//!   permutation invariant cannot be broken from outside.
//! - Only [`ViewStateSubset`] ever leaves this struct for persistence.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::editing::EditState;
use crate::filter::ColumnFilter;
use crate::pagination::PageState;
use crate::persistence::ViewStateSubset;
use crate::selection::RowSet;

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Apply the direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Active sort column and direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    /// Column id to sort by; `None` keeps source order.
    pub key: Option<String>,
    /// Direction applied when `key` is set.
    pub direction: SortDirection,
}

impl SortConfig {
    /// Sort by `key` ascending.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Asc,
        }
    }

    /// Sort by `key` descending.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Desc,
        }
    }

    /// Header-click transition: the same column while ascending flips to descending,
    /// anything else sorts the clicked column ascending.
    #[must_use]
    pub fn toggled(&self, column_id: &str) -> Self {
        if self.key.as_deref() == Some(column_id) && self.direction == SortDirection::Asc {
            Self::desc(column_id)
        } else {
            Self::asc(column_id)
        }
    }

    /// Direction for `column_id` when it is the active sort column.
    #[must_use]
    pub fn direction_for(&self, column_id: &str) -> Option<SortDirection> {
        (self.key.as_deref() == Some(column_id)).then_some(self.direction)
    }
}

/// Mutable state for one table instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub(crate) column_order: Vec<String>,
    pub(crate) visible_columns: BTreeSet<String>,
    pub(crate) filters: BTreeMap<String, ColumnFilter>,
    pub(crate) global_search: String,
    pub(crate) sort: SortConfig,
    pub(crate) selected_rows: RowSet,
    pub(crate) expanded_rows: RowSet,
    pub(crate) editing: EditState,
    pub(crate) page: PageState,
}

impl ViewState {
    /// Mount defaults: input column order, all visible, nothing filtered, sorted, or selected.
    #[must_use]
    pub fn new(columns: &[Column], page_size: usize) -> Self {
        let column_order: Vec<String> = columns.iter().map(|column| column.id.clone()).collect();
        Self {
            visible_columns: column_order.iter().cloned().collect(),
            column_order,
            filters: BTreeMap::new(),
            global_search: String::new(),
            sort: SortConfig::default(),
            selected_rows: RowSet::new(),
            expanded_rows: RowSet::new(),
            editing: EditState::Viewing,
            page: PageState::new(page_size),
        }
    }

    /// Display order of every column id.
    #[must_use]
    pub fn column_order(&self) -> &[String] {
        &self.column_order
    }

    /// Whether a column is rendered.
    #[must_use]
    pub fn is_visible(&self, column_id: &str) -> bool {
        self.visible_columns.contains(column_id)
    }

    /// Visible column ids in display order.
    #[must_use]
    pub fn visible_column_ids(&self) -> Vec<&str> {
        self.column_order
            .iter()
            .filter(|id| self.visible_columns.contains(*id))
            .map(String::as_str)
            .collect()
    }

    /// Active filters keyed by column id.
    #[must_use]
    pub const fn filters(&self) -> &BTreeMap<String, ColumnFilter> {
        &self.filters
    }

    /// Effective (debounced) global search text.
    #[must_use]
    pub fn global_search(&self) -> &str {
        &self.global_search
    }

    /// Current sort configuration.
    #[must_use]
    pub const fn sort(&self) -> &SortConfig {
        &self.sort
    }

    /// Selected row ids.
    #[must_use]
    pub const fn selected_rows(&self) -> &RowSet {
        &self.selected_rows
    }

    /// Expanded row ids.
    #[must_use]
    pub const fn expanded_rows(&self) -> &RowSet {
        &self.expanded_rows
    }

    /// Inline-edit state.
    #[must_use]
    pub const fn editing(&self) -> &EditState {
        &self.editing
    }

    /// Pagination cursor.
    #[must_use]
    pub const fn page(&self) -> PageState {
        self.page
    }

    /// The persisted slice of this state.
    #[must_use]
    pub fn subset(&self, recent_searches: &[String]) -> ViewStateSubset {
        ViewStateSubset {
            visible_columns: self
                .column_order
                .iter()
                .filter(|id| self.visible_columns.contains(*id))
                .cloned()
                .collect(),
            column_order: self.column_order.clone(),
            sort_config: self.sort.clone(),
            recent_searches: recent_searches.to_vec(),
        }
    }

    /// Restore a persisted subset; the subset must already be reconciled with the columns.
    pub(crate) fn apply_subset(&mut self, subset: &ViewStateSubset) {
        self.column_order.clone_from(&subset.column_order);
        self.visible_columns = subset.visible_columns.iter().cloned().collect();
        self.sort = subset.sort_config.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("role", "Role"),
        ]
    }

    #[test]
    fn mount_defaults() {
        let state = ViewState::new(&columns(), 10);
        assert_eq!(state.column_order(), ["name", "email", "role"]);
        assert_eq!(state.visible_column_ids(), vec!["name", "email", "role"]);
        assert!(state.filters().is_empty());
        assert_eq!(state.sort(), &SortConfig::default());
        assert!(state.selected_rows().is_empty());
        assert_eq!(state.editing(), &EditState::Viewing);
        assert_eq!(state.page().page, 1);
    }

    #[test]
    fn sort_toggle_cycles_asc_desc_and_resets_on_new_column() {
        let none = SortConfig::default();
        let asc = none.toggled("age");
        assert_eq!(asc, SortConfig::asc("age"));
        assert_eq!(asc.toggled("age"), SortConfig::desc("age"));
        assert_eq!(SortConfig::desc("age").toggled("age"), SortConfig::asc("age"));
        assert_eq!(SortConfig::desc("age").toggled("name"), SortConfig::asc("name"));
        assert_eq!(asc.direction_for("age"), Some(SortDirection::Asc));
        assert_eq!(asc.direction_for("name"), None);
    }

    #[test]
    fn subset_keeps_visible_in_display_order() {
        let mut state = ViewState::new(&columns(), 10);
        state.column_order = vec!["role".into(), "name".into(), "email".into()];
        state.visible_columns.remove("email");
        state.sort = SortConfig::desc("name");
        let subset = state.subset(&["ada".to_string()]);
        assert_eq!(subset.visible_columns, vec!["role", "name"]);
        assert_eq!(subset.column_order, vec!["role", "name", "email"]);
        assert_eq!(subset.sort_config, SortConfig::desc("name"));
        assert_eq!(subset.recent_searches, vec!["ada"]);
    }
}
