//! Derivation pipeline: filter → search → sort → paginate.
//!
//! # Design
//! - Every stage is a pure function over row indices into the source slice; rows are never
//!   cloned or reordered here.
//! - [`PipelineCache`] memoizes the output on the pipeline's own inputs, so unrelated state
//!   changes (selection, expansion, editing) never trigger a recompute.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use crate::column::{Column, ColumnType, find_column};
use crate::filter::{self, ColumnFilter};
use crate::pagination::PageState;
use crate::value::{CellValue, GridRow};
use crate::view_state::SortConfig;

/// Inputs the derived view depends on, besides the row slice itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineKey {
    /// Bumped whenever the source rows change.
    pub revision: u64,
    /// Active column filters.
    pub filters: BTreeMap<String, ColumnFilter>,
    /// Effective global search text.
    pub search: String,
    /// Active sort.
    pub sort: SortConfig,
    /// Columns the global search looks at.
    pub visible_columns: BTreeSet<String>,
    /// Page to slice, or `None` when pagination is disabled.
    pub page: Option<PageState>,
}

/// Output of the pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivedRows {
    /// Source indices that passed filter and search, in sorted order.
    pub ordered: Vec<usize>,
    /// Window of `ordered` shown on the current page.
    pub page: Range<usize>,
}

impl DerivedRows {
    /// Source indices rendered on the current page.
    #[must_use]
    pub fn visible(&self) -> &[usize] {
        &self.ordered[self.page.clone()]
    }

    /// Rows matching filters and search, across all pages.
    #[must_use]
    pub fn total(&self) -> usize {
        self.ordered.len()
    }
}

/// Run the full pipeline.
#[must_use]
pub fn derive<R: GridRow>(rows: &[R], columns: &[Column], key: &PipelineKey) -> DerivedRows {
    let indices = (0..rows.len()).collect();
    let indices = filter_stage(rows, columns, &key.filters, indices);
    let indices = search_stage(rows, &key.visible_columns, &key.search, indices);
    let ordered = sort_stage(rows, &key.sort, indices);
    let page = key
        .page
        .map_or(0..ordered.len(), |page| page.range(ordered.len()));
    DerivedRows { ordered, page }
}

/// Keep rows matching every active column filter.
#[must_use]
pub fn filter_stage<R: GridRow>(
    rows: &[R],
    columns: &[Column],
    filters: &BTreeMap<String, ColumnFilter>,
    mut indices: Vec<usize>,
) -> Vec<usize> {
    let active: Vec<(&str, ColumnType, &ColumnFilter)> = filters
        .iter()
        .filter(|(_, filter)| filter.is_active())
        .map(|(column_id, filter)| {
            let kind = find_column(columns, column_id).map_or(ColumnType::Text, |column| column.kind);
            (column_id.as_str(), kind, filter)
        })
        .collect();
    if active.is_empty() {
        return indices;
    }
    indices.retain(|&index| {
        active.iter().all(|(column_id, kind, filter)| {
            filter::matches(*kind, filter, rows[index].field(column_id).as_ref())
        })
    });
    indices
}

/// Keep rows where any visible column contains `search` (case-insensitive).
#[must_use]
pub fn search_stage<R: GridRow>(
    rows: &[R],
    visible_columns: &BTreeSet<String>,
    search: &str,
    mut indices: Vec<usize>,
) -> Vec<usize> {
    if search.is_empty() {
        return indices;
    }
    let needle = search.to_lowercase();
    indices.retain(|&index| {
        visible_columns.iter().any(|column_id| {
            rows[index]
                .field(column_id)
                .is_some_and(|value| value.to_display_string().to_lowercase().contains(&needle))
        })
    });
    indices
}

/// Stable sort by the configured column; no key keeps source order.
#[must_use]
pub fn sort_stage<R: GridRow>(rows: &[R], sort: &SortConfig, indices: Vec<usize>) -> Vec<usize> {
    let Some(column_id) = sort.key.as_deref() else {
        return indices;
    };
    let mut keyed: Vec<(usize, CellValue)> = indices
        .into_iter()
        .map(|index| (index, rows[index].field(column_id).unwrap_or_default()))
        .collect();
    keyed.sort_by(|(_, left), (_, right)| sort.direction.apply(left.compare(right)));
    keyed.into_iter().map(|(index, _)| index).collect()
}

/// Single-entry memo for [`derive`].
#[derive(Clone, Debug, Default)]
pub struct PipelineCache {
    entry: Option<(PipelineKey, DerivedRows)>,
    computations: u64,
}

impl PipelineCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached output for `key`, recomputing only when the key changed.
    pub fn get_or_derive<R: GridRow>(
        &mut self,
        rows: &[R],
        columns: &[Column],
        key: PipelineKey,
    ) -> &DerivedRows {
        let entry = match self.entry.take() {
            Some(entry) if entry.0 == key => entry,
            _ => {
                self.computations += 1;
                let derived = derive(rows, columns, &key);
                (key, derived)
            }
        };
        &self.entry.insert(entry).1
    }

    /// Drop the memoized output.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// How many times the pipeline actually ran.
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.computations
    }
}
