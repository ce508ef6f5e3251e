//! Interaction handlers for one table instance.
//!
//! # Design
//! - The controller owns the rows, columns, view state, and every gesture machine; all
//!   transitions run synchronously on `&mut self`.
//! - Handlers never return errors. Rejected gestures return `false`, `Unchanged`, or
//!   `Idle`, and storage failures are logged by the store.
//! - The derived row list is memoized on the pipeline inputs plus a row revision counter.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, warn};

use crate::column::{Column, ColumnOption, ColumnType, find_column};
use crate::config::TableOptions;
use crate::editing::{EditKey, EditOutcome, EditingCell};
use crate::filter::{self, ColumnFilter, FILTER_CHOICE_LIMIT, FilterOp};
use crate::pagination::{MAX_VISIBLE_PAGES, PageItem, PageState, PageSummary, page_window, parse_page_input};
use crate::persistence::{FilterPreset, ViewStateStore, ViewStateSubset};
use crate::pipeline::{DerivedRows, PipelineCache, PipelineKey};
use crate::reorder::{DragReorder, ReorderOutcome};
use crate::search::{RecentSearches, SearchDebouncer, SearchInput, SearchTicket};
use crate::selection::{BulkToggle, CheckState};
use crate::value::{CellValue, GridRow, RowId};
use crate::view_state::ViewState;

/// Row-level action requested from the row menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowAction {
    /// Open the row for editing.
    Edit,
    /// Delete the row.
    Delete,
    /// Caller-defined action identifier.
    Custom(String),
}

/// Invoked with `(row_id, column_id, value)` when an inline edit commits.
pub type CellChangeCallback = Box<dyn FnMut(&RowId, &str, &CellValue)>;

/// Invoked when a row action is triggered.
pub type RowActionCallback<R> = Box<dyn FnMut(&R, &RowAction)>;

/// Invoked with the full row list after a row drag commits.
pub type ReorderCallback<R> = Box<dyn FnMut(&[R])>;

/// Builder for [`TableController`].
pub struct TableBuilder<R: GridRow> {
    rows: Vec<R>,
    columns: Vec<Column>,
    options: TableOptions,
    store: Option<Box<dyn ViewStateStore>>,
    on_cell_value_change: Option<CellChangeCallback>,
    on_row_action: Option<RowActionCallback<R>>,
    on_reorder: Option<ReorderCallback<R>>,
}

impl<R: GridRow> TableBuilder<R> {
    /// Replace the default options.
    #[must_use]
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Inject the persistence adapter.
    #[must_use]
    pub fn store(mut self, store: impl ViewStateStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Register the inline-edit commit callback; editing stays disabled without one.
    #[must_use]
    pub fn on_cell_value_change(mut self, callback: impl FnMut(&RowId, &str, &CellValue) + 'static) -> Self {
        self.on_cell_value_change = Some(Box::new(callback));
        self
    }

    /// Register the row action callback.
    #[must_use]
    pub fn on_row_action(mut self, callback: impl FnMut(&R, &RowAction) + 'static) -> Self {
        self.on_row_action = Some(Box::new(callback));
        self
    }

    /// Register the row reorder callback.
    #[must_use]
    pub fn on_reorder(mut self, callback: impl FnMut(&[R]) + 'static) -> Self {
        self.on_reorder = Some(Box::new(callback));
        self
    }

    /// Mount the table: apply defaults, then restore any persisted subset and presets.
    #[must_use]
    pub fn build(self) -> TableController<R> {
        let mut view = ViewState::new(&self.columns, self.options.page_size);
        let mut recent = RecentSearches::new();
        let mut presets = Vec::new();
        if let (Some(store), Some(state_id)) = (self.store.as_deref(), self.options.persistence_id()) {
            if let Some(subset) = store.load(state_id) {
                let subset = subset.reconcile(&self.columns);
                view.apply_subset(&subset);
                recent = RecentSearches::from_vec(subset.recent_searches);
                debug!(state_id, "restored persisted table view state");
            }
            presets = store.load_presets(state_id);
        }
        let search = SearchDebouncer::new(self.options.effective_debounce_ms()).with_recent(recent);
        TableController {
            rows: self.rows,
            columns: self.columns,
            options: self.options,
            view,
            search,
            column_drag: DragReorder::new(),
            row_drag: DragReorder::new(),
            presets,
            store: self.store,
            cache: PipelineCache::new(),
            revision: 0,
            on_cell_value_change: self.on_cell_value_change,
            on_row_action: self.on_row_action,
            on_reorder: self.on_reorder,
        }
    }
}

/// Headless data-grid state machine.
pub struct TableController<R: GridRow> {
    rows: Vec<R>,
    columns: Vec<Column>,
    options: TableOptions,
    view: ViewState,
    search: SearchDebouncer,
    column_drag: DragReorder<String>,
    row_drag: DragReorder<RowId>,
    presets: Vec<FilterPreset>,
    store: Option<Box<dyn ViewStateStore>>,
    cache: PipelineCache,
    revision: u64,
    on_cell_value_change: Option<CellChangeCallback>,
    on_row_action: Option<RowActionCallback<R>>,
    on_reorder: Option<ReorderCallback<R>>,
}

impl<R: GridRow> fmt::Debug for TableController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableController")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("options", &self.options)
            .field("view", &self.view)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<R: GridRow> TableController<R> {
    /// Start building a controller over `rows` and `columns`.
    #[must_use]
    pub fn builder(rows: Vec<R>, columns: Vec<Column>) -> TableBuilder<R> {
        TableBuilder {
            rows,
            columns,
            options: TableOptions::default(),
            store: None,
            on_cell_value_change: None,
            on_row_action: None,
            on_reorder: None,
        }
    }

    /// Source rows in their current (drag-reordered) order.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Column definitions in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Visible columns in display order.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.view
            .visible_column_ids()
            .into_iter()
            .filter_map(|id| find_column(&self.columns, id))
            .collect()
    }

    /// Active options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Current view state.
    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Search box state.
    #[must_use]
    pub const fn search(&self) -> &SearchDebouncer {
        &self.search
    }

    /// Column drag machine.
    #[must_use]
    pub const fn column_drag(&self) -> &DragReorder<String> {
        &self.column_drag
    }

    /// Row drag machine.
    #[must_use]
    pub const fn row_drag(&self) -> &DragReorder<RowId> {
        &self.row_drag
    }

    /// The cell being edited, if any.
    #[must_use]
    pub const fn editing_cell(&self) -> Option<&EditingCell> {
        self.view.editing.current()
    }

    /// Whether double-click editing is currently possible at all.
    #[must_use]
    pub const fn can_edit(&self) -> bool {
        self.options.features.inline_editing && self.on_cell_value_change.is_some()
    }

    /// How many times the pipeline has run.
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.cache.computations()
    }

    // Sorting, visibility, filters

    /// Header click: toggle sort on a sortable column.
    pub fn sort_by(&mut self, column_id: &str) -> bool {
        if !find_column(&self.columns, column_id).is_some_and(|column| column.sortable) {
            return false;
        }
        self.view.sort = self.view.sort.toggled(column_id);
        debug!(column = column_id, direction = ?self.view.sort.direction, "sort changed");
        self.persist();
        true
    }

    /// Show or hide a column.
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> bool {
        if find_column(&self.columns, column_id).is_none() {
            return false;
        }
        if !self.view.visible_columns.remove(column_id) {
            self.view.visible_columns.insert(column_id.to_string());
        }
        self.persist();
        true
    }

    /// Set a column's filter text. The operator already chosen for the column is kept;
    /// new filters use the column type's default operator.
    pub fn set_filter(&mut self, column_id: &str, value: impl Into<String>) -> bool {
        let Some(kind) = self.column_kind(column_id) else {
            return false;
        };
        let value = value.into();
        let op = self
            .view
            .filters
            .get(column_id)
            .map_or_else(|| FilterOp::default_for(kind), |filter| filter.op);
        if value.is_empty() && op == FilterOp::default_for(kind) {
            self.view.filters.remove(column_id);
        } else {
            self.view
                .filters
                .insert(column_id.to_string(), ColumnFilter::new(op, value));
        }
        self.reset_page();
        true
    }

    /// Choose the operator for a column's filter.
    pub fn set_filter_op(&mut self, column_id: &str, op: FilterOp) -> bool {
        let Some(kind) = self.column_kind(column_id) else {
            return false;
        };
        if !op.is_supported_for(kind) {
            return false;
        }
        self.view
            .filters
            .entry(column_id.to_string())
            .and_modify(|filter| filter.op = op)
            .or_insert_with(|| ColumnFilter::new(op, String::new()));
        self.reset_page();
        true
    }

    /// Remove one column's filter.
    pub fn clear_filter(&mut self, column_id: &str) -> bool {
        if self.view.filters.remove(column_id).is_none() {
            return false;
        }
        self.reset_page();
        true
    }

    /// Remove every column filter.
    pub fn clear_filters(&mut self) {
        self.view.filters.clear();
        self.reset_page();
    }

    /// Distinct non-null values of a column across all rows.
    #[must_use]
    pub fn distinct_values(&self, column_id: &str) -> Vec<CellValue> {
        filter::distinct_values(&self.rows, column_id)
    }

    /// Values offered in a column's filter dropdown: the declared options, otherwise the
    /// distinct values when there are few enough. `None` leaves the filter as free text.
    #[must_use]
    pub fn filter_choices(&self, column_id: &str) -> Option<Vec<ColumnOption>> {
        let column = find_column(&self.columns, column_id)?;
        if !column.options.is_empty() {
            return Some(column.options.clone());
        }
        let values = self.distinct_values(column_id);
        if values.is_empty() || values.len() > FILTER_CHOICE_LIMIT {
            return None;
        }
        Some(
            values
                .iter()
                .map(|value| {
                    let text = value.to_display_string();
                    ColumnOption::new(text.clone(), text)
                })
                .collect(),
        )
    }

    // Filter presets

    /// Saved filter presets.
    #[must_use]
    pub fn filter_presets(&self) -> &[FilterPreset] {
        &self.presets
    }

    /// Save the active filters under `name`, replacing a preset with the same name.
    pub fn save_filter_preset(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let preset = FilterPreset {
            name: name.to_string(),
            filters: self.view.filters.clone(),
        };
        match self.presets.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
        self.persist_presets();
        true
    }

    /// Replace the active filters with a saved preset.
    pub fn apply_filter_preset(&mut self, name: &str) -> bool {
        let Some(preset) = self.presets.iter().find(|preset| preset.name == name) else {
            return false;
        };
        self.view.filters = preset
            .filters
            .iter()
            .filter(|(column_id, _)| find_column(&self.columns, column_id).is_some())
            .map(|(column_id, filter)| (column_id.clone(), filter.clone()))
            .collect();
        self.reset_page();
        true
    }

    /// Delete a saved preset.
    pub fn remove_filter_preset(&mut self, name: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|preset| preset.name != name);
        if self.presets.len() == before {
            return false;
        }
        self.persist_presets();
        true
    }

    // Global search

    /// Keystroke in the search box. Returns a ticket to schedule, or the applied text
    /// when live search is off.
    pub fn search_input(&mut self, text: impl Into<String>) -> SearchInput {
        let input = self.search.input(text);
        if let SearchInput::Applied(text) = &input {
            self.apply_search(text.clone());
        }
        input
    }

    /// A scheduled ticket elapsed; only the latest ticket updates the search.
    pub fn search_timer_fired(&mut self, ticket: SearchTicket) -> bool {
        let Some(text) = self.search.fire(ticket) else {
            debug!(generation = ticket.generation, "ignored stale search ticket");
            return false;
        };
        self.apply_search(text);
        true
    }

    /// Empty the search box and effective search immediately.
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.view.global_search.clear();
        self.reset_page();
    }

    fn apply_search(&mut self, text: String) {
        debug!(search = %text, "global search applied");
        self.view.global_search = text;
        self.reset_page();
        self.persist();
    }

    // Selection and expansion

    /// Flip a row's selection. With multi-select off the selection holds at most this row.
    pub fn toggle_row_selected(&mut self, row_id: &RowId) -> bool {
        let selected = &mut self.view.selected_rows;
        if self.options.features.multi_select {
            return selected.toggle(row_id);
        }
        if selected.contains(row_id) {
            selected.clear();
            false
        } else {
            selected.select_only(row_id);
            true
        }
    }

    /// Select or deselect every row on the current page.
    pub fn toggle_select_all(&mut self) -> BulkToggle {
        if !self.options.features.multi_select {
            return BulkToggle::Unchanged;
        }
        let visible = self.visible_row_ids();
        self.view.selected_rows.toggle_all(&visible)
    }

    /// Header checkbox state for the current page.
    pub fn select_all_state(&mut self) -> CheckState {
        let visible = self.visible_row_ids();
        self.view.selected_rows.check_state(&visible)
    }

    /// Deselect everything; returns the ids that were selected.
    pub fn clear_selection(&mut self) -> Vec<RowId> {
        self.view.selected_rows.clear()
    }

    /// Flip a row's detail panel.
    pub fn toggle_row_expanded(&mut self, row_id: &RowId) -> bool {
        if !self.options.features.row_expansion {
            return false;
        }
        self.view.expanded_rows.toggle(row_id)
    }

    // Column drag

    /// Begin dragging a column header.
    pub fn column_drag_start(&mut self, column_id: &str) -> bool {
        if !self.options.features.draggable_columns || find_column(&self.columns, column_id).is_none() {
            return false;
        }
        self.column_drag.start(column_id.to_string());
        true
    }

    /// A column header is dragged over another header.
    pub fn column_drag_over(&mut self, column_id: &str) -> bool {
        self.column_drag.over(column_id.to_string())
    }

    /// Drop the dragged column at the last hovered position.
    pub fn column_drag_end(&mut self) -> ReorderOutcome {
        let outcome = self.column_drag.finish(&mut self.view.column_order);
        if let ReorderOutcome::Moved { from, to } = outcome {
            debug!(from, to, "column reordered");
            self.persist();
        }
        outcome
    }

    /// Abandon a column drag.
    pub fn column_drag_cancel(&mut self) {
        self.column_drag.cancel();
    }

    // Row drag

    /// Begin dragging a row.
    pub fn row_drag_start(&mut self, row_id: &RowId) -> bool {
        if !self.options.features.draggable_rows || self.row_index(row_id).is_none() {
            return false;
        }
        self.row_drag.start(row_id.clone());
        true
    }

    /// A row is dragged over another row.
    pub fn row_drag_over(&mut self, row_id: &RowId) -> bool {
        self.row_drag.over(row_id.clone())
    }

    /// Drop the dragged row; invokes `on_reorder` with the new row list when it moved.
    pub fn row_drag_end(&mut self) -> ReorderOutcome {
        let outcome = self.row_drag.finish_by(&mut self.rows, R::row_id);
        if let ReorderOutcome::Moved { from, to } = outcome {
            debug!(from, to, "row reordered");
            self.bump_revision();
            if let Some(callback) = self.on_reorder.as_mut() {
                callback(&self.rows);
            }
        }
        outcome
    }

    /// Abandon a row drag.
    pub fn row_drag_cancel(&mut self) {
        self.row_drag.cancel();
    }

    // Inline editing

    /// Double-click on a cell: start editing when the column allows it.
    pub fn cell_double_click(&mut self, row_id: &RowId, column_id: &str) -> bool {
        if !self.can_edit() || !find_column(&self.columns, column_id).is_some_and(Column::is_editable) {
            return false;
        }
        let Some(index) = self.row_index(row_id) else {
            return false;
        };
        let original = self.rows[index].field(column_id).unwrap_or_default();
        if let Some(abandoned) = self.view.editing.begin(row_id.clone(), column_id, original) {
            debug!(row = %abandoned.row_id, column = %abandoned.column_id, "abandoned uncommitted edit");
        }
        true
    }

    /// Editor text changed.
    pub fn edit_input(&mut self, text: impl Into<String>) -> bool {
        self.view.editing.set_draft(text)
    }

    /// Key pressed in the editor.
    pub fn edit_key(&mut self, key: EditKey) -> EditOutcome {
        let kind = self.editing_kind();
        let outcome = self.view.editing.handle_key(key, kind);
        self.settle_edit(outcome)
    }

    /// Editor lost focus; commits like Enter.
    pub fn edit_blur(&mut self) -> EditOutcome {
        let kind = self.editing_kind();
        let outcome = self.view.editing.commit(kind);
        self.settle_edit(outcome)
    }

    fn editing_kind(&self) -> ColumnType {
        self.editing_cell()
            .and_then(|cell| self.column_kind(&cell.column_id))
            .unwrap_or_default()
    }

    fn settle_edit(&mut self, outcome: EditOutcome) -> EditOutcome {
        match &outcome {
            EditOutcome::Committed(edit) => {
                debug!(row = %edit.row_id, column = %edit.column_id, "cell edit committed");
                if let Some(callback) = self.on_cell_value_change.as_mut() {
                    callback(&edit.row_id, &edit.column_id, &edit.value);
                }
                match self.row_index(&edit.row_id) {
                    Some(index) => {
                        self.rows[index].set_field(&edit.column_id, edit.value.clone());
                        self.bump_revision();
                    }
                    None => debug!(row = %edit.row_id, "edited row no longer present; skipped local update"),
                }
            }
            EditOutcome::Rejected(err) => {
                warn!(error = %err, detail = ?err, "discarded edit that could not be coerced");
            }
            _ => {}
        }
        outcome
    }

    // Row actions and data updates

    /// Forward a row action to `on_row_action`.
    pub fn row_action(&mut self, row_id: &RowId, action: &RowAction) -> bool {
        let Some(index) = self.row_index(row_id) else {
            return false;
        };
        let Some(callback) = self.on_row_action.as_mut() else {
            return false;
        };
        callback(&self.rows[index], action);
        true
    }

    /// Replace the source rows; selection and expansion drop ids that no longer exist.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.prune_row_sets();
        self.bump_revision();
    }

    /// Remove one row by id.
    pub fn remove_row(&mut self, row_id: &RowId) -> Option<R> {
        let index = self.row_index(row_id)?;
        let removed = self.rows.remove(index);
        self.prune_row_sets();
        self.bump_revision();
        Some(removed)
    }

    fn prune_row_sets(&mut self) {
        let live: BTreeSet<RowId> = self.rows.iter().map(R::row_id).collect();
        let selected = self.view.selected_rows.prune(|id| live.contains(id));
        let expanded = self.view.expanded_rows.prune(|id| live.contains(id));
        if selected + expanded > 0 {
            debug!(selected, expanded, "pruned ids of deleted rows");
        }
    }

    // Pagination

    /// Navigate to a page; out-of-range pages are ignored.
    pub fn set_page(&mut self, page: usize) -> bool {
        let total = self.derived().total();
        if !self.view.page.accepts(page, total) {
            return false;
        }
        self.view.page.page = page;
        true
    }

    /// Navigate from jump-to-page text input.
    pub fn jump_to_page(&mut self, input: &str) -> bool {
        let pages = self.page_count();
        parse_page_input(input, pages).is_some_and(|page| self.set_page(page))
    }

    /// Go forward one page.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.view.page.page + 1)
    }

    /// Go back one page.
    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.view.page.page.saturating_sub(1))
    }

    /// Change rows per page and return to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 {
            return false;
        }
        self.view.page = PageState::new(page_size);
        true
    }

    /// Number of pages for the filtered rows.
    pub fn page_count(&mut self) -> usize {
        let total = self.derived().total();
        self.view.page.page_count(total)
    }

    /// Page bar buttons.
    pub fn page_items(&mut self) -> Vec<PageItem> {
        let pages = self.page_count();
        page_window(self.view.page.page, pages, MAX_VISIBLE_PAGES)
    }

    /// "Showing X to Y of Z" numbers.
    pub fn page_summary(&mut self) -> PageSummary {
        let total = self.derived().total();
        if self.options.features.pagination {
            self.view.page.summary(total)
        } else {
            PageSummary {
                first: usize::from(total > 0),
                last: total,
                total,
            }
        }
    }

    fn reset_page(&mut self) {
        self.view.page.page = 1;
    }

    // Derived rows

    /// Inputs the pipeline currently depends on.
    #[must_use]
    pub fn pipeline_key(&self) -> PipelineKey {
        PipelineKey {
            revision: self.revision,
            filters: self.view.filters.clone(),
            search: self.view.global_search.clone(),
            sort: self.view.sort.clone(),
            visible_columns: self.view.visible_columns.clone(),
            page: self.options.features.pagination.then_some(self.view.page),
        }
    }

    /// Memoized pipeline output.
    pub fn derived(&mut self) -> &DerivedRows {
        let key = self.pipeline_key();
        self.cache.get_or_derive(&self.rows, &self.columns, key)
    }

    /// Rows rendered on the current page.
    pub fn visible_rows(&mut self) -> Vec<&R> {
        let key = self.pipeline_key();
        let derived = self.cache.get_or_derive(&self.rows, &self.columns, key);
        derived.visible().iter().map(|&index| &self.rows[index]).collect()
    }

    /// Ids of the rows rendered on the current page.
    pub fn visible_row_ids(&mut self) -> Vec<RowId> {
        self.visible_rows().into_iter().map(R::row_id).collect()
    }

    // Persistence and lifecycle

    /// The persisted slice of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ViewStateSubset {
        self.view.subset(&self.search.recent().to_vec())
    }

    /// Write the persisted subset now.
    pub fn flush(&self) {
        self.persist();
    }

    /// Tear down: cancel the pending search, abandon drags, and flush persisted state.
    pub fn unmount(&mut self) {
        if self.search.cancel() {
            debug!("cancelled pending search on unmount");
        }
        self.column_drag.cancel();
        self.row_drag.cancel();
        self.persist();
    }

    fn persist(&self) {
        if let (Some(store), Some(state_id)) = (self.store.as_deref(), self.options.persistence_id()) {
            store.save(state_id, &self.snapshot());
        }
    }

    fn persist_presets(&self) {
        if let (Some(store), Some(state_id)) = (self.store.as_deref(), self.options.persistence_id()) {
            store.save_presets(state_id, &self.presets);
        }
    }

    fn column_kind(&self, column_id: &str) -> Option<ColumnType> {
        find_column(&self.columns, column_id).map(|column| column.kind)
    }

    fn row_index(&self, row_id: &RowId) -> Option<usize> {
        self.rows.iter().position(|row| &row.row_id() == row_id)
    }

    const fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
