#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Headless data-grid state for Gridline.
//!
//! Rows, columns, and a [`TableController`] that turns user gestures into view-state
//! transitions and derives the filtered, searched, sorted, and paginated row list.
//! Nothing here touches the DOM; `gridline-ui` renders it.

pub mod column;
pub mod config;
pub mod controller;
pub mod editing;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod persistence;
pub mod pipeline;
pub mod reorder;
pub mod search;
pub mod selection;
pub mod value;
pub mod view_state;

pub use column::{Column, ColumnOption, ColumnType};
pub use config::{TableFeatures, TableOptions};
pub use controller::{RowAction, TableBuilder, TableController};
pub use editing::{CellEdit, EditKey, EditOutcome, EditState, EditingCell};
pub use error::{CoercionError, ConfigError, StorageError};
pub use filter::{ColumnFilter, FilterOp};
pub use pagination::{PageItem, PageState, PageSummary};
pub use persistence::{
    FilterPreset, JsonStore, KeyValueStore, MemoryStore, ViewStateStore, ViewStateSubset,
};
pub use reorder::{DragReorder, DragState, ReorderOutcome};
pub use search::{SearchInput, SearchTicket};
pub use selection::{BulkToggle, CheckState, RowSet};
pub use value::{CellValue, GridRow, Record, RowId};
pub use view_state::{SortConfig, SortDirection, ViewState};
