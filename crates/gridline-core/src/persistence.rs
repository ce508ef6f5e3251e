//! View-state persistence over a string key-value store.
//!
//! # Design
//! - Storage is injected ([`ViewStateStore`]); nothing here reaches for ambient globals.
//! - Reads and writes fail soft: errors are logged with `tracing::warn!` and the caller
//!   falls back to defaults.
//! - Only [`ViewStateSubset`] and filter presets are persisted; rows, selection, and
//!   editing state never are.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::column::{Column, find_column};
use crate::error::StorageError;
use crate::filter::ColumnFilter;
use crate::view_state::SortConfig;

/// Prefix for persisted view-state keys.
pub const STATE_KEY_PREFIX: &str = "gridline.table.";

/// Prefix for persisted filter-preset keys.
pub const PRESET_KEY_PREFIX: &str = "gridline.table-filters.";

/// Storage key for a table's view state.
#[must_use]
pub fn state_key(state_id: &str) -> String {
    format!("{STATE_KEY_PREFIX}{state_id}")
}

/// Storage key for a table's filter presets.
#[must_use]
pub fn preset_key(state_id: &str) -> String {
    format!("{PRESET_KEY_PREFIX}{state_id}")
}

/// The persisted slice of view state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewStateSubset {
    /// Visible column ids in display order.
    pub visible_columns: Vec<String>,
    /// Display order of every column id.
    pub column_order: Vec<String>,
    /// Active sort.
    pub sort_config: SortConfig,
    /// Recent search terms, most recent first.
    pub recent_searches: Vec<String>,
}

impl ViewStateSubset {
    /// Align a loaded subset with the current columns: unknown ids are dropped, duplicate
    /// ids collapse to their first position, and columns the subset never saw are appended
    /// and shown. A sort on an unknown or unsortable column is cleared.
    #[must_use]
    pub fn reconcile(mut self, columns: &[Column]) -> Self {
        let known: BTreeSet<&str> = columns.iter().map(|column| column.id.as_str()).collect();
        let saved: BTreeSet<String> = self.column_order.iter().cloned().collect();

        let mut seen = BTreeSet::new();
        let mut order: Vec<String> = self
            .column_order
            .into_iter()
            .filter(|id| known.contains(id.as_str()) && seen.insert(id.clone()))
            .collect();
        let mut visible: Vec<String> = self
            .visible_columns
            .into_iter()
            .filter(|id| seen.contains(id))
            .collect();
        for column in columns {
            if !saved.contains(&column.id) {
                order.push(column.id.clone());
                visible.push(column.id.clone());
            }
        }
        let mut visible_seen = BTreeSet::new();
        visible.retain(|id| visible_seen.insert(id.clone()));

        let sortable = self
            .sort_config
            .key
            .as_deref()
            .and_then(|key| find_column(columns, key))
            .is_some_and(|column| column.sortable);
        if !sortable {
            self.sort_config = SortConfig::default();
        }

        Self {
            visible_columns: visible,
            column_order: order,
            sort_config: self.sort_config,
            recent_searches: self.recent_searches,
        }
    }
}

/// A named, reusable set of column filters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPreset {
    /// Display name; unique per table.
    pub name: String,
    /// Filters keyed by column id.
    pub filters: BTreeMap<String, ColumnFilter>,
}

/// String key-value backend.
pub trait KeyValueStore {
    /// Read a key.
    ///
    /// # Errors
    /// Returns [`StorageError::Backend`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a key.
    ///
    /// # Errors
    /// Returns [`StorageError::Backend`] when the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key.
    ///
    /// # Errors
    /// Returns [`StorageError::Backend`] when the backend rejects the delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for a key, for inspection.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Persistence adapter consumed by the controller. Implementations must not fail loudly.
pub trait ViewStateStore {
    /// Load the persisted subset for a table, or `None` to use defaults.
    fn load(&self, state_id: &str) -> Option<ViewStateSubset>;

    /// Persist the subset for a table.
    fn save(&self, state_id: &str, subset: &ViewStateSubset);

    /// Load saved filter presets.
    fn load_presets(&self, _state_id: &str) -> Vec<FilterPreset> {
        Vec::new()
    }

    /// Persist filter presets.
    fn save_presets(&self, _state_id: &str, _presets: &[FilterPreset]) {}
}

/// JSON codec in front of a [`KeyValueStore`].
#[derive(Clone, Debug, Default)]
pub struct JsonStore<S> {
    backend: S,
}

impl<S: KeyValueStore> JsonStore<S> {
    /// Wrap a backend.
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Borrow the backend.
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Decode a JSON value stored under `key`.
    ///
    /// # Errors
    /// Propagates backend failures and returns [`StorageError::Deserialize`] for corrupt JSON.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Deserialize {
                key: key.to_string(),
                source,
            })
    }

    /// Encode `value` as JSON under `key`.
    ///
    /// # Errors
    /// Returns [`StorageError::Serialize`] when encoding fails and propagates backend failures.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &raw)
    }
}

impl<S: KeyValueStore> ViewStateStore for JsonStore<S> {
    fn load(&self, state_id: &str) -> Option<ViewStateSubset> {
        self.read(&state_key(state_id)).unwrap_or_else(|err| {
            warn!(error = %err, detail = ?err, state_id, "failed to load table view state; using defaults");
            None
        })
    }

    fn save(&self, state_id: &str, subset: &ViewStateSubset) {
        if let Err(err) = self.write(&state_key(state_id), subset) {
            warn!(error = %err, detail = ?err, state_id, "failed to persist table view state");
        }
    }

    fn load_presets(&self, state_id: &str) -> Vec<FilterPreset> {
        self.read(&preset_key(state_id))
            .unwrap_or_else(|err| {
                warn!(error = %err, detail = ?err, state_id, "failed to load filter presets");
                None
            })
            .unwrap_or_default()
    }

    fn save_presets(&self, state_id: &str, presets: &[FilterPreset]) {
        let result = if presets.is_empty() {
            self.backend.remove(&preset_key(state_id))
        } else {
            self.write(&preset_key(state_id), presets)
        };
        if let Err(err) = result {
            warn!(error = %err, detail = ?err, state_id, "failed to persist filter presets");
        }
    }
}
