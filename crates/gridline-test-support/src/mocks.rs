//! Recording callbacks and fake storage backends.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gridline_core::persistence::{preset_key, state_key};
use gridline_core::{
    CellValue, GridRow, KeyValueStore, MemoryStore, RowAction, RowId, StorageError,
};

/// A recorded `on_cell_value_change` invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct CellChange {
    /// Row passed to the callback.
    pub row_id: RowId,
    /// Column passed to the callback.
    pub column_id: String,
    /// Value passed to the callback.
    pub value: CellValue,
}

#[derive(Debug, Default)]
struct Recorded {
    cell_changes: Vec<CellChange>,
    row_actions: Vec<(RowId, RowAction)>,
    reorders: Vec<Vec<RowId>>,
}

/// Sink that records every controller callback; clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct CallbackLog {
    inner: Rc<RefCell<Recorded>>,
}

impl CallbackLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback suitable for `TableBuilder::on_cell_value_change`.
    pub fn cell_change_callback(&self) -> impl FnMut(&RowId, &str, &CellValue) + 'static {
        let inner = Rc::clone(&self.inner);
        move |row_id, column_id, value| {
            inner.borrow_mut().cell_changes.push(CellChange {
                row_id: row_id.clone(),
                column_id: column_id.to_string(),
                value: value.clone(),
            });
        }
    }

    /// Callback suitable for `TableBuilder::on_row_action`.
    pub fn row_action_callback<R: GridRow>(&self) -> impl FnMut(&R, &RowAction) + 'static {
        let inner = Rc::clone(&self.inner);
        move |row, action| {
            inner
                .borrow_mut()
                .row_actions
                .push((row.row_id(), action.clone()));
        }
    }

    /// Callback suitable for `TableBuilder::on_reorder`; records the new id order.
    pub fn reorder_callback<R: GridRow>(&self) -> impl FnMut(&[R]) + 'static {
        let inner = Rc::clone(&self.inner);
        move |rows| {
            inner
                .borrow_mut()
                .reorders
                .push(rows.iter().map(R::row_id).collect());
        }
    }

    /// Recorded cell changes in call order.
    #[must_use]
    pub fn cell_changes(&self) -> Vec<CellChange> {
        self.inner.borrow().cell_changes.clone()
    }

    /// Recorded row actions in call order.
    #[must_use]
    pub fn row_actions(&self) -> Vec<(RowId, RowAction)> {
        self.inner.borrow().row_actions.clone()
    }

    /// Recorded row orders in call order.
    #[must_use]
    pub fn reorders(&self) -> Vec<Vec<RowId>> {
        self.inner.borrow().reorders.clone()
    }
}

/// Backend whose every operation fails; counts attempts.
#[derive(Clone, Debug, Default)]
pub struct FailingStore {
    attempts: Rc<Cell<usize>>,
}

impl FailingStore {
    /// New failing backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations attempted so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }

    fn fail(&self, operation: &'static str, key: &str) -> StorageError {
        self.attempts.set(self.attempts.get() + 1);
        StorageError::Backend {
            operation,
            key: key.to_string(),
            detail: "storage unavailable".to_string(),
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(self.fail("get", key))
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(self.fail("set", key))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(self.fail("remove", key))
    }
}

/// Memory backend holding unparsable JSON for both the view state and presets of `state_id`.
///
/// # Errors
/// Propagates backend errors (never raised by [`MemoryStore`]).
pub fn corrupt_store(state_id: &str) -> Result<MemoryStore, StorageError> {
    let store = MemoryStore::new();
    store.set(&state_key(state_id), "{\"columnOrder\": [")?;
    store.set(&preset_key(state_id), "not json")?;
    Ok(store)
}
