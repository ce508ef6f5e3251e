//! Row id sets backing selection and expansion.
//!
//! Membership is tracked by id so it survives filtering, sorting and paging; ids only
//! leave a set through an explicit toggle, an explicit clear, or row deletion.

use std::collections::BTreeSet;

use crate::value::RowId;

/// Result of a bulk select-all toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkToggle {
    /// The visible ids were added.
    Selected,
    /// The visible ids were removed.
    Deselected,
    /// Nothing was visible; the set is unchanged.
    Unchanged,
}

/// Header checkbox state relative to the visible rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckState {
    /// No visible row is in the set.
    Unchecked,
    /// Some, but not all, visible rows are in the set.
    Indeterminate,
    /// Every visible row is in the set.
    Checked,
}

/// Ordered set of row ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowSet {
    ids: BTreeSet<RowId>,
}

impl RowSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, id: &RowId) -> bool {
        self.ids.contains(id)
    }

    /// Number of ids in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.ids.iter()
    }

    /// Flip membership; returns `true` when the id is now a member.
    pub fn toggle(&mut self, id: &RowId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Replace the whole set with a single id.
    pub fn select_only(&mut self, id: &RowId) {
        self.ids.clear();
        self.ids.insert(id.clone());
    }

    /// Remove every id; returns the ids that were removed.
    pub fn clear(&mut self) -> Vec<RowId> {
        std::mem::take(&mut self.ids).into_iter().collect()
    }

    /// Whether every id in `visible` is a member (false for an empty slice).
    #[must_use]
    pub fn contains_all(&self, visible: &[RowId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }

    /// Select-all scoped to `visible`: remove exactly those ids when all are members,
    /// otherwise add exactly those ids. Ids outside `visible` are untouched.
    pub fn toggle_all(&mut self, visible: &[RowId]) -> BulkToggle {
        if visible.is_empty() {
            return BulkToggle::Unchanged;
        }
        if self.contains_all(visible) {
            for id in visible {
                self.ids.remove(id);
            }
            BulkToggle::Deselected
        } else {
            self.ids.extend(visible.iter().cloned());
            BulkToggle::Selected
        }
    }

    /// Checkbox state for a header control over `visible`.
    #[must_use]
    pub fn check_state(&self, visible: &[RowId]) -> CheckState {
        let selected = visible.iter().filter(|id| self.ids.contains(*id)).count();
        if selected == 0 {
            CheckState::Unchecked
        } else if selected == visible.len() {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }

    /// Drop ids for which `exists` returns false; returns how many were pruned.
    pub fn prune(&mut self, exists: impl Fn(&RowId) -> bool) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| exists(id));
        before - self.ids.len()
    }

    /// Snapshot the ids in sorted order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<RowId> {
        self.ids.iter().cloned().collect()
    }
}

impl FromIterator<RowId> for RowSet {
    fn from_iter<T: IntoIterator<Item = RowId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
