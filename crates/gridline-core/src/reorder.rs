//! Drag-and-drop reordering state machine.
//!
//! One machine per axis (columns, rows): `Idle → Dragging { source, target } → Idle`.
//! Targets are tracked while dragging but only applied on `finish`; an abandoned drag
//! (`cancel`) leaves the order untouched.

use std::fmt::Debug;

/// Drag phase for one axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragState<K> {
    /// No drag in progress.
    Idle,
    /// A drag started from `source`.
    Dragging {
        /// Key captured on drag start.
        source: K,
        /// Latest key dragged over, if any.
        target: Option<K>,
    },
}

impl<K> Default for DragState<K> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Result of committing a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// The source moved from one index to another.
    Moved {
        /// Index before the move.
        from: usize,
        /// Index after the move.
        to: usize,
    },
    /// Nothing changed (no target, same target, or keys not found).
    Unchanged,
}

/// Drag machine for one reorderable axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragReorder<K> {
    state: DragState<K>,
}

impl<K> Default for DragReorder<K> {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
        }
    }
}

impl<K: Clone + PartialEq + Debug> DragReorder<K> {
    /// Create an idle machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub const fn state(&self) -> &DragState<K> {
        &self.state
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Key being dragged, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&K> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// Key currently dragged over, if any.
    #[must_use]
    pub fn target(&self) -> Option<&K> {
        match &self.state {
            DragState::Dragging { target, .. } => target.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Capture the drag source; restarts any drag already in progress.
    pub fn start(&mut self, source: K) {
        self.state = DragState::Dragging {
            source,
            target: None,
        };
    }

    /// Record the key under the pointer; ignored while idle.
    pub fn over(&mut self, key: K) -> bool {
        match &mut self.state {
            DragState::Dragging { target, .. } => {
                *target = Some(key);
                true
            }
            DragState::Idle => false,
        }
    }

    /// Abandon the drag without touching any order.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Commit the drag against a key order. Always returns to idle.
    pub fn finish(&mut self, order: &mut Vec<K>) -> ReorderOutcome {
        self.finish_by(order, Clone::clone)
    }

    /// Commit the drag against items identified by `key_of`. Always returns to idle.
    pub fn finish_by<T>(&mut self, items: &mut Vec<T>, key_of: impl Fn(&T) -> K) -> ReorderOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                source,
                target: Some(target),
            } if source != target => move_item(items, &source, &target, key_of),
            _ => ReorderOutcome::Unchanged,
        }
    }
}

/// Splice `source` out of `items` and reinsert it at the index `target` held before removal.
pub fn move_item<T, K: PartialEq>(
    items: &mut Vec<T>,
    source: &K,
    target: &K,
    key_of: impl Fn(&T) -> K,
) -> ReorderOutcome {
    let from = items.iter().position(|item| &key_of(item) == source);
    let to = items.iter().position(|item| &key_of(item) == target);
    match (from, to) {
        (Some(from), Some(to)) if from != to => {
            let item = items.remove(from);
            items.insert(to, item);
            ReorderOutcome::Moved { from, to }
        }
        _ => ReorderOutcome::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn dragging_email_onto_name_moves_it_first() {
        let mut columns = order(&["name", "email", "role"]);
        let mut drag = DragReorder::new();
        drag.start("email".to_string());
        assert!(drag.over("role".to_string()));
        assert!(drag.over("name".to_string()));
        assert_eq!(
            drag.finish(&mut columns),
            ReorderOutcome::Moved { from: 1, to: 0 }
        );
        assert_eq!(columns, order(&["email", "name", "role"]));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn dragging_forward_lands_on_target_index() {
        let mut columns = order(&["name", "email", "role"]);
        let mut drag = DragReorder::new();
        drag.start("name".to_string());
        drag.over("role".to_string());
        drag.finish(&mut columns);
        assert_eq!(columns, order(&["email", "role", "name"]));
    }

    #[test]
    fn no_target_or_same_target_is_a_no_op() {
        let mut columns = order(&["a", "b"]);
        let mut drag = DragReorder::new();
        drag.start("a".to_string());
        assert_eq!(drag.finish(&mut columns), ReorderOutcome::Unchanged);

        drag.start("a".to_string());
        drag.over("a".to_string());
        assert_eq!(drag.finish(&mut columns), ReorderOutcome::Unchanged);
        assert_eq!(columns, order(&["a", "b"]));
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn cancel_leaves_order_untouched() {
        let mut columns = order(&["a", "b", "c"]);
        let mut drag = DragReorder::new();
        drag.start("c".to_string());
        drag.over("a".to_string());
        drag.cancel();
        assert_eq!(drag.finish(&mut columns), ReorderOutcome::Unchanged);
        assert_eq!(columns, order(&["a", "b", "c"]));
    }

    #[test]
    fn over_while_idle_is_ignored() {
        let mut drag: DragReorder<String> = DragReorder::new();
        assert!(!drag.over("a".to_string()));
        assert_eq!(drag.target(), None);
    }

    #[test]
    fn repeated_moves_stay_a_permutation() {
        let original = order(&["a", "b", "c", "d", "e"]);
        let mut columns = original.clone();
        let mut drag = DragReorder::new();
        let moves = [("a", "e"), ("c", "a"), ("e", "b"), ("d", "d"), ("b", "c")];
        for (source, target) in moves {
            drag.start(source.to_string());
            drag.over(target.to_string());
            drag.finish(&mut columns);
        }
        let mut sorted = columns.clone();
        sorted.sort();
        assert_eq!(sorted, original);
        assert_eq!(columns.len(), original.len());
    }

    #[test]
    fn finish_by_reorders_items_by_key() {
        let mut rows = vec![(1, "one"), (2, "two"), (3, "three")];
        let mut drag = DragReorder::new();
        drag.start(3);
        drag.over(1);
        assert_eq!(
            drag.finish_by(&mut rows, |row| row.0),
            ReorderOutcome::Moved { from: 2, to: 0 }
        );
        assert_eq!(rows, vec![(3, "three"), (1, "one"), (2, "two")]);
    }
}
