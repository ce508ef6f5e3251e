//! Debounced global search and the recent-searches list.
//!
//! Debouncing is modelled with generation tickets instead of timers so the core stays
//! host-agnostic: every keystroke invalidates the previous ticket, and only the latest
//! un-cancelled ticket may update the effective search text.

use std::collections::VecDeque;

/// Maximum number of remembered search terms.
pub const RECENT_SEARCH_LIMIT: usize = 5;

/// Default keystroke debounce.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 300;

/// Handle for a scheduled search update; the host fires it after `delay_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchTicket {
    /// Monotonic generation; stale tickets are ignored.
    pub generation: u64,
    /// Delay the host should wait before firing.
    pub delay_ms: u32,
}

/// What a keystroke did to the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchInput {
    /// The update is pending until the ticket fires.
    Scheduled(SearchTicket),
    /// The effective search changed immediately to the contained text.
    Applied(String),
}

/// Most-recent-first, de-duplicated list of effective search terms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecentSearches {
    terms: VecDeque<String>,
}

impl RecentSearches {
    /// Empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted terms, dropping blanks and duplicates and enforcing the limit.
    #[must_use]
    pub fn from_vec(terms: Vec<String>) -> Self {
        let mut recent = Self::new();
        for term in terms.into_iter().rev() {
            recent.push(&term);
        }
        recent
    }

    /// Record a term as the most recent; blank terms are ignored.
    pub fn push(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        self.terms.retain(|existing| existing != term);
        self.terms.push_front(term.to_string());
        self.terms.truncate(RECENT_SEARCH_LIMIT);
        true
    }

    /// Terms, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Number of remembered terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no term is remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Snapshot for persistence.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.terms.iter().cloned().collect()
    }
}

/// Debounce machine for the global search box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchDebouncer {
    delay_ms: u32,
    generation: u64,
    pending: Option<u64>,
    raw_input: String,
    effective: String,
    recent: RecentSearches,
}

impl SearchDebouncer {
    /// Create a debouncer; a zero delay applies input synchronously.
    #[must_use]
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
            raw_input: String::new(),
            effective: String::new(),
            recent: RecentSearches::new(),
        }
    }

    /// Seed the recent-searches list, typically from persisted state.
    #[must_use]
    pub fn with_recent(mut self, recent: RecentSearches) -> Self {
        self.recent = recent;
        self
    }

    /// Configured delay.
    #[must_use]
    pub const fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Whether keystrokes are applied without waiting for a ticket.
    #[must_use]
    pub const fn is_synchronous(&self) -> bool {
        self.delay_ms == 0
    }

    /// Text currently in the search box.
    #[must_use]
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Text the pipeline filters on.
    #[must_use]
    pub fn effective(&self) -> &str {
        &self.effective
    }

    /// Remembered terms.
    #[must_use]
    pub const fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    /// Whether a ticket is outstanding.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Register a keystroke. Cancels any outstanding ticket.
    pub fn input(&mut self, text: impl Into<String>) -> SearchInput {
        self.raw_input = text.into();
        self.generation = self.generation.wrapping_add(1);
        if self.is_synchronous() {
            self.pending = None;
            let text = self.raw_input.clone();
            self.apply(text.clone());
            return SearchInput::Applied(text);
        }
        self.pending = Some(self.generation);
        SearchInput::Scheduled(SearchTicket {
            generation: self.generation,
            delay_ms: self.delay_ms,
        })
    }

    /// Fire a ticket; returns the new effective text only for the latest live ticket.
    pub fn fire(&mut self, ticket: SearchTicket) -> Option<String> {
        if self.pending != Some(ticket.generation) {
            return None;
        }
        self.pending = None;
        let text = self.raw_input.clone();
        self.apply(text.clone());
        Some(text)
    }

    /// Invalidate any outstanding ticket without touching the effective text.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.pending.take().is_some()
    }

    /// Empty both the input and the effective text immediately.
    pub fn clear(&mut self) {
        self.cancel();
        self.raw_input.clear();
        self.effective.clear();
    }

    fn apply(&mut self, text: String) {
        self.recent.push(&text);
        self.effective = text;
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE_MS)
    }
}
