//! Table options and feature flags.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
use crate::search::DEFAULT_SEARCH_DEBOUNCE_MS;

/// Optional behaviours; every flag defaults to enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct TableFeatures {
    /// Double-click editing of cells.
    pub inline_editing: bool,
    /// Expandable detail rows.
    pub row_expansion: bool,
    /// Selecting more than one row at a time.
    pub multi_select: bool,
    /// Drag-and-drop row reordering.
    pub draggable_rows: bool,
    /// Drag-and-drop column reordering.
    pub draggable_columns: bool,
    /// Persisting column layout, sort, and recent searches.
    pub save_state: bool,
    /// Debounced search-as-you-type; disabled applies input synchronously.
    pub live_search: bool,
    /// Page slicing of the derived rows.
    pub pagination: bool,
}

impl Default for TableFeatures {
    fn default() -> Self {
        Self {
            inline_editing: true,
            row_expansion: true,
            multi_select: true,
            draggable_rows: true,
            draggable_columns: true,
            save_state: true,
            live_search: true,
            pagination: true,
        }
    }
}

/// Options for one table instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    /// Persistence key; `None` disables persistence even when `save_state` is set.
    pub state_id: Option<String>,
    /// Keystroke debounce for the global search box.
    pub search_debounce_ms: u32,
    /// Initial rows per page.
    pub page_size: usize,
    /// Choices offered by the rows-per-page picker.
    pub page_size_options: Vec<usize>,
    /// Optional behaviours.
    pub features: TableFeatures,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            state_id: None,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            features: TableFeatures::default(),
        }
    }
}

impl TableOptions {
    /// Parse and validate options from JSON; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and [`ConfigError::InvalidField`]
    /// when validation fails.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        options.validate()?;
        Ok(options)
    }

    /// Builder-style persistence key.
    #[must_use]
    pub fn with_state_id(mut self, state_id: impl Into<String>) -> Self {
        self.state_id = Some(state_id.into());
        self
    }

    /// Builder-style feature override.
    #[must_use]
    pub const fn with_features(mut self, features: TableFeatures) -> Self {
        self.features = features;
        self
    }

    /// Builder-style page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Delay applied to search input; zero when live search is off.
    #[must_use]
    pub const fn effective_debounce_ms(&self) -> u32 {
        if self.features.live_search {
            self.search_debounce_ms
        } else {
            0
        }
    }

    /// Persistence key when state saving is enabled.
    #[must_use]
    pub fn persistence_id(&self) -> Option<&str> {
        self.state_id
            .as_deref()
            .filter(|id| self.features.save_state && !id.trim().is_empty())
    }

    /// Check option consistency.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidField`] for a zero page size, a zero entry in the page
    /// size options, or a page size missing from non-empty options.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidField {
                field: "pageSize",
                value: self.page_size.to_string(),
                reason: "must be greater than zero",
            });
        }
        if let Some(zero) = self.page_size_options.iter().find(|size| **size == 0) {
            return Err(ConfigError::InvalidField {
                field: "pageSizeOptions",
                value: zero.to_string(),
                reason: "must not contain zero",
            });
        }
        if !self.page_size_options.is_empty() && !self.page_size_options.contains(&self.page_size) {
            return Err(ConfigError::InvalidField {
                field: "pageSize",
                value: self.page_size.to_string(),
                reason: "must be one of pageSizeOptions",
            });
        }
        Ok(())
    }
}
