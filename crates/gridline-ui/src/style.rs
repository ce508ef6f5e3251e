//! Class resolution for table chrome.
//!
//! # Design
//! - Every visual decision is a small pure function keyed by an enum or flag set, so the
//!   mapping is testable without a renderer.
//! - Classes are DaisyUI component modifiers plus a few Tailwind utilities.

use gridline_core::{CheckState, FilterOp, SortDirection};
use serde::{Deserialize, Serialize};

/// Button look, mapped onto DaisyUI `btn-*` modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Plain `btn`.
    #[default]
    Default,
    /// Filled primary colour.
    Primary,
    /// Destructive actions.
    Destructive,
    /// Bordered, transparent fill.
    Outline,
    /// No border or fill until hovered.
    Ghost,
    /// Rendered as a link.
    Link,
}

impl ButtonVariant {
    /// DaisyUI modifier class, or `None` for the plain button.
    #[must_use]
    pub const fn as_class(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Primary => Some("btn-primary"),
            Self::Destructive => Some("btn-error"),
            Self::Outline => Some("btn-outline"),
            Self::Ghost => Some("btn-ghost"),
            Self::Link => Some("btn-link"),
        }
    }
}

/// Button sizing tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonSize {
    /// Extra small, used inside table chrome.
    Xs,
    /// Small.
    Sm,
    /// Square icon button.
    Icon,
}

impl ButtonSize {
    /// Suffix used by DaisyUI for the size.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Icon => "square",
        }
    }

    /// Adds a prefix (e.g. `btn`) to the size suffix for class composition.
    #[must_use]
    pub fn with_prefix(self, prefix: &str) -> String {
        format!("{prefix}-{}", self.suffix())
    }
}

/// Classes for a button with the given variant and size.
#[must_use]
pub fn button_classes(variant: ButtonVariant, size: ButtonSize) -> Vec<String> {
    let mut classes = vec!["btn".to_string(), size.with_prefix("btn")];
    if let Some(variant) = variant.as_class() {
        classes.push(variant.to_string());
    }
    classes
}

/// Vertical density of table rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowHeight {
    /// Tight padding.
    Compact,
    /// Standard padding.
    #[default]
    Default,
    /// Generous padding.
    Comfortable,
}

impl RowHeight {
    /// DaisyUI table size class.
    #[must_use]
    pub const fn as_class(self) -> &'static str {
        match self {
            Self::Compact => "table-xs",
            Self::Default => "table-md",
            Self::Comfortable => "table-lg",
        }
    }
}

/// Per-row render flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RowFlags {
    /// The row is in the selection set.
    pub selected: bool,
    /// The row's detail panel is open.
    pub expanded: bool,
    /// The row is the drag source.
    pub dragging: bool,
    /// The row is the current drop target.
    pub drop_target: bool,
}

/// Visual table options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct TableStyle {
    /// Row density.
    pub row_height: RowHeight,
    /// Alternate row backgrounds.
    pub striped: bool,
    /// Horizontal rules between rows.
    pub show_row_borders: bool,
    /// Vertical rules between columns.
    pub show_column_borders: bool,
    /// Keep the header row visible while scrolling.
    pub sticky_header: bool,
    /// Keep the first data column visible while scrolling sideways.
    pub sticky_first_column: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            row_height: RowHeight::Default,
            striped: true,
            show_row_borders: true,
            show_column_borders: true,
            sticky_header: true,
            sticky_first_column: false,
        }
    }
}

const COLUMN_BORDER: [&str; 2] = ["border-x", "border-base-300"];
const STICKY_COLUMN: [&str; 4] = ["sticky", "left-0", "z-10", "bg-base-100"];

impl TableStyle {
    /// Classes for the `<table>` element.
    #[must_use]
    pub fn table_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["table", self.row_height.as_class()];
        if self.striped {
            classes.push("table-zebra");
        }
        if self.sticky_header {
            classes.push("table-pin-rows");
        }
        classes
    }

    /// Classes for a body `<tr>`.
    #[must_use]
    pub fn row_classes(&self, flags: RowFlags) -> Vec<&'static str> {
        let mut classes = vec!["hover"];
        if flags.selected {
            classes.push("bg-primary/10");
        }
        if flags.expanded {
            classes.push("font-medium");
        }
        if flags.dragging {
            classes.push("opacity-50");
        }
        if flags.drop_target {
            classes.extend(["border-t-2", "border-primary"]);
        } else if self.show_row_borders {
            classes.extend(["border-b", "border-base-300"]);
        }
        classes
    }

    /// Classes for a body `<td>`; `first` marks the first data column.
    #[must_use]
    pub fn cell_classes(&self, first: bool, editable: bool) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.show_column_borders {
            classes.extend(COLUMN_BORDER);
        }
        if first && self.sticky_first_column {
            classes.extend(STICKY_COLUMN);
        }
        if editable {
            classes.push("cursor-text");
        }
        classes
    }

    /// Classes for a header `<th>`.
    #[must_use]
    pub fn header_classes(&self, first: bool, sortable: bool, drop_target: bool) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.show_column_borders {
            classes.extend(COLUMN_BORDER);
        }
        if first && self.sticky_first_column {
            classes.extend(STICKY_COLUMN);
        }
        if sortable {
            classes.extend(["cursor-pointer", "select-none"]);
        }
        if drop_target {
            classes.push("bg-base-200");
        }
        classes
    }
}

/// Arrow shown next to a sorted header.
#[must_use]
pub const fn sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => "↑",
        Some(SortDirection::Desc) => "↓",
        None => "",
    }
}

/// `aria-sort` value for a header.
#[must_use]
pub const fn aria_sort(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => "ascending",
        Some(SortDirection::Desc) => "descending",
        None => "none",
    }
}

/// Page buttons highlight the current page.
#[must_use]
pub const fn page_button_variant(current: bool) -> ButtonVariant {
    if current {
        ButtonVariant::Primary
    } else {
        ButtonVariant::Outline
    }
}

/// Filter toggles highlight columns with an active filter.
#[must_use]
pub const fn filter_button_variant(active: bool) -> ButtonVariant {
    if active {
        ButtonVariant::Primary
    } else {
        ButtonVariant::Ghost
    }
}

/// Hint shown in an empty filter input.
#[must_use]
pub const fn filter_placeholder(op: FilterOp) -> &'static str {
    match op {
        FilterOp::Between => "min,max",
        FilterOp::Before | FilterOp::After => "YYYY-MM-DD",
        other => other.label(),
    }
}

/// `(checked, indeterminate)` for the header checkbox.
#[must_use]
pub const fn checkbox_flags(state: CheckState) -> (bool, bool) {
    match state {
        CheckState::Unchecked => (false, false),
        CheckState::Indeterminate => (false, true),
        CheckState::Checked => (true, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_classes_compose_size_and_variant() {
        assert_eq!(
            button_classes(ButtonVariant::Primary, ButtonSize::Sm),
            vec!["btn", "btn-sm", "btn-primary"]
        );
        assert_eq!(
            button_classes(ButtonVariant::Default, ButtonSize::Icon),
            vec!["btn", "btn-square"]
        );
        assert_eq!(ButtonVariant::Destructive.as_class(), Some("btn-error"));
        assert_eq!(
            button_classes(ButtonVariant::Link, ButtonSize::Xs),
            vec!["btn", "btn-xs", "btn-link"]
        );
    }

    #[test]
    fn default_table_is_striped_with_pinned_header() {
        let classes = TableStyle::default().table_classes();
        assert_eq!(classes, vec!["table", "table-md", "table-zebra", "table-pin-rows"]);

        let plain = TableStyle {
            row_height: RowHeight::Compact,
            striped: false,
            sticky_header: false,
            ..TableStyle::default()
        };
        assert_eq!(plain.table_classes(), vec!["table", "table-xs"]);
    }

    #[test]
    fn row_classes_reflect_flags() {
        let style = TableStyle::default();
        let selected = style.row_classes(RowFlags {
            selected: true,
            ..RowFlags::default()
        });
        assert!(selected.contains(&"bg-primary/10"));
        assert!(selected.contains(&"border-b"));

        let target = style.row_classes(RowFlags {
            drop_target: true,
            dragging: false,
            ..RowFlags::default()
        });
        assert!(target.contains(&"border-primary"));
        assert!(!target.contains(&"border-b"));

        let borderless = TableStyle {
            show_row_borders: false,
            ..TableStyle::default()
        };
        assert_eq!(borderless.row_classes(RowFlags::default()), vec!["hover"]);
    }

    #[test]
    fn sticky_first_column_only_pins_first_cell() {
        let style = TableStyle {
            sticky_first_column: true,
            show_column_borders: false,
            ..TableStyle::default()
        };
        assert!(style.cell_classes(true, false).contains(&"sticky"));
        assert!(style.cell_classes(false, false).is_empty());
        assert_eq!(style.cell_classes(false, true), vec!["cursor-text"]);
        assert!(style.header_classes(true, false, false).contains(&"left-0"));
    }

    #[test]
    fn header_marks_sortable_and_drop_target() {
        let style = TableStyle::default();
        let classes = style.header_classes(false, true, true);
        assert!(classes.contains(&"cursor-pointer"));
        assert!(classes.contains(&"bg-base-200"));
        assert!(!style.header_classes(false, false, false).contains(&"cursor-pointer"));
    }

    #[test]
    fn sort_indicator_matches_direction() {
        assert_eq!(sort_indicator(Some(SortDirection::Asc)), "↑");
        assert_eq!(sort_indicator(Some(SortDirection::Desc)), "↓");
        assert_eq!(sort_indicator(None), "");
        assert_eq!(aria_sort(None), "none");
    }

    #[test]
    fn buttons_highlight_current_and_active() {
        assert_eq!(page_button_variant(true), ButtonVariant::Primary);
        assert_eq!(page_button_variant(false), ButtonVariant::Outline);
        assert_eq!(filter_button_variant(false), ButtonVariant::Ghost);
        assert_eq!(checkbox_flags(CheckState::Indeterminate), (false, true));
    }

    #[test]
    fn filter_placeholders_describe_expected_input() {
        assert_eq!(filter_placeholder(FilterOp::Between), "min,max");
        assert_eq!(filter_placeholder(FilterOp::After), "YYYY-MM-DD");
        assert_eq!(filter_placeholder(FilterOp::Contains), "Contains");
    }

    #[test]
    fn style_loads_from_partial_json() -> Result<(), serde_json::Error> {
        let style: TableStyle =
            serde_json::from_str(r#"{"rowHeight":"compact","stickyFirstColumn":true}"#)?;
        assert_eq!(style.row_height, RowHeight::Compact);
        assert!(style.sticky_first_column);
        assert!(style.striped);
        Ok(())
    }
}
