//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` on every render and consumed by
//! the component renderers. They hold display-ready strings and flags only.

/// Listing view model.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Rows of the visible window of the table.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Replaces the table while loading, after a failure, or when nothing
    /// matches.
    pub empty_state: Option<EmptyState>,

    /// Present while in search mode.
    pub search_bar: Option<SearchBarInfo>,
}

/// One row of the listing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Dex number, e.g. `#025`.
    pub number: String,

    /// Name, truncated to the name column.
    pub name: String,

    /// Category tags joined for display.
    pub types: String,

    pub is_selected: bool,

    /// Character ranges of `name` to highlight as search matches.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Title line, with the active type filter and result count folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Keybinding hints for the current view and mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Centered message shown in place of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,

    /// Extra line below the subtitle, e.g. how to retry.
    pub hint: Option<String>,

    /// Rendered with the error color when set.
    pub is_error: bool,
}

/// Search box contents; present only in search mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

/// Detail view model.
#[derive(Debug, Clone)]
pub struct DetailViewModel {
    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Shown while the detail is loading or after it failed.
    pub empty_state: Option<EmptyState>,

    /// Present once the detail is ready.
    pub card: Option<DetailCard>,
}

/// Ready-to-render body of the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    /// `(label, value)` lines shown above the statistics.
    pub fields: Vec<(String, String)>,
    pub stats: Vec<StatBar>,
    pub total: u32,
}

/// One base statistic with its bar length in cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatBar {
    pub label: String,
    pub value: u32,
    pub width: usize,
}
