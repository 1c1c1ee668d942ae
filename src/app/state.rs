//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the listing
//! and detail load states, the filter input, selection, modes, and the two
//! loaders that own request bookkeeping. The event handler mutates it; the
//! renderer reads view models computed from it.
//!
//! # State Components
//!
//! - **Listing**: `LoadState` of the fetched collection, in page order
//! - **Filtered**: visible subset after search text and category selection
//! - **Categories**: category universe of the collection, first-seen order
//! - **Detail**: `LoadState` of the entity shown in the detail view
//! - **Modes**: input mode of the listing, and which view is on screen

use super::actions::Action;
use super::modes::{InputMode, LoadState, SearchFocus, ViewMode};
use crate::domain::{
    category_universe, filter, match_range, BaseStats, CategorySelection, EntityDetail,
    EntitySummary, FetchError, FilterState,
};
use crate::fetch::{DetailLoader, DetailStep, ListingLoader, LoaderStep, RequestContext};
use crate::pokeapi::Endpoint;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailCard, DetailViewModel, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo,
    StatBar, UIViewModel,
};
use crate::Config;

/// Width of the `#` column, including its trailing gap.
pub(crate) const NUMBER_COLUMN_WIDTH: usize = 7;
/// Width of the NAME column, including its trailing gap.
pub(crate) const NAME_COLUMN_WIDTH: usize = 26;
/// Statistics are drawn against this ceiling.
const MAX_BASE_STAT: u32 = 255;
/// Label plus value columns in front of a stat bar.
pub(crate) const STAT_PREFIX_WIDTH: usize = 24;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Fetched collection. Empty unless `Ready`.
    pub listing: LoadState<Vec<EntitySummary>>,

    /// Entities passing the current filter, in fetch order.
    ///
    /// Recomputed by `apply_filter()`; selection bounds are checked against it.
    pub filtered: Vec<EntitySummary>,

    /// Distinct category tags of the collection, in first-seen order.
    pub categories: Vec<String>,

    /// Search text and category selection of the listing.
    pub filter: FilterState,

    /// Zero-based index into `filtered`. Wraps during navigation.
    pub selected_index: usize,

    pub input_mode: InputMode,
    pub view_mode: ViewMode,

    /// Entity shown by the detail view.
    pub detail: LoadState<EntityDetail>,

    /// Id token of the detail view, kept for retries.
    pub detail_id: Option<String>,

    /// Detail to open as soon as web access is granted.
    pub open_id: Option<String>,

    /// Whether the host granted `WebAccess`.
    pub web_access: bool,

    pub theme: Theme,

    listing_loader: ListingLoader,
    detail_loader: DetailLoader,
}

impl AppState {
    /// Creates the state for `config`. Nothing is requested until web access
    /// is granted.
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        let endpoint = Endpoint::new(config.base_url.as_str());
        Self {
            listing: LoadState::Idle,
            filtered: vec![],
            categories: vec![],
            filter: FilterState::default(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Listing,
            detail: LoadState::Idle,
            detail_id: None,
            open_id: config.open_id.clone(),
            web_access: false,
            theme,
            listing_loader: ListingLoader::new(
                endpoint.clone(),
                config.page_limit,
                config.max_in_flight,
            ),
            detail_loader: DetailLoader::new(endpoint),
        }
    }

    /// Entities of the listing, or an empty slice until it is ready.
    #[must_use]
    pub fn entities(&self) -> &[EntitySummary] {
        self.listing.ready().map_or(&[][..], Vec::as_slice)
    }

    /// Moves the selection one row down, wrapping from the last row to the
    /// first. No-op while nothing passes the filter.
    pub fn move_selection_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered.len();
    }

    /// Moves the selection one row up, wrapping from the first row to the
    /// last. No-op while nothing passes the filter.
    pub fn move_selection_up(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Entity under the selection.
    ///
    /// # Returns
    ///
    /// `None` while the listing is not ready or nothing passes the filter.
    #[must_use]
    pub fn selected_entity(&self) -> Option<&EntitySummary> {
        self.filtered.get(self.selected_index)
    }

    /// Recomputes the visible subset and the category universe.
    ///
    /// Clamps `selected_index` to the new bounds.
    pub fn apply_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_filter",
            total = self.entities().len(),
            query_len = self.filter.search_text.len(),
            category = %self.filter.category.label()
        )
        .entered();

        let entities = self.listing.ready().map_or(&[][..], Vec::as_slice);
        self.filtered = filter(entities, &self.filter.search_text, &self.filter.category);
        self.categories = category_universe(entities);

        if self.filtered.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered.len() - 1);
        }

        tracing::debug!(filtered_count = self.filtered.len(), "filter applied");
    }

    /// Selects the next category tag and refilters. See
    /// [`CategorySelection::next`] for the cycle order.
    pub fn next_category(&mut self) {
        self.filter.category = self.filter.category.next(&self.categories);
        self.apply_filter();
    }

    /// Selects the previous category tag and refilters.
    pub fn previous_category(&mut self) {
        self.filter.category = self.filter.category.previous(&self.categories);
        self.apply_filter();
    }

    /// Drops the category filter.
    pub fn clear_category(&mut self) {
        self.filter.category = CategorySelection::Unset;
        self.apply_filter();
    }

    /// Starts a fresh listing activation, abandoning any load in progress.
    ///
    /// # Returns
    ///
    /// The page request to issue.
    pub fn start_listing(&mut self) -> Vec<Action> {
        self.listing = LoadState::Loading;
        self.apply_filter();
        self.listing_loader
            .start()
            .into_iter()
            .map(Action::Fetch)
            .collect()
    }

    /// Switches to the detail view of `id_token` and requests it.
    ///
    /// # Parameters
    ///
    /// * `id_token` - Numeric id or name slug, used verbatim in the URL
    ///
    /// # Returns
    ///
    /// The detail request to issue.
    pub fn open_detail(&mut self, id_token: &str) -> Vec<Action> {
        self.view_mode = ViewMode::Detail;
        self.detail = LoadState::Loading;
        self.detail_id = Some(id_token.to_string());
        vec![Action::Fetch(self.detail_loader.start(id_token))]
    }

    /// Re-requests the entity of the detail view.
    pub fn retry_detail(&mut self) -> Vec<Action> {
        match self.detail_id.clone() {
            Some(id) => self.open_detail(&id),
            None => vec![],
        }
    }

    /// Leaves the detail view. An outstanding detail request turns stale.
    pub fn close_detail(&mut self) {
        self.detail_loader.cancel();
        self.detail = LoadState::Idle;
        self.detail_id = None;
        self.view_mode = ViewMode::Listing;
    }

    /// Records that the host refused `WebAccess`.
    pub fn deny_web_access(&mut self) {
        self.web_access = false;
        self.listing = LoadState::Failed(FetchError::NetworkFailure {
            url: self.listing_loader.listing_url(),
            status: None,
            message: "web access permission denied".to_string(),
        });
        self.apply_filter();
    }

    /// Cancels loads in progress when the plugin is hidden.
    ///
    /// Interrupted views drop back to `Idle` and are restarted by [`resume`].
    ///
    /// [`resume`]: Self::resume
    pub fn suspend(&mut self) {
        if self.listing.is_loading() {
            self.listing_loader.cancel();
            self.listing = LoadState::Idle;
        }
        if self.detail.is_loading() {
            self.detail_loader.cancel();
            self.detail = LoadState::Idle;
        }
    }

    /// Restarts loads interrupted by [`suspend`](Self::suspend).
    pub fn resume(&mut self) -> Vec<Action> {
        if !self.web_access {
            return vec![];
        }

        let mut actions = vec![];
        if self.listing == LoadState::Idle {
            actions.extend(self.start_listing());
        }
        if self.view_mode == ViewMode::Detail && self.detail == LoadState::Idle {
            actions.extend(self.retry_detail());
        }
        actions
    }

    /// Feeds a listing completion to the loader.
    pub fn on_listing_response(
        &mut self,
        context: &RequestContext,
        result: Result<Vec<u8>, FetchError>,
    ) -> (bool, Vec<Action>) {
        match self.listing_loader.on_response(context, result) {
            LoaderStep::Stale => (false, vec![]),
            LoaderStep::Dispatch(requests) => {
                (true, requests.into_iter().map(Action::Fetch).collect())
            }
            LoaderStep::Completed(entities) => {
                tracing::debug!(entities = entities.len(), "listing ready");
                self.listing = LoadState::Ready(entities);
                self.apply_filter();
                (true, vec![])
            }
            LoaderStep::Failed(error) => {
                self.listing = LoadState::Failed(error);
                self.apply_filter();
                (true, vec![])
            }
        }
    }

    /// Feeds a detail completion to the loader.
    pub fn on_detail_response(
        &mut self,
        context: &RequestContext,
        result: Result<Vec<u8>, FetchError>,
    ) -> (bool, Vec<Action>) {
        match self.detail_loader.on_response(context, result) {
            DetailStep::Stale => (false, vec![]),
            DetailStep::Completed(detail) => {
                self.detail = LoadState::Ready(detail);
                (true, vec![])
            }
            DetailStep::Failed(error) => {
                self.detail = LoadState::Failed(error);
                (true, vec![])
            }
        }
    }

    /// Computes the listing view model for a pane of `rows` x `cols`.
    ///
    /// The visible window is centered on the selection and shifted to stay
    /// full near either end of the list.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let empty_state = self.compute_empty_state();
        if empty_state.is_some() {
            return UIViewModel {
                display_items: vec![],
                selected_index: 0,
                header: self.compute_header(),
                footer: self.compute_footer(),
                empty_state,
                search_bar: self.compute_search_bar(),
            };
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered.len());

        if visible_end - visible_start < available_rows && self.filtered.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let highlight = matches!(self.input_mode, InputMode::Search(_))
            && !self.filter.search_text.is_empty();

        let display_items = self.filtered[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, entity)| {
                self.compute_display_item(entity, visible_start + relative_idx, cols, highlight)
            })
            .collect();

        UIViewModel {
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            header: self.compute_header(),
            footer: self.compute_footer(),
            empty_state: None,
            search_bar: self.compute_search_bar(),
        }
    }

    fn compute_display_item(
        &self,
        entity: &EntitySummary,
        absolute_idx: usize,
        cols: usize,
        highlight: bool,
    ) -> DisplayItem {
        let name = truncate(&entity.name, NAME_COLUMN_WIDTH - 2);
        let name_len = name.chars().count();

        let highlight_ranges = if highlight {
            match_range(&entity.name, &self.filter.search_text)
                .filter(|&(start, _)| start < name_len)
                .map(|(start, end)| vec![(start, end.min(name_len))])
                .unwrap_or_default()
        } else {
            vec![]
        };

        let types_width = cols.saturating_sub(NUMBER_COLUMN_WIDTH + NAME_COLUMN_WIDTH);

        DisplayItem {
            number: entity.dex_number(),
            name,
            types: truncate(&entity.categories.join(" / "), types_width),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match &self.listing {
            LoadState::Idle => Some(EmptyState {
                message: "Waiting for web access".to_string(),
                subtitle: "The Pokédex loads once the plugin may reach the creature API"
                    .to_string(),
                hint: None,
                is_error: false,
            }),
            LoadState::Loading => {
                let (received, expected) = self.listing_loader.progress();
                let subtitle = if expected == 0 {
                    "Fetching the listing page".to_string()
                } else {
                    format!("{received}/{expected} entries fetched")
                };
                Some(EmptyState {
                    message: "Loading Pokédex".to_string(),
                    subtitle,
                    hint: None,
                    is_error: false,
                })
            }
            LoadState::Failed(error) => Some(EmptyState {
                message: format!("Could not load the Pokédex ({})", error.kind()),
                subtitle: error.to_string(),
                hint: Some("Press r to retry".to_string()),
                is_error: true,
            }),
            LoadState::Ready(entities) if entities.is_empty() => Some(EmptyState {
                message: "No entries".to_string(),
                subtitle: "The listing page returned no entries".to_string(),
                hint: Some("Press r to reload".to_string()),
                is_error: false,
            }),
            LoadState::Ready(_) if self.filtered.is_empty() => {
                let subtitle = if self.filter.search_text.is_empty() {
                    format!("Nothing of type {}", self.filter.category.label())
                } else {
                    format!(
                        "Nothing named \"{}\" in {}",
                        self.filter.search_text,
                        self.filter.category.label()
                    )
                };
                Some(EmptyState {
                    message: "No matches".to_string(),
                    subtitle,
                    hint: Some("Press c to clear the type filter".to_string()),
                    is_error: false,
                })
            }
            LoadState::Ready(_) => None,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(
                " Pokédex ({}/{}) · type: {} ",
                self.filtered.len(),
                self.entities().len(),
                self.filter.category.label()
            ),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.view_mode, self.input_mode) {
            (ViewMode::Detail, _) => "Esc/h: back  r: reload  q: quit",
            (ViewMode::Listing, InputMode::Search(SearchFocus::Typing)) => {
                "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            (ViewMode::Listing, InputMode::Search(SearchFocus::Navigating)) => {
                "ESC: exit search  /: edit query  j/k or Ctrl+n/p: navigate  Enter: details"
            }
            (ViewMode::Listing, InputMode::Normal) => {
                "j/k: navigate  Enter: details  /: search  t/T: type  c: all types  r: reload  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        matches!(self.input_mode, InputMode::Search(_)).then(|| SearchBarInfo {
            query: self.filter.search_text.clone(),
        })
    }

    /// Rows left for the table after header, borders, column headers and
    /// footer, and the search bar if shown.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(6),
            InputMode::Search(_) => total_rows.saturating_sub(9),
        }
    }

    /// Computes the detail view model for a pane `cols` wide.
    #[must_use]
    pub fn compute_detail_viewmodel(&self, cols: usize) -> DetailViewModel {
        let id = self.detail_id.as_deref().unwrap_or_default();
        let footer = self.compute_footer();

        match &self.detail {
            LoadState::Ready(detail) => DetailViewModel {
                header: HeaderInfo {
                    title: format!(
                        " {} {} ",
                        capitalize(&detail.summary.name),
                        detail.summary.dex_number()
                    ),
                },
                footer,
                empty_state: None,
                card: Some(compute_detail_card(detail, cols)),
            },
            LoadState::Failed(error) => DetailViewModel {
                header: HeaderInfo {
                    title: format!(" Pokédex · {id} "),
                },
                footer,
                empty_state: Some(EmptyState {
                    message: format!("Could not load {id} ({})", error.kind()),
                    subtitle: error.to_string(),
                    hint: Some("Press r to retry or Esc to go back".to_string()),
                    is_error: true,
                }),
                card: None,
            },
            LoadState::Idle | LoadState::Loading => DetailViewModel {
                header: HeaderInfo {
                    title: format!(" Pokédex · {id} "),
                },
                footer,
                empty_state: Some(EmptyState {
                    message: "Loading".to_string(),
                    subtitle: format!("Fetching {id}"),
                    hint: None,
                    is_error: false,
                }),
                card: None,
            },
        }
    }
}

fn compute_detail_card(detail: &EntityDetail, cols: usize) -> DetailCard {
    let summary = &detail.summary;
    let or_none = |s: String| if s.is_empty() { "none".to_string() } else { s };

    let fields = vec![
        ("Types".to_string(), summary.categories.join(" / ")),
        ("Height".to_string(), format!("{:.1} m", detail.height_m())),
        ("Weight".to_string(), format!("{:.1} kg", detail.weight_kg())),
        ("Abilities".to_string(), or_none(detail.abilities.join(", "))),
        (
            "Sprite".to_string(),
            summary.image_url.clone().unwrap_or_else(|| "none".to_string()),
        ),
    ];

    let bar_room = cols.saturating_sub(STAT_PREFIX_WIDTH + 4);
    let stats = BaseStats::LABELS
        .iter()
        .zip(detail.stats.as_array())
        .map(|(label, value)| StatBar {
            label: (*label).to_string(),
            value,
            width: bar_width(value, bar_room),
        })
        .collect();

    DetailCard {
        fields,
        stats,
        total: detail.stats.total(),
    }
}

fn bar_width(value: u32, room: usize) -> usize {
    let value = usize::try_from(value.min(MAX_BASE_STAT)).unwrap_or(0);
    let max = usize::try_from(MAX_BASE_STAT).unwrap_or(1);
    value * room / max
}

/// Truncates `text` to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{keep}...")
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u32, name: &str, categories: &[&str]) -> EntitySummary {
        EntitySummary {
            id,
            name: name.to_string(),
            categories: categories.iter().map(ToString::to_string).collect(),
            image_url: None,
        }
    }

    fn ready_state(entities: Vec<EntitySummary>) -> AppState {
        let mut state = AppState::new(&Config::default(), Theme::default());
        state.listing = LoadState::Ready(entities);
        state.apply_filter();
        state
    }

    #[test]
    fn header_counts_visible_and_total() {
        let mut state = ready_state(vec![
            entity(1, "bulbasaur", &["grass", "poison"]),
            entity(4, "charmander", &["fire"]),
        ]);
        state.filter.category = CategorySelection::Tag("fire".to_string());
        state.apply_filter();

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, " Pokédex (1/2) · type: fire ");
        assert_eq!(vm.display_items.len(), 1);
        assert_eq!(vm.display_items[0].number, "#004");
        assert_eq!(vm.display_items[0].types, "fire");
    }

    #[test]
    fn window_follows_selection() {
        let entities: Vec<_> = (1..=40).map(|i| entity(i, &format!("mon{i}"), &["normal"])).collect();
        let mut state = ready_state(entities);
        state.selected_index = 39;

        let vm = state.compute_viewmodel(16, 80);
        assert_eq!(vm.display_items.len(), 10);
        assert_eq!(vm.display_items[9].name, "mon40");
        assert_eq!(vm.selected_index, 9);
        assert!(vm.display_items[9].is_selected);
    }

    #[test]
    fn search_highlights_first_match() {
        let mut state = ready_state(vec![entity(4, "charmander", &["fire"])]);
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.filter.search_text = "MAN".to_string();
        state.apply_filter();

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(4, 7)]);
        assert_eq!(vm.search_bar.map(|s| s.query), Some("MAN".to_string()));
    }

    #[test]
    fn failed_listing_shows_reason_and_retry_hint() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        state.listing = LoadState::Failed(FetchError::NetworkFailure {
            url: "https://pokeapi.co/api/v2/pokemon/7/".to_string(),
            status: Some(500),
            message: "boom".to_string(),
        });
        state.apply_filter();

        let vm = state.compute_viewmodel(24, 80);
        let empty = vm.empty_state.unwrap();
        assert!(empty.is_error);
        assert!(empty.subtitle.contains("pokemon/7"));
        assert_eq!(empty.hint.as_deref(), Some("Press r to retry"));
        assert!(vm.display_items.is_empty());
    }

    #[test]
    fn no_matches_is_distinct_from_failure() {
        let mut state = ready_state(vec![entity(7, "squirtle", &["water"])]);
        state.filter.search_text = "zzz".to_string();
        state.apply_filter();

        let empty = state.compute_viewmodel(24, 80).empty_state.unwrap();
        assert_eq!(empty.message, "No matches");
        assert!(!empty.is_error);
    }

    #[test]
    fn long_names_are_truncated_with_clamped_highlight() {
        let long = "a".repeat(40);
        let mut state = ready_state(vec![entity(1, &long, &["normal"])]);
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.filter.search_text = "a".repeat(30);
        state.apply_filter();

        let item = &state.compute_viewmodel(24, 80).display_items[0];
        assert_eq!(item.name.chars().count(), NAME_COLUMN_WIDTH - 2);
        assert!(item.name.ends_with("..."));
        assert_eq!(item.highlight_ranges, vec![(0, NAME_COLUMN_WIDTH - 2)]);
    }

    #[test]
    fn detail_card_lists_fields_and_scaled_bars() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        state.view_mode = ViewMode::Detail;
        state.detail_id = Some("25".to_string());
        state.detail = LoadState::Ready(EntityDetail {
            summary: EntitySummary {
                id: 25,
                name: "pikachu".to_string(),
                categories: vec!["electric".to_string()],
                image_url: Some("https://img/25.png".to_string()),
            },
            height: 4,
            weight: 60,
            abilities: vec!["static".to_string(), "lightning-rod".to_string()],
            stats: BaseStats {
                hp: 35,
                attack: 55,
                defense: 40,
                special_attack: 50,
                special_defense: 50,
                speed: 255,
            },
        });

        let vm = state.compute_detail_viewmodel(80);
        assert_eq!(vm.header.title, " Pikachu #025 ");
        let card = vm.card.unwrap();
        assert_eq!(card.fields[1], ("Height".to_string(), "0.4 m".to_string()));
        assert_eq!(card.fields[2], ("Weight".to_string(), "6.0 kg".to_string()));
        assert_eq!(card.fields[3].1, "static, lightning-rod");
        assert_eq!(card.total, 485);
        assert_eq!(card.stats[5].label, "Speed");
        assert_eq!(card.stats[5].width, 80 - STAT_PREFIX_WIDTH - 4);
        assert!(card.stats[0].width < card.stats[1].width);
    }

    #[test]
    fn capitalize_and_truncate_are_char_aware() {
        assert_eq!(capitalize("mr-mime"), "Mr-mime");
        assert_eq!(capitalize(""), "");
        assert_eq!(truncate("flabébé", 10), "flabébé");
        assert_eq!(truncate("flabébé", 5), "fl...");
    }
}
