//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place application state changes. It never
//! performs I/O: requests come back as [`Action::Fetch`] for the plugin shim
//! to issue, and their completions come back in as [`Event::WebResponse`].
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenDetail`, `Back`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Mode Switching**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`
//! - **Filtering**: `NextCategory`, `PreviousCategory`, `ClearCategory`
//! - **Loading**: `Retry`, `WebResponse`
//! - **System**: `PermissionsResult`, `Visible`, `CloseFocus`

use super::modes::{InputMode, SearchFocus, ViewMode};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::fetch::{classify_response, RequestContext, RequestKind};
use std::collections::BTreeMap;

/// Events triggered by user input or by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down by one row (wraps to top).
    KeyDown,
    /// Moves the selection up by one row (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Opens the detail view of the selected entity.
    OpenDetail,
    /// Returns from the detail view to the listing.
    Back,
    /// Enters search mode with typing focus and an empty query.
    SearchMode,
    /// Moves focus from the results back to the query.
    FocusSearchBar,
    /// Moves focus from the query to the results.
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Clears the query and returns to normal mode.
    Escape,
    /// Selects the next category of the universe.
    NextCategory,
    /// Selects the previous category of the universe.
    PreviousCategory,
    /// Resets the category selection to unset.
    ClearCategory,
    /// Reloads the listing, or the entity shown in the detail view.
    Retry,

    /// Outcome of the `WebAccess` permission request.
    PermissionsResult { granted: bool },

    /// The plugin pane was shown or hidden.
    Visible(bool),

    /// A web request issued through [`Action::Fetch`] completed.
    ///
    /// `context` is the map the request was issued with; the host returns it
    /// untouched.
    WebResponse {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },
}

impl Event {
    /// Short name for spans; avoids formatting response bodies.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::KeyDown => "KeyDown",
            Self::KeyUp => "KeyUp",
            Self::CloseFocus => "CloseFocus",
            Self::OpenDetail => "OpenDetail",
            Self::Back => "Back",
            Self::SearchMode => "SearchMode",
            Self::FocusSearchBar => "FocusSearchBar",
            Self::FocusResults => "FocusResults",
            Self::ExitSearch => "ExitSearch",
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::Escape => "Escape",
            Self::NextCategory => "NextCategory",
            Self::PreviousCategory => "PreviousCategory",
            Self::ClearCategory => "ClearCategory",
            Self::Retry => "Retry",
            Self::PermissionsResult { .. } => "PermissionsResult",
            Self::Visible(_) => "Visible",
            Self::WebResponse { .. } => "WebResponse",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the UI should re-render.
///
/// # Errors
///
/// Returns [`DexError::Context`](crate::domain::DexError::Context) when a
/// web response carries a context map this plugin did not produce.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::KeyDown => {
            if state.view_mode != ViewMode::Listing {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if state.view_mode != ViewMode::Listing {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => {
            state.suspend();
            Ok((false, vec![Action::CloseFocus]))
        }
        Event::OpenDetail => {
            if state.view_mode != ViewMode::Listing {
                return Ok((false, vec![]));
            }

            let Some(entity) = state.selected_entity() else {
                tracing::debug!("no entity selected");
                if matches!(state.input_mode, InputMode::Search(_)) {
                    tracing::debug!("exiting search mode (no selection)");
                    state.input_mode = InputMode::Normal;
                    state.filter.search_text.clear();
                    state.apply_filter();
                    return Ok((true, vec![]));
                }
                return Ok((false, vec![]));
            };

            let id = entity.id.to_string();
            tracing::debug!(id = %id, name = %entity.name, "opening detail");
            Ok((true, state.open_detail(&id)))
        }
        Event::Back => {
            if state.view_mode != ViewMode::Detail {
                return Ok((false, vec![]));
            }
            state.close_detail();
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.filter.search_text.clear();
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.filter.search_text.is_empty() {
                state.input_mode = InputMode::Normal;
                state.apply_filter();
                return Ok((true, vec![]));
            }

            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch | Event::Escape => {
            tracing::debug!(query = %state.filter.search_text, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.filter.search_text.clear();
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }

            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.filter.search_text.push(*c);
            tracing::trace!(query = %state.filter.search_text, char = %c, "search query updated");
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }

            state.filter.search_text.pop();
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::NextCategory => {
            state.next_category();
            tracing::debug!(category = %state.filter.category.label(), "category selected");
            Ok((true, vec![]))
        }
        Event::PreviousCategory => {
            state.previous_category();
            tracing::debug!(category = %state.filter.category.label(), "category selected");
            Ok((true, vec![]))
        }
        Event::ClearCategory => {
            state.clear_category();
            Ok((true, vec![]))
        }
        Event::Retry => {
            if !state.web_access {
                tracing::debug!("retry ignored without web access");
                return Ok((false, vec![]));
            }
            let actions = match state.view_mode {
                ViewMode::Listing => state.start_listing(),
                ViewMode::Detail => state.retry_detail(),
            };
            Ok((true, actions))
        }
        Event::PermissionsResult { granted: true } => {
            tracing::debug!("web access granted");
            state.web_access = true;
            let mut actions = state.start_listing();
            if let Some(id) = state.open_id.clone() {
                tracing::debug!(id = %id, "opening requested detail");
                actions.extend(state.open_detail(&id));
            }
            Ok((true, actions))
        }
        Event::PermissionsResult { granted: false } => {
            tracing::warn!("web access denied; nothing can be loaded");
            state.deny_web_access();
            Ok((true, vec![]))
        }
        Event::Visible(true) => {
            let actions = state.resume();
            Ok((!actions.is_empty(), actions))
        }
        Event::Visible(false) => {
            state.suspend();
            Ok((false, vec![]))
        }
        Event::WebResponse {
            status,
            body,
            context,
        } => {
            let context = RequestContext::from_map(context)?;
            let result = classify_response(&context.url, *status, body.clone());

            tracing::debug!(
                url = %context.url,
                status = *status,
                generation = context.generation,
                ok = result.is_ok(),
                "web response received"
            );

            Ok(match context.kind {
                RequestKind::Detail => state.on_detail_response(&context, result),
                RequestKind::Page | RequestKind::ListingDetail { .. } => {
                    state.on_listing_response(&context, result)
                }
            })
        }
    }
}
