//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the dexterm library and the Zellij plugin
//! API: it translates host events into [`Event`]s, issues the web requests
//! the library asks for, and delegates rendering.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permission**: Request `WebAccess`; the listing starts once granted
//! 3. **Update**: Translate events, call `handle_event`, run the actions
//! 4. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search, category and retry events
//! - `WebRequestResult` → `Event::WebResponse` (context map passed through)
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//! - `Visible` → `Event::Visible` (hiding the pane cancels pending loads)
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Listing, normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`: Open detail view
//! - `/`: Search
//! - `t` / `T` (or `Shift+t`): Next / previous type, `c`: clear type
//! - `r`: Retry a failed listing
//! - `q`: Close plugin
//!
//! Listing, search mode:
//! - Characters (including `j`/`k`) type while the query is focused
//! - `Enter`: Focus results, then open detail
//! - `/`: Return to the query
//! - `Esc`: Leave search
//!
//! Detail view:
//! - `Esc`/`Backspace`/`h`: Back to the listing
//! - `r`: Retry a failed detail
//! - `q`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use dexterm::{handle_event, Action, Config, Event};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: dexterm::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: dexterm::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests `WebAccess` and subscribes to events.
    ///
    /// Nothing is fetched here: requests wait for the permission result.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        dexterm::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            base_url = %config.base_url,
            page_limit = config.page_limit,
            max_in_flight = config.max_in_flight,
            open_id = ?config.open_id,
            "parsed configuration"
        );
        self.app = dexterm::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
            EventType::Visible,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, delegates to `handle_event`, and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => {
                match dexterm::app::keymap::map_key(&self.app, key) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::WebResponse {
                    status,
                    body,
                    context,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: status == PermissionStatus::Granted,
                }
            }
            zellij_tile::prelude::Event::Visible(visible) => Event::Visible(visible),
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render,
                    "event handled successfully"
                );
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        dexterm::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            _ => "Other".to_string(),
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => {
                tracing::debug!(url = %request.url, "issuing web request");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.context.to_map(),
                );
            }
        }
    }
}
