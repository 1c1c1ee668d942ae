//! Keyboard bindings.
//!
//! Translates a Zellij key press into an application [`Event`] based on the
//! current view and input mode. Keys with no binding map to `None` and leave
//! the pane untouched.
//!
//! # Bindings
//!
//! | Context | Key | Event |
//! | --- | --- | --- |
//! | anywhere | `Ctrl+n` / `Ctrl+p` | `KeyDown` / `KeyUp` |
//! | detail | `Esc`, `Backspace`, `h` | `Back` |
//! | detail | `r` | `Retry` |
//! | listing | `j`/`Down`, `k`/`Up` | `KeyDown` / `KeyUp` |
//! | listing | `t` | `NextCategory` |
//! | listing | `T`, `Shift+t` | `PreviousCategory` |
//! | listing | `c` | `ClearCategory` |
//! | search | printable chars | `Char` |

use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

use super::handler::Event;
use super::modes::{InputMode, SearchFocus, ViewMode};
use super::state::AppState;

/// Maps one key press to an application event.
///
/// `Ctrl` chords are resolved first, then the detail view bindings, then the
/// listing bindings of the current input mode.
///
/// # Parameters
///
/// * `state` - Current application state; only the view and input mode are read
/// * `key` - Key press reported by Zellij
///
/// # Returns
///
/// The event to feed into [`handle_event`](super::handle_event), or `None`
/// when the key is unbound in this context.
///
/// # Example
///
/// ```
/// use dexterm::app::{keymap::map_key, AppState, Event};
/// use dexterm::{Config, Theme};
/// use zellij_tile::prelude::{BareKey, KeyWithModifier};
///
/// let state = AppState::new(&Config::default(), Theme::default());
/// let shifted = KeyWithModifier::new(BareKey::Char('t')).with_shift_modifier();
/// assert_eq!(map_key(&state, &shifted), Some(Event::PreviousCategory));
/// ```
#[must_use]
pub fn map_key(state: &AppState, key: &KeyWithModifier) -> Option<Event> {
    tracing::debug!(bare_key = ?key.bare_key, "key event");

    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char('n') => Some(Event::KeyDown),
            BareKey::Char('p') => Some(Event::KeyUp),
            _ => None,
        };
    }

    if state.view_mode == ViewMode::Detail {
        return map_detail_key(key);
    }

    match state.input_mode {
        InputMode::Normal => map_normal_key(key),
        InputMode::Search(focus) => map_search_key(key, focus),
    }
}

fn map_detail_key(key: &KeyWithModifier) -> Option<Event> {
    Some(match key.bare_key {
        BareKey::Esc | BareKey::Backspace | BareKey::Char('h') => Event::Back,
        BareKey::Char('r') => Event::Retry,
        BareKey::Char('q') => Event::CloseFocus,
        _ => return None,
    })
}

fn map_normal_key(key: &KeyWithModifier) -> Option<Event> {
    Some(match key.bare_key {
        BareKey::Down | BareKey::Char('j') => Event::KeyDown,
        BareKey::Up | BareKey::Char('k') => Event::KeyUp,
        BareKey::Enter => Event::OpenDetail,
        BareKey::Char('/') => Event::SearchMode,
        // Some terminals report Shift+t as a lowercase key plus the modifier.
        BareKey::Char('t') if key.has_modifiers(&[KeyModifier::Shift]) => {
            Event::PreviousCategory
        }
        BareKey::Char('t') => Event::NextCategory,
        BareKey::Char('T') => Event::PreviousCategory,
        BareKey::Char('c') => Event::ClearCategory,
        BareKey::Char('r') => Event::Retry,
        BareKey::Char('q') => Event::CloseFocus,
        BareKey::Esc => Event::Escape,
        _ => return None,
    })
}

fn map_search_key(key: &KeyWithModifier, focus: SearchFocus) -> Option<Event> {
    let typing = focus == SearchFocus::Typing;
    Some(match key.bare_key {
        BareKey::Down => Event::KeyDown,
        BareKey::Up => Event::KeyUp,
        BareKey::Char('j') if !typing => Event::KeyDown,
        BareKey::Char('k') if !typing => Event::KeyUp,
        BareKey::Esc => Event::ExitSearch,
        BareKey::Enter if typing => Event::FocusResults,
        BareKey::Enter => Event::OpenDetail,
        BareKey::Char('/') if !typing => Event::FocusSearchBar,
        BareKey::Backspace => Event::Backspace,
        BareKey::Char(c) => Event::Char(c),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Theme;
    use crate::Config;

    fn state() -> AppState {
        AppState::new(&Config::default(), Theme::default())
    }

    fn key(c: char) -> KeyWithModifier {
        KeyWithModifier::new(BareKey::Char(c))
    }

    #[test]
    fn type_cycling_keys_in_normal_mode() {
        let state = state();

        assert_eq!(map_key(&state, &key('t')), Some(Event::NextCategory));
        assert_eq!(map_key(&state, &key('T')), Some(Event::PreviousCategory));
        assert_eq!(
            map_key(&state, &key('t').with_shift_modifier()),
            Some(Event::PreviousCategory)
        );
        assert_eq!(map_key(&state, &key('c')), Some(Event::ClearCategory));
    }

    #[test]
    fn ctrl_chords_navigate_in_every_mode() {
        let mut state = state();
        let ctrl_n = key('n').with_ctrl_modifier();
        let ctrl_t = key('t').with_ctrl_modifier();

        assert_eq!(map_key(&state, &ctrl_n), Some(Event::KeyDown));
        assert_eq!(map_key(&state, &ctrl_t), None);

        state.input_mode = InputMode::Search(SearchFocus::Typing);
        assert_eq!(map_key(&state, &ctrl_n), Some(Event::KeyDown));

        state.view_mode = ViewMode::Detail;
        assert_eq!(map_key(&state, &key('p').with_ctrl_modifier()), Some(Event::KeyUp));
    }

    #[test]
    fn search_typing_captures_letters() {
        let mut state = state();
        state.input_mode = InputMode::Search(SearchFocus::Typing);

        assert_eq!(map_key(&state, &key('j')), Some(Event::Char('j')));
        assert_eq!(map_key(&state, &key('t')), Some(Event::Char('t')));
        assert_eq!(
            map_key(&state, &KeyWithModifier::new(BareKey::Enter)),
            Some(Event::FocusResults)
        );

        state.input_mode = InputMode::Search(SearchFocus::Navigating);
        assert_eq!(map_key(&state, &key('j')), Some(Event::KeyDown));
        assert_eq!(map_key(&state, &key('/')), Some(Event::FocusSearchBar));
    }

    #[test]
    fn detail_view_keys() {
        let mut state = state();
        state.view_mode = ViewMode::Detail;

        assert_eq!(map_key(&state, &key('h')), Some(Event::Back));
        assert_eq!(map_key(&state, &key('r')), Some(Event::Retry));
        assert_eq!(map_key(&state, &key('t')), None);
    }
}
