//! Input, view and load state types for the application.
//!
//! The plugin shows one of two views: the listing of all fetched entities, or
//! the detail card of one entity. Input handling in the listing is either
//! normal navigation or search, where focus is on the query or on the
//! results. Each view's data is a [`LoadState`].

use crate::domain::FetchError;

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters go to the query.
    Typing,
    /// j/k move through the filtered results; `/` returns to typing.
    Navigating,
}

/// Current input handling mode of the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// j/k (navigate), / (search), t/T/c (category), Enter (detail), r, q.
    Normal,
    /// Active search mode with focus state.
    Search(SearchFocus),
}

/// Which view is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Listing,
    Detail,
}

/// Lifecycle of the data behind a view.
///
/// `Failed` is a distinct state rather than an empty `Ready`, so the view can
/// tell "nothing matched" from "nothing loaded" and offer a retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    /// Nothing requested yet (e.g. waiting for permissions).
    #[default]
    Idle,
    /// A request is outstanding.
    Loading,
    Ready(T),
    /// The last attempt failed; a retry goes back to `Loading`.
    Failed(FetchError),
}

impl<T> LoadState<T> {
    /// Returns `true` while a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded value, if any.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Failure of the last attempt, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_state_accessors() {
        let ready: LoadState<u32> = LoadState::Ready(3);
        assert_eq!(ready.ready(), Some(&3));
        assert!(ready.error().is_none());

        let failed: LoadState<u32> = LoadState::Failed(FetchError::MalformedPayload {
            url: "u".to_string(),
            message: "eof".to_string(),
        });
        assert!(failed.ready().is_none());
        assert_eq!(failed.error().map(FetchError::kind), Some("malformed payload"));

        assert!(LoadState::<u32>::Loading.is_loading());
        assert_eq!(LoadState::<u32>::default(), LoadState::Idle);
    }
}
