//! Side effects the plugin runtime executes on behalf of the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never performs I/O. It returns
//! a `Vec<Action>` which `main.rs` runs in order.

use crate::fetch::FetchRequest;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP GET through the host.
    ///
    /// The request's context map travels with it and comes back with the
    /// matching `WebRequestResult`.
    Fetch(FetchRequest),
}
