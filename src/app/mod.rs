//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, fetch and UI
//! layers. Data flows one way:
//!
//! ```text
//! Key / host events → Event → handle_event → AppState → Actions → web_request
//!                                   ↑                                  ↓
//!                                   └──────── WebResponse ─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`keymap`]: Key press to event bindings
//! - [`modes`]: Input, view and load state types
//! - [`state`]: Application state container and view model computation
//!
//! # Example
//!
//! ```
//! use dexterm::app::{handle_event, Action, AppState, Event};
//! use dexterm::{Config, Theme};
//!
//! let mut state = AppState::new(&Config::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), dexterm::DexError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod keymap;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, LoadState, SearchFocus, ViewMode};
pub use state::AppState;
