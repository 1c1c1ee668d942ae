//! Domain layer for the dexterm plugin.
//!
//! Holds the creature models, the pure filtering rules of the listing, and
//! the error types. Nothing here knows about Zellij, HTTP, or rendering.
//!
//! # Organization
//!
//! - [`entity`]: `EntitySummary`, `EntityDetail`, `BaseStats`
//! - [`filter`]: search/category filtering and the category universe
//! - [`error`]: `FetchError`, `DexError` and the `Result` alias
//!
//! # Examples
//!
//! ```
//! use dexterm::domain::{filter, CategorySelection, EntitySummary};
//!
//! let entities = vec![EntitySummary {
//!     id: 4,
//!     name: "charmander".to_string(),
//!     categories: vec!["fire".to_string()],
//!     image_url: None,
//! }];
//! let visible = filter(&entities, "CHAR", &CategorySelection::Unset);
//! assert_eq!(visible.len(), 1);
//! ```

pub mod entity;
pub mod error;
pub mod filter;

pub use entity::{BaseStats, EntityDetail, EntitySummary};
pub use error::{DexError, FetchError, Result};
pub use filter::{category_universe, filter, match_range, CategorySelection, FilterState};
