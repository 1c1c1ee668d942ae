//! PokeAPI source adapter.
//!
//! Knows the shape of the external creature API: which URLs to request and
//! how to project its JSON payloads onto the domain models. It performs no
//! I/O itself; the plugin shim issues the requests and hands the bodies back.
//!
//! # Modules
//!
//! - [`endpoint`]: URL construction for listing and detail requests
//! - [`payload`]: serde mirrors of the subset of the API payloads we read
//! - [`projection`]: payload decoding and projection to domain models

pub mod endpoint;
pub mod payload;
pub mod projection;

pub use endpoint::{Endpoint, DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT};
pub use projection::{decode_page, project_detail, project_summary};
