//! Fetch orchestration for the listing and detail views.
//!
//! Nothing in this module performs I/O. Loaders hand out [`FetchRequest`]s
//! for the plugin shim to issue through the host and consume the completions
//! it routes back, matched up by their [`RequestContext`].
//!
//! - [`ListingLoader`]: page request, bounded fan-out, all-or-nothing join
//! - [`DetailLoader`]: one detail request per activation
//! - [`FetchQueue`]: FIFO cap on requests in flight
//! - [`classify_response`]: host status/body to `Result`

pub mod detail;
pub mod limiter;
pub mod loader;
pub mod request;

pub use detail::{DetailLoader, DetailStep};
pub use limiter::FetchQueue;
pub use loader::{ListingLoader, LoaderPhase, LoaderStep};
pub use request::{classify_response, FetchRequest, RequestContext, RequestKind};
