//! Error types for the dexterm plugin.
//!
//! Two layers of errors live here. [`FetchError`] describes why a single
//! outbound request did not yield usable data; it is cheap to clone so it can
//! sit inside view state as the reason of a failed load. [`DexError`] is the
//! crate-wide error returned by fallible operations, wrapping fetch failures
//! together with theme, configuration and request-context problems.

use thiserror::Error;

/// Why a request to the external creature API produced no usable data.
///
/// Every variant carries the URL that was requested so diagnostics can name
/// the failing entry of a fan-out batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request was rejected, timed out, or answered with a non-2xx status.
    ///
    /// `status` is `None` when the host never produced an HTTP status.
    #[error("request to {url} failed{}: {message}", .status.map(|s| format!(" with status {s}")).unwrap_or_default())]
    NetworkFailure {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("malformed payload from {url}: {message}")]
    MalformedPayload { url: String, message: String },

    /// The payload decoded but lacks a field the projection relies on by name.
    #[error("unexpected schema from {url}: missing {missing}")]
    UnexpectedSchema { url: String, missing: String },
}

impl FetchError {
    /// Returns the URL of the request that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::NetworkFailure { url, .. }
            | Self::MalformedPayload { url, .. }
            | Self::UnexpectedSchema { url, .. } => url,
        }
    }

    /// Short label for the failure class, used in headers and log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NetworkFailure { .. } => "network failure",
            Self::MalformedPayload { .. } => "malformed payload",
            Self::UnexpectedSchema { .. } => "unexpected schema",
        }
    }
}

/// The main error type for dexterm operations.
#[derive(Debug, Error)]
pub enum DexError {
    /// A request to the creature API failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request context returned by the host could not be decoded.
    ///
    /// Happens when a `WebRequestResult` arrives that this plugin did not
    /// issue, or whose context map was altered in transit.
    #[error("Request context error: {0}")]
    Context(String),
}

/// A specialized `Result` type for dexterm operations.
pub type Result<T> = std::result::Result<T, DexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failure_message_includes_status_when_present() {
        let err = FetchError::NetworkFailure {
            url: "https://pokeapi.co/api/v2/pokemon/1".to_string(),
            status: Some(503),
            message: "service unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request to https://pokeapi.co/api/v2/pokemon/1 failed with status 503: service unavailable"
        );

        let err = FetchError::NetworkFailure {
            url: "u".to_string(),
            status: None,
            message: "timed out".to_string(),
        };
        assert_eq!(err.to_string(), "request to u failed: timed out");
    }

    #[test]
    fn fetch_error_converts_into_dex_error() {
        let err: DexError = FetchError::UnexpectedSchema {
            url: "u".to_string(),
            missing: "stat `speed`".to_string(),
        }
        .into();
        assert!(matches!(err, DexError::Fetch(FetchError::UnexpectedSchema { .. })));
        assert_eq!(err.to_string(), "unexpected schema from u: missing stat `speed`");
    }
}
