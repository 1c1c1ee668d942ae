//! Outbound request descriptions and the context that travels with them.
//!
//! The Zellij host round-trips a string map with every web request. We use it
//! to carry a [`RequestContext`]: which load the request belongs to, the
//! activation generation it was issued under, and for fan-out entries the
//! slot its result must land in. Completions whose generation no longer
//! matches are recognized as stale and dropped.

use crate::domain::{DexError, FetchError, Result};
use std::collections::BTreeMap;

const KEY_KIND: &str = "dexterm.kind";
const KEY_GENERATION: &str = "dexterm.generation";
const KEY_INDEX: &str = "dexterm.index";
const KEY_URL: &str = "dexterm.url";

/// Longest error body excerpt kept in a `NetworkFailure` message.
const MAX_ERROR_EXCERPT: usize = 200;

/// Which load a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// The listing page of reference entries.
    Page,
    /// One fan-out detail request of the listing, with its slot in page order.
    ListingDetail { index: usize },
    /// The single-entity detail view.
    Detail,
}

impl RequestKind {
    const fn tag(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::ListingDetail { .. } => "listing-detail",
            Self::Detail => "detail",
        }
    }
}

/// Metadata attached to a request and handed back with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub kind: RequestKind,
    /// Activation generation of the issuing loader.
    pub generation: u64,
    pub url: String,
}

impl RequestContext {
    /// Encodes the context into the host's string map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_KIND.to_string(), self.kind.tag().to_string());
        map.insert(KEY_GENERATION.to_string(), self.generation.to_string());
        map.insert(KEY_URL.to_string(), self.url.clone());
        if let RequestKind::ListingDetail { index } = self.kind {
            map.insert(KEY_INDEX.to_string(), index.to_string());
        }
        map
    }

    /// Decodes a context map returned by the host.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Context`] if a key is missing or malformed, which
    /// means the result does not belong to a request this plugin issued.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            map.get(key)
                .ok_or_else(|| DexError::Context(format!("missing `{key}`")))
        };

        let generation = get(KEY_GENERATION)?
            .parse::<u64>()
            .map_err(|e| DexError::Context(format!("bad generation: {e}")))?;
        let url = get(KEY_URL)?.clone();

        let kind = match get(KEY_KIND)?.as_str() {
            "page" => RequestKind::Page,
            "detail" => RequestKind::Detail,
            "listing-detail" => {
                let index = get(KEY_INDEX)?
                    .parse::<usize>()
                    .map_err(|e| DexError::Context(format!("bad index: {e}")))?;
                RequestKind::ListingDetail { index }
            }
            other => return Err(DexError::Context(format!("unknown kind `{other}`"))),
        };

        Ok(Self {
            kind,
            generation,
            url,
        })
    }
}

/// A GET request the plugin shim should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    /// Passed to the host verbatim and handed back with the response.
    pub context: RequestContext,
}

impl FetchRequest {
    /// Builds a request whose context echoes `url`.
    #[must_use]
    pub fn new(url: String, kind: RequestKind, generation: u64) -> Self {
        Self {
            context: RequestContext {
                kind,
                generation,
                url: url.clone(),
            },
            url,
        }
    }
}

/// Classifies a host web-request result.
///
/// 2xx bodies pass through; anything else becomes a
/// [`FetchError::NetworkFailure`] carrying an excerpt of the body. The host
/// reports transport errors (DNS, refused, timeout) the same way, with the
/// error text as the body.
///
/// # Errors
///
/// Returns [`FetchError::NetworkFailure`] for every non-2xx status.
pub fn classify_response(url: &str, status: u16, body: Vec<u8>) -> std::result::Result<Vec<u8>, FetchError> {
    if (200..300).contains(&status) {
        return Ok(body);
    }

    let text = String::from_utf8_lossy(&body);
    let message: String = if text.trim().is_empty() {
        "empty response".to_string()
    } else {
        text.trim().chars().take(MAX_ERROR_EXCERPT).collect()
    };

    Err(FetchError::NetworkFailure {
        url: url.to_string(),
        status: Some(status),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trips_through_host_map() {
        for kind in [
            RequestKind::Page,
            RequestKind::Detail,
            RequestKind::ListingDetail { index: 149 },
        ] {
            let ctx = RequestContext {
                kind,
                generation: 7,
                url: "https://pokeapi.co/api/v2/pokemon/150/".to_string(),
            };
            let decoded = RequestContext::from_map(&ctx.to_map()).unwrap();
            assert_eq!(decoded, ctx);
        }
    }

    #[test]
    fn foreign_context_maps_are_rejected() {
        assert!(matches!(
            RequestContext::from_map(&BTreeMap::new()),
            Err(DexError::Context(_))
        ));

        let mut map = RequestContext {
            kind: RequestKind::ListingDetail { index: 1 },
            generation: 1,
            url: "u".to_string(),
        }
        .to_map();
        map.insert(KEY_INDEX.to_string(), "one".to_string());
        assert!(RequestContext::from_map(&map).is_err());

        map.insert(KEY_KIND.to_string(), "bogus".to_string());
        assert!(RequestContext::from_map(&map).is_err());
    }

    #[test]
    fn success_statuses_pass_body_through() {
        assert_eq!(classify_response("u", 200, b"{}".to_vec()).unwrap(), b"{}");
        assert_eq!(classify_response("u", 204, Vec::new()).unwrap(), b"");
    }

    #[test]
    fn failure_statuses_become_network_failures() {
        let err = classify_response("u", 404, b"Not Found".to_vec()).unwrap_err();
        assert_eq!(
            err,
            FetchError::NetworkFailure {
                url: "u".to_string(),
                status: Some(404),
                message: "Not Found".to_string(),
            }
        );

        let err = classify_response("u", 400, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("empty response"));
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(1000).into_bytes();
        let FetchError::NetworkFailure { message, .. } = classify_response("u", 500, body).unwrap_err() else {
            panic!("expected network failure");
        };
        assert_eq!(message.len(), MAX_ERROR_EXCERPT);
    }
}
