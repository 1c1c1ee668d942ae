//! URL construction for the creature API.
//!
//! Two requests are ever made: one listing page and any number of detail
//! documents. Listing entries carry absolute detail URLs, so
//! [`Endpoint::detail_url`] is only used by the detail view.

/// Public PokeAPI v2 root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Number of reference entries requested by the listing page.
///
/// 151 covers the first generation, national numbers 1 through 151.
pub const DEFAULT_PAGE_LIMIT: u32 = 151;

/// Base URL of the creature API with helpers for each request the plugin makes.
///
/// # Example
///
/// ```
/// use dexterm::pokeapi::Endpoint;
///
/// let endpoint = Endpoint::new("http://localhost:8080/api/v2/");
/// assert_eq!(endpoint.listing_url(20), "http://localhost:8080/api/v2/pokemon?limit=20");
/// assert_eq!(endpoint.detail_url("pikachu"), "http://localhost:8080/api/v2/pokemon/pikachu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
}

impl Endpoint {
    /// Creates an endpoint rooted at `base_url`.
    ///
    /// # Parameters
    ///
    /// * `base_url` - API root such as `https://pokeapi.co/api/v2`. Trailing
    ///   slashes are dropped so paths can be appended with a single `/`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET {base}/pokemon?limit={limit}`
    ///
    /// # Parameters
    ///
    /// * `limit` - Number of reference entries to request
    #[must_use]
    pub fn listing_url(&self, limit: u32) -> String {
        format!("{}/pokemon?limit={limit}", self.base_url)
    }

    /// `GET {base}/pokemon/{id_token}`
    ///
    /// The token is used verbatim as a path segment, so both national
    /// numbers (`25`) and slugs (`pikachu`) work. It is not validated; an
    /// unknown token surfaces as a 404 network failure.
    ///
    /// # Parameters
    ///
    /// * `id_token` - National number or name slug
    #[must_use]
    pub fn detail_url(&self, id_token: &str) -> String {
        format!("{}/pokemon/{id_token}", self.base_url)
    }
}

impl Default for Endpoint {
    /// Endpoint rooted at [`DEFAULT_BASE_URL`].
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_listing_and_detail_urls() {
        let endpoint = Endpoint::default();
        assert_eq!(
            endpoint.listing_url(151),
            "https://pokeapi.co/api/v2/pokemon?limit=151"
        );
        assert_eq!(endpoint.detail_url("25"), "https://pokeapi.co/api/v2/pokemon/25");
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let endpoint = Endpoint::new("http://localhost:8080/api/v2//");
        assert_eq!(endpoint, Endpoint::new("http://localhost:8080/api/v2"));
        assert_eq!(endpoint.listing_url(2), "http://localhost:8080/api/v2/pokemon?limit=2");
        assert_eq!(endpoint.detail_url("1"), "http://localhost:8080/api/v2/pokemon/1");
    }

    #[test]
    fn detail_token_is_not_validated() {
        let endpoint = Endpoint::default();
        assert_eq!(
            endpoint.detail_url("mr-mime"),
            "https://pokeapi.co/api/v2/pokemon/mr-mime"
        );
    }
}
