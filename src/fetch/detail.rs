//! Single-entity detail fetch.
//!
//! The detail view shows one creature at a time, so the loader tracks a
//! single outstanding request. Opening another entity, going back, or
//! hiding the pane supersedes it; its completion then arrives stale and is
//! dropped.

use super::request::{FetchRequest, RequestContext, RequestKind};
use crate::domain::{EntityDetail, FetchError};
use crate::pokeapi::{project_detail, Endpoint};

/// Outcome of feeding a completion to the [`DetailLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStep {
    /// The completion belongs to a superseded or cancelled request.
    Stale,
    /// The entity was fetched and projected.
    Completed(EntityDetail),
    /// The request failed or the payload could not be projected.
    Failed(FetchError),
}

/// Fetches one entity for the detail view.
///
/// The id token is used verbatim as a path segment, so names work as well
/// as numbers. Each [`start`](Self::start) supersedes the previous request.
///
/// # Example
///
/// ```
/// use dexterm::fetch::{DetailLoader, DetailStep};
/// use dexterm::pokeapi::Endpoint;
///
/// let mut loader = DetailLoader::new(Endpoint::default());
/// let request = loader.start("pikachu");
/// assert_eq!(request.url, "https://pokeapi.co/api/v2/pokemon/pikachu");
///
/// loader.cancel();
/// let step = loader.on_response(&request.context, Ok(b"{}".to_vec()));
/// assert_eq!(step, DetailStep::Stale);
/// ```
#[derive(Debug, Clone)]
pub struct DetailLoader {
    /// Where detail URLs are built from.
    endpoint: Endpoint,
    /// Bumped by every `start`; completions must carry the current value.
    generation: u64,
    /// Id token of the outstanding request, cleared on completion or cancel.
    pending: Option<String>,
}

impl DetailLoader {
    /// Creates an idle loader.
    ///
    /// # Parameters
    ///
    /// * `endpoint` - API root the detail URLs are built from
    #[must_use]
    pub const fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            generation: 0,
            pending: None,
        }
    }

    /// Starts loading `id_token`, superseding any outstanding request.
    ///
    /// # Parameters
    ///
    /// * `id_token` - National number or name slug, used verbatim
    ///
    /// # Returns
    ///
    /// The request for the plugin shim to issue. Its context carries the
    /// new generation.
    pub fn start(&mut self, id_token: &str) -> FetchRequest {
        self.generation += 1;
        self.pending = Some(id_token.to_string());

        let url = self.endpoint.detail_url(id_token);
        tracing::debug!(generation = self.generation, url = %url, "detail load started");
        FetchRequest::new(url, RequestKind::Detail, self.generation)
    }

    /// Abandons the outstanding request, if any.
    ///
    /// Its completion will be reported as [`DetailStep::Stale`]. No-op when
    /// nothing is pending.
    pub fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            tracing::debug!(generation = self.generation, id = %id, "detail load cancelled");
        }
    }

    /// Feeds one completed request into the loader.
    ///
    /// Failures are logged at warn level with the URL and failure kind.
    ///
    /// # Parameters
    ///
    /// * `context` - Context the request was issued with
    /// * `result` - Body of a 2xx response, or why the request failed
    ///
    /// # Returns
    ///
    /// - [`DetailStep::Stale`] if the request was superseded or cancelled,
    ///   or is not a detail request at all
    /// - [`DetailStep::Completed`] with the projected entity
    /// - [`DetailStep::Failed`] with the network, decoding or schema error
    pub fn on_response(
        &mut self,
        context: &RequestContext,
        result: Result<Vec<u8>, FetchError>,
    ) -> DetailStep {
        if context.kind != RequestKind::Detail
            || context.generation != self.generation
            || self.pending.is_none()
        {
            tracing::debug!(
                generation = context.generation,
                current = self.generation,
                "ignoring stale detail completion"
            );
            return DetailStep::Stale;
        }
        self.pending = None;

        match result.and_then(|body| project_detail(&context.url, &body)) {
            Ok(detail) => DetailStep::Completed(detail),
            Err(error) => {
                tracing::warn!(
                    url = %error.url(),
                    kind = error.kind(),
                    error = %error,
                    "detail load failed"
                );
                DetailStep::Failed(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::loader::tests::CapturedEvents;
    use crate::pokeapi::projection::fixtures::{bytes, detail, stat};

    fn detail_body() -> serde_json::Value {
        detail(1, "bulbasaur", &["grass", "poison"])
    }

    #[test]
    fn builds_request_from_verbatim_token() {
        let mut loader = DetailLoader::new(Endpoint::new("https://pokeapi.co/api/v2/"));
        let request = loader.start("mr-mime");
        assert_eq!(request.url, "https://pokeapi.co/api/v2/pokemon/mr-mime");
        assert_eq!(request.context.kind, RequestKind::Detail);
        assert_eq!(request.context.generation, 1);
    }

    #[test]
    fn completes_with_projected_detail() {
        let mut loader = DetailLoader::new(Endpoint::default());
        let request = loader.start("1");
        let step = loader.on_response(
            &request.context,
            Ok(bytes(&detail(1, "bulbasaur", &["grass", "poison"]))),
        );
        let DetailStep::Completed(detail) = step else {
            panic!("expected detail, got {step:?}");
        };
        assert_eq!(detail.summary.name, "bulbasaur");
        assert_eq!(detail.abilities, vec!["overgrow", "chlorophyll"]);
        assert_eq!(detail.stats.special_attack, 65);

        // A duplicate delivery of the same completion is dropped.
        let again = loader.on_response(&request.context, Ok(bytes(&detail_body())));
        assert_eq!(again, DetailStep::Stale);
    }

    #[test]
    fn missing_stat_fails_with_schema_error_and_warns() {
        let events = CapturedEvents::default();
        let mut loader = DetailLoader::new(Endpoint::default());
        let mut body = detail(1, "bulbasaur", &["grass"]);
        body["stats"] = serde_json::json!([stat("hp", 45)]);

        let step = events.run(|| {
            let request = loader.start("1");
            loader.on_response(&request.context, Ok(bytes(&body)))
        });

        assert!(matches!(step, DetailStep::Failed(FetchError::UnexpectedSchema { .. })));
        assert_eq!(events.warnings(), vec!["detail load failed".to_string()]);
    }

    #[test]
    fn superseded_and_cancelled_requests_are_stale() {
        let mut loader = DetailLoader::new(Endpoint::default());
        let first = loader.start("1");
        let second = loader.start("4");
        let body = bytes(&detail(1, "bulbasaur", &["grass"]));
        assert_eq!(loader.on_response(&first.context, Ok(body.clone())), DetailStep::Stale);

        loader.cancel();
        assert_eq!(loader.on_response(&second.context, Ok(body)), DetailStep::Stale);
    }

    #[test]
    fn network_failure_is_reported() {
        let mut loader = DetailLoader::new(Endpoint::default());
        let request = loader.start("0");
        let error = FetchError::NetworkFailure {
            url: request.url.clone(),
            status: Some(404),
            message: "Not Found".to_string(),
        };
        assert_eq!(
            loader.on_response(&request.context, Err(error.clone())),
            DetailStep::Failed(error)
        );
    }
}
