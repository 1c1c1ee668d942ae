//! Listing loader: page request, bounded fan-out, all-or-nothing join.
//!
//! The loader is a small state machine driven by the app layer. [`start`]
//! yields the page request; every completion is fed to [`on_response`],
//! which answers with more requests to issue, the finished collection, or
//! the failure that aborted the batch. One failed entry fails the whole
//! activation: queued requests are dropped and later completions of the
//! same activation are ignored.
//!
//! [`start`]: ListingLoader::start
//! [`on_response`]: ListingLoader::on_response

use super::limiter::FetchQueue;
use super::request::{FetchRequest, RequestContext, RequestKind};
use crate::domain::{EntitySummary, FetchError};
use crate::pokeapi::{decode_page, project_summary, Endpoint};

/// Where the current activation stands.
///
/// ```text
/// Idle ─start→ AwaitingPage ─page→ AwaitingDetails ─last detail→ Completed
///                   │                    │
///                   └──── any failure ───┴──→ Failed
/// (start from any phase begins a new activation; cancel → Cancelled)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Never started.
    Idle,
    /// The listing page request is outstanding.
    AwaitingPage,
    /// Detail requests are in flight or queued.
    AwaitingDetails,
    /// Every detail arrived and the collection was handed out.
    Completed,
    /// One request failed and the activation was aborted.
    Failed,
    /// Abandoned by [`ListingLoader::cancel`].
    Cancelled,
}

/// What the app layer should do after feeding a completion to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderStep {
    /// The completion belongs to a cancelled, failed or superseded activation.
    Stale,
    /// Issue these requests; may be empty while the batch is still joining.
    Dispatch(Vec<FetchRequest>),
    /// Every detail arrived; the collection is in page order.
    Completed(Vec<EntitySummary>),
    /// The activation was aborted by this failure.
    Failed(FetchError),
}

/// Loads the listing collection for one view activation at a time.
///
/// Every request it hands out carries the activation's generation; a
/// completion with any other generation is stale. Detail requests are
/// admitted through a [`FetchQueue`], so at most `max_in_flight` are
/// outstanding while the rest wait in page order.
///
/// # Example
///
/// ```
/// use dexterm::fetch::{ListingLoader, LoaderPhase, LoaderStep};
/// use dexterm::pokeapi::Endpoint;
///
/// let mut loader = ListingLoader::new(Endpoint::default(), 151, 16);
/// let page_request = loader.start().remove(0);
/// assert_eq!(page_request.url, "https://pokeapi.co/api/v2/pokemon?limit=151");
/// assert_eq!(loader.phase(), LoaderPhase::AwaitingPage);
///
/// // An empty page completes the activation with an empty collection.
/// let page = br#"{"count": 0, "results": []}"#.to_vec();
/// let step = loader.on_response(&page_request.context, Ok(page));
/// assert_eq!(step, LoaderStep::Completed(vec![]));
/// assert_eq!(loader.phase(), LoaderPhase::Completed);
/// ```
#[derive(Debug, Clone)]
pub struct ListingLoader {
    /// Where the page URL is built from.
    endpoint: Endpoint,
    /// Entries requested by the page.
    page_limit: u32,
    /// Bumped by every `start`; tags outgoing requests.
    generation: u64,
    phase: LoaderPhase,
    /// `(slot, detail URL)` pairs not yet completed.
    queue: FetchQueue<(usize, String)>,
    /// One slot per page entry, filled as details arrive.
    slots: Vec<Option<EntitySummary>>,
    /// Number of filled slots.
    completed: usize,
}

impl ListingLoader {
    /// Creates an idle loader.
    ///
    /// # Parameters
    ///
    /// * `endpoint` - API root the page URL is built from
    /// * `page_limit` - Entries requested by the listing page
    /// * `max_in_flight` - Detail requests allowed at once; `0` is unbounded
    #[must_use]
    pub fn new(endpoint: Endpoint, page_limit: u32, max_in_flight: usize) -> Self {
        Self {
            endpoint,
            page_limit,
            generation: 0,
            phase: LoaderPhase::Idle,
            queue: FetchQueue::new(max_in_flight),
            slots: Vec::new(),
            completed: 0,
        }
    }

    /// Phase of the current activation.
    #[must_use]
    pub const fn phase(&self) -> LoaderPhase {
        self.phase
    }

    /// Generation of the current activation; `0` before the first start.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// `(details received, details expected)`; `(0, 0)` until the page lands.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.completed, self.slots.len())
    }

    /// Returns `true` while requests of the current activation are
    /// outstanding.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(
            self.phase,
            LoaderPhase::AwaitingPage | LoaderPhase::AwaitingDetails
        )
    }

    /// URL of the listing page request.
    #[must_use]
    pub fn listing_url(&self) -> String {
        self.endpoint.listing_url(self.page_limit)
    }

    /// Starts a fresh activation, superseding any previous one.
    ///
    /// Queued and collected results of the previous activation are dropped
    /// and its outstanding completions become stale.
    ///
    /// # Returns
    ///
    /// The single page request to issue.
    pub fn start(&mut self) -> Vec<FetchRequest> {
        self.reset();
        self.generation += 1;
        self.phase = LoaderPhase::AwaitingPage;

        let url = self.listing_url();
        tracing::debug!(generation = self.generation, url = %url, "listing load started");
        vec![FetchRequest::new(url, RequestKind::Page, self.generation)]
    }

    /// Abandons the current activation. Its outstanding completions turn stale.
    ///
    /// Queued detail requests are never issued. No-op unless the loader is
    /// [active](Self::is_active).
    pub fn cancel(&mut self) {
        if self.is_active() {
            tracing::debug!(
                generation = self.generation,
                in_flight = self.queue.in_flight(),
                queued = self.queue.pending(),
                "listing load cancelled"
            );
            self.reset();
            self.phase = LoaderPhase::Cancelled;
        }
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.slots.clear();
        self.completed = 0;
    }

    fn fail(&mut self, error: FetchError) -> LoaderStep {
        tracing::warn!(
            generation = self.generation,
            url = %error.url(),
            kind = error.kind(),
            error = %error,
            received = self.completed,
            expected = self.slots.len(),
            "listing load aborted"
        );
        self.reset();
        self.phase = LoaderPhase::Failed;
        LoaderStep::Failed(error)
    }

    fn detail_request(&self, (index, url): (usize, String)) -> FetchRequest {
        FetchRequest::new(url, RequestKind::ListingDetail { index }, self.generation)
    }

    /// Feeds one completed request into the state machine.
    ///
    /// A page completion is decoded and fans out the first admitted detail
    /// requests. A detail completion is projected into its slot and releases
    /// the next queued request. The first failure of either kind aborts the
    /// activation and is logged at warn level.
    ///
    /// # Parameters
    ///
    /// * `context` - Context the request was issued with
    /// * `result` - Body of a 2xx response, or why the request failed
    ///
    /// # Returns
    ///
    /// The [`LoaderStep`] the app layer should act on.
    pub fn on_response(
        &mut self,
        context: &RequestContext,
        result: Result<Vec<u8>, FetchError>,
    ) -> LoaderStep {
        if context.generation != self.generation || !self.is_active() {
            tracing::debug!(
                generation = context.generation,
                current = self.generation,
                phase = ?self.phase,
                "ignoring stale listing completion"
            );
            return LoaderStep::Stale;
        }

        match (context.kind, self.phase) {
            (RequestKind::Page, LoaderPhase::AwaitingPage) => self.on_page(context, result),
            (RequestKind::ListingDetail { index }, LoaderPhase::AwaitingDetails) => {
                self.on_detail(index, context, result)
            }
            _ => LoaderStep::Stale,
        }
    }

    fn on_page(&mut self, context: &RequestContext, result: Result<Vec<u8>, FetchError>) -> LoaderStep {
        let urls = match result.and_then(|body| decode_page(&context.url, &body)) {
            Ok(urls) => urls,
            Err(e) => return self.fail(e),
        };

        tracing::debug!(entries = urls.len(), "listing page received");

        if urls.is_empty() {
            self.phase = LoaderPhase::Completed;
            return LoaderStep::Completed(Vec::new());
        }

        self.slots = vec![None; urls.len()];
        self.phase = LoaderPhase::AwaitingDetails;

        let started = self.queue.admit(urls.into_iter().enumerate());
        LoaderStep::Dispatch(started.into_iter().map(|item| self.detail_request(item)).collect())
    }

    fn on_detail(
        &mut self,
        index: usize,
        context: &RequestContext,
        result: Result<Vec<u8>, FetchError>,
    ) -> LoaderStep {
        if self.slots.get(index).map_or(true, Option::is_some) {
            tracing::debug!(index, "ignoring duplicate or out-of-range detail completion");
            return LoaderStep::Stale;
        }

        let summary = match result.and_then(|body| project_summary(&context.url, &body)) {
            Ok(summary) => summary,
            Err(e) => return self.fail(e),
        };

        self.slots[index] = Some(summary);
        self.completed += 1;

        if self.completed == self.slots.len() {
            self.phase = LoaderPhase::Completed;
            self.queue.clear();
            let entities: Vec<EntitySummary> = std::mem::take(&mut self.slots).into_iter().flatten().collect();
            tracing::debug!(entities = entities.len(), "listing load completed");
            self.completed = 0;
            return LoaderStep::Completed(entities);
        }

        let next = self.queue.release();
        LoaderStep::Dispatch(next.into_iter().map(|item| self.detail_request(item)).collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pokeapi::projection::fixtures::{bytes, detail, page};
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Records the level and message of every event emitted while installed.
    #[derive(Clone, Default)]
    pub(crate) struct CapturedEvents(Arc<Mutex<Vec<(tracing::Level, String)>>>);

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            if let Ok(mut events) = self.0.lock() {
                events.push((*event.metadata().level(), visitor.0));
            }
        }
    }

    impl CapturedEvents {
        pub(crate) fn run<R>(&self, f: impl FnOnce() -> R) -> R {
            let subscriber = tracing_subscriber::registry().with(self.clone());
            tracing::subscriber::with_default(subscriber, f)
        }

        pub(crate) fn warnings(&self) -> Vec<String> {
            self.0
                .lock()
                .map(|events| {
                    events
                        .iter()
                        .filter(|(level, _)| *level == tracing::Level::WARN)
                        .map(|(_, message)| message.clone())
                        .collect()
                })
                .unwrap_or_default()
        }
    }

    const DETAIL_1: &str = "https://pokeapi.co/api/v2/pokemon/1/";
    const DETAIL_4: &str = "https://pokeapi.co/api/v2/pokemon/4/";

    fn loader(max_in_flight: usize) -> ListingLoader {
        ListingLoader::new(Endpoint::default(), 151, max_in_flight)
    }

    fn page_ok(loader: &mut ListingLoader, urls: &[&str]) -> Vec<FetchRequest> {
        let start = loader.start();
        assert_eq!(start.len(), 1);
        assert_eq!(start[0].url, "https://pokeapi.co/api/v2/pokemon?limit=151");
        match loader.on_response(&start[0].context, Ok(bytes(&page(urls)))) {
            LoaderStep::Dispatch(requests) => requests,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn two_successful_details_complete_with_two_entries() {
        let mut loader = loader(0);
        let requests = page_ok(&mut loader, &[DETAIL_1, DETAIL_4]);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, DETAIL_1);

        // Arrival order is reversed; the result keeps page order.
        let step = loader.on_response(
            &requests[1].context,
            Ok(bytes(&detail(4, "charmander", &["fire"]))),
        );
        assert_eq!(step, LoaderStep::Dispatch(vec![]));
        assert_eq!(loader.progress(), (1, 2));

        let step = loader.on_response(
            &requests[0].context,
            Ok(bytes(&detail(1, "bulbasaur", &["grass", "poison"]))),
        );
        let LoaderStep::Completed(entities) = step else {
            panic!("expected completion, got {step:?}");
        };
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].name, "bulbasaur");
        assert_eq!(entities[0].categories, vec!["grass", "poison"]);
        assert_eq!(entities[1].id, 4);
        assert_eq!(entities[1].image_url.as_deref(), Some("https://sprites/4.png"));
        assert_eq!(loader.phase(), LoaderPhase::Completed);
    }

    #[test]
    fn one_failed_detail_fails_the_batch_and_logs_a_diagnostic() {
        let events = CapturedEvents::default();
        let mut loader = loader(0);

        let (failed, late) = events.run(|| {
            let requests = page_ok(&mut loader, &[DETAIL_1, DETAIL_4]);
            let failed = loader.on_response(
                &requests[0].context,
                Err(FetchError::NetworkFailure {
                    url: DETAIL_1.to_string(),
                    status: Some(500),
                    message: "boom".to_string(),
                }),
            );
            let late = loader.on_response(
                &requests[1].context,
                Ok(bytes(&detail(4, "charmander", &["fire"]))),
            );
            (failed, late)
        });

        assert!(matches!(failed, LoaderStep::Failed(FetchError::NetworkFailure { .. })));
        assert_eq!(late, LoaderStep::Stale);
        assert_eq!(loader.phase(), LoaderPhase::Failed);
        assert_eq!(loader.progress(), (0, 0));
        assert_eq!(events.warnings(), vec!["listing load aborted".to_string()]);
    }

    #[test]
    fn malformed_detail_fails_the_batch() {
        let mut loader = loader(0);
        let requests = page_ok(&mut loader, &[DETAIL_1]);
        let step = loader.on_response(&requests[0].context, Ok(b"not json".to_vec()));
        assert!(matches!(step, LoaderStep::Failed(FetchError::MalformedPayload { .. })));
    }

    #[test]
    fn failed_page_fails_the_batch() {
        let mut loader = loader(0);
        let start = loader.start();
        let step = loader.on_response(&start[0].context, Ok(b"{}".to_vec()));
        assert!(matches!(step, LoaderStep::Failed(_)));
    }

    #[test]
    fn empty_page_completes_immediately() {
        let mut loader = loader(0);
        let start = loader.start();
        let step = loader.on_response(&start[0].context, Ok(bytes(&page(&[]))));
        assert_eq!(step, LoaderStep::Completed(vec![]));
    }

    #[test]
    fn fan_out_respects_in_flight_cap() {
        let urls: Vec<String> = (1..=5).map(|i| format!("https://pokeapi.co/api/v2/pokemon/{i}/")).collect();
        let url_refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let mut loader = loader(2);
        let mut outstanding = page_ok(&mut loader, &url_refs);
        assert_eq!(outstanding.len(), 2);

        let mut done = 0;
        while let Some(request) = outstanding.pop() {
            let id = match request.context.kind {
                RequestKind::ListingDetail { index } => u32::try_from(index).unwrap_or(0) + 1,
                other => panic!("unexpected {other:?}"),
            };
            match loader.on_response(&request.context, Ok(bytes(&detail(id, "x", &["normal"])))) {
                LoaderStep::Dispatch(next) => {
                    assert!(next.len() <= 1);
                    outstanding.extend(next);
                    assert!(outstanding.len() <= 2);
                }
                LoaderStep::Completed(entities) => {
                    assert_eq!(entities.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
                }
                other => panic!("unexpected {other:?}"),
            }
            done += 1;
        }
        assert_eq!(done, 5);
        assert_eq!(loader.phase(), LoaderPhase::Completed);
    }

    #[test]
    fn restart_makes_previous_completions_stale() {
        let mut loader = loader(0);
        let old = page_ok(&mut loader, &[DETAIL_1]);
        let fresh = loader.start();
        assert_eq!(fresh[0].context.generation, old[0].context.generation + 1);

        let step = loader.on_response(&old[0].context, Ok(bytes(&detail(1, "bulbasaur", &["grass"]))));
        assert_eq!(step, LoaderStep::Stale);
        assert_eq!(loader.phase(), LoaderPhase::AwaitingPage);
    }

    #[test]
    fn cancel_turns_outstanding_completions_stale() {
        let mut loader = loader(1);
        let requests = page_ok(&mut loader, &[DETAIL_1, DETAIL_4]);
        loader.cancel();
        assert_eq!(loader.phase(), LoaderPhase::Cancelled);
        let step = loader.on_response(&requests[0].context, Ok(bytes(&detail(1, "bulbasaur", &["grass"]))));
        assert_eq!(step, LoaderStep::Stale);
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut loader = loader(0);
        let requests = page_ok(&mut loader, &[DETAIL_1, DETAIL_4]);
        let body = bytes(&detail(1, "bulbasaur", &["grass"]));
        assert_eq!(loader.on_response(&requests[0].context, Ok(body.clone())), LoaderStep::Dispatch(vec![]));
        assert_eq!(loader.on_response(&requests[0].context, Ok(body)), LoaderStep::Stale);
        assert_eq!(loader.progress(), (1, 2));
    }
}
