//! Load controller
//!
//! Sequences submit and scroll triggers into paging client calls and turns
//! the outcomes into render, viewer and notification instructions.
//!
//! # State machine
//!
//! ```text
//!            submit(text)                   page ok, more left
//!   Idle ───────────────→ Fetching ─────────────────────────→ Ready
//!    ↑  submit("")          │  │  fetch failed                  │
//!    └──────────────────────┘  └──────────────────────────→ Ready
//!                              │                                │ scroll
//!                              │ empty page / total reached     ↓
//!                              └──────────────────────→ Exhausted
//! ```
//!
//! Submit is accepted in every state and always replaces the session.
//! Scroll triggers are acted on only in `Ready`.
//!
//! # Staleness
//!
//! A submit does not cancel an outstanding fetch. The session id captured
//! when the fetch was issued is compared with the current one when it
//! completes; results for a replaced session are dropped without touching
//! state or collaborators.
//!
//! # Cancellation
//!
//! Dropping a `submit` or `scroll` future mid-fetch puts a still-current
//! session back to `Ready`, with the unanswered page left to be fetched by
//! the next scroll.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use super::traits::{Notifier, Renderer, Viewer};
use super::types::{FailureReason, LoadState, Notification, Trigger, TriggerOutcome};
use crate::api::ImageResult;
use crate::paging::{FetchedPage, PagingClient, PagingError, QuerySession, SessionId};

#[derive(Default)]
struct ControllerState {
    phase: LoadState,
    session: Option<SessionId>,
}

/// What to tell collaborators once bookkeeping is done
struct Applied {
    exhausted: bool,
}

/// Owns the paging client and drives the collaborators
pub struct LoadController {
    client: PagingClient,
    renderer: Arc<dyn Renderer>,
    viewer: Arc<dyn Viewer>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ControllerState>,
}

impl LoadController {
    /// Create an idle controller
    #[must_use]
    pub fn new(
        client: PagingClient,
        renderer: Arc<dyn Renderer>,
        viewer: Arc<dyn Viewer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            renderer,
            viewer,
            notifier,
            state: Mutex::new(ControllerState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.lock().phase
    }

    /// Snapshot of the active session, if any
    #[must_use]
    pub fn session(&self) -> Option<QuerySession> {
        let has_session = self.lock().session.is_some();
        has_session.then(|| self.client.snapshot())
    }

    /// Whether a fetch for the active session is outstanding
    ///
    /// Scroll detectors may check this before raising a trigger; the
    /// controller guards against overlap on its own either way.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.client.is_fetching()
    }

    /// Items loaded in the active session
    #[must_use]
    pub fn loaded_count(&self) -> u64 {
        self.client.loaded_count()
    }

    #[must_use]
    pub const fn client(&self) -> &PagingClient {
        &self.client
    }

    /// Single entry point for all trigger sources
    pub async fn handle_trigger(&self, trigger: Trigger) -> TriggerOutcome {
        match trigger {
            Trigger::Submit(text) => self.submit(&text).await,
            Trigger::Proximity | Trigger::ScrollEnd => self.scroll().await,
        }
    }

    /// Start a new session for `text`, replacing any current one
    pub async fn submit(&self, text: &str) -> TriggerOutcome {
        let query = text.trim();
        self.renderer.render(&[], false);

        let session_id = {
            let mut state = self.lock();
            self.client.set_query(query);
            let id = self.client.reset_session();
            if query.is_empty() {
                state.phase = LoadState::Idle;
                state.session = None;
                None
            } else {
                state.phase = LoadState::Fetching;
                state.session = Some(id);
                Some(id)
            }
        };

        let Some(session_id) = session_id else {
            debug!("blank query submitted");
            self.notifier
                .notify(Notification::Failure(FailureReason::EmptyQuery));
            return TriggerOutcome::Rejected;
        };

        info!(session = %session_id, query, "search session started");

        let pending = Pending::new(&self.state, session_id);
        let result = self.client.fetch_next_page_for(session_id).await;
        pending.disarm();

        match result {
            Ok(page) if page.items.is_empty() => {
                if !self.finish_empty(&page) {
                    return TriggerOutcome::Discarded;
                }
                self.notifier
                    .notify(Notification::Failure(FailureReason::NoResults));
                TriggerOutcome::NoResults
            }
            Ok(page) => {
                let Some(applied) = self.apply_page(&page) else {
                    return TriggerOutcome::Discarded;
                };
                self.show(&page.items);
                self.notifier.notify(Notification::Success {
                    total: page.total_available,
                });
                TriggerOutcome::Loaded {
                    count: page.items.len(),
                    exhausted: applied.exhausted,
                }
            }
            Err(e) => {
                if !self.recover(session_id, &e) {
                    return TriggerOutcome::Discarded;
                }
                if !e.is_guard_violation() {
                    self.notifier
                        .notify(Notification::Failure(FailureReason::FetchFailed));
                }
                TriggerOutcome::Failed
            }
        }
    }

    /// Load the next page of the running session if it is `Ready`
    pub async fn scroll(&self) -> TriggerOutcome {
        let session_id = {
            let mut state = self.lock();
            if state.phase != LoadState::Ready || self.client.is_fetching() {
                return TriggerOutcome::Ignored;
            }
            let Some(id) = state.session else {
                return TriggerOutcome::Ignored;
            };
            state.phase = LoadState::Fetching;
            id
        };

        let pending = Pending::new(&self.state, session_id);
        let result = self.client.fetch_next_page_for(session_id).await;
        pending.disarm();

        match result {
            Ok(page) if page.items.is_empty() => {
                if !self.finish_empty(&page) {
                    return TriggerOutcome::Discarded;
                }
                self.notifier.notify(Notification::EndOfResults);
                TriggerOutcome::Exhausted
            }
            Ok(page) => {
                let Some(applied) = self.apply_page(&page) else {
                    return TriggerOutcome::Discarded;
                };
                self.show(&page.items);
                self.renderer.continue_scroll();
                if applied.exhausted {
                    self.notifier.notify(Notification::EndOfResults);
                }
                TriggerOutcome::Loaded {
                    count: page.items.len(),
                    exhausted: applied.exhausted,
                }
            }
            Err(e) => {
                if !self.recover(session_id, &e) {
                    return TriggerOutcome::Discarded;
                }
                TriggerOutcome::Failed
            }
        }
    }

    fn is_current(state: &ControllerState, session_id: SessionId) -> bool {
        state.session == Some(session_id)
    }

    /// Record a non-empty page; `None` if the page is stale
    fn apply_page(&self, page: &FetchedPage) -> Option<Applied> {
        let mut state = self.lock();
        if !Self::is_current(&state, page.session_id) {
            debug!(session = %page.session_id, "discarding page from replaced session");
            return None;
        }
        self.client.record_loaded(page.items.len());
        let exhausted = self.client.is_exhausted();
        state.phase = if exhausted {
            LoadState::Exhausted
        } else {
            LoadState::Ready
        };
        debug!(
            session = %page.session_id,
            page = page.page_index,
            loaded = self.client.loaded_count(),
            total = page.total_available,
            state = %state.phase,
            "page applied"
        );
        Some(Applied { exhausted })
    }

    /// Mark the session exhausted after an empty page; false if stale
    fn finish_empty(&self, page: &FetchedPage) -> bool {
        let mut state = self.lock();
        if !Self::is_current(&state, page.session_id) {
            debug!(session = %page.session_id, "discarding empty page from replaced session");
            return false;
        }
        state.phase = LoadState::Exhausted;
        true
    }

    /// Return to `Ready` after a failed fetch; false if stale
    fn recover(&self, session_id: SessionId, err: &PagingError) -> bool {
        let mut state = self.lock();
        if !Self::is_current(&state, session_id) {
            debug!(session = %session_id, error = %err, "ignoring failure from replaced session");
            return false;
        }
        if err.is_guard_violation() {
            error!(session = %session_id, error = %err, "paging guard rejected a fetch the controller issued");
        } else {
            warn!(session = %session_id, error = %err, "page fetch failed");
        }
        state.phase = LoadState::Ready;
        true
    }

    fn show(&self, items: &[ImageResult]) {
        self.renderer.render(items, true);
        self.viewer.refresh();
    }
}

/// Returns a current session to `Ready` if its fetch future is dropped
struct Pending<'a> {
    state: &'a Mutex<ControllerState>,
    session_id: SessionId,
    armed: bool,
}

impl<'a> Pending<'a> {
    const fn new(state: &'a Mutex<ControllerState>, session_id: SessionId) -> Self {
        Self {
            state,
            session_id,
            armed: true,
        }
    }

    /// The fetch finished; its outcome is handled by the caller
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if LoadController::is_current(&state, self.session_id) && state.phase == LoadState::Fetching {
            debug!(session = %self.session_id, "fetch cancelled, session back to ready");
            state.phase = LoadState::Ready;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SearchPage, SearchTransport, TransportError};
    use crate::paging::{DEFAULT_PAGE_SIZE, FIRST_PAGE};
    use crate::testing::{Event, GatedTransport, Recorder, ScriptedTransport, images, wait_for_calls};

    fn controller(transport: Arc<dyn SearchTransport>) -> (LoadController, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let controller = LoadController::new(
            PagingClient::new(transport, DEFAULT_PAGE_SIZE),
            recorder.clone(),
            recorder.clone(),
            recorder.clone(),
        );
        (controller, recorder)
    }

    fn scripted(pages: Vec<Result<SearchPage, TransportError>>) -> Arc<ScriptedTransport> {
        Arc::new(ScriptedTransport::new(pages))
    }

    fn server_error() -> TransportError {
        TransportError::Status {
            status: 500,
            body: "internal".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_first_page_ready() {
        let transport = scripted(vec![Ok(SearchPage::new(images(40), 120))]);
        let (controller, recorder) = controller(transport.clone());

        let outcome = controller.handle_trigger(Trigger::Submit("cats".into())).await;

        assert_eq!(
            outcome,
            TriggerOutcome::Loaded {
                count: 40,
                exhausted: false
            }
        );
        assert_eq!(controller.state(), LoadState::Ready);
        assert_eq!(controller.loaded_count(), 40);
        assert_eq!(
            recorder.events(),
            vec![
                Event::Render {
                    count: 0,
                    append: false
                },
                Event::Render {
                    count: 40,
                    append: true
                },
                Event::Refresh,
                Event::Notify(Notification::Success { total: 120 }),
            ]
        );
        assert_eq!(transport.calls(), vec![("cats".to_string(), FIRST_PAGE, 40)]);
    }

    #[tokio::test]
    async fn test_blank_submit_never_fetches() {
        let transport = scripted(Vec::new());
        let (controller, recorder) = controller(transport.clone());

        let outcome = controller.handle_trigger(Trigger::Submit("   ".into())).await;

        assert_eq!(outcome, TriggerOutcome::Rejected);
        assert_eq!(controller.state(), LoadState::Idle);
        assert!(controller.session().is_none());
        assert!(transport.calls().is_empty());
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Failure(FailureReason::EmptyQuery)]
        );
    }

    #[tokio::test]
    async fn test_submit_without_results() {
        let transport = scripted(vec![Ok(SearchPage::new(Vec::new(), 0))]);
        let (controller, recorder) = controller(transport);

        let outcome = controller.handle_trigger(Trigger::Submit("xyzzy".into())).await;

        assert_eq!(outcome, TriggerOutcome::NoResults);
        assert_eq!(controller.state(), LoadState::Exhausted);
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Failure(FailureReason::NoResults)]
        );
    }

    #[tokio::test]
    async fn test_submit_exhaustion_is_silent() {
        let transport = scripted(vec![Ok(SearchPage::new(images(12), 12))]);
        let (controller, recorder) = controller(transport);

        let outcome = controller.handle_trigger(Trigger::Submit("rare".into())).await;

        assert_eq!(
            outcome,
            TriggerOutcome::Loaded {
                count: 12,
                exhausted: true
            }
        );
        assert_eq!(controller.state(), LoadState::Exhausted);
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Success { total: 12 }]
        );
    }

    #[tokio::test]
    async fn test_submit_fetch_failure_reports_and_stays_ready() {
        let transport = scripted(vec![Err(server_error()), Ok(SearchPage::new(images(40), 80))]);
        let (controller, recorder) = controller(transport.clone());

        let outcome = controller.handle_trigger(Trigger::Submit("cats".into())).await;
        assert_eq!(outcome, TriggerOutcome::Failed);
        assert_eq!(controller.state(), LoadState::Ready);
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Failure(FailureReason::FetchFailed)]
        );

        // User keeps scrolling: the same first page is requested again
        let outcome = controller.handle_trigger(Trigger::ScrollEnd).await;
        assert_eq!(
            outcome,
            TriggerOutcome::Loaded {
                count: 40,
                exhausted: false
            }
        );
        let pages: Vec<u32> = transport.calls().iter().map(|(_, p, _)| *p).collect();
        assert_eq!(pages, vec![1, 1]);
    }

    #[tokio::test]
    async fn test_scroll_reaches_end_of_results() {
        let transport = scripted(vec![
            Ok(SearchPage::new(images(40), 100)),
            Ok(SearchPage::new(images(40), 100)),
            Ok(SearchPage::new(images(20), 100)),
        ]);
        let (controller, recorder) = controller(transport);

        controller.handle_trigger(Trigger::Submit("cats".into())).await;
        controller.handle_trigger(Trigger::Proximity).await;
        assert_eq!(controller.loaded_count(), 80);
        assert_eq!(controller.state(), LoadState::Ready);
        recorder.clear();

        let outcome = controller.handle_trigger(Trigger::ScrollEnd).await;

        assert_eq!(
            outcome,
            TriggerOutcome::Loaded {
                count: 20,
                exhausted: true
            }
        );
        assert_eq!(controller.loaded_count(), 100);
        assert_eq!(controller.state(), LoadState::Exhausted);
        assert_eq!(
            recorder.events(),
            vec![
                Event::Render {
                    count: 20,
                    append: true
                },
                Event::Refresh,
                Event::ScrollHint,
                Event::Notify(Notification::EndOfResults),
            ]
        );
    }

    #[tokio::test]
    async fn test_scroll_empty_page_exhausts() {
        let transport = scripted(vec![
            Ok(SearchPage::new(images(40), 500)),
            Ok(SearchPage::new(Vec::new(), 500)),
        ]);
        let (controller, recorder) = controller(transport);

        controller.handle_trigger(Trigger::Submit("cats".into())).await;
        recorder.clear();
        let outcome = controller.handle_trigger(Trigger::Proximity).await;

        assert_eq!(outcome, TriggerOutcome::Exhausted);
        assert_eq!(controller.state(), LoadState::Exhausted);
        assert_eq!(recorder.events(), vec![Event::Notify(Notification::EndOfResults)]);
    }

    #[tokio::test]
    async fn test_scroll_failure_is_quiet() {
        let transport = scripted(vec![Ok(SearchPage::new(images(40), 500)), Err(server_error())]);
        let (controller, recorder) = controller(transport);

        controller.handle_trigger(Trigger::Submit("cats".into())).await;
        recorder.clear();
        let outcome = controller.handle_trigger(Trigger::ScrollEnd).await;

        assert_eq!(outcome, TriggerOutcome::Failed);
        assert_eq!(controller.state(), LoadState::Ready);
        assert!(recorder.events().is_empty());
        assert_eq!(controller.client().page_index(), FIRST_PAGE + 1);
    }

    #[tokio::test]
    async fn test_exhausted_ignores_scroll() {
        let transport = scripted(vec![Ok(SearchPage::new(images(5), 5))]);
        let (controller, recorder) = controller(transport.clone());

        controller.handle_trigger(Trigger::Submit("cats".into())).await;
        let before = controller.session();
        recorder.clear();

        for _ in 0..5 {
            let outcome = controller.handle_trigger(Trigger::ScrollEnd).await;
            assert_eq!(outcome, TriggerOutcome::Ignored);
        }

        assert_eq!(transport.calls().len(), 1);
        assert_eq!(controller.session(), before);
        assert_eq!(controller.state(), LoadState::Exhausted);
        assert!(recorder.events().is_empty());
    }

    #[tokio::test]
    async fn test_scroll_without_session_is_ignored() {
        let transport = scripted(Vec::new());
        let (controller, _recorder) = controller(transport.clone());

        let outcome = controller.handle_trigger(Trigger::Proximity).await;

        assert_eq!(outcome, TriggerOutcome::Ignored);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scroll_while_fetching_is_dropped() {
        let (transport, mut gates) = GatedTransport::new(2);
        let transport = Arc::new(transport);
        let (controller, _recorder) = controller(transport.clone());
        let controller = Arc::new(controller);

        gates
            .remove(0)
            .send(Ok(SearchPage::new(images(40), 200)))
            .unwrap();
        controller.handle_trigger(Trigger::Submit("cats".into())).await;

        let scroll = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.handle_trigger(Trigger::ScrollEnd).await }
        });
        wait_for_calls(&transport, 2).await;
        assert_eq!(controller.state(), LoadState::Fetching);

        let dropped = controller.handle_trigger(Trigger::Proximity).await;
        assert_eq!(dropped, TriggerOutcome::Ignored);
        assert_eq!(transport.calls().len(), 2);

        gates
            .remove(0)
            .send(Ok(SearchPage::new(images(40), 200)))
            .unwrap();
        let outcome = scroll.await.unwrap();
        assert_eq!(
            outcome,
            TriggerOutcome::Loaded {
                count: 40,
                exhausted: false
            }
        );
        assert_eq!(controller.loaded_count(), 80);
    }

    #[tokio::test]
    async fn test_cancelled_scroll_returns_to_ready() {
        let (transport, mut gates) = GatedTransport::new(3);
        let transport = Arc::new(transport);
        let (controller, recorder) = controller(transport.clone());
        let controller = Arc::new(controller);

        gates
            .remove(0)
            .send(Ok(SearchPage::new(images(40), 200)))
            .unwrap();
        controller.handle_trigger(Trigger::Submit("cats".into())).await;

        let scroll = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.handle_trigger(Trigger::ScrollEnd).await }
        });
        wait_for_calls(&transport, 2).await;
        scroll.abort();
        let _ = scroll.await;

        assert!(!controller.is_fetching());
        assert_eq!(controller.state(), LoadState::Ready);

        gates
            .remove(1)
            .send(Ok(SearchPage::new(images(40), 200)))
            .unwrap();
        let outcome = controller.handle_trigger(Trigger::ScrollEnd).await;

        assert_eq!(
            outcome,
            TriggerOutcome::Loaded {
                count: 40,
                exhausted: false
            }
        );
        assert_eq!(transport.calls()[2], ("cats".to_string(), FIRST_PAGE + 1, 40));
        assert_eq!(controller.loaded_count(), 80);
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Success { total: 200 }]
        );
    }

    #[tokio::test]
    async fn test_cancelled_submit_leaves_first_page_pending() {
        let (transport, mut gates) = GatedTransport::new(2);
        let transport = Arc::new(transport);
        let (controller, _recorder) = controller(transport.clone());
        let controller = Arc::new(controller);

        let submit = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.handle_trigger(Trigger::Submit("cats".into())).await }
        });
        wait_for_calls(&transport, 1).await;
        submit.abort();
        let _ = submit.await;

        assert_eq!(controller.state(), LoadState::Ready);
        assert_eq!(controller.session().unwrap().page_index, FIRST_PAGE);

        gates
            .remove(1)
            .send(Ok(SearchPage::new(images(40), 120)))
            .unwrap();
        let outcome = controller.handle_trigger(Trigger::Proximity).await;

        assert!(matches!(outcome, TriggerOutcome::Loaded { count: 40, .. }));
        assert_eq!(transport.calls()[1].1, FIRST_PAGE);
    }

    #[tokio::test]
    async fn test_cancelled_stale_fetch_leaves_new_session_alone() {
        let (transport, _gates) = GatedTransport::new(2);
        let transport = Arc::new(transport);
        let (controller, _recorder) = controller(transport.clone());
        let controller = Arc::new(controller);

        let cats = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.handle_trigger(Trigger::Submit("cats".into())).await }
        });
        wait_for_calls(&transport, 1).await;
        let dogs = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.handle_trigger(Trigger::Submit("dogs".into())).await }
        });
        wait_for_calls(&transport, 2).await;

        cats.abort();
        let _ = cats.await;

        assert_eq!(controller.state(), LoadState::Fetching);
        assert!(controller.is_fetching());
        dogs.abort();
        let _ = dogs.await;
    }

    #[tokio::test]
    async fn test_new_submit_discards_stale_page() {
        let (transport, mut gates) = GatedTransport::new(2);
        let transport = Arc::new(transport);
        let (controller, recorder) = controller(transport.clone());
        let controller = Arc::new(controller);

        let cats = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.handle_trigger(Trigger::Submit("cats".into())).await }
        });
        wait_for_calls(&transport, 1).await;

        let dogs = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.handle_trigger(Trigger::Submit("dogs".into())).await }
        });
        wait_for_calls(&transport, 2).await;

        let cats_gate = gates.remove(0);
        let dogs_gate = gates.remove(0);

        dogs_gate
            .send(Ok(SearchPage::new(images(40), 300)))
            .unwrap();
        let dogs_outcome = dogs.await.unwrap();
        assert_eq!(
            dogs_outcome,
            TriggerOutcome::Loaded {
                count: 40,
                exhausted: false
            }
        );

        cats_gate
            .send(Ok(SearchPage::new(images(40), 120)))
            .unwrap();
        let cats_outcome = cats.await.unwrap();
        assert_eq!(cats_outcome, TriggerOutcome::Discarded);

        let session = controller.session().unwrap();
        assert_eq!(session.query, "dogs");
        assert_eq!(session.page_index, FIRST_PAGE + 1);
        assert_eq!(session.loaded_count, 40);
        assert_eq!(controller.state(), LoadState::Ready);
        assert_eq!(
            transport.calls(),
            vec![
                ("cats".to_string(), FIRST_PAGE, 40),
                ("dogs".to_string(), FIRST_PAGE, 40),
            ]
        );
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Success { total: 300 }]
        );
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_disturb_new_session() {
        let (transport, mut gates) = GatedTransport::new(2);
        let transport = Arc::new(transport);
        let (controller, recorder) = controller(transport.clone());
        let controller = Arc::new(controller);

        let cats = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.handle_trigger(Trigger::Submit("cats".into())).await }
        });
        wait_for_calls(&transport, 1).await;

        let dogs = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.handle_trigger(Trigger::Submit("dogs".into())).await }
        });
        wait_for_calls(&transport, 2).await;

        let cats_gate = gates.remove(0);
        cats_gate.send(Err(server_error())).unwrap();
        assert_eq!(cats.await.unwrap(), TriggerOutcome::Discarded);
        assert_eq!(controller.state(), LoadState::Fetching);

        gates
            .remove(0)
            .send(Ok(SearchPage::new(images(10), 10)))
            .unwrap();
        dogs.await.unwrap();
        assert_eq!(controller.state(), LoadState::Exhausted);
        assert!(
            !recorder
                .notifications()
                .contains(&Notification::Failure(FailureReason::FetchFailed))
        );
    }

    #[tokio::test]
    async fn test_resubmit_after_exhaustion_starts_fresh() {
        let transport = scripted(vec![
            Ok(SearchPage::new(images(3), 3)),
            Ok(SearchPage::new(images(40), 90)),
        ]);
        let (controller, _recorder) = controller(transport.clone());

        controller.handle_trigger(Trigger::Submit("cats".into())).await;
        assert_eq!(controller.state(), LoadState::Exhausted);
        let old = controller.session().unwrap().id;

        controller.handle_trigger(Trigger::Submit("cats".into())).await;
        let session = controller.session().unwrap();

        assert!(session.id > old);
        assert_eq!(controller.state(), LoadState::Ready);
        assert_eq!(session.loaded_count, 40);
        assert!(!session.is_exhausted);
        let pages: Vec<u32> = transport.calls().iter().map(|(_, p, _)| *p).collect();
        assert_eq!(pages, vec![1, 1]);
    }

    #[tokio::test]
    async fn test_blank_submit_discards_running_session() {
        let transport = scripted(vec![Ok(SearchPage::new(images(40), 400))]);
        let (controller, _recorder) = controller(transport.clone());

        controller.handle_trigger(Trigger::Submit("cats".into())).await;
        controller.handle_trigger(Trigger::Submit(String::new())).await;

        assert_eq!(controller.state(), LoadState::Idle);
        assert_eq!(
            controller.handle_trigger(Trigger::ScrollEnd).await,
            TriggerOutcome::Ignored
        );
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_page_index_counts_successes_only() {
        let transport = scripted(vec![
            Ok(SearchPage::new(images(40), 400)),
            Err(server_error()),
            Ok(SearchPage::new(images(40), 400)),
            Err(server_error()),
            Err(server_error()),
            Ok(SearchPage::new(images(40), 400)),
        ]);
        let (controller, _recorder) = controller(transport);

        controller.handle_trigger(Trigger::Submit("cats".into())).await;
        for _ in 0..5 {
            controller.handle_trigger(Trigger::ScrollEnd).await;
        }

        let session = controller.session().unwrap();
        assert_eq!(session.page_index, FIRST_PAGE + 3);
        assert_eq!(session.loaded_count, 120);
    }
}
