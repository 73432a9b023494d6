//! In-memory search sessions with single-flight paging.
//!
//! One session exists per active query. Every fetch appends to the session
//! cache, and the whole cache is re-filtered and re-sorted before each
//! publish. A session replaced by `start_query` may still finish its fetch,
//! but its result is dropped instead of published.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use repofeed_core::constants::{STARTING_PAGE_INDEX, scoped_query};
use repofeed_core::{Repo, SearchResult, SyncError, filter_and_sort};
use repofeed_remote::FetchClient;

use crate::latest_value::{ResultPublisher, ResultSubscription};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State owned by one query.
struct Session {
    id: u64,
    query: String,
    in_flight: AtomicBool,
    state: Mutex<SessionState>,
}

struct SessionState {
    /// Every repo fetched for this query, in arrival order, duplicates included.
    cache: Vec<Repo>,
    next_page: u32,
}

impl Session {
    fn new(id: u64, query: &str) -> Self {
        Self {
            id,
            query: query.to_owned(),
            in_flight: AtomicBool::new(false),
            state: Mutex::new(SessionState { cache: Vec::new(), next_page: STARTING_PAGE_INDEX }),
        }
    }
}

/// Holds a session's in-flight flag; clears it on drop.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).ok().map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Whether a successful fetch moves the page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Advance,
    Hold,
}

/// Fetches pages for one active query and republishes the filtered, sorted
/// view to every subscriber.
pub struct SearchCoordinator<C> {
    client: C,
    page_size: NonZeroU32,
    current: Mutex<Option<Arc<Session>>>,
    next_session_id: AtomicU64,
    publisher: ResultPublisher,
}

impl<C: FetchClient> SearchCoordinator<C> {
    #[must_use]
    pub fn new(client: C, page_size: NonZeroU32) -> Self {
        Self {
            client,
            page_size,
            current: Mutex::new(None),
            next_session_id: AtomicU64::new(1),
            publisher: ResultPublisher::new(),
        }
    }

    /// Replaces any active session with a fresh one for `query`, fetches the
    /// first page, and returns a subscription holding that first result.
    pub async fn start_query(&self, query: &str) -> ResultSubscription {
        let id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        let session = Arc::new(Session::new(id, query));
        let previous = lock(&self.current).replace(Arc::clone(&session));
        tracing::info!(
            session = id,
            query,
            superseded = previous.map(|s| s.id),
            "starting search session"
        );

        self.fetch_and_publish(&session, Cursor::Hold).await;
        self.publisher.subscribe()
    }

    /// Fetches the next page. Dropped if a fetch is already running.
    pub async fn request_more(&self, query: &str) {
        if let Some(session) = self.session_for(query) {
            self.fetch_and_publish(&session, Cursor::Advance).await;
        }
    }

    /// Re-attempts the page the last failed fetch asked for.
    ///
    /// Only a successful `request_more` moves the cursor, so this requests the
    /// same page as the last attempt and leaves the cursor where it is.
    /// Dropped if a fetch is already running.
    pub async fn retry(&self, query: &str) {
        if let Some(session) = self.session_for(query) {
            tracing::debug!(session = session.id, page = self.next_page_of(&session), "retrying page");
            self.fetch_and_publish(&session, Cursor::Hold).await;
        }
    }

    /// A new subscription to the result stream.
    #[must_use]
    pub fn subscribe(&self) -> ResultSubscription {
        self.publisher.subscribe()
    }

    /// The newest published result.
    #[must_use]
    pub fn latest(&self) -> Option<SearchResult> {
        self.publisher.latest()
    }

    /// Query of the active session.
    #[must_use]
    pub fn active_query(&self) -> Option<String> {
        lock(&self.current).as_ref().map(|s| s.query.clone())
    }

    /// Page the active session will request next.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        lock(&self.current).as_ref().map(|s| self.next_page_of(s))
    }

    /// Whether the active session has a fetch running.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        lock(&self.current).as_ref().is_some_and(|s| s.in_flight.load(Ordering::Acquire))
    }

    fn next_page_of(&self, session: &Session) -> u32 {
        lock(&session.state).next_page
    }

    fn session_for(&self, query: &str) -> Option<Arc<Session>> {
        match lock(&self.current).as_ref() {
            Some(session) if session.query == query => Some(Arc::clone(session)),
            Some(session) => {
                tracing::debug!(requested = query, active = %session.query, "ignoring request for inactive query");
                None
            },
            None => {
                tracing::debug!(requested = query, "no active search session");
                None
            },
        }
    }

    async fn fetch_and_publish(&self, session: &Arc<Session>, cursor: Cursor) {
        let Some(_guard) = InFlightGuard::acquire(&session.in_flight) else {
            tracing::debug!(session = session.id, "fetch already in flight, dropping request");
            return;
        };

        let page = self.next_page_of(session);
        tracing::debug!(session = session.id, page, "fetching search page");
        let response = self
            .client
            .search_repos(&scoped_query(&session.query), page, self.page_size.get())
            .await;

        let result = {
            let mut state = lock(&session.state);
            match response {
                Ok(fetched) => {
                    let received = fetched.items.len();
                    state.cache.extend(fetched.items);
                    if cursor == Cursor::Advance {
                        state.next_page = page.saturating_add(1);
                    }
                    tracing::debug!(session = session.id, page, received, cached = state.cache.len(), "page appended");
                    SearchResult::Success(filter_and_sort(&state.cache, &session.query))
                },
                Err(err) => {
                    let cause = SyncError::from(err);
                    tracing::warn!(session = session.id, page, kind = cause.kind(), error = %cause, "search fetch failed");
                    SearchResult::Failure(cause)
                },
            }
        };

        // Holding `current` across the check and the publish keeps a newer
        // session from publishing in between.
        let current = lock(&self.current);
        if current.as_ref().is_some_and(|c| Arc::ptr_eq(c, session)) {
            self.publisher.publish(result);
        } else {
            tracing::debug!(session = session.id, "discarding result of superseded session");
        }
    }
}
