//! Paginated list controller
//!
//! One controller owns one growing ordered collection: the match list, the
//! forum post list, the report table, and the search overlay each hold
//! their own instance. Fetches within a controller are serialized by an
//! in-flight flag (a second trigger is dropped, not queued), and a filter
//! reset bumps a generation counter so that a completion for a superseded
//! request is discarded instead of applied.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use shared::models::{Comment, Competition, Post, Report, Tag};

use crate::ClientResult;
use crate::notify::NotifyHandle;

/// Anything a controller can hold must expose a stable id for
/// de-duplication when a cursor page is replayed.
pub trait Entity {
    fn entity_id(&self) -> i64;
}

impl Entity for Competition {
    fn entity_id(&self) -> i64 {
        self.id
    }
}

impl Entity for Post {
    fn entity_id(&self) -> i64 {
        self.post_id
    }
}

impl Entity for Comment {
    fn entity_id(&self) -> i64 {
        self.comment_id
    }
}

impl Entity for Report {
    fn entity_id(&self) -> i64 {
        self.report_id
    }
}

impl Entity for Tag {
    fn entity_id(&self) -> i64 {
        self.id
    }
}

/// One fetched page
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Whether the source believes another page exists. The controller
    /// additionally stops when a page comes back empty.
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_more: bool) -> Self {
        Self { items, has_more }
    }

    /// An exhausted page
    pub fn end() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
        }
    }
}

/// What the controller asks a source for
///
/// Cursor-style endpoints derive their cursor from `last` (the tail of the
/// loaded collection); page-style endpoints use the 1-based `index`.
#[derive(Debug, Clone)]
pub struct PageRequest<T> {
    pub index: u32,
    pub last: Option<T>,
}

impl<T> PageRequest<T> {
    /// Request for the first page of a fresh collection
    pub fn first() -> Self {
        Self {
            index: 1,
            last: None,
        }
    }
}

/// A paginated remote collection
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Entity + Clone + Send + Sync + 'static;
    type Filter: Clone + Send + Sync + 'static;

    async fn fetch(
        &self,
        filter: &Self::Filter,
        request: PageRequest<Self::Item>,
    ) -> ClientResult<Page<Self::Item>>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for std::sync::Arc<S> {
    type Item = S::Item;
    type Filter = S::Filter;

    async fn fetch(
        &self,
        filter: &Self::Filter,
        request: PageRequest<Self::Item>,
    ) -> ClientResult<Page<Self::Item>> {
        (**self).fetch(filter, request).await
    }
}

/// Controller lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// Nothing requested yet
    Idle,
    /// First page in flight
    LoadingFirst,
    /// Loaded, more pages may exist
    Ready,
    /// Follow-up page in flight
    LoadingMore,
    /// No further pages until a filter reset
    Exhausted,
}

struct Inner<S: PageSource> {
    items: Vec<S::Item>,
    filter: Option<S::Filter>,
    state: ListState,
    has_more: bool,
    pages_loaded: u32,
}

/// Paginated list controller
pub struct ListController<S: PageSource> {
    source: S,
    notify: NotifyHandle,
    inner: RwLock<Inner<S>>,
    in_flight: AtomicBool,
    generation: AtomicU64,
}

/// Clears the in-flight flag on every exit path of `load_next_page`.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: PageSource> ListController<S> {
    pub fn new(source: S, notify: NotifyHandle) -> Self {
        Self {
            source,
            notify,
            inner: RwLock::new(Inner {
                items: Vec::new(),
                filter: None,
                state: ListState::Idle,
                has_more: true,
                pages_loaded: 0,
            }),
            in_flight: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Clear the collection, reset the cursor and fetch the first page
    ///
    /// Replaces the collection wholesale on success. An explicit
    /// out-of-range answer (or any other failure) leaves the list empty,
    /// fail-closed, with a user-facing notification.
    pub async fn load_first_page(&self, filter: S::Filter) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut inner = self.inner.write().await;
            inner.items.clear();
            inner.filter = Some(filter.clone());
            inner.state = ListState::LoadingFirst;
            inner.has_more = true;
            inner.pages_loaded = 0;
        }

        let result = self.source.fetch(&filter, PageRequest::first()).await;

        let mut inner = self.inner.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            // A newer reset owns the collection now; drop this page.
            return;
        }

        match result {
            Ok(page) => {
                let non_empty = !page.items.is_empty();
                inner.items = page.items;
                inner.pages_loaded = 1;
                inner.has_more = page.has_more && non_empty;
                inner.state = if inner.has_more {
                    ListState::Ready
                } else {
                    ListState::Exhausted
                };
            }
            Err(err) => {
                inner.items.clear();
                inner.has_more = false;
                inner.state = ListState::Exhausted;
                self.notify.error(&err.user_message());
            }
        }
    }

    /// Fetch and append the next page
    ///
    /// No-op when a fetch is already in flight, the collection is
    /// exhausted, or it is empty (no cursor can be derived). A
    /// viewport-intersection trigger may call this repeatedly; the
    /// in-flight flag makes that idempotent. Any failure stops further
    /// paging rather than retrying.
    pub async fn load_next_page(&self) {
        {
            let inner = self.inner.read().await;
            if inner.state != ListState::Ready || !inner.has_more || inner.items.is_empty() {
                return;
            }
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let (generation, filter, request) = {
            let mut inner = self.inner.write().await;
            // Re-check: a reset may have slipped in before the flag was taken.
            if inner.state != ListState::Ready || !inner.has_more || inner.items.is_empty() {
                return;
            }
            let Some(filter) = inner.filter.clone() else {
                return;
            };
            inner.state = ListState::LoadingMore;
            let request = PageRequest {
                index: inner.pages_loaded + 1,
                last: inner.items.last().cloned(),
            };
            (self.generation.load(Ordering::SeqCst), filter, request)
        };

        let result = self.source.fetch(&filter, request).await;

        let mut inner = self.inner.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            // Superseded by a reset while in flight; the reset already
            // rewrote the state.
            return;
        }

        match result {
            Ok(page) => {
                let source_has_more = page.has_more;
                let seen: HashSet<i64> = inner.items.iter().map(Entity::entity_id).collect();
                let fresh: Vec<S::Item> = page
                    .items
                    .into_iter()
                    .filter(|item| !seen.contains(&item.entity_id()))
                    .collect();
                let got_any = !fresh.is_empty();
                inner.items.extend(fresh);
                inner.pages_loaded += 1;
                inner.has_more = source_has_more && got_any;
                inner.state = if inner.has_more {
                    ListState::Ready
                } else {
                    ListState::Exhausted
                };
            }
            Err(err) => {
                inner.has_more = false;
                inner.state = ListState::Exhausted;
                if err.is_out_of_range() {
                    tracing::debug!("Next page past the end, stopping");
                } else {
                    self.notify.error(&err.user_message());
                }
            }
        }
    }

    /// Reload the first page with the current filter
    pub async fn refresh(&self) {
        let filter = self.inner.read().await.filter.clone();
        if let Some(filter) = filter {
            self.load_first_page(filter).await;
        }
    }

    /// Drop all loaded state without fetching
    pub async fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.write().await;
        inner.items.clear();
        inner.filter = None;
        inner.state = ListState::Idle;
        inner.has_more = true;
        inner.pages_loaded = 0;
    }

    /// Snapshot of the loaded collection
    pub async fn items(&self) -> Vec<S::Item> {
        self.inner.read().await.items.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.items.is_empty()
    }

    pub async fn state(&self) -> ListState {
        self.inner.read().await.state
    }

    pub async fn has_more(&self) -> bool {
        self.inner.read().await.has_more
    }

    /// Whether a follow-up fetch is currently in flight
    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Current filter, if a first page was requested
    pub async fn filter(&self) -> Option<S::Filter> {
        self.inner.read().await.filter.clone()
    }

    /// Narrow optimistic patch: mutate matching items in place, without a
    /// refetch (e.g. toggling one match's follow flag)
    pub async fn update_where<P, F>(&self, mut pred: P, mut apply: F) -> usize
    where
        P: FnMut(&S::Item) -> bool,
        F: FnMut(&mut S::Item),
    {
        let mut inner = self.inner.write().await;
        let mut touched = 0;
        for item in inner.items.iter_mut().filter(|item| pred(item)) {
            apply(item);
            touched += 1;
        }
        touched
    }

    /// Narrow optimistic removal (e.g. a deleted post), without a refetch
    pub async fn retain<P>(&self, pred: P)
    where
        P: FnMut(&S::Item) -> bool,
    {
        self.inner.write().await.items.retain(pred);
    }
}
