//! Search overlay and tag typeahead
//!
//! Searching layers a second list over the base one without tearing the
//! base down: the overlay snapshots the filter values at trigger time, so
//! edits to the live inputs change nothing until the user searches again.
//! Overlapping lookups are resolved by request-id comparison, never by
//! timing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use shared::models::{Tag, TagKind};
use shared::request::MatchFilter;

use crate::api::CourtsideApi;
use crate::http::HttpApi;
use crate::list::{ListController, ListState, PageSource};
use crate::notify::NotifyHandle;

/// The list-scope toggles that live outside the search inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchScope {
    /// Finished matches instead of upcoming/running ones
    pub is_finished: bool,
    /// Restrict to the user's followed set
    pub followed_only: bool,
}

/// The snapshotted search parameters in effect
#[derive(Debug, Clone)]
pub struct ActiveSearch {
    pub keyword: String,
    pub tag_ids: Vec<i64>,
    pub user_id: i64,
    pub scope: SearchScope,
}

impl ActiveSearch {
    fn filter(&self) -> MatchFilter {
        MatchFilter {
            is_finished: self.scope.is_finished,
            user_id: self.user_id,
            tag_list: self.tag_ids.clone(),
            search_text: self.keyword.clone(),
            filter_focus: self.scope.followed_only,
        }
    }
}

/// Collapses a burst of triggers into one delayed run
struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    fn schedule<F>(&self, run: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let previous = self
            .pending
            .lock()
            .expect("debounce lock poisoned")
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => run.await,
            }
        });
    }

    fn cancel(&self) {
        if let Some(token) = self.pending.lock().expect("debounce lock poisoned").take() {
            token.cancel();
        }
    }
}

/// Search-mode list layered over the base match list
///
/// Owns an independent [`ListController`]; the base list keeps existing
/// (and keeps its pagination state) underneath while a search is active,
/// it just is not rendered. Scope/status toggles while searching re-run
/// the snapshotted search after a short debounce; the controller's reset
/// generation discards whichever of the competing responses is stale.
pub struct SearchOverlay<S: PageSource<Filter = MatchFilter>> {
    controller: ListController<S>,
    active: RwLock<Option<ActiveSearch>>,
    debouncer: Debouncer,
    this: Weak<Self>,
}

impl<S> SearchOverlay<S>
where
    S: PageSource<Filter = MatchFilter> + 'static,
{
    pub fn new(source: S, notify: NotifyHandle, debounce: Duration) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            controller: ListController::new(source, notify),
            active: RwLock::new(None),
            debouncer: Debouncer::new(debounce),
            this: this.clone(),
        })
    }

    /// Whether a search is currently layered over the base list
    pub fn is_active(&self) -> bool {
        self.active.read().expect("overlay lock poisoned").is_some()
    }

    /// The snapshotted parameters, if a search is active
    pub fn active(&self) -> Option<ActiveSearch> {
        self.active.read().expect("overlay lock poisoned").clone()
    }

    /// Trigger a search: snapshot the live inputs and load the first page
    pub async fn activate(
        &self,
        keyword: impl Into<String>,
        tag_ids: Vec<i64>,
        user_id: i64,
        scope: SearchScope,
    ) {
        let snapshot = ActiveSearch {
            keyword: keyword.into().trim().to_string(),
            tag_ids,
            user_id,
            scope,
        };
        let filter = snapshot.filter();
        *self.active.write().expect("overlay lock poisoned") = Some(snapshot);
        self.controller.load_first_page(filter).await;
    }

    /// Clear filters: discard the overlay, revealing the untouched base list
    pub async fn deactivate(&self) {
        self.debouncer.cancel();
        *self.active.write().expect("overlay lock poisoned") = None;
        self.controller.clear().await;
    }

    /// Re-run the active search under a changed scope, debounced
    ///
    /// No-op while inactive: the base list handles its own reload for the
    /// same toggle, and the overlay must not duplicate it.
    pub fn scope_changed(&self, scope: SearchScope) {
        let snapshot = {
            let mut active = self.active.write().expect("overlay lock poisoned");
            let Some(active) = active.as_mut() else {
                return;
            };
            active.scope = scope;
            active.clone()
        };

        let Some(overlay) = self.this.upgrade() else {
            return;
        };
        self.debouncer.schedule(async move {
            overlay.controller.load_first_page(snapshot.filter()).await;
        });
    }

    /// Next page of search results (no-op while inactive)
    pub async fn load_next_page(&self) {
        if self.is_active() {
            self.controller.load_next_page().await;
        }
    }

    /// Snapshot of the search results
    pub async fn results(&self) -> Vec<S::Item> {
        self.controller.items().await
    }

    pub async fn state(&self) -> ListState {
        self.controller.state().await
    }

    /// The overlay's own list controller (for patch/retain on results)
    pub fn controller(&self) -> &ListController<S> {
        &self.controller
    }
}

/// Which tag usage a selector offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagScope {
    All,
    CompetitionOnly,
    PostOnly,
}

/// Prefix typeahead over tags
///
/// Rapid re-typing triggers overlapping lookups; every call takes a
/// ticket from a monotonic counter and a completion that is no longer the
/// newest is discarded, so results can never go backwards in time.
pub struct TagSearcher<H: HttpApi> {
    api: Arc<CourtsideApi<H>>,
    scope: TagScope,
    kind: RwLock<Option<TagKind>>,
    seq: AtomicU64,
    results: RwLock<Vec<Tag>>,
}

impl<H: HttpApi> TagSearcher<H> {
    pub fn new(api: Arc<CourtsideApi<H>>, scope: TagScope) -> Self {
        Self {
            api,
            scope,
            kind: RwLock::new(None),
            seq: AtomicU64::new(0),
            results: RwLock::new(Vec::new()),
        }
    }

    /// Narrow the typeahead to one tag kind (`None` = all kinds)
    pub fn set_kind(&self, kind: Option<TagKind>) {
        *self.kind.write().expect("typeahead lock poisoned") = kind;
    }

    /// Run a prefix lookup; stale completions leave the results untouched
    pub async fn search(&self, prefix: &str) {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let kind = *self.kind.read().expect("typeahead lock poisoned");

        let result = self.api.search_tags(prefix, kind).await;

        if self.seq.load(Ordering::SeqCst) != ticket {
            tracing::trace!(prefix, "Typeahead response superseded, dropped");
            return;
        }

        match result {
            Ok(tags) => {
                let tags: Vec<Tag> = tags
                    .into_iter()
                    .filter(|tag| match self.scope {
                        TagScope::All => true,
                        TagScope::CompetitionOnly => tag.is_competition_tag,
                        TagScope::PostOnly => tag.is_post_tag,
                    })
                    .collect();
                *self.results.write().expect("typeahead lock poisoned") = tags;
            }
            Err(err) => {
                tracing::warn!(prefix, %err, "Tag lookup failed");
            }
        }
    }

    /// Current matches
    pub fn results(&self) -> Vec<Tag> {
        self.results.read().expect("typeahead lock poisoned").clone()
    }
}
