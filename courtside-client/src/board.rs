//! Match board
//!
//! Composition of the pieces behind the match screen: the base paginated
//! list, the search overlay layered above it, and the follow toggles with
//! their narrow in-place patches. Whatever is "visible" is the overlay
//! while a search is active, the base list otherwise; the base list is
//! never torn down by searching.

use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use shared::models::Competition;
use shared::request::MatchFilter;

use crate::api::CourtsideApi;
use crate::http::HttpApi;
use crate::list::{ListController, ListState};
use crate::notify::NotifyHandle;
use crate::search::{SearchOverlay, SearchScope};
use crate::sources::MatchPageSource;
use crate::ClientConfig;

/// Anonymous sentinel for the user id
const ANONYMOUS: i64 = -1;

/// State and actions of the match screen
pub struct MatchBoard<H: HttpApi + 'static> {
    api: Arc<CourtsideApi<H>>,
    notify: NotifyHandle,
    base: ListController<MatchPageSource<H>>,
    overlay: Arc<SearchOverlay<MatchPageSource<H>>>,
    user_id: AtomicI64,
    scope: RwLock<SearchScope>,
}

impl<H: HttpApi + 'static> MatchBoard<H> {
    pub fn new(api: Arc<CourtsideApi<H>>, notify: NotifyHandle, config: &ClientConfig) -> Self {
        let base = ListController::new(MatchPageSource::new(api.clone()), notify.clone());
        let overlay = SearchOverlay::new(
            MatchPageSource::new(api.clone()),
            notify.clone(),
            config.search_debounce,
        );
        Self {
            api,
            notify,
            base,
            overlay,
            user_id: AtomicI64::new(ANONYMOUS),
            scope: RwLock::new(SearchScope::default()),
        }
    }

    /// Set the viewing user (or `None` for anonymous) and reload
    pub async fn set_user(&self, user_id: Option<i64>) {
        self.user_id
            .store(user_id.unwrap_or(ANONYMOUS), Ordering::SeqCst);
        self.base.load_first_page(self.base_filter()).await;
    }

    fn user_id(&self) -> i64 {
        self.user_id.load(Ordering::SeqCst)
    }

    fn scope(&self) -> SearchScope {
        *self.scope.read().expect("board lock poisoned")
    }

    fn base_filter(&self) -> MatchFilter {
        let scope = self.scope();
        MatchFilter {
            is_finished: scope.is_finished,
            user_id: self.user_id(),
            tag_list: Vec::new(),
            search_text: String::new(),
            filter_focus: scope.followed_only,
        }
    }

    /// Switch between running and finished matches
    ///
    /// Reloads the base list; an active search re-executes itself with the
    /// new scope after its debounce instead of reloading here, so the same
    /// toggle never issues two base reloads.
    pub async fn set_status(&self, is_finished: bool) {
        {
            let mut scope = self.scope.write().expect("board lock poisoned");
            if scope.is_finished == is_finished {
                return;
            }
            scope.is_finished = is_finished;
        }
        self.overlay.scope_changed(self.scope());
        self.base.load_first_page(self.base_filter()).await;
    }

    /// Switch between "all" and "only followed" views
    pub async fn set_followed_only(&self, followed_only: bool) {
        if followed_only && self.user_id() == ANONYMOUS {
            self.notify.error("Please log in first");
            return;
        }
        {
            let mut scope = self.scope.write().expect("board lock poisoned");
            if scope.followed_only == followed_only {
                return;
            }
            scope.followed_only = followed_only;
        }
        self.overlay.scope_changed(self.scope());
        self.base.load_first_page(self.base_filter()).await;
    }

    /// Trigger a search over the current scope
    pub async fn search(&self, keyword: &str, tag_ids: Vec<i64>) {
        self.overlay
            .activate(keyword, tag_ids, self.user_id(), self.scope())
            .await;
    }

    /// Drop the search, revealing the base list unchanged underneath
    pub async fn clear_search(&self) {
        self.overlay.deactivate().await;
    }

    /// Whether a search is layered over the base list
    pub fn is_searching(&self) -> bool {
        self.overlay.is_active()
    }

    /// The matches currently visible
    pub async fn visible(&self) -> Vec<Competition> {
        if self.overlay.is_active() {
            self.overlay.results().await
        } else {
            self.base.items().await
        }
    }

    /// Load the next page of whichever list is visible (infinite scroll)
    pub async fn load_more(&self) {
        if self.overlay.is_active() {
            self.overlay.load_next_page().await;
        } else {
            self.base.load_next_page().await;
        }
    }

    /// Reload the visible list from its first page
    pub async fn refresh(&self) {
        if self.overlay.is_active() {
            if let Some(active) = self.overlay.active() {
                self.overlay
                    .activate(active.keyword, active.tag_ids, self.user_id(), active.scope)
                    .await;
            }
        } else {
            self.base.load_first_page(self.base_filter()).await;
        }
    }

    /// Follow a match, patching its flag in place in both lists
    pub async fn follow(&self, match_id: i64) -> bool {
        let user_id = self.user_id();
        if user_id == ANONYMOUS {
            self.notify.error("Please log in first");
            return false;
        }

        match self.api.follow_competition(match_id, user_id).await {
            Ok(()) => {
                self.notify.success("Now following");
                self.patch_focus(match_id, true).await;
                true
            }
            Err(err) => {
                self.notify.error(&err.user_message());
                false
            }
        }
    }

    /// Unfollow a match; in the followed-only view the row disappears,
    /// elsewhere only its flag flips
    pub async fn unfollow(&self, match_id: i64) -> bool {
        let user_id = self.user_id();
        if user_id == ANONYMOUS {
            self.notify.error("Please log in first");
            return false;
        }

        match self.api.unfollow_competition(match_id, user_id).await {
            Ok(()) => {
                self.notify.success("No longer following");
                if self.scope().followed_only {
                    self.base.retain(|m| m.id != match_id).await;
                    self.overlay.controller().retain(|m| m.id != match_id).await;
                } else {
                    self.patch_focus(match_id, false).await;
                }
                true
            }
            Err(err) => {
                self.notify.error(&err.user_message());
                false
            }
        }
    }

    /// Whether a visible match is followed
    pub async fn is_followed(&self, match_id: i64) -> bool {
        self.visible()
            .await
            .iter()
            .find(|m| m.id == match_id)
            .is_some_and(|m| m.is_focus)
    }

    /// The base list controller
    pub fn base(&self) -> &ListController<MatchPageSource<H>> {
        &self.base
    }

    /// The search overlay
    pub fn overlay(&self) -> &Arc<SearchOverlay<MatchPageSource<H>>> {
        &self.overlay
    }

    pub async fn state(&self) -> ListState {
        if self.overlay.is_active() {
            self.overlay.state().await
        } else {
            self.base.state().await
        }
    }

    async fn patch_focus(&self, match_id: i64, followed: bool) {
        self.base
            .update_where(|m| m.id == match_id, |m| m.is_focus = followed)
            .await;
        self.overlay
            .controller()
            .update_where(|m| m.id == match_id, |m| m.is_focus = followed)
            .await;
    }
}
