//! Concrete page sources
//!
//! Adapters between the remote list endpoints and the generic
//! [`ListController`](crate::list::ListController): the match list pages by
//! cursor derived from the tail item, the post and report lists by 1-based
//! page number.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use shared::Cursor;
use shared::models::{Competition, Report};
use shared::request::{MatchFilter, PageQuery, PostFilter};

use crate::ClientResult;
use crate::api::CourtsideApi;
use crate::forum::{NicknameCache, PostItem};
use crate::http::HttpApi;
use crate::list::{Page, PageRequest, PageSource};

/// Cursor-paged competition list
pub struct MatchPageSource<H: HttpApi> {
    api: Arc<CourtsideApi<H>>,
}

impl<H: HttpApi> MatchPageSource<H> {
    pub fn new(api: Arc<CourtsideApi<H>>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<H: HttpApi> PageSource for MatchPageSource<H> {
    type Item = Competition;
    type Filter = MatchFilter;

    async fn fetch(
        &self,
        filter: &MatchFilter,
        request: PageRequest<Competition>,
    ) -> ClientResult<Page<Competition>> {
        let cursor = request
            .last
            .map(|last| Cursor::after(last.time_begin, last.id))
            .unwrap_or_default();
        let items = self.api.competition_list(&cursor, filter).await?;
        let has_more = !items.is_empty();
        Ok(Page::new(items, has_more))
    }
}

/// Page-numbered forum post list, enriched with nicknames and tags
pub struct PostPageSource<H: HttpApi> {
    api: Arc<CourtsideApi<H>>,
    nicknames: NicknameCache,
}

impl<H: HttpApi + 'static> PostPageSource<H> {
    pub fn new(api: Arc<CourtsideApi<H>>, nickname_cache_size: usize) -> Self {
        let nicknames = NicknameCache::new(api.clone(), nickname_cache_size);
        Self { api, nicknames }
    }
}

#[async_trait]
impl<H: HttpApi> PageSource for PostPageSource<H> {
    type Item = PostItem;
    type Filter = PostFilter;

    async fn fetch(
        &self,
        filter: &PostFilter,
        request: PageRequest<PostItem>,
    ) -> ClientResult<Page<PostItem>> {
        let paged = self.api.post_list(filter, request.index).await?;
        let has_more = request.index < paged.total_pages;

        let items = join_all(paged.posts.into_iter().map(|post| async {
            let nickname = self.nicknames.get(&post.author).await;
            let tags = match self.api.tags_of_post(post.post_id).await {
                Ok(tags) => tags.into_iter().filter(|t| t.is_post_tag).collect(),
                Err(err) => {
                    tracing::debug!(post_id = post.post_id, %err, "Tag lookup failed");
                    Vec::new()
                }
            };
            PostItem {
                post,
                nickname,
                tags,
            }
        }))
        .await;

        Ok(Page::new(items, has_more))
    }
}

/// Page-numbered moderation report table, filtered by solved state
pub struct ReportPageSource<H: HttpApi> {
    api: Arc<CourtsideApi<H>>,
}

impl<H: HttpApi> ReportPageSource<H> {
    pub fn new(api: Arc<CourtsideApi<H>>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<H: HttpApi> PageSource for ReportPageSource<H> {
    type Item = Report;
    type Filter = bool;

    async fn fetch(
        &self,
        solved_state: &bool,
        request: PageRequest<Report>,
    ) -> ClientResult<Page<Report>> {
        let page = PageQuery {
            page: request.index,
            page_size: self.api.page_size(),
        };
        let paged = self.api.report_list(*solved_state, &page).await?;
        let has_more = u64::from(page.page) * u64::from(page.page_size) < paged.total;
        Ok(Page::new(paged.reports, has_more))
    }
}
