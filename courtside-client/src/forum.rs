//! Client-side forum assembly
//!
//! The service returns replies as one flat sibling list per comment and
//! posts without author nicknames; display structure is assembled here.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use lru::LruCache;
use tokio::sync::Mutex;

use shared::models::{Comment, Post, Tag};

use crate::api::CourtsideApi;
use crate::http::HttpApi;
use crate::list::Entity;
use crate::ClientResult;

/// A post with its client-side enrichment
#[derive(Debug, Clone)]
pub struct PostItem {
    pub post: Post,
    pub nickname: String,
    pub tags: Vec<Tag>,
}

impl Entity for PostItem {
    fn entity_id(&self) -> i64 {
        self.post.post_id
    }
}

/// A reply with its resolved reply-target author
#[derive(Debug, Clone)]
pub struct ThreadedReply {
    pub reply: Comment,
    /// Author of the reply this one answers; `None` for replies directly
    /// under the root comment
    pub reply_to: Option<String>,
}

/// Assemble the display order of a comment's replies
///
/// Drops the root record the endpoint includes, orders by creation time,
/// de-duplicates by id (last record wins, first position kept), and
/// resolves each reply's target through `father_object_id`. Nesting is
/// derived purely from these links; the server sends no tree.
pub fn thread_replies(comment_id: i64, raw: Vec<Comment>) -> Vec<ThreadedReply> {
    let mut replies: Vec<Comment> = raw
        .into_iter()
        .filter(|c| c.comment_id != comment_id)
        .collect();
    replies.sort_by(|a, b| compare_created(&a.created_at, &b.created_at));

    let mut ordered: Vec<Comment> = Vec::with_capacity(replies.len());
    for reply in replies {
        match ordered.iter().position(|c| c.comment_id == reply.comment_id) {
            Some(i) => ordered[i] = reply,
            None => ordered.push(reply),
        }
    }

    ordered
        .iter()
        .map(|reply| {
            let reply_to = reply
                .father_object_id
                .filter(|father| *father != comment_id)
                .and_then(|father| ordered.iter().find(|c| c.comment_id == father))
                .map(|parent| parent.author.clone());
            ThreadedReply {
                reply: reply.clone(),
                reply_to,
            }
        })
        .collect()
}

fn compare_created(a: &str, b: &str) -> std::cmp::Ordering {
    match (parse_created(a), parse_created(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

fn parse_created(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
}

/// Source of `username -> nickname` lookups
#[async_trait]
pub trait NicknameFetch: Send + Sync {
    async fn fetch_nickname(&self, username: &str) -> ClientResult<String>;
}

#[async_trait]
impl<H: HttpApi> NicknameFetch for CourtsideApi<H> {
    async fn fetch_nickname(&self, username: &str) -> ClientResult<String> {
        let info = self.user_info(username).await?;
        Ok(if info.nickname.is_empty() {
            username.to_string()
        } else {
            info.nickname
        })
    }
}

/// Bounded `username -> nickname` cache
///
/// Owned by the post source, not duplicated per view. Nicknames are
/// treated as immutable for the session; entries are only ever evicted by
/// capacity. A failed lookup falls back to the username and is not
/// cached, so it will be retried on the next sighting.
pub struct NicknameCache {
    fetch: Arc<dyn NicknameFetch>,
    cache: Mutex<LruCache<String, String>>,
}

impl NicknameCache {
    pub fn new(fetch: Arc<dyn NicknameFetch>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            fetch,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Nickname for `username`, fetching on a miss
    pub async fn get(&self, username: &str) -> String {
        if let Some(hit) = self.cache.lock().await.get(username) {
            return hit.clone();
        }

        match self.fetch.fetch_nickname(username).await {
            Ok(nickname) => {
                self.cache
                    .lock()
                    .await
                    .put(username.to_string(), nickname.clone());
                nickname
            }
            Err(err) => {
                tracing::debug!(username, %err, "Nickname lookup failed, using username");
                username.to_string()
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }
}
