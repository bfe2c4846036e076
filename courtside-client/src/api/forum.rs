//! Forum endpoints: posts, comments, replies and moderation reports

use serde::{Deserialize, Serialize};

use shared::models::{Comment, ContentKind, Post, Report};
use shared::request::{PageQuery, PostFilter};

use crate::ClientResult;
use crate::http::HttpApi;

use super::CourtsideApi;

/// One page of posts with the page-count the server derived
#[derive(Debug, Clone, Deserialize)]
pub struct PagedPosts {
    #[serde(default)]
    pub posts: Vec<Post>,
    pub total_pages: u32,
}

/// One page of comments under an object
#[derive(Debug, Clone, Deserialize)]
pub struct PagedComments {
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub total_pages: u32,
}

/// One page of moderation reports
#[derive(Debug, Clone, Deserialize)]
pub struct PagedReports {
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Serialize)]
struct CreateComment<'a> {
    username: &'a str,
    content_type: ContentKind,
    object_id: i64,
    content: &'a str,
    allow_reply: bool,
}

impl<H: HttpApi> CourtsideApi<H> {
    /// One page of the post list (1-based), filtered by keyword and tags
    pub async fn post_list(&self, filter: &PostFilter, page: u32) -> ClientResult<PagedPosts> {
        let mut query: Vec<(&str, String)> = filter
            .tag_list
            .iter()
            .map(|id| ("tag_list", id.to_string()))
            .collect();
        query.push(("keyword", filter.keyword.clone()));
        query.push(("page", page.to_string()));
        query.push(("page_size", self.page_size().to_string()));

        self.http().get("/forum/posts/", &query).await
    }

    /// Full detail of one post
    pub async fn post_detail(&self, post_id: i64) -> ClientResult<Post> {
        self.http()
            .get("/forum/post_detail/", &[("post_id", post_id.to_string())])
            .await
    }

    /// Create a post with its tag set
    pub async fn create_post(
        &self,
        username: &str,
        title: &str,
        content: &str,
        tag_ids: &[i64],
    ) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/forum/create_post_with_tag/",
                &serde_json::json!({
                    "username": username,
                    "title": title,
                    "content": content,
                    "tag_ids": tag_ids,
                }),
            )
            .await
    }

    /// Delete a post
    pub async fn delete_post(&self, username: &str, post_id: i64) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/forum/delete_post/",
                &serde_json::json!({ "username": username, "post_id": post_id }),
            )
            .await
    }

    /// One page of the comments under a post or comment
    pub async fn comments_of(
        &self,
        kind: ContentKind,
        object_id: i64,
        page: &PageQuery,
    ) -> ClientResult<PagedComments> {
        self.http()
            .get(
                "/forum/comments_of_object/",
                &[
                    ("content_type", kind_name(kind).to_string()),
                    ("object_id", object_id.to_string()),
                    ("page", page.page.to_string()),
                    ("page_size", page.page_size.to_string()),
                ],
            )
            .await
    }

    /// Comment on a post, or reply to a comment/reply
    pub async fn create_comment(
        &self,
        username: &str,
        kind: ContentKind,
        object_id: i64,
        content: &str,
    ) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/forum/create_comment_of_object/",
                &CreateComment {
                    username,
                    content_type: kind,
                    object_id,
                    content,
                    allow_reply: true,
                },
            )
            .await
    }

    /// Flat reply list of a comment (includes the root record)
    pub async fn reply_list(&self, comment_id: i64) -> ClientResult<Vec<Comment>> {
        self.http()
            .get(
                "/forum/get_reply_list_of_comment/",
                &[("comment_id", comment_id.to_string())],
            )
            .await
    }

    /// Delete a comment or reply
    pub async fn delete_comment(&self, username: &str, comment_id: i64) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/forum/delete_comment/",
                &serde_json::json!({ "username": username, "comment_id": comment_id }),
            )
            .await
    }

    /// Full detail of one comment
    pub async fn comment_detail(&self, comment_id: i64) -> ClientResult<Comment> {
        self.http()
            .get(
                "/forum/get_comment_detail_by_id/",
                &[("comment_id", comment_id.to_string())],
            )
            .await
    }

    // ========== Moderation reports ==========

    /// File a report against a post or comment
    pub async fn create_report(
        &self,
        reporter: &str,
        kind: ContentKind,
        object_id: i64,
        reason: &str,
    ) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/forum/create_report/",
                &serde_json::json!({
                    "reporter": reporter,
                    "content_type": kind,
                    "object_id": object_id,
                    "reason": reason,
                }),
            )
            .await
    }

    /// One page of reports, filtered by solved state
    pub async fn report_list(
        &self,
        solved_state: bool,
        page: &PageQuery,
    ) -> ClientResult<PagedReports> {
        self.http()
            .get(
                "/forum/get_report_list/",
                &[
                    ("solved_state", solved_state.to_string()),
                    ("page", page.page.to_string()),
                    ("page_size", page.page_size.to_string()),
                ],
            )
            .await
    }

    /// Mark a report solved or unsolved
    pub async fn modify_report_state(
        &self,
        username: &str,
        report_id: i64,
        solved_state: bool,
    ) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/forum/modify_report_solved_state/",
                &serde_json::json!({
                    "username": username,
                    "report_id": report_id,
                    "solved_state": solved_state,
                }),
            )
            .await
    }

    /// Delete the object a report points at
    pub async fn delete_reported_object(&self, username: &str, report_id: i64) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/forum/delete_reported_object/",
                &serde_json::json!({ "username": username, "report_id": report_id }),
            )
            .await
    }

    /// Ban the author of the reported object
    pub async fn ban_reported_user(&self, username: &str, report_id: i64) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/forum/ban_reported_user/",
                &serde_json::json!({ "username": username, "report_id": report_id }),
            )
            .await
    }
}

fn kind_name(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Post => "Post",
        ContentKind::Comment => "Comment",
    }
}
