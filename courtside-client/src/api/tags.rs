//! Tag endpoints

use serde::Deserialize;

use shared::models::{Tag, TagCreate, TagKind};

use crate::ClientResult;
use crate::http::HttpApi;

use super::CourtsideApi;

#[derive(Deserialize)]
struct TagListData {
    #[serde(default)]
    tag_list: Vec<Tag>,
}

impl<H: HttpApi> CourtsideApi<H> {
    /// All tags
    pub async fn tag_list(&self) -> ClientResult<Vec<Tag>> {
        self.http().get("/tag/get_tag_list/", &[]).await
    }

    /// Prefix search over tags; `kind` narrows by tag type
    pub async fn search_tags(&self, prefix: &str, kind: Option<TagKind>) -> ClientResult<Vec<Tag>> {
        let kind = kind.map(|k| k.as_str()).unwrap_or_default();
        self.http()
            .get(
                "/tag/search_tag_by_prefix/",
                &[
                    ("prefix", prefix.to_string()),
                    ("tag_type", kind.to_string()),
                ],
            )
            .await
    }

    /// Create a tag
    pub async fn create_tag(&self, username: &str, tag: &TagCreate) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/tag/create_tag/",
                &serde_json::json!({
                    "username": username,
                    "name": tag.name,
                    "tag_type": tag.tag_type,
                    "is_post_tag": tag.is_post_tag,
                    "is_competition_tag": tag.is_competition_tag,
                }),
            )
            .await
    }

    /// Delete a tag
    pub async fn delete_tag(&self, username: &str, tag_id: i64) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/tag/delete_tag/",
                &serde_json::json!({ "username": username, "tag_id": tag_id }),
            )
            .await
    }

    /// Tags attached to a post
    pub async fn tags_of_post(&self, post_id: i64) -> ClientResult<Vec<Tag>> {
        self.http()
            .get(
                "/forum/get_tag_list_by_post_id/",
                &[("post_id", post_id.to_string())],
            )
            .await
    }

    /// Tags attached to a competition
    pub async fn tags_of_competition(&self, competition_id: i64) -> ClientResult<Vec<Tag>> {
        let data: TagListData = self
            .http()
            .get(
                "/competitions/get_tag_list_by_competition/",
                &[("competition_id", competition_id.to_string())],
            )
            .await?;
        Ok(data.tag_list)
    }

    /// Attach tags to a post
    pub async fn add_tags_to_post(
        &self,
        username: &str,
        post_id: i64,
        tag_ids: &[i64],
    ) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/forum/add_tag_to_post/",
                &serde_json::json!({
                    "username": username,
                    "post_id": post_id,
                    "tag_ids": tag_ids,
                }),
            )
            .await
    }

    /// Detach tags from a post
    pub async fn remove_tags_from_post(
        &self,
        username: &str,
        post_id: i64,
        tag_ids: &[i64],
    ) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/forum/remove_tag_from_post/",
                &serde_json::json!({
                    "username": username,
                    "post_id": post_id,
                    "tag_ids": tag_ids,
                }),
            )
            .await
    }
}
