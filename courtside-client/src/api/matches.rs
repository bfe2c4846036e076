//! Competition endpoints and the composite match mutations
//!
//! Participants carry a server-assigned id that likes and scores are keyed
//! against, so an edit never replaces the child collection wholesale: the
//! desired list is reconciled against the current one by diff, and the
//! resulting delete/add/update batches are issued as three independent
//! calls. The base-update result stays authoritative; participant
//! reconciliation is best-effort.

use futures::future::join_all;
use serde::Deserialize;

use shared::models::{
    Competition, CompetitionCreate, CompetitionUpdate, Participant, ParticipantDraft,
    ParticipantUpdate, UserInfo,
};
use shared::request::{Cursor, MatchFilter, MatchListRequest};
use shared::{ApiError, ErrorCode};

use crate::http::HttpApi;
use crate::{ClientError, ClientResult};

use super::CourtsideApi;

#[derive(Deserialize)]
struct CompetitionListData {
    #[serde(default)]
    competition_list: Vec<Competition>,
}

#[derive(Deserialize)]
struct CompetitionInfoData {
    competition: Competition,
}

#[derive(Deserialize)]
struct ParticipantListData {
    #[serde(default)]
    participant_list: Vec<Participant>,
}

#[derive(Deserialize)]
struct CreatedData {
    id: i64,
}

/// Like count and the viewing user's like state for one participant
#[derive(Debug, Clone, Deserialize)]
pub struct LikeCount {
    pub like_count: i64,
    pub is_like: bool,
}

#[derive(Deserialize)]
struct AdminListData {
    #[serde(default)]
    admin_list: Vec<UserInfo>,
}

/// Diff of a desired participant list against the current one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub to_delete: Vec<i64>,
    pub to_add: Vec<ParticipantDraft>,
    pub to_update: Vec<ParticipantUpdate>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_add.is_empty() && self.to_update.is_empty()
    }
}

/// Compute the delete/add/update batches that turn `current` into `desired`
///
/// Pairs are matched by id when the draft carries one, otherwise by name.
/// Each current participant is consumed by at most one draft, so two
/// drafts sharing a name cannot both claim the same row.
pub fn reconcile_participants(
    current: &[Participant],
    desired: &[ParticipantDraft],
) -> ReconcilePlan {
    let mut consumed = vec![false; current.len()];
    let mut plan = ReconcilePlan::default();

    for draft in desired {
        let matched = current.iter().enumerate().find(|(i, p)| {
            !consumed[*i] && (draft.id == Some(p.id) || (draft.id.is_none() && draft.name == p.name))
        });

        match matched {
            Some((i, existing)) => {
                consumed[i] = true;
                if existing.score != draft.score {
                    plan.to_update.push(ParticipantUpdate {
                        id: existing.id,
                        name: draft.name.clone(),
                        score: draft.score,
                    });
                }
            }
            None => plan.to_add.push(draft.clone()),
        }
    }

    plan.to_delete = current
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .map(|(p, _)| p.id)
        .collect();

    plan
}

/// Whether a follow/unfollow answer is a benign already-in-that-state code
fn follow_state_already_matches(err: &ClientError) -> bool {
    matches!(
        err.api().and_then(ApiError::error_code),
        Some(ErrorCode::AlreadyFollowing | ErrorCode::NotFollowing)
    )
}

impl<H: HttpApi> CourtsideApi<H> {
    /// One cursor page of the competition list, participants filled in
    ///
    /// The participant lookups fan out concurrently; a failed lookup
    /// degrades that competition to an empty participant list instead of
    /// failing the page.
    pub async fn competition_list(
        &self,
        cursor: &Cursor,
        filter: &MatchFilter,
    ) -> ClientResult<Vec<Competition>> {
        let request = MatchListRequest {
            cursor: cursor.clone(),
            filter: filter.clone(),
        };
        let data: CompetitionListData = self
            .http()
            .post("/competitions/get_competition_list/", &request)
            .await?;

        let mut competitions = data.competition_list;
        let lookups = competitions
            .iter()
            .map(|c| self.participant_list(c.id, filter.user_id));
        let results = join_all(lookups).await;

        for (competition, result) in competitions.iter_mut().zip(results) {
            match result {
                Ok(participants) => competition.participants = participants,
                Err(err) => {
                    tracing::warn!(
                        competition_id = competition.id,
                        %err,
                        "Participant lookup failed, showing none"
                    );
                    competition.participants = Vec::new();
                }
            }
        }

        Ok(competitions)
    }

    /// One competition with its participants
    pub async fn competition_info(&self, id: i64, user_id: i64) -> ClientResult<Competition> {
        let data: CompetitionInfoData = self
            .http()
            .get("/competitions/get_competition_info/", &[("id", id.to_string())])
            .await?;

        let mut competition = data.competition;
        match self.participant_list(id, user_id).await {
            Ok(participants) => competition.participants = participants,
            Err(err) => {
                tracing::warn!(competition_id = id, %err, "Participant lookup failed");
                competition.participants = Vec::new();
            }
        }
        Ok(competition)
    }

    /// Participants of one competition; `user_id == -1` skips like state
    pub async fn participant_list(
        &self,
        competition_id: i64,
        user_id: i64,
    ) -> ClientResult<Vec<Participant>> {
        let data: ParticipantListData = self
            .http()
            .get(
                "/competitions/get_participant_list/",
                &[
                    ("competition_id", competition_id.to_string()),
                    ("user_id", user_id.to_string()),
                ],
            )
            .await?;
        Ok(data.participant_list)
    }

    /// Create a competition, then batch-add its participants
    ///
    /// The create endpoint does not accept participants; they are added
    /// afterwards. Returns the new competition id; a failed participant
    /// add is logged, the creation stands.
    pub async fn create_match(
        &self,
        create: &CompetitionCreate,
        participants: &[ParticipantDraft],
    ) -> ClientResult<i64> {
        let data: CreatedData = self
            .http()
            .post("/competitions/create_competition/", create)
            .await?;

        if !participants.is_empty() {
            if let Err(err) = self.add_participants(data.id, participants).await {
                tracing::warn!(competition_id = data.id, %err, "Adding participants failed");
            }
        }

        Ok(data.id)
    }

    /// Update a competition's base fields and reconcile its participants
    ///
    /// Order: base update, then delete, add, update of participants
    /// (deletions first so a re-added name cannot collide, additions
    /// before score reconciliation). Only the base update decides the
    /// overall result; the three participant batches are independent and
    /// best-effort.
    pub async fn update_match(
        &self,
        update: &CompetitionUpdate,
        participants: Option<&[ParticipantDraft]>,
    ) -> ClientResult<()> {
        self.http()
            .post_empty("/competitions/update_competition/", update)
            .await?;

        let Some(desired) = participants else {
            return Ok(());
        };

        let current = match self.participant_list(update.id, -1).await {
            Ok(current) => current,
            Err(err) => {
                tracing::warn!(
                    competition_id = update.id,
                    %err,
                    "Participant fetch failed, skipping reconciliation"
                );
                return Ok(());
            }
        };

        let plan = reconcile_participants(&current, desired);
        self.apply_participant_plan(update.id, &plan).await;
        Ok(())
    }

    /// Score-only edit: update scores and the finished flag while keeping
    /// every other base field and the tag set intact
    ///
    /// The edit form hides the tag field in this mode, and the base update
    /// replaces the tag association, so the current tags are fetched and
    /// resubmitted unchanged. If that lookup fails the update proceeds
    /// with an empty tag list rather than blocking the score change.
    pub async fn update_match_score(
        &self,
        competition_id: i64,
        desired: &[ParticipantDraft],
        is_finished: bool,
    ) -> ClientResult<()> {
        let current = self.competition_info(competition_id, -1).await?;

        let tag_ids = match self.tags_of_competition(competition_id).await {
            Ok(tags) => tags.into_iter().map(|t| t.id).collect(),
            Err(err) => {
                tracing::warn!(
                    competition_id,
                    %err,
                    "Tag lookup failed, resubmitting without tags"
                );
                Vec::new()
            }
        };

        self.http()
            .post_empty(
                "/competitions/update_competition/",
                &CompetitionUpdate {
                    id: competition_id,
                    name: current.name.clone(),
                    sport: current.sport.clone(),
                    time_begin: current.time_begin.clone(),
                    is_finished,
                    tag_ids,
                },
            )
            .await?;

        let updates: Vec<ParticipantUpdate> = desired
            .iter()
            .filter_map(|draft| {
                let existing = current.participants.iter().find(|p| {
                    draft.id == Some(p.id) || (draft.id.is_none() && draft.name == p.name)
                })?;
                (existing.score != draft.score).then(|| ParticipantUpdate {
                    id: existing.id,
                    name: existing.name.clone(),
                    score: draft.score,
                })
            })
            .collect();

        if !updates.is_empty() {
            if let Err(err) = self.update_participants(&updates).await {
                tracing::warn!(competition_id, %err, "Score batch update failed");
            }
        }

        Ok(())
    }

    /// Delete a competition
    pub async fn delete_match(&self, id: i64) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/competitions/delete_competition/",
                &serde_json::json!({ "id": id }),
            )
            .await
    }

    /// Batch-add participants to a competition
    pub async fn add_participants(
        &self,
        competition_id: i64,
        participants: &[ParticipantDraft],
    ) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/competitions/add_participant/",
                &serde_json::json!({
                    "competition_id": competition_id,
                    "participants": participants,
                }),
            )
            .await
    }

    /// Batch-delete participants by id
    pub async fn delete_participants(&self, participant_ids: &[i64]) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/competitions/delete_participant/",
                &serde_json::json!({ "participant_ids": participant_ids }),
            )
            .await
    }

    /// Batch-update participant names/scores
    pub async fn update_participants(&self, participants: &[ParticipantUpdate]) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/competitions/update_participant/",
                &serde_json::json!({ "participants": participants }),
            )
            .await
    }

    /// Follow a competition; "already following" counts as success
    pub async fn follow_competition(&self, competition_id: i64, user_id: i64) -> ClientResult<()> {
        let result = self
            .http()
            .post_empty(
                "/competitions/add_competition_focus/",
                &serde_json::json!({ "competition_id": competition_id, "user_id": user_id }),
            )
            .await;
        match result {
            Err(err) if follow_state_already_matches(&err) => {
                tracing::debug!(competition_id, "Already following");
                Ok(())
            }
            other => other,
        }
    }

    /// Unfollow a competition; "not following" counts as success
    pub async fn unfollow_competition(&self, competition_id: i64, user_id: i64) -> ClientResult<()> {
        let result = self
            .http()
            .post_empty(
                "/competitions/del_competition_focus/",
                &serde_json::json!({ "competition_id": competition_id, "user_id": user_id }),
            )
            .await;
        match result {
            Err(err) if follow_state_already_matches(&err) => {
                tracing::debug!(competition_id, "Not following");
                Ok(())
            }
            other => other,
        }
    }

    /// Like one participant
    pub async fn like_participant(&self, user_id: i64, participant_id: i64) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/competitions/like_participant/",
                &serde_json::json!({ "user_id": user_id, "participant_id": participant_id }),
            )
            .await
    }

    /// Remove a like from one participant
    pub async fn unlike_participant(&self, user_id: i64, participant_id: i64) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/competitions/unlike_participant/",
                &serde_json::json!({ "user_id": user_id, "participant_id": participant_id }),
            )
            .await
    }

    /// Like count and like state of one participant for the viewing user
    pub async fn like_count(&self, participant_id: i64, user_id: i64) -> ClientResult<LikeCount> {
        self.http()
            .get(
                "/competitions/get_like_count/",
                &[
                    ("participant_id", participant_id.to_string()),
                    ("user_id", user_id.to_string()),
                ],
            )
            .await
    }

    /// Users holding the scoped update permission for a competition
    pub async fn match_admin_list(&self, competition_id: i64) -> ClientResult<Vec<UserInfo>> {
        let data: AdminListData = self
            .http()
            .get(
                "/competitions/get_competition_admin_list/",
                &[("id", competition_id.to_string())],
            )
            .await?;
        Ok(data.admin_list)
    }

    async fn apply_participant_plan(&self, competition_id: i64, plan: &ReconcilePlan) {
        if !plan.to_delete.is_empty() {
            if let Err(err) = self.delete_participants(&plan.to_delete).await {
                tracing::warn!(competition_id, %err, "Participant delete batch failed");
            }
        }
        if !plan.to_add.is_empty() {
            if let Err(err) = self.add_participants(competition_id, &plan.to_add).await {
                tracing::warn!(competition_id, %err, "Participant add batch failed");
            }
        }
        if !plan.to_update.is_empty() {
            if let Err(err) = self.update_participants(&plan.to_update).await {
                tracing::warn!(competition_id, %err, "Participant update batch failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: i64, name: &str, score: i64) -> Participant {
        Participant {
            id,
            name: name.into(),
            score,
            like_count: 0,
            liked: false,
        }
    }

    #[test]
    fn test_reconcile_delete_add_update() {
        let current = vec![participant(1, "A", 0), participant(2, "B", 0)];
        let desired = vec![
            ParticipantDraft::existing(1, "A", 3),
            ParticipantDraft::new("C", 0),
        ];

        let plan = reconcile_participants(&current, &desired);
        assert_eq!(plan.to_delete, vec![2]);
        assert_eq!(plan.to_add, vec![ParticipantDraft::new("C", 0)]);
        assert_eq!(
            plan.to_update,
            vec![ParticipantUpdate {
                id: 1,
                name: "A".into(),
                score: 3,
            }]
        );
    }

    #[test]
    fn test_reconcile_no_changes() {
        let current = vec![participant(1, "A", 2)];
        let desired = vec![ParticipantDraft::existing(1, "A", 2)];
        assert!(reconcile_participants(&current, &desired).is_empty());
    }

    #[test]
    fn test_reconcile_matches_by_name_when_id_absent() {
        let current = vec![participant(9, "A", 1)];
        let desired = vec![ParticipantDraft::new("A", 4)];

        let plan = reconcile_participants(&current, &desired);
        assert!(plan.to_delete.is_empty());
        assert!(plan.to_add.is_empty());
        assert_eq!(
            plan.to_update,
            vec![ParticipantUpdate {
                id: 9,
                name: "A".into(),
                score: 4,
            }]
        );
    }

    #[test]
    fn test_reconcile_duplicate_names_consume_once() {
        let current = vec![participant(1, "A", 0)];
        let desired = vec![ParticipantDraft::new("A", 1), ParticipantDraft::new("A", 2)];

        let plan = reconcile_participants(&current, &desired);
        // The first draft claims the row; the second becomes an addition.
        assert_eq!(plan.to_update.len(), 1);
        assert_eq!(plan.to_update[0].score, 1);
        assert_eq!(plan.to_add.len(), 1);
        assert_eq!(plan.to_add[0].score, 2);
        assert!(plan.to_delete.is_empty());
    }

    #[test]
    fn test_reconcile_all_deleted() {
        let current = vec![participant(1, "A", 0), participant(2, "B", 5)];
        let plan = reconcile_participants(&current, &[]);
        assert_eq!(plan.to_delete, vec![1, 2]);
        assert!(plan.to_add.is_empty());
        assert!(plan.to_update.is_empty());
    }
}
