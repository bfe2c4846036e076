//! Composite mutation orchestration over a recorded in-memory transport:
//! call ordering, partial-failure policy, and tag preservation.

mod common;

use std::sync::Arc;

use serde_json::json;

use common::{MockHttp, RecordingNotify, api_err, query_value};
use courtside_client::perms::PermissionResolver;
use courtside_client::{CourtsideApi, Cursor};
use shared::models::{CompetitionUpdate, ParticipantDraft};
use shared::request::MatchFilter;

const UPDATE: &str = "/competitions/update_competition/";
const PARTICIPANTS: &str = "/competitions/get_participant_list/";
const DELETE: &str = "/competitions/delete_participant/";
const ADD: &str = "/competitions/add_participant/";
const UPDATE_PARTICIPANT: &str = "/competitions/update_participant/";
const INFO: &str = "/competitions/get_competition_info/";
const TAGS: &str = "/competitions/get_tag_list_by_competition/";
const LIST: &str = "/competitions/get_competition_list/";

fn base_update(id: i64) -> CompetitionUpdate {
    CompetitionUpdate {
        id,
        name: "Finals".into(),
        sport: "Soccer".into(),
        time_begin: "2025-04-01 18:00".into(),
        is_finished: false,
        tag_ids: vec![1],
    }
}

fn current_participants() -> serde_json::Value {
    json!({
        "participant_list": [
            { "id": 1, "name": "A", "score": 0 },
            { "id": 2, "name": "B", "score": 0 },
        ]
    })
}

#[tokio::test]
async fn test_update_match_reconciles_in_order() {
    let http = MockHttp::new()
        .on_data(UPDATE, json!(null))
        .on_data(PARTICIPANTS, current_participants())
        .on_data(DELETE, json!(null))
        .on_data(ADD, json!(null))
        .on_data(UPDATE_PARTICIPANT, json!(null));
    let api = CourtsideApi::new(http);

    let desired = vec![
        ParticipantDraft::existing(1, "A", 3),
        ParticipantDraft::new("C", 0),
    ];
    api.update_match(&base_update(7), Some(&desired))
        .await
        .unwrap();

    // Base update first, then delete before add before score update.
    assert_eq!(
        api_paths(&api),
        vec![UPDATE, PARTICIPANTS, DELETE, ADD, UPDATE_PARTICIPANT]
    );

    let delete = &api_calls(&api, DELETE)[0];
    assert_eq!(delete["participant_ids"], json!([2]));

    let add = &api_calls(&api, ADD)[0];
    assert_eq!(add["competition_id"], json!(7));
    assert_eq!(add["participants"], json!([{ "name": "C", "score": 0 }]));

    let update = &api_calls(&api, UPDATE_PARTICIPANT)[0];
    assert_eq!(
        update["participants"],
        json!([{ "id": 1, "name": "A", "score": 3 }])
    );
}

#[tokio::test]
async fn test_update_match_base_failure_aborts() {
    let http = MockHttp::new().on(UPDATE, |_| Err(api_err(1030, "forbidden")));
    let api = CourtsideApi::new(http);

    let desired = vec![ParticipantDraft::new("C", 0)];
    let err = api
        .update_match(&base_update(7), Some(&desired))
        .await
        .unwrap_err();

    assert_eq!(err.code(), 1030);
    // The primary call failed; reconciliation never starts.
    assert_eq!(api_paths(&api), vec![UPDATE]);
}

#[tokio::test]
async fn test_secondary_failures_do_not_roll_back_or_resurface() {
    let http = MockHttp::new()
        .on_data(UPDATE, json!(null))
        .on_data(PARTICIPANTS, current_participants())
        .on(DELETE, |_| Err(api_err(9001, "delete blew up")))
        .on_data(ADD, json!(null))
        .on_data(UPDATE_PARTICIPANT, json!(null));
    let api = CourtsideApi::new(http);

    let desired = vec![
        ParticipantDraft::existing(1, "A", 3),
        ParticipantDraft::new("C", 0),
    ];
    // The base update is authoritative; the failed delete batch is logged
    // only and the remaining batches still run.
    api.update_match(&base_update(7), Some(&desired))
        .await
        .unwrap();

    assert_eq!(
        api_paths(&api),
        vec![UPDATE, PARTICIPANTS, DELETE, ADD, UPDATE_PARTICIPANT]
    );
}

#[tokio::test]
async fn test_update_without_participants_skips_reconciliation() {
    let http = MockHttp::new().on_data(UPDATE, json!(null));
    let api = CourtsideApi::new(http);

    api.update_match(&base_update(7), None).await.unwrap();
    assert_eq!(api_paths(&api), vec![UPDATE]);
}

fn score_edit_http() -> MockHttp {
    MockHttp::new()
        .on_data(
            INFO,
            json!({
                "competition": {
                    "id": 9,
                    "name": "Finals",
                    "sport": "Soccer",
                    "time_begin": "2025-04-01 18:00",
                    "is_finished": false,
                }
            }),
        )
        .on_data(
            PARTICIPANTS,
            json!({
                "participant_list": [
                    { "id": 1, "name": "A", "score": 0 },
                    { "id": 2, "name": "B", "score": 2 },
                ]
            }),
        )
        .on_data(UPDATE, json!(null))
        .on_data(UPDATE_PARTICIPANT, json!(null))
}

#[tokio::test]
async fn test_score_only_edit_resubmits_current_tags() {
    let http = score_edit_http().on_data(
        TAGS,
        json!({
            "tag_list": [
                { "id": 5, "name": "soccer" },
                { "id": 7, "name": "finals" },
            ]
        }),
    );
    let api = CourtsideApi::new(http);

    let desired = vec![
        ParticipantDraft::existing(1, "A", 3),
        ParticipantDraft::existing(2, "B", 2),
    ];
    api.update_match_score(9, &desired, true).await.unwrap();

    // The hidden tag field must not silently clear the association.
    let update = &api_calls(&api, UPDATE)[0];
    assert_eq!(update["tag_ids"], json!([5, 7]));
    assert_eq!(update["is_finished"], json!(true));
    assert_eq!(update["name"], json!("Finals"));

    // Only the changed score is batched.
    let batches = api_calls(&api, UPDATE_PARTICIPANT);
    assert_eq!(batches.len(), 1);
    assert_eq!(
        batches[0]["participants"],
        json!([{ "id": 1, "name": "A", "score": 3 }])
    );
}

#[tokio::test]
async fn test_score_only_edit_tag_fetch_failure_falls_back_to_empty() {
    let http = score_edit_http().on(TAGS, |_| Err(api_err(9001, "tags down")));
    let api = CourtsideApi::new(http);

    let desired = vec![ParticipantDraft::existing(1, "A", 3)];
    // The score update must not be blocked by the tag lookup.
    api.update_match_score(9, &desired, false).await.unwrap();

    let update = &api_calls(&api, UPDATE)[0];
    assert_eq!(update["tag_ids"], json!([]));
}

#[tokio::test]
async fn test_create_match_batch_adds_participants_afterwards() {
    let http = MockHttp::new()
        .on_data("/competitions/create_competition/", json!({ "id": 42 }))
        .on_data(ADD, json!(null));
    let api = CourtsideApi::new(http);

    let form = shared::models::CompetitionCreate {
        name: "Finals".into(),
        sport: "Soccer".into(),
        time_begin: "2025-04-01 18:00".into(),
        is_finished: false,
        tag_ids: vec![],
    };
    let participants = vec![ParticipantDraft::new("A", 0), ParticipantDraft::new("B", 0)];
    let id = api.create_match(&form, &participants).await.unwrap();

    assert_eq!(id, 42);
    let add = &api_calls(&api, ADD)[0];
    assert_eq!(add["competition_id"], json!(42));
    // The create payload itself never carries participants.
    let create = &api_calls(&api, "/competitions/create_competition/")[0];
    assert!(create.get("participants").is_none());
}

#[tokio::test]
async fn test_follow_already_following_counts_as_success() {
    let http = MockHttp::new().on("/competitions/add_competition_focus/", |_| {
        Err(api_err(1106, "already focused"))
    });
    let api = CourtsideApi::new(http);

    api.follow_competition(3, 7).await.unwrap();
}

#[tokio::test]
async fn test_competition_list_enrichment_degrades_per_item() {
    let http = MockHttp::new()
        .on_data(
            LIST,
            json!({
                "competition_list": [
                    { "id": 1, "name": "m1", "sport": "s", "time_begin": "t", "is_finished": false },
                    { "id": 2, "name": "m2", "sport": "s", "time_begin": "t", "is_finished": false },
                ]
            }),
        )
        .on(PARTICIPANTS, |body| {
            match query_value(body, "competition_id").as_deref() {
                Some("1") => Ok(json!({
                    "participant_list": [{ "id": 10, "name": "A", "score": 1 }]
                })),
                _ => Err(api_err(9001, "lookup down")),
            }
        });
    let api = CourtsideApi::new(http);

    let list = api
        .competition_list(&Cursor::sentinel(), &MatchFilter::anonymous(false))
        .await
        .unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].participants.len(), 1);
    // A failed lookup degrades that row instead of failing the page.
    assert!(list[1].participants.is_empty());
}

#[tokio::test]
async fn test_permission_resolver_degrades_to_empty_set() {
    let http = MockHttp::new().on("/settings/get_user_permission_info/", |_| {
        Err(api_err(500, "down"))
    });
    let api = Arc::new(CourtsideApi::new(http));
    let notify = Arc::new(RecordingNotify::default());
    let resolver = PermissionResolver::new(api, notify.clone());

    let set = resolver.load("li").await;

    assert!(set.grants().is_empty());
    assert!(!set.can_manage_matches());
    assert_eq!(notify.error_count(), 1);
}

// ---- helpers over the api's transport ----

fn api_paths(api: &CourtsideApi<MockHttp>) -> Vec<String> {
    api.http().call_paths()
}

fn api_calls(api: &CourtsideApi<MockHttp>, path: &str) -> Vec<serde_json::Value> {
    api.http().calls_to(path)
}
