//! Competition models

use serde::{Deserialize, Serialize};

use super::tag::Tag;

/// A competition (match) as returned by the list and info endpoints
///
/// `participants` and `tags` come from separate endpoints and are filled
/// in by the client; `is_focus` is derived for the viewing user, not
/// global entity state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    pub id: i64,
    pub name: String,
    pub sport: String,
    pub time_begin: String,
    pub is_finished: bool,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub is_focus: bool,
}

/// A participant with its server-assigned identity
///
/// Likes are keyed against `id`, which is why participant edits are
/// reconciled by diff instead of replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub score: i64,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub liked: bool,
}

/// A participant as entered in the edit form; `id` is absent for new rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub score: i64,
}

impl ParticipantDraft {
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            score,
        }
    }

    pub fn existing(id: i64, name: impl Into<String>, score: i64) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            score,
        }
    }
}

/// Batch score update for one existing participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantUpdate {
    pub id: i64,
    pub name: String,
    pub score: i64,
}

/// Payload for creating a competition (participants are added afterwards
/// through the participant endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionCreate {
    pub name: String,
    pub sport: String,
    pub time_begin: String,
    pub is_finished: bool,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// Payload for updating a competition's base fields
///
/// `tag_ids` always carries the full desired tag set; the server replaces
/// the association, so omitting it would clear the tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionUpdate {
    pub id: i64,
    pub name: String,
    pub sport: String,
    pub time_begin: String,
    pub is_finished: bool,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}
