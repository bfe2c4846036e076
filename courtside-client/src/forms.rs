//! Form payloads and client-side validation
//!
//! Validation failures are caught before any network call and surfaced
//! inline; nothing invalid is ever sent. Dates must match
//! `YYYY-MM-DD HH:mm` exactly, scores are non-negative, and taggable
//! entities carry at most five tags.

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDateTime;
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use shared::models::{CompetitionCreate, CompetitionUpdate, ParticipantDraft};

use crate::{ClientError, ClientResult};

/// Exact format accepted for a match begin time
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Most tags a post or competition may carry
pub const MAX_TAGS: usize = 5;

/// New-post form
#[derive(Debug, Clone, Validate, Serialize)]
pub struct PostForm {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
    #[validate(length(
        min = 1,
        max = 5,
        message = "Select between one and five tags"
    ))]
    pub tag_ids: Vec<i64>,
}

/// Match create/edit form
#[derive(Debug, Clone, Validate, Serialize)]
pub struct MatchForm {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Sport must not be empty"))]
    pub sport: String,
    #[validate(custom(function = validate_begin_time))]
    pub time_begin: String,
    pub is_finished: bool,
    #[validate(length(max = 5, message = "At most five tags"))]
    pub tag_ids: Vec<i64>,
    #[validate(custom(function = validate_participants))]
    pub participants: Vec<ParticipantDraft>,
}

impl MatchForm {
    /// Payload for the create endpoint (participants travel separately)
    pub fn to_create(&self) -> CompetitionCreate {
        CompetitionCreate {
            name: self.name.clone(),
            sport: self.sport.clone(),
            time_begin: self.time_begin.clone(),
            is_finished: self.is_finished,
            tag_ids: self.tag_ids.clone(),
        }
    }

    /// Payload for the base-update endpoint
    pub fn to_update(&self, id: i64) -> CompetitionUpdate {
        CompetitionUpdate {
            id,
            name: self.name.clone(),
            sport: self.sport.clone(),
            time_begin: self.time_begin.clone(),
            is_finished: self.is_finished,
            tag_ids: self.tag_ids.clone(),
        }
    }
}

/// Comment / reply form
#[derive(Debug, Clone, Validate, Serialize)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "Reply must not be empty"))]
    pub content: String,
}

/// Report form
#[derive(Debug, Clone, Validate, Serialize)]
pub struct ReportForm {
    #[validate(length(min = 1, message = "Please give a reason"))]
    pub reason: String,
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_begin_time(value: &str) -> Result<(), ValidationError> {
    // chrono tolerates unpadded fields, so strictness needs the
    // round-trip comparison on top of the parse.
    let strict = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .is_ok_and(|parsed| parsed.format(DATETIME_FORMAT).to_string() == value);
    if strict {
        Ok(())
    } else {
        Err(invalid(
            "time_begin",
            "Begin time must match YYYY-MM-DD HH:mm",
        ))
    }
}

fn validate_participants(participants: &Vec<ParticipantDraft>) -> Result<(), ValidationError> {
    if participants.is_empty() {
        return Err(invalid(
            "participants",
            "At least one participant is required",
        ));
    }
    for p in participants {
        if p.name.trim().is_empty() {
            return Err(invalid(
                "participants",
                "Participant names must not be empty",
            ));
        }
        if p.score < 0 {
            return Err(invalid("participants", "Scores must be zero or positive"));
        }
    }
    Ok(())
}

/// Validate a form, converting the first failure into a [`ClientError`]
pub fn check<T: Validate>(form: &T) -> ClientResult<()> {
    form.validate()
        .map_err(|errors| ClientError::Validation(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

/// Re-entrancy guard for form submission
///
/// Holding the token stands for an in-flight submission; a second submit
/// while one is pending gets `None` and must be dropped by the caller.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a submission, or `None` when one is already in flight
    pub fn begin(&self) -> Option<SubmitToken> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitToken {
                in_flight: self.in_flight.clone(),
            })
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases the submit guard on drop
pub struct SubmitToken {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmitToken {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
