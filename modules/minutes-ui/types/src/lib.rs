//! Shared types for the minutes backend and its HTTP clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted meeting title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Shortest accepted meeting content on create, in characters.
pub const CONTENT_MIN_CHARS: usize = 10;

/// Stored in `action_items` when the summarizer found nothing to do.
pub const NO_ACTION_ITEMS: &str = "None";

// =====================================================
// Domain Types
// =====================================================

/// A recorded meeting plus its derived summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    /// Verbatim transcript or notes
    pub content: String,
    /// Markdown summary, null when never produced
    pub summary: Option<String>,
    /// Markdown action-item table, or [`NO_ACTION_ITEMS`]
    pub action_items: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Meeting {
    /// Summary text worth showing, if any.
    pub fn visible_summary(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Action items worth showing: null, blank and the "none" sentinel are hidden.
    pub fn visible_action_items(&self) -> Option<&str> {
        self.action_items
            .as_deref()
            .filter(|s| !s.trim().is_empty() && !is_no_action_items(s))
    }
}

/// True when `value` is the "no action items" sentinel.
pub fn is_no_action_items(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(NO_ACTION_ITEMS)
}

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /api/meetings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMeetingRequest {
    pub title: String,
    pub content: String,
}

impl CreateMeetingRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        let content = self.content.trim();
        if content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        if content.chars().count() < CONTENT_MIN_CHARS {
            return Err(ValidationError::ContentTooShort);
        }
        Ok(())
    }
}

/// Body of `PUT /api/meetings/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMeetingRequest {
    pub title: String,
    pub content: String,
    /// Recompute summary and action items from the new content
    #[serde(default, skip_serializing_if = "is_false")]
    pub regenerate_summary: bool,
}

impl UpdateMeetingRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        Ok(())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(())
}

/// Query string of `GET /api/meetings`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MeetingsQuery {
    #[serde(default)]
    pub q: Option<String>,
}

// =====================================================
// Response Types
// =====================================================

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// =====================================================
// Validation
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Title must be at most {} characters", TITLE_MAX_CHARS)]
    TitleTooLong,
    #[error("Content is required")]
    EmptyContent,
    #[error("Content must be at least {} characters", CONTENT_MIN_CHARS)]
    ContentTooShort,
}
