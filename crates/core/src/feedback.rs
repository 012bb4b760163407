//! Feedback record model, enums, and edge validation.
//!
//! Records are accepted into the collection only after a [`FeedbackDraft`]
//! passes validation; the store itself never re-checks titles or messages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use crate::error::CoreError;
use crate::types::FeedbackId;

// ---------------------------------------------------------------------------
// Feedback type
// ---------------------------------------------------------------------------

/// Category of a feedback record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FeedbackType {
    #[default]
    Bug,
    Feature,
    Improvement,
    Other,
    /// A stored value outside the known set, kept verbatim so saving the
    /// collection writes it back unchanged.
    Unknown(String),
}

/// All selectable feedback types, in form order.
pub const FEEDBACK_TYPES: &[FeedbackType] = &[
    FeedbackType::Bug,
    FeedbackType::Feature,
    FeedbackType::Improvement,
    FeedbackType::Other,
];

impl FeedbackType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bug => "Bug",
            Self::Feature => "Feature",
            Self::Improvement => "Improvement",
            Self::Other => "Other",
            Self::Unknown(raw) => raw,
        }
    }

    /// Known type names case-insensitively, anything else as `Unknown`.
    pub fn from_label(label: &str) -> Self {
        label
            .parse()
            .unwrap_or_else(|_| Self::Unknown(label.trim().to_string()))
    }

    fn from_stored(raw: String) -> Self {
        FEEDBACK_TYPES
            .iter()
            .find(|t| t.as_str() == raw)
            .cloned()
            .unwrap_or(Self::Unknown(raw))
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FeedbackType {
    type Err = CoreError;

    /// Case-insensitive parse of a selectable type name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FEEDBACK_TYPES
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .cloned()
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid feedback type '{s}'. Must be one of: Bug, Feature, Improvement, Other"
                ))
            })
    }
}

impl Serialize for FeedbackType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FeedbackType {
    /// Missing or null loads as the default; any other text is kept as is.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?
            .map(Self::from_stored)
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Urgency of a feedback record.
///
/// `Normal` is the fallback for legacy records saved without a priority. It
/// is never offered as a choice for new records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Low,
    Medium,
    High,
    #[default]
    Normal,
    /// Any other stored spelling, kept verbatim.
    Other(String),
}

/// Priorities selectable when creating or editing a record.
pub const SELECTABLE_PRIORITIES: &[Priority] = &[Priority::Low, Priority::Medium, Priority::High];

const STORED_PRIORITIES: &[Priority] = &[
    Priority::Low,
    Priority::Medium,
    Priority::High,
    Priority::Normal,
];

impl Priority {
    /// Stored label. `Normal` keeps the lowercase spelling legacy records use.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Normal => "normal",
            Self::Other(raw) => raw,
        }
    }

    /// Numeric rank used when sorting by priority. Any spelling of high,
    /// medium or low ranks as that level; everything else ranks 0.
    pub fn rank(&self) -> u8 {
        match self.as_str().to_ascii_lowercase().as_str() {
            "high" => 3,
            "medium" => 2,
            "low" => 1,
            _ => 0,
        }
    }

    /// Known priority names case-insensitively, anything else as `Other`.
    pub fn from_label(label: &str) -> Self {
        label
            .parse()
            .unwrap_or_else(|_| Self::Other(label.trim().to_string()))
    }

    /// Parse a priority a user may pick for a new or edited record.
    pub fn parse_selectable(s: &str) -> Result<Self, CoreError> {
        SELECTABLE_PRIORITIES
            .iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .cloned()
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid priority '{s}'. Must be one of: Low, Medium, High"
                ))
            })
    }

    fn from_stored(raw: String) -> Self {
        STORED_PRIORITIES
            .iter()
            .find(|p| p.as_str() == raw)
            .cloned()
            .unwrap_or(Self::Other(raw))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STORED_PRIORITIES
            .iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .cloned()
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid priority '{s}'. Must be one of: Low, Medium, High"
                ))
            })
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    /// Missing or null loads as `Normal`; any other text is kept as is.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?
            .map(Self::from_stored)
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A feedback record as held in the collection and persisted to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub feedback_type: FeedbackType,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub archived: bool,
}

/// Input for the create operation. `archived` is always false on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub id: FeedbackId,
    pub title: String,
    pub message: String,
    pub feedback_type: FeedbackType,
    pub priority: Priority,
}

impl NewFeedback {
    pub fn into_record(self) -> FeedbackRecord {
        FeedbackRecord {
            id: self.id,
            title: self.title,
            message: self.message,
            feedback_type: self.feedback_type,
            priority: self.priority,
            archived: false,
        }
    }
}

/// Full-replace payload for the update operation, keyed by `id`.
///
/// `priority: None` keeps the stored priority and `archived: None` keeps the
/// stored archived flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackUpdate {
    pub id: FeedbackId,
    pub title: String,
    pub message: String,
    pub feedback_type: FeedbackType,
    pub priority: Option<Priority>,
    pub archived: Option<bool>,
}

impl FeedbackUpdate {
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Produce the replacement for `existing`.
    pub fn apply_to(&self, existing: &FeedbackRecord) -> FeedbackRecord {
        FeedbackRecord {
            id: existing.id.clone(),
            title: self.title.clone(),
            message: self.message.clone(),
            feedback_type: self.feedback_type.clone(),
            priority: self
                .priority
                .clone()
                .unwrap_or_else(|| existing.priority.clone()),
            archived: self.archived.unwrap_or(existing.archived),
        }
    }
}

// ---------------------------------------------------------------------------
// Draft (edge validation)
// ---------------------------------------------------------------------------

/// Form input for adding or editing a record.
///
/// Text fields are trimmed on construction; validation then rejects blank
/// titles, blank messages, and a missing priority before any store
/// operation is dispatched.
#[derive(Debug, Clone, Validate)]
pub struct FeedbackDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub feedback_type: FeedbackType,
    #[validate(required(message = "Priority is required"))]
    pub priority: Option<Priority>,
}

impl FeedbackDraft {
    pub fn new(
        title: impl AsRef<str>,
        message: impl AsRef<str>,
        feedback_type: FeedbackType,
        priority: Option<Priority>,
    ) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            message: message.as_ref().trim().to_string(),
            feedback_type,
            priority,
        }
    }

    /// Pre-fill a draft from an existing record (the edit form).
    pub fn from_record(record: &FeedbackRecord) -> Self {
        Self::new(
            &record.title,
            &record.message,
            record.feedback_type.clone(),
            Some(record.priority.clone()),
        )
    }

    /// Validate and turn into a create payload with the caller's id.
    pub fn into_new(self, id: FeedbackId) -> Result<NewFeedback, CoreError> {
        self.validate()?;
        Ok(NewFeedback {
            id,
            title: self.title,
            message: self.message,
            feedback_type: self.feedback_type,
            priority: self.priority.unwrap_or_default(),
        })
    }

    /// Validate and turn into an update payload. `archived` is left unset.
    pub fn into_update(self, id: FeedbackId) -> Result<FeedbackUpdate, CoreError> {
        self.validate()?;
        Ok(FeedbackUpdate {
            id,
            title: self.title,
            message: self.message,
            feedback_type: self.feedback_type,
            priority: self.priority,
            archived: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
