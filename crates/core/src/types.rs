use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a feedback record.
///
/// New ids are random v4 UUIDs, but any string loaded from storage is
/// accepted so records written by older clients keep their identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackId(String);

impl FeedbackId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for FeedbackId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FeedbackId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
