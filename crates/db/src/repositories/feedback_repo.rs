//! Repository for the feedback collection key.

use feedback_core::feedback::FeedbackRecord;

use crate::error::StorageError;
use crate::kv::KvStore;
use crate::FEEDBACK_KEY;

/// Whole-collection load and save. There are no per-record writes: every
/// save overwrites the full array.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Load the collection. A missing key is an empty collection.
    pub async fn load<S: KvStore>(store: &S) -> Result<Vec<FeedbackRecord>, StorageError> {
        match store.get(FEEDBACK_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the stored collection with `items`.
    pub async fn save<S: KvStore>(store: &S, items: &[FeedbackRecord]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        store.set(FEEDBACK_KEY, raw).await?;
        tracing::debug!(count = items.len(), "Feedback collection saved");
        Ok(())
    }
}
