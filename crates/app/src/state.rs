use std::sync::Arc;
use std::time::Duration;

use feedback_db::{KvStore, StorageError};

use crate::session::SessionStore;
use crate::store::FeedbackStore;

/// Application state: both stores over one shared storage namespace.
pub struct AppState<S> {
    pub session: SessionStore<Arc<S>>,
    pub feedback: FeedbackStore<Arc<S>>,
}

impl<S: KvStore> AppState<S> {
    pub async fn open(storage: Arc<S>, latency: Duration) -> Result<Self, StorageError> {
        let session = SessionStore::load(Arc::clone(&storage)).await?;
        let feedback = FeedbackStore::load(storage, latency).await?;
        Ok(Self { session, feedback })
    }
}
