//! Repository for the logged-in session key.

use feedback_core::session::Session;

use crate::error::StorageError;
use crate::kv::KvStore;
use crate::SESSION_KEY;

pub struct SessionRepo;

impl SessionRepo {
    pub async fn load<S: KvStore>(store: &S) -> Result<Option<Session>, StorageError> {
        match store.get(SESSION_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(None),
        }
    }

    pub async fn save<S: KvStore>(store: &S, session: &Session) -> Result<(), StorageError> {
        store.set(SESSION_KEY, serde_json::to_string(session)?).await
    }

    pub async fn clear<S: KvStore>(store: &S) -> Result<(), StorageError> {
        store.remove(SESSION_KEY).await
    }
}
