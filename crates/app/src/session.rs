//! Current login identity, mirrored to the session key.

use feedback_core::session::{Credentials, Session};
use feedback_db::repositories::SessionRepo;
use feedback_db::{KvStore, StorageError};

use crate::error::AppResult;

pub struct SessionStore<S> {
    storage: S,
    current: Option<Session>,
}

impl<S: KvStore> SessionStore<S> {
    /// Restore the persisted session. An unreadable session value is treated
    /// as logged out rather than failing startup.
    pub async fn load(storage: S) -> Result<Self, StorageError> {
        let current = match SessionRepo::load(&storage).await {
            Ok(session) => session,
            Err(StorageError::Serialization(err)) => {
                tracing::warn!(error = %err, "Ignoring unreadable stored session");
                None
            }
            Err(err) => return Err(err),
        };
        Ok(Self { storage, current })
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Accept any non-empty email/password pair and persist the mock session.
    pub async fn login(&mut self, credentials: Credentials) -> AppResult<Session> {
        let session = credentials.into_session()?;
        SessionRepo::save(&self.storage, &session).await?;
        tracing::info!(email = %session.email, "Logged in");
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Forget the current session and erase its persisted copy.
    pub async fn logout(&mut self) -> AppResult<()> {
        SessionRepo::clear(&self.storage).await?;
        if let Some(session) = self.current.take() {
            tracing::info!(email = %session.email, "Logged out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use feedback_core::error::CoreError;
    use feedback_db::{MemoryKvStore, SESSION_KEY};

    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn login_persists_and_survives_reload() {
        let storage = Arc::new(MemoryKvStore::new());
        let mut sessions = SessionStore::load(Arc::clone(&storage)).await.unwrap();
        assert!(!sessions.is_authenticated());

        sessions
            .login(Credentials::new("me@example.com", "pw"))
            .await
            .unwrap();
        assert!(sessions.is_authenticated());

        let reloaded = SessionStore::load(Arc::clone(&storage)).await.unwrap();
        assert_eq!(reloaded.current().map(|s| s.email.as_str()), Some("me@example.com"));
    }

    #[tokio::test]
    async fn logout_erases_persisted_copy() {
        let storage = Arc::new(MemoryKvStore::new());
        let mut sessions = SessionStore::load(Arc::clone(&storage)).await.unwrap();
        sessions.login(Credentials::new("a", "b")).await.unwrap();
        sessions.logout().await.unwrap();

        assert!(sessions.current().is_none());
        assert_eq!(storage.get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn blank_credentials_change_nothing() {
        let storage = Arc::new(MemoryKvStore::new());
        let mut sessions = SessionStore::load(Arc::clone(&storage)).await.unwrap();
        let err = sessions.login(Credentials::new("a", "")).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
        assert_eq!(storage.get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_session_loads_as_logged_out() {
        let storage = MemoryKvStore::with_entries([(SESSION_KEY, "{not json")]);
        let sessions = SessionStore::load(storage).await.unwrap();
        assert!(!sessions.is_authenticated());
    }
}
