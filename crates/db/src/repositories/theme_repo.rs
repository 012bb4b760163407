//! Repository for the theme key. The value is stored raw, not JSON-encoded.

use feedback_core::theme::Theme;

use crate::error::StorageError;
use crate::kv::KvStore;
use crate::THEME_KEY;

pub struct ThemeRepo;

impl ThemeRepo {
    pub async fn load<S: KvStore>(store: &S) -> Result<Theme, StorageError> {
        let raw = store.get(THEME_KEY).await?;
        Ok(Theme::from_stored(raw.as_deref()))
    }

    pub async fn save<S: KvStore>(store: &S, theme: Theme) -> Result<(), StorageError> {
        store.set(THEME_KEY, theme.as_str().to_string()).await
    }
}
