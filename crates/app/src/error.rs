use feedback_core::error::CoreError;
use feedback_db::StorageError;

use crate::store::StoreError;

/// Application-level error type for commands.
///
/// Wraps the domain, storage, and store errors and adds the routing and
/// configuration failures the CLI reports.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `feedback_core` (validation, not found).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing the persistence boundary failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A feedback store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A dashboard command was issued without a session.
    #[error("Not logged in. Run `feedback-tracker login` first.")]
    Unauthenticated,

    /// `login` was issued while a session exists.
    #[error("Already logged in as {0}. Run `feedback-tracker logout` first.")]
    AlreadyAuthenticated(String),

    /// An environment variable held an unusable value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Convenience type alias for command return values.
pub type AppResult<T> = Result<T, AppError>;
