/// Failure at the persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded as JSON.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused the request (quota, lock poisoning, etc.).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
