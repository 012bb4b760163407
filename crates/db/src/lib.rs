//! Persistence boundary for the feedback tracker.
//!
//! [`kv::KvStore`] is the key-value port ("local storage"); the
//! repositories give typed, JSON-encoded access to the keys the application
//! uses.

pub mod error;
pub mod file;
pub mod kv;
pub mod repositories;

pub use error::StorageError;
pub use file::FileKvStore;
pub use kv::{KvStore, MemoryKvStore};

/// Key holding the logged-in session object.
pub const SESSION_KEY: &str = "loggedUser";

/// Key holding the JSON array of feedback records.
pub const FEEDBACK_KEY: &str = "feedbackItems";

/// Key holding the raw `"dark"` / `"light"` theme value.
pub const THEME_KEY: &str = "theme";
