use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the storage file (default: `.feedback-tracker`).
    pub data_dir: PathBuf,
    /// Simulated latency applied to every feedback operation (default: 500ms).
    pub latency: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
        }
    }
}

const DEFAULT_DATA_DIR: &str = ".feedback-tracker";
const DEFAULT_LATENCY_MS: u64 = 500;

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var               | Default             |
    /// |-----------------------|---------------------|
    /// | `FEEDBACK_DATA_DIR`   | `.feedback-tracker` |
    /// | `FEEDBACK_LATENCY_MS` | `500`               |
    pub fn from_env() -> AppResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let data_dir = lookup("FEEDBACK_DATA_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let latency_ms: u64 = match lookup("FEEDBACK_LATENCY_MS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::Config(format!(
                    "FEEDBACK_LATENCY_MS must be a non-negative integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_LATENCY_MS,
        };

        Ok(Self {
            data_dir,
            latency: Duration::from_millis(latency_ms),
        })
    }
}
