#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use feedback_app::cli::{Cli, Command};
use feedback_app::commands;
use feedback_app::error::AppResult;
use feedback_app::state::AppState;
use feedback_app::store::FeedbackStore;
use feedback_core::feedback::{FeedbackDraft, FeedbackType, NewFeedback, Priority};
use feedback_core::types::FeedbackId;
use feedback_db::{KvStore, MemoryKvStore, StorageError};

/// Memory store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyKvStore {
    inner: MemoryKvStore,
    fail_writes: AtomicBool,
}

impl FlakyKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("quota exceeded".into()))
        } else {
            Ok(())
        }
    }
}

impl KvStore for FlakyKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.check()?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove(key).await
    }
}

/// Store with no simulated latency over shared memory storage.
pub async fn memory_store() -> (Arc<MemoryKvStore>, FeedbackStore<Arc<MemoryKvStore>>) {
    let storage = Arc::new(MemoryKvStore::new());
    let store = FeedbackStore::load(Arc::clone(&storage), Duration::ZERO)
        .await
        .expect("empty storage should load");
    (storage, store)
}

pub fn new_feedback(title: &str, feedback_type: FeedbackType, priority: Priority) -> NewFeedback {
    FeedbackDraft::new(title, format!("{title} message"), feedback_type, Some(priority))
        .into_new(FeedbackId::generate())
        .expect("draft should be valid")
}

pub async fn open_state(storage: Arc<MemoryKvStore>) -> AppState<MemoryKvStore> {
    AppState::open(storage, Duration::ZERO)
        .await
        .expect("state should open")
}

/// Parse `args` as a command line (without the binary name) and run it.
pub async fn run<S: KvStore>(state: &mut AppState<S>, args: &[&str]) -> AppResult<String> {
    let argv = std::iter::once("feedback-tracker").chain(args.iter().copied());
    let command: Command = <Cli as clap::Parser>::parse_from(argv).command;
    let mut out = Vec::new();
    commands::execute(state, command, &mut out).await?;
    Ok(String::from_utf8(out).expect("output should be utf-8"))
}
