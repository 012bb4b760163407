//! In-memory feedback collection backed by the persistence port.
//!
//! Every mutation waits out the simulated request latency, computes the next
//! collection on a copy, writes the full copy through [`FeedbackRepo`], and
//! only then commits it in memory. Mutations are serialized, so the
//! in-memory collection and the persisted copy agree whenever no operation
//! is in flight, whether the last operation succeeded or failed.

use std::sync::Mutex as StdMutex;
use std::time::Duration;

use feedback_core::feedback::{FeedbackRecord, FeedbackUpdate, NewFeedback};
use feedback_core::types::FeedbackId;
use feedback_db::repositories::FeedbackRepo;
use feedback_db::{KvStore, StorageError};
use tokio::sync::{watch, Mutex};

// ---------------------------------------------------------------------------
// Status + errors
// ---------------------------------------------------------------------------

/// Aggregate request status for observers such as a loading indicator.
///
/// Callers learn the outcome of their own operation from its return value;
/// this value is `Pending` while any operation is in flight and otherwise
/// reflects the most recently completed one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Writing the collection failed; nothing was committed.
    #[error("Failed to save feedback: {0}")]
    Persist(#[from] StorageError),

    /// A record with this id is already in the collection.
    #[error("Feedback with id {0} already exists")]
    DuplicateId(FeedbackId),
}

/// Result of an update. A missing id is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(FeedbackRecord),
    NotFound,
}

// ---------------------------------------------------------------------------
// FeedbackStore
// ---------------------------------------------------------------------------

pub struct FeedbackStore<S> {
    storage: S,
    items: Mutex<Vec<FeedbackRecord>>,
    latency: Duration,
    flight: StdMutex<Flight>,
    status: watch::Sender<RequestStatus>,
}

/// Operations in flight and the outcome of the last one that completed.
#[derive(Debug, Default)]
struct Flight {
    count: usize,
    settled: RequestStatus,
}

/// Counts one operation as in flight until dropped, so an operation whose
/// future is abandoned mid-way still releases `Pending`.
struct FlightGuard<'a> {
    flight: &'a StdMutex<Flight>,
    status: &'a watch::Sender<RequestStatus>,
}

impl FlightGuard<'_> {
    fn settle(&self, outcome: RequestStatus) {
        lock_flight(self.flight).settled = outcome;
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut flight = lock_flight(self.flight);
        flight.count = flight.count.saturating_sub(1);
        if flight.count == 0 {
            self.status.send_replace(flight.settled.clone());
        }
    }
}

fn lock_flight(flight: &StdMutex<Flight>) -> std::sync::MutexGuard<'_, Flight> {
    flight.lock().unwrap_or_else(|e| e.into_inner())
}

impl<S: KvStore> FeedbackStore<S> {
    /// Restore the collection from `storage`.
    pub async fn load(storage: S, latency: Duration) -> Result<Self, StorageError> {
        let items = FeedbackRepo::load(&storage).await?;
        tracing::debug!(count = items.len(), "Feedback collection loaded");
        let (status, _) = watch::channel(RequestStatus::Idle);
        Ok(Self {
            storage,
            items: Mutex::new(items),
            latency,
            flight: StdMutex::new(Flight::default()),
            status,
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // --- Readers ---

    /// Clone of the collection in insertion order.
    pub async fn snapshot(&self) -> Vec<FeedbackRecord> {
        self.items.lock().await.clone()
    }

    pub async fn get(&self, id: &FeedbackId) -> Option<FeedbackRecord> {
        self.items.lock().await.iter().find(|r| &r.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    pub fn status(&self) -> RequestStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<RequestStatus> {
        self.status.subscribe()
    }

    // --- Operations ---

    /// Append a new record with `archived = false`.
    pub async fn create(&self, new: NewFeedback) -> Result<FeedbackRecord, StoreError> {
        self.mutate("create", move |items| {
            if items.iter().any(|r| r.id == new.id) {
                return Err(StoreError::DuplicateId(new.id));
            }
            let record = new.into_record();
            items.push(record.clone());
            Ok(record)
        })
        .await
    }

    /// Replace every field of the record with `update.id`.
    pub async fn update(&self, update: FeedbackUpdate) -> Result<UpdateOutcome, StoreError> {
        self.mutate("update", move |items| {
            let Some(existing) = items.iter_mut().find(|r| r.id == update.id) else {
                tracing::warn!(id = %update.id, "Update targeted a missing feedback record");
                return Ok(UpdateOutcome::NotFound);
            };
            *existing = update.apply_to(existing);
            Ok(UpdateOutcome::Updated(existing.clone()))
        })
        .await
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub async fn delete(&self, id: &FeedbackId) -> Result<bool, StoreError> {
        let removed = self.delete_many(std::slice::from_ref(id)).await?;
        Ok(removed > 0)
    }

    /// Remove every record whose id is in `ids` in a single write.
    pub async fn delete_many(&self, ids: &[FeedbackId]) -> Result<usize, StoreError> {
        self.mutate("delete", |items| {
            let before = items.len();
            items.retain(|r| !ids.contains(&r.id));
            Ok(before - items.len())
        })
        .await
    }

    /// Set `archived = true` on every record in `ids`; unknown ids are ignored.
    pub async fn archive_many(&self, ids: &[FeedbackId]) -> Result<usize, StoreError> {
        self.set_archived("archive", ids, true).await
    }

    /// Set `archived = false` on every record in `ids`; unknown ids are ignored.
    pub async fn unarchive_many(&self, ids: &[FeedbackId]) -> Result<usize, StoreError> {
        self.set_archived("unarchive", ids, false).await
    }

    async fn set_archived(
        &self,
        op: &'static str,
        ids: &[FeedbackId],
        archived: bool,
    ) -> Result<usize, StoreError> {
        self.mutate(op, |items| {
            let mut matched = 0;
            for record in items.iter_mut().filter(|r| ids.contains(&r.id)) {
                record.archived = archived;
                matched += 1;
            }
            Ok(matched)
        })
        .await
    }

    // --- Internals ---

    async fn mutate<T, F>(&self, op: &'static str, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<FeedbackRecord>) -> Result<T, StoreError>,
    {
        let flight = self.begin();
        tracing::debug!(op, "Feedback operation started");

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = self.commit(op, apply).await;
        flight.settle(match &result {
            Ok(_) => RequestStatus::Succeeded,
            Err(err) => {
                tracing::error!(op, error = %err, "Feedback operation failed");
                RequestStatus::Failed(err.to_string())
            }
        });
        result
    }

    async fn commit<T, F>(&self, op: &'static str, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<FeedbackRecord>) -> Result<T, StoreError>,
    {
        let mut items = self.items.lock().await;
        let mut next = items.clone();
        let outcome = apply(&mut next)?;

        if next == *items {
            return Ok(outcome);
        }

        FeedbackRepo::save(&self.storage, &next).await?;
        *items = next;
        tracing::info!(op, count = items.len(), "Feedback collection committed");
        Ok(outcome)
    }

    fn begin(&self) -> FlightGuard<'_> {
        let mut flight = lock_flight(&self.flight);
        flight.count += 1;
        self.status.send_replace(RequestStatus::Pending);
        drop(flight);
        FlightGuard {
            flight: &self.flight,
            status: &self.status,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
