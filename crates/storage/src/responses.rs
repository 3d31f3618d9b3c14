//! Typed persistence of completed quiz attempts over a `KeyValueStore`.
//!
//! Layout (two entries):
//! - `users`: JSON object mapping decimal-string id to `{name, answers, score}`
//! - `userIdCounter`: JSON integer, the last issued id
//!
//! Reads never fail: a missing or unparsable entry is treated as empty and
//! logged. Mutations surface backend failures, including failed reads of the
//! entries they are about to rewrite, as `StorageError`.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use trivia_core::model::{AnswerSet, Confirmation, RecordId, ScoredRecord};

use crate::repository::{KeyValueStore, StorageError};

/// Key holding the record mapping.
pub const RECORDS_KEY: &str = "users";
/// Key holding the last issued id.
pub const COUNTER_KEY: &str = "userIdCounter";

/// Persisted value shape; the id lives in the map key.
#[derive(Debug, Serialize, Deserialize)]
struct StoredResponse {
    name: String,
    answers: AnswerSet,
    score: u32,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Declined,
}

/// Durable store of scored quiz records.
///
/// Ids come from a monotonic counter that never decreases, so ids are never
/// reused after deletion. Mutations are serialised so a read-modify-write is
/// one uninterrupted step.
#[derive(Clone)]
pub struct ResponseStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl ResponseStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All persisted records in ascending id order.
    pub async fn load_all(&self) -> BTreeMap<RecordId, ScoredRecord> {
        match self.read_records().await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "reading stored responses failed; treating store as empty");
                BTreeMap::new()
            }
        }
    }

    /// Records whose name contains `query`, ignoring case, in id order.
    ///
    /// An empty query returns every record.
    pub async fn search(&self, query: &str) -> Vec<ScoredRecord> {
        self.load_all()
            .await
            .into_values()
            .filter(|record| record.name_matches(query))
            .collect()
    }

    pub async fn get(&self, id: RecordId) -> Option<ScoredRecord> {
        self.load_all().await.remove(&id)
    }

    pub async fn count(&self) -> usize {
        self.load_all().await.len()
    }

    /// Last issued id, or 0 if none was ever issued.
    ///
    /// A missing or corrupt counter is recovered from the highest stored id.
    pub async fn counter(&self) -> u64 {
        let records = self.load_all().await;
        match self.effective_counter(&records).await {
            Ok(counter) => counter,
            Err(err) => {
                warn!(error = %err, "reading id counter failed; recovering from records");
                highest_id(&records)
            }
        }
    }

    /// Persist a completed attempt under a freshly issued id.
    ///
    /// Records and counter are written as one batch.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the current entries cannot be read from the
    /// backend, or the batch cannot be encoded or written. Nothing is written
    /// after a failed read.
    pub async fn append(
        &self,
        name: &str,
        answers: &AnswerSet,
        score: u32,
    ) -> Result<RecordId, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records().await?;
        let last = self.effective_counter(&records).await?;
        let next = last
            .checked_add(1)
            .ok_or_else(|| StorageError::Serialization("id counter overflow".into()))?;
        let id = RecordId::new(next);

        records.insert(
            id,
            ScoredRecord {
                id,
                name: name.to_string(),
                answers: answers.clone(),
                score,
            },
        );

        let encoded_records = encode_records(&records)?;
        let encoded_counter =
            serde_json::to_string(&next).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv
            .set_many(&[
                (RECORDS_KEY, encoded_records),
                (COUNTER_KEY, encoded_counter),
            ])
            .await?;

        debug!(%id, score, "response appended");
        Ok(id)
    }

    /// Permanently remove a record.
    ///
    /// Nothing is written unless `confirmation` is `Confirmed` and the id
    /// exists. Remaining ids are not renumbered and the counter is untouched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the mapping cannot be read from the backend
    /// or the updated mapping cannot be written.
    pub async fn delete(
        &self,
        id: RecordId,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, StorageError> {
        if !confirmation.is_confirmed() {
            debug!(%id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records().await?;
        if records.remove(&id).is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        self.kv.set(RECORDS_KEY, &encode_records(&records)?).await?;
        debug!(%id, "response deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Stored records, with absent or corrupt data read as empty.
    ///
    /// Backend failures are returned so mutations never build on a
    /// mapping that merely could not be read.
    async fn read_records(&self) -> Result<BTreeMap<RecordId, ScoredRecord>, StorageError> {
        let Some(raw) = self.kv.get(RECORDS_KEY).await? else {
            return Ok(BTreeMap::new());
        };
        match decode_records(&raw) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(error = %err, "stored responses are corrupt; treating store as empty");
                Ok(BTreeMap::new())
            }
        }
    }

    async fn effective_counter(
        &self,
        records: &BTreeMap<RecordId, ScoredRecord>,
    ) -> Result<u64, StorageError> {
        let stored = match self.kv.get(COUNTER_KEY).await? {
            Some(raw) => serde_json::from_str::<u64>(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "stored id counter is corrupt; recovering from records");
                0
            }),
            None => 0,
        };
        Ok(stored.max(highest_id(records)))
    }

    #[cfg(test)]
    pub(crate) fn shares_lock_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.write_lock, &other.write_lock)
    }
}

fn highest_id(records: &BTreeMap<RecordId, ScoredRecord>) -> u64 {
    records.keys().next_back().map_or(0, RecordId::value)
}

fn decode_records(raw: &str) -> Result<BTreeMap<RecordId, ScoredRecord>, StorageError> {
    let stored: BTreeMap<String, StoredResponse> =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let mut records = BTreeMap::new();
    for (key, value) in stored {
        let id = key
            .parse::<RecordId>()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        records.insert(
            id,
            ScoredRecord {
                id,
                name: value.name,
                answers: value.answers,
                score: value.score,
            },
        );
    }
    Ok(records)
}

fn encode_records(records: &BTreeMap<RecordId, ScoredRecord>) -> Result<String, StorageError> {
    let stored: BTreeMap<String, StoredResponse> = records
        .values()
        .map(|record| {
            (
                record.id.to_string(),
                StoredResponse {
                    name: record.name.clone(),
                    answers: record.answers.clone(),
                    score: record.score,
                },
            )
        })
        .collect();
    serde_json::to_string(&stored).map_err(|e| StorageError::Serialization(e.to_string()))
}
