#![forbid(unsafe_code)]

pub mod repository;
pub mod responses;
pub mod sqlite;

pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
pub use responses::{COUNTER_KEY, DeleteOutcome, RECORDS_KEY, ResponseStore};
