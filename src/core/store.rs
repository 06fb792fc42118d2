//! Record store trait and the persisted document layout

use crate::core::error::{InvoicerError, InvoicerResult, RecordError};
use crate::core::record::Record;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Durable representation of one record collection
///
/// `last_sequence_number` is the allocator counter and is kept in lockstep
/// with `records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument<T> {
    pub last_sequence_number: u64,
    pub records: Vec<T>,
}

impl<T> Default for StoreDocument<T> {
    fn default() -> Self {
        Self {
            last_sequence_number: 0,
            records: Vec::new(),
        }
    }
}

/// Keyed storage for one record collection
///
/// Implementations persist every mutation before returning. The framework
/// is agnostic to the underlying storage mechanism.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// All records in storage order
    async fn list(&self) -> InvoicerResult<Vec<T>>;

    /// A record by id
    async fn get(&self, id: &str) -> InvoicerResult<Option<T>>;

    /// Insert a record, or replace the one with the same id in place
    async fn put(&self, record: T) -> InvoicerResult<T>;

    /// Append a new record and advance the counter to `last_sequence` in
    /// one write
    ///
    /// Fails with `RecordError::AlreadyExists` if the id is taken; nothing
    /// changes on failure.
    async fn insert(&self, record: T, last_sequence: u64) -> InvoicerResult<T>;

    /// Remove a record; returns whether it existed
    async fn delete(&self, id: &str) -> InvoicerResult<bool>;

    /// The last-used allocator sequence
    async fn last_sequence(&self) -> InvoicerResult<u64>;

    /// Replace the whole collection and its counter in one write
    async fn replace_all(&self, records: Vec<T>, last_sequence: u64) -> InvoicerResult<()>;
}

/// The error a store returns when `insert` meets an existing id
pub fn already_exists<T: Record>(id: &str) -> InvoicerError {
    RecordError::AlreadyExists {
        record_type: T::resource_name_singular().to_string(),
        id: id.to_string(),
    }
    .into()
}
