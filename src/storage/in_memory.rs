//! In-memory implementation of RecordStore for testing and development

use crate::core::error::{InvoicerResult, StorageError};
use crate::core::record::Record;
use crate::core::store::{RecordStore, StoreDocument, already_exists};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

const BACKEND: &str = "in-memory";

struct Collection<T> {
    records: IndexMap<String, T>,
    last_sequence: u64,
}

/// In-memory record store
///
/// Keeps insertion order. Uses RwLock for thread-safe access; clones share
/// the same collection.
#[derive(Clone)]
pub struct InMemoryRecordStore<T> {
    inner: Arc<RwLock<Collection<T>>>,
}

impl<T: Record> InMemoryRecordStore<T> {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::from_document(StoreDocument::default())
    }

    /// Seed a store from a persisted document
    pub fn from_document(document: StoreDocument<T>) -> Self {
        let records = document
            .records
            .into_iter()
            .map(|record| (record.id().to_string(), record))
            .collect();

        Self {
            inner: Arc::new(RwLock::new(Collection {
                records,
                last_sequence: document.last_sequence_number,
            })),
        }
    }

    fn read(&self) -> InvoicerResult<RwLockReadGuard<'_, Collection<T>>> {
        self.inner.read().map_err(|_| {
            StorageError::LockPoisoned {
                backend: BACKEND.to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> InvoicerResult<RwLockWriteGuard<'_, Collection<T>>> {
        self.inner.write().map_err(|_| {
            StorageError::LockPoisoned {
                backend: BACKEND.to_string(),
            }
            .into()
        })
    }
}

impl<T: Record> Default for InMemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for InMemoryRecordStore<T> {
    async fn list(&self) -> InvoicerResult<Vec<T>> {
        Ok(self.read()?.records.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> InvoicerResult<Option<T>> {
        Ok(self.read()?.records.get(id).cloned())
    }

    async fn put(&self, record: T) -> InvoicerResult<T> {
        self.write()?
            .records
            .insert(record.id().to_string(), record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &str) -> InvoicerResult<bool> {
        Ok(self.write()?.records.shift_remove(id).is_some())
    }

    async fn last_sequence(&self) -> InvoicerResult<u64> {
        Ok(self.read()?.last_sequence)
    }

    async fn insert(&self, record: T, last_sequence: u64) -> InvoicerResult<T> {
        let mut collection = self.write()?;
        if collection.records.contains_key(record.id()) {
            return Err(already_exists::<T>(record.id()));
        }
        collection
            .records
            .insert(record.id().to_string(), record.clone());
        collection.last_sequence = last_sequence;
        Ok(record)
    }

    async fn replace_all(&self, records: Vec<T>, last_sequence: u64) -> InvoicerResult<()> {
        let records = records
            .into_iter()
            .map(|record| (record.id().to_string(), record))
            .collect();

        let mut collection = self.write()?;
        collection.records = records;
        collection.last_sequence = last_sequence;
        Ok(())
    }
}
