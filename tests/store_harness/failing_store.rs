//! A record store whose writes can be switched to fail.
//!
//! Wraps an [`InMemoryRecordStore`]; reads always pass through. While
//! failing, every write returns `StorageError::Io` and leaves the inner
//! store untouched. Clones share both the records and the switch.

use async_trait::async_trait;
use invoicer::core::error::{InvoicerResult, StorageError};
use invoicer::core::record::Record;
use invoicer::core::store::RecordStore;
use invoicer::storage::InMemoryRecordStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone)]
pub struct FailingStore<T> {
    inner: InMemoryRecordStore<T>,
    failing: Arc<AtomicBool>,
}

impl<T: Record> FailingStore<T> {
    pub fn new() -> Self {
        Self {
            inner: InMemoryRecordStore::new(),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> InvoicerResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                path: format!("{}.json", T::resource_name()),
                message: "disk full".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for FailingStore<T> {
    async fn list(&self) -> InvoicerResult<Vec<T>> {
        self.inner.list().await
    }

    async fn get(&self, id: &str) -> InvoicerResult<Option<T>> {
        self.inner.get(id).await
    }

    async fn put(&self, record: T) -> InvoicerResult<T> {
        self.check()?;
        self.inner.put(record).await
    }

    async fn insert(&self, record: T, last_sequence: u64) -> InvoicerResult<T> {
        self.check()?;
        self.inner.insert(record, last_sequence).await
    }

    async fn delete(&self, id: &str) -> InvoicerResult<bool> {
        self.check()?;
        self.inner.delete(id).await
    }

    async fn last_sequence(&self) -> InvoicerResult<u64> {
        self.inner.last_sequence().await
    }

    async fn replace_all(&self, records: Vec<T>, last_sequence: u64) -> InvoicerResult<()> {
        self.check()?;
        self.inner.replace_all(records, last_sequence).await
    }
}
