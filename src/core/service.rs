//! Record service: identifier assignment, patch merging, backup and restore

use crate::core::allocator::IdAllocator;
use crate::core::error::{InvoicerResult, RecordError};
use crate::core::record::Record;
use crate::core::store::RecordStore;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of a successful restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSummary {
    pub restored: usize,
    pub last_sequence: u64,
}

/// The sole mutator of a record collection
///
/// Mutations are serialized through a write gate so that allocate → persist
/// happens as a unit. A new record and its counter reach the store in one
/// write. Reads go straight to the store.
pub struct RecordService<T: Record> {
    store: Arc<dyn RecordStore<T>>,
    allocator: IdAllocator,
    write_gate: Mutex<()>,
}

impl<T: Record> RecordService<T> {
    pub fn new(store: Arc<dyn RecordStore<T>>) -> Self {
        Self {
            store,
            allocator: IdAllocator::new(T::id_prefix()),
            write_gate: Mutex::new(()),
        }
    }

    /// All records in storage order
    pub async fn list(&self) -> InvoicerResult<Vec<T>> {
        self.store.list().await
    }

    /// A record by id, or `NotFound`
    pub async fn get(&self, id: &str) -> InvoicerResult<T> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| not_found::<T>(id))
    }

    /// Allocate an id, persist the new record and return it
    pub async fn create(&self, draft: T::Draft) -> InvoicerResult<T> {
        let _guard = self.write_gate.lock().await;

        let records = self.store.list().await?;
        let last_used = self.store.last_sequence().await?;
        let allocation = self
            .allocator
            .next_after(records.iter().map(|r| r.id()), last_used)
            .ok_or_else(|| RecordError::SequenceExhausted {
                record_type: T::resource_name_singular().to_string(),
            })?;

        let record = self
            .store
            .insert(T::from_draft(allocation.id, draft), allocation.sequence)
            .await?;

        tracing::debug!(
            record_type = T::resource_name_singular(),
            id = record.id(),
            "record created"
        );
        Ok(record)
    }

    /// Merge `patch` over an existing record and persist it
    pub async fn update(&self, id: &str, patch: T::Patch) -> InvoicerResult<T> {
        let _guard = self.write_gate.lock().await;

        let mut record = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| not_found::<T>(id))?;
        record.apply_patch(patch);
        let record = self.store.put(record).await?;

        tracing::debug!(
            record_type = T::resource_name_singular(),
            id = record.id(),
            "record updated"
        );
        Ok(record)
    }

    /// Remove a record, or `NotFound`
    pub async fn delete(&self, id: &str) -> InvoicerResult<()> {
        let _guard = self.write_gate.lock().await;

        if !self.store.delete(id).await? {
            return Err(not_found::<T>(id));
        }

        tracing::debug!(
            record_type = T::resource_name_singular(),
            id,
            "record deleted"
        );
        Ok(())
    }

    /// The whole collection as a bare JSON array
    pub async fn backup(&self) -> InvoicerResult<Value> {
        let records = self.store.list().await?;
        serde_json::to_value(records).map_err(|e| {
            RecordError::SerializationError {
                record_type: T::resource_name_singular().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Replace the collection with the records in `document`
    ///
    /// The document must be a JSON array of complete records with unique ids.
    /// On success the allocator counter is reset to the highest matching
    /// suffix among the restored ids; on failure nothing changes.
    pub async fn restore(&self, document: Value) -> InvoicerResult<RestoreSummary> {
        let Value::Array(items) = document else {
            return Err(RecordError::InvalidFormat {
                message: format!("Expected an array of {}", T::resource_name()),
            }
            .into());
        };

        let mut records = Vec::with_capacity(items.len());
        let mut seen = HashSet::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let record: T = serde_json::from_value(item).map_err(|e| RecordError::InvalidFormat {
                message: format!(
                    "{} at index {} is malformed: {}",
                    T::resource_name_singular(),
                    index,
                    e
                ),
            })?;
            if !seen.insert(record.id().to_string()) {
                return Err(RecordError::InvalidFormat {
                    message: format!("duplicate id '{}' at index {}", record.id(), index),
                }
                .into());
            }
            records.push(record);
        }

        let last_sequence = self.allocator.max_sequence(records.iter().map(|r| r.id()));
        let restored = records.len();

        let _guard = self.write_gate.lock().await;
        self.store.replace_all(records, last_sequence).await?;

        tracing::info!(
            record_type = T::resource_name_singular(),
            restored,
            last_sequence,
            "collection restored"
        );
        Ok(RestoreSummary {
            restored,
            last_sequence,
        })
    }
}

fn not_found<T: Record>(id: &str) -> crate::core::error::InvoicerError {
    RecordError::NotFound {
        record_type: T::resource_name_singular().to_string(),
        id: id.to_string(),
    }
    .into()
}
