//! JSON file implementation of RecordStore
//!
//! One document per collection:
//!
//! ```json
//! { "lastSequenceNumber": 3, "records": [ { "id": "INV-001", ... } ] }
//! ```
//!
//! The document is read once on open and rewritten in full on every
//! mutation. Writes go to a sibling temporary file that is then renamed over
//! the original, and the in-process copy is only updated after the write
//! succeeds.

use crate::core::error::{InvoicerResult, StorageError};
use crate::core::record::Record;
use crate::core::store::{RecordStore, StoreDocument, already_exists};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// File-backed record store
pub struct JsonFileStore<T> {
    path: PathBuf,
    document: RwLock<StoreDocument<T>>,
}

impl<T: Record> JsonFileStore<T> {
    /// Open the store at `path`, creating parent directories as needed
    ///
    /// A missing file is treated as an empty collection with counter 0.
    pub async fn open(path: impl Into<PathBuf>) -> InvoicerResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let document = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
                path: path.display().to_string(),
                message: e.to_string(),
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => StoreDocument::default(),
            Err(e) => return Err(io_error(&path, e).into()),
        };

        tracing::debug!(path = %path.display(), "opened record file");

        Ok(Self {
            path,
            document: RwLock::new(document),
        })
    }

    /// Open `<dir>/<resource_name>.json`
    pub async fn open_in(dir: impl AsRef<Path>) -> InvoicerResult<Self> {
        Self::open(dir.as_ref().join(format!("{}.json", T::resource_name()))).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, document: &StoreDocument<T>) -> InvoicerResult<()> {
        let bytes = serde_json::to_vec_pretty(document).map_err(|e| StorageError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let written = match tokio::fs::write(&tmp, &bytes).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path)
                .await
                .map_err(|e| io_error(&self.path, e)),
            Err(e) => Err(io_error(&tmp, e)),
        };
        if written.is_err() {
            match tokio::fs::remove_file(&tmp).await {
                Err(e) if e.kind() != ErrorKind::NotFound => {
                    tracing::warn!(path = %tmp.display(), error = %e, "failed to remove temporary file");
                }
                _ => {}
            }
        }
        written.map_err(Into::into)
    }

    /// Apply `mutate` to a copy of the document, persist it, then commit it
    ///
    /// An error from `mutate` aborts before anything is written.
    async fn mutate<R>(
        &self,
        mutate: impl FnOnce(&mut StoreDocument<T>) -> InvoicerResult<R> + Send,
    ) -> InvoicerResult<R>
    where
        R: Send,
    {
        let mut document = self.document.write().await;
        let mut next = document.clone();
        let result = mutate(&mut next)?;
        self.persist(&next).await?;
        *document = next;
        Ok(result)
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for JsonFileStore<T> {
    async fn list(&self) -> InvoicerResult<Vec<T>> {
        Ok(self.document.read().await.records.clone())
    }

    async fn get(&self, id: &str) -> InvoicerResult<Option<T>> {
        Ok(self
            .document
            .read()
            .await
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn put(&self, record: T) -> InvoicerResult<T> {
        let stored = record.clone();
        self.mutate(move |doc| {
            let existing = doc.records.iter().position(|r| r.id() == record.id());
            match existing {
                Some(index) => doc.records[index] = record,
                None => doc.records.push(record),
            }
            Ok(())
        })
        .await?;
        Ok(stored)
    }

    async fn insert(&self, record: T, last_sequence: u64) -> InvoicerResult<T> {
        let stored = record.clone();
        self.mutate(move |doc| {
            if doc.records.iter().any(|r| r.id() == record.id()) {
                return Err(already_exists::<T>(record.id()));
            }
            doc.records.push(record);
            doc.last_sequence_number = last_sequence;
            Ok(())
        })
        .await?;
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> InvoicerResult<bool> {
        if self.get(id).await?.is_none() {
            return Ok(false);
        }
        self.mutate(|doc| {
            let before = doc.records.len();
            doc.records.retain(|r| r.id() != id);
            Ok(doc.records.len() != before)
        })
        .await
    }

    async fn last_sequence(&self) -> InvoicerResult<u64> {
        Ok(self.document.read().await.last_sequence_number)
    }

    async fn replace_all(&self, records: Vec<T>, last_sequence: u64) -> InvoicerResult<()> {
        self.mutate(move |doc| {
            doc.records = records;
            doc.last_sequence_number = last_sequence;
            Ok(())
        })
        .await
    }
}
