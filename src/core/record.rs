//! Record trait defining the core abstraction for invoices and expenses

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use validator::Validate;

/// Base trait for every record collection managed by the service.
///
/// A record has:
/// - an immutable human-readable id (`INV-001`, `EXP-014`)
/// - a draft type: the create payload, which never carries an id
/// - a patch type: the typed partial update, which never carries an id
///
/// Ids are assigned by the [`RecordService`](crate::core::service::RecordService)
/// using the prefix returned by [`Record::id_prefix`].
pub trait Record: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Create payload (every field except `id`)
    type Draft: DeserializeOwned + Validate + Send + 'static;

    /// Partial update payload (every updatable field, all optional)
    type Patch: DeserializeOwned + Validate + Send + 'static;

    /// The plural resource name used in URLs (e.g., "invoices")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "invoice")
    fn resource_name_singular() -> &'static str;

    /// Identifier prefix (e.g., "INV")
    fn id_prefix() -> &'static str;

    /// The record identifier
    fn id(&self) -> &str;

    /// Build a full record from a draft and an allocated id
    fn from_draft(id: String, draft: Self::Draft) -> Self;

    /// Shallow-merge the fields present in `patch`; the id is never touched
    fn apply_patch(&mut self, patch: Self::Patch);
}
