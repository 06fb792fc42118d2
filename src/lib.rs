//! # Invoicer
//!
//! An invoice and expense record service exposed as a REST API.
//!
//! ## Features
//!
//! - **Sequential identifiers**: `INV-001`, `EXP-014`, never reused while a record holds them
//! - **Typed records**: invoices with line items and totals, expenses with receipts
//! - **Partial updates**: typed patch payloads merged onto stored records
//! - **Backup and restore**: whole-collection export and replace, with counter recovery
//! - **Pluggable storage**: a durable JSON file store and an in-memory store
//! - **Token auth**: HMAC-signed bearer tokens checked at an explicit boundary
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoicer::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_invoice_store(JsonFileStore::open_in("data").await?)
//!         .with_expense_store(JsonFileStore::open_in("data").await?)
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        allocator::IdAllocator,
        auth::{
            AuthContext, AuthProvider, Credentials, LoginService, NoAuthProvider,
            TokenAuthProvider, TokenSigner,
        },
        error::{InvoicerError, InvoicerResult},
        record::Record,
        service::{RecordService, RestoreSummary},
        store::{RecordStore, StoreDocument},
    };

    // === Records ===
    pub use crate::entities::{
        Address, Expense, ExpenseDraft, ExpensePatch, Invoice, InvoiceDraft, InvoicePatch,
        InvoiceStatus, InvoiceTotals, LineItem, Party, PaymentDetails,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryRecordStore, JsonFileStore};

    // === Config ===
    pub use crate::config::{AppConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{RecordDescriptor, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
