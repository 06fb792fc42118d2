//! Core module containing the record abstraction, allocation, storage
//! contract, service and error types

pub mod allocator;
pub mod auth;
pub mod error;
pub mod extractors;
pub mod record;
pub mod service;
pub mod store;

pub use allocator::{Allocation, IdAllocator};
pub use auth::{AuthContext, AuthProvider, NoAuthProvider, TokenAuthProvider};
pub use error::{InvoicerError, InvoicerResult};
pub use record::Record;
pub use service::{RecordService, RestoreSummary};
pub use store::{RecordStore, StoreDocument};
