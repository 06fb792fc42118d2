//! Server module for building the HTTP service
//!
//! This module provides a `ServerBuilder` that registers:
//! - CRUD, backup and restore routes for invoices and expenses
//! - the login route and the auth middleware
//! - health check routes

pub mod builder;
pub mod exposure;
pub mod host;
pub mod registry;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use exposure::rest::RecordDescriptor;
pub use host::ServerHost;
pub use registry::{CollectionDescriptor, CollectionRegistry};
