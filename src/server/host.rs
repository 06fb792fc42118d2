//! Server host holding the state every exposure needs
//!
//! The host is independent of the transport: it owns the record services,
//! the auth boundary and the collection registry, and
//! [`RestExposure`](crate::server::exposure::RestExposure) turns it into a
//! router.

use crate::core::auth::{AuthProvider, LoginService};
use crate::core::service::RecordService;
use crate::entities::{Expense, Invoice};
use crate::server::registry::CollectionRegistry;
use std::sync::Arc;

/// Host context containing all service state
pub struct ServerHost {
    pub invoices: Arc<RecordService<Invoice>>,

    pub expenses: Arc<RecordService<Expense>>,

    /// Boundary consulted before every record route
    pub auth_provider: Arc<dyn AuthProvider>,

    /// Present when a login route should be exposed
    pub login: Option<Arc<LoginService>>,

    /// Routes of every record collection
    pub collections: CollectionRegistry,
}

impl ServerHost {
    /// Record types exposed by this host
    pub fn record_types(&self) -> Vec<&str> {
        self.collections.record_types()
    }
}
