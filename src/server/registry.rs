//! Collection registry for managing record collections and their routes

use axum::Router;
use std::collections::HashMap;

/// Describes how to build the routes of one record collection
///
/// Implemented by [`RecordDescriptor`](crate::server::exposure::rest::RecordDescriptor)
/// for every [`Record`](crate::core::Record) type.
pub trait CollectionDescriptor: Send + Sync {
    /// The singular record name (e.g., "invoice")
    fn record_type(&self) -> &str;

    /// The plural form used in URLs (e.g., "invoices")
    fn plural(&self) -> &str;

    /// Build the routes for this collection, with state already attached
    fn build_routes(&self) -> Router;
}

/// Registry of every collection exposed by the server
#[derive(Default)]
pub struct CollectionRegistry {
    descriptors: HashMap<String, Box<dyn CollectionDescriptor>>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register a collection; a second registration of the same record type replaces the first
    pub fn register(&mut self, descriptor: Box<dyn CollectionDescriptor>) {
        let record_type = descriptor.record_type().to_string();
        self.descriptors.insert(record_type, descriptor);
    }

    /// Merge the routes of every registered collection
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Registered record types, sorted
    pub fn record_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.descriptors.keys().map(|s| s.as_str()).collect();
        types.sort_unstable();
        types
    }
}
