//! Route table for one record collection

use super::handlers::{
    RecordState, backup_records, create_record, delete_record, get_record, list_records,
    restore_records, update_record,
};
use crate::core::record::Record;
use crate::core::service::RecordService;
use crate::server::registry::CollectionDescriptor;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

/// Builds the CRUD, backup and restore routes of a [`Record`] collection
///
/// Routes, with `{plural}` taken from [`Record::resource_name`]:
/// - `GET /{plural}`, `POST /{plural}`
/// - `GET /{plural}/backup`, `POST /{plural}/bulk-update`
/// - `GET /{plural}/{id}`, `PUT /{plural}/{id}`, `DELETE /{plural}/{id}`
pub struct RecordDescriptor<T: Record> {
    state: RecordState<T>,
    extra_routes: Vec<Router<RecordState<T>>>,
}

impl<T: Record> RecordDescriptor<T> {
    pub fn new(service: Arc<RecordService<T>>) -> Self {
        Self {
            state: RecordState { service },
            extra_routes: Vec::new(),
        }
    }

    /// Add collection-specific routes sharing the collection state
    pub fn with_routes(mut self, routes: Router<RecordState<T>>) -> Self {
        self.extra_routes.push(routes);
        self
    }
}

impl<T: Record> CollectionDescriptor for RecordDescriptor<T> {
    fn record_type(&self) -> &str {
        T::resource_name_singular()
    }

    fn plural(&self) -> &str {
        T::resource_name()
    }

    fn build_routes(&self) -> Router {
        let plural = T::resource_name();

        let router = Router::new()
            .route(
                &format!("/{plural}"),
                get(list_records::<T>).post(create_record::<T>),
            )
            .route(&format!("/{plural}/backup"), get(backup_records::<T>))
            .route(
                &format!("/{plural}/bulk-update"),
                post(restore_records::<T>),
            )
            .route(
                &format!("/{plural}/{{id}}"),
                get(get_record::<T>)
                    .put(update_record::<T>)
                    .delete(delete_record::<T>),
            );

        self.extra_routes
            .iter()
            .cloned()
            .fold(router, |acc, extra| acc.merge(extra))
            .with_state(self.state.clone())
    }
}
