//! REST API exposure
//!
//! Consumes a [`ServerHost`] and produces an Axum `Router`: health checks and
//! the login route are public, every record route sits behind the host's
//! [`AuthProvider`](crate::core::AuthProvider).

pub mod auth;
pub mod descriptor;
pub mod handlers;

pub use descriptor::RecordDescriptor;
pub use handlers::RecordState;

use super::super::host::ServerHost;
use anyhow::Result;
use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// `custom_routes` are merged after the record routes and are not
    /// guarded by the auth middleware.
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let record_routes = host
            .collections
            .build_routes()
            .route_layer(middleware::from_fn_with_state(
                host.auth_provider.clone(),
                auth::require_auth,
            ));

        let mut app = Self::health_routes().merge(record_routes);

        if let Some(login) = &host.login {
            app = app.merge(
                Router::new()
                    .route("/auth/login", post(auth::login))
                    .with_state(login.clone()),
            );
        }

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME")
        }))
    }
}
