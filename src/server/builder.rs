//! ServerBuilder for fluent API to build the HTTP service

use super::exposure::RestExposure;
use super::exposure::rest::RecordDescriptor;
use super::exposure::rest::handlers::invoice_totals;
use super::host::ServerHost;
use super::registry::CollectionRegistry;
use crate::config::{AppConfig, StorageBackend};
use crate::core::auth::{
    AuthProvider, Credentials, LoginService, NoAuthProvider, TokenAuthProvider, TokenSigner,
};
use crate::core::service::RecordService;
use crate::core::store::RecordStore;
use crate::entities::{Expense, Invoice};
use crate::storage::{InMemoryRecordStore, JsonFileStore};
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the invoicing HTTP service
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_invoice_store(InMemoryRecordStore::new())
///     .with_expense_store(InMemoryRecordStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    invoice_store: Option<Arc<dyn RecordStore<Invoice>>>,
    expense_store: Option<Arc<dyn RecordStore<Expense>>>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
    login: Option<Arc<LoginService>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            invoice_store: None,
            expense_store: None,
            auth_provider: None,
            login: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the invoice store (required)
    pub fn with_invoice_store(mut self, store: impl RecordStore<Invoice> + 'static) -> Self {
        self.invoice_store = Some(Arc::new(store));
        self
    }

    /// Set the expense store (required)
    pub fn with_expense_store(mut self, store: impl RecordStore<Expense> + 'static) -> Self {
        self.expense_store = Some(Arc::new(store));
        self
    }

    /// Use empty in-memory stores for both collections
    pub fn with_in_memory_stores(self) -> Self {
        self.with_invoice_store(InMemoryRecordStore::new())
            .with_expense_store(InMemoryRecordStore::new())
    }

    /// Replace the auth boundary; defaults to [`NoAuthProvider`]
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth_provider = Some(Arc::new(provider));
        self
    }

    /// Guard record routes with signed bearer tokens and expose `/auth/login`
    ///
    /// With `credentials` unset the login route answers 500, matching a
    /// deployment that forgot to configure them.
    pub fn with_token_auth(mut self, credentials: Option<Credentials>, signer: TokenSigner) -> Self {
        let signer = Arc::new(signer);
        self.auth_provider = Some(Arc::new(TokenAuthProvider::new(signer.clone())));
        self.login = Some(Arc::new(LoginService::new(credentials, signer)));
        self
    }

    /// Add custom routes to the server
    ///
    /// Custom routes are not guarded by the auth middleware.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Configure stores and auth from an [`AppConfig`]
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = match config.storage.backend {
            StorageBackend::InMemory => {
                tracing::warn!("using in-memory storage; records are lost on shutdown");
                Self::new().with_in_memory_stores()
            }
            StorageBackend::JsonFile => {
                let dir = &config.storage.data_dir;
                let invoices = JsonFileStore::<Invoice>::open_in(dir).await?;
                let expenses = JsonFileStore::<Expense>::open_in(dir).await?;
                tracing::info!(data_dir = %dir.display(), "using JSON file storage");
                Self::new()
                    .with_invoice_store(invoices)
                    .with_expense_store(expenses)
            }
        };

        let auth = &config.auth;
        if auth.enabled {
            let credentials = match (&auth.username, &auth.password) {
                (Some(username), Some(password)) => Some(Credentials::new(username, password)),
                _ => {
                    tracing::warn!("auth is enabled but no login credentials are configured");
                    None
                }
            };
            let ttl = i64::try_from(auth.token_ttl_secs)
                .ok()
                .and_then(chrono::Duration::try_seconds)
                .ok_or_else(|| anyhow::anyhow!("auth.token_ttl_secs is out of range"))?;
            let signer = TokenSigner::new(auth.token_secret.as_deref().unwrap_or_default(), ttl);
            builder = builder.with_token_auth(credentials, signer);
        } else {
            tracing::warn!("auth is disabled; record routes are open");
        }

        Ok(builder)
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let invoice_store = self.invoice_store.take().ok_or_else(|| {
            anyhow::anyhow!("Invoice store is required. Call .with_invoice_store()")
        })?;
        let expense_store = self.expense_store.take().ok_or_else(|| {
            anyhow::anyhow!("Expense store is required. Call .with_expense_store()")
        })?;

        let invoices = Arc::new(RecordService::new(invoice_store));
        let expenses = Arc::new(RecordService::new(expense_store));

        let mut collections = CollectionRegistry::new();
        collections.register(Box::new(
            RecordDescriptor::new(invoices.clone()).with_routes(
                Router::new().route("/invoices/{id}/totals", get(invoice_totals)),
            ),
        ));
        collections.register(Box::new(RecordDescriptor::new(expenses.clone())));

        let auth_provider = self
            .auth_provider
            .take()
            .unwrap_or_else(|| Arc::new(NoAuthProvider) as Arc<dyn AuthProvider>);

        Ok(ServerHost {
            invoices,
            expenses,
            auth_provider,
            login: self.login.take(),
            collections,
        })
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        tracing::debug!(collections = ?host.record_types(), "routes registered");
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr`, serves requests and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
