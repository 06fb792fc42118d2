//! Login route and the authentication middleware guarding record routes

use crate::core::auth::{AUTH_COOKIE, AuthProvider, LoginOutcome, LoginService};
use crate::core::error::InvoicerError;
use crate::core::extractors::JsonBody;
use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /auth/login`
///
/// On success the token is returned in the body and also set as the
/// `auth_token` cookie.
pub async fn login(
    State(service): State<Arc<LoginService>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Response {
    match service.login(&request.username, &request.password) {
        LoginOutcome::Granted { token } => {
            let cookie = format!(
                "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
                AUTH_COOKIE,
                token,
                service.token_ttl().num_seconds()
            );
            (
                [(header::SET_COOKIE, cookie)],
                Json(json!({ "success": true, "token": token })),
            )
                .into_response()
        }
        LoginOutcome::Denied => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        )
            .into_response(),
        LoginOutcome::NotConfigured => {
            tracing::error!("login attempted but no credentials are configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": "Server configuration error." })),
            )
                .into_response()
        }
    }
}

/// Middleware rejecting requests the [`AuthProvider`] does not accept
///
/// The resolved [`AuthContext`](crate::core::AuthContext) is stored in the
/// request extensions for downstream handlers.
pub async fn require_auth(
    State(provider): State<Arc<dyn AuthProvider>>,
    mut request: Request,
    next: Next,
) -> Result<Response, InvoicerError> {
    let context = provider.extract_context(request.headers()).await?;
    tracing::trace!(user = ?context.username(), "request authenticated");
    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}
