//! Authentication boundary for the record routes
//!
//! Provides context-based authentication:
//! - [`Credentials`]: the configured username/password pair
//! - [`TokenSigner`]: issues and verifies HMAC-SHA256 signed bearer tokens
//! - [`AuthProvider`]: turns request headers into an [`AuthContext`]
//!
//! The record service itself never sees credentials.

use crate::core::error::{InvoicerResult, RequestError};
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Cookie consulted when no `Authorization` header is present
pub const AUTH_COOKIE: &str = "auth_token";

/// Authentication context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Authenticated user
    User { username: String },

    /// No authentication (development mode)
    Anonymous,
}

impl AuthContext {
    pub fn username(&self) -> Option<&str> {
        match self {
            AuthContext::User { username } => Some(username),
            AuthContext::Anonymous => None,
        }
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract the auth context from request headers, or reject the request
    async fn extract_context(&self, headers: &HeaderMap) -> InvoicerResult<AuthContext>;
}

/// Default no-auth provider (for development)
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn extract_context(&self, _headers: &HeaderMap) -> InvoicerResult<AuthContext> {
        Ok(AuthContext::Anonymous)
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// The single configured login
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Compare both fields in constant time
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

// =============================================================================
// Tokens
// =============================================================================

/// Claims carried by a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
    /// Token id
    pub jti: Uuid,
}

/// Reasons a token is rejected
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not of the form <claims>.<signature>")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

/// Issues and verifies `<hex claims>.<hex hmac>` tokens
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl,
        }
    }

    /// Lifetime of issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC key size is always valid")
    }

    /// Sign a fresh token for `username`
    pub fn issue(&self, username: &str) -> String {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: Uuid::new_v4(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &TokenClaims) -> String {
        let payload = serde_json::to_vec(claims).expect("claims always serialize");
        let mut mac = self.mac();
        mac.update(&payload);
        let signature = mac.finalize().into_bytes();
        format!("{}.{}", hex::encode(payload), hex::encode(signature))
    }

    /// Check signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let (payload_hex, signature_hex) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let payload = hex::decode(payload_hex).map_err(|_| TokenError::Malformed)?;
        let signature = hex::decode(signature_hex).map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac();
        mac.update(&payload);
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

/// Verifies the configured credentials and hands out tokens
pub struct LoginService {
    credentials: Option<Credentials>,
    signer: Arc<TokenSigner>,
}

/// Outcome of a login attempt
#[derive(Debug)]
pub enum LoginOutcome {
    Granted { token: String },
    Denied,
    NotConfigured,
}

impl LoginService {
    pub fn new(credentials: Option<Credentials>, signer: Arc<TokenSigner>) -> Self {
        Self {
            credentials,
            signer,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.signer.ttl()
    }

    pub fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let Some(credentials) = &self.credentials else {
            return LoginOutcome::NotConfigured;
        };

        if credentials.verify(username, password) {
            tracing::info!(username, "login succeeded");
            LoginOutcome::Granted {
                token: self.signer.issue(username),
            }
        } else {
            tracing::warn!(username, "login rejected");
            LoginOutcome::Denied
        }
    }
}

/// Bearer-token provider backed by a [`TokenSigner`]
pub struct TokenAuthProvider {
    signer: Arc<TokenSigner>,
}

impl TokenAuthProvider {
    pub fn new(signer: Arc<TokenSigner>) -> Self {
        Self { signer }
    }
}

/// Token from `Authorization: Bearer ...`, falling back to the auth cookie
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> InvoicerResult<AuthContext> {
        let token = token_from_headers(headers).ok_or_else(|| RequestError::Unauthorized {
            message: "Authentication required".to_string(),
        })?;

        let claims = self.signer.verify(&token).map_err(|e| {
            tracing::debug!(error = %e, "token verification failed");
            RequestError::Unauthorized {
                message: "Invalid or expired token".to_string(),
            }
        })?;

        Ok(AuthContext::User {
            username: claims.sub,
        })
    }
}
