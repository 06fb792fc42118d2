//! Typed error handling for the invoicer service
//!
//! This module provides an error type hierarchy that lets callers handle
//! failures specifically rather than dealing with generic `anyhow::Error`
//! values.
//!
//! # Error Categories
//!
//! - [`RecordError`]: record lookups and payload shape (not found, bad format)
//! - [`ValidationError`]: field-level input validation
//! - [`StorageError`]: failures of the underlying record store
//! - [`RequestError`]: authentication failures
//! - [`ConfigError`]: configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get("INV-042").await {
//!     Ok(invoice) => println!("Found: {:?}", invoice),
//!     Err(InvoicerError::Record(RecordError::NotFound { id, .. })) => {
//!         println!("Invoice {} not found", id);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the invoicer service
///
/// Each variant wraps a more specific error type for that category.
#[derive(Debug)]
pub enum InvoicerError {
    /// Record-related errors (lookup, conflicts, payload format)
    Record(RecordError),

    /// Configuration errors
    Config(ConfigError),

    /// Validation errors
    Validation(ValidationError),

    /// Record store errors
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for InvoicerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoicerError::Record(e) => write!(f, "{}", e),
            InvoicerError::Config(e) => write!(f, "{}", e),
            InvoicerError::Validation(e) => write!(f, "{}", e),
            InvoicerError::Storage(e) => write!(f, "{}", e),
            InvoicerError::Request(e) => write!(f, "{}", e),
            InvoicerError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for InvoicerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvoicerError::Record(e) => Some(e),
            InvoicerError::Config(e) => Some(e),
            InvoicerError::Validation(e) => Some(e),
            InvoicerError::Storage(e) => Some(e),
            InvoicerError::Request(e) => Some(e),
            InvoicerError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl InvoicerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoicerError::Record(e) => e.status_code(),
            InvoicerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvoicerError::Validation(_) => StatusCode::BAD_REQUEST,
            InvoicerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvoicerError::Request(e) => e.status_code(),
            InvoicerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            InvoicerError::Record(e) => e.error_code(),
            InvoicerError::Config(_) => "CONFIG_ERROR",
            InvoicerError::Validation(_) => "VALIDATION_ERROR",
            InvoicerError::Storage(_) => "STORAGE_ERROR",
            InvoicerError::Request(e) => e.error_code(),
            InvoicerError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// True for errors caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            InvoicerError::Record(
                RecordError::NotFound { record_type, id }
                | RecordError::AlreadyExists { record_type, id },
            ) => {
                Some(serde_json::json!({
                    "record_type": record_type,
                    "id": id
                }))
            }
            InvoicerError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for InvoicerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Record Errors
// =============================================================================

/// Errors related to record operations
#[derive(Debug)]
pub enum RecordError {
    /// No record with this id exists in the collection
    NotFound { record_type: String, id: String },

    /// A record with this id is already stored
    AlreadyExists { record_type: String, id: String },

    /// No further sequential id can be allocated
    SequenceExhausted { record_type: String },

    /// Payload is not shaped like the expected record document
    InvalidFormat { message: String },

    /// Record serialization failed
    SerializationError {
        record_type: String,
        message: String,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotFound { record_type, id } => {
                write!(f, "{} with id '{}' not found", record_type, id)
            }
            RecordError::AlreadyExists { record_type, id } => {
                write!(f, "{} with id '{}' already exists", record_type, id)
            }
            RecordError::SequenceExhausted { record_type } => {
                write!(f, "No {} ids left to allocate", record_type)
            }
            RecordError::InvalidFormat { message } => {
                write!(f, "Invalid data format: {}", message)
            }
            RecordError::SerializationError {
                record_type,
                message,
            } => {
                write!(f, "Failed to serialize {}: {}", record_type, message)
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecordError::AlreadyExists { .. } => StatusCode::CONFLICT,
            RecordError::SequenceExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RecordError::InvalidFormat { .. } => StatusCode::BAD_REQUEST,
            RecordError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotFound { .. } => "RECORD_NOT_FOUND",
            RecordError::AlreadyExists { .. } => "RECORD_ALREADY_EXISTS",
            RecordError::SequenceExhausted { .. } => "SEQUENCE_EXHAUSTED",
            RecordError::InvalidFormat { .. } => "INVALID_FORMAT",
            RecordError::SerializationError { .. } => "RECORD_SERIALIZATION_ERROR",
        }
    }
}

impl From<RecordError> for InvoicerError {
    fn from(err: RecordError) -> Self {
        InvoicerError::Record(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Missing required field in configuration
    MissingField { field: String, context: String },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::MissingField { field, context } => {
                write!(f, "Missing required field '{}' in {}", field, context)
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for InvoicerError {
    fn from(err: ConfigError) -> Self {
        InvoicerError::Config(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for InvoicerError {
    fn from(err: ValidationError) -> Self {
        InvoicerError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        use validator::ValidationErrorsKind;

        let mut fields: Vec<FieldValidationError> = errors
            .errors()
            .iter()
            .map(|(field, kind)| {
                let message = match kind {
                    ValidationErrorsKind::Field(errs) => errs
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect::<Vec<_>>()
                        .join(", "),
                    ValidationErrorsKind::Struct(_) | ValidationErrorsKind::List(_) => {
                        "contains invalid values".to_string()
                    }
                };
                FieldValidationError {
                    field: field.to_string(),
                    message,
                }
            })
            .collect();

        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for InvoicerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        InvoicerError::Validation(errors.into())
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to record stores
#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    Io { path: String, message: String },

    /// The stored document could not be decoded
    Corrupt { path: String, message: String },

    /// A lock guarding in-process state was poisoned
    LockPoisoned { backend: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io { path, message } => {
                write!(f, "Storage I/O error on '{}': {}", path, message)
            }
            StorageError::Corrupt { path, message } => {
                write!(f, "Stored document '{}' is corrupt: {}", path, message)
            }
            StorageError::LockPoisoned { backend } => {
                write!(f, "Storage backend '{}' lock poisoned", backend)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for InvoicerError {
    fn from(err: StorageError) -> Self {
        InvoicerError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Missing, invalid or expired credentials
    Unauthorized { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Unauthorized { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
        }
    }
}

impl From<RequestError> for InvoicerError {
    fn from(err: RequestError) -> Self {
        InvoicerError::Request(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for InvoicerError {
    fn from(err: serde_yaml::Error) -> Self {
        InvoicerError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// Convert from anyhow::Error at the binary edge
impl From<anyhow::Error> for InvoicerError {
    fn from(err: anyhow::Error) -> Self {
        InvoicerError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for invoicer operations
pub type InvoicerResult<T> = Result<T, InvoicerError>;
