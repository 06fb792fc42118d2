//! Axum extractors for record payloads
//!
//! Both extractors map body rejections (bad JSON, missing required fields,
//! wrong content type) to [`RecordError::InvalidFormat`] so clients always
//! get the service's error body instead of axum's plain-text rejection.

use crate::core::error::{InvoicerError, RecordError};
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body deserialized into `T`
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = InvoicerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(RecordError::InvalidFormat {
                message: rejection.body_text(),
            }
            .into()),
        }
    }
}

/// JSON body deserialized into `T` and checked with its `validator` rules
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_expense(
///     ValidatedJson(draft): ValidatedJson<ExpenseDraft>,
/// ) -> InvoicerResult<Json<Expense>> {
///     // draft is well-formed and passed validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = InvoicerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
