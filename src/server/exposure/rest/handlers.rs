//! HTTP handlers for record collections
//!
//! Every handler is generic over [`Record`], so invoices and expenses share
//! one implementation. The only record-specific handler is
//! [`invoice_totals`].

use crate::core::error::{InvoicerResult, RecordError};
use crate::core::extractors::{JsonBody, ValidatedJson};
use crate::core::record::Record;
use crate::core::service::RecordService;
use crate::entities::{Invoice, InvoiceTotals};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// State shared by the routes of one collection
#[derive(Clone)]
pub struct RecordState<T: Record> {
    pub service: Arc<RecordService<T>>,
}

/// `GET /{plural}`
pub async fn list_records<T: Record>(
    State(state): State<RecordState<T>>,
) -> InvoicerResult<Json<Vec<T>>> {
    Ok(Json(state.service.list().await?))
}

/// `POST /{plural}`
pub async fn create_record<T: Record>(
    State(state): State<RecordState<T>>,
    ValidatedJson(draft): ValidatedJson<T::Draft>,
) -> InvoicerResult<(StatusCode, Json<T>)> {
    let record = state.service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /{plural}/{id}`
pub async fn get_record<T: Record>(
    State(state): State<RecordState<T>>,
    Path(id): Path<String>,
) -> InvoicerResult<Json<T>> {
    Ok(Json(state.service.get(&id).await?))
}

/// `PUT /{plural}/{id}`
pub async fn update_record<T: Record>(
    State(state): State<RecordState<T>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<T::Patch>,
) -> InvoicerResult<Json<T>> {
    Ok(Json(state.service.update(&id, patch).await?))
}

/// `DELETE /{plural}/{id}`
pub async fn delete_record<T: Record>(
    State(state): State<RecordState<T>>,
    Path(id): Path<String>,
) -> InvoicerResult<StatusCode> {
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /{plural}/backup`: the collection as a downloadable JSON file
pub async fn backup_records<T: Record>(
    State(state): State<RecordState<T>>,
) -> InvoicerResult<Response> {
    let document = state.service.backup().await?;
    let body = serde_json::to_string_pretty(&document).map_err(|e| {
        RecordError::SerializationError {
            record_type: T::resource_name_singular().to_string(),
            message: e.to_string(),
        }
    })?;

    let disposition = format!(
        "attachment; filename=\"{}-backup.json\"",
        T::resource_name()
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// `POST /{plural}/bulk-update`: replace the collection from a backup
pub async fn restore_records<T: Record>(
    State(state): State<RecordState<T>>,
    JsonBody(document): JsonBody<Value>,
) -> InvoicerResult<Json<Value>> {
    let summary = state.service.restore(document).await?;
    Ok(Json(json!({
        "message": format!("{} restored successfully.", capitalize(T::resource_name())),
        "restored": summary.restored,
    })))
}

/// `GET /invoices/{id}/totals`
pub async fn invoice_totals(
    State(state): State<RecordState<Invoice>>,
    Path(id): Path<String>,
) -> InvoicerResult<Json<InvoiceTotals>> {
    let invoice = state.service.get(&id).await?;
    Ok(Json(invoice.totals()))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
