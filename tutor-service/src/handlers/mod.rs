//! HTTP handlers for tutor-service.
//!
//! One module per task endpoint. Request DTOs live next to their handler;
//! shared domain types live in `crate::models`.

pub mod chat;
pub mod description;
pub mod explain;
pub mod flashcards;
pub mod grouping;
pub mod health;
pub mod quiz;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use service_core::error::AppError;

/// Unwrap a JSON body extraction, turning malformed or mistyped payloads
/// into a 400 instead of axum's default rejection.
pub(crate) fn require_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => Err(AppError::BadRequest(anyhow::anyhow!(
            "Invalid request body: {}",
            rejection.body_text()
        ))),
    }
}
