use axum::Json;
use axum::extract::{State, rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::require_json;
use crate::models::{ChatMessage, Usage};
use crate::services::completions;
use crate::services::providers::CompletionRequest;
use crate::startup::AppState;
use service_core::error::AppError;

const CHAT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Messages array is required"))]
    pub messages: Vec<ChatMessage>,
    /// Optional per-request model override; all other endpoints use the
    /// configured default.
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub message: ChatMessage,
    pub usage: Usage,
}

#[tracing::instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let request = require_json(payload)?;
    request.validate()?;

    let model = request
        .model
        .unwrap_or_else(|| state.config.openai.chat_model.clone());

    let completion = completions::execute(
        state.completions.as_ref(),
        "chat",
        CompletionRequest {
            model,
            messages: request.messages,
            temperature: CHAT_TEMPERATURE,
            max_tokens: None,
        },
    )
    .await
    .map_err(|e| AppError::upstream("Failed to get AI response", e))?;

    Ok(Json(ChatResponse {
        success: true,
        message: ChatMessage::assistant(completion.text),
        usage: completion.usage,
    }))
}
