use axum::Json;
use axum::extract::{State, rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::require_json;
use crate::models::{Flashcard, Usage};
use crate::services::providers::CompletionRequest;
use crate::services::{completions, prompts};
use crate::startup::AppState;
use service_core::error::AppError;

const DESCRIPTION_TEMPERATURE: f32 = 0.7;

/// Descriptions are 1-2 sentences; a hard output cap keeps the model from
/// rambling past them.
const DESCRIPTION_MAX_TOKENS: u32 = 100;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateDescriptionRequest {
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Flashcards array is required"))]
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Serialize)]
pub struct GenerateDescriptionResponse {
    pub success: bool,
    pub description: String,
    pub usage: Usage,
}

#[tracing::instrument(skip(state, payload))]
pub async fn generate_description(
    State(state): State<AppState>,
    payload: Result<Json<GenerateDescriptionRequest>, JsonRejection>,
) -> Result<Json<GenerateDescriptionResponse>, AppError> {
    let request = require_json(payload)?;
    request.validate()?;

    let completion = completions::execute(
        state.completions.as_ref(),
        "generate_description",
        CompletionRequest {
            model: state.config.openai.chat_model.clone(),
            messages: prompts::generate_description(request.title.as_deref(), &request.flashcards),
            temperature: DESCRIPTION_TEMPERATURE,
            max_tokens: Some(DESCRIPTION_MAX_TOKENS),
        },
    )
    .await
    .map_err(|e| AppError::upstream("Failed to generate description", e))?;

    Ok(Json(GenerateDescriptionResponse {
        success: true,
        description: completion.text.trim().to_string(),
        usage: completion.usage,
    }))
}
