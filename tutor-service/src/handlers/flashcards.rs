use axum::Json;
use axum::extract::{State, rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::require_json;
use crate::models::{Flashcard, Usage};
use crate::services::normalize::{JsonShape, parse_structured};
use crate::services::providers::CompletionRequest;
use crate::services::{completions, prompts};
use crate::startup::AppState;
use service_core::error::AppError;

const FLASHCARDS_TEMPERATURE: f32 = 0.7;
const DEFAULT_CARD_COUNT: u32 = 10;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateFlashcardsRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Text content is required"))]
    pub text: String,
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateFlashcardsResponse {
    pub success: bool,
    pub flashcards: Vec<Flashcard>,
    pub usage: Usage,
}

#[tracing::instrument(skip(state, payload))]
pub async fn generate_flashcards(
    State(state): State<AppState>,
    payload: Result<Json<GenerateFlashcardsRequest>, JsonRejection>,
) -> Result<Json<GenerateFlashcardsResponse>, AppError> {
    let request = require_json(payload)?;
    request.validate()?;

    let count = request.count.unwrap_or(DEFAULT_CARD_COUNT);

    let completion = completions::execute(
        state.completions.as_ref(),
        "generate_flashcards",
        CompletionRequest {
            model: state.config.openai.chat_model.clone(),
            messages: prompts::generate_flashcards(&request.text, count),
            temperature: FLASHCARDS_TEMPERATURE,
            max_tokens: None,
        },
    )
    .await
    .map_err(|e| AppError::upstream("Failed to generate flashcards", e))?;

    let flashcards: Vec<Flashcard> = parse_structured(&completion.text, JsonShape::Array)
        .map_err(|e| AppError::upstream("Failed to generate flashcards", e))?;

    tracing::info!(count = flashcards.len(), "Generated flashcards");

    Ok(Json(GenerateFlashcardsResponse {
        success: true,
        flashcards,
        usage: completion.usage,
    }))
}
