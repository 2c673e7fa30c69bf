use axum::Json;
use axum::extract::{State, rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::require_json;
use crate::models::{Flashcard, Grouping, Usage};
use crate::services::normalize::{JsonShape, parse_structured};
use crate::services::providers::CompletionRequest;
use crate::services::{completions, prompts};
use crate::startup::AppState;
use service_core::error::AppError;

/// Lower temperature than the generative tasks: categorization should be
/// stable across retries by the caller.
const GROUPING_TEMPERATURE: f32 = 0.5;

#[derive(Debug, Deserialize, Validate)]
pub struct GroupFlashcardsRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Flashcards array is required"))]
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Serialize)]
pub struct GroupFlashcardsResponse {
    pub success: bool,
    pub grouping: Grouping,
    pub usage: Usage,
}

#[tracing::instrument(skip(state, payload))]
pub async fn group_flashcards(
    State(state): State<AppState>,
    payload: Result<Json<GroupFlashcardsRequest>, JsonRejection>,
) -> Result<Json<GroupFlashcardsResponse>, AppError> {
    let request = require_json(payload)?;
    request.validate()?;

    let completion = completions::execute(
        state.completions.as_ref(),
        "group_flashcards",
        CompletionRequest {
            model: state.config.openai.chat_model.clone(),
            messages: prompts::group_flashcards(&request.flashcards),
            temperature: GROUPING_TEMPERATURE,
            max_tokens: None,
        },
    )
    .await
    .map_err(|e| AppError::upstream("Failed to group flashcards", e))?;

    let grouping: Grouping = parse_structured(&completion.text, JsonShape::Object)
        .map_err(|e| AppError::upstream("Failed to group flashcards", e))?;

    tracing::info!(groups = grouping.groups.len(), "Grouped flashcards");

    Ok(Json(GroupFlashcardsResponse {
        success: true,
        grouping,
        usage: completion.usage,
    }))
}
