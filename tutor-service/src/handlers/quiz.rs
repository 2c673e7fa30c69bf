use axum::Json;
use axum::extract::{State, rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::require_json;
use crate::models::{Quiz, Usage};
use crate::services::normalize::{JsonShape, parse_structured};
use crate::services::providers::CompletionRequest;
use crate::services::{completions, prompts};
use crate::startup::AppState;
use service_core::error::AppError;

/// Highest temperature of the six tasks: question variety matters when the
/// caller quizzes the same card repeatedly.
const QUIZ_TEMPERATURE: f32 = 0.8;

#[derive(Debug, Deserialize, Validate)]
pub struct QuizRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Term is required"))]
    pub term: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Definition is required"))]
    pub definition: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub quiz: Quiz,
    pub usage: Usage,
}

#[tracing::instrument(skip(state, payload))]
pub async fn quiz(
    State(state): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, AppError> {
    let request = require_json(payload)?;
    request.validate()?;

    let completion = completions::execute(
        state.completions.as_ref(),
        "quiz",
        CompletionRequest {
            model: state.config.openai.chat_model.clone(),
            messages: prompts::quiz(&request.term, &request.definition),
            temperature: QUIZ_TEMPERATURE,
            max_tokens: None,
        },
    )
    .await
    .map_err(|e| AppError::upstream("Failed to generate quiz", e))?;

    let quiz: Quiz = parse_structured(&completion.text, JsonShape::Object)
        .map_err(|e| AppError::upstream("Failed to generate quiz", e))?;

    Ok(Json(QuizResponse {
        success: true,
        quiz,
        usage: completion.usage,
    }))
}
