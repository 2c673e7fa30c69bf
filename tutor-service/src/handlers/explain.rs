use axum::Json;
use axum::extract::{State, rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::require_json;
use crate::models::Usage;
use crate::services::providers::CompletionRequest;
use crate::services::{completions, prompts};
use crate::startup::AppState;
use service_core::error::AppError;

const EXPLAIN_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Deserialize, Validate)]
pub struct ExplainRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Term is required"))]
    pub term: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Definition is required"))]
    pub definition: String,
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub success: bool,
    pub explanation: String,
    pub usage: Usage,
}

#[tracing::instrument(skip(state, payload))]
pub async fn explain(
    State(state): State<AppState>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, AppError> {
    let request = require_json(payload)?;
    request.validate()?;

    let question = request.question.as_deref().filter(|q| !q.is_empty());

    let completion = completions::execute(
        state.completions.as_ref(),
        "explain",
        CompletionRequest {
            model: state.config.openai.chat_model.clone(),
            messages: prompts::explain(&request.term, &request.definition, question),
            temperature: EXPLAIN_TEMPERATURE,
            max_tokens: None,
        },
    )
    .await
    .map_err(|e| AppError::upstream("Failed to get explanation", e))?;

    Ok(Json(ExplainResponse {
        success: true,
        explanation: completion.text,
        usage: completion.usage,
    }))
}
