//! Endpoint tests driven through the router with the mock completion
//! provider, covering the validate -> prompt -> complete -> normalize ->
//! envelope path for each task.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;
use tutor_service::config::{OpenAiSettings, TutorConfig};
use tutor_service::services::providers::{MockCompletionProvider, ProviderError};
use tutor_service::startup::{AppState, build_router};

fn test_config() -> TutorConfig {
    TutorConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "info".to_string(),
        },
        openai: OpenAiSettings {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
        },
    }
}

fn app_with(provider: MockCompletionProvider) -> (Router, Arc<MockCompletionProvider>) {
    let provider = Arc::new(provider);
    let state = AppState {
        config: test_config(),
        completions: provider.clone(),
    };
    (build_router(state), provider)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn chat_returns_assistant_message_and_usage() {
    let (app, provider) = app_with(MockCompletionProvider::with_text("Hello from the tutor."));

    let (status, body) = post_json(
        app,
        "/api/chat",
        json!({"messages": [{"role": "user", "content": "hi"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"]["role"], "assistant");
    assert_eq!(body["message"]["content"], "Hello from the tutor.");
    assert_eq!(body["usage"]["total_tokens"], 20);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, "gpt-4o-mini");
    assert_eq!(requests[0].temperature, 0.7);
    assert!(requests[0].max_tokens.is_none());
}

#[tokio::test]
async fn chat_honors_caller_model_override() {
    let (app, provider) = app_with(MockCompletionProvider::new());

    let (status, _) = post_json(
        app,
        "/api/chat",
        json!({"messages": [{"role": "user", "content": "hi"}], "model": "gpt-4.1"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.requests()[0].model, "gpt-4.1");
}

#[tokio::test]
async fn chat_rejects_missing_messages() {
    let (app, provider) = app_with(MockCompletionProvider::new());

    let (status, body) = post_json(app, "/api/chat", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("Messages"));
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn chat_rejects_malformed_message_shape() {
    let (app, _provider) = app_with(MockCompletionProvider::new());

    let (status, body) = post_json(app, "/api/chat", json!({"messages": "not a list"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid request body"));
}

#[tokio::test]
async fn generate_flashcards_parses_noisy_model_output() {
    let (app, provider) = app_with(MockCompletionProvider::with_text(
        r#"Here are your flashcards: [{"term":"A","definition":"B"}] Hope that helps!"#,
    ));

    let (status, body) = post_json(
        app,
        "/api/generate-flashcards",
        json!({"text": "Some source material.", "count": 1}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["flashcards"][0]["term"], "A");
    assert_eq!(body["flashcards"][0]["definition"], "B");

    // The prompt asked for exactly the requested number of cards
    let requests = provider.requests();
    assert!(requests[0].messages[0].content.contains("exactly 1 flashcards"));
}

#[tokio::test]
async fn generate_flashcards_rejects_missing_text() {
    let (app, _provider) = app_with(MockCompletionProvider::new());

    let (status, body) = post_json(app, "/api/generate-flashcards", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("Text content"));
}

#[tokio::test]
async fn generate_flashcards_surfaces_upstream_failure() {
    let (app, _provider) = app_with(MockCompletionProvider::with_error(
        ProviderError::ApiError("401 invalid api key".to_string()),
    ));

    let (status, body) = post_json(
        app,
        "/api/generate-flashcards",
        json!({"text": "Some source material."}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate flashcards");
    assert!(body["details"].as_str().unwrap().contains("invalid api key"));
}

#[tokio::test]
async fn explain_returns_explanation_text() {
    let (app, provider) = app_with(MockCompletionProvider::with_text(
        "Mitosis is how one cell becomes two.",
    ));

    let (status, body) = post_json(
        app,
        "/api/explain",
        json!({"term": "Mitosis", "definition": "Cell division process"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["explanation"], "Mitosis is how one cell becomes two.");

    // Both flashcard fields reach the outbound prompt verbatim
    let user_message = &provider.requests()[0].messages[1].content;
    assert!(user_message.contains("Mitosis"));
    assert!(user_message.contains("Cell division process"));
}

#[tokio::test]
async fn quiz_rejects_empty_body_naming_both_fields() {
    let (app, _provider) = app_with(MockCompletionProvider::new());

    let (status, body) = post_json(app, "/api/quiz", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("term"));
    assert!(details.contains("definition"));
}

#[tokio::test]
async fn quiz_returns_parsed_question() {
    let (app, provider) = app_with(MockCompletionProvider::with_text(
        r#"{"question":"What is mitosis?","options":["a","b","c","d"],"correct":"a","explanation":"It is cell division."}"#,
    ));

    let (status, body) = post_json(
        app,
        "/api/quiz",
        json!({"term": "Mitosis", "definition": "Cell division process"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quiz"]["question"], "What is mitosis?");
    assert_eq!(body["quiz"]["correct"], "a");
    assert_eq!(provider.requests()[0].temperature, 0.8);
}

#[tokio::test]
async fn quiz_fails_when_output_has_no_structure() {
    let (app, _provider) = app_with(MockCompletionProvider::with_text("I cannot help with that."));

    let (status, body) = post_json(
        app,
        "/api/quiz",
        json!({"term": "Mitosis", "definition": "Cell division process"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate quiz");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("could not extract structured data"));
}

#[tokio::test]
async fn group_flashcards_rejects_empty_collection() {
    let (app, _provider) = app_with(MockCompletionProvider::new());

    let (status, body) = post_json(app, "/api/group-flashcards", json!({"flashcards": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("Flashcards"));
}

#[tokio::test]
async fn group_flashcards_returns_grouping_with_sampling_knobs() {
    let (app, provider) = app_with(MockCompletionProvider::with_text(
        r#"{"groups":[{"title":"Basics","description":"Foundations","cardIndices":[0,1]}]}"#,
    ));

    let (status, body) = post_json(
        app,
        "/api/group-flashcards",
        json!({"flashcards": [
            {"term": "alpha", "definition": "first"},
            {"term": "beta", "definition": "second"}
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grouping"]["groups"][0]["title"], "Basics");
    assert_eq!(body["grouping"]["groups"][0]["cardIndices"], json!([0, 1]));

    let requests = provider.requests();
    assert_eq!(requests[0].temperature, 0.5);
    assert!(requests[0].messages[1].content.contains("0: alpha"));
    assert!(requests[0].messages[1].content.contains("1: beta"));
}

#[tokio::test]
async fn generate_description_caps_output_and_samples_terms() {
    let (app, provider) = app_with(MockCompletionProvider::with_text(
        "  A tidy overview of cell biology.  ",
    ));

    let flashcards: Vec<Value> = (1..=20)
        .map(|i| json!({"term": format!("alpha-{i:02}"), "definition": "d"}))
        .collect();

    let (status, body) = post_json(
        app,
        "/api/generate-description",
        json!({"title": "Cells", "flashcards": flashcards}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Whitespace from the model is trimmed before it reaches the caller
    assert_eq!(body["description"], "A tidy overview of cell biology.");

    let requests = provider.requests();
    assert_eq!(requests[0].max_tokens, Some(100));
    assert_eq!(requests[0].temperature, 0.7);

    // Only the first 15 terms are sampled into the prompt
    let user_message = &requests[0].messages[1].content;
    assert!(user_message.contains("alpha-15"));
    assert!(!user_message.contains("alpha-16"));
    assert!(user_message.contains("Number of cards: 20"));
}

#[tokio::test]
async fn responses_carry_request_id_header() {
    let (app, _provider) = app_with(MockCompletionProvider::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
