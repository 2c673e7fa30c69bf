//! Completion orchestration: one provider call per request, with metrics
//! accounting for call counts, latency, and token usage.

use std::time::Instant;

use crate::services::metrics;
use crate::services::providers::{
    CompletionProvider, CompletionRequest, CompletionResult, ProviderError,
};

/// Run a single completion call for `task`, recording its outcome. No retry:
/// whatever the provider returns is the answer.
pub async fn execute(
    provider: &dyn CompletionProvider,
    task: &str,
    request: CompletionRequest,
) -> Result<CompletionResult, ProviderError> {
    let model = request.model.clone();
    let started = Instant::now();

    let result = provider.complete(request).await;
    metrics::observe_latency(task, started.elapsed().as_secs_f64());

    match &result {
        Ok(completion) => {
            metrics::record_completion(task, &model, "ok");
            metrics::record_tokens(task, &completion.usage);
        }
        Err(e) => {
            metrics::record_completion(task, &model, error_outcome(e));
            tracing::error!(task, model = %model, error = %e, "Completion call failed");
        }
    }

    result
}

fn error_outcome(err: &ProviderError) -> &'static str {
    match err {
        ProviderError::NotConfigured(_) => "not_configured",
        ProviderError::ApiError(_) => "api_error",
        ProviderError::RateLimited => "rate_limited",
        ProviderError::EmptyCompletion => "empty",
        ProviderError::NetworkError(_) => "network_error",
    }
}
