use axum::{extract::State, Json};
use serde_json::Value;
use service_core::error::AppError;

use crate::models::{SuggestionRequest, SuggestionResponse};
use crate::services::metrics::record_suggestion;
use crate::startup::AppState;

/// Ask the configured model for three design directions and relay its text.
#[tracing::instrument(skip_all)]
pub async fn ai_suggestions(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let provider = state.text_provider.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable(
            "AI service not configured. Please set API_KEY environment variable.".to_string(),
        )
    })?;

    let request = SuggestionRequest::parse(body.map(|Json(value)| value)).inspect_err(|_| {
        record_suggestion("rejected");
    })?;

    match provider.generate(&request.to_model_prompt()).await {
        Ok(generation) => {
            tracing::info!(
                model = %provider.model(),
                input_tokens = generation.input_tokens,
                output_tokens = generation.output_tokens,
                finish_reason = ?generation.finish_reason,
                "AI suggestions generated"
            );
            record_suggestion("success");

            Ok(Json(SuggestionResponse {
                suggestions: generation.text,
            }))
        }
        Err(e) => {
            record_suggestion("error");

            Err(AppError::Upstream(
                "Failed to fetch AI suggestions. Please try again later.".to_string(),
                anyhow::Error::new(e).context(format!("{} generateContent failed", provider.model())),
            ))
        }
    }
}
