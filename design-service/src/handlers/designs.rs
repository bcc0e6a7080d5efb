use axum::{http::StatusCode, Json};
use chrono::Utc;
use serde_json::Value;
use service_core::error::AppError;

use crate::middleware::BearerToken;
use crate::models::{DesignSaveResult, DesignSubmission};
use crate::services::metrics::record_design_saved;

/// Accept a design. Nothing is persisted; the body is echoed back with a
/// time-based identifier.
#[tracing::instrument(skip_all)]
pub async fn save_design(
    _token: BearerToken,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<DesignSaveResult>), AppError> {
    let submission = body
        .and_then(|Json(value)| DesignSubmission::from_json(value))
        .ok_or_else(|| AppError::BadRequest("Design title is required.".to_string()))?;

    tracing::info!(title = %submission.title(), "Received design to save");

    let result = DesignSaveResult::new(submission, Utc::now());
    record_design_saved();

    tracing::info!(design_id = %result.design_id, "Design accepted");

    Ok((StatusCode::CREATED, Json(result)))
}
