//! Running-summary handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use agora_core::config::ConfigSource;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/summary - The current running summary (may be empty).
pub async fn get_summary(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let summary = state.engine.thread().summary().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(
        serde_json::json!({"summary": summary}),
        request_id,
        elapsed,
    ))
}

/// POST /api/v1/summary/regenerate - Regenerate the summary on demand.
///
/// Runs the same merge as the automatic trigger but leaves the interval
/// counter alone. An LLM failure surfaces as 502.
pub async fn regenerate_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let config = state.config.snapshot();
    let summary = state.engine.regenerate_summary_now(&config).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({"summary": summary}),
        request_id,
        elapsed,
    )))
}
