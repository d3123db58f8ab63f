//! Thread administration handlers: title, clear, export, import.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use agora_types::thread::ThreadSnapshot;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for setting the thread title.
#[derive(Debug, Deserialize)]
pub struct SetTitleRequest {
    pub title: String,
}

/// PUT /api/v1/thread/title - Set the thread title.
///
/// A blank title resets to the unset default.
pub async fn set_title(
    State(state): State<AppState>,
    Json(body): Json<SetTitleRequest>,
) -> Json<ApiResponse<serde_json::Value>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state.engine.set_title(&body.title).await;
    let title = state.engine.thread().title().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(
        serde_json::json!({"title": title}),
        request_id,
        elapsed,
    ))
}

/// POST /api/v1/thread/clear - Empty the timeline.
///
/// Irreversible; sequence numbering restarts at 1. Title, roster and
/// summary are untouched.
pub async fn clear_thread(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state.engine.clear_conversation().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(
        serde_json::json!({"cleared": true}),
        request_id,
        elapsed,
    ))
}

/// GET /api/v1/thread/export - Export title, roster and summary.
pub async fn export_thread(State(state): State<AppState>) -> Json<ApiResponse<ThreadSnapshot>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let snapshot = state.engine.export_thread().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(snapshot, request_id, elapsed))
}

/// POST /api/v1/thread/import - Replace the session state wholesale.
///
/// The snapshot is validated first; a malformed one is rejected with 400
/// and nothing changes.
pub async fn import_thread(
    State(state): State<AppState>,
    Json(snapshot): Json<ThreadSnapshot>,
) -> Result<Json<ApiResponse<ThreadSnapshot>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state.engine.import_thread(snapshot).await?;
    let imported = state.engine.export_thread().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(imported, request_id, elapsed)))
}
