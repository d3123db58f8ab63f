//! Timeline handlers: posting user messages and reading the log.

use std::time::Instant;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use uuid::Uuid;

use agora_core::config::ConfigSource;
use agora_types::post::Post;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for posting a user message.
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    /// Author shown in the timeline; defaults to "user".
    #[serde(default = "default_author")]
    pub author: String,
    /// Message body.
    pub text: String,
}

fn default_author() -> String {
    "user".to_string()
}

/// Query parameters for reading the timeline.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Maximum posts to return; capped by the configured display limit.
    pub limit: Option<usize>,
}

impl ListQuery {
    fn effective(&self, max_display: usize) -> usize {
        self.limit.unwrap_or(max_display).min(max_display)
    }
}

/// POST /api/v1/messages - Append a user post.
///
/// Counts toward the summary interval like any other post, so this call
/// may also run a summarization before returning.
pub async fn post_message(
    State(state): State<AppState>,
    Json(body): Json<PostMessageRequest>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let config = state.config.snapshot();
    let post = state
        .engine
        .post_user_message(&body.author, &body.text, &config)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(post, request_id, elapsed)))
}

/// GET /api/v1/messages - Recent posts, oldest first.
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Vec<Post>>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let limits = state.config.snapshot().conversation.clone().normalized();
    let posts = state.engine.recent_posts(query.effective(limits.max_display)).await;

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(posts, request_id, elapsed))
}

/// GET /api/v1/messages/display - Recent posts, newest first.
pub async fn display_messages(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Vec<Post>>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let limits = state.config.snapshot().conversation.clone().normalized();
    let posts = state.engine.display_posts(query.effective(limits.max_display)).await;

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(posts, request_id, elapsed))
}
