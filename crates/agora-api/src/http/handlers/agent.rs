//! Agent roster handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use agora_types::agent::AgentPersona;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for registering an agent.
#[derive(Debug, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub personality: String,
}

/// POST /api/v1/agents - Register an agent persona.
///
/// The agent joins the round-robin rotation on the scheduler's next pass.
pub async fn create_agent(
    State(state): State<AppState>,
    Json(body): Json<CreateAgentRequest>,
) -> Result<Json<ApiResponse<AgentPersona>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let agent = state
        .engine
        .register_agent(&body.name, &body.personality)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(agent, request_id, elapsed)))
}

/// GET /api/v1/agents - The current roster in registration order.
pub async fn list_agents(State(state): State<AppState>) -> Json<ApiResponse<Vec<AgentPersona>>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let roster = state.engine.thread().roster().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(roster, request_id, elapsed))
}

/// DELETE /api/v1/agents/{id} - Deregister an agent.
///
/// The agent's past posts stay in the timeline.
pub async fn delete_agent(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if !state.engine.deregister_agent(id).await {
        return Err(AppError::NotFound(format!("no agent with id {id}")));
    }

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({"deleted": id}),
        request_id,
        elapsed,
    )))
}
