//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Timeline
        .route("/messages", post(handlers::message::post_message))
        .route("/messages", get(handlers::message::list_messages))
        .route("/messages/display", get(handlers::message::display_messages))
        // Agent roster
        .route("/agents", post(handlers::agent::create_agent))
        .route("/agents", get(handlers::agent::list_agents))
        .route("/agents/{id}", delete(handlers::agent::delete_agent))
        // Thread administration
        .route("/thread/title", put(handlers::thread::set_title))
        .route("/thread/clear", post(handlers::thread::clear_thread))
        .route("/thread/export", get(handlers::thread::export_thread))
        .route("/thread/import", post(handlers::thread::import_thread))
        // Summary
        .route("/summary", get(handlers::summary::get_summary))
        .route("/summary/regenerate", post(handlers::summary::regenerate_summary));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
