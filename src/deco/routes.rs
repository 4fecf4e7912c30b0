//! HTTP route handlers for the deco planning API.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::error::Result;
use crate::AppState;

use super::models::{PlanRequestBody, PlanResponse};
use super::validator::{self, MODEL, TOOL, TOOL_VERSION};

/// Create the deco router with all endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/plan", post(plan))
}

/// Health check for the planning engine.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": TOOL,
        "version": TOOL_VERSION,
        "model": MODEL
    }))
}

/// Compute a decompression plan for a square profile.
async fn plan(
    State(state): State<AppState>,
    Json(body): Json<PlanRequestBody>,
) -> Result<Json<PlanResponse>> {
    let validated = validator::validate(&body, state.config.default_gradient_factors)?;

    let key = validated.input_hash.clone();
    let response = state
        .cache
        .get_or_compute(&key, async { validator::plan(&validated) })
        .await;

    Ok(Json(response.as_ref().clone()))
}
