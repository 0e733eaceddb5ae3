//! HTTP front for the playground wire API
//!
//! Exposes the same four routes the remote adapter consumes, over any
//! [`Backend`]. The execution engine stays behind the backend boundary; this
//! module only shapes the wire contract.

use crate::backend::{Backend, ExamplePair, ExecutionResult, ProofResult};
use crate::catalog;
use crate::inputs::StackInputs;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// API state
pub struct ApiState {
    pub backend: Arc<dyn Backend>,
}

/// Request body shared by `/api/execute` and `/api/prove`
#[derive(Debug, Deserialize)]
pub struct ProgramRequest {
    pub program: String,
    #[serde(default)]
    pub inputs: Option<StackInputs>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Create the API router
pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/examples", get(list_examples))
        .route("/api/execute", post(execute_program))
        .route("/api/prove", post(prove_program))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "masm-playground".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List example programs as `[name, source]` pairs, never empty
async fn list_examples(State(state): State<Arc<ApiState>>) -> Json<Vec<ExamplePair>> {
    let pairs = catalog::load(state.backend.as_ref())
        .await
        .into_iter()
        .map(|entry| (entry.name, entry.source))
        .collect();
    Json(pairs)
}

/// Execute a program
async fn execute_program(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ProgramRequest>,
) -> Json<ExecutionResult> {
    let result = state
        .backend
        .execute(&request.program, request.inputs.as_ref())
        .await;
    Json(result)
}

/// Generate an execution proof
async fn prove_program(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ProgramRequest>,
) -> Json<ProofResult> {
    let result = state
        .backend
        .prove(&request.program, request.inputs.as_ref())
        .await;
    Json(result)
}
