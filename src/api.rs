use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::error::OptimizerError;
use crate::models::{OptimizationRecord, OptimizationReport};
use crate::optimizer::Optimizer;

/// Application state
pub struct AppState {
    optimizer: Optimizer,
    model_bridge: String,
}

impl AppState {
    pub fn new(optimizer: Optimizer, model_bridge: impl Into<String>) -> Self {
        Self {
            optimizer,
            model_bridge: model_bridge.into(),
        }
    }
}

/// Build the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/optimize", get(optimize_handler))
        .route("/api/v1/optimize", get(optimize_handler))
        .route("/api/v1/optimize/summary", get(summary_handler))
        .route("/api/v1/version", get(version_handler))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Root endpoint
async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "service": "Beam Section Optimizer",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "description": "Selects the cheapest library section that carries each beam's design moment"
    }))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let shared = state.clone();
    let catalog = tokio::task::spawn_blocking(move || {
        let source = shared.optimizer.catalog();
        (source.describe(), source.load())
    })
    .await;

    let (catalog_source, catalog_sections, catalog_error) = match catalog {
        Ok((source, Ok(sections))) => (source, Some(sections.len()), None),
        Ok((source, Err(e))) => (source, None, Some(e.to_string())),
        Err(e) => (String::new(), None, Some(e.to_string())),
    };

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "catalog_source": catalog_source,
        "catalog_available": catalog_sections.is_some(),
        "catalog_sections": catalog_sections,
        "catalog_error": catalog_error,
        "model_bridge": state.model_bridge
    }))
}

/// Version endpoint
async fn version_handler() -> Json<serde_json::Value> {
    Json(json!({
        "service": "Beam Section Optimizer",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1"
    }))
}

/// Run the optimization against the current model
async fn optimize_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OptimizationRecord>>, ApiError> {
    tracing::info!("Received optimization request");

    let optimizer = state.optimizer.clone();
    let records = tokio::task::spawn_blocking(move || optimizer.run())
        .await
        .map_err(|e| ApiError::InternalError(format!("Optimization task failed: {}", e)))??;

    Ok(Json(records))
}

/// Run the optimization and include the project cost comparison
async fn summary_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OptimizationReport>, ApiError> {
    tracing::info!("Received optimization summary request");

    let optimizer = state.optimizer.clone();
    let report = tokio::task::spawn_blocking(move || optimizer.run_report())
        .await
        .map_err(|e| ApiError::InternalError(format!("Optimization task failed: {}", e)))??;

    tracing::info!(
        "Savings {:.2} ({:.1}%)",
        report.summary.savings,
        report.summary.savings_percent
    );

    Ok(Json(report))
}

/// API Errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Optimization(#[from] OptimizerError),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Optimization request failed: {}", self);

        let body = Json(json!({
            "error": self.to_string()
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
