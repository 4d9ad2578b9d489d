use std::sync::Arc;

use beam_optimizer::api::{self, AppState};
use beam_optimizer::catalog::{CatalogSource, JsonFileCatalog};
use beam_optimizer::config::ServiceConfig;
use beam_optimizer::extractor::ModelBridgeClient;
use beam_optimizer::optimizer::Optimizer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beam_optimizer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Beam Section Optimizer");

    let config = ServiceConfig::from_env();

    let catalog = JsonFileCatalog::new(&config.catalog_path);
    let startup_catalog = catalog.clone();
    let startup_load = tokio::task::spawn_blocking(move || startup_catalog.load()).await;
    match startup_load {
        Ok(Ok(sections)) if sections.is_empty() => {
            tracing::warn!("Beam library {} is empty", catalog.describe());
            tracing::warn!("Optimization requests will fail until sections are added");
        }
        Ok(Ok(sections)) => tracing::info!(
            "Beam library {} has {} sections",
            catalog.describe(),
            sections.len()
        ),
        Ok(Err(e)) => {
            tracing::warn!("Beam library not usable: {}", e);
            tracing::warn!("Set BEAM_LIBRARY_PATH to a valid library file");
        }
        Err(e) => tracing::warn!("Beam library check did not complete: {}", e),
    }

    tracing::info!("Using model bridge at {}", config.model_url);
    tracing::info!("Default distributed load: {}", config.default_load);

    let model = ModelBridgeClient::new(&config.model_url, config.model_timeout, config.default_load);
    let optimizer = Optimizer::new(Arc::new(model), Arc::new(catalog));
    let app = api::create_router(AppState::new(optimizer, &config.model_url));

    let addr = config.bind_address();
    tracing::info!("Listening on {}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /api/v1/version");
    tracing::info!("  GET  /optimize");
    tracing::info!("  GET  /api/v1/optimize/summary");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}
