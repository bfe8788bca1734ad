//! Serving startup
//!
//! Loads the model artifacts (fatal on failure), selects the prediction
//! sink from the environment, builds the router, and runs the server until
//! shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::{create_router, AppState};
use crate::db;
use crate::error::{PredecirError, Result};
use crate::model::ModelArtifacts;

/// Serving process settings.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Path to the bincoded model
    pub model_path: PathBuf,
    /// Path to the JSON feature-column list
    pub columns_path: PathBuf,
}

/// Start the prediction service.
///
/// # Errors
///
/// Returns `Artifact` error when the model or column list fails to load
/// (no partial-service mode) and `Config` error for bind failures.
pub async fn run(config: &ServeConfig) -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let artifacts = ModelArtifacts::load(&config.model_path, &config.columns_path)?;
    info!(columns = artifacts.columns.len(), "model artifacts loaded");

    let sink = db::sink_from_env();
    let state = AppState::new(artifacts, sink);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| PredecirError::Config {
            reason: format!("invalid address: {e}"),
        })?;

    println!("mpg prediction service listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET  /         - Service descriptor");
    println!("  GET  /health   - Health check");
    println!("  POST /predict  - Predict mpg for a car");
    println!("  GET  /stats    - Prediction statistics");
    println!();
    println!("Example:");
    println!("  curl http://{addr}/health");
    println!();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PredecirError::Config {
            reason: format!("failed to bind {addr}: {e}"),
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| PredecirError::Config {
            reason: format!("server error: {e}"),
        })?;

    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("predecir=info"));
    // try_init: a test harness may have installed a subscriber already
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
