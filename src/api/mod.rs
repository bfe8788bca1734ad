//! HTTP API for mpg prediction
//!
//! Provides the REST surface of the serving phase using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Service descriptor listing available endpoints
//! - `GET /health` - Health check
//! - `POST /predict` - Predict mpg for one car
//! - `GET /stats` - Aggregate statistics over predictions since startup
//!
//! ## Example
//!
//! ```rust,ignore
//! use predecir::api::{create_router, AppState};
//!
//! let state = AppState::new(artifacts, sink);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::{
    db::{PredictionRow, PredictionSink},
    encoding,
    error::PredecirError,
    history::PredictionHistory,
    model::ModelArtifacts,
};

pub mod types;

pub use types::{
    CarFeatures, ErrorResponse, HealthResponse, PredictResponse, ServiceInfo, StatsResponse,
};

/// Application state shared across handlers.
///
/// Model and column list are read-only after startup; the history and sink
/// are the only shared mutable touchpoints.
#[derive(Clone)]
pub struct AppState {
    artifacts: Arc<ModelArtifacts>,
    history: PredictionHistory,
    sink: Arc<dyn PredictionSink>,
}

impl AppState {
    /// Create new application state around loaded artifacts and a sink.
    #[must_use]
    pub fn new(artifacts: ModelArtifacts, sink: Arc<dyn PredictionSink>) -> Self {
        Self {
            artifacts: Arc::new(artifacts),
            history: PredictionHistory::new(),
            sink,
        }
    }

    /// Handle on the shared prediction history.
    #[must_use]
    pub fn history(&self) -> &PredictionHistory {
        &self.history
    }
}

/// Build the service router.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, error: &PredecirError) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "mpg prediction service running.".to_string(),
        endpoints: vec![
            "/predict".to_string(),
            "/stats".to_string(),
            "/health".to_string(),
        ],
    })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// The inference request pipeline: normalize, rebuild the feature row,
/// predict, record, log.
///
/// Failures before the model call produce a 4xx with no side effects; the
/// database dispatch happens after the history append and cannot affect the
/// response.
async fn predict_handler(
    State(state): State<AppState>,
    Json(car): Json<CarFeatures>,
) -> Result<Json<PredictResponse>, ApiError> {
    let origin = encoding::normalize_origin(&car.origin)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e))?;

    let mut row: Vec<(String, f64)> = vec![
        ("cylinders".to_string(), car.cylinders as f64),
        ("displacement".to_string(), car.displacement),
        ("horsepower".to_string(), car.horsepower),
        ("weight".to_string(), car.weight),
        ("acceleration".to_string(), car.acceleration),
        ("model_year".to_string(), car.model_year as f64),
    ];
    row.extend(encoding::encode_single("origin", origin.label()));

    let features = encoding::align_to_columns(&row, &state.artifacts.columns);
    let prediction = state
        .artifacts
        .model
        .predict_row(&features)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, &e))?;

    state.history.record(prediction);
    state.sink.record(PredictionRow {
        cylinders: car.cylinders as i32,
        horsepower: car.horsepower,
        weight: car.weight,
        origin: origin.label().to_string(),
        prediction,
    });

    Ok(Json(PredictResponse {
        mpg_prediction: prediction,
        used_columns: state.artifacts.columns.clone(),
    }))
}

async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.history.snapshot();
    let message = if stats.count == 0 {
        Some("No predictions recorded yet.".to_string())
    } else {
        None
    };
    Json(StatsResponse {
        count: stats.count,
        mean: stats.mean,
        min: stats.min,
        max: stats.max,
        message,
    })
}
