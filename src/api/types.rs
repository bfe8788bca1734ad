//! Wire types for the prediction API
//!
//! Request and response bodies for every endpoint. Deserialization of
//! `CarFeatures` doubles as input validation: a missing or mistyped field is
//! rejected by the `Json` extractor before any handler logic runs.

use serde::{Deserialize, Serialize};

/// Incoming car description for `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarFeatures {
    /// Engine cylinder count
    pub cylinders: i64,
    /// Engine displacement
    pub displacement: f64,
    /// Engine horsepower
    pub horsepower: f64,
    /// Vehicle weight
    pub weight: f64,
    /// 0-60 acceleration time
    pub acceleration: f64,
    /// Two-digit model year
    pub model_year: i64,
    /// Free-form origin: "USA"/"Europe"/"Japan", an alias, or "1"/"2"/"3"
    pub origin: String,
}

/// Successful prediction response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Predicted fuel efficiency
    pub mpg_prediction: f64,
    /// The persisted feature-column list the input was aligned to
    pub used_columns: Vec<String>,
}

/// Aggregate statistics response for `GET /stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Predictions made since process start
    pub count: usize,
    /// Mean prediction, null when count is 0
    pub mean: Option<f64>,
    /// Smallest prediction, null when count is 0
    pub min: Option<f64>,
    /// Largest prediction, null when count is 0
    pub max: Option<f64>,
    /// Explanatory note, present only when count is 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Service descriptor for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Human-readable service banner
    pub message: String,
    /// Available endpoint paths
    pub endpoints: Vec<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
