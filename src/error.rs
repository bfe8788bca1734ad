//! Error types for predecir
//!
//! One error enum covers both phases: request-scoped failures surface to the
//! HTTP caller as 4xx/5xx responses, training and startup failures are fatal
//! to their process. Database logging failures deliberately do not appear
//! here at request scope; the sink swallows and logs them (see `db`).

use thiserror::Error;

/// Errors produced by the training pipeline and the prediction service.
#[derive(Debug, Error)]
pub enum PredecirError {
    /// Client input malformed, missing, or mistyped.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: String,
    },

    /// An `origin` value outside the digit and alias sets.
    #[error("Unrecognized origin value: {value}. Use 'USA', 'Europe', 'Japan' or 1/2/3.")]
    UnrecognizedOrigin {
        /// The raw value as the client sent it
        value: String,
    },

    /// Dataset unreadable or structurally unusable.
    #[error("Dataset error: {reason}")]
    Dataset {
        /// What went wrong while loading or inspecting the dataset
        reason: String,
    },

    /// Training pipeline failure.
    #[error("Training error: {reason}")]
    Training {
        /// What went wrong during the fit
        reason: String,
    },

    /// Model or column-list artifact missing or unreadable.
    #[error("Artifact error: {reason}")]
    Artifact {
        /// Which artifact failed and why
        reason: String,
    },

    /// Model invocation failure on the request path.
    #[error("Inference error: {reason}")]
    Inference {
        /// What went wrong inside the model call
        reason: String,
    },

    /// CLI, bind, or runtime configuration failure.
    #[error("Config error: {reason}")]
    Config {
        /// Which setting was invalid
        reason: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PredecirError>;
