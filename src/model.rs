//! Random-forest model wrapper and artifact persistence
//!
//! The fitted model is opaque to the rest of the crate: it is consumed only
//! through prediction over row-major matrices. Two artifacts are persisted
//! at training time and loaded together at serve startup — the bincoded
//! forest and the JSON feature-column list that fixes the inference-time
//! schema.

use std::fs;
use std::path::Path;

use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{PredecirError, Result};

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Fitted mpg regression model.
pub struct MpgModel {
    forest: Forest,
}

impl MpgModel {
    /// Fit a forest of `n_trees` randomized regression trees.
    ///
    /// The seed makes the fit reproducible for a given library version;
    /// bit-exact reproducibility across versions is not a contract.
    ///
    /// # Errors
    ///
    /// Returns `Training` error when the fit fails (e.g. empty input).
    pub fn fit(rows: &[Vec<f64>], targets: &[f64], n_trees: u16, seed: u64) -> Result<Self> {
        if rows.is_empty() || targets.len() != rows.len() {
            return Err(PredecirError::Training {
                reason: format!(
                    "cannot fit on {} rows with {} targets",
                    rows.len(),
                    targets.len()
                ),
            });
        }
        let x = DenseMatrix::from_2d_vec(&rows.to_vec());
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(n_trees.into())
            .with_seed(seed);
        let forest = RandomForestRegressor::fit(&x, &targets.to_vec(), params).map_err(|e| {
            PredecirError::Training {
                reason: format!("forest fit failed: {e}"),
            }
        })?;
        Ok(Self { forest })
    }

    /// Predict over a row-major matrix.
    ///
    /// # Errors
    ///
    /// Returns `Inference` error when the model rejects the input.
    pub fn predict_matrix(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        let x = DenseMatrix::from_2d_vec(&rows.to_vec());
        self.forest
            .predict(&x)
            .map_err(|e| PredecirError::Inference {
                reason: format!("forest predict failed: {e}"),
            })
    }

    /// Predict a single row, returning its one output value.
    ///
    /// # Errors
    ///
    /// Returns `Inference` error when prediction fails or yields no value.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64> {
        let predictions = self.predict_matrix(&[row.to_vec()])?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| PredecirError::Inference {
                reason: "model returned no prediction".to_string(),
            })
    }

    /// Persist the fitted forest with bincode.
    ///
    /// # Errors
    ///
    /// Returns `Artifact` error when serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = bincode::serialize(&self.forest).map_err(|e| PredecirError::Artifact {
            reason: format!("failed to serialize model: {e}"),
        })?;
        fs::write(path, bytes).map_err(|e| PredecirError::Artifact {
            reason: format!("failed to write {}: {e}", path.display()),
        })
    }

    /// Load a persisted forest.
    ///
    /// # Errors
    ///
    /// Returns `Artifact` error when the file is missing or undecodable.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| PredecirError::Artifact {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        let forest = bincode::deserialize(&bytes).map_err(|e| PredecirError::Artifact {
            reason: format!("failed to decode {}: {e}", path.display()),
        })?;
        Ok(Self { forest })
    }
}

/// Persist the ordered feature-column list as JSON.
///
/// # Errors
///
/// Returns `Artifact` error when serialization or the write fails.
pub fn save_columns(path: &Path, columns: &[String]) -> Result<()> {
    let json = serde_json::to_string_pretty(columns).map_err(|e| PredecirError::Artifact {
        reason: format!("failed to serialize column list: {e}"),
    })?;
    fs::write(path, json).map_err(|e| PredecirError::Artifact {
        reason: format!("failed to write {}: {e}", path.display()),
    })
}

/// Load the persisted feature-column list.
///
/// # Errors
///
/// Returns `Artifact` error when the file is missing or undecodable.
pub fn load_columns(path: &Path) -> Result<Vec<String>> {
    let json = fs::read_to_string(path).map_err(|e| PredecirError::Artifact {
        reason: format!("failed to read {}: {e}", path.display()),
    })?;
    serde_json::from_str(&json).map_err(|e| PredecirError::Artifact {
        reason: format!("failed to decode {}: {e}", path.display()),
    })
}

/// Model plus feature-column list, loaded once at serve startup.
pub struct ModelArtifacts {
    /// The fitted forest
    pub model: MpgModel,
    /// Ordered inference-time schema, fixed at fit time
    pub columns: Vec<String>,
}

impl ModelArtifacts {
    /// Load both artifacts. Any failure here is fatal to startup.
    ///
    /// # Errors
    ///
    /// Returns `Artifact` error when either file is missing or undecodable,
    /// or the column list is empty.
    pub fn load(model_path: &Path, columns_path: &Path) -> Result<Self> {
        let model = MpgModel::load(model_path)?;
        let columns = load_columns(columns_path)?;
        if columns.is_empty() {
            return Err(PredecirError::Artifact {
                reason: format!("{} holds an empty column list", columns_path.display()),
            });
        }
        Ok(Self { model, columns })
    }
}
