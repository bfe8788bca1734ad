//! Offline training pipeline
//!
//! Loads the cleaned CSV dataset, one-hot encodes `origin` when present,
//! selects the numeric feature columns, performs a seeded 80/20 split, fits
//! the forest, reports MSE/R² and permutation importances on the holdout
//! set, and persists the two serving artifacts. Every failure here is fatal;
//! this is a batch job, not a service.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::{Column, ColumnData, Dataset};
use crate::encoding;
use crate::error::{PredecirError, Result};
use crate::metrics;
use crate::model::{self, MpgModel};

/// Regression target column.
pub const TARGET_COLUMN: &str = "mpg";
/// Categorical column encoded before feature selection.
pub const ORIGIN_COLUMN: &str = "origin";

const HOLDOUT_FRACTION: f64 = 0.2;

/// Training run settings.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// CSV dataset with headers
    pub dataset_path: PathBuf,
    /// Output path for the bincoded model
    pub model_path: PathBuf,
    /// Output path for the JSON feature-column list
    pub columns_path: PathBuf,
    /// Trees in the forest
    pub n_trees: u16,
    /// Seed for the split and the fit
    pub seed: u64,
}

/// Outcome of a training run.
#[derive(Debug)]
pub struct TrainReport {
    /// Rows in the dataset
    pub rows: usize,
    /// Ordered feature columns persisted for serving
    pub feature_columns: Vec<String>,
    /// Training subset size
    pub train_size: usize,
    /// Holdout subset size
    pub holdout_size: usize,
    /// Mean squared error on the holdout set
    pub mse: f64,
    /// Coefficient of determination on the holdout set
    pub r2: f64,
    /// Permutation importances ranked descending
    pub importances: Vec<(String, f64)>,
}

/// Run the pipeline end to end and persist the artifacts.
///
/// # Errors
///
/// Returns `Dataset` error for an unreadable/empty dataset or a missing
/// target column, `Training` error for an empty feature set or a failed
/// fit, and `Artifact` error when persistence fails.
pub fn run(config: &TrainConfig) -> Result<TrainReport> {
    println!("=== Loading dataset ===");
    let data = Dataset::from_csv(&config.dataset_path)?;
    println!("Rows: {}, Columns: {}", data.height(), data.width());
    println!();

    if let Some(origin) = data.column(ORIGIN_COLUMN) {
        println!("Distribution of '{ORIGIN_COLUMN}' before one-hot encoding:");
        for (value, count) in value_counts(origin) {
            println!("  {value}: {count}");
        }
    } else {
        println!("Column '{ORIGIN_COLUMN}' not found, continuing without categorical encoding.");
    }
    println!();

    println!("=== One-hot encoding ===");
    let encoded = encoding::one_hot_encode(&data, ORIGIN_COLUMN)?;
    println!("Columns after encoding: {:?}", encoded.column_names());
    println!();

    let targets = extract_targets(&encoded)?;
    let (feature_columns, rows) = select_features(&encoded)?;
    println!("Feature columns:");
    for name in &feature_columns {
        println!("  - {name}");
    }
    println!();

    println!("=== Train / holdout split (80% / 20%) ===");
    let (train_idx, holdout_idx) = split_indices(rows.len(), HOLDOUT_FRACTION, config.seed);
    let x_train = take_rows(&rows, &train_idx);
    let y_train = take_values(&targets, &train_idx);
    let x_holdout = take_rows(&rows, &holdout_idx);
    let y_holdout = take_values(&targets, &holdout_idx);
    println!("Train size: {}", x_train.len());
    println!("Holdout size: {}", x_holdout.len());
    println!();

    println!("=== Fitting forest ({} trees) ===", config.n_trees);
    let model = MpgModel::fit(&x_train, &y_train, config.n_trees, config.seed)?;
    println!("Fit complete.");
    println!();

    println!("=== Holdout evaluation ===");
    let predicted = model.predict_matrix(&x_holdout)?;
    let mse = metrics::mse(&y_holdout, &predicted);
    let r2 = metrics::r2(&y_holdout, &predicted);
    println!("MSE: {mse:.3}");
    println!("R²: {r2:.3}");

    let scores = metrics::permutation_importance(
        &x_holdout,
        &y_holdout,
        |m| model.predict_matrix(m),
        config.seed,
    )?;
    let mut importances: Vec<(String, f64)> =
        feature_columns.iter().cloned().zip(scores).collect();
    importances.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    println!("Feature importances:");
    for (name, score) in &importances {
        println!("  {name}: {score:.4}");
    }
    println!();

    println!("=== Saving artifacts ===");
    model.save(&config.model_path)?;
    model::save_columns(&config.columns_path, &feature_columns)?;
    println!("Model saved to: {}", config.model_path.display());
    println!("Columns saved to: {}", config.columns_path.display());

    Ok(TrainReport {
        rows: rows.len(),
        feature_columns,
        train_size: x_train.len(),
        holdout_size: x_holdout.len(),
        mse,
        r2,
        importances,
    })
}

fn extract_targets(data: &Dataset) -> Result<Vec<f64>> {
    let target = data
        .column(TARGET_COLUMN)
        .ok_or_else(|| PredecirError::Dataset {
            reason: format!("target column '{TARGET_COLUMN}' not found"),
        })?;
    match &target.data {
        ColumnData::Numeric(values) => Ok(values.clone()),
        ColumnData::Text(_) => Err(PredecirError::Dataset {
            reason: format!("target column '{TARGET_COLUMN}' is not numeric"),
        }),
    }
}

/// Numeric columns except the target, in table order, as row-major rows.
/// Text columns are silently discarded.
fn select_features(data: &Dataset) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
    let mut names = Vec::new();
    let mut columns: Vec<&[f64]> = Vec::new();
    for column in data.columns() {
        if column.name == TARGET_COLUMN {
            continue;
        }
        if let Some(values) = column.numeric_values() {
            names.push(column.name.clone());
            columns.push(values);
        }
    }
    if names.is_empty() {
        return Err(PredecirError::Training {
            reason: "no numeric feature columns after filtering".to_string(),
        });
    }
    let rows = (0..data.height())
        .map(|i| columns.iter().map(|c| c[i]).collect())
        .collect();
    Ok((names, rows))
}

/// Deterministic index split: shuffle with a seeded rng, take the trailing
/// fraction as holdout. Same input and seed yield the same split.
fn split_indices(n: usize, holdout_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let holdout = ((n as f64) * holdout_fraction).round() as usize;
    let split = n.saturating_sub(holdout);
    (indices[..split].to_vec(), indices[split..].to_vec())
}

fn take_rows(rows: &[Vec<f64>], indices: &[usize]) -> Vec<Vec<f64>> {
    indices.iter().map(|&i| rows[i].clone()).collect()
}

fn take_values(values: &[f64], indices: &[usize]) -> Vec<f64> {
    indices.iter().map(|&i| values[i]).collect()
}

/// Occurrence counts in descending count order.
fn value_counts(column: &Column) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in column.values_as_strings() {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}
