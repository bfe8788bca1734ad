//! # Predecir
//!
//! Trains a random-forest regression model that predicts vehicle fuel
//! efficiency (mpg) from tabular features, and serves it over a minimal
//! REST API with best-effort prediction logging to PostgreSQL.
//!
//! Predecir (Spanish: "to predict") has two phases that share no process:
//!
//! - **Training** (`predecir train`): loads a cleaned CSV dataset, one-hot
//!   encodes the `origin` category, performs a seeded 80/20 split, fits the
//!   forest, evaluates it on the holdout set, and persists the model plus
//!   the ordered feature-column list it was fit on.
//! - **Serving** (`predecir serve`): loads both artifacts at startup, then
//!   for each request normalizes the free-form `origin` input, rebuilds a
//!   one-row feature vector aligned to the persisted column list, predicts,
//!   appends to the in-memory history, and fires a best-effort database log.
//!
//! The load-bearing logic lives in [`encoding`]: the column list persisted
//! at fit time is the single source of truth for what the model consumes,
//! and every inference row is reconciled against it — expected columns are
//! copied in order, missing ones are zero-filled, extras are dropped.
//!
//! ## Example
//!
//! ```rust
//! use predecir::encoding::{align_to_columns, normalize_origin};
//!
//! let origin = normalize_origin("1").unwrap();
//! assert_eq!(origin.label(), "USA");
//!
//! let row = vec![("weight".to_string(), 2400.0)];
//! let columns = vec!["weight".to_string(), "origin_Japan".to_string()];
//! assert_eq!(align_to_columns(&row, &columns), vec![2400.0, 0.0]);
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

pub mod api;
pub mod dataset;
pub mod db;
pub mod encoding;
pub mod error;
pub mod history;
pub mod metrics;
pub mod model;
pub mod serve;
pub mod train;

pub use error::{PredecirError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
