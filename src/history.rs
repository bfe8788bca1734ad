//! Shared in-memory prediction history
//!
//! An append-only sequence of every prediction made since process start.
//! Handlers clone the handle cheaply; appends and aggregation serialize on
//! one mutex. Nothing is persisted — a restart clears the history.

use std::sync::{Arc, Mutex, MutexGuard};

/// Aggregate view over the recorded predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStats {
    /// Number of predictions recorded
    pub count: usize,
    /// Exact sum/count, `None` when empty
    pub mean: Option<f64>,
    /// Smallest recorded prediction, `None` when empty
    pub min: Option<f64>,
    /// Largest recorded prediction, `None` when empty
    pub max: Option<f64>,
}

/// Append-only prediction history shared across request handlers.
#[derive(Debug, Clone, Default)]
pub struct PredictionHistory {
    inner: Arc<Mutex<Vec<f64>>>,
}

impl PredictionHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<f64>> {
        // A poisoned lock still holds valid data; appends never leave the
        // Vec in a torn state
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Record one prediction.
    pub fn record(&self, prediction: f64) {
        self.lock().push(prediction);
    }

    /// Number of predictions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Aggregate stats over everything recorded since startup.
    #[must_use]
    pub fn snapshot(&self) -> HistoryStats {
        let predictions = self.lock();
        if predictions.is_empty() {
            return HistoryStats {
                count: 0,
                mean: None,
                min: None,
                max: None,
            };
        }
        let count = predictions.len();
        let sum: f64 = predictions.iter().sum();
        let min = predictions.iter().copied().fold(f64::INFINITY, f64::min);
        let max = predictions
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        HistoryStats {
            count,
            mean: Some(sum / count as f64),
            min: Some(min),
            max: Some(max),
        }
    }
}
