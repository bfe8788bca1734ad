//! Regression evaluation metrics
//!
//! Free functions over slices: mean squared error, coefficient of
//! determination, and a permutation-based feature importance used for the
//! informational training report.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;

/// Mean squared error between actual and predicted values.
///
/// Returns NaN for empty or mismatched inputs.
#[must_use]
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return f64::NAN;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    sum / actual.len() as f64
}

/// Coefficient of determination (R²).
///
/// Returns NaN for empty or mismatched inputs, or when the actual values
/// have zero variance.
#[must_use]
pub fn r2(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return f64::NAN;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return f64::NAN;
    }
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

/// Permutation importance of each feature column on a holdout set.
///
/// Shuffles one column at a time with a seeded rng, measures the MSE
/// increase over the unshuffled baseline, clamps negative deltas to zero,
/// and normalizes the scores to sum to 1. Purely informational; the scores
/// do not feed back into the model.
///
/// # Errors
///
/// Propagates prediction failures from the supplied predictor.
pub fn permutation_importance<F>(
    rows: &[Vec<f64>],
    targets: &[f64],
    predict: F,
    seed: u64,
) -> Result<Vec<f64>>
where
    F: Fn(&[Vec<f64>]) -> Result<Vec<f64>>,
{
    let n_features = rows.first().map_or(0, Vec::len);
    if n_features == 0 {
        return Ok(Vec::new());
    }

    let baseline = mse(targets, &predict(rows)?);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scores = Vec::with_capacity(n_features);

    for feature in 0..n_features {
        let mut column: Vec<f64> = rows.iter().map(|r| r[feature]).collect();
        column.shuffle(&mut rng);
        let shuffled: Vec<Vec<f64>> = rows
            .iter()
            .zip(&column)
            .map(|(row, &value)| {
                let mut row = row.clone();
                row[feature] = value;
                row
            })
            .collect();
        let degraded = mse(targets, &predict(&shuffled)?);
        scores.push((degraded - baseline).max(0.0));
    }

    let total: f64 = scores.iter().sum();
    if total > 0.0 {
        for score in &mut scores {
            *score /= total;
        }
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_exact() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [1.0, 2.0, 5.0];
        assert!((mse(&actual, &predicted) - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mse_perfect_is_zero() {
        let values = [10.0, 20.0, 30.0];
        assert_eq!(mse(&values, &values), 0.0);
    }

    #[test]
    fn test_mse_empty_is_nan() {
        assert!(mse(&[], &[]).is_nan());
    }

    #[test]
    fn test_mse_mismatched_is_nan() {
        assert!(mse(&[1.0], &[1.0, 2.0]).is_nan());
    }

    #[test]
    fn test_r2_perfect_is_one() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((r2(&values, &values) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_r2_mean_predictor_is_zero() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [2.0, 2.0, 2.0];
        assert!(r2(&actual, &predicted).abs() < 1e-12);
    }

    #[test]
    fn test_r2_zero_variance_is_nan() {
        let actual = [5.0, 5.0, 5.0];
        assert!(r2(&actual, &[5.0, 5.0, 5.0]).is_nan());
    }

    #[test]
    fn test_permutation_importance_finds_the_used_feature() {
        // Predictor reads only column 0; shuffling column 1 changes nothing
        let rows: Vec<Vec<f64>> = (0..50)
            .map(|i| vec![f64::from(i), f64::from(i * 7 % 13)])
            .collect();
        let targets: Vec<f64> = rows.iter().map(|r| r[0] * 2.0).collect();
        let predict = |m: &[Vec<f64>]| Ok(m.iter().map(|r| r[0] * 2.0).collect());

        let scores = permutation_importance(&rows, &targets, predict, 42).expect("test");
        assert_eq!(scores.len(), 2);
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn test_permutation_importance_normalizes_to_one() {
        let rows: Vec<Vec<f64>> = (0..50)
            .map(|i| vec![f64::from(i), f64::from(100 - i)])
            .collect();
        let targets: Vec<f64> = rows.iter().map(|r| r[0] + 0.5 * r[1]).collect();
        let predict = |m: &[Vec<f64>]| Ok(m.iter().map(|r| r[0] + 0.5 * r[1]).collect());

        let scores = permutation_importance(&rows, &targets, predict, 42).expect("test");
        let total: f64 = scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(scores.iter().all(|s| *s >= 0.0));
    }

    #[test]
    fn test_permutation_importance_deterministic_for_seed() {
        let rows: Vec<Vec<f64>> = (0..30)
            .map(|i| vec![f64::from(i), f64::from(i % 5)])
            .collect();
        let targets: Vec<f64> = rows.iter().map(|r| r[0] - r[1]).collect();
        let predict = |m: &[Vec<f64>]| {
            Ok(m.iter()
                .map(|r: &Vec<f64>| r[0] - r[1])
                .collect::<Vec<f64>>())
        };

        let first = permutation_importance(&rows, &targets, predict, 7).expect("test");
        let second = permutation_importance(&rows, &targets, predict, 7).expect("test");
        assert_eq!(first, second);
    }

    #[test]
    fn test_permutation_importance_empty_rows() {
        let predict = |_: &[Vec<f64>]| Ok(Vec::new());
        let scores = permutation_importance(&[], &[], predict, 42).expect("test");
        assert!(scores.is_empty());
    }
}
