//! Origin normalization, drop-first one-hot encoding, and column alignment
//!
//! This is the load-bearing logic of the crate. A trained model consumes a
//! feature vector whose column order was fixed at fit time; the functions
//! here rebuild that exact layout from free-form request input. Mistakes in
//! this module produce silently wrong predictions rather than errors, so the
//! contract is deliberately narrow:
//!
//! - [`normalize_origin`] maps any accepted spelling to one of three
//!   canonical categories, rejecting everything else with the raw value.
//! - [`one_hot_encode`] replaces a categorical column with k-1 indicator
//!   columns (first category dropped, categories ordered lexicographically).
//! - [`align_to_columns`] reconciles a named row against the persisted
//!   column list: copy what matches, zero-fill what is missing, drop the
//!   rest. Alignment is the safety net; encoding symmetry between training
//!   and inference is not assumed.

use std::fmt;

use crate::dataset::{Column, ColumnData, Dataset};
use crate::error::{PredecirError, Result};

/// Canonical vehicle origin categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// United States (dataset code 1)
    Usa,
    /// Europe (dataset code 2)
    Europe,
    /// Japan (dataset code 3)
    Japan,
}

impl Origin {
    /// Canonical label, as persisted in indicator column names.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Origin::Usa => "USA",
            Origin::Europe => "Europe",
            Origin::Japan => "Japan",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

const USA_ALIASES: &[&str] = &["usa", "us", "united states", "eeuu", "e.e.u.u."];
const EUROPE_ALIASES: &[&str] = &["europe", "eu", "europa"];
const JAPAN_ALIASES: &[&str] = &["japan", "jp", "japón", "japon"];

/// Normalize a free-form origin spelling to a canonical category.
///
/// The input is trimmed and matched case-insensitively. Digit strings map
/// 1→USA, 2→Europe, 3→Japan; any other digit string falls through to the
/// alias sets and shares their single rejection path rather than getting a
/// dedicated branch.
///
/// # Errors
///
/// Returns `UnrecognizedOrigin` carrying the original raw value when no
/// digit or alias matches.
pub fn normalize_origin(raw: &str) -> Result<Origin> {
    let s = raw.trim().to_lowercase();

    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(code) = s.parse::<u32>() {
            match code {
                1 => return Ok(Origin::Usa),
                2 => return Ok(Origin::Europe),
                3 => return Ok(Origin::Japan),
                _ => {}
            }
        }
    }

    if USA_ALIASES.contains(&s.as_str()) {
        return Ok(Origin::Usa);
    }
    if EUROPE_ALIASES.contains(&s.as_str()) {
        return Ok(Origin::Europe);
    }
    if JAPAN_ALIASES.contains(&s.as_str()) {
        return Ok(Origin::Japan);
    }

    Err(PredecirError::UnrecognizedOrigin {
        value: raw.to_string(),
    })
}

/// Indicator column name for one category of a categorical column.
fn indicator_name(column: &str, category: &str) -> String {
    format!("{column}_{category}")
}

/// Drop-first one-hot encoding of a named categorical column.
///
/// Categories are ordered lexicographically and the first is dropped, so k
/// categories yield k-1 indicator columns named `<column>_<category>`. The
/// original column is removed; indicators are appended after the remaining
/// columns in category order. A dataset without the column is returned
/// unchanged.
///
/// # Errors
///
/// Returns `Dataset` error when the rebuilt frame is inconsistent.
pub fn one_hot_encode(dataset: &Dataset, column: &str) -> Result<Dataset> {
    let Some(target) = dataset.column(column) else {
        return Ok(dataset.clone());
    };

    let values = target.values_as_strings();
    let categories = target.distinct_values();
    let kept = categories.get(1..).unwrap_or_default();

    let mut columns: Vec<Column> = dataset
        .columns()
        .iter()
        .filter(|c| c.name != column)
        .cloned()
        .collect();

    for category in kept {
        let indicators: Vec<f64> = values
            .iter()
            .map(|v| if v == category { 1.0 } else { 0.0 })
            .collect();
        columns.push(Column {
            name: indicator_name(column, category),
            data: ColumnData::Numeric(indicators),
        });
    }

    Dataset::from_columns(columns)
}

/// Drop-first one-hot encoding of a single row's category.
///
/// A lone row carries exactly one category, which is therefore the first in
/// its own ordering and gets dropped, so this returns at most k-1 entries
/// and in practice none. The persisted column list supplies any indicator
/// the model still expects; [`align_to_columns`] zero-fills it.
#[must_use]
pub fn encode_single(column: &str, category: &str) -> Vec<(String, f64)> {
    let categories = vec![category.to_string()];
    categories
        .into_iter()
        .skip(1)
        .map(|c| (indicator_name(column, &c), 1.0))
        .collect()
}

/// Align a named row of values to a persisted column list.
///
/// For each expected column, in list order: copy the row's value when
/// present, substitute 0 when absent. Row entries outside the list are
/// dropped. The output length and order always equal the list's.
#[must_use]
pub fn align_to_columns(row: &[(String, f64)], columns: &[String]) -> Vec<f64> {
    columns
        .iter()
        .map(|name| {
            row.iter()
                .find(|(n, _)| n == name)
                .map_or(0.0, |(_, value)| *value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_digit_codes() {
        assert_eq!(normalize_origin("1").expect("test"), Origin::Usa);
        assert_eq!(normalize_origin("2").expect("test"), Origin::Europe);
        assert_eq!(normalize_origin("3").expect("test"), Origin::Japan);
    }

    #[test]
    fn test_normalize_leading_zero_digit() {
        // "01" parses to 1, matching the original integer coercion
        assert_eq!(normalize_origin("01").expect("test"), Origin::Usa);
    }

    #[test]
    fn test_normalize_digit_outside_codes_rejected() {
        // "4" falls through the digit branch into the alias check and shares
        // its rejection path
        let err = normalize_origin("4").expect_err("test");
        assert!(err.to_string().contains("4"));
    }

    #[test]
    fn test_normalize_aliases_case_insensitive() {
        let cases = [
            ("usa", Origin::Usa),
            ("US", Origin::Usa),
            ("United States", Origin::Usa),
            ("EEUU", Origin::Usa),
            ("e.e.u.u.", Origin::Usa),
            ("EUROPE", Origin::Europe),
            ("eu", Origin::Europe),
            ("Europa", Origin::Europe),
            ("japan", Origin::Japan),
            ("JP", Origin::Japan),
            ("Japón", Origin::Japan),
            ("japon", Origin::Japan),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_origin(raw).expect("test"), expected, "{raw}");
        }
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_origin("  Japan  ").expect("test"), Origin::Japan);
        assert_eq!(normalize_origin(" 2 ").expect("test"), Origin::Europe);
    }

    #[test]
    fn test_normalize_idempotent_on_canonical_labels() {
        for origin in [Origin::Usa, Origin::Europe, Origin::Japan] {
            assert_eq!(normalize_origin(origin.label()).expect("test"), origin);
        }
    }

    #[test]
    fn test_normalize_rejects_unknown_with_raw_value() {
        let err = normalize_origin("Mars").expect_err("test");
        assert!(matches!(
            err,
            PredecirError::UnrecognizedOrigin { ref value } if value == "Mars"
        ));
        assert!(err.to_string().contains("Mars"));
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(normalize_origin("").is_err());
        assert!(normalize_origin("   ").is_err());
    }

    #[test]
    fn test_one_hot_drops_first_lexicographic_category() {
        let data = Dataset::from_columns(vec![
            Column {
                name: "weight".to_string(),
                data: ColumnData::Numeric(vec![2400.0, 3100.0, 2000.0]),
            },
            Column {
                name: "origin".to_string(),
                data: ColumnData::Text(vec![
                    "USA".to_string(),
                    "Europe".to_string(),
                    "Japan".to_string(),
                ]),
            },
        ])
        .expect("test");

        let encoded = one_hot_encode(&data, "origin").expect("test");
        // Europe sorts first and is dropped
        assert_eq!(
            encoded.column_names(),
            vec!["weight", "origin_Japan", "origin_USA"]
        );
        let japan = encoded.column("origin_Japan").expect("test");
        assert_eq!(japan.numeric_values().expect("test"), &[0.0, 0.0, 1.0]);
        let usa = encoded.column("origin_USA").expect("test");
        assert_eq!(usa.numeric_values().expect("test"), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_one_hot_absent_column_is_identity() {
        let data = Dataset::from_columns(vec![Column {
            name: "weight".to_string(),
            data: ColumnData::Numeric(vec![2400.0]),
        }])
        .expect("test");
        let encoded = one_hot_encode(&data, "origin").expect("test");
        assert_eq!(encoded, data);
    }

    #[test]
    fn test_one_hot_single_category_column_yields_no_indicators() {
        let data = Dataset::from_columns(vec![Column {
            name: "origin".to_string(),
            data: ColumnData::Text(vec!["USA".to_string(), "USA".to_string()]),
        }])
        .expect("test");
        let encoded = one_hot_encode(&data, "origin").expect("test");
        assert_eq!(encoded.width(), 0);
    }

    #[test]
    fn test_one_hot_numeric_origin_codes() {
        // A numeric origin column encodes by its stringified categories
        let data = Dataset::from_columns(vec![Column {
            name: "origin".to_string(),
            data: ColumnData::Numeric(vec![1.0, 2.0, 3.0]),
        }])
        .expect("test");
        let encoded = one_hot_encode(&data, "origin").expect("test");
        assert_eq!(encoded.column_names(), vec!["origin_2", "origin_3"]);
    }

    #[test]
    fn test_encode_single_drops_its_only_category() {
        assert!(encode_single("origin", "Japan").is_empty());
        assert!(encode_single("origin", "USA").is_empty());
    }

    #[test]
    fn test_align_copies_in_list_order() {
        let row = vec![
            ("b".to_string(), 2.0),
            ("a".to_string(), 1.0),
            ("c".to_string(), 3.0),
        ];
        let columns = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(align_to_columns(&row, &columns), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_align_zero_fills_missing_expected_column() {
        let row = vec![("cylinders".to_string(), 4.0)];
        let columns = vec!["cylinders".to_string(), "origin_Japan".to_string()];
        assert_eq!(align_to_columns(&row, &columns), vec![4.0, 0.0]);
    }

    #[test]
    fn test_align_drops_unexpected_row_entries() {
        let row = vec![
            ("cylinders".to_string(), 4.0),
            ("origin_USA".to_string(), 1.0),
        ];
        let columns = vec!["cylinders".to_string()];
        assert_eq!(align_to_columns(&row, &columns), vec![4.0]);
    }

    #[test]
    fn test_align_numeric_only_schema_ignores_origin() {
        // Persisted schema with no origin indicator: the six numerics come
        // back in order regardless of what origin the request carried
        let columns: Vec<String> = [
            "cylinders",
            "displacement",
            "horsepower",
            "weight",
            "acceleration",
            "model_year",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect();

        let mut row = vec![
            ("cylinders".to_string(), 4.0),
            ("displacement".to_string(), 140.0),
            ("horsepower".to_string(), 90.0),
            ("weight".to_string(), 2400.0),
            ("acceleration".to_string(), 15.0),
            ("model_year".to_string(), 79.0),
        ];
        row.extend(encode_single("origin", Origin::Japan.label()));

        assert_eq!(
            align_to_columns(&row, &columns),
            vec![4.0, 140.0, 90.0, 2400.0, 15.0, 79.0]
        );
    }

    #[test]
    fn test_origin_display_matches_label() {
        assert_eq!(Origin::Usa.to_string(), "USA");
        assert_eq!(Origin::Europe.to_string(), "Europe");
        assert_eq!(Origin::Japan.to_string(), "Japan");
    }
}
