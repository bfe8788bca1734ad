//! CSV dataset loading into a small columnar frame
//!
//! The training pipeline consumes a fully materialized, columnar table.
//! Column types are inferred per column: a column where every cell parses as
//! `f64` is numeric, anything else is text. Text columns survive loading (the
//! one-hot encoder needs them) but are excluded from the feature set later.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{PredecirError, Result};

/// Column payload: all-numeric or raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Every cell parsed as `f64`
    Numeric(Vec<f64>),
    /// At least one cell did not parse as a number
    Text(Vec<String>),
}

/// A named column of homogeneous data.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name from the CSV header
    pub name: String,
    /// Cell values
    pub data: ColumnData,
}

impl Column {
    /// Number of cells in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    /// True when the column has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when every cell is numeric.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    /// Numeric cell values, or `None` for a text column.
    #[must_use]
    pub fn numeric_values(&self) -> Option<&[f64]> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Text(_) => None,
        }
    }

    /// Cell values rendered as strings.
    ///
    /// Integral floats drop the fraction ("1" rather than "1.0"), so a
    /// numeric origin column yields the same category spellings the cleaned
    /// dataset uses.
    #[must_use]
    pub fn values_as_strings(&self) -> Vec<String> {
        match &self.data {
            ColumnData::Text(values) => values.clone(),
            ColumnData::Numeric(values) => values
                .iter()
                .map(|v| {
                    if v.is_finite() && v.fract() == 0.0 {
                        format!("{}", *v as i64)
                    } else {
                        v.to_string()
                    }
                })
                .collect(),
        }
    }

    /// Distinct values in lexicographic order.
    #[must_use]
    pub fn distinct_values(&self) -> Vec<String> {
        let set: BTreeSet<String> = self.values_as_strings().into_iter().collect();
        set.into_iter().collect()
    }
}

/// An in-memory columnar table with equal-length columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset from pre-assembled columns.
    ///
    /// # Errors
    ///
    /// Returns `Dataset` error when column lengths differ.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let height = first.len();
            for col in &columns {
                if col.len() != height {
                    return Err(PredecirError::Dataset {
                        reason: format!(
                            "column '{}' has {} rows, expected {}",
                            col.name,
                            col.len(),
                            height
                        ),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    /// Load a headered CSV file, inferring each column's type.
    ///
    /// # Errors
    ///
    /// Returns `Dataset` error when the file is unreadable, malformed, or
    /// holds no data rows.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| PredecirError::Dataset {
            reason: format!("failed to open {}: {e}", path.display()),
        })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| PredecirError::Dataset {
                reason: format!("failed to read header row: {e}"),
            })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record.map_err(|e| PredecirError::Dataset {
                reason: format!("failed to read record: {e}"),
            })?;
            for (i, field) in record.iter().enumerate() {
                if let Some(column) = cells.get_mut(i) {
                    column.push(field.trim().to_string());
                }
            }
        }

        if cells.first().map_or(true, Vec::is_empty) {
            return Err(PredecirError::Dataset {
                reason: format!("{} holds no data rows", path.display()),
            });
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column {
                name,
                data: infer_column(values),
            })
            .collect();

        Self::from_columns(columns)
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// All columns, in table order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// True when a column with this name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in table order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// All-parse-or-text inference over one column's cells.
fn infer_column(values: Vec<String>) -> ColumnData {
    let parsed: Option<Vec<f64>> = values.iter().map(|v| v.parse::<f64>().ok()).collect();
    match parsed {
        Some(numbers) => ColumnData::Numeric(numbers),
        None => ColumnData::Text(values),
    }
}
