//! Influence Matrix - Labeled square matrix of direct pairwise influences.

use std::collections::{HashMap, HashSet};
use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DematelError;

use super::tables;

/// A square matrix of direct pairwise influences between labeled factors.
///
/// Cell (i, j) holds the degree to which factor i influences factor j.
/// Every constructor validates shape and labels, so an instance is always
/// square with exactly one unique label per factor. Cell values themselves
/// are unconstrained; the diagonal is conventionally zero but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInfluenceMatrix", into = "RawInfluenceMatrix")]
pub struct InfluenceMatrix {
    labels: Vec<String>,
    values: DMatrix<f64>,
}

impl InfluenceMatrix {
    /// Builds a matrix from ordered factor labels and row-major values.
    pub fn from_rows(
        labels: Vec<impl Into<String>>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, DematelError> {
        let dimension = rows.len();
        for row in &rows {
            if row.len() != dimension {
                return Err(DematelError::shape(dimension, row.len()));
            }
        }

        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != dimension {
            return Err(DematelError::label_mismatch(labels.len(), dimension));
        }
        check_unique(&labels)?;

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Ok(Self {
            labels,
            values: DMatrix::from_row_slice(dimension, dimension, &flat),
        })
    }

    /// Creates a builder for assembling a matrix cell by cell.
    pub fn builder() -> InfluenceMatrixBuilder {
        InfluenceMatrixBuilder::new()
    }

    /// Ordered factor labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of factors; the matrix is dimension x dimension.
    pub fn dimension(&self) -> usize {
        self.labels.len()
    }

    /// Cell (from, to), if both indices are in range.
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        if from < self.dimension() && to < self.dimension() {
            Some(self.values[(from, to)])
        } else {
            None
        }
    }

    /// Row-major copy of the cell values.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.dimension())
            .map(|i| self.values.row(i).iter().copied().collect())
            .collect()
    }

    /// Sum of each row: the direct influence each factor gives.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.dimension())
            .map(|i| self.values.row(i).sum())
            .collect()
    }

    /// Sum of each column: the direct influence each factor receives.
    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.dimension())
            .map(|j| self.values.column(j).sum())
            .collect()
    }

    pub(crate) fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, DMatrix<f64>) {
        (self.labels, self.values)
    }
}

impl fmt::Display for InfluenceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tables::render_matrix(&self.labels, &self.values))
    }
}

/// Builder for assembling an influence matrix cell by cell.
///
/// Factors are declared first; influences refer to them by label. Cells
/// that are never set default to 0, and setting a cell twice keeps the
/// last value.
#[derive(Debug, Default)]
pub struct InfluenceMatrixBuilder {
    labels: Vec<String>,
    influences: Vec<(String, String, f64)>,
}

impl InfluenceMatrixBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the factors in display order.
    pub fn factors(mut self, labels: Vec<impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Declares a single factor, appended after those already declared.
    pub fn factor(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Records the influence of `from` on `to`.
    pub fn influence(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        value: f64,
    ) -> Self {
        self.influences.push((from.into(), to.into(), value));
        self
    }

    /// Builds the matrix, resolving influence labels to cell positions.
    pub fn build(self) -> Result<InfluenceMatrix, DematelError> {
        let dimension = self.labels.len();
        check_unique(&self.labels)?;

        let index: HashMap<&str, usize> = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect();

        let mut values = DMatrix::zeros(dimension, dimension);
        for (from, to, value) in &self.influences {
            let i = *index
                .get(from.as_str())
                .ok_or_else(|| DematelError::unknown_factor(from.clone()))?;
            let j = *index
                .get(to.as_str())
                .ok_or_else(|| DematelError::unknown_factor(to.clone()))?;
            values[(i, j)] = *value;
        }

        Ok(InfluenceMatrix {
            labels: self.labels,
            values,
        })
    }
}

fn check_unique(labels: &[String]) -> Result<(), DematelError> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(DematelError::duplicate_label(label.clone()));
        }
    }
    Ok(())
}

/// Serde face of [`InfluenceMatrix`]: labels plus row-major cell values.
/// Deserialized data passes through the same validation as `from_rows`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawInfluenceMatrix {
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TryFrom<RawInfluenceMatrix> for InfluenceMatrix {
    type Error = DematelError;

    fn try_from(raw: RawInfluenceMatrix) -> Result<Self, Self::Error> {
        InfluenceMatrix::from_rows(raw.labels, raw.rows)
    }
}

impl From<InfluenceMatrix> for RawInfluenceMatrix {
    fn from(matrix: InfluenceMatrix) -> Self {
        RawInfluenceMatrix {
            rows: matrix.rows(),
            labels: matrix.labels,
        }
    }
}
