//! DEMATEL Engine - Normalization, total-relation derivation, and factor summaries.

use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::foundation::DematelError;

use super::report::AnalysisReport;
use super::summary::{CauseEffectPartition, FactorSummary};
use super::tables;
use super::InfluenceMatrix;

/// Smallest LU pivot magnitude of `I - D_norm` still treated as invertible.
pub const SINGULARITY_EPSILON: f64 = 1e-12;

/// A direct-relation matrix scaled so every row and column sum is at most 1.
///
/// Produced by [`DematelEngine::normalize`]; carries the scale that was
/// divided out so callers can report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNormalizedMatrix", into = "RawNormalizedMatrix")]
pub struct NormalizedMatrix {
    labels: Vec<String>,
    values: DMatrix<f64>,
    scale: f64,
}

impl NormalizedMatrix {
    /// Ordered factor labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of factors.
    pub fn dimension(&self) -> usize {
        self.labels.len()
    }

    /// The divisor that was applied: max(max row sum, max column sum) of
    /// the direct-relation matrix.
    pub fn scale(&self) -> f64 {
        self.scale
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
        row_major(&self.values)
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.dimension())
            .map(|i| self.values.row(i).sum())
            .collect()
    }

    /// Sum of each column.
    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.dimension())
            .map(|j| self.values.column(j).sum())
            .collect()
    }

    pub(crate) fn values(&self) -> &DMatrix<f64> {
        &self.values
    }
}

impl fmt::Display for NormalizedMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tables::render_matrix(&self.labels, &self.values))
    }
}

/// The total-relation matrix `T = D_norm * (I - D_norm)^-1`.
///
/// Cell (i, j) holds the direct plus indirect influence of factor i on
/// factor j over paths of every length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTotalRelationMatrix", into = "RawTotalRelationMatrix")]
pub struct TotalRelationMatrix {
    labels: Vec<String>,
    values: DMatrix<f64>,
}

impl TotalRelationMatrix {
    /// Ordered factor labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of factors.
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
        row_major(&self.values)
    }

    /// Sum of each row: total influence each factor gives (r).
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.dimension())
            .map(|i| self.values.row(i).sum())
            .collect()
    }

    /// Sum of each column: total influence each factor receives (c).
    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.dimension())
            .map(|j| self.values.column(j).sum())
            .collect()
    }
}

impl fmt::Display for TotalRelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tables::render_matrix(&self.labels, &self.values))
    }
}

/// DEMATEL pipeline functions.
///
/// Stateless apart from the singularity tolerance; every method is a pure
/// function of its inputs, so one engine value can serve any number of
/// analyses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DematelEngine {
    /// Smallest LU pivot magnitude of `I - D_norm` still considered
    /// invertible.
    pub singularity_epsilon: f64,
}

impl Default for DematelEngine {
    fn default() -> Self {
        Self {
            singularity_epsilon: SINGULARITY_EPSILON,
        }
    }
}

impl DematelEngine {
    /// Creates an engine with the default singularity tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scales the direct-relation matrix into `[0, 1]` marginals.
    ///
    /// # Algorithm
    /// scale = max(max row sum, max column sum); every cell is divided by
    /// scale. Every row and column sum of the result is at most 1.
    ///
    /// # Edge Cases
    /// - All-zero matrix: scale is 0 -> `DegenerateMatrix`
    /// - Empty (0x0) matrix: no marginals exist -> `DegenerateMatrix`
    /// - Largest marginal negative or NaN: `DegenerateMatrix`
    pub fn normalize(&self, matrix: &InfluenceMatrix) -> Result<NormalizedMatrix, DematelError> {
        let scale = matrix
            .row_sums()
            .into_iter()
            .chain(matrix.column_sums())
            .fold(f64::NEG_INFINITY, f64::max);

        if !(scale > 0.0) {
            warn!(scale, "Rejecting direct-relation matrix with no positive marginal");
            return Err(DematelError::degenerate(scale));
        }

        debug!(
            dimension = matrix.dimension(),
            scale, "Normalized direct-relation matrix"
        );

        Ok(NormalizedMatrix {
            labels: matrix.labels().to_vec(),
            values: matrix.values().map(|v| v / scale),
            scale,
        })
    }

    /// Derives the total-relation matrix `T = D_norm * (I - D_norm)^-1`.
    ///
    /// # Algorithm
    /// LU-decompose `I - D_norm`, refuse the inversion when the smallest
    /// pivot magnitude is within `singularity_epsilon` of zero, otherwise
    /// invert and multiply. The determinant is carried in the error for
    /// diagnostics.
    ///
    /// # Edge Cases
    /// - `I - D_norm` singular or near-singular: `SingularMatrix`
    /// - Non-finite determinant (NaN or infinite cells): `SingularMatrix`
    pub fn total_relation(
        &self,
        normalized: &NormalizedMatrix,
    ) -> Result<TotalRelationMatrix, DematelError> {
        let n = normalized.dimension();
        let identity = DMatrix::<f64>::identity(n, n);
        let complement = &identity - normalized.values();

        let lu = complement.lu();
        let determinant = lu.determinant();
        let min_pivot = lu
            .u()
            .diagonal()
            .iter()
            .fold(f64::INFINITY, |acc, pivot| acc.min(pivot.abs()));

        if !determinant.is_finite() || min_pivot <= self.singularity_epsilon {
            warn!(
                determinant,
                min_pivot, "I - D_norm is not invertible within tolerance"
            );
            return Err(DematelError::singular(determinant));
        }

        let inverse = lu
            .try_inverse()
            .ok_or_else(|| DematelError::singular(determinant))?;

        debug!(dimension = n, determinant, "Derived total-relation matrix");

        Ok(TotalRelationMatrix {
            labels: normalized.labels().to_vec(),
            values: normalized.values() * &inverse,
        })
    }

    /// Computes per-factor influence measures from the total-relation
    /// matrix.
    ///
    /// # Algorithm
    /// For factor i: r = row sum of T (influence given), c = column sum of
    /// T (influence received), prominence = r + c, net effect = r - c.
    pub fn summarize(&self, total: &TotalRelationMatrix) -> Vec<FactorSummary> {
        let row_sums = total.row_sums();
        let column_sums = total.column_sums();

        total
            .labels()
            .iter()
            .zip(row_sums.into_iter().zip(column_sums))
            .map(|(label, (r, c))| FactorSummary::new(label.clone(), r, c))
            .collect()
    }

    /// Splits summaries into the cause group (net > 0) and effect group
    /// (net < 0), keeping factor order. Factors with a net effect of
    /// exactly zero land in neither group.
    pub fn partition(&self, summaries: &[FactorSummary]) -> CauseEffectPartition {
        CauseEffectPartition::from_summaries(summaries)
    }

    /// Runs the full pipeline and bundles every derived table into a
    /// report. Halts on the first failing stage; the error is propagated
    /// unchanged.
    pub fn analyze(&self, matrix: &InfluenceMatrix) -> Result<AnalysisReport, DematelError> {
        debug!(dimension = matrix.dimension(), "Running DEMATEL analysis");

        let normalized = self.normalize(matrix)?;
        let total = self.total_relation(&normalized)?;
        let summaries = self.summarize(&total);
        let partition = self.partition(&summaries);

        Ok(AnalysisReport::new(
            matrix.clone(),
            normalized,
            total,
            summaries,
            partition,
        ))
    }
}

fn row_major(values: &DMatrix<f64>) -> Vec<Vec<f64>> {
    (0..values.nrows())
        .map(|i| values.row(i).iter().copied().collect())
        .collect()
}

/// Serde face of [`NormalizedMatrix`]. Deserialized data is structurally
/// revalidated (square, labeled, unique, positive scale).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNormalizedMatrix {
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
    scale: f64,
}

impl TryFrom<RawNormalizedMatrix> for NormalizedMatrix {
    type Error = DematelError;

    fn try_from(raw: RawNormalizedMatrix) -> Result<Self, Self::Error> {
        if !(raw.scale > 0.0) {
            return Err(DematelError::degenerate(raw.scale));
        }
        let (labels, values) = InfluenceMatrix::from_rows(raw.labels, raw.rows)?.into_parts();
        Ok(NormalizedMatrix {
            labels,
            values,
            scale: raw.scale,
        })
    }
}

impl From<NormalizedMatrix> for RawNormalizedMatrix {
    fn from(matrix: NormalizedMatrix) -> Self {
        RawNormalizedMatrix {
            rows: row_major(&matrix.values),
            scale: matrix.scale,
            labels: matrix.labels,
        }
    }
}

/// Serde face of [`TotalRelationMatrix`]. Deserialized data is structurally
/// revalidated (square, labeled, unique).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTotalRelationMatrix {
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TryFrom<RawTotalRelationMatrix> for TotalRelationMatrix {
    type Error = DematelError;

    fn try_from(raw: RawTotalRelationMatrix) -> Result<Self, Self::Error> {
        let (labels, values) = InfluenceMatrix::from_rows(raw.labels, raw.rows)?.into_parts();
        Ok(TotalRelationMatrix { labels, values })
    }
}

impl From<TotalRelationMatrix> for RawTotalRelationMatrix {
    fn from(matrix: TotalRelationMatrix) -> Self {
        RawTotalRelationMatrix {
            rows: row_major(&matrix.values),
            labels: matrix.labels,
        }
    }
}
