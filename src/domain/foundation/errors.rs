//! Error types for DEMATEL analysis.

use thiserror::Error;

/// Errors that abort a DEMATEL analysis run.
///
/// Every variant is fatal to the run that raised it: the pipeline halts at
/// the failing stage and the error propagates unchanged to the caller. There
/// is no retry and no partial recovery; these are data or structural
/// problems, not transient faults.
#[derive(Debug, Clone, Error)]
pub enum DematelError {
    /// The input matrix is not square.
    #[error("matrix must be square: got {rows} rows and {cols} columns")]
    Shape { rows: usize, cols: usize },

    /// The label sequence length disagrees with the matrix dimension.
    #[error("{labels} factor labels provided for a {dimension}x{dimension} matrix")]
    LabelMismatch { labels: usize, dimension: usize },

    /// A factor label appears more than once.
    #[error("factor label '{label}' appears more than once")]
    DuplicateLabel { label: String },

    /// An influence cell refers to a factor that was never declared.
    #[error("unknown factor '{label}'")]
    UnknownFactor { label: String },

    /// The normalization scale is not strictly positive (e.g. an all-zero
    /// input matrix), so no meaningful normalization exists.
    #[error("cannot normalize: largest row/column sum is {scale}, expected > 0")]
    DegenerateMatrix { scale: f64 },

    /// `I - D_norm` is singular or ill-conditioned beyond tolerance, so the
    /// total-relation matrix does not exist.
    #[error("I - D_norm is singular or near-singular (determinant {determinant:e})")]
    SingularMatrix { determinant: f64 },
}

impl DematelError {
    /// Creates a non-square matrix error.
    pub fn shape(rows: usize, cols: usize) -> Self {
        DematelError::Shape { rows, cols }
    }

    /// Creates a label/dimension mismatch error.
    pub fn label_mismatch(labels: usize, dimension: usize) -> Self {
        DematelError::LabelMismatch { labels, dimension }
    }

    /// Creates a duplicate label error.
    pub fn duplicate_label(label: impl Into<String>) -> Self {
        DematelError::DuplicateLabel { label: label.into() }
    }

    /// Creates an unknown factor error.
    pub fn unknown_factor(label: impl Into<String>) -> Self {
        DematelError::UnknownFactor { label: label.into() }
    }

    /// Creates a degenerate normalization error.
    pub fn degenerate(scale: f64) -> Self {
        DematelError::DegenerateMatrix { scale }
    }

    /// Creates a singular total-relation error.
    pub fn singular(determinant: f64) -> Self {
        DematelError::SingularMatrix { determinant }
    }

    /// Returns the stable machine-readable code for this error.
    ///
    /// The presentation layer keys user-facing messages off these codes
    /// rather than the display strings.
    pub fn code(&self) -> &'static str {
        match self {
            DematelError::Shape { .. } => "SHAPE_ERROR",
            DematelError::LabelMismatch { .. } => "LABEL_MISMATCH",
            DematelError::DuplicateLabel { .. } => "DUPLICATE_LABEL",
            DematelError::UnknownFactor { .. } => "UNKNOWN_FACTOR",
            DematelError::DegenerateMatrix { .. } => "DEGENERATE_MATRIX",
            DematelError::SingularMatrix { .. } => "SINGULAR_MATRIX",
        }
    }
}
