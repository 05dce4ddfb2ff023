//! Tabular input parsing for influence matrices.
//!
//! Parses the documented CSV shape: a header row whose first cell names
//! the label column (and is ignored) followed by one column label per
//! factor, then one data row per factor starting with its label. Parsing
//! is string-based; reading files or upload streams is the caller's job.

use thiserror::Error;

use crate::domain::analysis::InfluenceMatrix;
use crate::domain::foundation::DematelError;

/// Why a CSV document could not be parsed into an [`InfluenceMatrix`].
///
/// Row, column, and position numbers are 1-based.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The document had no content at all.
    #[error("input is empty")]
    EmptyInput,

    /// The header row has no column labels after the ignored first cell.
    #[error("header row has no column labels")]
    MissingHeader,

    /// A data row's cell count disagrees with the header.
    #[error("row {row} has {cells} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        cells: usize,
        expected: usize,
    },

    /// A cell could not be parsed as a number.
    #[error("row {row}, column {column}: '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },

    /// A column label disagrees with the row label at the same position.
    #[error("column label '{header}' at position {position} does not match row label '{row_label}'")]
    LabelOrderMismatch {
        position: usize,
        header: String,
        row_label: String,
    },

    /// The parsed table failed matrix validation.
    #[error(transparent)]
    Invalid(#[from] DematelError),
}

/// Parses CSV text into an [`InfluenceMatrix`].
///
/// Cells are split on commas and trimmed; quoting is not supported. Blank
/// lines are skipped. Column labels must repeat the row labels in the same
/// order, and the parsed table passes through the same validation as
/// [`InfluenceMatrix::from_rows`].
pub fn parse_csv(input: &str) -> Result<InfluenceMatrix, ParseError> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines.next().ok_or(ParseError::EmptyInput)?;
    let header_cells: Vec<&str> = header.split(',').map(str::trim).collect();
    if header_cells.len() < 2 {
        return Err(ParseError::MissingHeader);
    }
    let column_labels = &header_cells[1..];
    let expected = header_cells.len();

    let mut labels: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (index, line) in lines.enumerate() {
        let row_number = index + 1;
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() != expected {
            return Err(ParseError::RaggedRow {
                row: row_number,
                cells: cells.len(),
                expected,
            });
        }

        labels.push(cells[0].to_string());
        let mut row = Vec::with_capacity(cells.len() - 1);
        for (offset, cell) in cells[1..].iter().enumerate() {
            let value: f64 = cell.parse().map_err(|_| ParseError::InvalidNumber {
                row: row_number,
                column: offset + 2,
                value: (*cell).to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    if labels.len() != column_labels.len() {
        return Err(DematelError::shape(labels.len(), column_labels.len()).into());
    }

    for (position, (row_label, header_label)) in labels.iter().zip(column_labels).enumerate() {
        if row_label != header_label {
            return Err(ParseError::LabelOrderMismatch {
                position: position + 1,
                header: (*header_label).to_string(),
                row_label: row_label.clone(),
            });
        }
    }

    Ok(InfluenceMatrix::from_rows(labels, rows)?)
}
