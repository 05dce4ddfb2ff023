//! Aligned text tables shared by the `Display` implementations.

use nalgebra::DMatrix;

/// Decimal places used for every rendered cell value.
pub(crate) const DISPLAY_PRECISION: usize = 3;

/// Formats one cell value at display precision.
pub(crate) fn format_value(value: f64) -> String {
    format!("{value:.DISPLAY_PRECISION$}")
}

/// Renders a header row plus data rows as an aligned table.
///
/// The first column is left-aligned (labels), the rest right-aligned
/// (numbers). Columns are separated by two spaces.
pub(crate) fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, header, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

/// Renders a labeled square matrix: column labels across the top, one
/// labeled row per factor.
pub(crate) fn render_matrix(labels: &[String], values: &DMatrix<f64>) -> String {
    let mut header = Vec::with_capacity(labels.len() + 1);
    header.push(String::new());
    header.extend(labels.iter().cloned());

    let rows: Vec<Vec<String>> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = Vec::with_capacity(labels.len() + 1);
            row.push(label.clone());
            row.extend(values.row(i).iter().map(|v| format_value(*v)));
            row
        })
        .collect();

    render_table(&header, &rows)
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let width = widths[i];
        if i == 0 {
            out.push_str(&format!("{cell:<width$}"));
        } else {
            out.push_str(&format!("{cell:>width$}"));
        }
    }
    out.push('\n');
}
