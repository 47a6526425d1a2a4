//! Workbook, sheet, and grid data structures.
//!
//! The intermediate representation shared by every comparison entry point:
//! - [`Workbook`]: an ordered collection of sheets
//! - [`Sheet`]: a named sheet holding one grid
//! - [`Grid`]: dense rows of optional cell values; rows may be ragged
//! - [`CellValue`]: the string, number, or boolean payload of one cell

use serde::{Deserialize, Serialize};

/// A workbook containing zero or more sheets in document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Largest row count across all sheets.
    pub fn max_rows(&self) -> u32 {
        self.sheets
            .iter()
            .map(|sheet| sheet.grid.nrows())
            .max()
            .unwrap_or(0)
    }

    /// Largest row length across all sheets.
    pub fn max_cols(&self) -> u32 {
        self.sheets
            .iter()
            .map(|sheet| sheet.grid.max_row_len())
            .max()
            .unwrap_or(0)
    }
}

/// A single named sheet within a workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub grid: Grid,
}

impl Sheet {
    pub fn new(name: impl Into<String>, grid: Grid) -> Sheet {
        Sheet {
            name: name.into(),
            grid,
        }
    }
}

/// A dense 2-D grid of cell values.
///
/// Rows are ordered and may have different lengths; a cell outside a row's
/// length is absent and compares as blank. Row and column indices are
/// zero-based here; comparison output re-bases them to 1.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Grid {
    pub rows: Vec<Vec<Option<CellValue>>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<Option<CellValue>>>) -> Grid {
        Grid { rows }
    }

    pub fn nrows(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Length of the longest row.
    pub fn max_row_len(&self) -> u32 {
        self.rows.iter().map(|row| row.len() as u32).max().unwrap_or(0)
    }

    pub fn row(&self, row: u32) -> Option<&[Option<CellValue>]> {
        self.rows.get(row as usize).map(Vec::as_slice)
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .and_then(Option::as_ref)
    }

    /// Total cell count, summing row lengths (absent trailing cells in a
    /// shorter row do not count).
    pub fn cell_count(&self) -> u64 {
        self.rows.iter().map(|row| row.len() as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a == b,
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            _ => false,
        }
    }
}

/// String coercion used by the equality policy and by labels: numbers render
/// without a trailing `.0`, booleans as `true`/`false`.
impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> CellValue {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> CellValue {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> CellValue {
        CellValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_coercion_matches_output_rules() {
        assert_eq!(CellValue::Number(4.0).to_string(), "4");
        assert_eq!(CellValue::Number(4.5).to_string(), "4.5");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::Text("x".into()).to_string(), "x");
    }

    #[test]
    fn cell_count_sums_ragged_row_lengths() {
        let grid = Grid::from_rows(vec![
            vec![Some(CellValue::Number(1.0)), None, None],
            vec![Some(CellValue::Number(2.0))],
        ]);
        assert_eq!(grid.cell_count(), 4);
        assert_eq!(grid.nrows(), 2);
        assert_eq!(grid.max_row_len(), 3);
    }

    #[test]
    fn cell_lookup_outside_row_is_absent() {
        let grid = Grid::from_rows(vec![vec![Some(CellValue::Number(1.0))]]);
        assert!(grid.cell(0, 1).is_none());
        assert!(grid.cell(5, 0).is_none());
    }
}
