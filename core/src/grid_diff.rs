//! Cell-level grid comparison.
//!
//! Diffs one paired grid either positionally or with header-based column
//! remapping, emitting a [`CellDifference`] per unequal cell. Rows are
//! scanned in fixed-size batches with a cooperative yield between batches.

use crate::addressing::cell_label;
use crate::config::CompareConfig;
use crate::equality::{is_blank, values_equal_with};
use crate::schedule::YieldPoint;
use crate::workbook::{CellValue, Grid};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One unequal cell pair, in 1-based output coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDifference {
    pub sheet: String,
    pub row: u32,
    pub col: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_a: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_b: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_label: Option<String>,
}

impl CellDifference {
    /// A1-style address of the difference.
    pub fn address(&self) -> String {
        cell_label(self.row, self.col)
    }
}

/// All differences of one sheet pairing plus its diff ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetComparison {
    pub sheet_name: String,
    pub differences: Vec<CellDifference>,
    /// `differences / (cell_count_a + cell_count_b)`, 0 on two empty grids.
    pub diff_ratio: f64,
}

/// Diff one grid pair and wrap the result with its ratio.
pub fn diff_sheet(
    sheet_name: &str,
    a: &Grid,
    b: &Grid,
    config: &CompareConfig,
    yield_point: &mut dyn YieldPoint,
) -> SheetComparison {
    let differences = diff_grids(sheet_name, a, b, config, yield_point);
    let total_cells = a.cell_count() + b.cell_count();
    let diff_ratio = if total_cells == 0 {
        0.0
    } else {
        differences.len() as f64 / total_cells as f64
    };
    SheetComparison {
        sheet_name: sheet_name.to_string(),
        differences,
        diff_ratio,
    }
}

/// Compare two paired grids cell by cell.
///
/// Header-remapped mode requires both grids non-empty; with an empty side it
/// falls back to the positional scan, which degenerates to one-sided
/// differences anyway.
pub fn diff_grids(
    sheet_name: &str,
    a: &Grid,
    b: &Grid,
    config: &CompareConfig,
    yield_point: &mut dyn YieldPoint,
) -> Vec<CellDifference> {
    if config.match_columns && !a.is_empty() && !b.is_empty() {
        diff_header_remapped(sheet_name, a, b, config, yield_point)
    } else {
        diff_positional(sheet_name, a, b, config, yield_point)
    }
}

fn cell_at<'g>(row: Option<&'g [Option<CellValue>]>, col: usize) -> Option<&'g CellValue> {
    row.and_then(|cells| cells.get(col)).and_then(Option::as_ref)
}

fn label_from(value: Option<&CellValue>) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        value.map(CellValue::to_string)
    }
}

/// Yields between row batches; counts every scanned row regardless of mode.
struct BatchTicker<'y> {
    batch_size: u32,
    scanned: u32,
    yield_point: &'y mut dyn YieldPoint,
}

impl<'y> BatchTicker<'y> {
    fn new(config: &CompareConfig, yield_point: &'y mut dyn YieldPoint) -> BatchTicker<'y> {
        BatchTicker {
            batch_size: config.row_batch_size.max(1),
            scanned: 0,
            yield_point,
        }
    }

    fn row_done(&mut self, more_rows_follow: bool) {
        self.scanned += 1;
        if more_rows_follow && self.scanned % self.batch_size == 0 {
            self.yield_point.yield_now();
        }
    }
}

fn diff_positional(
    sheet_name: &str,
    a: &Grid,
    b: &Grid,
    config: &CompareConfig,
    yield_point: &mut dyn YieldPoint,
) -> Vec<CellDifference> {
    let max_rows = a.nrows().max(b.nrows());
    let mut ticker = BatchTicker::new(config, yield_point);
    let mut differences = Vec::new();

    for r in 0..max_rows {
        let row_a = a.row(r);
        let row_b = b.row(r);
        let max_cols = row_a
            .map_or(0, |cells| cells.len())
            .max(row_b.map_or(0, |cells| cells.len()));

        for c in 0..max_cols {
            let value_a = cell_at(row_a, c);
            let value_b = cell_at(row_b, c);
            if values_equal_with(value_a, value_b, config.numeric_epsilon) {
                continue;
            }
            differences.push(CellDifference {
                sheet: sheet_name.to_string(),
                row: r + 1,
                col: c as u32 + 1,
                value_a: value_a.cloned(),
                value_b: value_b.cloned(),
                column_label: label_from(a.cell(0, c as u32)),
                row_label: label_from(a.cell(r, 0)),
            });
        }
        ticker.row_done(r + 1 < max_rows);
    }

    differences
}

/// Column mapping for header-remapped mode: pairs of (A column, B column)
/// plus the columns on either side whose header found no counterpart.
struct ColumnMapping {
    mapped: Vec<(usize, usize)>,
    unmapped_a: Vec<usize>,
    unmapped_b: Vec<usize>,
}

fn map_columns(headers_a: &[Option<CellValue>], headers_b: &[Option<CellValue>]) -> ColumnMapping {
    // Unclaimed B columns per trimmed header text, reversed so pop() takes
    // the first occurrence.
    let mut unclaimed: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    for (cb, header) in headers_b.iter().enumerate().rev() {
        if is_blank(header.as_ref()) {
            continue;
        }
        let Some(header) = header.as_ref() else {
            continue;
        };
        unclaimed
            .entry(header.to_string().trim().to_string())
            .or_default()
            .push(cb);
    }

    let mut mapped = Vec::new();
    let mut unmapped_a = Vec::new();
    for (ca, header) in headers_a.iter().enumerate() {
        if is_blank(header.as_ref()) {
            continue;
        }
        let Some(header) = header.as_ref() else {
            continue;
        };
        let text = header.to_string().trim().to_string();
        match unclaimed.get_mut(&text).and_then(Vec::pop) {
            Some(cb) => mapped.push((ca, cb)),
            None => unmapped_a.push(ca),
        }
    }

    let mut unmapped_b: Vec<usize> = unclaimed.into_values().flatten().collect();
    unmapped_b.sort_unstable();

    ColumnMapping {
        mapped,
        unmapped_a,
        unmapped_b,
    }
}

fn diff_header_remapped(
    sheet_name: &str,
    a: &Grid,
    b: &Grid,
    config: &CompareConfig,
    yield_point: &mut dyn YieldPoint,
) -> Vec<CellDifference> {
    let empty_row: &[Option<CellValue>] = &[];
    let headers_a = a.row(0).unwrap_or(empty_row);
    let headers_b = b.row(0).unwrap_or(empty_row);
    let mapping = map_columns(headers_a, headers_b);

    let mut differences = Vec::new();

    // Header-level entries for columns with no counterpart.
    for &ca in &mapping.unmapped_a {
        differences.push(CellDifference {
            sheet: sheet_name.to_string(),
            row: 1,
            col: ca as u32 + 1,
            value_a: headers_a[ca].clone(),
            value_b: None,
            column_label: label_from(headers_a[ca].as_ref()),
            row_label: None,
        });
    }
    for &cb in &mapping.unmapped_b {
        differences.push(CellDifference {
            sheet: sheet_name.to_string(),
            row: 1,
            col: cb as u32 + 1,
            value_a: None,
            value_b: headers_b[cb].clone(),
            column_label: label_from(headers_b[cb].as_ref()),
            row_label: None,
        });
    }

    let max_rows = a.nrows().max(b.nrows());
    let mut ticker = BatchTicker::new(config, yield_point);

    for r in 1..max_rows {
        let row_a = a.row(r);
        let row_b = b.row(r);
        let row_label_a = label_from(cell_at(row_a, 0));
        let row_label_b = label_from(cell_at(row_b, 0));

        for &(ca, cb) in &mapping.mapped {
            let value_a = cell_at(row_a, ca);
            let value_b = cell_at(row_b, cb);
            if values_equal_with(value_a, value_b, config.numeric_epsilon) {
                continue;
            }
            differences.push(CellDifference {
                sheet: sheet_name.to_string(),
                row: r + 1,
                col: ca as u32 + 1,
                value_a: value_a.cloned(),
                value_b: value_b.cloned(),
                column_label: label_from(headers_a[ca].as_ref()),
                row_label: row_label_a.clone().or_else(|| row_label_b.clone()),
            });
        }

        // Non-blank values under an unmapped column are one-sided changes.
        for &ca in &mapping.unmapped_a {
            let value_a = cell_at(row_a, ca);
            if is_blank(value_a) {
                continue;
            }
            differences.push(CellDifference {
                sheet: sheet_name.to_string(),
                row: r + 1,
                col: ca as u32 + 1,
                value_a: value_a.cloned(),
                value_b: None,
                column_label: label_from(headers_a[ca].as_ref()),
                row_label: row_label_a.clone(),
            });
        }
        for &cb in &mapping.unmapped_b {
            let value_b = cell_at(row_b, cb);
            if is_blank(value_b) {
                continue;
            }
            differences.push(CellDifference {
                sheet: sheet_name.to_string(),
                row: r + 1,
                col: cb as u32 + 1,
                value_a: None,
                value_b: value_b.cloned(),
                column_label: label_from(headers_b[cb].as_ref()),
                row_label: row_label_b.clone(),
            });
        }

        ticker.row_done(r + 1 < max_rows);
    }

    differences
}
