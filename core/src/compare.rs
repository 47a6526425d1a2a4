//! Comparison entry points.
//!
//! Orchestrates sheet matching and grid diffing into the workbook-level
//! result, and exposes the line-script entry point for plain text. Page text
//! and visual page comparison live in [`crate::page_text`] and
//! [`crate::visual`].

use crate::config::CompareConfig;
use crate::grid_diff::{SheetComparison, diff_sheet};
use crate::line_diff::{LineChange, diff_lines};
use crate::schedule::{NoYield, YieldPoint};
use crate::sheet_match::match_sheets;
use crate::workbook::Workbook;
use serde::{Deserialize, Serialize};

/// Full result of comparing two workbooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookComparison {
    pub sheet_results: Vec<SheetComparison>,
    /// Names of sheets present in B with no counterpart in A.
    pub missing_in_a: Vec<String>,
    /// Names of sheets present in A with no counterpart in B.
    pub missing_in_b: Vec<String>,
    pub sheet_count_a: usize,
    pub sheet_count_b: usize,
    pub sheet_count_differs: bool,
    pub max_rows_a: u32,
    pub max_rows_b: u32,
    pub max_cols_a: u32,
    pub max_cols_b: u32,
    /// Arithmetic mean of the per-sheet ratios, 0 with no pairings.
    pub overall_diff_ratio: f64,
}

impl WorkbookComparison {
    pub fn total_differences(&self) -> usize {
        self.sheet_results
            .iter()
            .map(|sheet| sheet.differences.len())
            .sum()
    }

    pub fn has_differences(&self) -> bool {
        self.total_differences() > 0
            || !self.missing_in_a.is_empty()
            || !self.missing_in_b.is_empty()
    }
}

/// Compare two workbooks on the current thread.
pub fn compare_workbooks(
    a: &Workbook,
    b: &Workbook,
    config: &CompareConfig,
) -> WorkbookComparison {
    compare_workbooks_with_yield(a, b, config, &mut NoYield)
}

/// Like [`compare_workbooks`], yielding to `yield_point` between row batches
/// of the grid scan.
pub fn compare_workbooks_with_yield(
    a: &Workbook,
    b: &Workbook,
    config: &CompareConfig,
    yield_point: &mut dyn YieldPoint,
) -> WorkbookComparison {
    let matched = match_sheets(a, b, config.sheet_matching);

    let mut sheet_results = Vec::with_capacity(matched.pairs.len());
    for pairing in &matched.pairs {
        sheet_results.push(diff_sheet(
            &pairing.sheet_a.name,
            &pairing.sheet_a.grid,
            &pairing.sheet_b.grid,
            config,
            yield_point,
        ));
    }

    let overall_diff_ratio = if sheet_results.is_empty() {
        0.0
    } else {
        sheet_results.iter().map(|s| s.diff_ratio).sum::<f64>() / sheet_results.len() as f64
    };

    WorkbookComparison {
        missing_in_a: matched.missing_in_a,
        missing_in_b: matched.missing_in_b,
        sheet_count_a: a.sheets.len(),
        sheet_count_b: b.sheets.len(),
        sheet_count_differs: a.sheets.len() != b.sheets.len(),
        max_rows_a: a.max_rows(),
        max_rows_b: b.max_rows(),
        max_cols_a: a.max_cols(),
        max_cols_b: b.max_cols(),
        overall_diff_ratio,
        sheet_results,
    }
}

/// Line-level change script between two plain texts, using the configured
/// alignment strategy.
pub fn compare_texts(a: &str, b: &str, config: &CompareConfig) -> Vec<LineChange> {
    diff_lines(a, b, config.line_alignment.aligner())
}
