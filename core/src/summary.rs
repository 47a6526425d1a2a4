//! Difference counting and structural rollups.
//!
//! Counts are pure functions of already-computed change scripts; structural
//! deltas come from the known input dimensions, never from diff entries.

use crate::compare::WorkbookComparison;
use crate::line_diff::{ChangeKind, LineChange};
use crate::page_text::{PageTextChange, PageTextComparison, PageTextDiff};
use serde::{Deserialize, Serialize};

/// Number of non-common entries in a line script.
pub fn count_line_changes(changes: &[LineChange]) -> usize {
    changes.iter().filter(|c| c.kind.is_change()).count()
}

/// Number of changes in a word script, counting a `removed` entry immediately
/// followed by an `added` entry as a single replacement.
pub fn count_paired_changes(changes: &[PageTextChange]) -> usize {
    let changed: Vec<&PageTextChange> =
        changes.iter().filter(|c| c.kind.is_change()).collect();
    let mut count = 0;
    let mut i = 0;
    while i < changed.len() {
        let is_replacement = changed[i].kind == ChangeKind::Removed
            && changed
                .get(i + 1)
                .is_some_and(|next| next.kind == ChangeKind::Added);
        count += 1;
        i += if is_replacement { 2 } else { 1 };
    }
    count
}

/// Paired change count summed over all pages.
pub fn count_page_changes(pages: &[PageTextDiff]) -> usize {
    pages
        .iter()
        .map(|page| count_paired_changes(&page.changes))
        .sum()
}

/// Total cell differences over all sheet pairings.
pub fn count_cell_differences(result: &WorkbookComparison) -> usize {
    result
        .sheet_results
        .iter()
        .map(|sheet| sheet.differences.len())
        .sum()
}

/// Aggregated difference count plus the structural dimensions of both
/// inputs. Dimension fields that do not apply to the compared kind are
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub difference_count: usize,
    pub byte_size_a: u64,
    pub byte_size_b: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_count_a: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_count_b: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rows_a: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rows_b: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cols_a: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cols_b: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count_a: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count_b: Option<usize>,
}

impl ComparisonSummary {
    fn bare(difference_count: usize, byte_size_a: u64, byte_size_b: u64) -> ComparisonSummary {
        ComparisonSummary {
            difference_count,
            byte_size_a,
            byte_size_b,
            sheet_count_a: None,
            sheet_count_b: None,
            max_rows_a: None,
            max_rows_b: None,
            max_cols_a: None,
            max_cols_b: None,
            page_count_a: None,
            page_count_b: None,
        }
    }

    pub fn byte_size_delta(&self) -> i64 {
        self.byte_size_b as i64 - self.byte_size_a as i64
    }

    pub fn for_workbooks(
        result: &WorkbookComparison,
        byte_size_a: u64,
        byte_size_b: u64,
    ) -> ComparisonSummary {
        let mut summary =
            ComparisonSummary::bare(count_cell_differences(result), byte_size_a, byte_size_b);
        summary.sheet_count_a = Some(result.sheet_count_a);
        summary.sheet_count_b = Some(result.sheet_count_b);
        summary.max_rows_a = Some(result.max_rows_a);
        summary.max_rows_b = Some(result.max_rows_b);
        summary.max_cols_a = Some(result.max_cols_a);
        summary.max_cols_b = Some(result.max_cols_b);
        summary
    }

    pub fn for_text(
        changes: &[LineChange],
        byte_size_a: u64,
        byte_size_b: u64,
    ) -> ComparisonSummary {
        ComparisonSummary::bare(count_line_changes(changes), byte_size_a, byte_size_b)
    }

    pub fn for_pages(
        result: &PageTextComparison,
        byte_size_a: u64,
        byte_size_b: u64,
    ) -> ComparisonSummary {
        let mut summary = ComparisonSummary::bare(
            count_page_changes(&result.pages),
            byte_size_a,
            byte_size_b,
        );
        summary.page_count_a = Some(result.page_count_a);
        summary.page_count_b = Some(result.page_count_b);
        summary
    }
}
