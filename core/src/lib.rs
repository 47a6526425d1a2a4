//! Document comparison engine.
//!
//! This crate provides functionality for:
//! - Cell-level comparison of workbook grids, positionally or with
//!   header-based column remapping, with name- or position-based sheet
//!   pairing
//! - Line-level change scripts for plain text
//! - Word-level change scripts for per-page document text
//! - Pixel-level comparison of rasterized pages with marker overlays
//!
//! # Quick Start
//!
//! ```
//! use doc_diff::{CellValue, CompareConfig, Grid, Sheet, Workbook, compare_workbooks};
//!
//! let old = Workbook {
//!     sheets: vec![Sheet::new(
//!         "Sheet1",
//!         Grid::from_rows(vec![vec![Some(CellValue::Number(1.0))]]),
//!     )],
//! };
//! let new = Workbook {
//!     sheets: vec![Sheet::new(
//!         "Sheet1",
//!         Grid::from_rows(vec![vec![Some(CellValue::Number(2.0))]]),
//!     )],
//! };
//!
//! let result = compare_workbooks(&old, &new, &CompareConfig::default());
//! assert_eq!(result.total_differences(), 1);
//! ```
//!
//! The engine is a pure, stateless function of its inputs: every entry point
//! builds its result from freshly extracted data and holds nothing across
//! calls.

mod addressing;
mod compare;
mod config;
mod equality;
#[cfg(feature = "open-xml")]
pub(crate) mod error_codes;
mod extract;
mod grid_diff;
mod line_diff;
mod page_text;
mod schedule;
mod sheet_match;
mod summary;
mod visual;
mod workbook;

pub use addressing::{cell_label, column_index_to_letter, letter_to_column_index};
pub use compare::{
    WorkbookComparison, compare_texts, compare_workbooks, compare_workbooks_with_yield,
};
pub use config::{
    CompareConfig, CompareConfigBuilder, ConfigError, LineAlignment, SheetMatching,
};
pub use equality::{NUMERIC_EPSILON, is_blank, values_equal, values_equal_with};
#[cfg(feature = "open-xml")]
pub use extract::{
    ContainerError, ContainerLimits, ExtractError, OpcContainer, WorkbookXmlError, open_workbook,
    open_workbook_from_reader,
};
pub use extract::read_plain_text;
pub use grid_diff::{CellDifference, SheetComparison, diff_grids, diff_sheet};
pub use line_diff::{
    ChangeKind, FirstFitAligner, LineAligner, LineChange, MyersAligner, diff_lines, split_lines,
};
pub use page_text::{
    PageTextChange, PageTextComparison, PageTextDiff, compare_page_texts, diff_percentage,
    diff_words,
};
pub use schedule::{NoYield, YieldPoint};
pub use sheet_match::{SheetMatch, SheetPairing, match_sheets};
pub use summary::{
    ComparisonSummary, count_cell_differences, count_line_changes, count_page_changes,
    count_paired_changes,
};
pub use visual::{
    Bitmap, PixelBuffer, Rgba, VisualPageResult, build_overlay, compare_page_bitmaps,
    diff_page_pair, pixel_difference_percentage,
};
pub use workbook::{CellValue, Grid, Sheet, Workbook};
