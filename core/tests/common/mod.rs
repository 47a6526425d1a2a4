//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use doc_diff::{CellValue, Grid, Sheet, Workbook};

pub fn num(n: f64) -> Option<CellValue> {
    Some(CellValue::Number(n))
}

pub fn text(s: &str) -> Option<CellValue> {
    Some(CellValue::Text(s.to_string()))
}

pub fn grid_from_numbers(values: &[&[i32]]) -> Grid {
    Grid::from_rows(
        values
            .iter()
            .map(|row| row.iter().map(|v| num(*v as f64)).collect())
            .collect(),
    )
}

pub fn single_sheet_workbook(name: &str, grid: Grid) -> Workbook {
    Workbook {
        sheets: vec![Sheet::new(name, grid)],
    }
}

pub fn workbook_from_sheets(sheets: Vec<(&str, Grid)>) -> Workbook {
    Workbook {
        sheets: sheets
            .into_iter()
            .map(|(name, grid)| Sheet::new(name, grid))
            .collect(),
    }
}
