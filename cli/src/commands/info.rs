use crate::commands::{InputKind, input_kind};
use anyhow::{Context, Result};
use doc_diff::{open_workbook, read_plain_text, split_lines};
use std::process::ExitCode;

pub fn run(path: &str) -> Result<ExitCode> {
    match input_kind(path) {
        InputKind::Workbook => print_workbook_info(path)?,
        InputKind::Text => print_text_info(path)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn print_workbook_info(path: &str) -> Result<()> {
    let workbook =
        open_workbook(path).with_context(|| format!("failed to open workbook '{path}'"))?;
    println!("{path}: {} sheet(s)", workbook.sheets.len());
    for sheet in &workbook.sheets {
        println!(
            "  {}: {} row(s), {} column(s), {} cell(s)",
            sheet.name,
            sheet.grid.nrows(),
            sheet.grid.max_row_len(),
            sheet.grid.cell_count()
        );
    }
    Ok(())
}

fn print_text_info(path: &str) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read '{path}'"))?;
    let text = read_plain_text(&bytes);
    println!(
        "{path}: {} byte(s), {} line(s)",
        bytes.len(),
        split_lines(&text).len()
    );
    Ok(())
}
