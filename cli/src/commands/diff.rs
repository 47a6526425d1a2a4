use crate::OutputFormat;
use crate::commands::{InputKind, input_kind};
use crate::output;
use anyhow::{Context, Result, bail};
use doc_diff::{
    CompareConfig, ComparisonSummary, SheetMatching, compare_texts, compare_workbooks,
    open_workbook, read_plain_text,
};
use std::process::ExitCode;

pub fn run(
    old: &str,
    new: &str,
    format: OutputFormat,
    by_position: bool,
    match_columns: bool,
    quiet: bool,
) -> Result<ExitCode> {
    let kind = match (input_kind(old), input_kind(new)) {
        (InputKind::Workbook, InputKind::Workbook) => InputKind::Workbook,
        (InputKind::Text, InputKind::Text) => InputKind::Text,
        _ => bail!("cannot compare a workbook with a plain text document"),
    };

    let config = CompareConfig::builder()
        .sheet_matching(if by_position {
            SheetMatching::ByPosition
        } else {
            SheetMatching::ByName
        })
        .match_columns(match_columns)
        .build()
        .context("invalid comparison configuration")?;

    match kind {
        InputKind::Workbook => run_workbook_diff(old, new, &config, format, quiet),
        InputKind::Text => run_text_diff(old, new, &config, format, quiet),
    }
}

fn run_workbook_diff(
    old: &str,
    new: &str,
    config: &CompareConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<ExitCode> {
    let workbook_a =
        open_workbook(old).with_context(|| format!("failed to open workbook '{old}'"))?;
    let workbook_b =
        open_workbook(new).with_context(|| format!("failed to open workbook '{new}'"))?;
    let byte_size_a = std::fs::metadata(old)?.len();
    let byte_size_b = std::fs::metadata(new)?.len();

    let result = compare_workbooks(&workbook_a, &workbook_b, config);
    let summary = ComparisonSummary::for_workbooks(&result, byte_size_a, byte_size_b);

    match format {
        OutputFormat::Text => output::text::print_workbook(&result, &summary, quiet),
        OutputFormat::Json => output::json::print_workbook(&result, &summary)?,
    }

    Ok(exit_code(result.has_differences()))
}

fn run_text_diff(
    old: &str,
    new: &str,
    config: &CompareConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<ExitCode> {
    let bytes_a =
        std::fs::read(old).with_context(|| format!("failed to read '{old}'"))?;
    let bytes_b =
        std::fs::read(new).with_context(|| format!("failed to read '{new}'"))?;
    let text_a = read_plain_text(&bytes_a);
    let text_b = read_plain_text(&bytes_b);

    let changes = compare_texts(&text_a, &text_b, config);
    let summary =
        ComparisonSummary::for_text(&changes, bytes_a.len() as u64, bytes_b.len() as u64);

    match format {
        OutputFormat::Text => output::text::print_text(&changes, &summary, quiet),
        OutputFormat::Json => output::json::print_text(&changes, &summary)?,
    }

    Ok(exit_code(summary.difference_count > 0))
}

fn exit_code(has_differences: bool) -> ExitCode {
    if has_differences {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
