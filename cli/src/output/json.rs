use anyhow::Result;
use doc_diff::{ComparisonSummary, LineChange, WorkbookComparison};
use serde_json::json;

pub fn print_workbook(result: &WorkbookComparison, summary: &ComparisonSummary) -> Result<()> {
    let payload = json!({
        "summary": summary,
        "result": result,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub fn print_text(changes: &[LineChange], summary: &ComparisonSummary) -> Result<()> {
    let payload = json!({
        "summary": summary,
        "changes": changes,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
