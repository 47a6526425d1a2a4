use doc_diff::{ChangeKind, ComparisonSummary, LineChange, WorkbookComparison};

pub fn print_workbook(result: &WorkbookComparison, summary: &ComparisonSummary, quiet: bool) {
    println!(
        "{} difference(s) across {} paired sheet(s)",
        summary.difference_count,
        result.sheet_results.len()
    );
    println!(
        "sheets: {} vs {}; overall diff ratio: {:.4}",
        result.sheet_count_a, result.sheet_count_b, result.overall_diff_ratio
    );

    for name in &result.missing_in_b {
        println!("sheet only in old file: {name}");
    }
    for name in &result.missing_in_a {
        println!("sheet only in new file: {name}");
    }

    if quiet {
        return;
    }

    for sheet in &result.sheet_results {
        if sheet.differences.is_empty() {
            continue;
        }
        println!(
            "{}: {} difference(s), ratio {:.4}",
            sheet.sheet_name,
            sheet.differences.len(),
            sheet.diff_ratio
        );
        for diff in &sheet.differences {
            let value_a = diff
                .value_a
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "<blank>".to_string());
            let value_b = diff
                .value_b
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "<blank>".to_string());
            match &diff.column_label {
                Some(label) => println!(
                    "  {}!{} [{}]: {} -> {}",
                    diff.sheet,
                    diff.address(),
                    label,
                    value_a,
                    value_b
                ),
                None => println!(
                    "  {}!{}: {} -> {}",
                    diff.sheet,
                    diff.address(),
                    value_a,
                    value_b
                ),
            }
        }
    }
}

pub fn print_text(changes: &[LineChange], summary: &ComparisonSummary, quiet: bool) {
    println!("{} changed line(s)", summary.difference_count);
    if quiet {
        return;
    }
    for change in changes {
        let prefix = match change.kind {
            ChangeKind::Common => ' ',
            ChangeKind::Added => '+',
            ChangeKind::Removed => '-',
        };
        println!("{prefix}{}", change.text);
    }
}
