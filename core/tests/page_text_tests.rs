use doc_diff::{
    ChangeKind, CompareConfig, ComparisonSummary, MyersAligner, compare_page_texts,
    count_page_changes, count_paired_changes, diff_percentage, diff_words,
};

fn pages(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

#[test]
fn identical_page_sets_have_no_differences() {
    let a = pages(&["page one text", "page two text"]);
    let result = compare_page_texts(&a, &a, &CompareConfig::default());
    assert_eq!(result.pages.len(), 2);
    assert!(result.pages.iter().all(|p| !p.has_differences));
    assert_eq!(result.overall_diff_percentage, 0.0);
    assert!(!result.page_count_differs);
}

#[test]
fn word_replacement_scores_changed_characters() {
    let a = pages(&["the quick fox"]);
    let b = pages(&["the slow fox"]);
    let result = compare_page_texts(&a, &b, &CompareConfig::default());
    let page = &result.pages[0];
    assert!(page.has_differences);
    // "quick" (5) removed + "slow" (4) added over 17 total characters.
    assert!((page.diff_percentage - 9.0 / 17.0 * 100.0).abs() < 1e-9);
}

#[test]
fn missing_page_compares_as_empty_and_scores_full() {
    let a = pages(&["same words", "only in a"]);
    let b = pages(&["same words"]);
    let result = compare_page_texts(&a, &b, &CompareConfig::default());
    assert_eq!(result.pages.len(), 2);
    assert!(result.page_count_differs);

    let second = &result.pages[1];
    assert_eq!(second.page_number, 2);
    assert!(second.has_differences);
    assert_eq!(second.diff_percentage, 100.0);
    assert!(
        second
            .changes
            .iter()
            .all(|c| c.kind == ChangeKind::Removed)
    );
}

#[test]
fn overall_percentage_is_mean_over_pages() {
    let a = pages(&["alpha", "beta"]);
    let b = pages(&["alpha", "gamma"]);
    let result = compare_page_texts(&a, &b, &CompareConfig::default());
    assert_eq!(result.pages[0].diff_percentage, 0.0);
    assert_eq!(result.pages[1].diff_percentage, 100.0);
    assert!((result.overall_diff_percentage - 50.0).abs() < 1e-9);
}

#[test]
fn empty_page_sets_compare_clean() {
    let result = compare_page_texts(&[], &[], &CompareConfig::default());
    assert!(result.pages.is_empty());
    assert_eq!(result.overall_diff_percentage, 0.0);
}

#[test]
fn adjacent_removed_added_counts_as_one_change() {
    let changes = diff_words("the quick fox", "the slow fox", &MyersAligner);
    assert_eq!(count_paired_changes(&changes), 1);
}

#[test]
fn page_summary_carries_page_counts() {
    let a = pages(&["one", "two"]);
    let b = pages(&["one"]);
    let result = compare_page_texts(&a, &b, &CompareConfig::default());
    let summary = ComparisonSummary::for_pages(&result, 10, 5);
    assert_eq!(summary.page_count_a, Some(2));
    assert_eq!(summary.page_count_b, Some(1));
    assert_eq!(summary.difference_count, count_page_changes(&result.pages));
    assert_eq!(summary.byte_size_delta(), -5);
    assert_eq!(summary.sheet_count_a, None);
}

#[test]
fn word_script_percentage_of_empty_script_is_zero() {
    assert_eq!(diff_percentage(&[]), 0.0);
}
