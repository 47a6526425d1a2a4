//! Word-level page text comparison.
//!
//! Pairs per-page extracted texts by index (a missing page compares as
//! empty), aligns each pair at word granularity, and scores pages by the
//! share of changed characters.

use crate::config::CompareConfig;
use crate::line_diff::{LineAligner, LineChange};
use serde::{Deserialize, Serialize};

/// Word-granularity change entry; same shape as a line change.
pub type PageTextChange = LineChange;

/// Change script and score for one page pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTextDiff {
    /// 1-based page number.
    pub page_number: u32,
    pub has_differences: bool,
    pub diff_percentage: f64,
    pub changes: Vec<PageTextChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTextComparison {
    pub page_count_a: usize,
    pub page_count_b: usize,
    pub page_count_differs: bool,
    pub overall_diff_percentage: f64,
    pub pages: Vec<PageTextDiff>,
}

/// Tokenize into maximal runs of whitespace and non-whitespace. Both run
/// kinds are kept so concatenating a filtered script reconstructs the page
/// text exactly.
fn tokenize_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(first) = rest.chars().next() {
        let in_whitespace = first.is_whitespace();
        let split = rest
            .find(|c: char| c.is_whitespace() != in_whitespace)
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(split);
        tokens.push(token);
        rest = tail;
    }
    tokens
}

fn merge_adjacent(entries: Vec<PageTextChange>) -> Vec<PageTextChange> {
    let mut merged: Vec<PageTextChange> = Vec::new();
    for entry in entries {
        match merged.last_mut() {
            Some(last) if last.kind == entry.kind => last.text.push_str(&entry.text),
            _ => merged.push(entry),
        }
    }
    merged
}

/// Word-level change script between two page texts.
pub fn diff_words(a: &str, b: &str, aligner: &dyn LineAligner) -> Vec<PageTextChange> {
    let tokens_a = tokenize_words(a);
    let tokens_b = tokenize_words(b);
    merge_adjacent(aligner.align(&tokens_a, &tokens_b))
}

/// Changed characters over total characters, as a percentage (0 when the
/// script is empty).
pub fn diff_percentage(changes: &[PageTextChange]) -> f64 {
    let total: usize = changes.iter().map(|c| c.text.len()).sum();
    if total == 0 {
        return 0.0;
    }
    let changed: usize = changes
        .iter()
        .filter(|c| c.kind.is_change())
        .map(|c| c.text.len())
        .sum();
    changed as f64 / total as f64 * 100.0
}

/// Compare two ordered lists of per-page texts. Pages are paired by index up
/// to the longer count; a page missing on one side compares as empty text.
pub fn compare_page_texts(
    pages_a: &[String],
    pages_b: &[String],
    config: &CompareConfig,
) -> PageTextComparison {
    let aligner = config.line_alignment.aligner();
    let page_count = pages_a.len().max(pages_b.len());
    let mut pages = Vec::with_capacity(page_count);
    for index in 0..page_count {
        let text_a = pages_a.get(index).map(String::as_str).unwrap_or("");
        let text_b = pages_b.get(index).map(String::as_str).unwrap_or("");
        let changes = diff_words(text_a, text_b, aligner);
        let has_differences = changes.iter().any(|c| c.kind.is_change());
        pages.push(PageTextDiff {
            page_number: index as u32 + 1,
            has_differences,
            diff_percentage: diff_percentage(&changes),
            changes,
        });
    }

    let overall_diff_percentage = if pages.is_empty() {
        0.0
    } else {
        pages.iter().map(|p| p.diff_percentage).sum::<f64>() / pages.len() as f64
    };

    PageTextComparison {
        page_count_a: pages_a.len(),
        page_count_b: pages_b.len(),
        page_count_differs: pages_a.len() != pages_b.len(),
        overall_diff_percentage,
        pages,
    }
}
