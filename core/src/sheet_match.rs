//! Sheet pairing across two workbooks.
//!
//! Pairs sheets by identical name (default) or by position, and reports the
//! sheets on either side that have no counterpart. Unmatched sheets are never
//! diffed; each name appears in at most one pairing and at most once per
//! missing list.

use crate::config::SheetMatching;
use crate::workbook::{Sheet, Workbook};
use rustc_hash::FxHashMap;

/// One sheet of A paired with one sheet of B for grid comparison.
#[derive(Debug, Clone, Copy)]
pub struct SheetPairing<'a> {
    pub sheet_a: &'a Sheet,
    pub sheet_b: &'a Sheet,
}

#[derive(Debug, Default)]
pub struct SheetMatch<'a> {
    pub pairs: Vec<SheetPairing<'a>>,
    /// Names of sheets present in B with no counterpart in A.
    pub missing_in_a: Vec<String>,
    /// Names of sheets present in A with no counterpart in B.
    pub missing_in_b: Vec<String>,
}

pub fn match_sheets<'a>(
    a: &'a Workbook,
    b: &'a Workbook,
    mode: SheetMatching,
) -> SheetMatch<'a> {
    match mode {
        SheetMatching::ByName => match_by_name(a, b),
        SheetMatching::ByPosition => match_by_position(a, b),
    }
}

fn match_by_name<'a>(a: &'a Workbook, b: &'a Workbook) -> SheetMatch<'a> {
    // Unclaimed B indices per name, reversed so pop() takes the earliest.
    let mut unclaimed: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (idx, sheet) in b.sheets.iter().enumerate().rev() {
        unclaimed.entry(sheet.name.as_str()).or_default().push(idx);
    }

    let mut result = SheetMatch::default();
    let mut claimed_b = vec![false; b.sheets.len()];
    for sheet_a in &a.sheets {
        match unclaimed
            .get_mut(sheet_a.name.as_str())
            .and_then(Vec::pop)
        {
            Some(idx) => {
                claimed_b[idx] = true;
                result.pairs.push(SheetPairing {
                    sheet_a,
                    sheet_b: &b.sheets[idx],
                });
            }
            None => push_unique(&mut result.missing_in_b, &sheet_a.name),
        }
    }
    for (idx, sheet_b) in b.sheets.iter().enumerate() {
        if !claimed_b[idx] {
            push_unique(&mut result.missing_in_a, &sheet_b.name);
        }
    }
    result
}

fn match_by_position<'a>(a: &'a Workbook, b: &'a Workbook) -> SheetMatch<'a> {
    let paired = a.sheets.len().min(b.sheets.len());
    let mut result = SheetMatch::default();
    for (sheet_a, sheet_b) in a.sheets.iter().zip(&b.sheets) {
        result.pairs.push(SheetPairing { sheet_a, sheet_b });
    }
    for sheet in &a.sheets[paired..] {
        push_unique(&mut result.missing_in_b, &sheet.name);
    }
    for sheet in &b.sheets[paired..] {
        push_unique(&mut result.missing_in_a, &sheet.name);
    }
    result
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|existing| existing == name) {
        names.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::Grid;

    fn workbook(names: &[&str]) -> Workbook {
        Workbook {
            sheets: names
                .iter()
                .map(|name| Sheet::new(*name, Grid::default()))
                .collect(),
        }
    }

    #[test]
    fn name_mode_pairs_identical_names_only() {
        let a = workbook(&["Data", "Notes"]);
        let b = workbook(&["Data", "Extra"]);
        let matched = match_sheets(&a, &b, SheetMatching::ByName);
        assert_eq!(matched.pairs.len(), 1);
        assert_eq!(matched.pairs[0].sheet_a.name, "Data");
        assert_eq!(matched.missing_in_b, vec!["Notes"]);
        assert_eq!(matched.missing_in_a, vec!["Extra"]);
    }

    #[test]
    fn position_mode_reports_excess_on_the_shorter_side() {
        let a = workbook(&["S1", "S2"]);
        let b = workbook(&["T1", "T2", "T3"]);
        let matched = match_sheets(&a, &b, SheetMatching::ByPosition);
        assert_eq!(matched.pairs.len(), 2);
        assert_eq!(matched.pairs[0].sheet_b.name, "T1");
        assert_eq!(matched.pairs[1].sheet_b.name, "T2");
        assert_eq!(matched.missing_in_a, vec!["T3"]);
        assert!(matched.missing_in_b.is_empty());
    }
}
