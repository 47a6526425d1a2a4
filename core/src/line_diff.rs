//! Line-oriented change scripts.
//!
//! Aligns two line sequences into an ordered script of common, added, and
//! removed entries. The script satisfies a round-trip invariant: filtering to
//! `common`+`removed` and concatenating reconstructs input A exactly, and
//! `common`+`added` reconstructs input B.
//!
//! Two [`LineAligner`] implementations are provided:
//! - [`MyersAligner`]: O(n·d) shortest-edit-script alignment (default)
//! - [`FirstFitAligner`]: greedy unique first-fit anchoring, preserving the
//!   legacy script shape at O(n·m) cost

use crate::config::LineAlignment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Common,
    Added,
    Removed,
}

impl ChangeKind {
    pub fn is_change(self) -> bool {
        !matches!(self, ChangeKind::Common)
    }
}

/// One entry of a change script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    pub text: String,
    pub kind: ChangeKind,
}

impl LineChange {
    pub fn common(text: impl Into<String>) -> LineChange {
        LineChange {
            text: text.into(),
            kind: ChangeKind::Common,
        }
    }

    pub fn added(text: impl Into<String>) -> LineChange {
        LineChange {
            text: text.into(),
            kind: ChangeKind::Added,
        }
    }

    pub fn removed(text: impl Into<String>) -> LineChange {
        LineChange {
            text: text.into(),
            kind: ChangeKind::Removed,
        }
    }
}

/// Split on `\n`, dropping the single empty line a final terminator would
/// otherwise produce.
pub fn split_lines(text: &str) -> Vec<&str> {
    let trimmed = text.strip_suffix('\n').unwrap_or(text);
    trimmed.split('\n').collect()
}

/// Alignment of two line sequences into a change script.
///
/// Implementations must emit every index of both inputs exactly once, in
/// order, so the round-trip invariant holds.
pub trait LineAligner {
    fn align(&self, a: &[&str], b: &[&str]) -> Vec<LineChange>;
}

impl LineAlignment {
    pub(crate) fn aligner(self) -> &'static dyn LineAligner {
        match self {
            LineAlignment::Myers => &MyersAligner,
            LineAlignment::FirstFit => &FirstFitAligner,
        }
    }
}

/// Split both texts and align them with `aligner`.
pub fn diff_lines(a: &str, b: &str, aligner: &dyn LineAligner) -> Vec<LineChange> {
    aligner.align(&split_lines(a), &split_lines(b))
}

/// Shortest-edit-script alignment (Myers, O(n·d)).
#[derive(Debug, Default, Clone, Copy)]
pub struct MyersAligner;

impl LineAligner for MyersAligner {
    fn align(&self, a: &[&str], b: &[&str]) -> Vec<LineChange> {
        myers_script(a, b)
    }
}

fn myers_script(a: &[&str], b: &[&str]) -> Vec<LineChange> {
    let n = a.len();
    let m = b.len();
    if n == 0 && m == 0 {
        return Vec::new();
    }

    let max = n + m;
    let offset = max as isize;
    // Furthest-reaching x per diagonal k, indexed by k + offset.
    let mut v = vec![0usize; 2 * max + 1];
    let mut trace: Vec<Vec<usize>> = Vec::new();

    let mut reached_end = false;
    'search: for d in 0..=(max as isize) {
        trace.push(v.clone());
        let mut k = -d;
        while k <= d {
            let idx = (k + offset) as usize;
            let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && a[x] == b[y] {
                x += 1;
                y += 1;
            }
            v[idx] = x;
            if x >= n && y >= m {
                reached_end = true;
                break 'search;
            }
            k += 2;
        }
    }
    debug_assert!(reached_end, "edit search must reach (n, m) by depth n + m");

    // Backtrack from (n, m); each depth contributes its snake and one edit.
    let mut script = Vec::new();
    let mut x = n as isize;
    let mut y = m as isize;
    for (d, v) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;
        let idx = (k + offset) as usize;
        let prev_k = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
            k + 1
        } else {
            k - 1
        };
        let prev_idx = (prev_k + offset) as usize;
        let prev_x = v[prev_idx] as isize;
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            script.push(LineChange::common(a[(x - 1) as usize]));
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if x == prev_x {
                script.push(LineChange::added(b[(y - 1) as usize]));
            } else {
                script.push(LineChange::removed(a[(x - 1) as usize]));
            }
        }
        x = prev_x;
        y = prev_y;
    }
    script.reverse();
    script
}

/// Greedy unique first-fit alignment.
///
/// Each line of A claims the first not-yet-claimed identical line of B as an
/// anchor; anchors are then replayed in lockstep with both sequences. Not a
/// minimum-edit-distance algorithm: anchors can be suboptimal, and an anchor
/// whose B index precedes an already-consumed position is dropped during
/// replay rather than looping.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstFitAligner;

impl LineAligner for FirstFitAligner {
    fn align(&self, a: &[&str], b: &[&str]) -> Vec<LineChange> {
        let anchors = first_fit_anchors(a, b);
        replay_anchors(a, b, &anchors)
    }
}

fn first_fit_anchors(a: &[&str], b: &[&str]) -> Vec<(usize, usize)> {
    let mut claimed_b = vec![false; b.len()];
    let mut anchors = Vec::new();
    for (i, line) in a.iter().enumerate() {
        for (j, candidate) in b.iter().enumerate() {
            if !claimed_b[j] && line == candidate {
                claimed_b[j] = true;
                anchors.push((i, j));
                break;
            }
        }
    }
    anchors
}

fn replay_anchors(a: &[&str], b: &[&str], anchors: &[(usize, usize)]) -> Vec<LineChange> {
    let mut script = Vec::new();
    let mut ia = 0;
    let mut ib = 0;
    let mut next = 0;
    while ia < a.len() || ib < b.len() {
        if next < anchors.len() && ia == anchors[next].0 && ib == anchors[next].1 {
            script.push(LineChange::common(a[ia]));
            ia += 1;
            ib += 1;
            next += 1;
        } else if next < anchors.len() && ia < anchors[next].0 {
            script.push(LineChange::removed(a[ia]));
            ia += 1;
        } else if next < anchors.len() && ib < anchors[next].1 {
            script.push(LineChange::added(b[ib]));
            ib += 1;
        } else if next >= anchors.len() && ia < a.len() {
            script.push(LineChange::removed(a[ia]));
            ia += 1;
        } else if next >= anchors.len() && ib < b.len() {
            script.push(LineChange::added(b[ib]));
            ib += 1;
        } else {
            // Inverted anchor: its B index was already consumed. Skip it and
            // let the remaining lines fall out as added/removed.
            next += 1;
        }
    }
    script
}
