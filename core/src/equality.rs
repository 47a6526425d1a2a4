//! The cell equality policy.
//!
//! Blank-equivalent, numerically tolerant, string-coerced comparison used by
//! the grid differ. Pure functions; no failure modes.

use crate::workbook::CellValue;

/// Tolerance absorbing floating-point and representation noise when both
/// sides are numeric.
pub const NUMERIC_EPSILON: f64 = 1e-4;

/// A value is blank when absent or a string that trims to nothing.
pub fn is_blank(value: Option<&CellValue>) -> bool {
    match value {
        None => true,
        Some(CellValue::Text(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Equality under the default [`NUMERIC_EPSILON`].
pub fn values_equal(a: Option<&CellValue>, b: Option<&CellValue>) -> bool {
    values_equal_with(a, b, NUMERIC_EPSILON)
}

/// Two blanks are equal; one blank is not; numbers compare within `epsilon`;
/// everything else compares by string coercion.
pub fn values_equal_with(a: Option<&CellValue>, b: Option<&CellValue>, epsilon: f64) -> bool {
    let a_blank = is_blank(a);
    let b_blank = is_blank(b);
    if a_blank || b_blank {
        return a_blank == b_blank;
    }
    match (a, b) {
        (Some(CellValue::Number(x)), Some(CellValue::Number(y))) => (x - y).abs() <= epsilon,
        (Some(x), Some(y)) => x.to_string() == y.to_string(),
        // a None side is blank and never reaches here
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Option<CellValue> {
        Some(CellValue::Number(n))
    }

    fn text(s: &str) -> Option<CellValue> {
        Some(CellValue::Text(s.to_string()))
    }

    #[test]
    fn blanks_are_equal() {
        assert!(values_equal(None, None));
        assert!(values_equal(None, text("").as_ref()));
        assert!(values_equal(text("   ").as_ref(), None));
        assert!(values_equal(text("\t").as_ref(), text("").as_ref()));
    }

    #[test]
    fn one_blank_is_not_equal() {
        assert!(!values_equal(None, num(0.0).as_ref()));
        assert!(!values_equal(text("x").as_ref(), None));
    }

    #[test]
    fn numeric_tolerance_absorbs_noise() {
        assert!(values_equal(num(4.00001).as_ref(), num(4.0).as_ref()));
        assert!(!values_equal(num(4.1).as_ref(), num(4.0).as_ref()));
    }

    #[test]
    fn mixed_types_compare_by_coercion() {
        assert!(values_equal(num(4.0).as_ref(), text("4").as_ref()));
        assert!(!values_equal(num(4.0).as_ref(), text("4.0").as_ref()));
        assert!(values_equal(
            Some(CellValue::Bool(true)).as_ref(),
            text("true").as_ref()
        ));
    }
}
