//! Value Coercion
//!
//! Tolerant, per-field parsing of raw report values. The policy is
//! degrade-to-zero: a value that does not parse leaves its field at the
//! type's zero value (`0`, `0.0`, `false`, `""`) instead of failing the
//! record or the report. Surrounding whitespace is ignored for numbers.

use std::str::FromStr;

/// Parse `raw` as `T`, falling back to `T::default()`
pub fn or_zero<T>(raw: &str) -> T
where
    T: FromStr + Default,
{
    raw.trim().parse().unwrap_or_default()
}

/// Signed 64-bit integer field
pub fn int(raw: &str) -> i64 {
    or_zero(raw)
}

/// Unsigned 64-bit integer field
pub fn uint(raw: &str) -> u64 {
    or_zero(raw)
}

/// Unsigned 32-bit integer field
pub fn uint32(raw: &str) -> u32 {
    or_zero(raw)
}

/// Small non-negative code stored as `i32`; out-of-range degrades to zero
pub fn code(raw: &str) -> i32 {
    i32::try_from(uint32(raw)).unwrap_or_default()
}

/// Floating point field
pub fn float(raw: &str) -> f64 {
    or_zero(raw)
}

/// Fixed-width text field: trailing space padding removed
pub fn text(raw: &str) -> String {
    raw.trim_end_matches(' ').to_string()
}

/// Text field kept exactly as reported
pub fn verbatim(raw: &str) -> String {
    raw.to_string()
}

/// Flag field: true only for the exact, case-sensitive `truth` token
pub fn flag(raw: &str, truth: &str) -> bool {
    raw == truth
}

/// Strict boolean literal as used by status properties.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool_literal(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
