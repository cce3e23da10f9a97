use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

/// Any optionally signed digit run. Shapes matching this never fall through
/// to the float path, so a padded literal like "01" survives as text.
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

/// A digit run without a padding zero.
static CANONICAL_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(0|[1-9][0-9]*)$").unwrap());

/// Convert raw element or attribute text to the nearest JSON primitive.
///
/// `true`, `false` and `null` match ASCII case-insensitively. Integers promote
/// to the smallest exact representation, falling back to an arbitrary-precision
/// number for magnitudes past 64 bits. Doubles must be finite and must begin
/// with a digit or `-`; hex literals, a leading `+` and surrounding whitespace
/// all stay text.
pub(crate) fn coerce(text: &str) -> Value {
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if text.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if let Some(initial) = text.chars().next() {
        if initial == '-' || initial.is_ascii_digit() {
            if DIGIT_RUN.is_match(text) {
                if !CANONICAL_INTEGER.is_match(text) {
                    return Value::String(text.to_owned());
                }
                if let Ok(small) = text.parse::<i64>() {
                    return Value::Number(small.into());
                }
                if let Ok(wide) = text.parse::<u64>() {
                    return Value::Number(wide.into());
                }
                if let Ok(number) = serde_json::from_str::<Number>(text) {
                    return Value::Number(number);
                }
            } else if let Ok(double) = text.parse::<f64>() {
                if double.is_finite() {
                    if let Some(number) = Number::from_f64(double) {
                        return Value::Number(number);
                    }
                }
            }
        }
    }
    Value::String(text.to_owned())
}
