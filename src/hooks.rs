//! Hook outcomes and ready-made hooks.
//!
//! Value and entry hooks return a [`HookOutcome`]: either the (possibly rewritten)
//! item to keep, or [`HookOutcome::Skip`] to leave it out of the output. Skipping is
//! not an error; positions keep advancing as if the item had been emitted.
//!
//! ## Examples
//!
//! ```rust
//! use csv_transcode::hooks::{cast_to_scalar, HookOutcome};
//! use csv_transcode::{parse_document, Config, Field};
//!
//! let config = Config::new()
//!     .with_headers(false)
//!     .with_on_parse_value(cast_to_scalar)
//!     .with_on_parse_entry(|record, _| {
//!         if record.iter().all(Field::is_empty) {
//!             HookOutcome::Skip
//!         } else {
//!             HookOutcome::Keep(record)
//!         }
//!     });
//!
//! let records = parse_document("1,2.5,x\n,\n3,,y", &config).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0], vec![Field::from(1), Field::from(2.5), Field::from("x")]);
//! assert_eq!(records[1], vec![Field::from(3), Field::Empty, Field::from("y")]);
//! ```

use crate::{Field, Number, ParsePosition};

/// What a hook decided to do with the item it was given.
#[derive(Clone, Debug, PartialEq)]
pub enum HookOutcome<T> {
    Keep(T),
    Skip,
}

impl<T> HookOutcome<T> {
    #[inline]
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, HookOutcome::Skip)
    }

    /// Converts into an `Option`, mapping `Skip` to `None`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            HookOutcome::Keep(value) => Some(value),
            HookOutcome::Skip => None,
        }
    }
}

impl<T> From<Option<T>> for HookOutcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(HookOutcome::Skip, HookOutcome::Keep)
    }
}

/// Coerces numeric-looking strings into numbers and blank strings into [`Field::Empty`].
///
/// - Surrounding whitespace is ignored
/// - A value with a `.` becomes a [`Number::Float`]
/// - Any other numeric value becomes a [`Number::Integer`], or a float if it does
///   not fit an `i64` (or uses an exponent)
/// - Everything else is kept as it is
///
/// Values are read as whole decimal numbers. An exponent is honored (`"1e3"` is
/// `1000.0`, not `1`), and hexadecimal text such as `"0x10"` or a number with a
/// trailing unit such as `"12px"` stays a string rather than being truncated to
/// its leading digits.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::hooks::{cast_to_scalar, HookOutcome};
/// use csv_transcode::{Field, ParsePosition};
///
/// let position = ParsePosition::new();
/// assert_eq!(cast_to_scalar(Field::from(" 42 "), &position), HookOutcome::Keep(Field::from(42)));
/// assert_eq!(cast_to_scalar(Field::from("-0.5"), &position), HookOutcome::Keep(Field::from(-0.5)));
/// assert_eq!(cast_to_scalar(Field::from(""), &position), HookOutcome::Keep(Field::Empty));
/// assert_eq!(cast_to_scalar(Field::from("NaN"), &position), HookOutcome::Keep(Field::from("NaN")));
/// ```
pub fn cast_to_scalar(value: Field, _position: &ParsePosition) -> HookOutcome<Field> {
    let text = match value {
        Field::String(ref s) => s.trim(),
        other => return HookOutcome::Keep(other),
    };

    if text.is_empty() {
        return HookOutcome::Keep(Field::Empty);
    }

    match scalar_number(text) {
        Some(number) => HookOutcome::Keep(Field::Number(number)),
        None => HookOutcome::Keep(value),
    }
}

fn scalar_number(text: &str) -> Option<Number> {
    // Rust's float grammar also accepts "inf" and "NaN"; those stay strings.
    let numeric_chars = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !numeric_chars || !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    if !text.contains('.') {
        if let Ok(integer) = text.parse::<i64>() {
            return Some(Number::Integer(integer));
        }
    }
    text.parse::<f64>().ok().map(Number::Float)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast(text: &str) -> Field {
        match cast_to_scalar(Field::from(text), &ParsePosition::new()) {
            HookOutcome::Keep(field) => field,
            HookOutcome::Skip => panic!("cast_to_scalar never skips"),
        }
    }

    #[test]
    fn test_cast_integers_and_floats() {
        assert_eq!(cast("10"), Field::from(10));
        assert_eq!(cast("+3"), Field::from(3));
        assert_eq!(cast("1.0"), Field::from(1.0));
        assert_eq!(cast("1e3"), Field::from(1000.0));
        assert_eq!(cast("99999999999999999999"), Field::from(1e20));
    }

    #[test]
    fn test_cast_keeps_text() {
        assert_eq!(cast("abc"), Field::from("abc"));
        assert_eq!(cast("1-2"), Field::from("1-2"));
        assert_eq!(cast("inf"), Field::from("inf"));
        assert_eq!(cast("0x10"), Field::from("0x10"));
        assert_eq!(cast("12px"), Field::from("12px"));
        assert_eq!(cast("."), Field::from("."));
    }

    #[test]
    fn test_cast_blank_is_empty() {
        assert_eq!(cast(""), Field::Empty);
        assert_eq!(cast("   "), Field::Empty);
    }

    #[test]
    fn test_cast_passes_non_strings_through() {
        let position = ParsePosition::new();
        assert_eq!(
            cast_to_scalar(Field::from(5), &position),
            HookOutcome::Keep(Field::from(5))
        );
        assert_eq!(
            cast_to_scalar(Field::Empty, &position),
            HookOutcome::Keep(Field::Empty)
        );
    }

    #[test]
    fn test_outcome_from_option() {
        assert_eq!(HookOutcome::from(Some(1)), HookOutcome::Keep(1));
        assert!(HookOutcome::<i32>::from(None).is_skip());
        assert_eq!(HookOutcome::Keep("a").into_option(), Some("a"));
    }
}
