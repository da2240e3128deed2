//! Field values held in records and rows.
//!
//! This module provides the [`Field`] enum, the unit of data inside a CSV record.
//! Decoding never guesses types: every value comes back as [`Field::String`]
//! unless a value hook (such as [`cast_to_scalar`](crate::hooks::cast_to_scalar))
//! coerces it into a [`Number`] or [`Field::Empty`].
//!
//! ## Usage Patterns
//!
//! ```rust
//! use csv_transcode::{Field, Number};
//!
//! let text = Field::from("hello");
//! let number = Field::from(42);
//! let empty = Field::Empty;
//!
//! assert!(text.is_string());
//! assert_eq!(number, Field::Number(Number::Integer(42)));
//! assert_eq!(empty.to_string(), "");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered sequence of fields, in source column order.
pub type Record = Vec<Field>;

/// A single value within a record.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::Field;
///
/// let field = Field::from("Joe");
/// assert_eq!(field.as_str(), Some("Joe"));
/// assert!(!field.is_empty());
/// assert!(Field::Empty.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Field {
    /// A value decoded as "nothing", e.g. a blank cell after scalar coercion.
    #[default]
    Empty,
    String(String),
    Number(Number),
}

/// A numeric field value.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::Number;
///
/// assert_eq!(Number::Integer(10).as_f64(), 10.0);
/// assert_eq!(Number::Float(2.0).as_i64(), Some(2));
/// assert_eq!(Number::Float(2.5).as_i64(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it has no fractional part and fits.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Field {
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Field::Empty)
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Field::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Field::Number(_))
    }

    /// If the field is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the field is a number, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Field::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// If the field is a whole number, returns it as `i64`. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the field is a number, returns it as `f64`. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }
}

/// Renders the field as it would appear before escaping.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Empty => Ok(()),
            Field::String(s) => f.write_str(s),
            Field::Number(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Empty => serializer.serialize_unit(),
            Field::String(s) => serializer.serialize_str(s),
            Field::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Field::Number(Number::Float(f)) => serializer.serialize_f64(*f),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, a number or nothing")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Field::String(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Field::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Field::Number(Number::Integer(value as i64)))
                } else {
                    Ok(Field::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Field::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Field::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Field::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Field::Empty)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Field::Empty)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }
        }

        deserializer.deserialize_any(FieldVisitor)
    }
}

impl TryFrom<Field> for i64 {
    type Error = crate::Error;

    fn try_from(value: Field) -> crate::Result<Self> {
        match value {
            Field::Number(n) => n.as_i64().ok_or_else(|| {
                crate::Error::custom(format!("cannot convert {} to i64", n))
            }),
            Field::String(s) => s
                .trim()
                .parse()
                .map_err(|_| crate::Error::custom(format!("expected integer, found {:?}", s))),
            Field::Empty => Err(crate::Error::custom("expected integer, found empty field")),
        }
    }
}

impl TryFrom<Field> for f64 {
    type Error = crate::Error;

    fn try_from(value: Field) -> crate::Result<Self> {
        match value {
            Field::Number(n) => Ok(n.as_f64()),
            Field::String(s) => s
                .trim()
                .parse()
                .map_err(|_| crate::Error::custom(format!("expected number, found {:?}", s))),
            Field::Empty => Err(crate::Error::custom("expected number, found empty field")),
        }
    }
}

impl From<Field> for String {
    fn from(value: Field) -> Self {
        match value {
            Field::String(s) => s,
            other => other.to_string(),
        }
    }
}

impl From<i32> for Field {
    fn from(value: i32) -> Self {
        Field::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Field {
    fn from(value: i64) -> Self {
        Field::Number(Number::Integer(value))
    }
}

impl From<u32> for Field {
    fn from(value: u32) -> Self {
        Field::Number(Number::Integer(value as i64))
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Number(Number::Float(value))
    }
}

impl From<Number> for Field {
    fn from(value: Number) -> Self {
        Field::Number(value)
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::String(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::String(value.to_string())
    }
}

impl<T: Into<Field>> From<Option<T>> for Field {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(i64::try_from(Field::from(42)).unwrap(), 42);
        assert_eq!(i64::try_from(Field::from(" 7 ")).unwrap(), 7);
        assert!(i64::try_from(Field::from(2.5)).is_err());
        assert!(i64::try_from(Field::Empty).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        assert_eq!(f64::try_from(Field::from(3.5)).unwrap(), 3.5);
        assert_eq!(f64::try_from(Field::from("1.25")).unwrap(), 1.25);
        assert!(f64::try_from(Field::from("abc")).is_err());
    }

    #[test]
    fn test_display_drops_type() {
        assert_eq!(Field::Empty.to_string(), "");
        assert_eq!(Field::from(10).to_string(), "10");
        assert_eq!(Field::from(1.5).to_string(), "1.5");
        assert_eq!(Field::from("a,b").to_string(), "a,b");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Field::from(None::<i32>), Field::Empty);
        assert_eq!(Field::from(Some("x")), Field::String("x".to_string()));
    }

    #[test]
    fn test_into_string() {
        assert_eq!(String::from(Field::from("abc")), "abc");
        assert_eq!(String::from(Field::from(3)), "3");
        assert_eq!(String::from(Field::Empty), "");
    }
}
