//! Deserializing rows into typed values.
//!
//! Decoded text is untyped, so a [`FieldDeserializer`] converts on demand: a
//! numeric target parses the field's text, a string target takes the text as it
//! is, and an `Option` target reads an empty field as `None`. Rows are handed to
//! the visitor as maps keyed by column name, so any `#[derive(Deserialize)]`
//! struct whose field names match the header works, and missing `Option`
//! columns come back as `None`.
//!
//! ```rust
//! use csv_transcode::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Person { name: String, age: u8, email: Option<String> }
//!
//! let people: Vec<Person> = from_str("name,age,email\nJoe,10,\nAnn,12,ann@example.com\n").unwrap();
//! assert_eq!(people[0], Person { name: "Joe".into(), age: 10, email: None });
//! assert_eq!(people[1].email.as_deref(), Some("ann@example.com"));
//! ```

use crate::{Error, Field, Number, Result, Row};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::str::FromStr;

/// Converts a [`Row`] into any type that deserializes from a map.
///
/// # Errors
///
/// Returns an error if a required column is missing or a cell cannot be
/// converted to the target field type.
pub fn from_row<T>(row: Row) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(RowDeserializer::new(row))
}

/// Converts a single [`Field`] into a scalar.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::{from_field, Field};
///
/// let age: u32 = from_field(Field::from(" 42 ")).unwrap();
/// assert_eq!(age, 42);
///
/// let missing: Option<u32> = from_field(Field::from("")).unwrap();
/// assert_eq!(missing, None);
/// ```
///
/// # Errors
///
/// Returns an error if the field's text does not parse as the target type.
pub fn from_field<T>(field: Field) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(FieldDeserializer::new(field))
}

/// Deserializes one field, parsing its text for typed targets.
pub struct FieldDeserializer {
    field: Field,
}

impl FieldDeserializer {
    #[must_use]
    pub fn new(field: Field) -> Self {
        FieldDeserializer { field }
    }

    fn is_blank(&self) -> bool {
        match &self.field {
            Field::Empty => true,
            Field::String(s) => s.trim().is_empty(),
            Field::Number(_) => false,
        }
    }

    fn parse<T>(&self, expected: &str) -> Result<T>
    where
        T: FromStr,
    {
        let text = match &self.field {
            Field::Empty => {
                return Err(Error::custom(format!(
                    "expected {}, found empty field",
                    expected
                )))
            }
            Field::String(s) => s.trim().to_string(),
            Field::Number(n) => n.to_string(),
        };
        text.parse()
            .map_err(|_| Error::custom(format!("expected {}, found {:?}", expected, text)))
    }
}

impl<'de> IntoDeserializer<'de, Error> for Field {
    type Deserializer = FieldDeserializer;

    fn into_deserializer(self) -> FieldDeserializer {
        FieldDeserializer::new(self)
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty, $expected:literal)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.parse::<$ty>($expected)?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for FieldDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.field {
            Field::Empty => visitor.visit_unit(),
            Field::String(s) => visitor.visit_string(s),
            Field::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Field::Number(Number::Float(f)) => visitor.visit_f64(f),
        }
    }

    deserialize_parsed! {
        deserialize_i8 => visit_i8(i8, "an 8-bit integer"),
        deserialize_i16 => visit_i16(i16, "a 16-bit integer"),
        deserialize_i32 => visit_i32(i32, "a 32-bit integer"),
        deserialize_i64 => visit_i64(i64, "a 64-bit integer"),
        deserialize_u8 => visit_u8(u8, "an 8-bit unsigned integer"),
        deserialize_u16 => visit_u16(u16, "a 16-bit unsigned integer"),
        deserialize_u32 => visit_u32(u32, "a 32-bit unsigned integer"),
        deserialize_u64 => visit_u64(u64, "a 64-bit unsigned integer"),
        deserialize_f32 => visit_f32(f32, "a float"),
        deserialize_f64 => visit_f64(f64, "a float"),
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = self.field.to_string();
        match text.trim() {
            t if t.eq_ignore_ascii_case("true") => visitor.visit_bool(true),
            t if t.eq_ignore_ascii_case("false") => visitor.visit_bool(false),
            t => Err(Error::custom(format!("expected a boolean, found {:?}", t))),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(String::from(self.field))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.is_blank() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.is_blank() {
            visitor.visit_unit()
        } else {
            Err(Error::custom(format!(
                "expected an empty field, found {:?}",
                self.field.to_string()
            )))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant = String::from(self.field).trim().to_string();
        visitor.visit_enum(<String as IntoDeserializer<'de, Error>>::into_deserializer(variant))
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    forward_to_deserialize_any! {
        i128 u128 bytes byte_buf seq tuple tuple_struct map struct ignored_any
    }
}

/// Presents a [`Row`] to a visitor as a map of column names to fields.
struct RowDeserializer {
    iter: indexmap::map::IntoIter<String, Field>,
    value: Option<Field>,
}

impl RowDeserializer {
    fn new(row: Row) -> Self {
        RowDeserializer {
            iter: row.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for RowDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(FieldDeserializer::new(Field::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(FieldDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

impl<'de> de::Deserializer<'de> for RowDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(self)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}
