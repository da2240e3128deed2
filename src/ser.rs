//! Serializing typed values into rows.
//!
//! A CSV row is flat, so only structs and maps can become a [`Row`], and their
//! values must be scalars: numbers, strings, booleans, chars, unit enum
//! variants, or `Option`s of these. `None` and `()` become [`Field::Empty`];
//! booleans are written as `true`/`false`.
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use csv_transcode::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: Option<f64> }
//!
//! let text = to_string(&[Point { x: 1, y: Some(0.5) }, Point { x: 2, y: None }]).unwrap();
//! assert_eq!(text, "x,y\n1,0.5\n2,\n");
//! ```

use crate::{Error, Field, Number, Result, Row};
use serde::{ser, Serialize};

/// Converts a struct or map into a [`Row`].
///
/// # Examples
///
/// ```rust
/// use csv_transcode::{to_row, Field};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("b", 2);
/// map.insert("a", 1);
///
/// let row = to_row(&map).unwrap();
/// assert_eq!(row.keys().collect::<Vec<_>>(), vec!["a", "b"]);
/// assert_eq!(row.get("b"), Some(&Field::from(2)));
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `value` is not a struct or map, or one
/// of its values is not a scalar.
pub fn to_row<T>(value: &T) -> Result<Row>
where
    T: ?Sized + Serialize,
{
    value.serialize(RowSerializer)
}

/// Converts a scalar into a [`Field`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for sequences, maps, structs, bytes and
/// non-unit enum variants.
pub fn to_field<T>(value: &T) -> Result<Field>
where
    T: ?Sized + Serialize,
{
    value.serialize(FieldSerializer)
}

/// Serializes one scalar into a [`Field`].
pub struct FieldSerializer;

impl ser::Serializer for FieldSerializer {
    type Ok = Field;
    type Error = Error;

    type SerializeSeq = ser::Impossible<Field, Error>;
    type SerializeTuple = ser::Impossible<Field, Error>;
    type SerializeTupleStruct = ser::Impossible<Field, Error>;
    type SerializeTupleVariant = ser::Impossible<Field, Error>;
    type SerializeMap = ser::Impossible<Field, Error>;
    type SerializeStruct = ser::Impossible<Field, Error>;
    type SerializeStructVariant = ser::Impossible<Field, Error>;

    fn serialize_bool(self, v: bool) -> Result<Field> {
        Ok(Field::String(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Field> {
        Ok(Field::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Field> {
        Ok(Field::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Field> {
        Ok(Field::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Field> {
        Ok(Field::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Field> {
        Ok(Field::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<Field> {
        Ok(Field::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<Field> {
        Ok(Field::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Field> {
        match i64::try_from(v) {
            Ok(i) => Ok(Field::Number(Number::Integer(i))),
            // Keeps every digit, which a float would not.
            Err(_) => Ok(Field::String(v.to_string())),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Field> {
        Ok(Field::Number(Number::Float(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Field> {
        Ok(Field::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Field> {
        Ok(Field::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Field> {
        Ok(Field::String(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Field> {
        Err(Error::unsupported_type("byte arrays"))
    }

    fn serialize_none(self) -> Result<Field> {
        Ok(Field::Empty)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Field>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Field> {
        Ok(Field::Empty)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Field> {
        Ok(Field::Empty)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Field> {
        Ok(Field::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Field>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Field>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants in a field"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_type("sequences in a field"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_type("tuples in a field"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_type("tuple structs in a field"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants in a field"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported_type("maps in a field"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::unsupported_type("structs in a field"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("struct variants in a field"))
    }
}

/// Serializes a struct or map into a [`Row`].
pub struct RowSerializer;

pub struct SerializeRow {
    row: Row,
    current_key: Option<String>,
}

impl SerializeRow {
    fn new(len: Option<usize>) -> Self {
        SerializeRow {
            row: Row::with_capacity(len.unwrap_or(0)),
            current_key: None,
        }
    }
}

fn not_a_row(kind: &str) -> Error {
    Error::unsupported_type(&format!("{} cannot be written as a row", kind))
}

impl ser::Serializer for RowSerializer {
    type Ok = Row;
    type Error = Error;

    type SerializeSeq = ser::Impossible<Row, Error>;
    type SerializeTuple = ser::Impossible<Row, Error>;
    type SerializeTupleStruct = ser::Impossible<Row, Error>;
    type SerializeTupleVariant = ser::Impossible<Row, Error>;
    type SerializeMap = SerializeRow;
    type SerializeStruct = SerializeRow;
    type SerializeStructVariant = ser::Impossible<Row, Error>;

    fn serialize_bool(self, _v: bool) -> Result<Row> {
        Err(not_a_row("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Row> {
        Err(not_a_row("i8"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Row> {
        Err(not_a_row("i16"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Row> {
        Err(not_a_row("i32"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Row> {
        Err(not_a_row("i64"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Row> {
        Err(not_a_row("u8"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Row> {
        Err(not_a_row("u16"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Row> {
        Err(not_a_row("u32"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Row> {
        Err(not_a_row("u64"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Row> {
        Err(not_a_row("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Row> {
        Err(not_a_row("f64"))
    }

    fn serialize_char(self, _v: char) -> Result<Row> {
        Err(not_a_row("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<Row> {
        Err(not_a_row("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Row> {
        Err(not_a_row("byte array"))
    }

    fn serialize_none(self) -> Result<Row> {
        Err(not_a_row("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Row>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Row> {
        Ok(Row::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Row> {
        Ok(Row::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Row> {
        Err(not_a_row("unit variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Row>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Row>
    where
        T: ?Sized + Serialize,
    {
        Err(not_a_row("newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(not_a_row("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(not_a_row("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(not_a_row("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(not_a_row("tuple variant"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeRow> {
        Ok(SerializeRow::new(len))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeRow> {
        Ok(SerializeRow::new(Some(len)))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(not_a_row("struct variant"))
    }
}

impl ser::SerializeMap for SerializeRow {
    type Ok = Row;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(String::from(key.serialize(FieldSerializer)?));
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.row.insert(key, value.serialize(FieldSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Row> {
        Ok(self.row)
    }
}

impl ser::SerializeStruct for SerializeRow {
    type Ok = Row;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.row.insert(key, value.serialize(FieldSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Row> {
        Ok(self.row)
    }
}
