//! # csv_transcode
//!
//! A CSV transcoding engine: decode delimited text into records or header-keyed
//! rows, and encode them back, with a configurable dialect and hooks at every
//! stage.
//!
//! ## How It Works
//!
//! Text is classified into tokens (separator, delimiter, newline, or a run of
//! plain text) by a pattern compiled once per dialect, and a four-state machine
//! turns the tokens into fields and rows. Malformed input is reported with the
//! 1-based row and column where the machine got stuck.
//!
//! Decoded values are always strings. Typing is opt-in, either through a value
//! hook such as [`hooks::cast_to_scalar`] or through serde with [`from_str`].
//!
//! ## Key Features
//!
//! - **Any dialect**: separator and delimiter can be any two distinct characters
//! - **Two shapes**: positional [`Record`]s, or [`Row`]s keyed by the header line
//! - **Row windows**: `start`/`end` bounds select a slice of the document
//! - **Hooks**: rewrite or drop values and rows while they are decoded
//! - **Serde support**: read and write `#[derive]`d structs directly
//!
//! ## Quick Start
//!
//! ```rust
//! use csv_transcode::{parse_document, parse_objects, write_arrays, Config, Field};
//!
//! let config = Config::new().with_headers(false);
//! let records = parse_document("a,\"b,c\",d\n1,2,3\n", &config).unwrap();
//! assert_eq!(records[0][1], Field::from("b,c"));
//! assert_eq!(write_arrays(&records, &config).unwrap(), "a,\"b,c\",d\n1,2,3\n");
//!
//! let rows = parse_objects("name,age\nJoe,10\n", &Config::new()).unwrap();
//! assert_eq!(rows[0].get("age"), Some(&Field::from("10")));
//! ```
//!
//! ### Typed Rows
//!
//! ```rust
//! use csv_transcode::{from_str, to_string};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Item { sku: String, qty: u32 }
//!
//! let items: Vec<Item> = from_str("sku,qty\nA-1,3\n").unwrap();
//! assert_eq!(items, vec![Item { sku: "A-1".into(), qty: 3 }]);
//! assert_eq!(to_string(&items).unwrap(), "sku,qty\nA-1,3\n");
//! ```
//!
//! ### Reusing a Dialect
//!
//! The free functions validate the [`Config`] on every call. A [`Converter`] does
//! it once and can be shared across threads:
//!
//! ```rust
//! use csv_transcode::{Config, Converter};
//!
//! let tsv = Converter::new(Config::new().with_separator('\t').with_headers(false)).unwrap();
//! assert_eq!(tsv.parse_document("a\tb\n").unwrap()[0].len(), 2);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `debug` per conversion, `trace` for rows
//! dropped by hooks, and `warn` for rows wider than their header. Install any
//! subscriber to see them.

pub mod converter;
pub mod de;
pub mod error;
pub mod hooks;
pub mod lexer;
pub mod lines;
pub mod macros;
pub mod map;
pub mod options;
pub mod position;
pub mod ser;
pub mod value;

mod parser;
mod tabular;
mod tokenizer;
mod writer;

pub use converter::Converter;
pub use de::{from_field, from_row, FieldDeserializer};
pub use error::{Error, MalformedKind, Result};
pub use hooks::HookOutcome;
pub use lines::RawLine;
pub use map::Row;
pub use options::{Config, SortOrder};
pub use position::ParsePosition;
pub use ser::{to_field, to_row, FieldSerializer, RowSerializer};
pub use tokenizer::State;
pub use value::{Field, Number, Record};
pub use writer::collect_column_names;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Decodes text holding exactly one value.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::{parse_field, Config, Field};
///
/// let field = parse_field("\"say \"\"hi\"\"\"", &Config::new()).unwrap();
/// assert_eq!(field, Field::from("say \"hi\""));
/// assert!(parse_field("a,b", &Config::new()).is_err());
/// ```
///
/// # Errors
///
/// Returns an error if the config is invalid, the text holds more than one
/// value, or the text is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_field(text: &str, config: &Config) -> Result<Field> {
    Converter::new(config.clone())?.parse_field(text)
}

/// Decodes one line into a record, advancing `position` once per value.
///
/// # Errors
///
/// Returns an error if the config is invalid or the line is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_line(text: &str, config: &Config, position: &mut ParsePosition) -> Result<Record> {
    Converter::new(config.clone())?.parse_line(text, position)
}

/// Decodes a whole document into records.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::{parse_document, Config, Field};
///
/// let records = parse_document("a,b\n\"x\ny\",z\n", &Config::new()).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1][0], Field::from("x\ny"));
/// ```
///
/// # Errors
///
/// Returns an error if the config is invalid or the document is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_document(text: &str, config: &Config) -> Result<Vec<Record>> {
    Converter::new(config.clone())?.parse_document(text)
}

/// Decodes a document with a header row into header-keyed rows.
///
/// # Errors
///
/// Returns an error if the config is invalid or has no header row, or the
/// document is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_objects(text: &str, config: &Config) -> Result<Vec<Row>> {
    Converter::new(config.clone())?.parse_objects(text)
}

/// Splits a document into undecoded physical lines.
///
/// # Errors
///
/// Returns an error if the config is invalid or the quoting is broken.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn split_lines(text: &str, config: &Config) -> Result<Vec<RawLine>> {
    Converter::new(config.clone())?.split_lines(text)
}

/// Encodes records as CSV text, every line ending in `\n`.
///
/// # Errors
///
/// Returns an error if the config is invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_arrays(records: &[Record], config: &Config) -> Result<String> {
    Ok(Converter::new(config.clone())?.write_arrays(records))
}

/// Encodes rows as CSV text under a header line.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::{row, write_objects, Config};
///
/// let rows = vec![row! { "name" => "Joe", "age" => 10 }];
/// let config = Config::new().with_manual_order(["age"]);
/// assert_eq!(write_objects(&rows, &config).unwrap(), "age,name\n10,Joe\n");
/// ```
///
/// # Errors
///
/// Returns an error if the config is invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_objects(rows: &[Row], config: &Config) -> Result<String> {
    Ok(Converter::new(config.clone())?.write_objects(rows))
}

/// Serializes a slice of structs or maps as CSV text with a header line.
///
/// # Errors
///
/// Returns an error if an item is not a flat struct or map.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(items: &[T]) -> Result<String>
where
    T: Serialize,
{
    to_string_with_config(items, &Config::default())
}

/// Serializes a slice of structs or maps as CSV text in the given dialect.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::{to_string_with_config, Config};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let config = Config::new().with_separator(';');
/// let text = to_string_with_config(&[Point { x: 1, y: 2 }], &config).unwrap();
/// assert_eq!(text, "x;y\n1;2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the config is invalid or an item is not a flat struct or map.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_config<T>(items: &[T], config: &Config) -> Result<String>
where
    T: Serialize,
{
    let converter = Converter::new(config.clone())?;
    let rows = items.iter().map(to_row).collect::<Result<Vec<_>>>()?;
    Ok(converter.write_objects(&rows))
}

/// Serializes a slice of structs or maps as CSV text into a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, items: &[T]) -> Result<()>
where
    W: io::Write,
    T: Serialize,
{
    let text = to_string(items)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserializes every data row of a CSV document with a header line.
///
/// # Errors
///
/// Returns an error if the document is malformed or a row does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    from_str_with_config(text, &Config::default())
}

/// Deserializes every data row of a CSV document in the given dialect.
///
/// Value hooks run before typing, so a hook can clean up cells that would not
/// parse otherwise.
///
/// # Errors
///
/// Returns an error if the config is invalid or has no header row, the document
/// is malformed, or a row does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_config<T>(text: &str, config: &Config) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    Converter::new(config.clone())?
        .parse_objects(text)?
        .into_iter()
        .map(from_row)
        .collect()
}

/// Deserializes every data row of a CSV document read from an I/O stream.
///
/// # Errors
///
/// Returns an error if reading fails, the document is malformed, or a row does
/// not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<Vec<T>>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&text)
}
