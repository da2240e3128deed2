//! The reusable conversion entry point.
//!
//! A [`Converter`] validates a [`Config`] once and compiles its token pattern once,
//! so repeated conversions in the same dialect do not pay for either again. It is
//! `Send + Sync` and can be shared between threads; each call owns its own
//! [`ParsePosition`].
//!
//! Every operation comes in three forms:
//!
//! - a direct form returning `Result`, e.g. [`Converter::parse_document`]
//! - an `_at` form threading a caller-owned position, e.g. [`Converter::parse_document_at`]
//! - a `_then` form handing the result to a continuation, e.g. [`Converter::parse_document_then`]
//!
//! A failed call leaves a caller-owned position untouched.

use crate::lexer::TokenPattern;
use crate::lines::{self, RawLine, ScanMode};
use crate::{parser, tabular, tokenizer, writer};
use crate::{Config, Error, Field, ParsePosition, Record, Result, Row};
use std::borrow::Cow;

/// A validated configuration paired with its compiled token pattern.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::{Config, Converter, Field};
///
/// let converter = Converter::new(Config::new()).unwrap();
///
/// let rows = converter.parse_objects("name,age\nJoe,10\n").unwrap();
/// assert_eq!(rows[0].get("name"), Some(&Field::from("Joe")));
///
/// let text = converter.write_objects(&rows);
/// assert_eq!(text, "name,age\nJoe,10\n");
/// ```
#[derive(Clone, Debug)]
pub struct Converter {
    config: Config,
    pattern: TokenPattern,
}

impl Converter {
    /// Validates `config` and compiles its token pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the dialect is ambiguous or a window
    /// bound is zero.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let pattern = TokenPattern::new(config.separator, config.delimiter)?;
        Ok(Converter { config, pattern })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn pre_parse<'t>(&self, text: &'t str, position: &ParsePosition) -> Cow<'t, str> {
        match &self.config.on_pre_parse {
            Some(hook) => Cow::Owned(hook(text.to_string(), position)),
            None => Cow::Borrowed(text),
        }
    }

    /// Decodes text holding exactly one value.
    ///
    /// The value hook applies; a value it skips comes back as [`Field::Empty`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] with [`MalformedKind::IllegalData`](crate::MalformedKind::IllegalData)
    /// if the text holds more than one value, or any tokenizer violation.
    pub fn parse_field(&self, text: &str) -> Result<Field> {
        parser::parse_field(
            &self.pattern,
            text,
            self.config.on_parse_value.as_ref(),
            &mut ParsePosition::new(),
        )
    }

    /// Decodes one line, advancing `position.col_num` once per value.
    ///
    /// Unquoted newlines are ignored and the last value is always emitted.
    /// Only the value hook applies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] on a tokenizer violation.
    pub fn parse_line(&self, text: &str, position: &mut ParsePosition) -> Result<Record> {
        let mut cursor = *position;
        let record = parser::parse_line(
            &self.pattern,
            text,
            self.config.on_parse_value.as_ref(),
            &mut cursor,
        )?;
        *position = cursor;
        Ok(record)
    }

    /// Decodes a whole document into records.
    ///
    /// When the config has `headers` set, the header row is part of the output
    /// unless a `start` bound skips it, and it is never passed to the value hook.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] on a tokenizer violation within the window.
    pub fn parse_document(&self, text: &str) -> Result<Vec<Record>> {
        self.parse_document_at(text, &mut ParsePosition::new())
    }

    /// Like [`Converter::parse_document`], starting from `position`.
    ///
    /// On success `position.row_num` holds the number of physical rows seen.
    /// Decoding starts at the first column of `position.row_num`. A header row is
    /// only recognized when that row is 1.
    pub fn parse_document_at(
        &self,
        text: &str,
        position: &mut ParsePosition,
    ) -> Result<Vec<Record>> {
        let mut cursor = ParsePosition::at_row(position.row_num);
        let text = self.pre_parse(text, &cursor);
        let (start, end) = self.config.physical_window();

        let records =
            tokenizer::parse_records(&self.pattern, &self.config, &text, start, end, &mut cursor)?;
        tracing::debug!(
            records = records.len(),
            rows_seen = cursor.row_num,
            "parsed document"
        );

        let records = match &self.config.on_post_parse {
            Some(hook) => hook(records, &cursor),
            None => records,
        };
        *position = cursor;
        Ok(records)
    }

    /// Decodes a document with a header row into header-keyed rows.
    ///
    /// The `start`/`end` window counts data rows. The entry hook receives each
    /// decoded record before it is keyed; the transform hook receives each row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `headers` is not set, or
    /// [`Error::MalformedInput`] on a tokenizer violation.
    pub fn parse_objects(&self, text: &str) -> Result<Vec<Row>> {
        self.parse_objects_at(text, &mut ParsePosition::new())
    }

    /// Like [`Converter::parse_objects`], starting from `position`.
    pub fn parse_objects_at(&self, text: &str, position: &mut ParsePosition) -> Result<Vec<Row>> {
        if !self.config.headers {
            return Err(Error::configuration(
                "decoding into rows requires a header row",
            ));
        }

        let mut cursor = ParsePosition::at_row(position.row_num);
        let text = self.pre_parse(text, &cursor);
        let rows = tabular::parse_rows(&self.pattern, &self.config, &text, &mut cursor)?;
        tracing::debug!(rows = rows.len(), rows_seen = cursor.row_num, "parsed objects");

        let rows = match &self.config.on_post_parse_rows {
            Some(hook) => hook(rows, &cursor),
            None => rows,
        };
        *position = cursor;
        Ok(rows)
    }

    /// Splits a document into undecoded physical lines within the window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the quoting is broken.
    pub fn split_lines(&self, text: &str) -> Result<Vec<RawLine>> {
        let (start, end) = self.config.physical_window();
        lines::split_lines(
            &self.pattern,
            text,
            start,
            end,
            ScanMode::StopAtEnd,
            &mut ParsePosition::new(),
        )
    }

    /// Encodes records as lines of text, every line ending in `\n`.
    #[must_use]
    pub fn write_arrays(&self, records: &[Record]) -> String {
        writer::write_arrays(records, &self.config)
    }

    /// Encodes rows under a header line collected from their column names.
    ///
    /// Missing cells are written empty. The transform hook applies to each row first.
    #[must_use]
    pub fn write_objects(&self, rows: &[Row]) -> String {
        writer::write_objects(rows, &self.config)
    }

    /// Passes the result of [`Converter::parse_field`] to `k`.
    pub fn parse_field_then<R>(&self, text: &str, k: impl FnOnce(Result<Field>) -> R) -> R {
        k(self.parse_field(text))
    }

    /// Passes the result of [`Converter::parse_line`] to `k`.
    pub fn parse_line_then<R>(&self, text: &str, k: impl FnOnce(Result<Record>) -> R) -> R {
        k(self.parse_line(text, &mut ParsePosition::new()))
    }

    /// Passes the result of [`Converter::parse_document`] to `k`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csv_transcode::{Config, Converter};
    ///
    /// let converter = Converter::new(Config::new().with_headers(false)).unwrap();
    /// let count = converter.parse_document_then("a\nb\n", |result| result.map(|r| r.len()));
    /// assert_eq!(count.unwrap(), 2);
    /// ```
    pub fn parse_document_then<R>(
        &self,
        text: &str,
        k: impl FnOnce(Result<Vec<Record>>) -> R,
    ) -> R {
        k(self.parse_document(text))
    }

    /// Passes the result of [`Converter::parse_objects`] to `k`.
    pub fn parse_objects_then<R>(&self, text: &str, k: impl FnOnce(Result<Vec<Row>>) -> R) -> R {
        k(self.parse_objects(text))
    }

    /// Passes the output of [`Converter::write_arrays`] to `k`.
    pub fn write_arrays_then<R>(
        &self,
        records: &[Record],
        k: impl FnOnce(Result<String>) -> R,
    ) -> R {
        k(Ok(self.write_arrays(records)))
    }

    /// Passes the output of [`Converter::write_objects`] to `k`.
    pub fn write_objects_then<R>(&self, rows: &[Row], k: impl FnOnce(Result<String>) -> R) -> R {
        k(Ok(self.write_objects(rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookOutcome;
    use crate::MalformedKind;

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = Converter::new(Config::new().with_delimiter(',')).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_failed_parse_leaves_position() {
        let converter = Converter::new(Config::new().with_headers(false)).unwrap();
        let mut position = ParsePosition::at_row(7);
        let result = converter.parse_document_at("a\n\"b", &mut position);
        assert_eq!(
            result.unwrap_err(),
            Error::malformed(8, 1, MalformedKind::IllegalQuote)
        );
        assert_eq!(position, ParsePosition::at_row(7));
    }

    #[test]
    fn test_threaded_parse_starts_at_first_column() {
        let config = Config::new().with_on_parse_value(|value, position| {
            HookOutcome::Keep(Field::from(format!("{}@{}", value, position.col_num)))
        });
        let converter = Converter::new(config).unwrap();
        let mut position = ParsePosition {
            row_num: 2,
            col_num: 5,
        };
        let records = converter.parse_document_at("x,y", &mut position).unwrap();
        assert_eq!(records, vec![vec![Field::from("x@1"), Field::from("y@2")]]);
        assert_eq!(position, ParsePosition::at_row(2));
    }

    #[test]
    fn test_objects_require_headers() {
        let converter = Converter::new(Config::new().with_headers(false)).unwrap();
        assert!(matches!(
            converter.parse_objects("a\n1"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_pre_and_post_parse_hooks() {
        let config = Config::new()
            .with_headers(false)
            .with_on_pre_parse(|text, _| text.replace(';', ","))
            .with_on_post_parse(|mut records, position| {
                records.push(vec![Field::from(position.row_num as i64)]);
                records
            });
        let converter = Converter::new(config).unwrap();
        let records = converter.parse_document("a;b\nc;d").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], vec![Field::from("a"), Field::from("b")]);
        assert_eq!(records[2], vec![Field::from(2)]);
    }

    #[test]
    fn test_post_parse_rows_hook() {
        let config = Config::new().with_on_post_parse_rows(|mut rows, _| {
            rows.reverse();
            rows
        });
        let converter = Converter::new(config).unwrap();
        let rows = converter.parse_objects("n\n1\n2").unwrap();
        assert_eq!(rows[0].get("n"), Some(&Field::from("2")));
    }

    #[test]
    fn test_split_lines_uses_window() {
        let converter = Converter::new(Config::new().with_start(2)).unwrap();
        let lines = converter.split_lines("h\n1\n\"2\n2\"\n").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "\"2\n2\"");
        assert_eq!(lines[0].row_num, 3);
    }

    #[test]
    fn test_continuations() {
        let converter = Converter::new(Config::new()).unwrap();
        let kind = converter.parse_field_then("a,b", |r| r.unwrap_err().malformed_kind());
        assert_eq!(kind, Some(MalformedKind::IllegalData));

        let text = converter.write_arrays_then(&[vec![Field::from("x")]], |r| r.unwrap());
        assert_eq!(text, "x\n");
    }
}
