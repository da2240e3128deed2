//! Configuration for parsing and writing CSV.
//!
//! This module provides [`Config`], the immutable per-call settings of a
//! conversion: the dialect (separator and delimiter characters), header
//! handling, the `start`/`end` row window, column ordering for object output,
//! and the hook extension points.
//!
//! ## Examples
//!
//! ```rust
//! use csv_transcode::{parse_document, Config, Field};
//!
//! // Semicolon-separated, single-quote delimited, no header row
//! let config = Config::new()
//!     .with_separator(';')
//!     .with_delimiter('\'')
//!     .with_headers(false);
//!
//! let records = parse_document("a;'b;c'\n1;2", &config).unwrap();
//! assert_eq!(records[0][1], Field::from("b;c"));
//! ```

use crate::hooks::HookOutcome;
use crate::{Converter, Error, Field, ParsePosition, Record, Result, Row};
use std::fmt;
use std::sync::Arc;

/// Rewrites the raw text once before tokenizing.
pub type PreParseHook = Arc<dyn Fn(String, &ParsePosition) -> String + Send + Sync>;
/// Transforms or drops a single decoded value.
pub type ValueHook = Arc<dyn Fn(Field, &ParsePosition) -> HookOutcome<Field> + Send + Sync>;
/// Transforms or drops a complete record.
pub type EntryHook = Arc<dyn Fn(Record, &ParsePosition) -> HookOutcome<Record> + Send + Sync>;
/// Rewrites the decoded records once after tokenizing.
pub type PostParseHook = Arc<dyn Fn(Vec<Record>, &ParsePosition) -> Vec<Record> + Send + Sync>;
/// Rewrites the decoded rows once after the object conversion.
pub type PostParseRowsHook = Arc<dyn Fn(Vec<Row>, &ParsePosition) -> Vec<Row> + Send + Sync>;
/// Maps one row to another, on both the read and the write path.
pub type TransformHook = Arc<dyn Fn(Row) -> Row + Send + Sync>;

/// Column ordering for object output.
///
/// - **Declare**: columns appear in the order they are first seen across the rows
/// - **Alpha**: columns are sorted alphabetically
///
/// Names listed in [`Config::manual_order`] always come first, whatever the sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Declare,
    Alpha,
}

/// Immutable settings for one conversion.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::{Config, SortOrder};
///
/// let config = Config::new();
/// assert_eq!(config.separator, ',');
/// assert_eq!(config.delimiter, '"');
/// assert!(config.headers);
///
/// let config = Config::new()
///     .with_window(2, 3)
///     .with_sort_order(SortOrder::Alpha)
///     .with_manual_order(["id"]);
/// assert_eq!(config.start, Some(2));
/// assert_eq!(config.manual_order, vec!["id".to_string()]);
/// ```
#[derive(Clone)]
pub struct Config {
    pub separator: char,
    pub delimiter: char,
    pub headers: bool,
    /// First row to emit, 1-based and inclusive.
    pub start: Option<usize>,
    /// Last row to emit, 1-based and inclusive.
    pub end: Option<usize>,
    pub sort_order: SortOrder,
    pub manual_order: Vec<String>,
    pub on_pre_parse: Option<PreParseHook>,
    pub on_parse_value: Option<ValueHook>,
    pub on_parse_entry: Option<EntryHook>,
    pub on_post_parse: Option<PostParseHook>,
    pub on_post_parse_rows: Option<PostParseRowsHook>,
    pub transform: Option<TransformHook>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            separator: ',',
            delimiter: '"',
            headers: true,
            start: None,
            end: None,
            sort_order: SortOrder::default(),
            manual_order: Vec::new(),
            on_pre_parse: None,
            on_parse_value: None,
            on_parse_entry: None,
            on_post_parse: None,
            on_post_parse_rows: None,
            transform: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("separator", &self.separator)
            .field("delimiter", &self.delimiter)
            .field("headers", &self.headers)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("sort_order", &self.sort_order)
            .field("manual_order", &self.manual_order)
            .field("on_pre_parse", &self.on_pre_parse.is_some())
            .field("on_parse_value", &self.on_parse_value.is_some())
            .field("on_parse_entry", &self.on_parse_entry.is_some())
            .field("on_post_parse", &self.on_post_parse.is_some())
            .field("on_post_parse_rows", &self.on_post_parse_rows.is_some())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl Config {
    /// Creates default settings (comma separator, double-quote delimiter, header row).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first physical row is a header row.
    ///
    /// A header row is never passed through the value hook, and it is what keys
    /// the rows produced by [`parse_objects`](crate::parse_objects).
    #[must_use]
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets both bounds of the row window at once.
    ///
    /// When [`headers`](Config::headers) is set, the bounds count data rows,
    /// i.e. row 1 is the first row after the header.
    #[must_use]
    pub fn with_window(self, start: usize, end: usize) -> Self {
        self.with_start(start).with_end(end)
    }

    #[must_use]
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Sets the columns that lead every object output, in this order.
    #[must_use]
    pub fn with_manual_order<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manual_order = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the manual column order from a header line in this config's dialect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csv_transcode::Config;
    ///
    /// let config = Config::new()
    ///     .with_separator(';')
    ///     .with_manual_order_line("age;\"last;name\"")
    ///     .unwrap();
    /// assert_eq!(config.manual_order, vec!["age", "last;name"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the line is malformed or the dialect is invalid.
    pub fn with_manual_order_line(mut self, line: &str) -> Result<Self> {
        let dialect = Config::new()
            .with_separator(self.separator)
            .with_delimiter(self.delimiter);
        let names = Converter::new(dialect)?.parse_line(line, &mut ParsePosition::new())?;
        self.manual_order = names.into_iter().map(String::from).collect();
        Ok(self)
    }

    #[must_use]
    pub fn with_on_pre_parse<F>(mut self, hook: F) -> Self
    where
        F: Fn(String, &ParsePosition) -> String + Send + Sync + 'static,
    {
        self.on_pre_parse = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_on_parse_value<F>(mut self, hook: F) -> Self
    where
        F: Fn(Field, &ParsePosition) -> HookOutcome<Field> + Send + Sync + 'static,
    {
        self.on_parse_value = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_on_parse_entry<F>(mut self, hook: F) -> Self
    where
        F: Fn(Record, &ParsePosition) -> HookOutcome<Record> + Send + Sync + 'static,
    {
        self.on_parse_entry = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_on_post_parse<F>(mut self, hook: F) -> Self
    where
        F: Fn(Vec<Record>, &ParsePosition) -> Vec<Record> + Send + Sync + 'static,
    {
        self.on_post_parse = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_on_post_parse_rows<F>(mut self, hook: F) -> Self
    where
        F: Fn(Vec<Row>, &ParsePosition) -> Vec<Row> + Send + Sync + 'static,
    {
        self.on_post_parse_rows = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_transform<F>(mut self, hook: F) -> Self
    where
        F: Fn(Row) -> Row + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(hook));
        self
    }

    /// Checks that the dialect can be tokenized unambiguously.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the separator equals the delimiter,
    /// either of them is a line terminator, or a window bound is zero.
    pub fn validate(&self) -> Result<()> {
        if self.separator == self.delimiter {
            return Err(Error::configuration(
                "separator and delimiter must be different characters",
            ));
        }
        if is_line_break(self.separator) || is_line_break(self.delimiter) {
            return Err(Error::configuration(
                "separator and delimiter cannot be line terminators",
            ));
        }
        if self.start == Some(0) || self.end == Some(0) {
            return Err(Error::configuration("row window bounds are 1-based"));
        }
        Ok(())
    }

    /// Returns the window shifted past the header row when `headers` is set.
    pub(crate) fn physical_window(&self) -> (Option<usize>, Option<usize>) {
        let offset = usize::from(self.headers);
        (
            self.start.map(|start| start + offset),
            self.end.map(|end| end + offset),
        )
    }
}

fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_ambiguous_dialect() {
        assert!(Config::new().validate().is_ok());
        assert!(Config::new().with_separator('"').validate().is_err());
        assert!(Config::new().with_delimiter('\n').validate().is_err());
        assert!(Config::new().with_separator('\r').validate().is_err());
        assert!(Config::new().with_start(0).validate().is_err());
    }

    #[test]
    fn test_physical_window_skips_header() {
        let config = Config::new().with_window(2, 3);
        assert_eq!(config.physical_window(), (Some(3), Some(4)));

        let config = config.with_headers(false);
        assert_eq!(config.physical_window(), (Some(2), Some(3)));

        assert_eq!(Config::new().physical_window(), (None, None));
    }

    #[test]
    fn test_debug_hides_closures() {
        let config = Config::new().with_transform(|row| row);
        let debug = format!("{:?}", config);
        assert!(debug.contains("transform: true"));
        assert!(debug.contains("on_pre_parse: false"));
    }
}
