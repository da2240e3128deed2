//! Error types for CSV parsing and writing.
//!
//! This module provides error reporting with positional information so that
//! malformed input can be located and fixed.
//!
//! ## Error Categories
//!
//! - **Malformed Input**: The tokenizer hit a state it cannot leave, reported with the
//!   1-based row and column of the offending field
//! - **Configuration Errors**: The [`Config`](crate::Config) describes a dialect that
//!   cannot be tokenized unambiguously
//! - **Unsupported Types**: A typed value could not be mapped onto a flat row
//! - **I/O Errors**: Writing the produced text failed
//!
//! ## Examples
//!
//! ```rust
//! use csv_transcode::{parse_field, Config, Error, MalformedKind};
//!
//! let result = parse_field("\"unterminated,", &Config::default());
//!
//! match result {
//!     Err(Error::MalformedInput { row, col, kind }) => {
//!         assert_eq!((row, col), (1, 1));
//!         assert_eq!(kind, MalformedKind::IllegalQuote);
//!     }
//!     other => panic!("expected malformed input, got {:?}", other),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// The tokenizer violation behind an [`Error::MalformedInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// Literal text directly after a closed quoted segment (`"ab"c`).
    IllegalState,
    /// A delimiter inside unquoted text, or a quoted field that never closes.
    IllegalQuote,
    /// Input that does not fit the requested shape, e.g. two fields where one was expected.
    IllegalData,
}

impl MalformedKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MalformedKind::IllegalState => "Illegal State",
            MalformedKind::IllegalQuote => "Illegal Quote",
            MalformedKind::IllegalData => "Illegal Data",
        }
    }
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents all possible errors raised while converting between CSV text and rows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input violates the tokenizer's state table
    #[error("CSVDataError: {kind} [Row:{row}][Col:{col}]")]
    MalformedInput {
        row: usize,
        col: usize,
        kind: MalformedKind,
    },

    /// The configuration cannot be used for the requested operation
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A value could not be represented as a CSV field or row
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed input error at the given 1-based position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csv_transcode::{Error, MalformedKind};
    ///
    /// let err = Error::malformed(3, 2, MalformedKind::IllegalQuote);
    /// assert_eq!(err.to_string(), "CSVDataError: Illegal Quote [Row:3][Col:2]");
    /// ```
    pub fn malformed(row: usize, col: usize, kind: MalformedKind) -> Self {
        Error::MalformedInput { row, col, kind }
    }

    /// Creates a configuration error.
    pub fn configuration(msg: &str) -> Self {
        Error::Configuration(msg.to_string())
    }

    /// Creates an unsupported type error for values that do not fit a flat row.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the violation kind if this is a tokenizer error.
    #[must_use]
    pub fn malformed_kind(&self) -> Option<MalformedKind> {
        match self {
            Error::MalformedInput { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
