//! Row/column cursor shared by the calls of one conversion.

/// The 1-based position of the field currently being decoded.
///
/// Every conversion owns its own `ParsePosition`. The only sanctioned sharing is
/// sequential: a caller may thread one position through a header parse followed
/// by a body parse. Hooks receive a shared reference so they can see where they
/// are being invoked from.
///
/// After a whole-document conversion `row_num` holds the number of physical rows
/// that were seen, including rows dropped by hooks or by the `start`/`end` window.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::{Config, Converter, ParsePosition};
///
/// let converter = Converter::new(Config::new().with_headers(false)).unwrap();
/// let mut position = ParsePosition::new();
/// converter.parse_document_at("a,b\n1,2\n3,4", &mut position).unwrap();
/// assert_eq!(position.row_num, 3);
/// ```
///
/// Threading a header parse into a body parse:
///
/// ```rust
/// use csv_transcode::{Config, Converter, ParsePosition};
///
/// let converter = Converter::new(Config::new()).unwrap();
/// let mut position = ParsePosition::new();
/// let header = converter.parse_line("name,age", &mut position).unwrap();
/// position.next_row();
///
/// let body = converter.parse_document_at("Joe,10\nAnn,12", &mut position).unwrap();
/// assert_eq!((header.len(), body.len()), (2, 2));
/// assert_eq!(position.row_num, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePosition {
    pub row_num: usize,
    pub col_num: usize,
}

impl ParsePosition {
    #[must_use]
    pub const fn new() -> Self {
        ParsePosition {
            row_num: 1,
            col_num: 1,
        }
    }

    /// Creates a position at the first column of the given row.
    #[must_use]
    pub const fn at_row(row_num: usize) -> Self {
        ParsePosition { row_num, col_num: 1 }
    }

    #[inline]
    pub(crate) fn next_col(&mut self) {
        self.col_num += 1;
    }

    /// Moves to the first column of the following row.
    ///
    /// Use this after decoding a header with [`Converter::parse_line`] to thread
    /// the same position into the body.
    ///
    /// [`Converter::parse_line`]: crate::Converter::parse_line
    #[inline]
    pub fn next_row(&mut self) {
        self.row_num += 1;
        self.col_num = 1;
    }
}

impl Default for ParsePosition {
    fn default() -> Self {
        Self::new()
    }
}
