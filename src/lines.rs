//! Splitting a document into raw physical lines.
//!
//! Lines come back exactly as written, quotes and escapes included, so a quoted
//! field containing a newline stays inside one [`RawLine`]. Each line keeps the
//! physical row number it started on.

use crate::lexer::{Token, TokenPattern};
use crate::tokenizer::{settle, RowCounter, State};
use crate::{Error, MalformedKind, ParsePosition, Result};
use std::mem;

/// One physical row of source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based row number of the first character of the line.
    pub row_num: usize,
    /// The undecoded line, without its terminator.
    pub text: String,
}

/// What the splitter does once the `end` row has been produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScanMode {
    /// Keep counting rows so the final position covers the whole text.
    CountAll,
    /// Return immediately.
    StopAtEnd,
}

/// Splits `text` into raw lines within the physical `start..=end` window.
pub(crate) fn split_lines(
    pattern: &TokenPattern,
    text: &str,
    start: Option<usize>,
    end: Option<usize>,
    mode: ScanMode,
    position: &mut ParsePosition,
) -> Result<Vec<RawLine>> {
    let first_row = position.row_num;
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut state = State::ValueStart;
    let mut rest: Option<RowCounter> = None;

    for token in pattern.tokens(text) {
        if let Some(rest) = rest.as_mut() {
            rest.feed(token, position);
            continue;
        }

        match (state, token) {
            (State::ValueStart, Token::Separator) => {
                line.push(pattern.separator());
                position.next_col();
            }
            (State::ValueStart, Token::Delimiter) => {
                line.push(pattern.delimiter());
                state = State::InQuoted;
            }
            (State::ValueStart, Token::Text(text)) => {
                line.push_str(text);
                state = State::Unquoted;
            }

            (State::InQuoted, Token::Delimiter) => {
                line.push(pattern.delimiter());
                state = State::QuoteSeen;
            }
            (State::InQuoted, Token::Separator) => line.push(pattern.separator()),
            (State::InQuoted, Token::Newline(text) | Token::Text(text)) => line.push_str(text),

            (State::QuoteSeen, Token::Delimiter) => {
                line.push(pattern.delimiter());
                state = State::InQuoted;
            }
            (State::QuoteSeen | State::Unquoted, Token::Separator) => {
                line.push(pattern.separator());
                position.next_col();
                state = State::ValueStart;
            }
            (State::QuoteSeen, Token::Text(_)) => {
                return Err(Error::malformed(
                    position.row_num,
                    position.col_num,
                    MalformedKind::IllegalState,
                ));
            }

            (State::Unquoted, Token::Delimiter) => {
                return Err(Error::malformed(
                    position.row_num,
                    position.col_num,
                    MalformedKind::IllegalQuote,
                ));
            }
            (State::Unquoted, Token::Text(text)) => line.push_str(text),

            (_, Token::Newline(_)) => {
                let row_num = position.row_num;
                let text = mem::take(&mut line);
                if start.map_or(true, |start| row_num >= start) {
                    lines.push(RawLine { row_num, text });
                }
                state = State::ValueStart;
                position.next_row();

                if end.map_or(false, |end| row_num >= end) {
                    match mode {
                        ScanMode::CountAll => rest = Some(RowCounter::default()),
                        ScanMode::StopAtEnd => return Ok(lines),
                    }
                }
            }
        }
    }

    match rest {
        Some(rest) => rest.finish(position),
        None => {
            if state == State::InQuoted {
                return Err(Error::malformed(
                    position.row_num,
                    position.col_num,
                    MalformedKind::IllegalQuote,
                ));
            }
            if !line.is_empty() {
                let row_num = position.row_num;
                if start.map_or(true, |start| row_num >= start) {
                    lines.push(RawLine { row_num, text: line });
                }
                position.next_row();
            }
        }
    }

    settle(position, first_row);
    Ok(lines)
}
