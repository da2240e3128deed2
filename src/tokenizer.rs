//! The whole-document state machine.
//!
//! Tokens from the [lexer](crate::lexer) drive a four-state machine, one field at a
//! time:
//!
//! | State        | separator        | delimiter           | newline                 | text                  |
//! |--------------|------------------|---------------------|-------------------------|-----------------------|
//! | `ValueStart` | emit empty value | → `InQuoted`        | emit empty value + row  | append, → `Unquoted`  |
//! | `InQuoted`   | append           | → `QuoteSeen`       | append                  | append                |
//! | `QuoteSeen`  | emit value       | append delimiter, → `InQuoted` | emit value + row | Illegal State   |
//! | `Unquoted`   | emit value       | Illegal Quote       | emit value + row        | append                |
//!
//! Emitting a value or a row returns the machine to `ValueStart`.

use crate::hooks::HookOutcome;
use crate::lexer::{Token, TokenPattern};
use crate::{Config, Error, Field, MalformedKind, ParsePosition, Record, Result};
use std::mem;

/// Where the machine is within the current field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    ValueStart,
    InQuoted,
    QuoteSeen,
    Unquoted,
}

/// Decodes a whole document into records, honoring the window and hooks of `config`.
///
/// `start`/`end` are physical row numbers. On return `position.row_num` is the number
/// of physical rows in `text`.
pub(crate) fn parse_records(
    pattern: &TokenPattern,
    config: &Config,
    text: &str,
    start: Option<usize>,
    end: Option<usize>,
    position: &mut ParsePosition,
) -> Result<Vec<Record>> {
    let first_row = position.row_num;
    let mut machine = DocumentMachine {
        config,
        first_row,
        start,
        end,
        position,
        records: Vec::new(),
        entry: Vec::new(),
        value: String::new(),
        state: State::ValueStart,
        rest: None,
    };

    for token in pattern.tokens(text) {
        if let Some(rest) = machine.rest.as_mut() {
            rest.feed(token, machine.position);
            continue;
        }
        machine.step(token, pattern)?;
    }

    machine.finish()
}

struct DocumentMachine<'c, 'p> {
    config: &'c Config,
    first_row: usize,
    start: Option<usize>,
    end: Option<usize>,
    position: &'p mut ParsePosition,
    records: Vec<Record>,
    entry: Record,
    value: String,
    state: State,
    /// Set once the `end` row has been emitted.
    rest: Option<RowCounter>,
}

impl<'c, 'p> DocumentMachine<'c, 'p> {
    fn step(&mut self, token: Token<'_>, pattern: &TokenPattern) -> Result<()> {
        match (self.state, token) {
            (State::ValueStart, Token::Separator) => self.end_of_value(),
            (State::ValueStart, Token::Delimiter) => self.state = State::InQuoted,
            (State::ValueStart, Token::Newline(_)) => {
                self.end_of_value();
                self.end_of_entry();
            }
            (State::ValueStart, Token::Text(text)) => {
                self.value.push_str(text);
                self.state = State::Unquoted;
            }

            (State::InQuoted, Token::Delimiter) => self.state = State::QuoteSeen,
            (State::InQuoted, Token::Separator) => self.value.push(pattern.separator()),
            (State::InQuoted, Token::Newline(text) | Token::Text(text)) => {
                self.value.push_str(text)
            }

            (State::QuoteSeen, Token::Delimiter) => {
                self.value.push(pattern.delimiter());
                self.state = State::InQuoted;
            }
            (State::QuoteSeen, Token::Separator) => self.end_of_value(),
            (State::QuoteSeen, Token::Newline(_)) => {
                self.end_of_value();
                self.end_of_entry();
            }
            (State::QuoteSeen, Token::Text(_)) => {
                return Err(self.malformed(MalformedKind::IllegalState));
            }

            (State::Unquoted, Token::Separator) => self.end_of_value(),
            (State::Unquoted, Token::Newline(_)) => {
                self.end_of_value();
                self.end_of_entry();
            }
            (State::Unquoted, Token::Delimiter) => {
                return Err(self.malformed(MalformedKind::IllegalQuote));
            }
            (State::Unquoted, Token::Text(text)) => self.value.push_str(text),
        }
        Ok(())
    }

    fn in_window(&self) -> bool {
        self.start.map_or(true, |start| self.position.row_num >= start)
    }

    fn end_of_value(&mut self) {
        let value = Field::String(mem::take(&mut self.value));
        self.state = State::ValueStart;

        if self.in_window() {
            let header_row = self.config.headers && self.position.row_num == 1;
            match &self.config.on_parse_value {
                Some(hook) if !header_row => {
                    if let HookOutcome::Keep(value) = hook(value, self.position) {
                        self.entry.push(value);
                    }
                }
                _ => self.entry.push(value),
            }
        }

        self.position.next_col();
    }

    fn end_of_entry(&mut self) {
        let entry = mem::take(&mut self.entry);
        let row_num = self.position.row_num;
        self.state = State::ValueStart;

        if self.in_window() {
            match &self.config.on_parse_entry {
                Some(hook) => match hook(entry, self.position) {
                    HookOutcome::Keep(entry) => self.records.push(entry),
                    HookOutcome::Skip => tracing::trace!(row = row_num, "row skipped by hook"),
                },
                None => self.records.push(entry),
            }
        }

        if self.end.map_or(false, |end| row_num >= end) {
            self.rest = Some(RowCounter::default());
        }
        self.position.next_row();
    }

    fn malformed(&self, kind: MalformedKind) -> Error {
        Error::malformed(self.position.row_num, self.position.col_num, kind)
    }

    fn finish(mut self) -> Result<Vec<Record>> {
        match self.rest.take() {
            Some(rest) => rest.finish(self.position),
            None => {
                if self.state == State::InQuoted {
                    return Err(self.malformed(MalformedKind::IllegalQuote));
                }
                // A strictly empty trailing row is not a row.
                if !self.entry.is_empty() || self.state != State::ValueStart {
                    self.end_of_value();
                    self.end_of_entry();
                }
            }
        }

        settle(self.position, self.first_row);
        Ok(self.records)
    }
}

/// Counts the remaining physical rows once nothing more will be emitted.
///
/// Only tracks whether a newline is quoted; never fails and never invokes hooks.
#[derive(Debug, Default)]
pub(crate) struct RowCounter {
    quoted: bool,
    pending: bool,
}

impl RowCounter {
    pub(crate) fn feed(&mut self, token: Token<'_>, position: &mut ParsePosition) {
        match token {
            Token::Delimiter => {
                self.quoted = !self.quoted;
                self.pending = true;
            }
            Token::Newline(_) if !self.quoted => {
                position.next_row();
                self.pending = false;
            }
            _ => self.pending = true,
        }
    }

    pub(crate) fn finish(self, position: &mut ParsePosition) {
        if self.pending {
            position.next_row();
        }
    }
}

/// Turns "the next row to be read" into "the last row read".
///
/// Never moves the cursor before `first_row`, the row the scan started on.
pub(crate) fn settle(position: &mut ParsePosition, first_row: usize) {
    position.row_num = position.row_num.saturating_sub(1).max(first_row).max(1);
    position.col_num = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, config: &Config) -> Result<(Vec<Record>, ParsePosition)> {
        let pattern = TokenPattern::new(config.separator, config.delimiter).unwrap();
        let (start, end) = config.physical_window();
        let mut position = ParsePosition::new();
        let records = parse_records(&pattern, config, text, start, end, &mut position)?;
        Ok((records, position))
    }

    fn strings(records: &[Record]) -> Vec<Vec<String>> {
        records
            .iter()
            .map(|r| r.iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_quoted_separators_and_newlines() {
        let (records, _) = parse("a,\"b,c\",d\n\"x\ny\",\"\"\"q\"\"\"", &Config::new()).unwrap();
        assert_eq!(
            strings(&records),
            vec![vec!["a", "b,c", "d"], vec!["x\ny", "\"q\""]]
        );
    }

    #[test]
    fn test_empty_values() {
        let (records, _) = parse(",a,\n,\n", &Config::new()).unwrap();
        assert_eq!(strings(&records), vec![vec!["", "a", ""], vec!["", ""]]);
    }

    #[test]
    fn test_trailing_newline_adds_no_row() {
        let (records, position) = parse("a\r\nb\r\n", &Config::new()).unwrap();
        assert_eq!(strings(&records), vec![vec!["a"], vec!["b"]]);
        assert_eq!(position.row_num, 2);
    }

    #[test]
    fn test_single_value_without_newline_is_flushed() {
        let (records, _) = parse("a", &Config::new()).unwrap();
        assert_eq!(strings(&records), vec![vec!["a"]]);

        let (records, _) = parse("\"\"", &Config::new()).unwrap();
        assert_eq!(strings(&records), vec![vec![""]]);
    }

    #[test]
    fn test_blank_line_is_one_empty_value() {
        let (records, _) = parse("a\n\nb", &Config::new()).unwrap();
        assert_eq!(strings(&records), vec![vec!["a"], vec![""], vec!["b"]]);
    }

    #[test]
    fn test_illegal_state_position() {
        let err = parse("a,b\nc,\"d\"e", &Config::new()).unwrap_err();
        assert_eq!(err, Error::malformed(2, 2, MalformedKind::IllegalState));
    }

    #[test]
    fn test_illegal_quote_position() {
        let err = parse("a,b\"c", &Config::new()).unwrap_err();
        assert_eq!(err, Error::malformed(1, 2, MalformedKind::IllegalQuote));
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse("a\n\"open,", &Config::new()).unwrap_err();
        assert_eq!(err, Error::malformed(2, 1, MalformedKind::IllegalQuote));
    }

    #[test]
    fn test_window_counts_every_row() {
        let text = "h\n1\n\"2\n2\"\n3\n4\n5\n";
        let config = Config::new().with_window(2, 3);
        let (records, position) = parse(text, &config).unwrap();
        assert_eq!(strings(&records), vec![vec!["2\n2"], vec!["3"]]);
        assert_eq!(position.row_num, 6);
    }

    #[test]
    fn test_rows_after_end_are_not_validated() {
        let config = Config::new().with_headers(false).with_end(1);
        let (records, position) = parse("a\nb\"c\"\nd", &config).unwrap();
        assert_eq!(strings(&records), vec![vec!["a"]]);
        assert_eq!(position.row_num, 3);
    }

    #[test]
    fn test_header_row_bypasses_value_hook() {
        let config = Config::new().with_on_parse_value(|value, _| {
            HookOutcome::Keep(Field::from(value.to_string().to_uppercase()))
        });
        let (records, _) = parse("name\njoe", &config).unwrap();
        assert_eq!(strings(&records), vec![vec!["name"], vec!["JOE"]]);
    }

    #[test]
    fn test_skipped_rows_still_advance_position() {
        let config = Config::new()
            .with_headers(false)
            .with_on_parse_entry(|entry, position| {
                if position.row_num == 2 {
                    HookOutcome::Skip
                } else {
                    HookOutcome::Keep(entry)
                }
            });
        let (records, position) = parse("a\nb\nc", &config).unwrap();
        assert_eq!(strings(&records), vec![vec!["a"], vec!["c"]]);
        assert_eq!(position.row_num, 3);
    }

    #[test]
    fn test_settle_stays_on_first_row() {
        let mut position = ParsePosition::at_row(7);
        settle(&mut position, 7);
        assert_eq!(position.row_num, 7);

        let mut position = ParsePosition::at_row(9);
        settle(&mut position, 7);
        assert_eq!(position.row_num, 8);
    }

    #[test]
    fn test_value_hook_sees_column() {
        let config = Config::new().with_headers(false).with_on_parse_value(|value, position| {
            HookOutcome::Keep(Field::from(format!("{}@{}", value, position.col_num)))
        });
        let (records, _) = parse("a,b", &config).unwrap();
        assert_eq!(strings(&records), vec![vec!["a@1", "b@2"]]);
    }
}
