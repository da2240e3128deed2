//! Single-line and single-field decoding.
//!
//! Unlike the [document machine](crate::tokenizer), a line parse treats unquoted
//! newlines as noise and always emits the last value, so `"a,"` yields two fields.

use crate::hooks::HookOutcome;
use crate::lexer::{Token, TokenPattern};
use crate::options::ValueHook;
use crate::tokenizer::State;
use crate::{Error, Field, MalformedKind, ParsePosition, Record, Result};
use std::mem;

/// Decodes one line into a record, advancing `position.col_num` once per value.
pub(crate) fn parse_line(
    pattern: &TokenPattern,
    text: &str,
    hook: Option<&ValueHook>,
    position: &mut ParsePosition,
) -> Result<Record> {
    let mut record = Vec::new();
    let mut value = String::new();
    let mut state = State::ValueStart;

    let mut emit = |value: &mut String, position: &mut ParsePosition| {
        let field = Field::String(mem::take(value));
        match hook {
            Some(hook) => {
                if let HookOutcome::Keep(field) = hook(field, position) {
                    record.push(field);
                }
            }
            None => record.push(field),
        }
        position.next_col();
    };

    for token in pattern.tokens(text) {
        state = match (state, token) {
            (State::InQuoted, Token::Delimiter) => State::QuoteSeen,
            (State::InQuoted, Token::Separator) => {
                value.push(pattern.separator());
                State::InQuoted
            }
            (State::InQuoted, Token::Newline(text) | Token::Text(text)) => {
                value.push_str(text);
                State::InQuoted
            }

            (_, Token::Newline(_)) => state,

            (State::ValueStart, Token::Separator) => {
                emit(&mut value, position);
                State::ValueStart
            }
            (State::ValueStart, Token::Delimiter) => State::InQuoted,
            (State::ValueStart | State::Unquoted, Token::Text(text)) => {
                value.push_str(text);
                State::Unquoted
            }

            (State::QuoteSeen, Token::Delimiter) => {
                value.push(pattern.delimiter());
                State::InQuoted
            }
            (State::QuoteSeen | State::Unquoted, Token::Separator) => {
                emit(&mut value, position);
                State::ValueStart
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
        };
    }

    if state == State::InQuoted {
        return Err(Error::malformed(
            position.row_num,
            position.col_num,
            MalformedKind::IllegalQuote,
        ));
    }
    emit(&mut value, position);

    Ok(record)
}

/// Decodes text that must hold exactly one value.
///
/// A value dropped by the hook comes back as [`Field::Empty`].
pub(crate) fn parse_field(
    pattern: &TokenPattern,
    text: &str,
    hook: Option<&ValueHook>,
    position: &mut ParsePosition,
) -> Result<Field> {
    let first_col = position.col_num;
    let mut record = parse_line(pattern, text, hook, position)?;

    if position.col_num - first_col > 1 {
        return Err(Error::malformed(
            position.row_num,
            first_col + 1,
            MalformedKind::IllegalData,
        ));
    }
    Ok(record.pop().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn line(text: &str) -> Result<Vec<String>> {
        let pattern = TokenPattern::new(',', '"').unwrap();
        let record = parse_line(&pattern, text, None, &mut ParsePosition::new())?;
        Ok(record.into_iter().map(String::from).collect())
    }

    #[test]
    fn test_line_with_quoted_separator() {
        assert_eq!(line("a,\"b,c\",d").unwrap(), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_line_flushes_trailing_empty_value() {
        assert_eq!(line("a,").unwrap(), vec!["a", ""]);
        assert_eq!(line("").unwrap(), vec![""]);
    }

    #[test]
    fn test_line_ignores_unquoted_newlines() {
        assert_eq!(line("a,b\r\n").unwrap(), vec!["a", "b"]);
        assert_eq!(line("\"x\ny\"\n").unwrap(), vec!["x\ny"]);
    }

    #[test]
    fn test_line_errors() {
        let err = line("a,\"open").unwrap_err();
        assert_eq!(err, Error::malformed(1, 2, MalformedKind::IllegalQuote));
        let err = line("\"a\"b").unwrap_err();
        assert_eq!(err, Error::malformed(1, 1, MalformedKind::IllegalState));
    }

    #[test]
    fn test_line_advances_columns() {
        let pattern = TokenPattern::new(',', '"').unwrap();
        let mut position = ParsePosition::at_row(4);
        parse_line(&pattern, "a,b,c", None, &mut position).unwrap();
        assert_eq!(position, ParsePosition { row_num: 4, col_num: 4 });
    }

    #[test]
    fn test_field() {
        let pattern = TokenPattern::new(',', '"').unwrap();
        let field =
            parse_field(&pattern, "\"a \"\"b\"\"\"", None, &mut ParsePosition::new()).unwrap();
        assert_eq!(field, Field::from("a \"b\""));

        let err = parse_field(&pattern, "a,b", None, &mut ParsePosition::new()).unwrap_err();
        assert_eq!(err, Error::malformed(1, 2, MalformedKind::IllegalData));
    }

    #[test]
    fn test_field_skipped_by_hook_is_empty() {
        let pattern = TokenPattern::new(',', '"').unwrap();
        let hook: ValueHook = Arc::new(|_, _| HookOutcome::Skip);
        let field = parse_field(&pattern, "x", Some(&hook), &mut ParsePosition::new()).unwrap();
        assert_eq!(field, Field::Empty);
    }
}
