//! Token classification.
//!
//! A [`TokenPattern`] is compiled once per `(separator, delimiter)` pair from
//! `(D|S|\r\n|\n|\r|[^DS\r\n]+)`, with `S` and `D` replaced by the escaped
//! characters. Every character of the input falls into exactly one match, so
//! iterating the matches classifies the whole text without gaps.

use crate::{Error, Result};
use regex::Regex;

/// One classified piece of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'t> {
    Separator,
    Delimiter,
    /// `\r\n`, `\n` or a lone `\r`, carrying the matched text.
    Newline(&'t str),
    /// A maximal run containing none of the above.
    Text(&'t str),
}

/// The compiled token pattern for one dialect.
#[derive(Clone, Debug)]
pub struct TokenPattern {
    separator: char,
    delimiter: char,
    regex: Regex,
}

impl TokenPattern {
    /// Compiles the pattern for the given separator and delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the characters cannot form a pattern.
    pub fn new(separator: char, delimiter: char) -> Result<Self> {
        let sep = regex::escape(separator.encode_utf8(&mut [0; 4]));
        let delim = regex::escape(delimiter.encode_utf8(&mut [0; 4]));
        let source = format!(
            r"({delim}|{sep}|\r\n|\n|\r|[^{delim}{sep}\r\n]+)",
            delim = delim,
            sep = sep
        );
        let regex = Regex::new(&source)
            .map_err(|e| Error::configuration(&format!("invalid token pattern: {}", e)))?;

        Ok(TokenPattern {
            separator,
            delimiter,
            regex,
        })
    }

    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    #[must_use]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Returns a fresh token iterator over `text`.
    ///
    /// The iterator is lazy and finite; calling this again restarts from the beginning.
    pub fn tokens<'p, 't>(&'p self, text: &'t str) -> Tokens<'p, 't> {
        Tokens {
            pattern: self,
            matches: self.regex.find_iter(text),
        }
    }

    fn classify<'t>(&self, text: &'t str) -> Token<'t> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c == self.separator => Token::Separator,
            (Some(c), None) if c == self.delimiter => Token::Delimiter,
            _ if text == "\r\n" || text == "\n" || text == "\r" => Token::Newline(text),
            _ => Token::Text(text),
        }
    }
}

/// Lazy iterator of classified tokens.
pub struct Tokens<'p, 't> {
    pattern: &'p TokenPattern,
    matches: regex::Matches<'p, 't>,
}

impl<'p, 't> Iterator for Tokens<'p, 't> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        self.matches
            .next()
            .map(|m| self.pattern.classify(m.as_str()))
    }
}
