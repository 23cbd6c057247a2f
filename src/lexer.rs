//! Line-oriented tokenizer for INI text.
//!
//! The [`Lexer`] walks the input one line at a time and yields structural
//! [`Token`]s. Blank lines and comment lines produce nothing. Once the input
//! runs out it yields [`Token::Eof`] exactly once and then ends. The first
//! malformed line yields an `Err` carrying its line and column, and nothing is
//! yielded after it.
//!
//! Keys, section names and values come out trimmed and borrowed from the
//! input. Quoted values keep their quotes; escapes are checked here but only
//! resolved when the value is read as a string.
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::lexer::{Lexer, Token};
//! use inidoc::ParseOptions;
//!
//! let options = ParseOptions::default();
//! let tokens: Vec<_> = Lexer::new("; header\n[db]\nport = 5432 ; default\n", &options)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(tokens.len(), 3);
//! assert!(matches!(tokens[0], Token::SectionHeader { name: "db", .. }));
//! match &tokens[1] {
//!     Token::Assignment { key, value, .. } => {
//!         assert_eq!(*key, "port");
//!         assert_eq!(value.text, "5432");
//!     }
//!     other => panic!("unexpected token {:?}", other),
//! }
//! assert_eq!(tokens[2], Token::Eof);
//! ```

use crate::escape;
use crate::{Entry, Error, ParseOptions, Quote, Result};
use std::fmt;
use std::iter::FusedIterator;

const BOM: char = '\u{feff}';

/// A 1-based location in the source text. Columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A value as written on an assignment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawValue<'a> {
    /// Trimmed text, quotes included when quoted
    pub text: &'a str,
    pub quote: Option<Quote>,
}

impl RawValue<'_> {
    /// Copies the value into an owned [`Entry`].
    #[must_use]
    pub fn to_entry(&self) -> Entry {
        Entry::from_parts(self.text.to_string(), self.quote)
    }
}

/// A structural element of an INI file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `[name]`; `position` points at the opening bracket
    SectionHeader { name: &'a str, position: Position },
    /// `key = value`; `position` points at the first character of the key
    Assignment {
        key: &'a str,
        value: RawValue<'a>,
        position: Position,
    },
    Eof,
}

/// A lazy, forward-only token stream over INI text.
pub struct Lexer<'a> {
    input: &'a str,
    options: &'a ParseOptions,
    offset: usize,
    line: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`. A leading byte order mark is skipped.
    #[must_use]
    pub fn new(input: &'a str, options: &'a ParseOptions) -> Self {
        Lexer {
            input: input.strip_prefix(BOM).unwrap_or(input),
            options,
            offset: 0,
            line: 0,
            finished: false,
        }
    }

    /// The number of lines consumed so far.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    fn next_line(&mut self) -> Option<&'a str> {
        if self.offset >= self.input.len() {
            return None;
        }
        let rest = &self.input[self.offset..];
        let line = match rest.find('\n') {
            Some(end) => {
                self.offset += end + 1;
                &rest[..end]
            }
            None => {
                self.offset = self.input.len();
                rest
            }
        };
        self.line += 1;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    fn lex_line(&self, line: &'a str) -> Result<Option<Token<'a>>> {
        let start = line.len() - line.trim_start().len();
        let first = match line[start..].chars().next() {
            Some(ch) => ch,
            None => return Ok(None),
        };

        if self.options.is_comment_marker(first) {
            Ok(None)
        } else if first == '[' {
            self.lex_section_header(line, start).map(Some)
        } else {
            self.lex_assignment(line, start).map(Some)
        }
    }

    fn lex_section_header(&self, line: &'a str, start: usize) -> Result<Token<'a>> {
        let body_start = start + 1;
        let body = &line[body_start..];

        let close = match body.find(|c: char| c == '[' || c == ']') {
            Some(pos) if body[pos..].starts_with('[') => {
                return Err(self.error(line, body_start + pos, "'[' is not allowed in a section name"))
            }
            Some(pos) => pos,
            None => {
                return Err(self.error(
                    line,
                    line.trim_end().len(),
                    "expected ']' to close the section header",
                ))
            }
        };

        let raw_name = &body[..close];
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(self.error(line, start, "empty section name"));
        }
        if let Some(pos) = name.find(char::is_control) {
            let lead = raw_name.len() - raw_name.trim_start().len();
            return Err(self.error(
                line,
                body_start + lead + pos,
                "control character in section name",
            ));
        }

        let after = body_start + close + 1;
        self.expect_comment_or_end(line, after, "unexpected text after section header")?;

        Ok(Token::SectionHeader {
            name,
            position: self.position(line, start),
        })
    }

    fn lex_assignment(&self, line: &'a str, start: usize) -> Result<Token<'a>> {
        let eq = match line[start..].find('=') {
            Some(pos) => start + pos,
            None => {
                return Err(self.error(
                    line,
                    line.trim_end().len(),
                    "expected '=' after key",
                ))
            }
        };

        let key = line[start..eq].trim_end();
        if key.is_empty() {
            return Err(self.error(line, eq, "empty key"));
        }
        if let Some(pos) = key.find(|c: char| matches!(c, '[' | ']' | '"' | '\'') || c.is_control()) {
            return Err(self.error(line, start + pos, "invalid character in key"));
        }

        let value_start = eq + 1 + (line[eq + 1..].len() - line[eq + 1..].trim_start().len());
        let value = self.lex_value(line, value_start)?;

        Ok(Token::Assignment {
            key,
            value,
            position: self.position(line, start),
        })
    }

    fn lex_value(&self, line: &'a str, start: usize) -> Result<RawValue<'a>> {
        let rest = &line[start..];
        let quote = rest.chars().next().and_then(Quote::from_char);

        let quote = match quote {
            Some(quote) => quote,
            None => {
                let end = escape::find_unescaped(rest, |c| self.options.is_inline_comment_marker(c))
                    .unwrap_or(rest.len());
                return Ok(RawValue {
                    text: rest[..end].trim_end(),
                    quote: None,
                });
            }
        };

        let body_start = start + 1;
        let close = escape::find_closing_quote(&line[body_start..], quote.as_char())
            .ok_or_else(|| self.error(line, start, "unterminated quoted value"))?;
        let body = &line[body_start..body_start + close];
        if let Err(err) = escape::unescape(body) {
            return Err(self.error(line, body_start + err.offset, err.msg));
        }

        let end = body_start + close + 1;
        self.expect_comment_or_end(line, end, "unexpected text after quoted value")?;

        Ok(RawValue {
            text: &line[start..end],
            quote: Some(quote),
        })
    }

    /// Accepts whitespace, then either the end of the line or a comment.
    fn expect_comment_or_end(&self, line: &str, from: usize, msg: &str) -> Result<()> {
        let rest = &line[from..];
        let skipped = rest.len() - rest.trim_start().len();
        match rest.trim_start().chars().next() {
            None => Ok(()),
            Some(ch)
                if self.options.is_comment_marker(ch)
                    || self.options.is_inline_comment_marker(ch) =>
            {
                Ok(())
            }
            Some(_) => Err(self.error(line, from + skipped, msg)),
        }
    }

    fn position(&self, line: &str, offset: usize) -> Position {
        Position {
            line: self.line,
            column: line[..offset].chars().count() + 1,
        }
    }

    fn error(&self, line: &str, offset: usize, msg: &str) -> Error {
        let position = self.position(line, offset);
        Error::syntax_with_context(position.line, position.column, msg, line)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(line) = self.next_line() {
            match self.lex_line(line) {
                Ok(Some(token)) => {
                    tracing::trace!(line = self.line, ?token, "Lexed token");
                    return Some(Ok(token));
                }
                Ok(None) => {}
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }

        self.finished = true;
        Some(Ok(Token::Eof))
    }
}

impl FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Result<Token<'_>>> {
        static OPTIONS: std::sync::OnceLock<ParseOptions> = std::sync::OnceLock::new();
        Lexer::new(input, OPTIONS.get_or_init(ParseOptions::default)).collect()
    }

    fn first_error(input: &str) -> (usize, usize, String) {
        match lex(input).into_iter().find_map(|t| t.err()) {
            Some(Error::Syntax {
                line, column, msg, ..
            }) => (line, column, msg),
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_just_eof() {
        assert_eq!(lex(""), vec![Ok(Token::Eof)]);
        assert_eq!(lex("\n\n  \n; c\n# c\n"), vec![Ok(Token::Eof)]);
    }

    #[test]
    fn test_eof_once_then_nothing() {
        let options = ParseOptions::default();
        let mut lexer = Lexer::new("a = 1", &options);
        assert!(matches!(lexer.next(), Some(Ok(Token::Assignment { .. }))));
        assert_eq!(lexer.next(), Some(Ok(Token::Eof)));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_line_counts_consumed_lines() {
        let options = ParseOptions::default();
        let mut lexer = Lexer::new("; c\n\n[s]\nk = v\n", &options);
        assert_eq!(lexer.line(), 0);
        assert!(matches!(lexer.next(), Some(Ok(Token::SectionHeader { .. }))));
        assert_eq!(lexer.line(), 3);
        assert!(matches!(lexer.next(), Some(Ok(Token::Assignment { .. }))));
        assert_eq!(lexer.line(), 4);
        assert_eq!(lexer.next(), Some(Ok(Token::Eof)));
        assert_eq!(lexer.line(), 4);
    }

    #[test]
    fn test_nothing_after_error() {
        let tokens = lex("[bad\na = 1\n");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_err());
    }

    #[test]
    fn test_positions() {
        let tokens = lex("\n  [s]\n\tkey=v");
        match tokens[0] {
            Ok(Token::SectionHeader { position, .. }) => {
                assert_eq!(position, Position { line: 2, column: 3 })
            }
            ref other => panic!("unexpected {:?}", other),
        }
        match tokens[1] {
            Ok(Token::Assignment { position, .. }) => {
                assert_eq!(position, Position { line: 3, column: 2 })
            }
            ref other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_trimming_and_crlf() {
        let tokens = lex("[ spaced name ]\r\n  key   =   some value  \r\n");
        assert!(matches!(tokens[0], Ok(Token::SectionHeader { name: "spaced name", .. })));
        match tokens[1] {
            Ok(Token::Assignment { key, value, .. }) => {
                assert_eq!(key, "key");
                assert_eq!(value.text, "some value");
                assert_eq!(value.quote, None);
            }
            ref other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bom_skipped() {
        let tokens = lex("\u{feff}[s]\n");
        assert!(matches!(tokens[0], Ok(Token::SectionHeader { name: "s", .. })));
    }

    #[test]
    fn test_split_at_first_equals() {
        match lex("url = a=b")[0] {
            Ok(Token::Assignment { key, value, .. }) => {
                assert_eq!(key, "url");
                assert_eq!(value.text, "a=b");
            }
            ref other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_inline_comment_and_escape() {
        match lex(r"path = C:\;dir ; note")[0] {
            Ok(Token::Assignment { value, .. }) => assert_eq!(value.text, r"C:\;dir"),
            ref other => panic!("unexpected {:?}", other),
        }
        match lex("tag = #1")[0] {
            Ok(Token::Assignment { value, .. }) => assert_eq!(value.text, "#1"),
            ref other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_quoted_value_keeps_quotes() {
        match lex(r#"msg = "a ; b \" c" ; trailing"#)[0] {
            Ok(Token::Assignment { value, .. }) => {
                assert_eq!(value.text, r#""a ; b \" c""#);
                assert_eq!(value.quote, Some(Quote::Double));
            }
            ref other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_value() {
        match lex("key =")[0] {
            Ok(Token::Assignment { value, .. }) => assert_eq!(value.text, ""),
            ref other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_section_errors() {
        assert_eq!(first_error("[abc").2, "expected ']' to close the section header");
        assert_eq!(first_error("[]").2, "empty section name");
        assert_eq!(first_error("[  ]").2, "empty section name");
        assert_eq!(first_error("[a[b]").1, 3);
        assert_eq!(first_error("[a] junk").1, 5);
        assert!(lex("[a] ; fine").iter().all(|t| t.is_ok()));
    }

    #[test]
    fn test_assignment_errors() {
        assert_eq!(first_error("a = 1\nno equals here"), (2, 15, "expected '=' after key".into()));
        assert_eq!(first_error(" = v").1, 2);
        assert_eq!(first_error("a]b = v").1, 2);
        assert_eq!(first_error("\"k\" = v").2, "invalid character in key");
    }

    #[test]
    fn test_quote_errors() {
        let (line, column, msg) = first_error("k = \"open");
        assert_eq!((line, column), (1, 5));
        assert_eq!(msg, "unterminated quoted value");

        let (_, column, msg) = first_error(r#"k = "bad \q""#);
        assert_eq!(column, 10);
        assert_eq!(msg, "invalid escape sequence");

        assert_eq!(first_error("k = 'a' b").2, "unexpected text after quoted value");
    }

    #[test]
    fn test_error_message_has_context() {
        let err = lex("[abc").remove(0).unwrap_err();
        assert!(err.to_string().ends_with("[abc\n    ^"));
    }
}
