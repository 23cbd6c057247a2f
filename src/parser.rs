//! Builds a [`Document`] from the lexer's token stream.
//!
//! Section headers switch the current section, creating it on first sight and
//! re-opening it afterwards. Assignments land in the current section, which is
//! the global section until the first header. The first error aborts the
//! parse and the partly built document is dropped with the parser.
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::{Parser, ParseOptions, Value};
//!
//! let doc = Parser::with_options(ParseOptions::default())
//!     .parse("[a]\nx = 1\n[b]\ny = 2\n[a]\nz = 3\n")
//!     .unwrap();
//!
//! let names: Vec<_> = doc.sections().filter_map(|s| s.name()).collect();
//! assert_eq!(names, vec!["a", "b"]);
//! assert_eq!(doc.section(Some("a")).unwrap().len(), 2);
//! assert_eq!(doc.get_entry(Some("a"), "z").map(|(_, v)| v), Some(Value::Integer(3)));
//! ```

use crate::lexer::{Lexer, Token};
use crate::options::DuplicateKeys;
use crate::{Document, Error, ParseOptions, Result};
use std::fs;
use std::path::Path;

/// Accumulates parsed text into a document it owns.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
    document: Document,
    current: Option<String>,
}

impl Parser {
    /// Creates a parser with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: ParseOptions) -> Self {
        Parser {
            options,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Gives up the parser and returns the document it holds. A parser that
    /// never parsed anything yields a document with only the empty global
    /// section.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Parses `input` and returns the finished document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] for malformed input and
    /// [`Error::DuplicateKey`] when duplicates are rejected.
    pub fn parse(mut self, input: &str) -> Result<Document> {
        tracing::debug!(bytes = input.len(), "Parsing INI document");

        let options = std::mem::take(&mut self.options);
        let policy = options.duplicate_keys;
        let mut lexer = Lexer::new(input, &options);
        let outcome = lexer
            .by_ref()
            .try_for_each(|token| self.apply(token?, policy));

        if let Err(err) = outcome {
            tracing::debug!(line = lexer.line(), error = %err, "Parse aborted");
            return Err(err);
        }

        tracing::debug!(
            sections = self.document.section_count(),
            keys = self.document.len(),
            "Parsed INI document"
        );
        Ok(self.document)
    }

    /// Reads the file at `path` and parses it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, and any error
    /// [`Parser::parse`] returns.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<Document> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Reading INI file");
        let bytes = fs::read(path)
            .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
        let text = crate::decode(&bytes)?;
        self.parse(text)
    }

    fn apply(&mut self, token: Token<'_>, policy: DuplicateKeys) -> Result<()> {
        match token {
            Token::SectionHeader { name, position } => {
                if self.document.open_section(name) {
                    tracing::debug!(section = name, line = position.line, "Opened section");
                } else {
                    tracing::debug!(section = name, line = position.line, "Re-opened section");
                }
                self.current = Some(name.to_string());
            }
            Token::Assignment {
                key,
                value,
                position,
            } => {
                let section = self.current.as_deref();
                tracing::trace!(
                    section = section.unwrap_or(""),
                    key,
                    quoted = value.quote.is_some(),
                    "Assignment"
                );

                let target = self.document.section_or_insert(section);
                if target.contains_key(key) {
                    match policy {
                        DuplicateKeys::Reject => {
                            return Err(Error::duplicate_key(position.line, section, key))
                        }
                        DuplicateKeys::Overwrite => {
                            tracing::debug!(key, line = position.line, "Overwriting duplicate key")
                        }
                    }
                }
                target.insert(key, value.to_entry());
            }
            Token::Eof => {}
        }
        Ok(())
    }
}
