//! Error types for INI parsing and file loading.
//!
//! Every failure the engine can report is an [`Error`]. Errors are grouped
//! into a small taxonomy, [`ErrorKind`], which is what crosses the C
//! boundary:
//!
//! - **Parse**: malformed input, always with a line/column location
//! - **Io**: a file could not be read
//! - **Runtime**: an internal invariant was violated
//! - **None**: not an error; the success tag used by the C layer
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::{parse_str, ErrorKind};
//!
//! let err = parse_str("[section\nkey = value").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Parse);
//! assert!(err.to_string().contains("line 1"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while building a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Lexical or structural error with the offending line as context
    #[error("Syntax error at line {line}, column {column}: {msg}\n{context}")]
    Syntax {
        line: usize,
        column: usize,
        msg: String,
        context: String,
    },

    /// A key was assigned twice in one section while duplicates are rejected
    #[error("Duplicate key '{key}' in {} at line {line}", section_label(.section))]
    DuplicateKey {
        line: usize,
        section: Option<String>,
        key: String,
    },

    /// IO error while reading input
    #[error("IO error: {0}")]
    Io(String),

    /// Internal failure
    #[error("Runtime error: {0}")]
    Runtime(String),
}

fn section_label(section: &Option<String>) -> String {
    match section {
        Some(name) => format!("section [{}]", name),
        None => "the global section".to_string(),
    }
}

/// The coarse category of an [`Error`].
///
/// `None` is never produced by [`Error::kind`]; it exists so that the C layer
/// can pass success and failure through one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    None,
    Parse,
    Io,
    Runtime,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::None => "none",
            ErrorKind::Parse => "parse",
            ErrorKind::Io => "io",
            ErrorKind::Runtime => "runtime",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Creates a syntax error with line and column information but no context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Error;
    ///
    /// let err = Error::syntax(10, 5, "expected '='");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, column: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            column,
            msg: msg.to_string(),
            context: String::new(),
        }
    }

    /// Creates a syntax error whose context shows `source_line` with a caret
    /// under `column` (1-based, counted in characters).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Error;
    ///
    /// let err = Error::syntax_with_context(3, 4, "expected ']'", "[db");
    /// assert!(err.to_string().ends_with("[db\n   ^"));
    /// ```
    pub fn syntax_with_context(line: usize, column: usize, msg: &str, source_line: &str) -> Self {
        let caret = " ".repeat(column.saturating_sub(1));
        Error::Syntax {
            line,
            column,
            msg: msg.to_string(),
            context: format!("{}\n{}^", source_line, caret),
        }
    }

    /// Creates a duplicate key error.
    pub fn duplicate_key(line: usize, section: Option<&str>, key: &str) -> Self {
        Error::DuplicateKey {
            line,
            section: section.map(str::to_string),
            key: key.to_string(),
        }
    }

    /// Creates an I/O error for file reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a runtime error.
    pub fn runtime<T: fmt::Display>(msg: T) -> Self {
        Error::Runtime(msg.to_string())
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax { .. } | Error::DuplicateKey { .. } => ErrorKind::Parse,
            Error::Io(_) => ErrorKind::Io,
            Error::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// Returns the 1-based line the error points at, if it has one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. } | Error::DuplicateKey { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Error::syntax(1, 1, "x").kind(), ErrorKind::Parse);
        assert_eq!(Error::duplicate_key(2, None, "k").kind(), ErrorKind::Parse);
        assert_eq!(Error::io("missing").kind(), ErrorKind::Io);
        assert_eq!(Error::runtime("oops").kind(), ErrorKind::Runtime);
    }

    #[test]
    fn test_context_caret() {
        let err = Error::syntax_with_context(1, 1, "unexpected", "abc");
        match err {
            Error::Syntax { context, .. } => assert_eq!(context, "abc\n^"),
            _ => panic!("Expected syntax error"),
        }
    }

    #[test]
    fn test_duplicate_key_message() {
        let err = Error::duplicate_key(4, Some("db"), "port");
        assert_eq!(err.to_string(), "Duplicate key 'port' in section [db] at line 4");
        let err = Error::duplicate_key(1, None, "name");
        assert!(err.to_string().contains("the global section"));
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::from(io);
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("no such file"));
        assert_eq!(err.line(), None);
    }
}
