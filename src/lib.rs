//! # inidoc
//!
//! An INI document engine: a parser that turns INI text into an ordered,
//! typed, queryable document, plus a C ABI that hands the document across a
//! foreign-function boundary with explicit ownership.
//!
//! ## Key Features
//!
//! - **Ordered**: sections and keys iterate in the order they first appeared
//! - **Lazily typed**: values keep their source text and are read as raw
//!   text, strings, integers, floats or booleans on demand
//! - **Fixed grammar**: comment markers, quoting, escapes and coercion rules
//!   are pinned down (see [`format`])
//! - **Dual iteration**: cursors yield short-lived borrowed views or
//!   independent owned copies
//! - **C boundary**: opaque handles, idempotent release, no panics across the
//!   boundary (see [`ffi`])
//!
//! ## Quick Start
//!
//! ```rust
//! use inidoc::{parse_str, Value, ValueKind};
//!
//! let text = "\
//! ; global settings
//! name = demo
//!
//! [server]
//! port = 8080
//! debug = off
//! motd = \"Welcome\\tin\"
//! ";
//!
//! let doc = parse_str(text).unwrap();
//!
//! assert_eq!(doc.get_entry(Some("server"), "port").map(|(_, v)| v), Some(Value::Integer(8080)));
//! assert_eq!(doc.get_entry(Some("server"), "debug").map(|(_, v)| v), Some(Value::Boolean(false)));
//! assert_eq!(
//!     doc.lookup(Some("server"), "motd", ValueKind::String),
//!     Some(Value::String("Welcome\tin".to_string()))
//! );
//! assert_eq!(doc.lookup(None, "name", ValueKind::Integer), None);
//! ```
//!
//! ### Walking a document
//!
//! ```rust
//! use inidoc::{parse_str, Tree};
//!
//! let tree = Tree::new(parse_str("a = 1\n[s]\nb = yes\n").unwrap());
//!
//! let mut sections = tree.sections();
//! while let Some(section) = sections.next_borrowed() {
//!     let mut keys = section.keys();
//!     while let Some(key) = keys.next_borrowed() {
//!         println!("[{}] {} = {}", section.name().unwrap_or(""), key.name(), key.value());
//!     }
//! }
//!
//! let doc = tree.into_document();
//! assert_eq!(doc.len(), 2);
//! ```
//!
//! ## Logging
//!
//! The engine emits [`tracing`] events (parse progress at `debug`, every
//! token and assignment at `trace`). It never installs a subscriber.

pub mod document;
pub mod error;
mod escape;
pub mod ffi;
pub mod format;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod tree;
pub mod value;

pub use document::{Document, Section};
pub use error::{Error, ErrorKind, Result};
pub use map::EntryMap;
pub use options::{DuplicateKeys, ParseOptions};
pub use parser::Parser;
pub use tree::{Key, KeyIter, KeyRef, SectionIter, Tree};
pub use value::{Entry, Quote, Value, ValueKind};

use std::io;
use std::path::Path;

/// Parse INI text with default options.
///
/// # Examples
///
/// ```rust
/// use inidoc::parse_str;
///
/// let doc = parse_str("[db]\nhost = localhost\n").unwrap();
/// assert_eq!(doc.get(Some("db"), "host").unwrap().raw(), "localhost");
/// ```
///
/// # Errors
///
/// Returns an error if the input is malformed. Error messages include line
/// and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(input: &str) -> Result<Document> {
    Parser::new().parse(input)
}

/// Parse INI text with custom options.
///
/// # Errors
///
/// Returns an error if the input is malformed, or if a key repeats while
/// [`DuplicateKeys::Reject`] is set.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str_with_options(input: &str, options: &ParseOptions) -> Result<Document> {
    Parser::with_options(options.clone()).parse(input)
}

/// Parse INI text from raw bytes.
///
/// # Examples
///
/// ```rust
/// use inidoc::{parse_bytes, ErrorKind};
///
/// let doc = parse_bytes(b"\xEF\xBB\xBFkey = value").unwrap();
/// assert!(doc.get(None, "key").is_some());
///
/// let err = parse_bytes(b"ok = 1\nbad = \xFF").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Parse);
/// assert_eq!(err.line(), Some(2));
/// ```
///
/// # Errors
///
/// Returns a syntax error located at the first byte that is not valid UTF-8,
/// or any error [`parse_str`] returns.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_bytes(bytes: &[u8]) -> Result<Document> {
    parse_str(decode(bytes)?)
}

/// Read and parse the file at `path`.
///
/// # Examples
///
/// ```rust
/// use inidoc::{parse_file, ErrorKind};
///
/// let err = parse_file("does-not-exist.ini").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Io);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or a parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    Parser::new().parse_file(path)
}

/// Read an I/O stream to the end and parse it.
///
/// # Examples
///
/// ```rust
/// use inidoc::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new("[a]\nx = 1\n")).unwrap();
/// assert_eq!(doc.section_count(), 2);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the bytes are not UTF-8, or the text is
/// malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Document> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_bytes(&bytes)
}

/// Checks that `bytes` are UTF-8, reporting the first bad byte as a location.
pub(crate) fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = String::from_utf8_lossy(&bytes[..e.valid_up_to()]);
        let line = valid.matches('\n').count() + 1;
        let line_start = valid.rfind('\n').map_or(0, |pos| pos + 1);
        let current = &valid[line_start..];
        let current = if line_start == 0 {
            current.strip_prefix('\u{feff}').unwrap_or(current)
        } else {
            current
        };
        let column = current.chars().count() + 1;
        Error::syntax(line, column, "invalid UTF-8")
    })
}
