//! INI Format Reference
//!
//! INI has no single canonical grammar. This module documents the exact
//! dialect this library reads.
//!
//! # Lines
//!
//! Input is UTF-8. A leading byte order mark is skipped. Lines end at `\n`
//! and a trailing `\r` is dropped, so CRLF files read the same as LF files.
//! Every line is one of:
//!
//! | Line | Shape | Token |
//! |------|-------|-------|
//! | Blank | only whitespace | none |
//! | Comment | first non-blank character is `;` or `#` | none |
//! | Section header | `[name]` | `SectionHeader` |
//! | Assignment | `key = value` | `Assignment` |
//!
//! Anything else is a syntax error. The comment markers can be changed with
//! [`ParseOptions::with_comment_markers`](crate::ParseOptions::with_comment_markers).
//!
//! # Sections
//!
//! ```text
//! [database]
//! [ spaced name ]   ; name is "spaced name"
//! ```
//!
//! **Rules**:
//! - The name is trimmed and must not be empty
//! - The name may not contain `[`, `]` or control characters
//! - After `]` only whitespace or a comment may follow
//! - Keys before the first header belong to the unnamed global section
//! - A repeated header re-opens the existing section; it keeps the position
//!   of its first appearance
//!
//! # Assignments
//!
//! ```text
//! port = 5432
//! url = http://host/?a=b     ; split at the first '='
//! empty =
//! ```
//!
//! **Rules**:
//! - The line is split at the first `=`; key and value are trimmed
//! - The key must not be empty and may not contain `[`, `]`, `"`, `'` or
//!   control characters
//! - The value may be empty
//! - A repeated key in one section overwrites the earlier value and keeps
//!   the earlier position, unless
//!   [`DuplicateKeys::Reject`](crate::DuplicateKeys::Reject) is set
//!
//! # Values
//!
//! ## Unquoted
//!
//! The value runs to the end of the line or to the first unescaped inline
//! comment marker (`;` by default), then is right-trimmed. A backslash keeps
//! the next character from starting a comment; it stays in the raw text.
//!
//! ```text
//! path = C:\;odd ; the value is `C:\;odd`
//! ```
//!
//! ## Quoted
//!
//! A value starting with `"` or `'` is quoted. It ends at the first matching
//! quote not preceded by a backslash. Only whitespace or a comment may follow
//! the closing quote. The raw text keeps both quotes. Reading the value as a
//! string strips them and resolves escapes:
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\\` | backslash |
//! | `\"` `\'` | quote |
//! | `\n` `\r` `\t` | newline, carriage return, tab |
//! | `\0` | NUL |
//! | `\a` `\b` | bell, backspace |
//! | `\;` `\#` `\:` `\=` | the character itself |
//! | `\xHHHHHH` | the Unicode scalar value with exactly six hex digits |
//!
//! Any other escape, a short `\x` escape or an unterminated quote is a syntax
//! error, even though the escape is only resolved on lookup.
//!
//! # Typed Values
//!
//! Values are stored as text. On lookup the first interpretation that
//! succeeds, in this order, is the preferred value:
//!
//! | Kind | Accepted text | Example |
//! |------|---------------|---------|
//! | Boolean | `y` `yes` `true` `on` / `n` `no` `false` `off`, case-sensitive | `debug = off` |
//! | Integer | unsigned 64-bit decimal, or `0x`, `0o`, `0b` prefixed | `mask = 0xff` |
//! | Float | `[+-]digits[.digits][(e\|E)[+-]digits]`, finite | `ratio = -2.5e3` |
//! | String | quoted text, unescaped | `name = "Ada"` |
//! | Raw | anything, exactly as written | `host = localhost` |
//!
//! Quoted text is never a boolean or a number: `"42"` is the string `42`.
//! A signed number such as `-1` is a float, never an integer. Underscores,
//! `inf` and `nan` are not numbers at all. A request for one specific kind
//! either returns that kind or nothing.
//!
//! # Errors
//!
//! Every syntax error reports the 1-based line and character column and
//! quotes the offending line:
//!
//! ```text
//! Syntax error at line 3, column 8: unterminated quoted value
//! name = "Ada
//!        ^
//! ```
//!
//! # Not Supported
//!
//! - Writing INI text back out
//! - Keeping comments
//! - Line continuations and multi-line values
//! - Nested or dotted sections beyond plain names
//! - Merging several files
