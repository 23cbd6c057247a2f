//! Configuration options for INI parsing.
//!
//! This module provides types to customize how text is read:
//!
//! - [`ParseOptions`]: Main configuration struct
//! - [`DuplicateKeys`]: What to do when a key is assigned twice in one section
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::{parse_str_with_options, DuplicateKeys, ParseOptions};
//!
//! // `#` is no longer a comment, so it may start a key
//! let options = ParseOptions::new().with_comment_markers(&[';']);
//! let doc = parse_str_with_options("#tag = 1", &options).unwrap();
//! assert!(doc.get(None, "#tag").is_some());
//!
//! // Reject the second assignment instead of overwriting the first
//! let options = ParseOptions::new().with_duplicate_keys(DuplicateKeys::Reject);
//! assert!(parse_str_with_options("a = 1\na = 2", &options).is_err());
//! ```

/// Policy for a key assigned more than once in the same section.
///
/// # Examples
///
/// ```rust
/// use inidoc::DuplicateKeys;
///
/// assert_eq!(DuplicateKeys::default(), DuplicateKeys::Overwrite);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// The later assignment replaces the earlier value (last write wins)
    #[default]
    Overwrite,
    /// The later assignment is a parse error
    Reject,
}

/// Configuration options for INI parsing.
///
/// Controls which characters start comments and how duplicate keys are
/// handled. The escape sequence set and the coercion rules are fixed and are
/// not configurable.
///
/// # Examples
///
/// ```rust
/// use inidoc::{DuplicateKeys, ParseOptions};
///
/// // Default: `;` and `#` comment lines, `;` inline comments, last write wins
/// let options = ParseOptions::new();
/// assert_eq!(options.comment_markers, vec![';', '#']);
///
/// // Strict: no inline comments, duplicate keys rejected
/// let options = ParseOptions::strict();
/// assert!(options.inline_comment_markers.is_empty());
/// assert_eq!(options.duplicate_keys, DuplicateKeys::Reject);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOptions {
    /// Characters that make a whole line a comment when they start it
    pub comment_markers: Vec<char>,
    /// Characters that end a value and start a trailing comment
    pub inline_comment_markers: Vec<char>,
    pub duplicate_keys: DuplicateKeys,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            comment_markers: vec![';', '#'],
            inline_comment_markers: vec![';'],
            duplicate_keys: DuplicateKeys::default(),
        }
    }
}

impl ParseOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::ParseOptions;
    ///
    /// let options = ParseOptions::new();
    /// assert_eq!(options.inline_comment_markers, vec![';']);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that accept less: values run to the end of the line
    /// and duplicate keys are an error.
    #[must_use]
    pub fn strict() -> Self {
        ParseOptions {
            inline_comment_markers: Vec::new(),
            duplicate_keys: DuplicateKeys::Reject,
            ..Default::default()
        }
    }

    /// Sets the characters that start a comment line.
    #[must_use]
    pub fn with_comment_markers(mut self, markers: &[char]) -> Self {
        self.comment_markers = markers.to_vec();
        self
    }

    /// Sets the characters that start a trailing comment after a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::{parse_str_with_options, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_inline_comment_markers(&[';', '#']);
    /// let doc = parse_str_with_options("color = red # primary", &options).unwrap();
    /// assert_eq!(doc.get(None, "color").unwrap().raw(), "red");
    /// ```
    #[must_use]
    pub fn with_inline_comment_markers(mut self, markers: &[char]) -> Self {
        self.inline_comment_markers = markers.to_vec();
        self
    }

    /// Disables trailing comments; everything after `=` belongs to the value.
    #[must_use]
    pub fn without_inline_comments(mut self) -> Self {
        self.inline_comment_markers.clear();
        self
    }

    /// Sets the duplicate key policy.
    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    pub(crate) fn is_comment_marker(&self, ch: char) -> bool {
        self.comment_markers.contains(&ch)
    }

    pub(crate) fn is_inline_comment_marker(&self, ch: char) -> bool {
        self.inline_comment_markers.contains(&ch)
    }
}
