//! Read-only view over a [`Document`] and the cursors that walk it.
//!
//! A [`Tree`] takes ownership of a document and only hands out shared
//! references, so nothing can change the document while a cursor borrowed
//! from the tree is alive. [`Tree::into_document`] gives the document back.
//!
//! Both cursors, [`SectionIter`] and [`KeyIter`], are forward-only and never
//! revisit a position. Once exhausted they keep returning `None`. Each has two
//! yield modes:
//!
//! - **borrowed** (`next_borrowed`): a reference that lives only until the
//!   cursor is advanced again or dropped
//! - **owned** (`next_owned`): an independent copy the caller keeps
//!
//! The cursors are also ordinary iterators whose items borrow from the
//! document rather than the cursor.
//!
//! # Examples
//!
//! ```rust
//! use inidoc::{parse_str, Tree};
//!
//! let doc = parse_str("a = 1\n[s]\nb = 2\nc = 3\n").unwrap();
//! let tree = Tree::new(doc.clone());
//!
//! for section in tree.sections() {
//!     for key in section.keys() {
//!         println!("{:?} {} = {}", section.name(), key.name(), key.value());
//!     }
//! }
//!
//! assert_eq!(tree.into_document(), doc);
//! ```

use crate::{Document, Entry, Section, Value, ValueKind};
use std::iter::FusedIterator;

/// A read-only wrapper that owns a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    document: Document,
}

impl Tree {
    /// Wraps `document` for iteration.
    #[must_use]
    pub fn new(document: Document) -> Self {
        tracing::debug!(
            sections = document.section_count(),
            keys = document.len(),
            "Tree view created"
        );
        Tree { document }
    }

    /// Consumes the view and returns the document it wrapped.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns a cursor over all sections, global first.
    pub fn sections(&self) -> SectionIter<'_> {
        self.document.sections()
    }

    #[must_use]
    pub fn section(&self, name: Option<&str>) -> Option<&Section> {
        self.document.section(name)
    }

    /// See [`Document::get_entry`].
    #[must_use]
    pub fn get_entry(&self, section: Option<&str>, key: &str) -> Option<(&Entry, Value)> {
        self.document.get_entry(section, key)
    }
}

impl From<Document> for Tree {
    fn from(document: Document) -> Self {
        Tree::new(document)
    }
}

impl From<Tree> for Document {
    fn from(tree: Tree) -> Self {
        tree.into_document()
    }
}

/// Forward-only cursor over the sections of a document.
///
/// # Examples
///
/// ```rust
/// use inidoc::Document;
///
/// let doc = Document::new();
/// let mut sections = doc.sections();
///
/// let global = sections.next_owned().unwrap();
/// assert!(global.is_global());
/// assert!(global.is_empty());
///
/// assert!(sections.next_borrowed().is_none());
/// assert!(sections.next_borrowed().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SectionIter<'a> {
    document: &'a Document,
    position: usize,
}

impl<'a> SectionIter<'a> {
    pub(crate) fn new(document: &'a Document) -> Self {
        SectionIter {
            document,
            position: 0,
        }
    }

    /// Advances and returns a reference valid until the next advance.
    pub fn next_borrowed(&mut self) -> Option<&Section> {
        self.next()
    }

    /// Advances and returns an independent copy of the section.
    pub fn next_owned(&mut self) -> Option<Section> {
        self.next().cloned()
    }

    /// Returns `true` once every section has been yielded.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.document.section_count()
    }
}

impl<'a> Iterator for SectionIter<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<&'a Section> {
        let section = self.document.section_at(self.position)?;
        self.position += 1;
        Some(section)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.document.section_count().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SectionIter<'_> {}

impl FusedIterator for SectionIter<'_> {}

/// Forward-only cursor over the keys of one section, in source order.
#[derive(Debug, Clone)]
pub struct KeyIter<'a> {
    section: &'a Section,
    position: usize,
}

impl<'a> KeyIter<'a> {
    pub(crate) fn new(section: &'a Section) -> Self {
        KeyIter {
            section,
            position: 0,
        }
    }

    /// Advances and returns a view valid until the next advance.
    pub fn next_borrowed(&mut self) -> Option<KeyRef<'_>> {
        self.next()
    }

    /// Advances and returns an independent copy of the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::parse_str;
    ///
    /// let doc = parse_str("[s]\nk = v\n").unwrap();
    /// let section = doc.section(Some("s")).unwrap();
    ///
    /// let mut keys = section.keys();
    /// let key = keys.next_owned().unwrap();
    /// assert!(keys.next_owned().is_none());
    ///
    /// drop(keys);
    /// assert_eq!(key.section(), Some("s"));
    /// assert_eq!(key.name(), "k");
    /// assert_eq!(key.entry().raw(), "v");
    /// ```
    pub fn next_owned(&mut self) -> Option<Key> {
        self.next().map(|key| key.to_key())
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.section.len()
    }
}

impl<'a> Iterator for KeyIter<'a> {
    type Item = KeyRef<'a>;

    fn next(&mut self) -> Option<KeyRef<'a>> {
        let (name, entry) = self.section.entries().get_index(self.position)?;
        self.position += 1;
        Some(KeyRef {
            section: self.section.name(),
            name,
            entry,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.section.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for KeyIter<'_> {}

impl FusedIterator for KeyIter<'_> {}

/// A borrowed key: its section, name and entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRef<'a> {
    section: Option<&'a str>,
    name: &'a str,
    entry: &'a Entry,
}

impl<'a> KeyRef<'a> {
    #[must_use]
    pub fn section(&self) -> Option<&'a str> {
        self.section
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[must_use]
    pub fn entry(&self) -> &'a Entry {
        self.entry
    }

    /// The entry's preferred typed value.
    #[must_use]
    pub fn value(&self) -> Value {
        self.entry.value()
    }

    #[must_use]
    pub fn coerce(&self, kind: ValueKind) -> Option<Value> {
        self.entry.coerce(kind)
    }

    /// Copies the key out of the document.
    #[must_use]
    pub fn to_key(&self) -> Key {
        Key {
            section: self.section.map(str::to_string),
            name: self.name.to_string(),
            entry: self.entry.clone(),
        }
    }
}

/// An owned key, independent of the document it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    section: Option<String>,
    name: String,
    entry: Entry,
}

impl Key {
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    #[must_use]
    pub fn value(&self) -> Value {
        self.entry.value()
    }

    #[must_use]
    pub fn coerce(&self, kind: ValueKind) -> Option<Value> {
        self.entry.coerce(kind)
    }

    /// Splits the key into its name and entry.
    #[must_use]
    pub fn into_parts(self) -> (String, Entry) {
        (self.name, self.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.insert(None, "top", Entry::new("1"));
        doc.insert(Some("a"), "x", Entry::new("yes"));
        doc.insert(Some("a"), "y", Entry::new("'str'"));
        doc.insert(Some("b"), "z", Entry::new("2.5"));
        doc
    }

    #[test]
    fn test_sections_in_order_then_exhausted() {
        let doc = sample();
        let mut sections = doc.sections();
        assert_eq!(sections.len(), 3);

        assert_eq!(sections.next_borrowed().map(Section::name), Some(None));
        assert_eq!(sections.next_borrowed().map(Section::name), Some(Some("a")));
        assert_eq!(sections.next_owned().map(|s| s.name().map(String::from)), Some(Some("b".into())));
        assert!(sections.is_exhausted());

        for _ in 0..3 {
            assert!(sections.next_borrowed().is_none());
            assert!(sections.next_owned().is_none());
        }
    }

    #[test]
    fn test_owned_section_outlives_cursor() {
        let doc = sample();
        let owned = {
            let mut sections = doc.sections();
            sections.next();
            sections.next_owned().unwrap()
        };
        assert_eq!(owned.name(), Some("a"));
        assert_eq!(owned.len(), 2);
    }

    #[test]
    fn test_keys_past_exhaustion() {
        let doc = sample();
        let section = doc.section(Some("a")).unwrap();
        let mut keys = section.keys();

        let first = keys.next_borrowed().map(|k| (k.name().to_string(), k.value()));
        assert_eq!(first, Some(("x".to_string(), Value::Boolean(true))));
        let second = keys.next_owned().unwrap();
        assert_eq!(second.value(), Value::String("str".to_string()));
        assert_eq!(second.section(), Some("a"));

        for _ in 0..3 {
            assert!(keys.next_borrowed().is_none());
        }
        assert!(keys.is_exhausted());
    }

    #[test]
    fn test_iterator_items_outlive_cursor() {
        let doc = sample();
        let keys: Vec<KeyRef<'_>> = doc.section(Some("a")).unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].coerce(ValueKind::Raw), Some(Value::Raw("'str'".into())));
    }

    #[test]
    fn test_tree_round_trip() {
        let doc = sample();
        let tree = Tree::from(doc.clone());
        assert_eq!(tree.sections().count(), 3);
        assert_eq!(
            tree.get_entry(Some("b"), "z").map(|(_, v)| v),
            Some(Value::Float(2.5))
        );
        assert_eq!(Document::from(tree), doc);
    }

    #[test]
    fn test_key_into_parts() {
        let doc = sample();
        let key = doc.global().keys().next_owned().unwrap();
        let (name, entry) = key.into_parts();
        assert_eq!(name, "top");
        assert_eq!(entry.as_u64(), Some(1));
    }
}
