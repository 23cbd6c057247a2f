//! The in-memory INI document.
//!
//! A [`Document`] is an ordered sequence of [`Section`]s. The unnamed global
//! section always exists and always comes first; it holds the keys written
//! before any `[section]` header. Named sections follow in order of first
//! appearance.
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::{parse_str, Value, ValueKind};
//!
//! let doc = parse_str("name = demo\n[db]\nport = 5432\n").unwrap();
//!
//! let names: Vec<_> = doc.sections().map(|s| s.name()).collect();
//! assert_eq!(names, vec![None, Some("db")]);
//!
//! assert_eq!(doc.lookup(Some("db"), "port", ValueKind::Integer), Some(Value::Integer(5432)));
//! assert_eq!(doc.lookup(None, "name", ValueKind::Integer), None);
//! ```

use crate::tree::{KeyIter, SectionIter};
use crate::{Entry, EntryMap, Value, ValueKind};
use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// A named (or global) group of key/entry bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: Option<String>,
    entries: EntryMap,
}

impl Section {
    /// Creates the empty global section.
    #[must_use]
    pub fn global() -> Self {
        Section {
            name: None,
            entries: EntryMap::new(),
        }
    }

    /// Creates an empty named section.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Section {
            name: Some(name.into()),
            entries: EntryMap::new(),
        }
    }

    /// The section name; `None` for the global section.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn is_global(&self) -> bool {
        self.name.is_none()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn entries(&self) -> &EntryMap {
        &self.entries
    }

    /// Number of keys in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binds `key` to `entry`, returning the entry it replaced.
    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) -> Option<Entry> {
        self.entries.insert(key.into(), entry)
    }

    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        self.entries.remove(key)
    }

    /// Returns a forward-only cursor over this section's keys.
    pub fn keys(&self) -> KeyIter<'_> {
        KeyIter::new(self)
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.entries.iter())
    }
}

/// An ordered collection of sections, owned exclusively by its holder.
///
/// # Examples
///
/// ```rust
/// use inidoc::{Document, Entry};
///
/// let mut doc = Document::new();
/// assert_eq!(doc.section_count(), 1);
/// assert!(doc.is_empty());
///
/// doc.insert(Some("server"), "port", Entry::new("80"));
/// doc.insert(None, "debug", Entry::new("off"));
/// assert_eq!(doc.section_count(), 2);
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    global: Section,
    sections: IndexMap<String, Section>,
}

impl Document {
    /// Creates a document holding only the empty global section.
    #[must_use]
    pub fn new() -> Self {
        Document {
            global: Section::global(),
            sections: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn global(&self) -> &Section {
        &self.global
    }

    /// Finds a section by name. `None` and `Some("")` both mean the global
    /// section.
    #[must_use]
    pub fn section(&self, name: Option<&str>) -> Option<&Section> {
        match normalize(name) {
            None => Some(&self.global),
            Some(name) => self.sections.get(name),
        }
    }

    pub fn section_mut(&mut self, name: Option<&str>) -> Option<&mut Section> {
        match normalize(name) {
            None => Some(&mut self.global),
            Some(name) => self.sections.get_mut(name),
        }
    }

    /// Returns the section at `index`, where index 0 is the global section.
    #[must_use]
    pub fn section_at(&self, index: usize) -> Option<&Section> {
        match index {
            0 => Some(&self.global),
            _ => self.sections.get_index(index - 1).map(|(_, section)| section),
        }
    }

    /// Number of sections, the global section included.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len() + 1
    }

    /// Returns a forward-only cursor over all sections, global first.
    pub fn sections(&self) -> SectionIter<'_> {
        SectionIter::new(self)
    }

    /// Returns the entry bound to `key` in `section`.
    #[must_use]
    pub fn get(&self, section: Option<&str>, key: &str) -> Option<&Entry> {
        self.section(section)?.get(key)
    }

    /// Returns the entry bound to `key` together with its preferred typed
    /// value (see [`Entry::value`]).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::{parse_str, Value};
    ///
    /// let doc = parse_str("author = Ada\n").unwrap();
    /// let (entry, value) = doc.get_entry(None, "author").unwrap();
    /// assert_eq!(entry.raw(), "Ada");
    /// assert_eq!(value, Value::Raw("Ada".to_string()));
    /// assert!(doc.get_entry(Some("missing"), "author").is_none());
    /// ```
    #[must_use]
    pub fn get_entry(&self, section: Option<&str>, key: &str) -> Option<(&Entry, Value)> {
        let entry = self.get(section, key)?;
        Some((entry, entry.value()))
    }

    /// Returns the value bound to `key` read as exactly `kind`.
    #[must_use]
    pub fn lookup(&self, section: Option<&str>, key: &str, kind: ValueKind) -> Option<Value> {
        self.get(section, key)?.coerce(kind)
    }

    /// Binds `key` to `entry` in `section`, creating the section if needed.
    /// Returns the entry it replaced.
    pub fn insert(
        &mut self,
        section: Option<&str>,
        key: impl Into<String>,
        entry: Entry,
    ) -> Option<Entry> {
        self.section_or_insert(section).insert(key, entry)
    }

    /// Removes `key` from `section`. Sections are never removed, even when
    /// they become empty.
    pub fn remove(&mut self, section: Option<&str>, key: &str) -> Option<Entry> {
        self.section_mut(section)?.remove(key)
    }

    /// Total number of keys across all sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.global.len() + self.sections.values().map(Section::len).sum::<usize>()
    }

    /// Returns `true` when no section holds any key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Opens the named section, creating it at the end when it is new.
    /// Returns whether it was created.
    pub(crate) fn open_section(&mut self, name: &str) -> bool {
        if self.sections.contains_key(name) {
            return false;
        }
        self.sections.insert(name.to_string(), Section::named(name));
        true
    }

    /// Returns the named section, appending an empty one if it does not
    /// exist yet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.section_or_insert(Some("empty"));
    /// assert!(doc.section(Some("empty")).unwrap().is_empty());
    /// ```
    pub fn section_or_insert(&mut self, name: Option<&str>) -> &mut Section {
        match normalize(name) {
            None => &mut self.global,
            Some(name) => self
                .sections
                .entry(name.to_string())
                .or_insert_with(|| Section::named(name)),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(name: Option<&str>) -> Option<&str> {
    name.filter(|name| !name.is_empty())
}

struct NamedSections<'a>(&'a IndexMap<String, Section>);

impl Serialize for NamedSections<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Document", 2)?;
        state.serialize_field("global", &self.global)?;
        state.serialize_field("sections", &NamedSections(&self.sections))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_global() {
        let mut doc = Document::new();
        doc.insert(Some(""), "k", Entry::new("v"));
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.get(None, "k").map(Entry::raw), Some("v"));
    }

    #[test]
    fn test_section_at_follows_insertion_order() {
        let mut doc = Document::new();
        doc.insert(Some("b"), "x", Entry::new("1"));
        doc.insert(Some("a"), "y", Entry::new("2"));

        assert!(doc.section_at(0).unwrap().is_global());
        assert_eq!(doc.section_at(1).unwrap().name(), Some("b"));
        assert_eq!(doc.section_at(2).unwrap().name(), Some("a"));
        assert!(doc.section_at(3).is_none());
    }

    #[test]
    fn test_open_section_reports_creation() {
        let mut doc = Document::new();
        assert!(doc.open_section("db"));
        assert!(!doc.open_section("db"));
        assert_eq!(doc.section_count(), 2);
    }

    #[test]
    fn test_remove_keeps_section() {
        let mut doc = Document::new();
        doc.insert(Some("s"), "k", Entry::new("v"));
        assert!(doc.remove(Some("s"), "k").is_some());
        assert!(doc.remove(Some("s"), "k").is_none());
        assert!(doc.remove(Some("nope"), "k").is_none());
        assert!(doc.section(Some("s")).unwrap().is_empty());
    }

    #[test]
    fn test_serialize_shape() {
        let mut doc = Document::new();
        doc.insert(None, "debug", Entry::new("yes"));
        doc.insert(Some("db"), "port", Entry::new("5432"));
        doc.insert(Some("db"), "host", Entry::new("localhost"));

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "global": { "debug": true },
                "sections": { "db": { "port": 5432, "host": "localhost" } }
            })
        );
    }
}
