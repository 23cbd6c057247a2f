//! Ordered key map for the contents of one section.
//!
//! [`EntryMap`] wraps an [`IndexMap`] so keys iterate in the order they first
//! appeared in the source text. Re-inserting an existing key replaces its
//! entry but keeps its original position.
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::{Entry, EntryMap};
//!
//! let mut map = EntryMap::new();
//! map.insert("port".to_string(), Entry::new("1"));
//! map.insert("host".to_string(), Entry::new("localhost"));
//! map.insert("port".to_string(), Entry::new("2"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["port", "host"]);
//! assert_eq!(map.get("port").map(|e| e.raw()), Some("2"));
//! ```

use crate::Entry;
use indexmap::IndexMap;

/// An ordered map of key names to entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMap(IndexMap<String, Entry>);

impl EntryMap {
    /// Creates an empty `EntryMap`.
    #[must_use]
    pub fn new() -> Self {
        EntryMap(IndexMap::new())
    }

    /// Inserts a key-entry pair into the map.
    ///
    /// If the map already contained this key, the old entry is returned and
    /// the key keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::{Entry, EntryMap};
    ///
    /// let mut map = EntryMap::new();
    /// assert!(map.insert("key".to_string(), Entry::new("1")).is_none());
    /// assert!(map.insert("key".to_string(), Entry::new("2")).is_some());
    /// ```
    pub fn insert(&mut self, key: String, entry: Entry) -> Option<Entry> {
        self.0.insert(key, entry)
    }

    /// Removes a key, shifting later keys down to keep the order intact.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        self.0.shift_remove(key)
    }

    /// Returns a reference to the entry corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the key and entry at `index` in insertion order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&String, &Entry)> {
        self.0.get_index(index)
    }

    /// Returns the number of keys in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Entry> {
        self.0.keys()
    }

    /// Returns an iterator over the entries of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Entry> {
        self.0.values()
    }

    /// Returns an iterator over the key-entry pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Entry> {
        self.0.iter()
    }
}

impl Default for EntryMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a EntryMap {
    type Item = (&'a String, &'a Entry);
    type IntoIter = indexmap::map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for EntryMap {
    type Item = (String, Entry);
    type IntoIter = indexmap::map::IntoIter<String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Entry)> for EntryMap {
    fn from_iter<T: IntoIterator<Item = (String, Entry)>>(iter: T) -> Self {
        EntryMap(IndexMap::from_iter(iter))
    }
}
