//! The Rust objects behind the opaque C handles.
//!
//! A section or key handle is either *borrowed* or *owned*. A borrowed handle
//! lives in its iterator's slot and points into the tree; the next advance or
//! freeing the iterator replaces it. An owned handle is a boxed copy that the
//! caller frees. Freeing a borrowed handle is ignored so that a slot is never
//! released twice.

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use super::memory::{as_ptr_or_null, to_c_string};
use crate::{Entry, Error, Result, Section, Tree};

/// Boxes `value` and returns it as the opaque handle type `H`.
pub fn into_handle<T, H>(value: T) -> *mut H {
    Box::into_raw(Box::new(value)) as *mut H
}

/// Borrows the object behind a handle.
///
/// # Safety
/// `handle` must be null or come from [`into_handle`] with the same `T`.
pub unsafe fn handle_ref<'a, T, H>(handle: *const H, name: &str) -> Result<&'a T> {
    if handle.is_null() {
        return Err(Error::runtime(format!("{} is null", name)));
    }
    Ok(&*(handle as *const T))
}

/// Mutably borrows the object behind a handle.
///
/// # Safety
/// Same as [`handle_ref`], and no other reference to the object may be live.
pub unsafe fn handle_mut<'a, T, H>(handle: *mut H, name: &str) -> Result<&'a mut T> {
    if handle.is_null() {
        return Err(Error::runtime(format!("{} is null", name)));
    }
    Ok(&mut *(handle as *mut T))
}

/// Takes ownership of the object behind a handle.
///
/// # Safety
/// Same as [`handle_ref`]; the handle is invalid afterwards.
pub unsafe fn take_handle<T, H>(handle: *mut H, name: &str) -> Result<Box<T>> {
    if handle.is_null() {
        return Err(Error::runtime(format!("{} is null", name)));
    }
    Ok(Box::from_raw(handle as *mut T))
}

/// Either a pointer into a live tree or an independent copy.
pub enum Held<T> {
    Borrowed(*const T),
    Owned(T),
}

impl<T> Held<T> {
    /// # Safety
    /// A borrowed pointer must still point into a live tree.
    pub unsafe fn get(&self) -> &T {
        match self {
            Held::Borrowed(ptr) => &**ptr,
            Held::Owned(value) => value,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Held::Owned(_))
    }
}

/// What an `IniSection*` points to.
pub struct SectionHandle {
    held: Held<Section>,
    name: Option<CString>,
}

impl SectionHandle {
    pub fn borrowed(section: &Section) -> Self {
        SectionHandle {
            name: section.name().map(to_c_string),
            held: Held::Borrowed(section),
        }
    }

    pub fn owned(section: Section) -> Self {
        SectionHandle {
            name: section.name().map(to_c_string),
            held: Held::Owned(section),
        }
    }

    /// # Safety
    /// See [`Held::get`].
    pub unsafe fn section(&self) -> &Section {
        self.held.get()
    }

    /// The cached name, or null for the global section.
    pub fn name_ptr(&self) -> *const c_char {
        as_ptr_or_null(self.name.as_ref())
    }

    pub fn is_owned(&self) -> bool {
        self.held.is_owned()
    }
}

/// What an `IniKey*` points to.
pub struct KeyHandle {
    held: Held<Entry>,
    name: CString,
}

impl KeyHandle {
    pub fn borrowed(name: &str, entry: &Entry) -> Self {
        KeyHandle {
            held: Held::Borrowed(entry),
            name: to_c_string(name),
        }
    }

    pub fn owned(name: &str, entry: Entry) -> Self {
        KeyHandle {
            held: Held::Owned(entry),
            name: to_c_string(name),
        }
    }

    /// # Safety
    /// See [`Held::get`].
    pub unsafe fn entry(&self) -> &Entry {
        self.held.get()
    }

    pub fn name_ptr(&self) -> *const c_char {
        self.name.as_ptr()
    }

    pub fn is_owned(&self) -> bool {
        self.held.is_owned()
    }
}

/// What an `IniSectionIter*` points to.
pub struct SectionCursor {
    tree: *const Tree,
    position: usize,
    current: Option<SectionHandle>,
}

impl SectionCursor {
    pub fn new(tree: &Tree) -> Self {
        SectionCursor {
            tree,
            position: 0,
            current: None,
        }
    }

    /// Moves past the next section. Any borrowed handle is released first.
    ///
    /// # Safety
    /// The tree the cursor was created from must still be alive.
    unsafe fn advance<'t>(&mut self) -> Option<&'t Section> {
        self.current = None;
        let tree: &'t Tree = &*self.tree;
        let section = tree.document().section_at(self.position)?;
        self.position += 1;
        Some(section)
    }

    /// # Safety
    /// See [`SectionCursor::advance`].
    pub unsafe fn next_borrowed(&mut self) -> *const SectionHandle {
        match self.advance() {
            Some(section) => {
                let slot = self.current.insert(SectionHandle::borrowed(section));
                slot as *const SectionHandle
            }
            None => ptr::null(),
        }
    }

    /// # Safety
    /// See [`SectionCursor::advance`].
    pub unsafe fn next_owned(&mut self) -> Option<SectionHandle> {
        self.advance()
            .map(|section| SectionHandle::owned(section.clone()))
    }
}

/// What an `IniKeyIter*` points to.
pub struct KeyCursor {
    section: *const Section,
    position: usize,
    current: Option<KeyHandle>,
}

impl KeyCursor {
    pub fn new(section: &Section) -> Self {
        KeyCursor {
            section,
            position: 0,
            current: None,
        }
    }

    /// # Safety
    /// The section the cursor was created from must still be alive.
    unsafe fn advance<'s>(&mut self) -> Option<(&'s String, &'s Entry)> {
        self.current = None;
        let section: &'s Section = &*self.section;
        let key = section.entries().get_index(self.position)?;
        self.position += 1;
        Some(key)
    }

    /// # Safety
    /// See [`KeyCursor::advance`].
    pub unsafe fn next_borrowed(&mut self) -> *const KeyHandle {
        match self.advance() {
            Some((name, entry)) => {
                let slot = self.current.insert(KeyHandle::borrowed(name, entry));
                slot as *const KeyHandle
            }
            None => ptr::null(),
        }
    }

    /// # Safety
    /// See [`KeyCursor::advance`].
    pub unsafe fn next_owned(&mut self) -> Option<KeyHandle> {
        self.advance()
            .map(|(name, entry)| KeyHandle::owned(name, entry.clone()))
    }
}
