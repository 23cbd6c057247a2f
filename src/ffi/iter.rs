//! Tree views, cursors, sections and keys.
//!
//! Handle lifetimes:
//!
//! - a tree owns its document until `inidoc_tree_into_document` gives it
//!   back or `inidoc_tree_free` drops it
//! - a cursor must not outlive the tree (or section) it walks
//! - a handle from `*_next` is borrowed: it stays valid until the next call
//!   on its cursor or until the cursor is freed, and must not be freed
//! - a handle from `*_next_owned` is independent and must be freed

use std::os::raw::{c_char, c_int};
use std::ptr;

use super::api::{check_out, fill_coerced, requested_kind, write_entry};
use super::error::ffi_boundary;
use super::handles::{
    handle_mut, handle_ref, into_handle, take_handle, KeyCursor, KeyHandle, SectionCursor,
    SectionHandle,
};
use super::types::{IniDocument, IniEntry, IniKey, IniKeyIter, IniSection, IniSectionIter, IniTree};
use crate::{Document, Tree};

/// Wraps a document in a read-only tree, taking ownership of it.
///
/// Returns null on failure; the document is then still owned by the caller.
///
/// # Safety
/// `document` must be null or a live document handle. On success it is
/// invalid afterwards.
#[no_mangle]
pub unsafe extern "C" fn inidoc_tree_from_document(document: *mut IniDocument) -> *mut IniTree {
    ffi_boundary!("inidoc_tree_from_document", ptr::null_mut(), {
        let document = take_handle::<Document, _>(document, "document")?;
        Ok(into_handle::<_, IniTree>(Tree::new(*document)))
    })
}

/// Dismantles a tree and returns ownership of its document.
///
/// # Safety
/// `tree` must be null or a live tree handle; it is invalid afterwards, and
/// so are all cursors and borrowed handles taken from it.
#[no_mangle]
pub unsafe extern "C" fn inidoc_tree_into_document(tree: *mut IniTree) -> *mut IniDocument {
    ffi_boundary!("inidoc_tree_into_document", ptr::null_mut(), {
        let tree = take_handle::<Tree, _>(tree, "tree")?;
        Ok(into_handle::<_, IniDocument>(tree.into_document()))
    })
}

/// Releases a tree and its document. Null is ignored.
///
/// # Safety
/// `tree` must be null or a live tree handle.
#[no_mangle]
pub unsafe extern "C" fn inidoc_tree_free(tree: *mut IniTree) {
    if tree.is_null() {
        return;
    }
    drop(Box::from_raw(tree as *mut Tree));
}

/// Starts a cursor over the sections of `tree`, global section first.
///
/// # Safety
/// `tree` must be a live tree handle that outlives the cursor.
#[no_mangle]
pub unsafe extern "C" fn inidoc_section_iter_new(tree: *const IniTree) -> *mut IniSectionIter {
    ffi_boundary!("inidoc_section_iter_new", ptr::null_mut(), {
        let tree = handle_ref::<Tree, _>(tree, "tree")?;
        Ok(into_handle::<_, IniSectionIter>(SectionCursor::new(tree)))
    })
}

/// Advances and returns a borrowed section, or null once exhausted.
///
/// # Safety
/// `iter` must be a live section cursor whose tree is still alive.
#[no_mangle]
pub unsafe extern "C" fn inidoc_section_iter_next(iter: *mut IniSectionIter) -> *const IniSection {
    ffi_boundary!("inidoc_section_iter_next", ptr::null(), {
        let cursor = handle_mut::<SectionCursor, _>(iter, "iter")?;
        Ok(cursor.next_borrowed() as *const IniSection)
    })
}

/// Advances and returns an owned copy of the section, or null once
/// exhausted. Release it with `inidoc_section_free`.
///
/// # Safety
/// Same as `inidoc_section_iter_next`.
#[no_mangle]
pub unsafe extern "C" fn inidoc_section_iter_next_owned(iter: *mut IniSectionIter) -> *mut IniSection {
    ffi_boundary!("inidoc_section_iter_next_owned", ptr::null_mut(), {
        let cursor = handle_mut::<SectionCursor, _>(iter, "iter")?;
        Ok(cursor
            .next_owned()
            .map_or(ptr::null_mut(), into_handle::<_, IniSection>))
    })
}

/// Releases a section cursor and its borrowed slot. Null is ignored.
///
/// # Safety
/// `iter` must be null or a live section cursor.
#[no_mangle]
pub unsafe extern "C" fn inidoc_section_iter_free(iter: *mut IniSectionIter) {
    if iter.is_null() {
        return;
    }
    drop(Box::from_raw(iter as *mut SectionCursor));
}

/// The section name, or null for the global section. The string belongs to
/// the section handle.
///
/// # Safety
/// `section` must be null or a valid section handle.
#[no_mangle]
pub unsafe extern "C" fn inidoc_section_name(section: *const IniSection) -> *const c_char {
    ffi_boundary!("inidoc_section_name", ptr::null(), {
        let handle = handle_ref::<SectionHandle, _>(section, "section")?;
        Ok(handle.name_ptr())
    })
}

/// Number of keys in the section; 0 for null.
///
/// # Safety
/// `section` must be null or a valid section handle.
#[no_mangle]
pub unsafe extern "C" fn inidoc_section_len(section: *const IniSection) -> usize {
    ffi_boundary!("inidoc_section_len", 0, {
        let handle = handle_ref::<SectionHandle, _>(section, "section")?;
        Ok(handle.section().len())
    })
}

/// Releases an owned section. Borrowed sections and null are ignored.
///
/// # Safety
/// `section` must be null or a valid section handle.
#[no_mangle]
pub unsafe extern "C" fn inidoc_section_free(section: *mut IniSection) {
    if section.is_null() {
        return;
    }
    if !(*(section as *const SectionHandle)).is_owned() {
        tracing::debug!("Ignoring release of a borrowed section");
        return;
    }
    drop(Box::from_raw(section as *mut SectionHandle));
}

/// Starts a cursor over the keys of `section`, in source order.
///
/// # Safety
/// `section` must be a valid section handle that outlives the cursor.
#[no_mangle]
pub unsafe extern "C" fn inidoc_key_iter_new(section: *const IniSection) -> *mut IniKeyIter {
    ffi_boundary!("inidoc_key_iter_new", ptr::null_mut(), {
        let handle = handle_ref::<SectionHandle, _>(section, "section")?;
        Ok(into_handle::<_, IniKeyIter>(KeyCursor::new(handle.section())))
    })
}

/// Advances and returns a borrowed key, or null once exhausted.
///
/// # Safety
/// `iter` must be a live key cursor whose section is still valid.
#[no_mangle]
pub unsafe extern "C" fn inidoc_key_iter_next(iter: *mut IniKeyIter) -> *const IniKey {
    ffi_boundary!("inidoc_key_iter_next", ptr::null(), {
        let cursor = handle_mut::<KeyCursor, _>(iter, "iter")?;
        Ok(cursor.next_borrowed() as *const IniKey)
    })
}

/// Advances and returns an owned copy of the key, or null once exhausted.
/// Release it with `inidoc_key_free`.
///
/// # Safety
/// Same as `inidoc_key_iter_next`.
#[no_mangle]
pub unsafe extern "C" fn inidoc_key_iter_next_owned(iter: *mut IniKeyIter) -> *mut IniKey {
    ffi_boundary!("inidoc_key_iter_next_owned", ptr::null_mut(), {
        let cursor = handle_mut::<KeyCursor, _>(iter, "iter")?;
        Ok(cursor
            .next_owned()
            .map_or(ptr::null_mut(), into_handle::<_, IniKey>))
    })
}

/// Releases a key cursor and its borrowed slot. Null is ignored.
///
/// # Safety
/// `iter` must be null or a live key cursor.
#[no_mangle]
pub unsafe extern "C" fn inidoc_key_iter_free(iter: *mut IniKeyIter) {
    if iter.is_null() {
        return;
    }
    drop(Box::from_raw(iter as *mut KeyCursor));
}

/// The key name. The string belongs to the key handle.
///
/// # Safety
/// `key` must be null or a valid key handle.
#[no_mangle]
pub unsafe extern "C" fn inidoc_key_name(key: *const IniKey) -> *const c_char {
    ffi_boundary!("inidoc_key_name", ptr::null(), {
        let handle = handle_ref::<KeyHandle, _>(key, "key")?;
        Ok(handle.name_ptr())
    })
}

/// Writes the key's preferred typed value into `*out`.
///
/// # Safety
/// `key` must be a valid key handle and `out` writable.
#[no_mangle]
pub unsafe extern "C" fn inidoc_key_entry(key: *const IniKey, out: *mut IniEntry) -> bool {
    ffi_boundary!("inidoc_key_entry", false, {
        let handle = handle_ref::<KeyHandle, _>(key, "key")?;
        check_out(out)?;
        let entry = handle.entry();
        write_entry(out, entry, entry.value());
        Ok(true)
    })
}

/// Writes the key's value read as exactly `value_type` into `*out`, or
/// returns false.
///
/// # Safety
/// `key` must be a valid key handle and `out` writable.
#[no_mangle]
pub unsafe extern "C" fn inidoc_key_entry_as(
    key: *const IniKey,
    value_type: c_int,
    out: *mut IniEntry,
) -> bool {
    ffi_boundary!("inidoc_key_entry_as", false, {
        let handle = handle_ref::<KeyHandle, _>(key, "key")?;
        let kind = requested_kind(value_type)?;
        check_out(out)?;
        Ok(fill_coerced(out, handle.entry(), kind))
    })
}

/// Releases an owned key. Borrowed keys and null are ignored.
///
/// # Safety
/// `key` must be null or a valid key handle.
#[no_mangle]
pub unsafe extern "C" fn inidoc_key_free(key: *mut IniKey) {
    if key.is_null() {
        return;
    }
    if !(*(key as *const KeyHandle)).is_owned() {
        tracing::debug!("Ignoring release of a borrowed key");
        return;
    }
    drop(Box::from_raw(key as *mut KeyHandle));
}
