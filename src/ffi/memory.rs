//! String transfer across the boundary.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::{Error, Result};

/// Builds a C string, cutting `s` at its first NUL.
pub fn to_c_string(s: &str) -> CString {
    let end = s.find('\0').unwrap_or(s.len());
    CString::new(&s[..end]).unwrap_or_default()
}

/// Allocates a C string the caller must hand back to [`free_string`].
pub fn allocate_string(s: &str) -> *mut c_char {
    to_c_string(s).into_raw()
}

/// Releases a string from [`allocate_string`]. Null is ignored.
///
/// # Safety
/// `s` must be null or come from [`allocate_string`] and not be freed yet.
pub unsafe fn free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    drop(CString::from_raw(s));
}

/// Borrows a required C string argument as UTF-8.
///
/// # Safety
/// `s` must be null or point to a NUL-terminated string that outlives `'a`.
pub unsafe fn c_str_to_str<'a>(s: *const c_char, name: &str) -> Result<&'a str> {
    if s.is_null() {
        return Err(Error::runtime(format!("{} is null", name)));
    }
    CStr::from_ptr(s)
        .to_str()
        .map_err(|_| Error::runtime(format!("{} is not valid UTF-8", name)))
}

/// Like [`c_str_to_str`], but null maps to `None`.
///
/// # Safety
/// Same as [`c_str_to_str`].
pub unsafe fn optional_c_str<'a>(s: *const c_char, name: &str) -> Result<Option<&'a str>> {
    if s.is_null() {
        Ok(None)
    } else {
        c_str_to_str(s, name).map(Some)
    }
}

/// Pointer to a cached C string, or null.
pub fn as_ptr_or_null(s: Option<&CString>) -> *const c_char {
    s.map_or(ptr::null(), |s| s.as_ptr())
}
