//! FFI-safe type definitions
//!
//! Everything here has a stable C layout and mirrors a declaration in
//! `include/inidoc.h`.

use std::os::raw::{c_char, c_int};
use std::ptr;

use crate::{ErrorKind, ValueKind};

/// Error categories at the C boundary
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IniErrorKind {
    /// No error
    None = 0,
    /// Malformed input
    Parse = 1,
    /// File could not be read
    Io = 2,
    /// Invalid argument, invalid handle or caught panic
    Runtime = 3,
}

impl From<ErrorKind> for IniErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::None => IniErrorKind::None,
            ErrorKind::Parse => IniErrorKind::Parse,
            ErrorKind::Io => IniErrorKind::Io,
            ErrorKind::Runtime => IniErrorKind::Runtime,
        }
    }
}

/// An error returned by value. `msg` is owned by the error and released by
/// `inidoc_error_free`; it is null for `None`.
#[repr(C)]
#[derive(Debug)]
pub struct IniError {
    pub kind: IniErrorKind,
    pub msg: *mut c_char,
}

/// Value variants at the C boundary
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IniValueType {
    Raw = 0,
    String = 1,
    Integer = 2,
    Float = 3,
    Boolean = 4,
}

impl IniValueType {
    /// Converts an integer received from C, rejecting unknown tags.
    pub fn from_raw(raw: c_int) -> Option<Self> {
        match raw {
            0 => Some(IniValueType::Raw),
            1 => Some(IniValueType::String),
            2 => Some(IniValueType::Integer),
            3 => Some(IniValueType::Float),
            4 => Some(IniValueType::Boolean),
            _ => None,
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            IniValueType::Raw => ValueKind::Raw,
            IniValueType::String => ValueKind::String,
            IniValueType::Integer => ValueKind::Integer,
            IniValueType::Float => ValueKind::Float,
            IniValueType::Boolean => ValueKind::Boolean,
        }
    }
}

impl From<ValueKind> for IniValueType {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Raw => IniValueType::Raw,
            ValueKind::String => IniValueType::String,
            ValueKind::Integer => IniValueType::Integer,
            ValueKind::Float => IniValueType::Float,
            ValueKind::Boolean => IniValueType::Boolean,
        }
    }
}

/// Payload of an [`IniEntry`], selected by its `value_type`
#[repr(C)]
#[derive(Clone, Copy)]
pub union IniValueData {
    /// `Raw` and `String`; owned by the entry
    pub text: *mut c_char,
    pub integer: u64,
    pub float_: f64,
    pub boolean: bool,
}

/// A typed entry written into caller-provided storage by the lookup
/// functions. Its strings are released by `inidoc_entry_free`.
#[repr(C)]
pub struct IniEntry {
    /// Source text, quotes included
    pub raw: *mut c_char,
    pub quoted: bool,
    pub value_type: IniValueType,
    pub value: IniValueData,
}

impl IniEntry {
    /// An entry holding nothing. Releasing it is a no-op.
    pub fn empty() -> Self {
        IniEntry {
            raw: ptr::null_mut(),
            quoted: false,
            value_type: IniValueType::Raw,
            value: IniValueData {
                text: ptr::null_mut(),
            },
        }
    }
}

/// Opaque handle for a parser
#[repr(C)]
pub struct IniParser {
    _private: [u8; 0],
}

/// Opaque handle for a document
#[repr(C)]
pub struct IniDocument {
    _private: [u8; 0],
}

/// Opaque handle for a read-only tree view
#[repr(C)]
pub struct IniTree {
    _private: [u8; 0],
}

/// Opaque handle for a section iterator
#[repr(C)]
pub struct IniSectionIter {
    _private: [u8; 0],
}

/// Opaque handle for a section, borrowed or owned
#[repr(C)]
pub struct IniSection {
    _private: [u8; 0],
}

/// Opaque handle for a key iterator
#[repr(C)]
pub struct IniKeyIter {
    _private: [u8; 0],
}

/// Opaque handle for a key, borrowed or owned
#[repr(C)]
pub struct IniKey {
    _private: [u8; 0],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_from_raw() {
        assert_eq!(IniValueType::from_raw(2), Some(IniValueType::Integer));
        assert_eq!(IniValueType::from_raw(5), None);
        assert_eq!(IniValueType::from_raw(-1), None);
        for kind in ValueKind::PRECEDENCE {
            assert_eq!(IniValueType::from(kind).kind(), kind);
        }
    }

    #[test]
    fn test_error_kind_discriminants() {
        assert_eq!(IniErrorKind::None as c_int, 0);
        assert_eq!(IniErrorKind::from(ErrorKind::Io) as c_int, 2);
    }
}
