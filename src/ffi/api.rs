//! Parsing, documents and typed lookup.

use std::os::raw::{c_char, c_int};
use std::ptr;

use super::error::{catch_panic, ffi_boundary};
use super::handles::{handle_ref, into_handle, take_handle};
use super::memory::{allocate_string, c_str_to_str, free_string, optional_c_str};
use super::types::{IniDocument, IniEntry, IniError, IniParser, IniValueData, IniValueType};
use crate::{Document, Entry, Error, Parser, Result, Value};

/// Creates a parser with default options.
///
/// # Safety
/// The parser must be released with `inidoc_parser_free`, or consumed by
/// `inidoc_parser_into_document` or `inidoc_parser_parse_str`.
#[no_mangle]
pub unsafe extern "C" fn inidoc_parser_new() -> *mut IniParser {
    ffi_boundary!("inidoc_parser_new", ptr::null_mut(), {
        Ok(into_handle::<_, IniParser>(Parser::new()))
    })
}

/// Releases a parser. Null is ignored.
///
/// # Safety
/// `parser` must be null or a live parser handle.
#[no_mangle]
pub unsafe extern "C" fn inidoc_parser_free(parser: *mut IniParser) {
    if parser.is_null() {
        return;
    }
    drop(Box::from_raw(parser as *mut Parser));
}

/// Consumes a parser and returns its document: the empty document when
/// nothing was parsed. Returns null when `parser` is null.
///
/// # Safety
/// `parser` must be null or a live parser handle; it is invalid afterwards.
#[no_mangle]
pub unsafe extern "C" fn inidoc_parser_into_document(parser: *mut IniParser) -> *mut IniDocument {
    ffi_boundary!("inidoc_parser_into_document", ptr::null_mut(), {
        let parser = take_handle::<Parser, _>(parser, "parser")?;
        Ok(into_handle::<_, IniDocument>(parser.into_document()))
    })
}

/// Consumes a parser, parses `text` and stores the document in `*out`.
///
/// When an argument is null nothing is consumed. Otherwise the parser is
/// consumed whether or not parsing succeeds. On failure `*out` is null.
///
/// # Safety
/// `parser` must be a live parser handle, `text` a NUL-terminated string and
/// `out` writable.
#[no_mangle]
pub unsafe extern "C" fn inidoc_parser_parse_str(
    parser: *mut IniParser,
    text: *const c_char,
    out: *mut *mut IniDocument,
) -> IniError {
    let result = catch_panic("inidoc_parser_parse_str", || {
        let bytes = c_bytes(text, "text")?;
        check_out(out)?;
        let parser = take_handle::<Parser, _>(parser, "parser")?;
        parser.parse(crate::decode(bytes)?)
    });
    deliver_document(out, result)
}

/// Consumes a parser, reads and parses the file at `path` and stores the
/// document in `*out`. A missing or unreadable file is an `Io` error.
///
/// Null arguments consume nothing, as for `inidoc_parser_parse_str`.
///
/// # Safety
/// `parser` must be a live parser handle, `path` a NUL-terminated string and
/// `out` writable.
#[no_mangle]
pub unsafe extern "C" fn inidoc_parser_parse_file(
    parser: *mut IniParser,
    path: *const c_char,
    out: *mut *mut IniDocument,
) -> IniError {
    let result = catch_panic("inidoc_parser_parse_file", || {
        let path = c_str_to_str(path, "path")?;
        check_out(out)?;
        let parser = take_handle::<Parser, _>(parser, "parser")?;
        parser.parse_file(path)
    });
    deliver_document(out, result)
}

/// Parses `text` with default options and stores the document in `*out`.
///
/// # Safety
/// `text` must be a NUL-terminated string and `out` writable.
#[no_mangle]
pub unsafe extern "C" fn inidoc_parse_str(
    text: *const c_char,
    out: *mut *mut IniDocument,
) -> IniError {
    let result = catch_panic("inidoc_parse_str", || crate::parse_bytes(c_bytes(text, "text")?));
    deliver_document(out, result)
}

/// Reads and parses the file at `path`, storing the document in `*out`.
/// A missing or unreadable file is an `Io` error.
///
/// # Safety
/// `path` must be a NUL-terminated string and `out` writable.
#[no_mangle]
pub unsafe extern "C" fn inidoc_parse_file(
    path: *const c_char,
    out: *mut *mut IniDocument,
) -> IniError {
    let result = catch_panic("inidoc_parse_file", || {
        crate::parse_file(c_str_to_str(path, "path")?)
    });
    deliver_document(out, result)
}

/// Releases a document and everything in it. Null is ignored.
///
/// # Safety
/// `document` must be null or a live document handle.
#[no_mangle]
pub unsafe extern "C" fn inidoc_document_free(document: *mut IniDocument) {
    if document.is_null() {
        return;
    }
    drop(Box::from_raw(document as *mut Document));
}

/// Looks up `key` in `section` (null or `""` for the global section) and
/// writes its preferred typed value into `*out`.
///
/// Returns false when the section or key is missing or an argument is
/// invalid; `*out` is untouched then. On success `*out` must be released
/// with `inidoc_entry_free`.
///
/// # Safety
/// `document` must be a live document handle, `key` a NUL-terminated
/// string, `section` null or NUL-terminated and `out` writable.
#[no_mangle]
pub unsafe extern "C" fn inidoc_get_entry(
    document: *const IniDocument,
    section: *const c_char,
    key: *const c_char,
    out: *mut IniEntry,
) -> bool {
    ffi_boundary!("inidoc_get_entry", false, {
        let document = handle_ref::<Document, _>(document, "document")?;
        let section = optional_c_str(section, "section")?;
        let key = c_str_to_str(key, "key")?;
        check_out(out)?;
        Ok(match document.get_entry(section, key) {
            Some((entry, value)) => {
                write_entry(out, entry, value);
                true
            }
            None => false,
        })
    })
}

/// Like `inidoc_get_entry`, but reads the value as exactly `value_type`
/// (an `IniValueType`). Returns false when that conversion fails.
///
/// # Safety
/// Same as `inidoc_get_entry`.
#[no_mangle]
pub unsafe extern "C" fn inidoc_get_entry_as(
    document: *const IniDocument,
    section: *const c_char,
    key: *const c_char,
    value_type: c_int,
    out: *mut IniEntry,
) -> bool {
    ffi_boundary!("inidoc_get_entry_as", false, {
        let document = handle_ref::<Document, _>(document, "document")?;
        let section = optional_c_str(section, "section")?;
        let key = c_str_to_str(key, "key")?;
        let kind = requested_kind(value_type)?;
        check_out(out)?;
        Ok(match document.get(section, key) {
            Some(entry) => fill_coerced(out, entry, kind),
            None => false,
        })
    })
}

/// Releases the strings held by an entry and resets it. Safe to call twice
/// and on a zeroed entry.
///
/// # Safety
/// `entry` must be null or point to an `IniEntry` filled by this library or
/// zero-initialized.
#[no_mangle]
pub unsafe extern "C" fn inidoc_entry_free(entry: *mut IniEntry) {
    if entry.is_null() {
        return;
    }
    let entry = &mut *entry;
    free_string(entry.raw);
    if matches!(entry.value_type, IniValueType::Raw | IniValueType::String) {
        free_string(entry.value.text);
    }
    *entry = IniEntry::empty();
}

/// Writes `entry` read as `value` into caller storage.
///
/// # Safety
/// `out` must be writable.
pub(crate) unsafe fn write_entry(out: *mut IniEntry, entry: &Entry, value: Value) {
    let value_type = IniValueType::from(value.kind());
    let data = match value {
        Value::Raw(text) | Value::String(text) => IniValueData {
            text: allocate_string(&text),
        },
        Value::Integer(integer) => IniValueData { integer },
        Value::Float(float) => IniValueData { float_: float },
        Value::Boolean(boolean) => IniValueData { boolean },
    };
    ptr::write(
        out,
        IniEntry {
            raw: allocate_string(entry.raw()),
            quoted: entry.is_quoted(),
            value_type,
            value: data,
        },
    );
}

/// Writes `entry` coerced to `kind` into `out`, or returns false.
///
/// # Safety
/// `out` must be writable.
pub(crate) unsafe fn fill_coerced(out: *mut IniEntry, entry: &Entry, kind: crate::ValueKind) -> bool {
    match entry.coerce(kind) {
        Some(value) => {
            write_entry(out, entry, value);
            true
        }
        None => false,
    }
}

pub(crate) fn requested_kind(value_type: c_int) -> Result<crate::ValueKind> {
    IniValueType::from_raw(value_type)
        .map(IniValueType::kind)
        .ok_or_else(|| Error::runtime(format!("unknown value type {}", value_type)))
}

pub(crate) fn check_out<T>(out: *mut T) -> Result<()> {
    if out.is_null() {
        Err(Error::runtime("out is null"))
    } else {
        Ok(())
    }
}

unsafe fn c_bytes<'a>(s: *const c_char, name: &str) -> Result<&'a [u8]> {
    if s.is_null() {
        return Err(Error::runtime(format!("{} is null", name)));
    }
    Ok(std::ffi::CStr::from_ptr(s).to_bytes())
}

unsafe fn deliver_document(out: *mut *mut IniDocument, result: Result<Document>) -> IniError {
    if out.is_null() {
        return IniError::from_error(&Error::runtime("out is null"));
    }
    match result {
        Ok(document) => {
            *out = into_handle(document);
            IniError::none()
        }
        Err(error) => {
            *out = ptr::null_mut();
            IniError::from_error(&error)
        }
    }
}
