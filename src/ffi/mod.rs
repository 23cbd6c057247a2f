//! C ABI for the INI document engine.
//!
//! Every object crossing the boundary is an opaque handle with exactly one
//! owner. Functions that take ownership (`*_into_document`,
//! `inidoc_tree_from_document`, `inidoc_parser_parse_str`,
//! `inidoc_parser_parse_file`) invalidate their input handle, unless a null
//! argument rejects the call first. Every release function accepts null, and
//! releasing an error or entry twice is harmless.
//!
//! No state is kept between calls: failures are reported through returned
//! [`IniError`] values, null handles or `false`. A panic inside the library
//! is caught and reported as a `Runtime` error.
//!
//! `build.rs` generates the matching declarations into `include/inidoc.h`.
//!
//! # Safety
//!
//! All exported functions are `unsafe` because they take raw pointers.
//! Callers must:
//! - pass only handles this library created, and never use one after it was
//!   freed or consumed
//! - pass NUL-terminated UTF-8 strings
//! - keep a tree alive while cursors over it exist, and a section alive
//!   while a key cursor over it exists
//! - not free a borrowed section or key, nor use it after its cursor moves
//! - not share handles between threads

mod api;
pub(crate) mod error;
mod handles;
mod iter;
mod memory;
mod types;

pub use api::*;
pub use error::inidoc_error_free;
pub use iter::*;
pub use types::{
    IniDocument, IniEntry, IniError, IniErrorKind, IniKey, IniKeyIter, IniParser, IniSection,
    IniSectionIter, IniTree, IniValueData, IniValueType,
};
