//! Driving the C interface from Rust, exactly as `print_tree.c` does from C.
//!
//! Run with: cargo run --example c_boundary -- [path]

use inidoc::ffi::*;
use std::error::Error;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;
use tracing_subscriber::EnvFilter;

unsafe fn show(ptr: *const c_char) -> String {
    if ptr.is_null() {
        "(global)".to_string()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

unsafe fn describe(entry: &IniEntry) -> String {
    match entry.value_type {
        IniValueType::Raw | IniValueType::String => show(entry.value.text),
        IniValueType::Integer => entry.value.integer.to_string(),
        IniValueType::Float => entry.value.float_.to_string(),
        IniValueType::Boolean => entry.value.boolean.to_string(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/sample.ini".to_string());
    let path = CString::new(path)?;

    unsafe {
        let parser = inidoc_parser_new();
        let mut document = ptr::null_mut();
        let mut error = inidoc_parser_parse_file(parser, path.as_ptr(), &mut document);
        if error.kind != IniErrorKind::None {
            let message = show(error.msg);
            inidoc_error_free(&mut error);
            return Err(message.into());
        }

        let tree = inidoc_tree_from_document(document);
        let sections = inidoc_section_iter_new(tree);
        loop {
            let section = inidoc_section_iter_next(sections);
            if section.is_null() {
                break;
            }
            println!(
                "{} ({} keys)",
                show(inidoc_section_name(section)),
                inidoc_section_len(section)
            );

            let keys = inidoc_key_iter_new(section);
            loop {
                let key = inidoc_key_iter_next(keys);
                if key.is_null() {
                    break;
                }
                let mut entry = IniEntry::empty();
                if inidoc_key_entry(key, &mut entry) {
                    println!(
                        "  {} = {} ({:?})",
                        show(inidoc_key_name(key)),
                        describe(&entry),
                        entry.value_type
                    );
                    inidoc_entry_free(&mut entry);
                }
            }
            inidoc_key_iter_free(keys);
        }
        inidoc_section_iter_free(sections);

        // Give the document back and ask for one value as a fixed type
        let document = inidoc_tree_into_document(tree);
        let section = CString::new("server")?;
        let key = CString::new("port")?;
        let mut entry = IniEntry::empty();
        if inidoc_get_entry_as(
            document,
            section.as_ptr(),
            key.as_ptr(),
            IniValueType::Float as c_int,
            &mut entry,
        ) {
            println!("\nserver.port as float: {}", entry.value.float_);
            inidoc_entry_free(&mut entry);
        }
        inidoc_document_free(document);
    }
    Ok(())
}
