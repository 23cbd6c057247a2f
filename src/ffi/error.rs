//! Error handling for the FFI boundary
//!
//! Errors travel in returned values; the C layer keeps no global error
//! state. Panics are caught before they reach C and reported as `Runtime`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use super::memory::{allocate_string, free_string};
use super::types::{IniError, IniErrorKind};
use crate::{Error, Result};

impl IniError {
    /// The success value.
    pub fn none() -> Self {
        IniError {
            kind: IniErrorKind::None,
            msg: ptr::null_mut(),
        }
    }

    pub fn from_error(error: &Error) -> Self {
        IniError {
            kind: error.kind().into(),
            msg: allocate_string(&error.to_string()),
        }
    }

    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => IniError::none(),
            Err(error) => IniError::from_error(error),
        }
    }
}

/// Runs `f`, turning a panic into [`Error::Runtime`].
pub fn catch_panic<F, R>(name: &str, f: F) -> Result<R>
where
    F: FnOnce() -> Result<R>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(panic_info) => {
            let msg = get_panic_message(&*panic_info);
            tracing::error!(function = name, panic = %msg, "Panic caught at C boundary");
            Err(Error::runtime(format!("panic in {}: {}", name, msg)))
        }
    }
}

fn get_panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}

/// Runs a boundary function body, mapping errors and panics to the fallback
/// value the C signature uses for failure.
macro_rules! ffi_boundary {
    ($name:expr, $fallback:expr, $body:expr) => {{
        match $crate::ffi::error::catch_panic($name, || $body) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(function = $name, error = %err, "C call failed");
                $fallback
            }
        }
    }};
}

pub(crate) use ffi_boundary;

/// Releases the message of `error` and resets it to `None`.
///
/// Safe to call on a `None` error and safe to call twice.
///
/// # Safety
/// `error` must be null or point to an `IniError` produced by this library.
#[no_mangle]
pub unsafe extern "C" fn inidoc_error_free(error: *mut IniError) {
    if error.is_null() {
        return;
    }
    let error = &mut *error;
    free_string(error.msg);
    error.msg = ptr::null_mut();
    error.kind = IniErrorKind::None;
}
