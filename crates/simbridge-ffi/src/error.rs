#![allow(clippy::missing_safety_doc)]
//! FFI Error handling
//!
//! Every boundary call runs its body through one of the `api_return*`
//! adapters. An `Err` (or a panic) is turned into the call's failure
//! sentinel and its message is stored in a per-thread slot, readable with
//! [`simbridge_explain`]. Successful calls leave the slot untouched.

use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use simbridge_core::{BridgeError, BridgeResult};

use crate::types::{SimbridgeBoolReturn, SimbridgeReturn};

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
pub fn set_last_error(msg: &str) {
    // Interior NULs would truncate the message on the C side.
    let msg = CString::new(msg.replace('\0', "\\0")).ok();
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = msg;
    });
}

/// Get a copy of this thread's last error message
pub fn last_error() -> Option<String> {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.to_string_lossy().into_owned())
    })
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Get the last error message
///
/// Returns NULL if no call on this thread has failed yet. The pointer stays
/// valid until the next failing call on the same thread and must not be
/// freed by the caller.
#[no_mangle]
pub extern "C" fn simbridge_explain() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(s) => s.as_ptr(),
        None => ptr::null(),
    })
}

/// Alias of `simbridge_explain`
#[no_mangle]
pub extern "C" fn simbridge_error_get() -> *const c_char {
    simbridge_explain()
}

/// Set the last error message from foreign code
///
/// Passing NULL clears the message.
#[no_mangle]
pub unsafe extern "C" fn simbridge_error_set(msg: *const c_char) {
    if msg.is_null() {
        clear_last_error();
    } else {
        set_last_error(&CStr::from_ptr(msg).to_string_lossy());
    }
}

/// Clear the last error
#[no_mangle]
pub extern "C" fn simbridge_error_clear() {
    clear_last_error();
}

fn record_failure(err: &BridgeError) {
    tracing::debug!(error = %err, "boundary call failed");
    set_last_error(&err.to_string());
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run `f`, returning `fail` and recording the error if it fails or panics
pub fn api_return<T>(fail: T, f: impl FnOnce() -> BridgeResult<T>) -> T {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            record_failure(&err);
            fail
        }
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            tracing::warn!(panic = %msg, "caught panic at the boundary");
            set_last_error(&format!("Internal error: {msg}"));
            fail
        }
    }
}

/// Adapter for status-producing calls
pub fn api_return_none(f: impl FnOnce() -> BridgeResult<()>) -> SimbridgeReturn {
    api_return(SimbridgeReturn::FAILURE, || {
        f()?;
        Ok(SimbridgeReturn::SUCCESS)
    })
}

/// Adapter for boolean queries
pub fn api_return_bool(f: impl FnOnce() -> BridgeResult<bool>) -> SimbridgeBoolReturn {
    api_return(SimbridgeBoolReturn::BOOL_FAILURE, || Ok(f()?.into()))
}

/// Adapter for string-producing calls; the result must be freed with
/// `simbridge_free_string`
pub fn api_return_string(f: impl FnOnce() -> BridgeResult<String>) -> *mut c_char {
    api_return(ptr::null_mut(), || return_string(f()?))
}

/// Borrow a C string argument
pub unsafe fn receive_str<'a>(s: *const c_char) -> BridgeResult<&'a str> {
    if s.is_null() {
        return Err(BridgeError::NullString);
    }
    CStr::from_ptr(s)
        .to_str()
        .map_err(|e| BridgeError::inv_arg(format!("string is not valid UTF-8: {e}")))
}

/// Borrow a raw byte buffer argument; NULL is accepted only for length 0
pub unsafe fn receive_bytes<'a>(ptr: *const u8, len: usize) -> BridgeResult<&'a [u8]> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(BridgeError::inv_arg("unexpected NULL buffer"));
    }
    Ok(std::slice::from_raw_parts(ptr, len))
}

/// Copy `src` into a caller buffer, truncating to its size
///
/// Returns the full length of `src` so the caller can detect truncation.
pub unsafe fn return_bytes(src: &[u8], buf: *mut u8, buf_len: usize) -> BridgeResult<isize> {
    let n = src.len().min(buf_len);
    if n > 0 {
        if buf.is_null() {
            return Err(BridgeError::inv_arg("unexpected NULL buffer"));
        }
        ptr::copy_nonoverlapping(src.as_ptr(), buf, n);
    }
    isize::try_from(src.len()).map_err(|_| BridgeError::inv_arg("argument too large"))
}

/// Hand an owned string to the caller
pub fn return_string(s: String) -> BridgeResult<*mut c_char> {
    CString::new(s)
        .map(CString::into_raw)
        .map_err(|_| BridgeError::inv_arg("string contains embedded NUL characters"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_slot_roundtrip() {
        simbridge_error_clear();
        assert!(simbridge_explain().is_null());
        assert_eq!(last_error(), None);

        set_last_error("boom");
        let msg = unsafe { CStr::from_ptr(simbridge_explain()) };
        assert_eq!(msg.to_str().unwrap(), "boom");
        assert_eq!(last_error().as_deref(), Some("boom"));

        simbridge_error_clear();
        assert_eq!(last_error(), None);
    }

    #[test]
    fn test_error_set_from_foreign() {
        let msg = CString::new("from C").unwrap();
        unsafe { simbridge_error_set(msg.as_ptr()) };
        assert_eq!(last_error().as_deref(), Some("from C"));
        unsafe { simbridge_error_set(ptr::null()) };
        assert_eq!(last_error(), None);
    }

    #[test]
    fn test_success_leaves_error_untouched() {
        set_last_error("earlier failure");
        assert_eq!(api_return(0u64, || Ok(5)), 5);
        assert_eq!(last_error().as_deref(), Some("earlier failure"));
    }

    #[test]
    fn test_failure_overwrites() {
        set_last_error("earlier failure");
        assert_eq!(
            api_return_none(|| Err(BridgeError::InvalidHandle(9))),
            SimbridgeReturn::FAILURE
        );
        assert_eq!(
            last_error().as_deref(),
            Some("Invalid argument: handle 9 is invalid")
        );
    }

    #[test]
    fn test_panic_is_caught() {
        let r = api_return_bool(|| panic!("kaboom"));
        assert_eq!(r, SimbridgeBoolReturn::BOOL_FAILURE);
        assert_eq!(last_error().as_deref(), Some("Internal error: kaboom"));
    }

    #[test]
    fn test_error_is_thread_local() {
        set_last_error("main thread");
        std::thread::spawn(|| {
            assert_eq!(last_error(), None);
            set_last_error("worker thread");
        })
        .join()
        .unwrap();
        assert_eq!(last_error().as_deref(), Some("main thread"));
    }

    #[test]
    fn test_receive_null_string() {
        let err = unsafe { receive_str(ptr::null()) }.unwrap_err();
        assert_eq!(err, BridgeError::NullString);
    }

    #[test]
    fn test_return_bytes_truncates() {
        let mut buf = [0u8; 2];
        let n = unsafe { return_bytes(b"abcd", buf.as_mut_ptr(), buf.len()) }.unwrap();
        assert_eq!(n, 4);
        assert_eq!(&buf, b"ab");
    }
}
