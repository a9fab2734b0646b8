//! FFI Handle functions

use std::ffi::c_char;

use crate::error::*;
use crate::registry::{with_registry, with_registry_mut};
use crate::types::*;

/// Return the kind of resource behind a handle
///
/// Returns `INVALID` for dead handles without touching the last error, so
/// this can be used to probe liveness.
#[no_mangle]
pub extern "C" fn simbridge_handle_type(handle: SimbridgeHandle) -> SimbridgeHandleType {
    api_return(SimbridgeHandleType::INVALID, || {
        Ok(with_registry(|r| r.handle_type(handle)))
    })
}

/// Return a debug rendering of the resource behind a handle
///
/// The string must be freed with `simbridge_free_string`. Returns NULL on
/// failure.
#[no_mangle]
pub extern "C" fn simbridge_handle_dump(handle: SimbridgeHandle) -> *mut c_char {
    api_return_string(|| with_registry(|r| r.dump(handle)))
}

/// Delete a resource and retire its handle
#[no_mangle]
pub extern "C" fn simbridge_handle_delete(handle: SimbridgeHandle) -> SimbridgeReturn {
    // Drop the resource outside the lock.
    api_return_none(|| with_registry_mut(|r| r.remove(handle)).map(drop))
}

/// Delete every live resource
#[no_mangle]
pub extern "C" fn simbridge_handle_delete_all() -> SimbridgeReturn {
    api_return_none(|| {
        let count = with_registry_mut(|r| r.clear());
        tracing::debug!(count, "deleted all handles");
        Ok(())
    })
}

/// Fail if any handle is still live
///
/// Intended for the end of test programs to catch leaked resources.
#[no_mangle]
pub extern "C" fn simbridge_handle_leak_check() -> SimbridgeReturn {
    api_return_none(|| {
        with_registry(|r| r.leak_check()).map_err(|e| {
            tracing::warn!(error = %e, "leak check failed");
            e
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::simbridge_cmd_new;
    use crate::simbridge_free_string;
    use std::ffi::{CStr, CString};

    fn cmd_new(iface: &str, oper: &str) -> SimbridgeHandle {
        let iface = CString::new(iface).unwrap();
        let oper = CString::new(oper).unwrap();
        unsafe { simbridge_cmd_new(iface.as_ptr(), oper.as_ptr()) }
    }

    #[test]
    fn test_handle_sanity() {
        let a = cmd_new("a", "b");
        assert_ne!(a, 0, "unexpected error: {:?}", last_error());

        assert_eq!(simbridge_handle_type(a), SimbridgeHandleType::ARB_CMD);

        let dump = simbridge_handle_dump(a);
        assert!(!dump.is_null());
        let text = unsafe { CStr::from_ptr(dump) }.to_str().unwrap().to_owned();
        unsafe { simbridge_free_string(dump) };
        assert!(text.starts_with("ArbCmd("));
        assert!(text.contains("interface_identifier: \"a\""));
        assert!(text.contains("operation_identifier: \"b\""));

        assert_eq!(simbridge_handle_delete(a), SimbridgeReturn::SUCCESS);

        assert_eq!(simbridge_handle_type(a), SimbridgeHandleType::INVALID);
        assert!(simbridge_handle_dump(a).is_null());
        assert_eq!(
            last_error(),
            Some(format!("Invalid argument: handle {a} is invalid"))
        );
    }

    #[test]
    fn test_type_query_is_silent() {
        simbridge_error_clear();
        assert_eq!(simbridge_handle_type(0), SimbridgeHandleType::INVALID);
        assert_eq!(simbridge_handle_type(u64::MAX), SimbridgeHandleType::INVALID);
        assert_eq!(last_error(), None);
    }

    #[test]
    fn test_double_delete() {
        let a = cmd_new("x", "y");
        assert_eq!(simbridge_handle_delete(a), SimbridgeReturn::SUCCESS);
        assert_eq!(simbridge_handle_delete(a), SimbridgeReturn::FAILURE);
        assert_eq!(simbridge_handle_delete(0), SimbridgeReturn::FAILURE);
        assert_eq!(
            last_error().as_deref(),
            Some("Invalid argument: handle 0 is invalid")
        );
    }

    #[test]
    fn test_leak_check_reports_live_handles() {
        let a = cmd_new("leak", "check");
        assert_eq!(simbridge_handle_leak_check(), SimbridgeReturn::FAILURE);
        let msg = last_error().unwrap();
        assert!(msg.starts_with("Invalid argument: "), "{msg}");
        assert!(msg.ends_with(" handle(s) still live"), "{msg}");
        assert_eq!(simbridge_handle_delete(a), SimbridgeReturn::SUCCESS);
    }
}
