#![allow(clippy::missing_safety_doc)]
//! SimBridge FFI - Foreign Function Interface
//!
//! C-compatible, handle-based bindings for ArbData and ArbCmd resources.
//! Resources live in a process-wide registry and are addressed by opaque,
//! non-zero integer handles. Failing calls return a sentinel (0, NULL, -1 or
//! a FAILURE variant) and leave a message in a thread-local slot that can be
//! read with `simbridge_explain`.

pub mod arb;
pub mod cmd;
pub mod error;
pub mod handle;
pub mod logging;
pub mod registry;
pub mod types;

use std::ffi::{c_char, CString};

pub use arb::*;
pub use cmd::*;
pub use error::*;
pub use handle::*;
pub use logging::{init_logging, LogConfig};
pub use registry::{Registry, Resource};
pub use types::*;

/// Library version
#[no_mangle]
pub extern "C" fn simbridge_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

/// Initialize logging from `SIMBRIDGE_LOG` / `SIMBRIDGE_LOG_FORMAT`
///
/// Optional; without it the library stays silent. Fails if a global
/// subscriber is already installed.
#[no_mangle]
pub extern "C" fn simbridge_init() -> SimbridgeReturn {
    api_return_none(|| init_logging(&LogConfig::from_env()))
}

/// Free a string returned by SimBridge
#[no_mangle]
pub unsafe extern "C" fn simbridge_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_version() {
        let v = unsafe { CStr::from_ptr(simbridge_version()) };
        assert_eq!(v.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_free_null_string() {
        unsafe { simbridge_free_string(std::ptr::null_mut()) };
    }

    #[test]
    fn test_handles_across_threads() {
        let handles: Vec<SimbridgeHandle> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    let h = simbridge_arb_new();
                    for i in 0..16 {
                        let s = CString::new(i.to_string()).unwrap();
                        assert_eq!(
                            unsafe { simbridge_arb_push_str(h, s.as_ptr()) },
                            SimbridgeReturn::SUCCESS
                        );
                    }
                    h
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|t| t.join().unwrap())
            .collect();

        let mut unique = handles.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), handles.len());

        for h in handles {
            assert_eq!(simbridge_arb_len(h), 16);
            assert_eq!(simbridge_handle_delete(h), SimbridgeReturn::SUCCESS);
        }
    }
}
