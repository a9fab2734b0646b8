//! FFI Types - C-compatible type definitions

use std::ffi::c_int;

/// Opaque resource handle; 0 is never a live handle
pub type SimbridgeHandle = u64;

/// Kind of resource behind a handle
#[repr(C)]
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimbridgeHandleType {
    /// The handle is zero, was never issued, or has been deleted
    INVALID = 0,
    /// ArbData payload
    ARB_DATA = 100,
    /// ArbCmd command
    ARB_CMD = 101,
}

/// Status returned by mutating calls
#[repr(C)]
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimbridgeReturn {
    FAILURE = -1,
    SUCCESS = 0,
}

impl From<SimbridgeReturn> for c_int {
    fn from(code: SimbridgeReturn) -> Self {
        code as c_int
    }
}

/// Tri-state result of boolean queries
#[repr(C)]
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimbridgeBoolReturn {
    BOOL_FAILURE = -1,
    FALSE = 0,
    TRUE = 1,
}

impl From<bool> for SimbridgeBoolReturn {
    fn from(b: bool) -> Self {
        if b {
            SimbridgeBoolReturn::TRUE
        } else {
            SimbridgeBoolReturn::FALSE
        }
    }
}
