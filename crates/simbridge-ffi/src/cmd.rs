#![allow(clippy::missing_safety_doc)]
//! FFI ArbCmd functions
//!
//! Every `simbridge_arb_*` function also accepts an ArbCmd handle and then
//! operates on the command's payload.

use std::ffi::c_char;

use simbridge_core::ArbCmd;

use crate::error::*;
use crate::registry::{insert, with_registry};
use crate::types::*;

/// Create a new command with an empty payload
///
/// Both identifiers must be non-empty and consist of `[a-zA-Z0-9_]`.
/// Returns 0 on failure.
#[no_mangle]
pub unsafe extern "C" fn simbridge_cmd_new(
    iface: *const c_char,
    oper: *const c_char,
) -> SimbridgeHandle {
    api_return(0, || {
        let iface = receive_str(iface)?;
        let oper = receive_str(oper)?;
        Ok(insert(ArbCmd::new(iface, oper)?))
    })
}

/// Return a copy of the interface identifier
///
/// The string must be freed with `simbridge_free_string`.
#[no_mangle]
pub extern "C" fn simbridge_cmd_iface_get(cmd: SimbridgeHandle) -> *mut c_char {
    api_return_string(|| {
        with_registry(|r| Ok(r.cmd(cmd)?.interface_identifier().to_string()))
    })
}

/// Compare the interface identifier with a string, case-sensitively
#[no_mangle]
pub unsafe extern "C" fn simbridge_cmd_iface_cmp(
    cmd: SimbridgeHandle,
    iface: *const c_char,
) -> SimbridgeBoolReturn {
    api_return_bool(|| {
        let iface = receive_str(iface)?;
        with_registry(|r| Ok(r.cmd(cmd)?.interface_is(iface)))
    })
}

/// Return a copy of the operation identifier
///
/// The string must be freed with `simbridge_free_string`.
#[no_mangle]
pub extern "C" fn simbridge_cmd_oper_get(cmd: SimbridgeHandle) -> *mut c_char {
    api_return_string(|| {
        with_registry(|r| Ok(r.cmd(cmd)?.operation_identifier().to_string()))
    })
}

/// Compare the operation identifier with a string, case-sensitively
#[no_mangle]
pub unsafe extern "C" fn simbridge_cmd_oper_cmp(
    cmd: SimbridgeHandle,
    oper: *const c_char,
) -> SimbridgeBoolReturn {
    api_return_bool(|| {
        let oper = receive_str(oper)?;
        with_registry(|r| Ok(r.cmd(cmd)?.operation_is(oper)))
    })
}
