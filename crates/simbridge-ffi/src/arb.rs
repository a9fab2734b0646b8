#![allow(clippy::missing_safety_doc)]
//! FFI ArbData functions
//!
//! All functions here accept both ArbData and ArbCmd handles. Argument
//! indices may be negative to count from the end (`-1` is the last
//! argument).

use std::ffi::{c_char, c_void};

use simbridge_core::{ArbData, BridgeError};

use crate::error::*;
use crate::registry::{insert, with_registry, with_registry_mut};
use crate::types::*;

/// Create a new, empty ArbData object
///
/// The JSON object is `{}` and there are no arguments.
#[no_mangle]
pub extern "C" fn simbridge_arb_new() -> SimbridgeHandle {
    api_return(0, || Ok(insert(ArbData::new())))
}

/// Replace the JSON object with the given JSON text
///
/// Fails if the text is not valid JSON or its root is not an object; the
/// current object is left untouched in that case.
#[no_mangle]
pub unsafe extern "C" fn simbridge_arb_json_set_str(
    arb: SimbridgeHandle,
    json: *const c_char,
) -> SimbridgeReturn {
    api_return_none(|| {
        let json = receive_str(json)?;
        with_registry_mut(|r| r.arb_mut(arb)?.set_json_str(json))
    })
}

/// Return the JSON object as compact JSON text
///
/// The string must be freed with `simbridge_free_string`.
#[no_mangle]
pub extern "C" fn simbridge_arb_json_get_str(arb: SimbridgeHandle) -> *mut c_char {
    api_return_string(|| with_registry(|r| r.arb(arb)?.json_str()))
}

/// Push a string argument to the back of the argument list
#[no_mangle]
pub unsafe extern "C" fn simbridge_arb_push_str(
    arb: SimbridgeHandle,
    s: *const c_char,
) -> SimbridgeReturn {
    api_return_none(|| {
        let s = receive_str(s)?;
        with_registry_mut(|r| {
            r.arb_mut(arb)?.push_arg(s);
            Ok(())
        })
    })
}

/// Push a binary argument to the back of the argument list
#[no_mangle]
pub unsafe extern "C" fn simbridge_arb_push_raw(
    arb: SimbridgeHandle,
    obj: *const c_void,
    obj_size: usize,
) -> SimbridgeReturn {
    api_return_none(|| {
        let bytes = receive_bytes(obj as *const u8, obj_size)?;
        with_registry_mut(|r| {
            r.arb_mut(arb)?.push_arg(bytes);
            Ok(())
        })
    })
}

/// Pop the last argument and return it as a string
///
/// Fails with the list untouched if the argument is not valid UTF-8 or
/// contains a NUL byte. The
/// string must be freed with `simbridge_free_string`.
#[no_mangle]
pub extern "C" fn simbridge_arb_pop_str(arb: SimbridgeHandle) -> *mut c_char {
    api_return_string(|| with_registry_mut(|r| r.arb_mut(arb)?.pop_arg_str()))
}

/// Pop the last argument into a caller buffer
///
/// At most `obj_size` bytes are copied. Returns the full size of the popped
/// argument, or -1 on failure.
#[no_mangle]
pub unsafe extern "C" fn simbridge_arb_pop_raw(
    arb: SimbridgeHandle,
    obj: *mut c_void,
    obj_size: usize,
) -> isize {
    api_return(-1, || {
        // Reject a bad buffer before anything is popped.
        if obj.is_null() && obj_size > 0 {
            return Err(BridgeError::inv_arg("unexpected NULL buffer"));
        }
        let bytes = with_registry_mut(|r| r.arb_mut(arb)?.pop_arg())?;
        return_bytes(&bytes, obj as *mut u8, obj_size)
    })
}

/// Insert a string argument before `index`; `-1` appends
#[no_mangle]
pub unsafe extern "C" fn simbridge_arb_insert_str(
    arb: SimbridgeHandle,
    index: isize,
    s: *const c_char,
) -> SimbridgeReturn {
    api_return_none(|| {
        let s = receive_str(s)?;
        with_registry_mut(|r| r.arb_mut(arb)?.insert_arg(index, s))
    })
}

/// Insert a binary argument before `index`; `-1` appends
#[no_mangle]
pub unsafe extern "C" fn simbridge_arb_insert_raw(
    arb: SimbridgeHandle,
    index: isize,
    obj: *const c_void,
    obj_size: usize,
) -> SimbridgeReturn {
    api_return_none(|| {
        let bytes = receive_bytes(obj as *const u8, obj_size)?;
        with_registry_mut(|r| r.arb_mut(arb)?.insert_arg(index, bytes))
    })
}

/// Return a copy of the argument at `index` as a string
///
/// The string must be freed with `simbridge_free_string`.
#[no_mangle]
pub extern "C" fn simbridge_arb_get_str(arb: SimbridgeHandle, index: isize) -> *mut c_char {
    api_return_string(|| with_registry(|r| Ok(r.arb(arb)?.get_arg_str(index)?.to_string())))
}

/// Copy the argument at `index` into a caller buffer
///
/// Returns the full size of the argument, or -1 on failure.
#[no_mangle]
pub unsafe extern "C" fn simbridge_arb_get_raw(
    arb: SimbridgeHandle,
    index: isize,
    obj: *mut c_void,
    obj_size: usize,
) -> isize {
    api_return(-1, || {
        with_registry(|r| return_bytes(r.arb(arb)?.get_arg(index)?, obj as *mut u8, obj_size))
    })
}

/// Return the size in bytes of the argument at `index`, or -1 on failure
#[no_mangle]
pub extern "C" fn simbridge_arb_get_size(arb: SimbridgeHandle, index: isize) -> isize {
    api_return(-1, || with_registry(|r| Ok(r.arb(arb)?.get_arg(index)?.len() as isize)))
}

/// Replace the argument at `index` with a string
#[no_mangle]
pub unsafe extern "C" fn simbridge_arb_set_str(
    arb: SimbridgeHandle,
    index: isize,
    s: *const c_char,
) -> SimbridgeReturn {
    api_return_none(|| {
        let s = receive_str(s)?;
        with_registry_mut(|r| r.arb_mut(arb)?.set_arg(index, s))
    })
}

/// Replace the argument at `index` with binary data
#[no_mangle]
pub unsafe extern "C" fn simbridge_arb_set_raw(
    arb: SimbridgeHandle,
    index: isize,
    obj: *const c_void,
    obj_size: usize,
) -> SimbridgeReturn {
    api_return_none(|| {
        let bytes = receive_bytes(obj as *const u8, obj_size)?;
        with_registry_mut(|r| r.arb_mut(arb)?.set_arg(index, bytes))
    })
}

/// Remove the argument at `index`
#[no_mangle]
pub extern "C" fn simbridge_arb_remove(arb: SimbridgeHandle, index: isize) -> SimbridgeReturn {
    api_return_none(|| with_registry_mut(|r| r.arb_mut(arb)?.remove_arg(index).map(drop)))
}

/// Return the number of arguments, or -1 on failure
#[no_mangle]
pub extern "C" fn simbridge_arb_len(arb: SimbridgeHandle) -> isize {
    api_return(-1, || with_registry(|r| Ok(r.arb(arb)?.len() as isize)))
}

/// Remove all arguments; the JSON object is kept
#[no_mangle]
pub extern "C" fn simbridge_arb_clear(arb: SimbridgeHandle) -> SimbridgeReturn {
    api_return_none(|| {
        with_registry_mut(|r| {
            r.arb_mut(arb)?.clear_args();
            Ok(())
        })
    })
}

/// Copy the JSON object and arguments of `src` into `dst`
///
/// Either handle may be an ArbData or an ArbCmd; the identifiers of an
/// ArbCmd destination are kept.
#[no_mangle]
pub extern "C" fn simbridge_arb_assign(
    dst: SimbridgeHandle,
    src: SimbridgeHandle,
) -> SimbridgeReturn {
    api_return_none(|| {
        with_registry_mut(|r| {
            let data = r.arb(src)?.clone();
            r.arb_mut(dst)?.assign(&data);
            Ok(())
        })
    })
}
