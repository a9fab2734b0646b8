//! Generic data payloads
//!
//! [`ArbData`] is the value type that crosses the boundary: a JSON object
//! plus an ordered list of opaque binary arguments. The JSON root is always
//! an object; this is enforced by storing a [`Map`] rather than a `Value`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{BridgeError, BridgeResult};

/// JSON object plus ordered binary arguments
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArbData {
    json: Map<String, Value>,
    args: Vec<Vec<u8>>,
}

impl ArbData {
    /// Empty payload: `{}` and no arguments
    pub fn new() -> Self {
        ArbData {
            json: Map::new(),
            args: Vec::new(),
        }
    }

    /// Build a payload from JSON text and a list of arguments
    pub fn from_parts<I, A>(json: &str, args: I) -> BridgeResult<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Vec<u8>>,
    {
        let mut data = ArbData::new();
        data.set_json_str(json)?;
        data.args = args.into_iter().map(Into::into).collect();
        Ok(data)
    }

    // JSON

    #[inline]
    pub fn json(&self) -> &Map<String, Value> {
        &self.json
    }

    #[inline]
    pub fn json_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.json
    }

    /// Replace the JSON object; non-object roots are rejected
    pub fn set_json(&mut self, value: Value) -> BridgeResult<()> {
        match value {
            Value::Object(map) => {
                self.json = map;
                Ok(())
            }
            other => Err(BridgeError::inv_arg(format!(
                "JSON root must be an object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Parse `text` and replace the JSON object with it
    ///
    /// Malformed text is a parse error; a well-formed non-object root is an
    /// invalid argument. Either way the current object is left as it was.
    pub fn set_json_str(&mut self, text: &str) -> BridgeResult<()> {
        let value: Value = serde_json::from_str(text)?;
        self.set_json(value)
    }

    /// Compact JSON rendering of the object
    pub fn json_str(&self) -> BridgeResult<String> {
        serde_json::to_string(&self.json)
            .map_err(|e| BridgeError::inv_arg(format!("failed to serialize JSON: {e}")))
    }

    // Arguments

    #[inline]
    pub fn args(&self) -> &[Vec<u8>] {
        &self.args
    }

    #[inline]
    pub fn args_mut(&mut self) -> &mut Vec<Vec<u8>> {
        &mut self.args
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn push_arg(&mut self, arg: impl Into<Vec<u8>>) {
        self.args.push(arg.into());
    }

    /// Remove and return the last argument
    pub fn pop_arg(&mut self) -> BridgeResult<Vec<u8>> {
        self.args
            .pop()
            .ok_or_else(|| BridgeError::OutOfRange("pop from empty argument list".to_string()))
    }

    /// Remove the last argument if it is a valid string
    ///
    /// Nothing is removed when the argument is not valid UTF-8 or contains a
    /// NUL byte.
    pub fn pop_arg_str(&mut self) -> BridgeResult<String> {
        let last = self
            .args
            .last()
            .ok_or_else(|| BridgeError::OutOfRange("pop from empty argument list".to_string()))?;
        let s = as_string_arg(last)?.to_owned();
        self.args.pop();
        Ok(s)
    }

    pub fn get_arg(&self, index: isize) -> BridgeResult<&[u8]> {
        let index = self.resolve_index(index, false)?;
        Ok(self.args[index].as_slice())
    }

    /// Argument at `index` as a string; must be UTF-8 without NUL bytes
    pub fn get_arg_str(&self, index: isize) -> BridgeResult<&str> {
        as_string_arg(self.get_arg(index)?)
    }

    pub fn set_arg(&mut self, index: isize, arg: impl Into<Vec<u8>>) -> BridgeResult<()> {
        let index = self.resolve_index(index, false)?;
        self.args[index] = arg.into();
        Ok(())
    }

    /// Insert before `index`; `-1` appends
    pub fn insert_arg(&mut self, index: isize, arg: impl Into<Vec<u8>>) -> BridgeResult<()> {
        let index = self.resolve_index(index, true)?;
        self.args.insert(index, arg.into());
        Ok(())
    }

    pub fn remove_arg(&mut self, index: isize) -> BridgeResult<Vec<u8>> {
        let index = self.resolve_index(index, false)?;
        Ok(self.args.remove(index))
    }

    pub fn clear_args(&mut self) {
        self.args.clear();
    }

    /// Copy JSON and arguments from another payload
    pub fn assign(&mut self, src: &ArbData) {
        self.clone_from(src);
    }

    /// Map a possibly negative index onto the argument list
    ///
    /// Negative indices count from the end. For insertion the valid range is
    /// one wider on both sides so that `len` and `-1` both append.
    fn resolve_index(&self, index: isize, insert: bool) -> BridgeResult<usize> {
        let len = self.args.len() as isize;
        let (lo, hi) = if insert { (-len - 1, len) } else { (-len, len - 1) };
        if index < lo || index > hi {
            return Err(BridgeError::OutOfRange(format!(
                "index {index} out of range for {len} argument(s)"
            )));
        }
        let resolved = if index < 0 {
            index + len + insert as isize
        } else {
            index
        };
        Ok(resolved as usize)
    }
}

impl From<Map<String, Value>> for ArbData {
    fn from(json: Map<String, Value>) -> Self {
        ArbData {
            json,
            args: Vec::new(),
        }
    }
}

/// Renders the JSON root as `Object(..)`, the shape it has as a `Value`
impl fmt::Debug for ArbData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Object<'a>(&'a Map<String, Value>);

        impl fmt::Debug for Object<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple("Object").field(self.0).finish()
            }
        }

        f.debug_struct("ArbData")
            .field("json", &Object(&self.json))
            .field("args", &self.args)
            .finish()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn as_string_arg(bytes: &[u8]) -> BridgeResult<&str> {
    let s = std::str::from_utf8(bytes)
        .map_err(|e| BridgeError::inv_arg(format!("argument is not a valid UTF-8 string: {e}")))?;
    if s.contains('\0') {
        return Err(BridgeError::inv_arg("argument contains an embedded NUL byte"));
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_new_is_empty() {
        let data = ArbData::new();
        assert!(data.json().is_empty());
        assert!(data.is_empty());
        assert_eq!(data.json_str().unwrap(), "{}");
    }

    #[test]
    fn test_set_json_str() {
        let mut data = ArbData::new();
        data.push_arg("keep");
        data.set_json_str("{\"answer\": 42}").unwrap();
        assert_eq!(data.json_str().unwrap(), "{\"answer\":42}");
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_set_json_rejects_non_objects() {
        let mut data = ArbData::new();
        data.set_json_str("{\"a\": 1}").unwrap();

        for text in ["[1, 2]", "3", "null", "\"str\"", "true"] {
            let err = data.set_json_str(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{text}");
        }

        let err = data.set_json_str("{\"a\":").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);

        assert_eq!(data.json(), json!({"a": 1}).as_object().unwrap());
    }

    #[test]
    fn test_push_pop_lifo() {
        let mut data = ArbData::new();
        data.push_arg("a");
        data.push_arg("b");
        data.push_arg(vec![0u8, 255]);
        assert_eq!(data.len(), 3);
        assert_eq!(data.pop_arg().unwrap(), vec![0u8, 255]);
        assert_eq!(data.pop_arg_str().unwrap(), "b");
        assert_eq!(data.pop_arg_str().unwrap(), "a");
        assert_eq!(data.pop_arg().unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_pop_str_keeps_binary_arg() {
        let mut data = ArbData::new();
        data.push_arg(vec![0xFFu8, 0xFE]);
        let err = data.pop_arg_str().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_str_access_rejects_nul() {
        let mut data = ArbData::new();
        data.push_arg(b"x\0y".to_vec());
        let err = data.get_arg_str(0).unwrap_err();
        assert_eq!(
            err,
            BridgeError::inv_arg("argument contains an embedded NUL byte")
        );
        assert_eq!(data.pop_arg_str().unwrap_err(), err);
        assert_eq!(data.len(), 1);
        assert_eq!(data.get_arg(-1).unwrap(), b"x\0y");
    }

    #[test]
    fn test_debug_wraps_json_object() {
        let data = ArbData::from_parts("{}", ["a"]).unwrap();
        assert_eq!(
            format!("{data:?}"),
            "ArbData { json: Object({}), args: [[97]] }"
        );
        let pretty = format!("{:#?}", ArbData::new());
        assert!(pretty.contains("json: Object(\n        {},\n    ),"));
    }

    #[test]
    fn test_negative_indices() {
        let mut data = ArbData::from_parts("{}", ["a", "b", "c"]).unwrap();
        assert_eq!(data.get_arg_str(0).unwrap(), "a");
        assert_eq!(data.get_arg_str(-1).unwrap(), "c");
        assert_eq!(data.get_arg_str(-3).unwrap(), "a");
        assert_eq!(data.get_arg(3).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(data.get_arg(-4).unwrap_err().kind(), ErrorKind::OutOfRange);

        data.set_arg(-2, "B").unwrap();
        assert_eq!(data.get_arg_str(1).unwrap(), "B");

        assert_eq!(data.remove_arg(0).unwrap(), b"a".to_vec());
        assert_eq!(data.args(), &[b"B".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn test_insert_positions() {
        let mut data = ArbData::from_parts("{}", ["b"]).unwrap();
        data.insert_arg(-1, "c").unwrap();
        data.insert_arg(0, "a").unwrap();
        data.insert_arg(3, "d").unwrap();
        data.insert_arg(-5, "_").unwrap();
        let args: Vec<&str> = (0..5).map(|i| data.get_arg_str(i).unwrap()).collect();
        assert_eq!(args, ["_", "a", "b", "c", "d"]);
        assert_eq!(data.insert_arg(6, "x").unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(data.insert_arg(-7, "x").unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_assign_copies_everything() {
        let src = ArbData::from_parts("{\"x\": [1, 2]}", ["p", "q"]).unwrap();
        let mut dst = ArbData::from_parts("{\"y\": null}", ["z"]).unwrap();
        dst.assign(&src);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let data = ArbData::from_parts("{\"k\": \"v\"}", ["a"]).unwrap();
        let text = serde_json::to_string(&data).unwrap();
        let back: ArbData = serde_json::from_str(&text).unwrap();
        assert_eq!(back, data);
    }

    proptest! {
        #[test]
        fn prop_pop_reverses_push(args in proptest::collection::vec(any::<Vec<u8>>(), 0..16)) {
            let mut data = ArbData::new();
            for arg in &args {
                data.push_arg(arg.clone());
            }
            prop_assert_eq!(data.len(), args.len());
            for arg in args.iter().rev() {
                prop_assert_eq!(&data.pop_arg().unwrap(), arg);
            }
            prop_assert_eq!(data.pop_arg().unwrap_err().kind(), ErrorKind::OutOfRange);
        }
    }
}
