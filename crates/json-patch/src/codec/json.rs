//! JSON codec for patch operations.
//!
//! A patch document is an ordered array of objects, each with an `op` field
//! naming one of the six RFC 6902 operations, a `path` pointer, a `from`
//! pointer for `move`/`copy`, and a `value` for `add`/`replace`/`test`.
//! Decoding validates each entry fully before any document is touched.

use serde_json::{json, Map, Value};

use json_patch_pointer::Pointer;

use crate::types::{Op, PatchError};

/// Serialize an operation to its wire form.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": path.to_string(),
            "value": value,
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": path.to_string(),
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": path.to_string(),
            "value": value,
        }),
        Op::Move { path, from } => json!({
            "op": "move",
            "path": path.to_string(),
            "from": from.to_string(),
        }),
        Op::Copy { path, from } => json!({
            "op": "copy",
            "path": path.to_string(),
            "from": from.to_string(),
        }),
        Op::Test { path, value } => json!({
            "op": "test",
            "path": path.to_string(),
            "value": value,
        }),
    }
}

fn decode_pointer(obj: &Map<String, Value>, key: &str) -> Result<Pointer, PatchError> {
    let s = obj
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| PatchError::InvalidOp(format!("missing `{key}` field")))?;
    Ok(Pointer::parse(s)?)
}

fn required_value(obj: &Map<String, Value>, op_name: &str) -> Result<Value, PatchError> {
    // An explicit JSON null counts as present; only an absent key is an error.
    obj.get("value")
        .cloned()
        .ok_or_else(|| PatchError::InvalidOp(format!("`{op_name}` must have a `value` field")))
}

/// Decode a single patch-document entry into an operation.
///
/// Rejects entries that are not objects, unknown op names, unparsable
/// pointers, and missing required fields.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("operation must be an object".into()))?;
    let op_name = obj
        .get("op")
        .and_then(|v| v.as_str())
        .ok_or_else(|| PatchError::InvalidOp("missing `op` field".into()))?;
    let path = decode_pointer(obj, "path")?;

    match op_name {
        "add" => Ok(Op::Add {
            path,
            value: required_value(obj, "add")?,
        }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace {
            path,
            value: required_value(obj, "replace")?,
        }),
        "move" => Ok(Op::Move {
            path,
            from: decode_pointer(obj, "from")?,
        }),
        "copy" => Ok(Op::Copy {
            path,
            from: decode_pointer(obj, "from")?,
        }),
        "test" => Ok(Op::Test {
            path,
            value: required_value(obj, "test")?,
        }),
        other => Err(PatchError::InvalidOp(format!(
            "`{other}` is not a valid JSON Patch operation"
        ))),
    }
}

/// Serialize a list of operations to a patch document.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

/// Decode a patch document (a JSON array) into operations.
pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?;
    arr.iter().map(from_json).collect()
}

/// Decode a raw byte buffer containing a patch document.
///
/// Any failure — malformed JSON, unknown op, missing field, bad pointer —
/// aborts here, before any document mutation is attempted.
///
/// # Example
///
/// ```
/// use json_patch::parse_patch;
///
/// let ops = parse_patch(br#"[{"op":"remove","path":"/foo"}]"#).unwrap();
/// assert_eq!(ops.len(), 1);
/// assert_eq!(ops[0].op_name(), "remove");
/// ```
pub fn parse_patch(buf: &[u8]) -> Result<Vec<Op>, PatchError> {
    let v: Value = serde_json::from_slice(buf)
        .map_err(|e| PatchError::InvalidOp(format!("malformed patch document: {e}")))?;
    from_json_patch(&v)
}
