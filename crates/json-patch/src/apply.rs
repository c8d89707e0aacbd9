//! Sequential patch application.
//!
//! Each of the six operation kinds maps to exactly one pointer primitive;
//! [`apply_patch`] strings them together over a working clone of the input
//! document, tracking the index of the first failing operation.

use serde_json::Value;

use json_patch_pointer::PointerError;

use crate::types::{Op, PatchFailure};

/// Apply a single operation to `doc` in place.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<(), PointerError> {
    match op {
        Op::Add { path, value } => path.put(doc, value.clone()),
        Op::Remove { path } => path.remove(doc).map(|_| ()),
        Op::Replace { path, value } => path.replace(doc, value.clone()),
        Op::Move { path, from } => from.move_to(doc, path),
        Op::Copy { path, from } => from.copy(doc, path),
        Op::Test { path, value } => path.test(doc, value),
    }
}

/// Apply `ops` in order to a deep clone of `base`; the caller's document is
/// never mutated.
///
/// On the first failing operation, application stops immediately and the
/// returned [`PatchFailure`] carries the partial document together with the
/// zero-based index of the operation that failed. Already-applied
/// operations are not rolled back.
///
/// # Example
///
/// ```
/// use json_patch::{apply_patch, parse_patch};
/// use serde_json::json;
///
/// let base = json!({"foo": ["bar", 5]});
/// let patch = parse_patch(br#"[{"op":"add","path":"/foo/-","value":6}]"#).unwrap();
/// assert_eq!(apply_patch(&base, &patch).unwrap(), json!({"foo": ["bar", 5, 6]}));
/// ```
pub fn apply_patch(base: &Value, ops: &[Op]) -> Result<Value, PatchFailure> {
    let mut doc = base.clone();
    for (index, op) in ops.iter().enumerate() {
        if let Err(error) = apply_op(&mut doc, op) {
            return Err(PatchFailure { doc, index, error });
        }
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ptr(s: &str) -> json_patch_pointer::Pointer {
        s.parse().unwrap()
    }

    #[test]
    fn add_to_object() {
        let mut doc = json!({"a": 1});
        apply_op(&mut doc, &Op::Add { path: ptr("/b"), value: json!(2) }).unwrap();
        assert_eq!(doc, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn add_to_array() {
        let mut doc = json!([1, 2, 3]);
        apply_op(&mut doc, &Op::Add { path: ptr("/1"), value: json!(99) }).unwrap();
        assert_eq!(doc, json!([1, 99, 2, 3]));
    }

    #[test]
    fn remove_from_object() {
        let mut doc = json!({"a": 1, "b": 2});
        apply_op(&mut doc, &Op::Remove { path: ptr("/a") }).unwrap();
        assert_eq!(doc, json!({"b": 2}));
    }

    #[test]
    fn replace_value() {
        let mut doc = json!({"a": 1});
        apply_op(&mut doc, &Op::Replace { path: ptr("/a"), value: json!(99) }).unwrap();
        assert_eq!(doc, json!({"a": 99}));
    }

    #[test]
    fn copy_then_mutate_leaves_source_alone() {
        let mut doc = json!({"a": {"x": 1}});
        apply_op(&mut doc, &Op::Copy { path: ptr("/b"), from: ptr("/a") }).unwrap();
        apply_op(&mut doc, &Op::Replace { path: ptr("/b/x"), value: json!(2) }).unwrap();
        assert_eq!(doc, json!({"a": {"x": 1}, "b": {"x": 2}}));
    }

    #[test]
    fn move_op() {
        let mut doc = json!({"a": 1, "b": 2});
        apply_op(&mut doc, &Op::Move { path: ptr("/c"), from: ptr("/a") }).unwrap();
        assert_eq!(doc, json!({"b": 2, "c": 1}));
    }

    #[test]
    fn test_op_does_not_mutate_and_is_idempotent() {
        let base = json!({"a": 42});
        let mut doc = base.clone();
        let op = Op::Test { path: ptr("/a"), value: json!(42) };
        apply_op(&mut doc, &op).unwrap();
        apply_op(&mut doc, &op).unwrap();
        assert_eq!(doc, base);

        let failing = Op::Test { path: ptr("/a"), value: json!(99) };
        assert!(apply_op(&mut doc, &failing).is_err());
        assert!(apply_op(&mut doc, &failing).is_err());
        assert_eq!(doc, base);
    }

    #[test]
    fn apply_patch_leaves_base_untouched() {
        let base = json!({"a": 1});
        let ops = vec![Op::Replace { path: ptr("/a"), value: json!(2) }];
        let result = apply_patch(&base, &ops).unwrap();
        assert_eq!(result, json!({"a": 2}));
        assert_eq!(base, json!({"a": 1}));
    }

    #[test]
    fn apply_patch_reports_failing_index_and_partial_doc() {
        let base = json!({"a": 1});
        let ops = vec![
            Op::Add { path: ptr("/b"), value: json!(2) },
            Op::Remove { path: ptr("/missing") },
            Op::Add { path: ptr("/c"), value: json!(3) },
        ];
        let failure = apply_patch(&base, &ops).unwrap_err();
        assert_eq!(failure.index, 1);
        // the first op's effect is visible, the third never ran
        assert_eq!(failure.doc, json!({"a": 1, "b": 2}));
        assert!(matches!(failure.error, PointerError::NotFound { .. }));
    }

    #[test]
    fn apply_patch_ops_observe_earlier_effects() {
        let base = json!({});
        let ops = vec![
            Op::Add { path: ptr("/a"), value: json!([]) },
            Op::Add { path: ptr("/a/-"), value: json!(1) },
            Op::Test { path: ptr("/a"), value: json!([1]) },
        ];
        assert_eq!(apply_patch(&base, &ops).unwrap(), json!({"a": [1]}));
    }
}
