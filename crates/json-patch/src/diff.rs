//! Patch generation: diff two documents into a patch that transforms one
//! into the other.
//!
//! The generator recurses over objects and treats every other difference as
//! a whole-value replace. Array differences in particular are a single
//! coarse replace of the whole array; element-wise array diffing is a
//! deliberate non-goal. Object keys are visited in the sorted order of the
//! underlying map, so output is deterministic for equal-content inputs.

use std::mem::discriminant;

use serde_json::Value;

use json_patch_pointer::Pointer;

use crate::types::Op;

/// Generate a patch that transforms `base` into `target`.
///
/// With `paranoid`, every `remove` and `replace` is preceded by a `test`
/// asserting the old value, guarding the patch against replay on a document
/// that no longer matches. With `pretest`, exactly one `test` of the whole
/// `base` document is emitted first.
///
/// # Example
///
/// ```
/// use json_patch::{generate, to_json_patch};
/// use serde_json::json;
///
/// let base = json!({"foo": {"bar": 5, "baz": 6}});
/// let target = json!({"foo": {"bar": 5}});
/// let ops = generate(&base, &target, false, false);
/// assert_eq!(
///     to_json_patch(&ops),
///     json!([{"op": "remove", "path": "/foo/baz"}]),
/// );
/// ```
pub fn generate(base: &Value, target: &Value, paranoid: bool, pretest: bool) -> Vec<Op> {
    let mut ops = Vec::new();
    if pretest {
        ops.push(Op::Test {
            path: Pointer::root(),
            value: base.clone(),
        });
    }
    diff_at(&mut ops, &Pointer::root(), base, target, paranoid);
    ops
}

fn diff_at(ops: &mut Vec<Op>, ptr: &Pointer, base: &Value, target: &Value, paranoid: bool) {
    if discriminant(base) != discriminant(target) {
        push_replace(ops, ptr, base, target, paranoid);
        return;
    }
    match (base, target) {
        (Value::Object(base_map), Value::Object(target_map)) => {
            // Pass 1: keys present in base — removed or changed.
            for (key, old_val) in base_map {
                let child = ptr.append(key.as_str());
                match target_map.get(key) {
                    None => {
                        if paranoid {
                            ops.push(Op::Test {
                                path: child.clone(),
                                value: old_val.clone(),
                            });
                        }
                        ops.push(Op::Remove { path: child });
                    }
                    Some(new_val) => diff_at(ops, &child, old_val, new_val, paranoid),
                }
            }
            // Pass 2: keys only in target — additions.
            for (key, new_val) in target_map {
                if base_map.contains_key(key) {
                    continue;
                }
                ops.push(Op::Add {
                    path: ptr.append(key.as_str()),
                    value: new_val.clone(),
                });
            }
        }
        // Arrays and scalars: one whole-value replace when unequal.
        _ => {
            if base != target {
                push_replace(ops, ptr, base, target, paranoid);
            }
        }
    }
}

fn push_replace(ops: &mut Vec<Op>, ptr: &Pointer, base: &Value, target: &Value, paranoid: bool) {
    if paranoid {
        ops.push(Op::Test {
            path: ptr.clone(),
            value: base.clone(),
        });
    }
    ops.push(Op::Replace {
        path: ptr.clone(),
        value: target.clone(),
    });
}
