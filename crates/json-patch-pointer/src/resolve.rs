//! Resolution and mutation of pointers against `serde_json::Value` documents.
//!
//! Every mutation primitive locates the parent container by resolving all but
//! the last token, then acts on the last token against that container. The
//! document is an owned tree, so array growth and shrink mutate the backing
//! `Vec` in place; no ancestor rewriting is needed.

use serde_json::Value;

use crate::{Pointer, PointerError};

/// Parse an array token as a base-10 offset and normalize negative
/// (end-relative) values against `len`. The result must land in `[0, len)`.
fn normalize_offset(token: &str, len: usize) -> Result<usize, PointerError> {
    let index: i64 = token.parse().map_err(|_| PointerError::InvalidOffset {
        token: token.to_string(),
    })?;
    let norm = if index < 0 { index + len as i64 } else { index };
    if norm < 0 || norm >= len as i64 {
        return Err(PointerError::OutOfBounds { index, len });
    }
    Ok(norm as usize)
}

/// Like [`normalize_offset`], but for insert positions: `len` itself is a
/// valid offset, meaning "insert at end".
fn normalize_insert_offset(token: &str, len: usize) -> Result<usize, PointerError> {
    let index: i64 = token.parse().map_err(|_| PointerError::InvalidOffset {
        token: token.to_string(),
    })?;
    let norm = if index < 0 { index + len as i64 } else { index };
    if norm < 0 || norm > len as i64 {
        return Err(PointerError::OutOfBounds { index, len });
    }
    Ok(norm as usize)
}

/// Walk `tokens` down from `doc`, returning the container they land on.
/// `ptr` is only used for error messages.
fn descend_mut<'a>(
    ptr: &Pointer,
    doc: &'a mut Value,
    tokens: &[String],
) -> Result<&'a mut Value, PointerError> {
    let mut current = doc;
    for token in tokens {
        current = match current {
            Value::Object(map) => map.get_mut(token).ok_or_else(|| PointerError::NotFound {
                pointer: ptr.to_string(),
            })?,
            Value::Array(arr) => {
                let len = arr.len();
                &mut arr[normalize_offset(token, len)?]
            }
            _ => {
                return Err(PointerError::NotIndexable {
                    pointer: ptr.to_string(),
                })
            }
        };
    }
    Ok(current)
}

impl Pointer {
    /// Resolve this pointer against `doc`, returning the addressed value.
    ///
    /// The root pointer resolves to `doc` itself. Object keys must be
    /// present; array offsets are normalized (negative counts from the end)
    /// and bounds-checked; descending through a scalar is an error.
    ///
    /// # Example
    ///
    /// ```
    /// use json_patch_pointer::Pointer;
    /// use serde_json::json;
    ///
    /// let doc = json!({"foo": ["bar", 5]});
    /// let last: Pointer = "/foo/-1".parse().unwrap();
    /// assert_eq!(last.get(&doc).unwrap(), &json!(5));
    /// ```
    pub fn get<'a>(&self, doc: &'a Value) -> Result<&'a Value, PointerError> {
        let mut current = doc;
        for token in self.tokens() {
            current = match current {
                Value::Object(map) => map.get(token).ok_or_else(|| PointerError::NotFound {
                    pointer: self.to_string(),
                })?,
                Value::Array(arr) => &arr[normalize_offset(token, arr.len())?],
                _ => {
                    return Err(PointerError::NotIndexable {
                        pointer: self.to_string(),
                    })
                }
            };
        }
        Ok(current)
    }

    /// Overwrite the value at this pointer, which must already exist.
    ///
    /// The root pointer replaces the whole document.
    pub fn replace(&self, doc: &mut Value, val: Value) -> Result<(), PointerError> {
        let Some((last, parent)) = self.tokens().split_last() else {
            *doc = val;
            return Ok(());
        };
        match descend_mut(self, doc, parent)? {
            Value::Object(map) => match map.get_mut(last) {
                Some(slot) => {
                    *slot = val;
                    Ok(())
                }
                None => Err(PointerError::NotFound {
                    pointer: self.to_string(),
                }),
            },
            Value::Array(arr) => {
                let len = arr.len();
                arr[normalize_offset(last, len)?] = val;
                Ok(())
            }
            _ => Err(PointerError::NotIndexable {
                pointer: self.to_string(),
            }),
        }
    }

    /// Put `val` at this pointer, creating the location if needed.
    ///
    /// Unlike [`Pointer::replace`], an object key is created or overwritten
    /// unconditionally. In an array, a final token of `-` appends; otherwise
    /// the token is a normalized offset in `[0, len]` (`len` meaning "insert
    /// at end") and `val` is inserted before it, shifting later elements.
    ///
    /// The root pointer is rejected; a whole-document overwrite is
    /// [`Pointer::replace`]'s job.
    pub fn put(&self, doc: &mut Value, val: Value) -> Result<(), PointerError> {
        let Some((last, parent)) = self.tokens().split_last() else {
            return Err(PointerError::NotFound {
                pointer: self.to_string(),
            });
        };
        match descend_mut(self, doc, parent)? {
            Value::Object(map) => {
                map.insert(last.clone(), val);
                Ok(())
            }
            Value::Array(arr) => {
                if last == "-" {
                    arr.push(val);
                } else {
                    let len = arr.len();
                    arr.insert(normalize_insert_offset(last, len)?, val);
                }
                Ok(())
            }
            _ => Err(PointerError::NotIndexable {
                pointer: self.to_string(),
            }),
        }
    }

    /// Remove and return the value at this pointer.
    ///
    /// Object keys must be present; array offsets are normalized and
    /// bounds-checked, and removal shifts later elements down.
    pub fn remove(&self, doc: &mut Value) -> Result<Value, PointerError> {
        let Some((last, parent)) = self.tokens().split_last() else {
            return Err(PointerError::NotFound {
                pointer: self.to_string(),
            });
        };
        match descend_mut(self, doc, parent)? {
            Value::Object(map) => map.remove(last).ok_or_else(|| PointerError::NotFound {
                pointer: self.to_string(),
            }),
            Value::Array(arr) => {
                let len = arr.len();
                Ok(arr.remove(normalize_offset(last, len)?))
            }
            _ => Err(PointerError::NotIndexable {
                pointer: self.to_string(),
            }),
        }
    }

    /// Deep-copy the value at this pointer to the location `at`.
    ///
    /// The clone guarantees the destination never aliases the source; later
    /// mutation of either leaves the other untouched.
    pub fn copy(&self, doc: &mut Value, at: &Pointer) -> Result<(), PointerError> {
        let val = self.get(doc)?.clone();
        at.put(doc, val)
    }

    /// Move the value at this pointer to the location `at`.
    ///
    /// The value is put at the destination first, then removed from the
    /// source on the updated document. Moving into a child path of a scalar
    /// fails naturally in the put step with
    /// [`PointerError::NotIndexable`]; there is no special overlap check.
    pub fn move_to(&self, doc: &mut Value, at: &Pointer) -> Result<(), PointerError> {
        let val = self.get(doc)?.clone();
        at.put(doc, val)?;
        self.remove(doc)?;
        Ok(())
    }

    /// Assert that the value at this pointer deep-equals `sample`.
    ///
    /// Resolution errors propagate; an unequal value is
    /// [`PointerError::TestMismatch`]. Never mutates the document.
    pub fn test(&self, doc: &Value, sample: &Value) -> Result<(), PointerError> {
        let val = self.get(doc)?;
        if val != sample {
            return Err(PointerError::TestMismatch {
                pointer: self.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ptr(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    #[test]
    fn get_root() {
        let doc = json!({"foo": 5});
        assert_eq!(ptr("").get(&doc).unwrap(), &doc);
    }

    #[test]
    fn get_object_key() {
        let doc = json!({"foo": {"bar": 5}});
        assert_eq!(ptr("/foo/bar").get(&doc).unwrap(), &json!(5));
        assert!(matches!(
            ptr("/foo/baz").get(&doc),
            Err(PointerError::NotFound { .. })
        ));
    }

    #[test]
    fn get_array_offsets() {
        let doc = json!({"foo": ["bar", 5]});
        assert_eq!(ptr("/foo/0").get(&doc).unwrap(), &json!("bar"));
        assert_eq!(ptr("/foo/1").get(&doc).unwrap(), &json!(5));
        assert_eq!(ptr("/foo/-1").get(&doc).unwrap(), &json!(5));
        assert_eq!(ptr("/foo/-2").get(&doc).unwrap(), &json!("bar"));
    }

    #[test]
    fn get_array_out_of_bounds() {
        let doc = json!({"foo": ["bar", 5]});
        assert!(matches!(
            ptr("/foo/2").get(&doc),
            Err(PointerError::OutOfBounds { index: 2, len: 2 })
        ));
        assert!(matches!(
            ptr("/foo/-3").get(&doc),
            Err(PointerError::OutOfBounds { index: -3, len: 2 })
        ));
    }

    #[test]
    fn get_array_bad_offset() {
        let doc = json!([1, 2]);
        assert!(matches!(
            ptr("/x").get(&doc),
            Err(PointerError::InvalidOffset { .. })
        ));
        // "-" is only meaningful for put
        assert!(matches!(
            ptr("/-").get(&doc),
            Err(PointerError::InvalidOffset { .. })
        ));
    }

    #[test]
    fn get_through_scalar() {
        let doc = json!({"foo": 5});
        assert!(matches!(
            ptr("/foo/bar").get(&doc),
            Err(PointerError::NotIndexable { .. })
        ));
    }

    #[test]
    fn replace_whole_document() {
        let mut doc = json!({"foo": 5});
        ptr("").replace(&mut doc, json!({"bar": 5})).unwrap();
        assert_eq!(doc, json!({"bar": 5}));
    }

    #[test]
    fn replace_existing_key() {
        let mut doc = json!({"foo": 5});
        ptr("/foo").replace(&mut doc, json!(6)).unwrap();
        assert_eq!(doc, json!({"foo": 6}));
    }

    #[test]
    fn replace_missing_key_fails() {
        let mut doc = json!({"foo": 5});
        assert!(matches!(
            ptr("/bar").replace(&mut doc, json!(6)),
            Err(PointerError::NotFound { .. })
        ));
        assert_eq!(doc, json!({"foo": 5}));
    }

    #[test]
    fn replace_array_element() {
        let mut doc = json!([1, 2, 3]);
        ptr("/-1").replace(&mut doc, json!(9)).unwrap();
        assert_eq!(doc, json!([1, 2, 9]));
        assert!(matches!(
            ptr("/3").replace(&mut doc, json!(0)),
            Err(PointerError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn put_creates_and_overwrites_keys() {
        let mut doc = json!({"foo": 5});
        ptr("/bar").put(&mut doc, json!(6)).unwrap();
        assert_eq!(doc, json!({"foo": 5, "bar": 6}));
        ptr("/bar").put(&mut doc, json!(7)).unwrap();
        assert_eq!(doc, json!({"foo": 5, "bar": 7}));
    }

    #[test]
    fn put_array_append() {
        let mut doc = json!({"foo": ["bar", 5]});
        ptr("/foo/-").put(&mut doc, json!(6)).unwrap();
        assert_eq!(doc, json!({"foo": ["bar", 5, 6]}));
    }

    #[test]
    fn put_array_insert() {
        let mut doc = json!(["bar", 5]);
        ptr("/0").put(&mut doc, json!(6)).unwrap();
        assert_eq!(doc, json!([6, "bar", 5]));
        ptr("/2").put(&mut doc, json!(7)).unwrap();
        assert_eq!(doc, json!([6, "bar", 7, 5]));
    }

    #[test]
    fn put_array_at_length_appends() {
        // offset == len is a valid insert position, equivalent to "-"
        let mut doc = json!([1, 2]);
        ptr("/2").put(&mut doc, json!(3)).unwrap();
        assert_eq!(doc, json!([1, 2, 3]));
        assert!(matches!(
            ptr("/4").put(&mut doc, json!(9)),
            Err(PointerError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn put_root_fails() {
        let mut doc = json!({"foo": 5});
        assert!(ptr("").put(&mut doc, json!(1)).is_err());
    }

    #[test]
    fn put_through_scalar_fails() {
        let mut doc = json!({"bar": 5});
        assert!(matches!(
            ptr("/bar/baz").put(&mut doc, json!(5)),
            Err(PointerError::NotIndexable { .. })
        ));
    }

    #[test]
    fn remove_object_key() {
        let mut doc = json!({"foo": 5, "bar": 6});
        assert_eq!(ptr("/bar").remove(&mut doc).unwrap(), json!(6));
        assert_eq!(doc, json!({"foo": 5}));
        assert!(matches!(
            ptr("/baz").remove(&mut doc),
            Err(PointerError::NotFound { .. })
        ));
    }

    #[test]
    fn remove_array_element() {
        let mut doc = json!({"foo": ["bar", 5, 6]});
        assert_eq!(ptr("/foo/-1").remove(&mut doc).unwrap(), json!(6));
        assert_eq!(doc, json!({"foo": ["bar", 5]}));
        assert_eq!(ptr("/foo/0").remove(&mut doc).unwrap(), json!("bar"));
        assert_eq!(doc, json!({"foo": [5]}));
    }

    #[test]
    fn copy_value() {
        let mut doc = json!({"foo": {"baz": 5}});
        ptr("/foo").copy(&mut doc, &ptr("/bar")).unwrap();
        assert_eq!(doc, json!({"foo": {"baz": 5}, "bar": {"baz": 5}}));
    }

    #[test]
    fn copy_is_independent_of_source() {
        let mut doc = json!({"foo": {"baz": 5}});
        ptr("/foo").copy(&mut doc, &ptr("/bar")).unwrap();
        ptr("/bar/baz").replace(&mut doc, json!(6)).unwrap();
        assert_eq!(doc, json!({"foo": {"baz": 5}, "bar": {"baz": 6}}));
    }

    #[test]
    fn move_value() {
        let mut doc = json!({"foo": 5});
        ptr("/foo").move_to(&mut doc, &ptr("/bar")).unwrap();
        assert_eq!(doc, json!({"bar": 5}));
    }

    #[test]
    fn move_into_own_child_fails() {
        let mut doc = json!({"foo": 5});
        assert!(matches!(
            ptr("/foo").move_to(&mut doc, &ptr("/foo/bar")),
            Err(PointerError::NotIndexable { .. })
        ));
    }

    #[test]
    fn move_within_array() {
        let mut doc = json!([1, 2, 3]);
        ptr("/0").move_to(&mut doc, &ptr("/-")).unwrap();
        assert_eq!(doc, json!([2, 3, 1]));
    }

    #[test]
    fn test_matches() {
        let doc = json!({"foo": ["bar", 5]});
        ptr("/foo").test(&doc, &json!(["bar", 5])).unwrap();
        ptr("/foo/-1").test(&doc, &json!(5)).unwrap();
        ptr("").test(&doc, &doc.clone()).unwrap();
    }

    #[test]
    fn test_mismatch() {
        let doc = json!({"foo": 5});
        assert!(matches!(
            ptr("/foo").test(&doc, &json!(6)),
            Err(PointerError::TestMismatch { .. })
        ));
    }

    #[test]
    fn test_resolution_error_wins_over_mismatch() {
        let doc = json!({"foo": ["bar", 5]});
        assert!(matches!(
            ptr("/foo/-3").test(&doc, &json!(5)),
            Err(PointerError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn object_equality_ignores_key_order() {
        let doc = json!({"b": 2, "a": 1});
        ptr("").test(&doc, &json!({"a": 1, "b": 2})).unwrap();
    }
}
