//! JSON Patch implementation (RFC 6902).
//!
//! A JSON Patch is an ordered list of operations in the form of:
//!
//! ```json
//! [
//!   {"op": "test", "path": "/foo", "value": "bar"},
//!   {"op": "replace", "path": "/foo", "value": "baz"}
//! ]
//! ```
//!
//! See <http://tools.ietf.org/html/rfc6902> for more information.
//!
//! # Modules
//!
//! - [`types`] — the [`Op`] enum and error types.
//! - [`codec`] — the RFC 6902 wire format ([`parse_patch`], `to_json`, ...).
//! - [`apply`] — sequential patch application with failure localization.
//! - [`diff`] — [`generate`] a patch from a pair of documents.
//!
//! # Example
//!
//! ```
//! use json_patch::{apply_patch, parse_patch};
//! use serde_json::json;
//!
//! let patch = parse_patch(br#"[{"op":"replace","path":"/foo","value":6}]"#).unwrap();
//! let doc = apply_patch(&json!({"foo": 5}), &patch).unwrap();
//! assert_eq!(doc, json!({"foo": 6}));
//! ```

pub mod apply;
pub mod codec;
pub mod diff;
pub mod types;

pub use apply::{apply_op, apply_patch};
pub use codec::json::{from_json, from_json_patch, parse_patch, to_json, to_json_patch};
pub use diff::generate;
pub use types::{Op, Patch, PatchError, PatchFailure};

pub use json_patch_pointer::{Pointer, PointerError};

/// Media type for JSON Patch documents, per RFC 6902 §3.
pub const CONTENT_TYPE: &str = "application/json-patch+json";
