//! Core types for JSON Patch: the operation enum and error types.

use serde_json::Value;
use thiserror::Error;

use json_patch_pointer::{Pointer, PointerError};

/// A single JSON Patch operation, as defined by RFC 6902.
///
/// `path` is the target of the operation; `move` and `copy` additionally
/// carry the source location in `from`. Invalid combinations (missing
/// `value`, missing `from`, unknown op name) are rejected by the codec at
/// construction time, before any document is touched.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Pointer, value: Value },
    Remove { path: Pointer },
    Replace { path: Pointer, value: Value },
    Move { path: Pointer, from: Pointer },
    Copy { path: Pointer, from: Pointer },
    Test { path: Pointer, value: Value },
}

impl Op {
    /// The operation name as it appears on the wire.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
        }
    }

    /// The target pointer of the operation.
    pub fn path(&self) -> &Pointer {
        match self {
            Op::Add { path, .. } => path,
            Op::Remove { path } => path,
            Op::Replace { path, .. } => path,
            Op::Move { path, .. } => path,
            Op::Copy { path, .. } => path,
            Op::Test { path, .. } => path,
        }
    }

    /// The source pointer, present only for `move` and `copy`.
    pub fn from(&self) -> Option<&Pointer> {
        match self {
            Op::Move { from, .. } | Op::Copy { from, .. } => Some(from),
            _ => None,
        }
    }
}

/// An ordered list of operations, applied left-to-right. Ordering is
/// semantically significant: later operations observe the effects of
/// earlier ones.
pub type Patch = Vec<Op>;

/// Construction-time errors: a patch document that cannot be decoded into
/// operations. These abort before any document mutation is attempted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    /// Malformed patch document, unknown op name, or missing required field.
    #[error("invalid operation: {0}")]
    InvalidOp(String),
    /// A `path` or `from` field did not parse as a JSON Pointer.
    #[error(transparent)]
    Pointer(#[from] PointerError),
}

/// Returned when applying a patch fails partway through.
///
/// There is no rollback: `doc` is the document after every operation before
/// `index` was applied, and is part of the observable contract.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("operation [index = {index}] failed: {error}")]
pub struct PatchFailure {
    /// The partially-applied document.
    pub doc: Value,
    /// Zero-based index of the first failing operation.
    pub index: usize,
    /// The error that operation produced.
    pub error: PointerError,
}
