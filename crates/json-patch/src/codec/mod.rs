//! Codecs for the JSON Patch wire format.

pub mod json;
