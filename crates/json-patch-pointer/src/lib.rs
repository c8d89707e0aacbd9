//! JSON Pointer (RFC 6901) utilities.
//!
//! This crate implements [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901):
//! parsing and formatting of pointer strings, and resolution and mutation of
//! values inside a `serde_json::Value` document.
//!
//! # Example
//!
//! ```
//! use json_patch_pointer::Pointer;
//! use serde_json::json;
//!
//! let ptr: Pointer = "/foo/bar".parse().unwrap();
//! assert_eq!(ptr.tokens(), ["foo", "bar"]);
//! assert_eq!(ptr.to_string(), "/foo/bar");
//!
//! let doc = json!({"foo": {"bar": 42}});
//! assert_eq!(ptr.get(&doc).unwrap(), &json!(42));
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

mod resolve;

/// Unescapes a JSON Pointer reference token.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
/// The scan is a single left-to-right pass that consumes each escape pair
/// atomically, so escape output can never be re-read as escape input.
/// A `~` not followed by `0` or `1` is an error.
///
/// # Example
///
/// ```
/// use json_patch_pointer::unescape_token;
///
/// assert_eq!(unescape_token("a~0b").unwrap(), "a~b");
/// assert_eq!(unescape_token("c~1d").unwrap(), "c/d");
/// assert!(unescape_token("bad~2").is_err());
/// ```
pub fn unescape_token(token: &str) -> Result<String, PointerError> {
    if !token.contains('~') {
        return Ok(token.to_string());
    }
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => {
                return Err(PointerError::IllegalEscape {
                    token: token.to_string(),
                })
            }
        }
    }
    Ok(out)
}

/// Escapes a raw token for use in a JSON Pointer string.
///
/// Per RFC 6901, `~` is replaced with `~0` and `/` with `~1`.
///
/// # Example
///
/// ```
/// use json_patch_pointer::escape_token;
///
/// assert_eq!(escape_token("a~b"), "a~0b");
/// assert_eq!(escape_token("c/d"), "c~1d");
/// assert_eq!(escape_token("plain"), "plain");
/// ```
pub fn escape_token(token: &str) -> String {
    if !token.contains('~') && !token.contains('/') {
        return token.to_string();
    }
    // Order matters: ~ must be escaped before /, otherwise the slash step
    // would corrupt the tildes it introduces.
    token.replace('~', "~0").replace('/', "~1")
}

/// A JSON Pointer: an ordered sequence of raw (already unescaped) reference
/// tokens. The empty sequence refers to the whole document.
///
/// Pointers are cheap, immutable, and freely cloneable; the navigation and
/// mutation primitives live in [`Pointer::get`], [`Pointer::replace`],
/// [`Pointer::put`], [`Pointer::remove`], [`Pointer::copy`],
/// [`Pointer::move_to`], and [`Pointer::test`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer(Vec<String>);

impl Pointer {
    /// The empty pointer, referring to the whole document.
    pub fn root() -> Self {
        Pointer(Vec::new())
    }

    /// Build a pointer from raw (unescaped) tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Pointer(tokens.into_iter().map(Into::into).collect())
    }

    /// Parse an RFC 6901 pointer string.
    ///
    /// The empty string is the valid root pointer. Any non-empty pointer
    /// must start with `/`.
    ///
    /// # Example
    ///
    /// ```
    /// use json_patch_pointer::Pointer;
    ///
    /// assert!(Pointer::parse("").unwrap().is_root());
    /// assert_eq!(Pointer::parse("/a~0b/c~1d").unwrap().tokens(), ["a~b", "c/d"]);
    /// assert!(Pointer::parse("no-slash").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PointerError> {
        if s.is_empty() {
            return Ok(Pointer::root());
        }
        if !s.starts_with('/') {
            return Err(PointerError::NoLeadingSlash {
                pointer: s.to_string(),
            });
        }
        let tokens = s[1..]
            .split('/')
            .map(unescape_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pointer(tokens))
    }

    /// The raw tokens of this pointer.
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if this pointer refers to the whole document.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new pointer extended by one raw token.
    ///
    /// ```
    /// use json_patch_pointer::Pointer;
    ///
    /// let ptr = Pointer::root().append("a/b");
    /// assert_eq!(ptr.to_string(), "/a~1b");
    /// ```
    pub fn append(&self, token: impl Into<String>) -> Pointer {
        let mut tokens = self.0.clone();
        tokens.push(token.into());
        Pointer(tokens)
    }

    /// Splits off the first token, returning it and the rest of the pointer.
    pub fn shift(&self) -> Option<(&str, Pointer)> {
        let (first, rest) = self.0.split_first()?;
        Some((first.as_str(), Pointer(rest.to_vec())))
    }

    /// Splits off the last token, returning it and the parent pointer.
    pub fn chop(&self) -> Option<(&str, Pointer)> {
        let (last, parent) = self.0.split_last()?;
        Some((last.as_str(), Pointer(parent.to_vec())))
    }

    /// True if `other` lives at or under this pointer: `other` is at least
    /// as long and shares this pointer's tokens as a prefix.
    ///
    /// ```
    /// use json_patch_pointer::Pointer;
    ///
    /// let a = Pointer::parse("/foo").unwrap();
    /// let b = Pointer::parse("/foo/bar").unwrap();
    /// assert!(a.contains(&b));
    /// assert!(!b.contains(&a));
    /// ```
    pub fn contains(&self, other: &Pointer) -> bool {
        other.0.len() >= self.0.len() && other.0[..self.0.len()] == self.0[..]
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.0 {
            write!(f, "/{}", escape_token(token))?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pointer::parse(s)
    }
}

/// Errors raised while parsing a pointer or resolving it against a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// A `~` in a pointer string was not followed by `0` or `1`.
    #[error("`{token}` has an illegal unescaped ~")]
    IllegalEscape { token: String },
    /// A non-empty pointer string did not start with `/`.
    #[error("`{pointer}`: initial character of a non-empty pointer must be `/`")]
    NoLeadingSlash { pointer: String },
    /// An object key (or the whole path) was absent where existence is
    /// required.
    #[error("`{pointer}` does not refer to an existing location")]
    NotFound { pointer: String },
    /// An array offset fell outside the normalized bounds.
    #[error("index {index} out of bounds for array of length {len}")]
    OutOfBounds { index: i64, len: usize },
    /// An array was indexed with a token that is not a base-10 integer.
    #[error("`{token}` is not a valid array offset")]
    InvalidOffset { token: String },
    /// The pointer tried to descend through a scalar value.
    #[error("`{pointer}` descends through a non-indexable value")]
    NotIndexable { pointer: String },
    /// A `test` assertion found an unequal value.
    #[error("value at `{pointer}` does not match the expected value")]
    TestMismatch { pointer: String },
}
