//! Qualified type names.
//!
//! A [`TypeName`] is a dotted identifier of the form
//! `namespace.path.LocalName`: the final segment is the local type name, the
//! preceding segments the namespace path. Identical types always derive the
//! identical string, and the string resolves back to the same type within a
//! process whose registry holds it (see [`crate::registry`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResolutionError;

/// Separator between segments of a qualified name.
const SEPARATOR: char = '.';

/// Rust path fragments that have no counterpart in a qualified name.
const UNNAMEABLE: &[(&str, &str)] = &[
    ("{{closure}}", "closures have no addressable name"),
    ("<", "generic parameters are not part of a qualified name"),
    ("&", "references do not name a type"),
    ("[", "slices and arrays do not name a type"),
    ("*", "raw pointers do not name a type"),
    ("dyn ", "trait objects do not name a concrete type"),
    ("fn(", "function types do not name a concrete type"),
    ("(", "tuples do not name a type"),
];

/// Dotted qualified name uniquely identifying a type.
///
/// Serializes as a plain string (transparent newtype), so it can sit directly
/// in exported JSON data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeName(String);

impl TypeName {
    /// Derives the canonical qualified name of `T` from its Rust path.
    ///
    /// Pure and deterministic within a build: repeated calls for the same
    /// type return the identical string. Fails with
    /// [`ResolutionError::Unnameable`] for types without a stable dotted path
    /// (closures, generics, references, primitives, trait objects).
    pub fn of<T: ?Sized>() -> Result<Self, ResolutionError> {
        Self::from_rust_path(std::any::type_name::<T>())
    }

    /// Derives the qualified name of a value's type.
    ///
    /// Equivalent to [`TypeName::of`] for the value's static type.
    pub fn for_value<T: ?Sized>(_value: &T) -> Result<Self, ResolutionError> {
        Self::of::<T>()
    }

    /// Parses and validates a dotted qualified name.
    ///
    /// Requires at least one separator, non-empty segments, and segments that
    /// are plain identifiers (letter or underscore first, then letters,
    /// digits, or underscores).
    pub fn parse(name: &str) -> Result<Self, ResolutionError> {
        let malformed = |reason: &str| ResolutionError::Malformed {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if name.is_empty() {
            return Err(malformed("the name is empty"));
        }
        if !name.contains(SEPARATOR) {
            return Err(malformed("no namespace separator"));
        }
        for segment in name.split(SEPARATOR) {
            if segment.is_empty() {
                return Err(malformed("empty segment"));
            }
            if !segment
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            {
                return Err(malformed("segment must start with a letter or underscore"));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(malformed("segment contains invalid characters"));
            }
        }
        Ok(Self(name.to_string()))
    }

    fn from_rust_path(rust_name: &'static str) -> Result<Self, ResolutionError> {
        for &(needle, reason) in UNNAMEABLE {
            if rust_name.contains(needle) {
                return Err(ResolutionError::Unnameable { rust_name, reason });
            }
        }
        if !rust_name.contains("::") {
            return Err(ResolutionError::Unnameable {
                rust_name,
                reason: "the type has no defining namespace",
            });
        }
        Self::parse(&rust_name.replace("::", "."))
    }

    /// The full dotted name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace path, i.e. everything before the last separator.
    pub fn namespace(&self) -> &str {
        match self.0.rfind(SEPARATOR) {
            Some(index) => &self.0[..index],
            None => "",
        }
    }

    /// The local type name, i.e. the final segment.
    pub fn local_name(&self) -> &str {
        match self.0.rfind(SEPARATOR) {
            Some(index) => &self.0[index + 1..],
            None => &self.0,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TypeName {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
