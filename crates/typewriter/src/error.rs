//! Error types for name resolution, export, and load failures.
//!
//! Each failure domain gets its own enum. Nothing is retried or silently
//! recovered: resolution and export are deterministic, so a failure means a
//! programming or data-integrity fault and is surfaced to the caller with the
//! offending identifier or key in the message.

use std::any::TypeId;
use std::error::Error as StdError;

use thiserror::Error;

use crate::exchange::TYPE_KEY;
use crate::name::TypeName;

/// Errors arising while deriving, parsing, or resolving a qualified type name.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The identifier does not follow the `namespace.LocalName` format.
    #[error("malformed type name '{name}': {reason}")]
    Malformed {
        /// The offending identifier, verbatim.
        name: String,
        /// What the format check rejected.
        reason: String,
    },

    /// The Rust type has no stable dotted path (closures, generics,
    /// references, primitives, and other unnameable shapes).
    #[error("cannot derive a qualified name for '{rust_name}': {reason}")]
    Unnameable {
        /// The raw Rust path as reported by the compiler.
        rust_name: &'static str,
        /// Why the path cannot become a qualified name.
        reason: &'static str,
    },

    /// No type has been registered under the identifier.
    #[error("no type registered under '{name}'")]
    NotRegistered {
        /// The identifier that failed to resolve.
        name: TypeName,
    },

    /// Reverse lookup failed: the value's runtime type was never registered.
    #[error("runtime type {type_id:?} is not registered")]
    ValueNotRegistered {
        /// The runtime type id of the unregistered value.
        type_id: TypeId,
    },
}

/// Errors raised by the export side of the exchange facade.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The instance's own export already used the reserved tag key.
    #[error("exported attributes of '{type_name}' already contain the reserved key '{key}'", key = TYPE_KEY)]
    ReservedKey {
        /// The type whose export collided with the tag.
        type_name: TypeName,
    },

    /// The instance's type name could not be derived or looked up.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Errors raised by the load side of the exchange facade, and by individual
/// [`Exportable::load`](crate::Exportable::load) factories.
///
/// The facade never masks factory failures: a `MissingAttribute`,
/// `InvalidAttribute`, or `Construction` value produced inside a type's own
/// `load` reaches the caller unchanged.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data carries no reserved tag key.
    #[error("exported data is missing the '{key}' tag", key = TYPE_KEY)]
    MissingTypeKey,

    /// The reserved tag key is present but not a string.
    #[error("the '{key}' tag must be a string, found {found}", key = TYPE_KEY)]
    InvalidTypeKey {
        /// The JSON kind actually found under the tag.
        found: &'static str,
    },

    /// The tag could not be parsed or resolved.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The tag resolved to a type registered without the export/load
    /// capability.
    #[error("type '{name}' is registered without the export/load capability")]
    NotExportable {
        /// The resolved but non-exportable type name.
        name: TypeName,
    },

    /// The tag names a different registered type than the one requested.
    #[error("expected an instance of '{expected}', data is tagged '{found}'")]
    TypeMismatch {
        /// The type the caller asked for.
        expected: TypeName,
        /// The type the tag names.
        found: TypeName,
    },

    /// A required attribute is absent from the exported data.
    #[error("missing required attribute '{attribute}'")]
    MissingAttribute {
        /// The absent attribute name.
        attribute: String,
    },

    /// An attribute is present but its value cannot be used.
    #[error("invalid attribute '{attribute}': {reason}")]
    InvalidAttribute {
        /// The offending attribute name.
        attribute: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Construction failed for a reason specific to the target type.
    #[error("construction failed: {source}")]
    Construction {
        /// The type-specific failure.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl LoadError {
    /// Convenience constructor for factories that find a required key absent.
    pub fn missing_attribute(attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute: attribute.into(),
        }
    }

    /// Convenience constructor for factories that reject an attribute value.
    pub fn invalid_attribute(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Wraps a type-specific construction failure.
    pub fn construction(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Construction {
            source: source.into(),
        }
    }
}
