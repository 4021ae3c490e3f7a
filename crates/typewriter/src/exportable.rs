//! The export/load capability.
//!
//! Any type that wants to participate in tagged export and load implements
//! [`Exportable`]. Conformance is the explicit trait impl; the facade and the
//! registry make no other assumption about the type (no base type, no derive,
//! no registration required just to export).

use std::any::Any;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::LoadError;

/// Attribute mapping produced by [`Exportable::export`] and consumed by
/// [`Exportable::load`]. Keys are attribute names, values anything JSON can
/// carry (scalars, strings, nested maps and sequences).
pub type Attributes = Map<String, Value>;

/// Two-operation capability for round-trip serialization through a qualified
/// type name.
///
/// `export` snapshots an instance, `load` rebuilds a new, independent one.
/// The contract does not mandate deep-copy semantics: shallow export is
/// acceptable, and implementers own the aliasing consequences for mutable
/// nested values.
pub trait Exportable: Any {
    /// Produces the instance's externally relevant attributes.
    ///
    /// Must not contain the reserved [`TYPE_KEY`](crate::exchange::TYPE_KEY);
    /// the facade rejects such an export as a contract violation.
    fn export(&self) -> Attributes;

    /// Builds a new, fully-initialized instance from attributes previously
    /// produced by [`export`](Exportable::export) (or hand-constructed
    /// equivalently).
    ///
    /// Whether missing keys fail fast or fall back to defaults is each type's
    /// own policy; [`LoadError::missing_attribute`] and
    /// [`LoadError::invalid_attribute`] exist so implementations fail
    /// consistently. The facade passes these errors through unchanged.
    fn load(data: Attributes) -> Result<Self, LoadError>
    where
        Self: Sized;
}

impl fmt::Debug for dyn Exportable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exportable").finish_non_exhaustive()
    }
}
