//! Export/load facade.
//!
//! [`export`] turns an exportable instance into its attribute mapping plus
//! the [`TYPE_KEY`] tag; [`load`] resolves the tag through the global
//! registry and delegates reconstruction to the target type's factory. Both
//! are single-pass and synchronous, with no facade-held state.

use std::any::Any;

use serde_json::Value;
use tracing::debug;

use crate::error::{ExportError, LoadError};
use crate::exportable::{Attributes, Exportable};
use crate::name::TypeName;
use crate::registry;

/// Reserved key carrying the qualified type name in exported data.
///
/// Application attribute names must never collide with it; the export side
/// treats a collision as a contract violation.
pub const TYPE_KEY: &str = "__type__";

/// Exports `value` into a tagged attribute mapping.
///
/// The qualified name is derived from `T` directly, so exporting does not
/// require registration; only loading does.
pub fn export<T: Exportable>(value: &T) -> Result<Attributes, ExportError> {
    let name = TypeName::of::<T>()?;
    tag(value.export(), name)
}

/// Exports a type-erased value.
///
/// The qualified name comes from the global registry's reverse index, so the
/// value's concrete type must have been registered.
pub fn export_dyn(value: &dyn Exportable) -> Result<Attributes, ExportError> {
    let any: &dyn Any = value;
    let name = registry::global().name_for_value(any)?;
    tag(value.export(), name)
}

/// Rebuilds a boxed instance from tagged data produced by [`export`].
///
/// The concrete type is resolved through the global registry; its factory
/// receives the attributes with the tag removed. Factory failures propagate
/// unchanged.
pub fn load(data: Attributes) -> Result<Box<dyn Exportable>, LoadError> {
    let (name, attrs) = untag(data)?;
    let resolved = registry::global().resolve(&name)?;
    debug!(name = %name, "loading instance");
    resolved.load(attrs)
}

/// Rebuilds a `T` from tagged data.
///
/// Like [`load`], but fails with [`LoadError::TypeMismatch`] when the tag
/// names a different registered type than `T`, and returns the instance
/// unboxed.
pub fn load_as<T: Exportable>(data: Attributes) -> Result<T, LoadError> {
    let (name, attrs) = untag(data)?;
    let resolved = registry::global().resolve(&name)?;
    if !resolved.is::<T>() {
        return Err(LoadError::TypeMismatch {
            expected: TypeName::of::<T>()?,
            found: name,
        });
    }
    T::load(attrs)
}

fn tag(mut attrs: Attributes, name: TypeName) -> Result<Attributes, ExportError> {
    if attrs.contains_key(TYPE_KEY) {
        return Err(ExportError::ReservedKey { type_name: name });
    }
    attrs.insert(TYPE_KEY.to_string(), Value::String(name.as_str().to_string()));
    Ok(attrs)
}

fn untag(mut data: Attributes) -> Result<(TypeName, Attributes), LoadError> {
    let raw = data.remove(TYPE_KEY).ok_or(LoadError::MissingTypeKey)?;
    let name = match raw {
        Value::String(tag) => TypeName::parse(&tag)?,
        other => {
            return Err(LoadError::InvalidTypeKey {
                found: value_kind(&other),
            })
        }
    };
    Ok((name, data))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
