//! Typewriter - serialize qualified type names and call them up again when
//! you need them.
//!
//! The crate does three things, leaves first:
//!
//! - **[`name`]**: converts between a runtime type and its canonical dotted
//!   identifier ([`TypeName`]), and validates such identifiers.
//! - **[`registry`]**: resolves an identifier back to a runtime type through
//!   an explicit process-wide [`TypeRegistry`] populated at startup.
//! - **[`exchange`]**: exports any [`Exportable`] instance into a tagged
//!   attribute mapping (`attributes + "__type__"`), and loads such a mapping
//!   back into a fresh instance by resolving the tag.
//!
//! This is deliberately not an object-graph serializer: export is
//! single-level and non-recursive, and loading trusts each type's own
//! factory to rebuild itself from the exported mapping.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Value};
//! use typewriter::{Attributes, Exportable, LoadError};
//!
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl Exportable for Point {
//!     fn export(&self) -> Attributes {
//!         let mut attrs = Attributes::new();
//!         attrs.insert("x".to_string(), json!(self.x));
//!         attrs.insert("y".to_string(), json!(self.y));
//!         attrs
//!     }
//!
//!     fn load(data: Attributes) -> Result<Self, LoadError> {
//!         let x = data
//!             .get("x")
//!             .and_then(Value::as_i64)
//!             .ok_or_else(|| LoadError::missing_attribute("x"))?;
//!         let y = data
//!             .get("y")
//!             .and_then(Value::as_i64)
//!             .ok_or_else(|| LoadError::missing_attribute("y"))?;
//!         Ok(Point { x, y })
//!     }
//! }
//!
//! typewriter::registry::global().register::<Point>()?;
//!
//! let exported = typewriter::export(&Point { x: 1, y: 2 })?;
//! assert_eq!(exported["x"], json!(1));
//! assert!(exported[typewriter::TYPE_KEY].as_str().unwrap().ends_with(".Point"));
//!
//! let restored: Point = typewriter::load_as(exported)?;
//! assert_eq!(restored.x, 1);
//! assert_eq!(restored.y, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod exchange;
pub mod exportable;
pub mod name;
pub mod registry;

// Re-export main types
pub use error::{ExportError, LoadError, ResolutionError};
pub use exchange::{export, export_dyn, load, load_as, TYPE_KEY};
pub use exportable::{Attributes, Exportable};
pub use name::TypeName;
pub use registry::{global, ResolvedType, TypeRegistry};

/// Library version from the crate metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
