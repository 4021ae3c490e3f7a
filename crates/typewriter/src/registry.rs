//! Process-wide type registry.
//!
//! Resolution does not load namespaces on demand: the registry is populated
//! explicitly at startup by [`TypeRegistry::register`] (and
//! [`TypeRegistry::register_type`]) calls, and [`TypeRegistry::resolve`] is a
//! lookup. Repeated resolution of the same name is idempotent and yields a
//! handle to the same runtime type (`TypeId` identity).
//!
//! A registry can be instantiated directly (useful in tests); the exchange
//! facade uses the [`global`] singleton.

use std::any::{Any, TypeId};
use std::fmt;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use lazy_static::lazy_static;
use tracing::debug;

use crate::error::{LoadError, ResolutionError};
use crate::exportable::{Attributes, Exportable};
use crate::name::TypeName;

/// Load factory stored per registered exportable type.
type Loader = fn(Attributes) -> Result<Box<dyn Exportable>, LoadError>;

lazy_static! {
    static ref GLOBAL: TypeRegistry = TypeRegistry::new();
}

/// Returns the process-wide registry used by the exchange facade.
pub fn global() -> &'static TypeRegistry {
    &GLOBAL
}

/// Handle to a registered type, obtained from [`TypeRegistry::resolve`].
///
/// The handle is a lookup result, not an allocation: it identifies the
/// runtime type and, for exportable registrations, carries its load factory.
#[derive(Clone)]
pub struct ResolvedType {
    name: TypeName,
    type_id: TypeId,
    rust_name: &'static str,
    loader: Option<Loader>,
}

impl ResolvedType {
    /// The qualified name the type was registered under.
    pub fn name(&self) -> &TypeName {
        &self.name
    }

    /// The runtime type id.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The raw Rust path of the registered type.
    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }

    /// Whether this handle identifies `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Whether the type was registered with its load factory.
    pub fn is_exportable(&self) -> bool {
        self.loader.is_some()
    }

    /// Invokes the type's load factory with the given attributes.
    ///
    /// Fails with [`LoadError::NotExportable`] for name-only registrations.
    /// Factory failures propagate unchanged.
    pub fn load(&self, data: Attributes) -> Result<Box<dyn Exportable>, LoadError> {
        match self.loader {
            Some(loader) => loader(data),
            None => Err(LoadError::NotExportable {
                name: self.name.clone(),
            }),
        }
    }
}

impl fmt::Debug for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedType")
            .field("name", &self.name)
            .field("rust_name", &self.rust_name)
            .field("exportable", &self.loader.is_some())
            .finish()
    }
}

/// Registry mapping qualified names to runtime type handles.
pub struct TypeRegistry {
    by_name: DashMap<TypeName, ResolvedType>,
    by_type_id: DashMap<TypeId, TypeName>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            by_name: DashMap::new(),
            by_type_id: DashMap::new(),
        }
    }

    /// Registers `T` together with its load factory.
    ///
    /// Returns the qualified name `T` is now resolvable under. Idempotent:
    /// re-registering the same type is a no-op returning the same name.
    pub fn register<T: Exportable>(&self) -> Result<TypeName, ResolutionError> {
        self.insert::<T>(Some(load_boxed::<T>))
    }

    /// Registers `T` for name resolution only, without the capability.
    ///
    /// Mirrors resolving arbitrary types by name; a later
    /// [`register`](TypeRegistry::register) upgrades the entry, and a
    /// name-only registration never downgrades an exportable one.
    pub fn register_type<T: Any>(&self) -> Result<TypeName, ResolutionError> {
        self.insert::<T>(None)
    }

    fn insert<T: Any>(&self, loader: Option<Loader>) -> Result<TypeName, ResolutionError> {
        let name = TypeName::of::<T>()?;
        let entry = ResolvedType {
            name: name.clone(),
            type_id: TypeId::of::<T>(),
            rust_name: std::any::type_name::<T>(),
            loader,
        };
        match self.by_name.entry(name.clone()) {
            Entry::Occupied(mut occupied) => {
                // Upgrade-only: a loader may appear, never disappear.
                if loader.is_some() && !occupied.get().is_exportable() {
                    occupied.insert(entry);
                }
            }
            Entry::Vacant(vacant) => {
                debug!(
                    name = %name,
                    rust_name = entry.rust_name,
                    exportable = entry.loader.is_some(),
                    "type registered"
                );
                vacant.insert(entry);
            }
        }
        self.by_type_id.insert(TypeId::of::<T>(), name.clone());
        Ok(name)
    }

    /// Resolves a qualified name to its registered type handle.
    pub fn resolve(&self, name: &TypeName) -> Result<ResolvedType, ResolutionError> {
        self.by_name
            .get(name)
            .map(|entry| entry.clone())
            .ok_or_else(|| ResolutionError::NotRegistered { name: name.clone() })
    }

    /// Parses and resolves a qualified name in one step.
    pub fn resolve_str(&self, name: &str) -> Result<ResolvedType, ResolutionError> {
        self.resolve(&TypeName::parse(name)?)
    }

    /// Reverse lookup: the qualified name a value's runtime type was
    /// registered under.
    pub fn name_for_value(&self, value: &dyn Any) -> Result<TypeName, ResolutionError> {
        let type_id = value.type_id();
        self.by_type_id
            .get(&type_id)
            .map(|name| name.clone())
            .ok_or(ResolutionError::ValueNotRegistered { type_id })
    }

    /// Whether a name is registered.
    pub fn contains(&self, name: &TypeName) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn load_boxed<T: Exportable>(data: Attributes) -> Result<Box<dyn Exportable>, LoadError> {
    T::load(data).map(|value| Box::new(value) as Box<dyn Exportable>)
}
