//! Specter SDK - the host object model
//!
//! This crate provides the runtime that specter subjects live in: values,
//! classes with visibility-tagged members, live objects, a class registry,
//! and access inspection over that metadata. The engine programs against
//! these types; it never decides visibility itself.
//!
//! # Example
//!
//! ```ignore
//! use specter_sdk::{ClassDef, ClassRegistry, Value, Visibility};
//!
//! let registry = ClassRegistry::new();
//! registry.register(
//!     ClassDef::builder("Greeter")
//!         .constant("GREETING", "hello")
//!         .method("greet", Visibility::Public, |_, args| {
//!             Ok(Value::from(format!("hello {}", args[0].as_str().unwrap_or("?"))))
//!         })
//!         .build(),
//! );
//! ```

#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod inspector;
pub mod registry;
pub mod types;
pub mod value;

pub use convert::{arg, FromValue};
pub use error::{HostResult, InstantiationError, Thrown};
pub use inspector::{AccessInspector, MagicAwareAccessInspector, VisibilityAccessInspector};
pub use registry::ClassRegistry;
pub use types::{
    ClassBuilder, ClassDef, MethodBody, MethodDef, MethodFn, PropertyDef, StaticFn, Visibility,
    CONSTRUCTOR, MAGIC_CALL, MAGIC_GET, MAGIC_SET,
};
pub use value::{ObjectRef, Value};
