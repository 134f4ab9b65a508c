//! Class definitions for the host object model
//!
//! A `ClassDef` is the reflection metadata and behavior of one class:
//! constants, visibility-tagged properties and methods, an optional
//! constructor, and the magic hooks (`__get`, `__set`, `__call`) that make
//! up the host's dynamic accessor protocol. Classes are built once with a
//! [`ClassBuilder`] and then shared immutably through the
//! [`ClassRegistry`](crate::ClassRegistry).
//!
//! # Example
//!
//! ```ignore
//! let counter = ClassDef::builder("Counter")
//!     .constant("MAX_SIZE", 10)
//!     .property("count", Visibility::Private, 0)
//!     .method("increment", Visibility::Public, |this, _args| {
//!         let next = this.property("count").and_then(|v| v.as_int()).unwrap_or(0) + 1;
//!         this.set_property("count", Value::from(next));
//!         Ok(Value::from(next))
//!     })
//!     .build();
//! ```

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{HostResult, InstantiationError, Thrown};
use crate::value::{ObjectRef, Value};

/// Name under which constructors are reported
pub const CONSTRUCTOR: &str = "__construct";
/// Property read hook
pub const MAGIC_GET: &str = "__get";
/// Property write hook
pub const MAGIC_SET: &str = "__set";
/// Undefined method hook
pub const MAGIC_CALL: &str = "__call";

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Accessible from anywhere
    #[default]
    Public,
    /// Accessible from the class and its subclasses
    Protected,
    /// Accessible from the declaring class only
    Private,
}

impl Visibility {
    /// Check if the member is reachable from outside the class
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// Body of an instance method or constructor
pub type MethodFn = Arc<dyn Fn(&ObjectRef, &[Value]) -> HostResult<Value> + Send + Sync>;

/// Body of a static method
pub type StaticFn = Arc<dyn Fn(&[Value]) -> HostResult<Value> + Send + Sync>;

/// Method implementation
#[derive(Clone)]
pub enum MethodBody {
    /// Receives the receiver object and arguments
    Instance(MethodFn),
    /// Class-level; receives arguments only
    Static(StaticFn),
}

/// A declared method
#[derive(Clone)]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Declared visibility
    pub visibility: Visibility,
    /// Implementation
    pub body: MethodBody,
}

impl MethodDef {
    /// Check if the method is static
    pub fn is_static(&self) -> bool {
        matches!(self.body, MethodBody::Static(_))
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static())
            .finish()
    }
}

/// A declared property
#[derive(Debug, Clone)]
pub struct PropertyDef {
    /// Property name
    pub name: String,
    /// Declared visibility
    pub visibility: Visibility,
    /// Initial value for new instances
    pub default: Value,
}

/// Reflection metadata and behavior for one class
pub struct ClassDef {
    name: String,
    constants: FxHashMap<String, Value>,
    /// Properties in declaration order
    properties: Vec<PropertyDef>,
    property_indices: FxHashMap<String, usize>,
    methods: FxHashMap<String, MethodDef>,
    constructor: Option<MethodFn>,
}

impl ClassDef {
    /// Start building a class
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder::new(name)
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a class constant by exact name
    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    /// Check if a class constant is defined
    pub fn has_constant(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    /// Get a declared property
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.property_indices
            .get(name)
            .and_then(|index| self.properties.get(*index))
    }

    /// Check if a property is declared
    pub fn has_property(&self, name: &str) -> bool {
        self.property_indices.contains_key(name)
    }

    /// Declared properties in declaration order
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties.iter()
    }

    /// Get a declared method
    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.get(name)
    }

    /// Check if a method is declared, regardless of visibility
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Check if a method is declared public
    pub fn has_public_method(&self, name: &str) -> bool {
        self.method(name).map_or(false, |m| m.visibility.is_public())
    }

    /// Iterate over declared methods
    pub fn methods(&self) -> impl Iterator<Item = &MethodDef> {
        self.methods.values()
    }

    /// Check if the class declares a constructor
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Call a static method
    pub fn invoke_static(&self, name: &str, args: &[Value]) -> HostResult<Value> {
        match self.method(name).map(|m| m.body.clone()) {
            Some(MethodBody::Static(body)) => body(args),
            Some(MethodBody::Instance(_)) => Err(Thrown::error(format!(
                "Non-static method {}::{}() cannot be called statically",
                self.name, name
            ))),
            None => Err(Thrown::error(format!(
                "Call to undefined method {}::{}()",
                self.name, name
            ))),
        }
    }

    /// Create an instance through the zero-argument path.
    ///
    /// Runs the constructor with no arguments if one is declared.
    pub fn new_instance(self: &Arc<Self>) -> Result<ObjectRef, InstantiationError> {
        let object = ObjectRef::allocate(Arc::clone(self));
        if let Some(constructor) = &self.constructor {
            constructor(&object, &[])?;
        }
        Ok(object)
    }

    /// Create an instance through the designated constructor.
    ///
    /// Fails with `InstantiationError::NoConstructor` if the class declares
    /// none, since the arguments would have nowhere to go.
    pub fn new_instance_args(
        self: &Arc<Self>,
        args: &[Value],
    ) -> Result<ObjectRef, InstantiationError> {
        let constructor = self
            .constructor
            .as_ref()
            .ok_or_else(|| InstantiationError::NoConstructor {
                class: self.name.clone(),
            })?;
        let object = ObjectRef::allocate(Arc::clone(self));
        constructor(&object, args)?;
        Ok(object)
    }

    /// Create an instance with property defaults only; no constructor runs
    pub fn new_instance_without_constructor(self: &Arc<Self>) -> ObjectRef {
        ObjectRef::allocate(Arc::clone(self))
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("constants", &self.constants.len())
            .field("properties", &self.properties.len())
            .field("methods", &self.methods.len())
            .field("has_constructor", &self.has_constructor())
            .finish()
    }
}

/// Builder for [`ClassDef`]
pub struct ClassBuilder {
    class: ClassDef,
}

impl ClassBuilder {
    /// Create a builder for an empty class
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            class: ClassDef {
                name: name.into(),
                constants: FxHashMap::default(),
                properties: Vec::new(),
                property_indices: FxHashMap::default(),
                methods: FxHashMap::default(),
                constructor: None,
            },
        }
    }

    /// Define a class constant
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.class.constants.insert(name.into(), value.into());
        self
    }

    /// Declare a property; redeclaring replaces the earlier definition
    pub fn property(
        mut self,
        name: impl Into<String>,
        visibility: Visibility,
        default: impl Into<Value>,
    ) -> Self {
        let name = name.into();
        let def = PropertyDef {
            name: name.clone(),
            visibility,
            default: default.into(),
        };
        match self.class.property_indices.get(&name) {
            Some(&index) => self.class.properties[index] = def,
            None => {
                self.class
                    .property_indices
                    .insert(name, self.class.properties.len());
                self.class.properties.push(def);
            }
        }
        self
    }

    /// Declare the constructor
    pub fn constructor<F>(mut self, body: F) -> Self
    where
        F: Fn(&ObjectRef, &[Value]) -> HostResult<Value> + Send + Sync + 'static,
    {
        self.class.constructor = Some(Arc::new(body));
        self
    }

    /// Declare an instance method
    pub fn method<F>(mut self, name: impl Into<String>, visibility: Visibility, body: F) -> Self
    where
        F: Fn(&ObjectRef, &[Value]) -> HostResult<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        self.class.methods.insert(
            name.clone(),
            MethodDef {
                name,
                visibility,
                body: MethodBody::Instance(Arc::new(body)),
            },
        );
        self
    }

    /// Declare a static method
    pub fn static_method<F>(
        mut self,
        name: impl Into<String>,
        visibility: Visibility,
        body: F,
    ) -> Self
    where
        F: Fn(&[Value]) -> HostResult<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        self.class.methods.insert(
            name.clone(),
            MethodDef {
                name,
                visibility,
                body: MethodBody::Static(Arc::new(body)),
            },
        );
        self
    }

    /// Finish the class
    pub fn build(self) -> ClassDef {
        self.class
    }
}
