//! Subject descriptor: what is under specification and whether it exists yet
//!
//! A descriptor is either a raw value (no class name) or a class to be
//! instantiated on first use. The instantiation state is a write-once
//! lifecycle:
//!
//! ```text
//! Unresolved { seed } ──resolve──► Resolved(value)
//! ```
//!
//! Once resolved the value is authoritative and never rebuilt.

use std::fmt;

use once_cell::unsync::OnceCell;
use specter_sdk::Value;

use crate::factory::FactoryCallable;

/// How a subject is built instead of its constructor
#[derive(Debug, Clone)]
pub enum FactoryMethod {
    /// A static method on the subject's own class
    Named(String),
    /// Any callable reference
    Callable(FactoryCallable),
}

impl From<&str> for FactoryMethod {
    fn from(name: &str) -> Self {
        FactoryMethod::Named(name.to_string())
    }
}

impl From<String> for FactoryMethod {
    fn from(name: String) -> Self {
        FactoryMethod::Named(name)
    }
}

impl From<FactoryCallable> for FactoryMethod {
    fn from(callable: FactoryCallable) -> Self {
        FactoryMethod::Callable(callable)
    }
}

impl fmt::Display for FactoryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryMethod::Named(name) => f.write_str(name),
            FactoryMethod::Callable(callable) => f.write_str(&callable.describe()),
        }
    }
}

/// Identity and instantiation state of one subject
pub struct SubjectDescriptor {
    class_name: Option<String>,
    seed: Value,
    constructor_arguments: Vec<Value>,
    factory_method: Option<FactoryMethod>,
    resolved: OnceCell<Value>,
}

impl SubjectDescriptor {
    /// Describe an instance of `class_name`, built on first use
    pub fn for_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            seed: Value::Null,
            constructor_arguments: Vec::new(),
            factory_method: None,
            resolved: OnceCell::new(),
        }
    }

    /// Describe an existing value.
    ///
    /// Objects are recorded under their class name and start resolved;
    /// anything else is a raw subject returned as-is.
    pub fn for_value(value: Value) -> Self {
        match value {
            Value::Object(object) => {
                let descriptor = Self::for_class(object.class_name());
                let _ = descriptor.resolved.set(Value::Object(object));
                descriptor
            }
            raw => Self {
                class_name: None,
                seed: raw,
                constructor_arguments: Vec::new(),
                factory_method: None,
                resolved: OnceCell::new(),
            },
        }
    }

    /// Set the constructor (or factory) arguments
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.constructor_arguments = arguments;
        self
    }

    /// Build through a factory method instead of the constructor
    pub fn constructed_through(mut self, factory_method: impl Into<FactoryMethod>) -> Self {
        self.factory_method = Some(factory_method.into());
        self
    }

    /// Pre-seed the instance. A live object is adopted on resolution
    /// without running a constructor.
    pub fn with_instance(mut self, instance: Value) -> Self {
        self.seed = instance;
        self
    }

    /// Class name, absent for raw subjects
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Arguments for the constructor or factory
    pub fn constructor_arguments(&self) -> &[Value] {
        &self.constructor_arguments
    }

    /// Factory method, if any
    pub fn factory_method(&self) -> Option<&FactoryMethod> {
        self.factory_method.as_ref()
    }

    /// Current instance: the resolved value, or the seed before resolution
    pub fn instance(&self) -> &Value {
        self.resolved.get().unwrap_or(&self.seed)
    }

    /// The resolved value, if resolution happened
    pub fn resolved(&self) -> Option<&Value> {
        self.resolved.get()
    }

    /// Check if the descriptor holds a realized instance
    pub fn is_instantiated(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Record the realized instance. The first value recorded wins.
    pub(crate) fn mark_instantiated(&self, value: Value) -> Value {
        self.resolved.get_or_init(|| value).clone()
    }
}

impl fmt::Debug for SubjectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectDescriptor")
            .field("class_name", &self.class_name)
            .field("instance", self.instance())
            .field("instantiated", &self.is_instantiated())
            .field("constructor_arguments", &self.constructor_arguments)
            .field("factory_method", &self.factory_method)
            .finish()
    }
}
