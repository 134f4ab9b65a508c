//! Named-constructor instantiation
//!
//! When a descriptor is constructed through a factory method instead of
//! its constructor, the proxy hands the callable reference and the
//! constructor arguments to a [`Factory`]. The default [`CallableFactory`]
//! resolves `[class, method]` references against the class registry or
//! calls an external function, and insists the result is an object.

use std::fmt;
use std::sync::Arc;

use specter_sdk::{ClassRegistry, HostResult, ObjectRef, Value};

use crate::error::SpecResult;
use crate::exception::ExceptionFactory;

/// Body of an external factory function
pub type FactoryFn = Arc<dyn Fn(&[Value]) -> HostResult<Value> + Send + Sync>;

/// A callable reference that produces subjects
#[derive(Clone)]
pub enum FactoryCallable {
    /// `[class, method]`: a static method on a registered class
    StaticMethod {
        /// Class name
        class: String,
        /// Static method name
        method: String,
    },
    /// A free-standing function
    Function {
        /// Name used in diagnostics
        name: String,
        /// Implementation
        body: FactoryFn,
    },
}

impl FactoryCallable {
    /// Reference a static method
    pub fn static_method(class: impl Into<String>, method: impl Into<String>) -> Self {
        FactoryCallable::StaticMethod {
            class: class.into(),
            method: method.into(),
        }
    }

    /// Wrap an anonymous function
    pub fn function<F>(body: F) -> Self
    where
        F: Fn(&[Value]) -> HostResult<Value> + Send + Sync + 'static,
    {
        Self::named_function("{closure}", body)
    }

    /// Wrap a function under a diagnostic name
    pub fn named_function<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> HostResult<Value> + Send + Sync + 'static,
    {
        FactoryCallable::Function {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    /// Printable form: `Class::method` or the function name
    pub fn describe(&self) -> String {
        match self {
            FactoryCallable::StaticMethod { class, method } => format!("{}::{}", class, method),
            FactoryCallable::Function { name, .. } => name.clone(),
        }
    }
}

impl fmt::Debug for FactoryCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FactoryCallable({})", self.describe())
    }
}

/// Instantiates subjects through callable references
pub trait Factory {
    /// Call `callable` with `arguments` and return the object it produced
    fn instantiate_from_callable(
        &self,
        callable: &FactoryCallable,
        arguments: &[Value],
    ) -> SpecResult<ObjectRef>;
}

/// Default factory over the class registry
#[derive(Debug, Clone)]
pub struct CallableFactory {
    registry: Arc<ClassRegistry>,
    exceptions: ExceptionFactory,
}

impl CallableFactory {
    /// Create a factory resolving static methods in `registry`
    pub fn new(registry: Arc<ClassRegistry>) -> Self {
        Self {
            registry,
            exceptions: ExceptionFactory::new(),
        }
    }

    fn call(&self, callable: &FactoryCallable, arguments: &[Value]) -> SpecResult<Value> {
        match callable {
            FactoryCallable::StaticMethod { class, method } => {
                let def = self
                    .registry
                    .get_by_name(class)
                    .ok_or_else(|| self.exceptions.class_not_found(class))?;
                if !def.has_method(method) {
                    return Err(self.exceptions.method_not_found(class, method, arguments));
                }
                Ok(def.invoke_static(method, arguments)?)
            }
            FactoryCallable::Function { body, .. } => Ok(body(arguments)?),
        }
    }
}

impl Factory for CallableFactory {
    fn instantiate_from_callable(
        &self,
        callable: &FactoryCallable,
        arguments: &[Value],
    ) -> SpecResult<ObjectRef> {
        tracing::trace!(callable = %callable.describe(), arity = arguments.len(), "instantiating from callable");
        match self.call(callable, arguments)? {
            Value::Object(object) => Ok(object),
            other => Err(self
                .exceptions
                .factory_does_not_return_object(&callable.describe(), &other)),
        }
    }
}
