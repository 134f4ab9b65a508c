//! Exception factory and failure classification
//!
//! `ExceptionFactory` has one constructor per [`SpecError`] kind.
//! `ExceptionTranslator` performs the single classification step for a
//! failed operation: it looks at the host's reflection data (does the
//! member exist at all?) or at the host's structured instantiation error,
//! and picks the kind.

use specter_sdk::{InstantiationError, ObjectRef, Value, CONSTRUCTOR};

use crate::error::SpecError;

/// Builds typed dispatch errors
#[derive(Debug, Default, Clone, Copy)]
pub struct ExceptionFactory;

impl ExceptionFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self
    }

    /// Unknown class
    pub fn class_not_found(&self, class: &str) -> SpecError {
        SpecError::ClassNotFound {
            class: class.to_string(),
        }
    }

    /// Missing method
    pub fn method_not_found(&self, class: &str, method: &str, arguments: &[Value]) -> SpecError {
        SpecError::MethodNotFound {
            class: class.to_string(),
            method: method.to_string(),
            arguments: arguments.to_vec(),
        }
    }

    /// Existing but inaccessible method
    pub fn method_not_visible(&self, class: &str, method: &str, arguments: &[Value]) -> SpecError {
        SpecError::MethodNotVisible {
            class: class.to_string(),
            method: method.to_string(),
            arguments: arguments.to_vec(),
        }
    }

    /// Missing named constructor
    pub fn named_constructor_not_found(
        &self,
        class: &str,
        method: &str,
        arguments: &[Value],
    ) -> SpecError {
        SpecError::NamedConstructorNotFound {
            class: class.to_string(),
            method: method.to_string(),
            arguments: arguments.to_vec(),
        }
    }

    /// Factory produced a non-object
    pub fn factory_does_not_return_object(&self, callable: &str, returned: &Value) -> SpecError {
        SpecError::FactoryDoesNotReturnObject {
            callable: callable.to_string(),
            returned: returned.type_name().to_string(),
        }
    }

    /// Missing or inaccessible property
    pub fn property_not_found(&self, class: &str, property: &str) -> SpecError {
        SpecError::PropertyNotFound {
            class: class.to_string(),
            property: property.to_string(),
            arguments: Vec::new(),
        }
    }

    /// Method call on a non-object subject
    pub fn calling_method_on_non_object(&self, method: &str) -> SpecError {
        SpecError::CallingMethodOnNonObject {
            method: method.to_string(),
        }
    }

    /// Property read on a non-object subject
    pub fn accessing_property_on_non_object(&self, property: &str) -> SpecError {
        SpecError::AccessingPropertyOnNonObject {
            property: property.to_string(),
        }
    }

    /// Property write on a non-object subject
    pub fn setting_property_on_non_object(&self, property: &str) -> SpecError {
        SpecError::SettingPropertyOnNonObject {
            property: property.to_string(),
        }
    }
}

/// Classifies failed operations into [`SpecError`] kinds
#[derive(Debug, Default, Clone, Copy)]
pub struct ExceptionTranslator {
    factory: ExceptionFactory,
}

impl ExceptionTranslator {
    /// Create a translator over a factory
    pub fn new(factory: ExceptionFactory) -> Self {
        Self { factory }
    }

    /// The underlying factory
    pub fn factory(&self) -> &ExceptionFactory {
        &self.factory
    }

    /// Classify a method the inspector refused: absent from the class, or
    /// present but not accessible.
    pub fn method_call_failure(
        &self,
        object: &ObjectRef,
        method: &str,
        arguments: &[Value],
    ) -> SpecError {
        let class = object.class();
        let error = if class.has_method(method) {
            self.factory.method_not_visible(class.name(), method, arguments)
        } else {
            self.factory.method_not_found(class.name(), method, arguments)
        };
        tracing::debug!(class = %class.name(), method = %method, kind = error.kind(), "method call refused");
        error
    }

    /// Classify a failed instantiation.
    ///
    /// A missing constructor becomes `MethodNotFound(class, "__construct")`;
    /// anything the constructor raised passes through unchanged.
    pub fn instantiation_failure(
        &self,
        class: &str,
        arguments: &[Value],
        error: InstantiationError,
    ) -> SpecError {
        match error {
            InstantiationError::NoConstructor { .. } => {
                tracing::debug!(class = %class, "constructor arguments given to a class without constructor");
                self.factory.method_not_found(class, CONSTRUCTOR, arguments)
            }
            InstantiationError::Thrown(thrown) => SpecError::Thrown(thrown),
        }
    }
}
