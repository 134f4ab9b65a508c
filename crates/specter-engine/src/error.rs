//! Error taxonomy raised by subject dispatch
//!
//! Every failure the proxy classifies becomes exactly one `SpecError`
//! variant carrying the class name, member name and arguments involved, so
//! a runner can report it against the current example without re-deriving
//! context. Failures raised by the subject's own code are passed through
//! as `SpecError::Thrown`, untouched.

use specter_sdk::{Thrown, Value};

/// Result type for subject operations
pub type SpecResult<T> = Result<T, SpecError>;

/// Closed set of dispatch failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecError {
    /// The descriptor names a class unknown to the runtime
    #[error("Class {class} does not exist.")]
    ClassNotFound {
        /// Class name
        class: String,
    },

    /// Calling or constructing through a member the class does not have
    #[error("Method {class}::{method}() not found.")]
    MethodNotFound {
        /// Class name
        class: String,
        /// Method name (`__construct` for the constructor path)
        method: String,
        /// Arguments the call was attempted with
        arguments: Vec<Value>,
    },

    /// The method exists but is not callable from outside
    #[error("Method {class}::{method}() not visible.")]
    MethodNotVisible {
        /// Class name
        class: String,
        /// Method name
        method: String,
        /// Arguments the call was attempted with
        arguments: Vec<Value>,
    },

    /// The factory method named on the descriptor is absent from the class
    #[error("Named constructor {class}::{method}() not found.")]
    NamedConstructorNotFound {
        /// Class name
        class: String,
        /// Factory method name
        method: String,
        /// Constructor arguments
        arguments: Vec<Value>,
    },

    /// The factory produced something other than an object
    #[error("The factory {callable} did not return an object, returned {returned} instead.")]
    FactoryDoesNotReturnObject {
        /// Printable callable reference (`Class::method` or `{closure}`)
        callable: String,
        /// Host type name of what came back
        returned: String,
    },

    /// Reading or writing a property that is absent or not accessible
    #[error("Property {class}::${property} not found.")]
    PropertyNotFound {
        /// Class name
        class: String,
        /// Property name
        property: String,
        /// Always empty for property access
        arguments: Vec<Value>,
    },

    /// Method call on a subject that resolved to a non-object
    #[error("Call to a member function {method}() on a non-object.")]
    CallingMethodOnNonObject {
        /// Method name
        method: String,
    },

    /// Property read on a subject that resolved to a non-object
    #[error("Getting property {property} on a non-object.")]
    AccessingPropertyOnNonObject {
        /// Property name
        property: String,
    },

    /// Property write on a subject that resolved to a non-object
    #[error("Setting property {property} on a non-object.")]
    SettingPropertyOnNonObject {
        /// Property name
        property: String,
    },

    /// The subject's own code raised; passed through unchanged
    #[error(transparent)]
    Thrown(#[from] Thrown),
}

impl SpecError {
    /// Stable kind tag for reporting
    pub fn kind(&self) -> &'static str {
        match self {
            SpecError::ClassNotFound { .. } => "ClassNotFound",
            SpecError::MethodNotFound { .. } => "MethodNotFound",
            SpecError::MethodNotVisible { .. } => "MethodNotVisible",
            SpecError::NamedConstructorNotFound { .. } => "NamedConstructorNotFound",
            SpecError::FactoryDoesNotReturnObject { .. } => "FactoryDoesNotReturnObject",
            SpecError::PropertyNotFound { .. } => "PropertyNotFound",
            SpecError::CallingMethodOnNonObject { .. } => "CallingMethodOnNonObject",
            SpecError::AccessingPropertyOnNonObject { .. } => "AccessingPropertyOnNonObject",
            SpecError::SettingPropertyOnNonObject { .. } => "SettingPropertyOnNonObject",
            SpecError::Thrown(_) => "Thrown",
        }
    }

    /// Arguments carried by the error, if its kind records any
    pub fn arguments(&self) -> Option<&[Value]> {
        match self {
            SpecError::MethodNotFound { arguments, .. }
            | SpecError::MethodNotVisible { arguments, .. }
            | SpecError::NamedConstructorNotFound { arguments, .. }
            | SpecError::PropertyNotFound { arguments, .. } => Some(arguments),
            _ => None,
        }
    }

    /// Check if this is the subject's own failure rather than a classification
    pub fn is_thrown(&self) -> bool {
        matches!(self, SpecError::Thrown(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SpecError::MethodNotFound {
            class: "Counter".to_string(),
            method: "reset".to_string(),
            arguments: vec![],
        };
        assert_eq!(err.to_string(), "Method Counter::reset() not found.");

        let err = SpecError::PropertyNotFound {
            class: "Counter".to_string(),
            property: "count".to_string(),
            arguments: vec![],
        };
        assert_eq!(err.to_string(), "Property Counter::$count not found.");
    }

    #[test]
    fn test_thrown_is_transparent() {
        let err = SpecError::from(Thrown::new("DomainException", "closed"));
        assert_eq!(err.to_string(), "DomainException: closed");
        assert!(err.is_thrown());
        assert_eq!(err.kind(), "Thrown");
        assert!(err.arguments().is_none());
    }

    #[test]
    fn test_arguments_accessor() {
        let err = SpecError::NamedConstructorNotFound {
            class: "Money".to_string(),
            method: "fromCents".to_string(),
            arguments: vec![Value::from(100)],
        };
        assert_eq!(err.arguments(), Some(&[Value::Int(100)][..]));
        assert_eq!(err.kind(), "NamedConstructorNotFound");
    }
}
