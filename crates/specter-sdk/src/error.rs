//! Error types raised by the host object model

/// Result type for host operations (method bodies, property hooks, factories)
pub type HostResult<T> = Result<T, Thrown>;

/// An exception raised by code running inside the host object model.
///
/// Constructors, method bodies and factory functions report failures by
/// returning a `Thrown`. The engine never reinterprets these: they are the
/// subject's own failures and travel back to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{class}: {message}")]
pub struct Thrown {
    /// Exception class name (e.g. "InvalidArgumentException")
    pub class: String,
    /// Human-readable message
    pub message: String,
}

impl Thrown {
    /// Create an exception of the given class
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
        }
    }

    /// Create a generic runtime error, as raised by the host itself
    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    /// Create a type error (argument conversion failures)
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new("TypeError", message)
    }
}

/// Failure to create an instance of a class
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstantiationError {
    /// Arguments were supplied but the class declares no constructor
    #[error("Class {class} does not have a constructor, so no constructor arguments can be passed")]
    NoConstructor {
        /// Class that was being instantiated
        class: String,
    },

    /// The constructor itself raised
    #[error(transparent)]
    Thrown(#[from] Thrown),
}
