//! Specter Engine
//!
//! Lazy subject resolution and capability-gated dynamic dispatch for a
//! behavior-specification test framework:
//! - **Subjects**: proxies that construct their object on first use (`subject` module)
//! - **Dispatch**: `call`, `get`, `set` checked against an access inspector
//! - **Errors**: a closed taxonomy of classified failures (`error`, `exception` modules)
//! - **Collaborators**: event notification, factories, wrapping (`event`, `factory`, `wrapper`)
//!
//! # Example
//!
//! ```rust,ignore
//! use specter_engine::{ExampleNode, Specter, SubjectDescriptor, Wrapped};
//!
//! let specter = Specter::new(registry);
//! let counter = specter.subject(
//!     ExampleNode::new("CounterSpec", "it increments"),
//!     SubjectDescriptor::for_class("Counter"),
//! );
//!
//! // Nothing has been constructed yet
//! assert!(!counter.descriptor().is_instantiated());
//!
//! let result = counter.call("increment", vec![Wrapped::raw(1)])?;
//! assert_eq!(result.resolve()?, Value::from(1));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// ============================================================================
// Core Modules
// ============================================================================

/// Configuration loading (specter.toml)
pub mod config;

/// Dispatch error taxonomy
pub mod error;

/// Method call notifications
pub mod event;

/// Exception factory and failure classification
pub mod exception;

/// Callable factories for named-constructor instantiation
pub mod factory;

/// Diagnostic rendering
pub mod presenter;

/// Engine facade and shared dispatch context
pub mod specter;

/// Subjects and their descriptors
pub mod subject;

/// Wrapping and unwrapping across the proxy boundary
pub mod wrapper;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ConfigError, InspectorConfig, PresenterConfig, SpecterConfig};
pub use error::{SpecError, SpecResult};
pub use event::{
    EventDispatcher, EventNotifier, ExampleNode, Listener, MethodCallEvent, MethodCallEventName,
};
pub use exception::{ExceptionFactory, ExceptionTranslator};
pub use factory::{CallableFactory, Factory, FactoryCallable, FactoryFn};
pub use presenter::Presenter;
pub use specter::{DispatchContext, Specter, SpecterBuilder};
pub use subject::{FactoryMethod, Subject, SubjectDescriptor};
pub use wrapper::{Unwrapper, Wrapped, Wrapper};

// Host object model
pub use specter_sdk::{
    AccessInspector, ClassDef, ClassRegistry, ObjectRef, Thrown, Value, Visibility,
};
