//! Subjects: lazily realized, capability-gated proxies
//!
//! A [`Subject`] is the handle test code holds. It may stand for an object
//! that has not been constructed yet; the first `call`, `get` or `set`
//! constructs it through its [`SubjectDescriptor`].
//!
//! ```ignore
//! let counter = wrapper.subject(SubjectDescriptor::for_class("Counter"));
//! counter.call("increment", vec![])?;
//! assert_eq!(counter.get("label")?.as_subject().unwrap().resolve()?, Value::from("counter"));
//! ```

mod caller;
mod descriptor;

use std::fmt;
use std::rc::Rc;

use specter_sdk::Value;

use crate::error::SpecResult;
use crate::wrapper::{Wrapped, Wrapper};

use caller::Caller;
pub use descriptor::{FactoryMethod, SubjectDescriptor};

/// Proxy handle over one subject. Clones share the same descriptor.
#[derive(Clone)]
pub struct Subject {
    caller: Rc<Caller>,
}

impl Subject {
    pub(crate) fn new(descriptor: SubjectDescriptor, wrapper: Wrapper) -> Self {
        Self {
            caller: Rc::new(Caller::new(descriptor, wrapper)),
        }
    }

    /// Call `method` with `arguments`; the result comes back wrapped
    pub fn call(&self, method: &str, arguments: Vec<Wrapped>) -> SpecResult<Subject> {
        self.caller.call(method, &arguments)
    }

    /// Read `property`. Class constants come back raw, properties wrapped.
    pub fn get(&self, property: &str) -> SpecResult<Wrapped> {
        self.caller.get(property)
    }

    /// Assign `value` to `property`
    pub fn set(&self, property: &str, value: impl Into<Wrapped>) -> SpecResult<()> {
        self.caller.set(property, &value.into())
    }

    /// The live value behind the proxy
    pub fn resolve(&self) -> SpecResult<Value> {
        self.caller.resolve()
    }

    /// Check if the subject's class defines constant `property`
    pub fn constant_defined(&self, property: &str) -> bool {
        self.caller.constant_defined(property)
    }

    /// The descriptor this subject dispatches against
    pub fn descriptor(&self) -> &SubjectDescriptor {
        self.caller.descriptor()
    }

    /// Check if two handles share one descriptor
    pub fn ptr_eq(&self, other: &Subject) -> bool {
        Rc::ptr_eq(&self.caller, &other.caller)
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("descriptor", self.caller.descriptor())
            .field("example", self.caller.wrapper().example())
            .finish()
    }
}
