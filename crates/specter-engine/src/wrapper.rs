//! Wrapping and unwrapping across the proxy boundary
//!
//! Test code handles [`Wrapped`] values: raw host values, proxied
//! [`Subject`]s, or lists mixing both. Before anything reaches the host the
//! [`Unwrapper`] strips every proxy layer; results coming back are turned
//! into subjects by the [`Wrapper`].

use std::rc::Rc;

use specter_sdk::Value;

use crate::error::SpecResult;
use crate::event::ExampleNode;
use crate::specter::DispatchContext;
use crate::subject::{Subject, SubjectDescriptor};

/// A value as seen by test code
#[derive(Debug, Clone)]
pub enum Wrapped {
    /// Plain host value
    Raw(Value),
    /// Proxied subject
    Subject(Subject),
    /// List whose elements are unwrapped one by one
    List(Vec<Wrapped>),
}

impl Wrapped {
    /// Wrap anything convertible into a host value
    pub fn raw(value: impl Into<Value>) -> Self {
        Wrapped::Raw(value.into())
    }

    /// The raw value, if this is not a subject or list
    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            Wrapped::Raw(value) => Some(value),
            _ => None,
        }
    }

    /// The subject, if this is one
    pub fn as_subject(&self) -> Option<&Subject> {
        match self {
            Wrapped::Subject(subject) => Some(subject),
            _ => None,
        }
    }
}

impl From<Value> for Wrapped {
    fn from(value: Value) -> Self {
        Wrapped::Raw(value)
    }
}

impl From<Subject> for Wrapped {
    fn from(subject: Subject) -> Self {
        Wrapped::Subject(subject)
    }
}

impl From<Vec<Wrapped>> for Wrapped {
    fn from(items: Vec<Wrapped>) -> Self {
        Wrapped::List(items)
    }
}

/// Turns raw values into subjects bound to one example
#[derive(Clone)]
pub struct Wrapper {
    context: Rc<DispatchContext>,
    example: Rc<ExampleNode>,
}

impl Wrapper {
    /// Create a wrapper for `example`
    pub(crate) fn new(context: Rc<DispatchContext>, example: Rc<ExampleNode>) -> Self {
        Self { context, example }
    }

    /// Wrap any value; never fails
    pub fn wrap(&self, value: Value) -> Subject {
        self.subject(SubjectDescriptor::for_value(value))
    }

    /// Build a subject over an explicit descriptor
    pub fn subject(&self, descriptor: SubjectDescriptor) -> Subject {
        Subject::new(descriptor, self.clone())
    }

    /// Example the wrapped subjects belong to
    pub fn example(&self) -> &Rc<ExampleNode> {
        &self.example
    }

    pub(crate) fn context(&self) -> &DispatchContext {
        &self.context
    }
}

impl std::fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wrapper").field("example", &self.example).finish()
    }
}

/// Strips proxy wrapping from values bound for the host
#[derive(Debug, Default, Clone, Copy)]
pub struct Unwrapper;

impl Unwrapper {
    /// Create the unwrapper
    pub fn new() -> Self {
        Self
    }

    /// Unwrap one value. Subjects are resolved, which may construct them.
    pub fn unwrap_one(&self, value: &Wrapped) -> SpecResult<Value> {
        match value {
            Wrapped::Raw(raw) => Ok(raw.clone()),
            Wrapped::Subject(subject) => subject.resolve(),
            Wrapped::List(items) => Ok(Value::Array(self.unwrap_all(items)?)),
        }
    }

    /// Unwrap a sequence element-wise
    pub fn unwrap_all(&self, values: &[Wrapped]) -> SpecResult<Vec<Value>> {
        values.iter().map(|value| self.unwrap_one(value)).collect()
    }
}
