//! The dispatch core behind every [`Subject`](super::Subject)
//!
//! `Caller` owns one descriptor and performs the four proxy operations
//! against it. Every operation follows the same shape:
//!
//! 1. resolve the descriptor (constructing the subject at most once)
//! 2. reject non-object subjects
//! 3. unwrap arguments
//! 4. ask the access inspector
//! 5. perform the raw operation, or classify the refusal
//!
//! The caller itself never decides visibility.

use std::sync::Arc;

use specter_sdk::{ClassDef, ObjectRef, Value};

use crate::error::{SpecError, SpecResult};
use crate::event::{MethodCallEvent, MethodCallEventName};
use crate::factory::FactoryCallable;
use crate::subject::descriptor::{FactoryMethod, SubjectDescriptor};
use crate::subject::Subject;
use crate::wrapper::{Unwrapper, Wrapped, Wrapper};

/// Names written entirely in upper case are looked up as class constants
fn is_constant_name(name: &str) -> bool {
    name.to_uppercase() == name
}

pub(crate) struct Caller {
    descriptor: SubjectDescriptor,
    wrapper: Wrapper,
    unwrapper: Unwrapper,
}

impl Caller {
    pub(crate) fn new(descriptor: SubjectDescriptor, wrapper: Wrapper) -> Self {
        Self {
            descriptor,
            wrapper,
            unwrapper: Unwrapper::new(),
        }
    }

    pub(crate) fn descriptor(&self) -> &SubjectDescriptor {
        &self.descriptor
    }

    pub(crate) fn wrapper(&self) -> &Wrapper {
        &self.wrapper
    }

    /// Realize the subject, constructing it on first need
    pub(crate) fn resolve(&self) -> SpecResult<Value> {
        if let Some(value) = self.descriptor.resolved() {
            return Ok(value.clone());
        }
        let Some(class_name) = self.descriptor.class_name() else {
            return Ok(self.descriptor.instance().clone());
        };

        let context = self.wrapper.context();
        let class = context
            .registry
            .get_by_name(class_name)
            .ok_or_else(|| self.fail(context.translator.factory().class_not_found(class_name)))?;

        if self.descriptor.instance().is_object() {
            tracing::debug!(class = %class_name, "adopting pre-seeded instance");
            return Ok(self
                .descriptor
                .mark_instantiated(self.descriptor.instance().clone()));
        }

        let object = self.instantiate(&class)?;
        tracing::debug!(class = %class_name, object = object.id(), "subject resolved");
        Ok(self.descriptor.mark_instantiated(Value::Object(object)))
    }

    fn instantiate(&self, class: &Arc<ClassDef>) -> SpecResult<ObjectRef> {
        let context = self.wrapper.context();
        let arguments = self.descriptor.constructor_arguments();

        match self.descriptor.factory_method() {
            Some(FactoryMethod::Named(method)) => {
                if !class.has_method(method) {
                    return Err(self.fail(context.translator.factory().named_constructor_not_found(
                        class.name(),
                        method,
                        arguments,
                    )));
                }
                tracing::debug!(class = %class.name(), method = %method, "constructing through named constructor");
                let callable = FactoryCallable::static_method(class.name(), method.as_str());
                context.factory.instantiate_from_callable(&callable, arguments)
            }
            Some(FactoryMethod::Callable(callable)) => {
                tracing::debug!(class = %class.name(), callable = %callable.describe(), "constructing through factory");
                context.factory.instantiate_from_callable(callable, arguments)
            }
            None if !arguments.is_empty() => {
                tracing::debug!(class = %class.name(), arity = arguments.len(), "constructing with arguments");
                class.new_instance_args(arguments).map_err(|error| {
                    self.fail(context.translator.instantiation_failure(class.name(), arguments, error))
                })
            }
            None => {
                tracing::debug!(class = %class.name(), "constructing without arguments");
                class.new_instance().map_err(|error| {
                    self.fail(context.translator.instantiation_failure(class.name(), arguments, error))
                })
            }
        }
    }

    pub(crate) fn call(&self, method: &str, arguments: &[Wrapped]) -> SpecResult<Subject> {
        let context = self.wrapper.context();
        let subject = self.resolve()?;
        let Value::Object(object) = &subject else {
            return Err(self.fail(context.translator.factory().calling_method_on_non_object(method)));
        };

        let arguments = self.unwrapper.unwrap_all(arguments)?;
        if !context.inspector.is_method_callable(&subject, method) {
            return Err(self.fail(context.translator.method_call_failure(object, method, &arguments)));
        }

        tracing::trace!(
            class = %object.class_name(),
            call = %context.presenter.present_call(method, &arguments),
            "calling"
        );
        let event = MethodCallEvent {
            example: self.wrapper.example().clone(),
            subject: subject.clone(),
            method: method.to_string(),
            arguments,
        };
        context
            .notifier
            .notify(MethodCallEventName::BeforeMethodCall, &event);
        let returned = object.invoke_public(method, &event.arguments)?;
        context
            .notifier
            .notify(MethodCallEventName::AfterMethodCall, &event);

        Ok(self.wrapper.wrap(returned))
    }

    pub(crate) fn get(&self, property: &str) -> SpecResult<Wrapped> {
        if is_constant_name(property) {
            if let Some(value) = self.class_constant(property) {
                tracing::trace!(constant = %property, "reading class constant");
                return Ok(Wrapped::Raw(value));
            }
        }

        let context = self.wrapper.context();
        let subject = self.resolve()?;
        let Value::Object(object) = &subject else {
            return Err(self.fail(context.translator.factory().accessing_property_on_non_object(property)));
        };

        if !context.inspector.is_property_readable(&subject, property) {
            return Err(self.fail(
                context
                    .translator
                    .factory()
                    .property_not_found(object.class_name(), property),
            ));
        }

        tracing::trace!(class = %object.class_name(), property = %property, "reading property");
        let value = object.read_public(property)?;
        Ok(Wrapped::Subject(self.wrapper.wrap(value)))
    }

    pub(crate) fn set(&self, property: &str, value: &Wrapped) -> SpecResult<()> {
        let context = self.wrapper.context();
        let subject = self.resolve()?;
        let Value::Object(object) = &subject else {
            return Err(self.fail(context.translator.factory().setting_property_on_non_object(property)));
        };

        let value = self.unwrapper.unwrap_one(value)?;
        if !context.inspector.is_property_writable(&subject, property) {
            return Err(self.fail(
                context
                    .translator
                    .factory()
                    .property_not_found(object.class_name(), property),
            ));
        }

        tracing::trace!(class = %object.class_name(), property = %property, value = %context.presenter.present_value(&value), "writing property");
        object.write_public(property, value)?;
        Ok(())
    }

    /// Check if the descriptor's class defines a constant named `property`
    pub(crate) fn constant_defined(&self, property: &str) -> bool {
        self.class_constant(property).is_some()
    }

    fn class_constant(&self, name: &str) -> Option<Value> {
        let class_name = self.descriptor.class_name()?;
        self.wrapper
            .context()
            .registry
            .get_by_name(class_name)
            .and_then(|class| class.constant(name).cloned())
    }

    fn fail(&self, error: SpecError) -> SpecError {
        tracing::debug!(
            example = %self.wrapper.example(),
            kind = error.kind(),
            "{}",
            self.wrapper.context().presenter.present_error(&error)
        );
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_names() {
        assert!(is_constant_name("MAX_SIZE"));
        assert!(is_constant_name("VERSION2"));
        assert!(!is_constant_name("maxSize"));
        assert!(!is_constant_name("Max_SIZE"));
    }
}
