//! Access inspection over host reflection
//!
//! Answers the three capability questions the dispatch proxy asks before
//! touching a subject: can this method be called, can this property be
//! read, can it be written, from outside the class.
//!
//! | Inspector                   | Method callable          | Property readable / writable          |
//! |-----------------------------|--------------------------|---------------------------------------|
//! | `VisibilityAccessInspector` | declared public          | declared public, or dynamic on object |
//! | `MagicAwareAccessInspector` | ... or public `__call`   | ... or public `__get` / `__set`       |
//!
//! Non-object targets answer `false` to every question.

use crate::types::{MAGIC_CALL, MAGIC_GET, MAGIC_SET};
use crate::value::{ObjectRef, Value};

/// Capability queries used to gate dynamic dispatch.
///
/// Implementations own all visibility logic; callers trust the answers.
pub trait AccessInspector {
    /// Check if `property` can be read on `target` from outside the class
    fn is_property_readable(&self, target: &Value, property: &str) -> bool;

    /// Check if `property` can be written on `target` from outside the class
    fn is_property_writable(&self, target: &Value, property: &str) -> bool;

    /// Check if `method` can be called on `target` from outside the class
    fn is_method_callable(&self, target: &Value, method: &str) -> bool;
}

/// Inspector honoring declared visibility only
#[derive(Debug, Default, Clone, Copy)]
pub struct VisibilityAccessInspector;

impl VisibilityAccessInspector {
    /// Create the inspector
    pub fn new() -> Self {
        Self
    }

    fn is_accessible_property(object: &ObjectRef, property: &str) -> bool {
        match object.class().property(property) {
            Some(def) => def.visibility.is_public(),
            // Dynamic properties are always public
            None => object.has_dynamic_property(property),
        }
    }
}

impl AccessInspector for VisibilityAccessInspector {
    fn is_property_readable(&self, target: &Value, property: &str) -> bool {
        target
            .as_object()
            .map_or(false, |obj| Self::is_accessible_property(obj, property))
    }

    fn is_property_writable(&self, target: &Value, property: &str) -> bool {
        target
            .as_object()
            .map_or(false, |obj| Self::is_accessible_property(obj, property))
    }

    fn is_method_callable(&self, target: &Value, method: &str) -> bool {
        target
            .as_object()
            .map_or(false, |obj| obj.class().has_public_method(method))
    }
}

/// Inspector that also honors the magic accessor hooks.
///
/// Decorates another inspector: whatever it allows stays allowed, and a
/// public `__get`, `__set` or `__call` on the target's class opens the
/// corresponding capability for every member name.
#[derive(Debug, Default, Clone, Copy)]
pub struct MagicAwareAccessInspector<I = VisibilityAccessInspector> {
    inner: I,
}

impl<I: AccessInspector> MagicAwareAccessInspector<I> {
    /// Wrap an inspector
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    fn has_public_hook(target: &Value, hook: &str) -> bool {
        target
            .as_object()
            .map_or(false, |obj| obj.class().has_public_method(hook))
    }
}

impl<I: AccessInspector> AccessInspector for MagicAwareAccessInspector<I> {
    fn is_property_readable(&self, target: &Value, property: &str) -> bool {
        self.inner.is_property_readable(target, property) || Self::has_public_hook(target, MAGIC_GET)
    }

    fn is_property_writable(&self, target: &Value, property: &str) -> bool {
        self.inner.is_property_writable(target, property) || Self::has_public_hook(target, MAGIC_SET)
    }

    fn is_method_callable(&self, target: &Value, method: &str) -> bool {
        self.inner.is_method_callable(target, method) || Self::has_public_hook(target, MAGIC_CALL)
    }
}
