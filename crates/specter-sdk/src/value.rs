//! Values: the tagged union of everything the host can hold
//!
//! Scalars, strings and arrays are stored inline and compared by value.
//! Objects are shared handles (`ObjectRef`) and compare by identity, the
//! way two references to the same instance are "the same" in the host.
//!
//! ```text
//! Value
//!   Null | Bool | Int(i64) | Float(f64) | Str(String)
//!   Array(Vec<Value>)
//!   Object(ObjectRef) ──► ObjectCell { id, class: Arc<ClassDef>, properties }
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{HostResult, Thrown};
use crate::types::{ClassDef, MethodBody, MAGIC_CALL, MAGIC_GET, MAGIC_SET};

/// A host value.
#[derive(Clone, Default)]
pub enum Value {
    /// The null value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// String
    Str(String),
    /// Ordered list of values
    Array(Vec<Value>),
    /// Live object instance
    Object(ObjectRef),
}

impl Value {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is an object
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer if this is an int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as float; ints widen
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as string slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as array slice if this is an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get the object handle if this is an object
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Host type name, as used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Array(items) => f.debug_list().entries(items).finish(),
            Value::Object(obj) => write!(f, "{:?}", obj),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

// ============================================================================
// Objects
// ============================================================================

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

struct ObjectCell {
    id: u64,
    class: Arc<ClassDef>,
    properties: Mutex<FxHashMap<String, Value>>,
}

/// Shared handle to a live object.
///
/// Cloning the handle does not copy the object. No lock is held while a
/// method body runs, so bodies are free to read and write their receiver.
#[derive(Clone)]
pub struct ObjectRef(Arc<ObjectCell>);

impl ObjectRef {
    /// Allocate an object of `class` with its declared property defaults.
    /// Does not run any constructor.
    pub(crate) fn allocate(class: Arc<ClassDef>) -> Self {
        let properties = class
            .properties()
            .map(|prop| (prop.name.clone(), prop.default.clone()))
            .collect();
        ObjectRef(Arc::new(ObjectCell {
            id: NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed),
            class,
            properties: Mutex::new(properties),
        }))
    }

    /// Unique object id
    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// The object's class
    pub fn class(&self) -> &Arc<ClassDef> {
        &self.0.class
    }

    /// Name of the object's class
    pub fn class_name(&self) -> &str {
        self.0.class.name()
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Check if the object currently carries a property slot (declared or dynamic)
    pub fn has_property(&self, name: &str) -> bool {
        self.0.properties.lock().contains_key(name)
    }

    /// Check if the object carries a property its class does not declare
    pub fn has_dynamic_property(&self, name: &str) -> bool {
        !self.0.class.has_property(name) && self.has_property(name)
    }

    /// Raw slot read: no hooks, no visibility
    pub fn property(&self, name: &str) -> Option<Value> {
        self.0.properties.lock().get(name).cloned()
    }

    /// Raw slot write: no hooks, no visibility
    pub fn set_property(&self, name: impl Into<String>, value: Value) {
        self.0.properties.lock().insert(name.into(), value);
    }

    /// Read a property the way the host does: the slot if present,
    /// otherwise the class's `__get` hook.
    pub fn read(&self, name: &str) -> HostResult<Value> {
        if let Some(value) = self.property(name) {
            return Ok(value);
        }
        if self.0.class.has_method(MAGIC_GET) {
            return self.invoke(MAGIC_GET, &[Value::from(name)]);
        }
        Err(Thrown::error(format!(
            "Undefined property: {}::${}",
            self.class_name(),
            name
        )))
    }

    /// Write a property the way the host does: declared or existing slots
    /// are assigned, otherwise `__set` is invoked, otherwise a dynamic
    /// property is created.
    pub fn write(&self, name: &str, value: Value) -> HostResult<()> {
        if !self.has_property(name) && self.0.class.has_method(MAGIC_SET) {
            self.invoke(MAGIC_SET, &[Value::from(name), value])?;
            return Ok(());
        }
        self.set_property(name, value);
        Ok(())
    }

    /// Invoke a method by name, falling back to the class's `__call` hook.
    pub fn invoke(&self, name: &str, args: &[Value]) -> HostResult<Value> {
        // Clone the body out so the class borrow ends before it runs
        let body = self.0.class.method(name).map(|m| m.body.clone());
        match body {
            Some(MethodBody::Instance(body)) => body(self, args),
            Some(MethodBody::Static(body)) => body(args),
            None if self.0.class.has_method(MAGIC_CALL) => {
                self.invoke(MAGIC_CALL, &[Value::from(name), Value::Array(args.to_vec())])
            }
            None => Err(Thrown::error(format!(
                "Call to undefined method {}::{}()",
                self.class_name(),
                name
            ))),
        }
    }

    /// Check if `name` is a declared property that is not public
    fn is_hidden_property(&self, name: &str) -> bool {
        self.0
            .class
            .property(name)
            .map_or(false, |def| !def.visibility.is_public())
    }

    /// Invoke a method from outside the class.
    ///
    /// Only public methods run directly; hidden or undefined ones go to
    /// `__call`.
    pub fn invoke_public(&self, name: &str, args: &[Value]) -> HostResult<Value> {
        let method = self.0.class.method(name);
        match method {
            Some(def) if def.visibility.is_public() => self.invoke(name, args),
            _ if self.0.class.has_method(MAGIC_CALL) => {
                self.invoke(MAGIC_CALL, &[Value::from(name), Value::Array(args.to_vec())])
            }
            Some(def) => Err(Thrown::error(format!(
                "Call to {} method {}::{}() from global scope",
                def.visibility,
                self.class_name(),
                name
            ))),
            None => Err(Thrown::error(format!(
                "Call to undefined method {}::{}()",
                self.class_name(),
                name
            ))),
        }
    }

    /// Read a property from outside the class.
    ///
    /// Hidden declared properties are never read; they go to `__get`.
    pub fn read_public(&self, name: &str) -> HostResult<Value> {
        if !self.is_hidden_property(name) {
            return self.read(name);
        }
        if self.0.class.has_method(MAGIC_GET) {
            return self.invoke(MAGIC_GET, &[Value::from(name)]);
        }
        Err(Thrown::error(format!(
            "Cannot access non-public property {}::${}",
            self.class_name(),
            name
        )))
    }

    /// Write a property from outside the class.
    ///
    /// Hidden declared properties are never assigned; they go to `__set`.
    pub fn write_public(&self, name: &str, value: Value) -> HostResult<()> {
        if !self.is_hidden_property(name) {
            return self.write(name, value);
        }
        if self.0.class.has_method(MAGIC_SET) {
            self.invoke(MAGIC_SET, &[Value::from(name), value])?;
            return Ok(());
        }
        Err(Thrown::error(format!(
            "Cannot access non-public property {}::${}",
            self.class_name(),
            name
        )))
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({}#{})", self.class_name(), self.id())
    }
}
