//! Conversion from host values to Rust types.
//!
//! Method bodies receive `&[Value]`; `FromValue` and [`arg`] turn those into
//! typed Rust values, raising a host `TypeError` on mismatch. The reverse
//! direction is covered by the `From<T> for Value` impls.
//!
//! # Example
//!
//! ```ignore
//! .method("deposit", Visibility::Public, |this, args| {
//!     let amount: i64 = arg(args, 0)?;
//!     ...
//! })
//! ```

use crate::error::{HostResult, Thrown};
use crate::value::{ObjectRef, Value};

/// Convert from a host value to a Rust type.
pub trait FromValue: Sized {
    /// Convert, raising a `TypeError` if the value has the wrong type
    fn from_value(value: &Value) -> HostResult<Self>;
}

fn mismatch(expected: &str, value: &Value) -> Thrown {
    Thrown::type_error(format!("expected {}, got {}", expected, value.type_name()))
}

impl FromValue for Value {
    fn from_value(value: &Value) -> HostResult<Self> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> HostResult<Self> {
        value.as_int().ok_or_else(|| mismatch("int", value))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> HostResult<Self> {
        value.as_float().ok_or_else(|| mismatch("float", value))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> HostResult<Self> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> HostResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("string", value))
    }
}

impl FromValue for ObjectRef {
    fn from_value(value: &Value) -> HostResult<Self> {
        value.as_object().cloned().ok_or_else(|| mismatch("object", value))
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: &Value) -> HostResult<Self> {
        value
            .as_array()
            .map(<[Value]>::to_vec)
            .ok_or_else(|| mismatch("array", value))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> HostResult<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Fetch and convert argument `index`, raising an `ArgumentCountError`
/// if it was not passed.
pub fn arg<T: FromValue>(args: &[Value], index: usize) -> HostResult<T> {
    let value = args.get(index).ok_or_else(|| {
        Thrown::new(
            "ArgumentCountError",
            format!("too few arguments: {} passed, at least {} expected", args.len(), index + 1),
        )
    })?;
    T::from_value(value)
}
