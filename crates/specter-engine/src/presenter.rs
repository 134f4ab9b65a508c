//! One-line renderings of values, calls and errors for diagnostics

use specter_sdk::Value;

use crate::error::SpecError;

/// Default truncation width for strings
pub const DEFAULT_MAX_STRING_WIDTH: usize = 40;

/// Renders host values for log lines and error reports
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    max_string_width: usize,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STRING_WIDTH)
    }
}

impl Presenter {
    /// Create a presenter truncating strings past `max_string_width` characters
    pub fn new(max_string_width: usize) -> Self {
        Self { max_string_width }
    }

    /// Render a single value
    pub fn present_value(&self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format!("{:?}", f),
            Value::Str(s) => self.present_string(s),
            Value::Array(items) => format!("[array:{}]", items.len()),
            Value::Object(object) => format!("obj:{}", object.class_name()),
        }
    }

    fn present_string(&self, s: &str) -> String {
        if s.chars().count() <= self.max_string_width {
            return format!("\"{}\"", s);
        }
        let head: String = s.chars().take(self.max_string_width).collect();
        format!("\"{}\"...", head)
    }

    /// Render an argument list, comma separated
    pub fn present_arguments(&self, arguments: &[Value]) -> String {
        arguments
            .iter()
            .map(|argument| self.present_value(argument))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render a call as `method(arg, ...)`
    pub fn present_call(&self, method: &str, arguments: &[Value]) -> String {
        format!("{}({})", method, self.present_arguments(arguments))
    }

    /// Render an error with the arguments it carries
    pub fn present_error(&self, error: &SpecError) -> String {
        match error.arguments() {
            Some(arguments) if !arguments.is_empty() => {
                format!("{} (arguments: {})", error, self.present_arguments(arguments))
            }
            _ => error.to_string(),
        }
    }
}
