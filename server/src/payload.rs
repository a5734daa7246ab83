//! JSON write bodies for the REST surface.
//!
//! Fields arrive as raw JSON values and are coerced the way a form serializer
//! would: numbers become strings, and a fixed set of strings and numbers
//! become booleans. Values that cannot be coerced are reported per field.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use todo_core::validation::TASK_NAME_FIELD;
use todo_core::{TodoInput, ValidationErrors};

const TASK_DESCRIPTION_FIELD: &str = "task_description";
const IS_COMPLETED_FIELD: &str = "is_completed";

const TRUE_VALUES: &[&str] = &[
    "t", "T", "y", "Y", "yes", "Yes", "YES", "true", "True", "TRUE", "on", "On", "ON", "1",
];
const FALSE_VALUES: &[&str] = &[
    "f", "F", "n", "N", "no", "No", "NO", "false", "False", "FALSE", "off", "Off", "OFF", "0",
];

const INVALID_BOOLEAN: &str = "Must be a valid boolean.";
const INVALID_STRING: &str = "Not a valid string.";
const NOT_NULL: &str = "This field may not be null.";

/// Body of `POST /todos` and `PUT /todos/{id}`.
///
/// Each field is `None` when absent and `Some(Value::Null)` when sent as null.
#[derive(Debug, Default, Deserialize)]
pub struct TodoBody {
    #[serde(default, deserialize_with = "present")]
    task_name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    task_description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    is_completed: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl TodoBody {
    /// Coerce every field, collecting one message per field that fails.
    pub fn into_input(self) -> Result<TodoInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut input = TodoInput::default();

        // a null name falls through to the required-field rule
        match self.task_name.map(coerce_string).transpose() {
            Ok(name) => input.task_name = name.flatten(),
            Err(message) => errors.add(TASK_NAME_FIELD, message),
        }
        match self.task_description.map(coerce_string).transpose() {
            Ok(description) => input.task_description = description.flatten(),
            Err(message) => errors.add(TASK_DESCRIPTION_FIELD, message),
        }
        match self.is_completed.map(coerce_bool).transpose() {
            Ok(completed) => input.is_completed = completed,
            Err(message) => errors.add(IS_COMPLETED_FIELD, message),
        }

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(errors)
        }
    }
}

fn coerce_string(value: Value) -> Result<Option<String>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Err(INVALID_STRING),
    }
}

fn coerce_bool(value: Value) -> Result<bool, &'static str> {
    match value {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 1.0 => Ok(true),
            Some(x) if x == 0.0 => Ok(false),
            _ => Err(INVALID_BOOLEAN),
        },
        Value::String(s) if TRUE_VALUES.contains(&s.as_str()) => Ok(true),
        Value::String(s) if FALSE_VALUES.contains(&s.as_str()) => Ok(false),
        Value::Null => Err(NOT_NULL),
        Value::String(_) | Value::Array(_) | Value::Object(_) => Err(INVALID_BOOLEAN),
    }
}
