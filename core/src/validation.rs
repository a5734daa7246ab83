//! Field rules for `task_name` and the messages each surface reports.
//!
//! The page forms and the JSON API word some messages differently; `Surface`
//! picks the variant. Rules stop at the first failure so a field carries at
//! most one message. The uniqueness rule needs storage and is applied by the
//! server, which uses [`Surface::duplicate_name`] for its message.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const TASK_NAME_FIELD: &str = "task_name";
pub const TASK_NAME_MIN_CHARS: usize = 3;
pub const TASK_NAME_MAX_CHARS: usize = 50;

/// Interface a write arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Page,
    Api,
}

impl Surface {
    pub fn blank_name(self) -> &'static str {
        match self {
            Surface::Page => "This field cannot be blank.",
            Surface::Api => "This field is required.",
        }
    }

    pub fn duplicate_name(self) -> &'static str {
        match self {
            Surface::Page => "Todo with this Task name already exists.",
            Surface::Api => "todo with this task name already exists.",
        }
    }
}

/// Field name to messages, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Apply the presence and length rules to a raw name.
///
/// Returns the trimmed name on success or the single message to report.
pub fn check_task_name(raw: Option<&str>, surface: Surface) -> Result<String, String> {
    let name = raw.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(surface.blank_name().to_string());
    }
    let len = name.chars().count();
    if len < TASK_NAME_MIN_CHARS {
        return Err(format!(
            "Ensure this value has at least {TASK_NAME_MIN_CHARS} characters (it has {len})."
        ));
    }
    if len > TASK_NAME_MAX_CHARS {
        return Err(format!(
            "Ensure this value has at most {TASK_NAME_MAX_CHARS} characters (it has {len})."
        ));
    }
    Ok(name.to_string())
}
