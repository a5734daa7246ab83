//! Domain DTOs for the todo service.
//!
//! # Design
//! `Todo` is both the stored record shape and the JSON wire shape, so the
//! server and any client agree on one definition. `TodoInput` is the write
//! payload: every field is optional at the serde level so that a missing
//! `task_name` reaches validation (and gets a field-level message) instead of
//! being rejected by the deserializer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single persisted todo record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub task_name: String,
    pub task_description: Option<String>,
    pub is_completed: bool,
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.task_name)
    }
}

/// Write payload for create and full-replace update.
///
/// Omitted `task_description` means null and omitted `is_completed` means
/// false; an update replaces every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoInput {
    #[serde(default)]
    pub task_name: Option<String>,
    #[serde(default)]
    pub task_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TodoInput {
    pub fn new(task_name: &str) -> Self {
        Self {
            task_name: Some(task_name.to_string()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.task_description = Some(description.to_string());
        self
    }

    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }
}

/// A validated write, ready for storage.
///
/// `task_name` stays optional so the storage layer can still observe a null
/// name handed to it directly; validated drafts always carry `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub task_name: Option<String>,
    pub task_description: Option<String>,
    pub is_completed: bool,
}

/// Page-number listing envelope returned by `GET /todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}
