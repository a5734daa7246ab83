use rusqlite::Connection;
use todo_core::validation::{check_task_name, TASK_NAME_FIELD};
use todo_core::{Surface, TodoDraft, TodoInput, ValidationErrors};

use crate::error::AppError;
use crate::store::todos;

/// Check a write against the entity rules before any mutation.
///
/// `existing_id` is the record being updated, whose own name does not count
/// as a collision. Failures come back as `AppError::Invalid`; storage errors
/// during the uniqueness lookup propagate as they are.
pub fn validate(
    conn: &Connection,
    input: &TodoInput,
    existing_id: Option<i64>,
    surface: Surface,
) -> Result<TodoDraft, AppError> {
    let name = check_task_name(input.task_name.as_deref(), surface)
        .map_err(|message| AppError::Invalid(ValidationErrors::single(TASK_NAME_FIELD, message)))?;

    if todos::name_taken(conn, &name, existing_id)? {
        return Err(AppError::Invalid(ValidationErrors::single(
            TASK_NAME_FIELD,
            surface.duplicate_name(),
        )));
    }

    Ok(TodoDraft {
        task_name: Some(name),
        task_description: input.task_description.clone(),
        is_completed: input.is_completed.unwrap_or(false),
    })
}
