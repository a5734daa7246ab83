use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use todo_core::{Todo, TodoDraft};
use tracing::debug;

use super::StoreError;

const SELECT_TODO: &str = "SELECT id, task_name, task_description, is_completed FROM todos";

/// Columns an admin search may reference.
pub const SEARCHABLE_COLUMNS: &[&str] = &["task_name", "task_description"];

fn row_to_todo(row: &rusqlite::Row) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get("id")?,
        task_name: row.get("task_name")?,
        task_description: row.get("task_description")?,
        is_completed: row.get("is_completed")?,
    })
}

/// `%needle%` with LIKE wildcards in the needle escaped by `\`.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn query_todos(
    conn: &Connection,
    clauses: &[String],
    args: Vec<Value>,
) -> Result<Vec<Todo>, StoreError> {
    let mut sql = SELECT_TODO.to_string();
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), row_to_todo)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Records matching an optional completion flag and an optional
/// case-insensitive substring of `task_name`, ascending by id.
pub fn list(
    conn: &Connection,
    completed: Option<bool>,
    name_contains: Option<&str>,
) -> Result<Vec<Todo>, StoreError> {
    let mut clauses = Vec::new();
    let mut args = Vec::new();
    if let Some(completed) = completed {
        clauses.push("is_completed = ?".to_string());
        args.push(Value::Integer(i64::from(completed)));
    }
    if let Some(needle) = name_contains {
        clauses.push("task_name LIKE ? ESCAPE '\\'".to_string());
        args.push(Value::Text(contains_pattern(needle)));
    }
    query_todos(conn, &clauses, args)
}

/// Admin changelist query: every whitespace-separated term must appear in at
/// least one of `search_fields`.
pub fn search(
    conn: &Connection,
    search_fields: &[&str],
    query: Option<&str>,
    completed: Option<bool>,
) -> Result<Vec<Todo>, StoreError> {
    let fields: Vec<&str> = search_fields
        .iter()
        .copied()
        .filter(|f| SEARCHABLE_COLUMNS.contains(f))
        .collect();

    let mut clauses = Vec::new();
    let mut args = Vec::new();
    if let Some(completed) = completed {
        clauses.push("is_completed = ?".to_string());
        args.push(Value::Integer(i64::from(completed)));
    }
    if !fields.is_empty() {
        for term in query.unwrap_or_default().split_whitespace() {
            let any_field: Vec<String> = fields
                .iter()
                .map(|f| format!("{f} LIKE ? ESCAPE '\\'"))
                .collect();
            clauses.push(format!("({})", any_field.join(" OR ")));
            for _ in &fields {
                args.push(Value::Text(contains_pattern(term)));
            }
        }
    }
    query_todos(conn, &clauses, args)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Todo>, StoreError> {
    let todo = conn
        .query_row(&format!("{SELECT_TODO} WHERE id = ?1"), params![id], row_to_todo)
        .optional()?;
    Ok(todo)
}

pub fn count(conn: &Connection) -> Result<i64, StoreError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))?)
}

/// Whether another record already uses `name` (exact, case-sensitive).
pub fn name_taken(conn: &Connection, name: &str, exclude: Option<i64>) -> Result<bool, StoreError> {
    let taken = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM todos WHERE task_name = ?1 AND (?2 IS NULL OR id != ?2))",
        params![name, exclude],
        |row| row.get(0),
    )?;
    Ok(taken)
}

pub fn insert(conn: &Connection, draft: &TodoDraft) -> Result<Todo, StoreError> {
    conn.execute(
        "INSERT INTO todos (task_name, task_description, is_completed) VALUES (?1, ?2, ?3)",
        params![draft.task_name, draft.task_description, draft.is_completed],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, "inserted todo");
    get(conn, id)?.ok_or_else(|| StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
}

/// Replace every mutable field; `None` when no record has `id`.
pub fn update(conn: &Connection, id: i64, draft: &TodoDraft) -> Result<Option<Todo>, StoreError> {
    let changed = conn.execute(
        "UPDATE todos SET task_name = ?1, task_description = ?2, is_completed = ?3 WHERE id = ?4",
        params![draft.task_name, draft.task_description, draft.is_completed, id],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    debug!(id, "updated todo");
    get(conn, id)
}

/// Hard delete; `false` when no record has `id`.
pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    let removed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
    if removed > 0 {
        debug!(id, "deleted todo");
    }
    Ok(removed > 0)
}
