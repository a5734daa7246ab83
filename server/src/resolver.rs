use rusqlite::Connection;
use todo_core::{StatusFilter, Surface, Todo};

use crate::store::{todos, StoreError};

/// Map a raw `status` value with the spelling of the given surface.
pub fn status_for(surface: Surface, raw: Option<&str>) -> StatusFilter {
    match surface {
        Surface::Page => StatusFilter::from_page_param(raw),
        Surface::Api => StatusFilter::from_api_param(raw),
    }
}

/// Turn listing parameters into the matching records, ascending by id.
///
/// An empty `search` is the same as none.
pub fn resolve(
    conn: &Connection,
    status: Option<&str>,
    search: Option<&str>,
    surface: Surface,
) -> Result<Vec<Todo>, StoreError> {
    let filter = status_for(surface, status);
    let search = search.filter(|s| !s.is_empty());
    todos::list(conn, filter.completed(), search)
}
