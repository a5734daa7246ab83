use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use todo_core::{Listing, Surface, Todo, TodoInput};
use tracing::{info, warn};

use crate::error::{parse_id, AppError};
use crate::pagination::paginate;
use crate::payload::TodoBody;
use crate::store::todos;
use crate::{resolver, validation, AppState};

const COLLECTION_URL: &str = "/todos";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(COLLECTION_URL, get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    status: Option<String>,
    search: Option<String>,
    page: Option<String>,
}

impl ListParams {
    /// Relative link to `page`, keeping the filter parameters. Page 1 is
    /// linked without a `page` parameter.
    fn page_link(&self, page: usize) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if page > 1 {
            pairs.push(("page", page.to_string()));
        }
        match serde_urlencoded::to_string(&pairs) {
            Ok(qs) if !qs.is_empty() => format!("{COLLECTION_URL}?{qs}"),
            _ => COLLECTION_URL.to_string(),
        }
    }
}

/// Unparseable bodies are a `detail` error; values of the wrong type are
/// reported against their field.
fn json_body(body: Result<Json<TodoBody>, JsonRejection>) -> Result<TodoInput, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    body.into_input().map_err(AppError::Invalid)
}

async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Listing<Todo>>, AppError> {
    let records = resolver::resolve(
        &state.store.conn(),
        params.status.as_deref(),
        params.search.as_deref(),
        Surface::Api,
    )?;
    let listing = paginate(records, params.page.as_deref(), state.page_size, |page| {
        params.page_link(page)
    })?;
    Ok(Json(listing))
}

async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<TodoBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let input = json_body(body).inspect_err(|err| warn!(error = %err, "rejected todo create"))?;
    let todo = {
        let conn = state.store.conn();
        let draft = validation::validate(&conn, &input, None, Surface::Api)
            .inspect_err(|err| warn!(error = %err, "rejected todo create"))?;
        todos::insert(&conn, &draft)?
    };
    info!(id = todo.id, name = %todo, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Todo>, AppError> {
    let id = parse_id(&raw_id)?;
    let todo = todos::get(&state.store.conn(), id)?.ok_or(AppError::NotFound)?;
    Ok(Json(todo))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<TodoBody>, JsonRejection>,
) -> Result<Json<Todo>, AppError> {
    let id = parse_id(&raw_id)?;
    let todo = {
        let conn = state.store.conn();
        if todos::get(&conn, id)?.is_none() {
            return Err(AppError::NotFound);
        }
        let input = json_body(body)?;
        let draft = validation::validate(&conn, &input, Some(id), Surface::Api)
            .inspect_err(|err| warn!(id, error = %err, "rejected todo update"))?;
        todos::update(&conn, id, &draft)?.ok_or(AppError::NotFound)?
    };
    info!(id, "todo updated");
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&raw_id)?;
    if !todos::delete(&state.store.conn(), id)? {
        return Err(AppError::NotFound);
    }
    info!(id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(status: Option<&str>, search: Option<&str>) -> ListParams {
        ListParams {
            status: status.map(String::from),
            search: search.map(String::from),
            page: None,
        }
    }

    #[test]
    fn page_link_keeps_filters() {
        let p = params(Some("all"), Some("buy milk"));
        assert_eq!(p.page_link(3), "/todos?status=all&search=buy+milk&page=3");
        assert_eq!(p.page_link(1), "/todos?status=all&search=buy+milk");
    }

    #[test]
    fn first_page_link_without_filters_is_bare() {
        assert_eq!(params(None, None).page_link(1), "/todos");
        assert_eq!(params(None, None).page_link(2), "/todos?page=2");
    }
}
