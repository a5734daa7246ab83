//! Server-rendered list, create, update and delete flows.
//!
//! Successful writes answer `302 Found` to the list page. A rejected write
//! re-renders its form with `200 OK`, the submitted values and the field
//! messages, and leaves storage untouched.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tera::Context;
use todo_core::validation::TASK_NAME_FIELD;
use todo_core::{Surface, Todo, TodoInput, ValidationErrors};
use tracing::{info, warn};

use crate::error::{parse_id, AppError, PageError};
use crate::store::todos;
use crate::{resolver, templates, validation, AppState};

const LIST_URL: &str = "/";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/add/", get(create_form).post(create_submit))
        .route("/edit/{id}", get(edit_form).post(edit_submit))
        .route("/delete/{id}", get(delete_confirm).post(delete_submit))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    status: Option<String>,
    search: Option<String>,
    format: Option<String>,
}

/// Raw form fields as posted by the browser.
#[derive(Debug, Default, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    task_name: Option<String>,
    #[serde(default)]
    task_description: Option<String>,
    #[serde(default)]
    is_completed: Option<String>,
}

impl TodoForm {
    /// A body that is not a urlencoded form posts no fields.
    fn from_body(body: Result<Form<TodoForm>, FormRejection>) -> Self {
        match body {
            Ok(Form(form)) => form,
            Err(rejection) => {
                warn!(%rejection, "form body ignored");
                Self::default()
            }
        }
    }

    fn from_todo(todo: &Todo) -> Self {
        Self {
            task_name: Some(todo.task_name.clone()),
            task_description: todo.task_description.clone(),
            is_completed: todo.is_completed.then(|| "on".to_string()),
        }
    }

    fn checked(&self) -> bool {
        matches!(
            self.is_completed.as_deref(),
            Some("on" | "true" | "True" | "1")
        )
    }

    fn to_input(&self) -> TodoInput {
        TodoInput {
            task_name: self.task_name.clone(),
            task_description: self.task_description.clone().filter(|d| !d.is_empty()),
            is_completed: Some(self.checked()),
        }
    }
}

/// Values echoed back into the form template.
#[derive(Serialize)]
struct FormValues<'a> {
    task_name: &'a str,
    task_description: &'a str,
    is_completed: bool,
}

fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, LIST_URL)]).into_response()
}

fn render_form(
    state: &AppState,
    form: &TodoForm,
    errors: &ValidationErrors,
    editing: Option<i64>,
) -> Result<Response, PageError> {
    let mut context = Context::new();
    context.insert(
        "form",
        &FormValues {
            task_name: form.task_name.as_deref().unwrap_or_default(),
            task_description: form.task_description.as_deref().unwrap_or_default(),
            is_completed: form.checked(),
        },
    );
    context.insert("task_name_errors", errors.field(TASK_NAME_FIELD));
    match editing {
        Some(id) => {
            context.insert("heading", "Update Todo");
            context.insert("action", &format!("/edit/{id}"));
            context.insert("submit_label", "Update");
        }
        None => {
            context.insert("heading", "Add Todo");
            context.insert("action", "/add/");
            context.insert("submit_label", "Save");
        }
    }
    let html = templates::render(&state.templates, "form.html", &context)?;
    Ok(Html(html).into_response())
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, PageError> {
    let records = {
        let conn = state.store.conn();
        resolver::resolve(
            &conn,
            params.status.as_deref(),
            params.search.as_deref(),
            Surface::Page,
        )?
    };

    if params.format.as_deref() == Some("json") {
        return Ok(Json(records).into_response());
    }

    let mut context = Context::new();
    context.insert("count", &records.len());
    context.insert("todos", &records);
    context.insert("status", params.status.as_deref().unwrap_or("completed"));
    context.insert("search", params.search.as_deref().unwrap_or_default());
    let html = templates::render(&state.templates, "list.html", &context)?;
    Ok(Html(html).into_response())
}

async fn create_form(State(state): State<AppState>) -> Result<Response, PageError> {
    render_form(&state, &TodoForm::default(), &ValidationErrors::new(), None)
}

async fn create_submit(
    State(state): State<AppState>,
    body: Result<Form<TodoForm>, FormRejection>,
) -> Result<Response, PageError> {
    let form = TodoForm::from_body(body);
    let outcome = {
        let conn = state.store.conn();
        match validation::validate(&conn, &form.to_input(), None, Surface::Page) {
            Ok(draft) => Ok(todos::insert(&conn, &draft)?),
            Err(err) => Err(err),
        }
    };

    match outcome {
        Ok(todo) => {
            info!(id = todo.id, name = %todo, "todo created");
            Ok(redirect_to_list())
        }
        Err(AppError::Invalid(errors)) => {
            warn!(?errors, "rejected todo create");
            render_form(&state, &form, &errors, None)
        }
        Err(err) => Err(err.into()),
    }
}

async fn edit_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, PageError> {
    let id = parse_id(&raw_id)?;
    let todo = todos::get(&state.store.conn(), id)?.ok_or(AppError::NotFound)?;
    render_form(&state, &TodoForm::from_todo(&todo), &ValidationErrors::new(), Some(id))
}

async fn edit_submit(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Form<TodoForm>, FormRejection>,
) -> Result<Response, PageError> {
    let id = parse_id(&raw_id)?;
    let form = TodoForm::from_body(body);
    let outcome = {
        let conn = state.store.conn();
        if todos::get(&conn, id)?.is_none() {
            return Err(AppError::NotFound.into());
        }
        match validation::validate(&conn, &form.to_input(), Some(id), Surface::Page) {
            Ok(draft) => todos::update(&conn, id, &draft)?.ok_or(AppError::NotFound),
            Err(err) => Err(err),
        }
    };

    match outcome {
        Ok(todo) => {
            info!(id = todo.id, "todo updated");
            Ok(redirect_to_list())
        }
        Err(AppError::Invalid(errors)) => {
            warn!(id, ?errors, "rejected todo update");
            render_form(&state, &form, &errors, Some(id))
        }
        Err(err) => Err(err.into()),
    }
}

async fn delete_confirm(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, PageError> {
    let id = parse_id(&raw_id)?;
    let todo = todos::get(&state.store.conn(), id)?.ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("todo", &todo);
    let html = templates::render(&state.templates, "confirm_delete.html", &context)?;
    Ok(Html(html).into_response())
}

async fn delete_submit(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, PageError> {
    let id = parse_id(&raw_id)?;
    let removed = todos::delete(&state.store.conn(), id)?;
    if !removed {
        return Err(AppError::NotFound.into());
    }
    info!(id, "todo deleted");
    Ok(redirect_to_list())
}
