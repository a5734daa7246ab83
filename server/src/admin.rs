//! Admin changelist binding.
//!
//! Each entity registers a `ModelAdmin` in a static table: which columns the
//! changelist shows, which field it filters by and which fields its search
//! box looks in. The changelist handler reads only this table.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tera::Context;
use todo_core::Todo;

use crate::error::{AppError, PageError};
use crate::store::todos;
use crate::{templates, AppState};

#[derive(Debug, PartialEq, Eq)]
pub struct ModelAdmin {
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    pub search_fields: &'static [&'static str],
}

pub static REGISTRY: &[(&str, ModelAdmin)] = &[(
    "todo",
    ModelAdmin {
        list_display: &["id", "task_name", "is_completed"],
        list_filter: &["is_completed"],
        search_fields: &["task_name", "task_description"],
    },
)];

pub fn lookup(entity: &str) -> Option<&'static ModelAdmin> {
    REGISTRY
        .iter()
        .find(|(name, _)| *name == entity)
        .map(|(_, admin)| admin)
}

pub fn registered() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/{entity}/", get(changelist))
}

#[derive(Debug, Default, Deserialize)]
pub struct ChangelistParams {
    q: Option<String>,
    is_completed: Option<String>,
}

fn parse_flag(raw: Option<&str>) -> Option<bool> {
    match raw? {
        "true" | "True" | "1" => Some(true),
        "false" | "False" | "0" => Some(false),
        _ => None,
    }
}

fn cell(todo: &Todo, column: &str) -> String {
    match column {
        "id" => todo.id.to_string(),
        "task_name" => todo.task_name.clone(),
        "task_description" => todo.task_description.clone().unwrap_or_else(|| "-".to_string()),
        "is_completed" => todo.is_completed.to_string(),
        _ => "-".to_string(),
    }
}

/// Project records onto the configured columns.
fn rows(admin: &ModelAdmin, records: &[Todo]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|todo| admin.list_display.iter().map(|column| cell(todo, column)).collect())
        .collect()
}

async fn changelist(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(params): Query<ChangelistParams>,
) -> Result<Response, PageError> {
    let admin = lookup(&entity).ok_or(AppError::NotFound)?;

    let completed = if admin.list_filter.contains(&"is_completed") {
        parse_flag(params.is_completed.as_deref())
    } else {
        None
    };
    let records = todos::search(
        &state.store.conn(),
        admin.search_fields,
        params.q.as_deref(),
        completed,
    )?;

    let mut context = Context::new();
    context.insert("entity", &entity);
    context.insert("columns", admin.list_display);
    context.insert("filters", admin.list_filter);
    context.insert("searchable", &!admin.search_fields.is_empty());
    context.insert("q", params.q.as_deref().unwrap_or_default());
    context.insert("rows", &rows(admin, &records));
    let html = templates::render(&state.templates, "admin_changelist.html", &context)?;
    Ok(Html(html).into_response())
}
