//! Todo tracker web application.
//!
//! One axum router serves three surfaces over the same SQLite table:
//! - HTML pages (`/`, `/add/`, `/edit/{id}`, `/delete/{id}`),
//! - the JSON API (`/todos`, `/todos/{id}`),
//! - the admin changelist (`/admin/{entity}/`).

pub mod admin;
pub mod config;
pub mod error;
pub mod pages;
pub mod pagination;
pub mod payload;
pub mod resolver;
pub mod rest;
pub mod store;
pub mod templates;
pub mod validation;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tera::Tera;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::Config;
pub use store::Store;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub templates: Arc<Tera>,
    pub page_size: usize,
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(store: Store, config: &Config) -> Result<Self, tera::Error> {
        Ok(Self {
            store: Arc::new(store),
            templates: Arc::new(templates::load()?),
            page_size: config.page_size,
            cors_origins: config.cors_origins.clone(),
        })
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        AllowOrigin::list(origins)
    };
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(allow_origin)
}

pub fn app(state: AppState) -> Router {
    let api = rest::router().layer(cors_layer(&state.cors_origins));

    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .merge(pages::router())
        .merge(api)
        .merge(admin::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    for entity in admin::registered() {
        info!(entity, "admin changelist registered");
    }
    axum::serve(listener, app(state)).await
}
