//! Domain core for the todo service.
//!
//! # Overview
//! Shared by the server and by anything that talks to its JSON API:
//! - [`types`]: the `Todo` record, write payloads and the listing envelope.
//! - [`validation`]: `task_name` rules and the per-surface messages.
//! - [`filter`]: the status filter and its two query spellings.
//! - [`client`]: a stateless REST client (host-does-IO, `build_*`/`parse_*`).
//!
//! Nothing here performs I/O.

pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod types;
pub mod validation;

pub use client::{ListQuery, TodoClient};
pub use error::ApiError;
pub use filter::StatusFilter;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Listing, Todo, TodoDraft, TodoInput};
pub use validation::{Surface, ValidationErrors};
