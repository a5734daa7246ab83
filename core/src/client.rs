//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; the caller executes the round-trip. Listing
//! links (`next`/`previous`) come back relative and are resolved against the
//! same base by [`TodoClient::build_follow`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Listing, Todo, TodoInput};
use crate::validation::ValidationErrors;

/// Query parameters accepted by `GET /todos`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl ListQuery {
    pub fn status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self, query: &ListQuery) -> Result<HttpRequest, ApiError> {
        let qs = serde_urlencoded::to_string(query)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let url = if qs.is_empty() {
            format!("{}/todos", self.base_url)
        } else {
            format!("{}/todos?{qs}", self.base_url)
        };
        Ok(HttpRequest::new(HttpMethod::Get, url))
    }

    /// Build a GET for a `next`/`previous` link from a listing.
    pub fn build_follow(&self, link: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}{link}", self.base_url))
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_todo(&self, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(HttpRequest::new(HttpMethod::Post, format!("{}/todos", self.base_url)).with_json(body))
    }

    pub fn build_update_todo(&self, id: i64, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(HttpRequest::new(HttpMethod::Put, self.item_url(id)).with_json(body))
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Listing<Todo>, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        from_json(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/todos/{id}", self.base_url)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
///
/// A 400 whose body is a field map becomes `Validation`; a 400 carrying
/// `{"detail": ...}` (malformed payload) stays an `HttpError`.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        s if s == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => match serde_json::from_str::<ValidationErrors>(&response.body) {
            Ok(errors) if !errors.is_empty() => Err(ApiError::Validation(errors)),
            _ => Err(ApiError::HttpError {
                status: 400,
                body: response.body.clone(),
            }),
        },
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str =
        r#"{"id":1,"task_name":"Task 1","task_description":null,"is_completed":false}"#;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    #[test]
    fn build_list_without_query() {
        let req = client().build_list_todos(&ListQuery::default()).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_encodes_query() {
        let query = ListQuery::default().status("not-completed").search("buy milk").page(2);
        let req = client().build_list_todos(&query).unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/todos?status=not-completed&search=buy+milk&page=2"
        );
    }

    #[test]
    fn build_follow_resolves_relative_link() {
        let req = client().build_follow("/todos?status=all&page=3");
        assert_eq!(req.url, "http://localhost:3000/todos?status=all&page=3");
    }

    #[test]
    fn build_get_todo_uses_integer_id() {
        let req = client().build_get_todo(42);
        assert_eq!(req.url, "http://localhost:3000/todos/42");
    }

    #[test]
    fn build_create_todo_sends_json() {
        let req = client()
            .build_create_todo(&TodoInput::new("Buy milk"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["task_name"], "Buy milk");
        assert!(body["task_description"].is_null());
        assert!(body.get("is_completed").is_none());
    }

    #[test]
    fn build_update_and_delete() {
        let req = client()
            .build_update_todo(5, &TodoInput::new("Renamed").completed(true))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/todos/5");

        let req = client().build_delete_todo(5);
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_envelope() {
        let body = format!(r#"{{"count":1,"next":null,"previous":null,"results":[{RECORD}]}}"#);
        let listing = client().parse_list_todos(HttpResponse::new(200, body)).unwrap();
        assert_eq!(listing.count, 1);
        assert_eq!(listing.results[0].task_name, "Task 1");
    }

    #[test]
    fn parse_create_validation_error() {
        let response = HttpResponse::new(
            400,
            r#"{"task_name":["todo with this task name already exists."]}"#,
        );
        match client().parse_create_todo(response).unwrap_err() {
            ApiError::Validation(errors) => assert_eq!(
                errors.field("task_name"),
                ["todo with this task name already exists."]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_bad_request_detail_is_http_error() {
        let response = HttpResponse::new(400, r#"{"detail":"JSON parse error"}"#);
        let err = client().parse_create_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    }

    #[test]
    fn parse_not_found() {
        let err = client()
            .parse_delete_todo(HttpResponse::new(404, r#"{"detail":"Not found."}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_success() {
        assert!(client().parse_delete_todo(HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn parse_server_error() {
        let err = client()
            .parse_update_todo(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_get_bad_json() {
        let err = client()
            .parse_get_todo(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = TodoClient::new("http://localhost:3000/").build_get_todo(1);
        assert_eq!(req.url, "http://localhost:3000/todos/1");
    }
}
