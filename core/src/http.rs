//! HTTP transport types for the host-does-IO pattern.
//!
//! Requests and responses are plain owned data. `TodoClient` produces
//! `HttpRequest` values and consumes `HttpResponse` values; whoever holds a
//! socket performs the round-trip in between.

pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An outbound request. `url` is absolute and already carries any query.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_json(mut self, body: String) -> Self {
        self.headers
            .push(("content-type".to_string(), CONTENT_TYPE_JSON.to_string()));
        self.body = Some(body);
        self
    }
}

/// A response as handed back by the host.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}
