//! Request facade for the posts API.
//!
//! # Design
//! `ApiClient` holds a `base_url` and a `ureq::Agent`, nothing else. Every
//! verb is split into a `build_*` method that produces an `HttpRequest` and
//! a single `send` that executes it. Building is pure, so request shapes are
//! unit-testable; `send` never looks at the status code, so 4xx/5xx answers
//! reach the caller as data.

use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";

/// Payload for POST, PUT and PATCH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// A serialized model.
    Json(String),
    /// Sent verbatim, for malformed-body cases.
    Raw(String),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_string(value)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::Serialization(e.to_string()))
    }

    pub fn raw(text: impl Into<String>) -> Self {
        RequestBody::Raw(text.into())
    }

    fn into_string(self) -> String {
        match self {
            RequestBody::Json(text) | RequestBody::Raw(text) => text,
        }
    }
}

/// Synchronous client bound to one base host.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        // Statuses are data, not errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get(&self, path: &str) -> HttpRequest {
        self.bodiless(HttpMethod::Get, path)
    }

    pub fn build_get_with_params(&self, path: &str, params: &[(&str, &str)]) -> HttpRequest {
        let mut request = self.bodiless(HttpMethod::Get, path);
        request.query = params
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        request
    }

    pub fn build_delete(&self, path: &str) -> HttpRequest {
        self.bodiless(HttpMethod::Delete, path)
    }

    pub fn build_post(&self, path: &str, body: RequestBody) -> HttpRequest {
        self.with_body(HttpMethod::Post, path, body)
    }

    pub fn build_put(&self, path: &str, body: RequestBody) -> HttpRequest {
        self.with_body(HttpMethod::Put, path, body)
    }

    pub fn build_patch(&self, path: &str, body: RequestBody) -> HttpRequest {
        self.with_body(HttpMethod::Patch, path, body)
    }

    /// Execute `request` and return whatever the server sent.
    pub fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            url,
            query,
            headers,
            body,
        } = request;
        debug!(method = method.as_str(), %url, "sending request");
        let started = Instant::now();

        let transport = |e: ureq::Error| ApiError::Transport {
            method: method.as_str(),
            url: url.clone(),
            message: e.to_string(),
        };

        let result = match method {
            HttpMethod::Get => with_parts(self.agent.get(&url), &query, &headers).call(),
            HttpMethod::Delete => with_parts(self.agent.delete(&url), &query, &headers).call(),
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                let builder = match method {
                    HttpMethod::Post => self.agent.post(&url),
                    HttpMethod::Put => self.agent.put(&url),
                    _ => self.agent.patch(&url),
                };
                let builder = with_parts(builder, &query, &headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(transport)?;

        let status = response.status().as_u16();
        let headers = header_pairs(response.headers());
        let body = response.body_mut().read_to_string().map_err(transport)?;

        debug!(
            method = method.as_str(),
            %url,
            status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    pub fn get(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(self.build_get(path))
    }

    pub fn get_with_params(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpResponse, ApiError> {
        self.send(self.build_get_with_params(path, params))
    }

    pub fn delete(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(self.build_delete(path))
    }

    pub fn post(&self, path: &str, body: RequestBody) -> Result<HttpResponse, ApiError> {
        self.send(self.build_post(path, body))
    }

    pub fn put(&self, path: &str, body: RequestBody) -> Result<HttpResponse, ApiError> {
        self.send(self.build_put(path, body))
    }

    pub fn patch(&self, path: &str, body: RequestBody) -> Result<HttpResponse, ApiError> {
        self.send(self.build_patch(path, body))
    }

    fn bodiless(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_body(&self, method: HttpMethod, path: &str, body: RequestBody) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
            body: Some(body.into_string()),
        }
    }
}

fn with_parts<B>(
    mut builder: ureq::RequestBuilder<B>,
    query: &[(String, String)],
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (k, v) in query {
        builder = builder.query(k, v);
    }
    for (k, v) in headers {
        builder = builder.header(k, v);
    }
    builder
}

/// Header values that are not valid UTF-8 are kept, decoded lossily.
fn header_pairs(headers: &ureq::http::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}
