//! HTTP transport types.
//!
//! # Design
//! Requests and responses are plain data. `ApiClient::build_*` produces an
//! `HttpRequest`, `ApiClient::send` executes it and hands back an
//! `HttpResponse` whatever its status. Status interpretation belongs to the
//! caller; a 404 or a 500 is a perfectly good response here.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute (base host already joined). `query` pairs are appended
/// by the transport, not baked into `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Raw body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Deserialize the body into `T`. Works for single objects and for
    /// `Vec<T>` alike.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Deserialization {
            status: self.status,
            message: e.to_string(),
        })
    }

    /// Case-insensitive header lookup. Returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `true` for a blank body or a body holding an empty JSON object/array.
    pub fn is_empty_body(&self) -> bool {
        let trimmed = self.body.trim();
        if trimmed.is_empty() {
            return true;
        }
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(serde_json::Value::Object(map)) => map.is_empty(),
            Ok(serde_json::Value::Array(items)) => items.is_empty(),
            _ => false,
        }
    }
}
