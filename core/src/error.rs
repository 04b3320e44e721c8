//! Error types for the posts API harness.
//!
//! # Design
//! Response statuses are never errors here; a 404 is data the test asserts
//! on. Errors cover what stops a test from getting that far: the transport
//! failing, a body that does not fit the model, a broken fixture, or an
//! invalid suite configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, IO).
    #[error("transport failed for {method} {url}: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed (HTTP {status}): {message}")]
    Deserialization { status: u16, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A fixture file could not be read.
    #[error("fixture {path} could not be read: {source}")]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fixture file does not match the requested model.
    #[error("fixture {path} could not be parsed: {source}")]
    FixtureParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An environment value failed validation.
    #[error("invalid configuration {key}: {message}")]
    Config { key: &'static str, message: String },
}
