//! Acceptance-test harness for the JSONPlaceholder posts API.
//!
//! # Overview
//! Three layers: an HTTP facade (`client`, `http`) that builds and sends
//! requests, a domain layer (`endpoint`, `types`) naming the service's paths
//! and models, and the acceptance tests under `tests/` that assert on what
//! comes back. `fixture` loads expected values from disk, `scenario` tags
//! each test as positive/negative and records known service defects.
//!
//! # Design
//! - `ApiClient` is stateless apart from its base URL and agent.
//! - Request building is pure (`build_*`), sending is one synchronous call.
//! - Response status is never an error; tests assert on it directly.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod fixture;
pub mod http;
pub mod scenario;
pub mod types;

pub use client::{ApiClient, RequestBody};
pub use config::SuiteConfig;
pub use error::ApiError;
pub use fixture::Fixtures;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use scenario::{Category, DefectPolicy, KnownIssue, Scenario, TestType};
pub use types::{Comment, Post, PostRequest};
