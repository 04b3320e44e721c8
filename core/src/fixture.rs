//! JSON fixtures used as expected-value oracles.
//!
//! Fixtures are read from disk on every call; nothing is cached.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Read `path` and deserialize it into `T`.
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ApiError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading fixture");
    let raw = std::fs::read_to_string(path).map_err(|source| ApiError::FixtureRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ApiError::FixtureParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Fixture files rooted at one directory.
#[derive(Debug, Clone)]
pub struct Fixtures {
    root: PathBuf,
}

impl Fixtures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, ApiError> {
        load(self.path(name))
    }
}
