//! Environment-backed suite configuration.
//!
//! Values are read strictly: a variable that is set must be valid UTF-8 and
//! non-empty, otherwise loading fails instead of silently falling back.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::endpoint;
use crate::error::ApiError;
use crate::scenario::DefectPolicy;

/// Environment keys understood by the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteEnv {
    /// Origin to test against. `live` means the public host; unset means
    /// "start the local double".
    BaseUrl,
    /// Directory holding fixture files.
    FixtureDir,
    /// `document` or `regression`.
    DefectPolicy,
}

impl SuiteEnv {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "POSTS_SUITE_BASE_URL",
            Self::FixtureDir => "POSTS_SUITE_FIXTURE_DIR",
            Self::DefectPolicy => "POSTS_SUITE_DEFECT_POLICY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuiteConfig {
    pub base_url: Option<String>,
    pub fixture_dir: Option<PathBuf>,
    pub defect_policy: DefectPolicy,
}

impl SuiteConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Load through an arbitrary lookup, so tests need not touch the real
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&'static str) -> Option<OsString>,
    {
        let read = |key: SuiteEnv| read_nonempty(key.as_str(), lookup(key.as_str()));

        let base_url = read(SuiteEnv::BaseUrl)?.map(|url| match url.trim() {
            "live" => endpoint::HOST.to_string(),
            other => other.to_string(),
        });
        if let Some(url) = &base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ApiError::Config {
                    key: SuiteEnv::BaseUrl.as_str(),
                    message: format!("expected an http(s) origin, got {url:?}"),
                });
            }
        }
        let fixture_dir = read(SuiteEnv::FixtureDir)?.map(PathBuf::from);
        let defect_policy = read(SuiteEnv::DefectPolicy)?
            .map(|raw| {
                raw.parse::<DefectPolicy>().map_err(|message| ApiError::Config {
                    key: SuiteEnv::DefectPolicy.as_str(),
                    message,
                })
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            base_url,
            fixture_dir,
            defect_policy,
        })
    }
}

fn read_nonempty(key: &'static str, raw: Option<OsString>) -> Result<Option<String>, ApiError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value = raw.into_string().map_err(|_| ApiError::Config {
        key,
        message: "must be valid UTF-8".to_string(),
    })?;
    if value.trim().is_empty() {
        return Err(ApiError::Config {
            key,
            message: "must not be empty".to_string(),
        });
    }
    Ok(Some(value))
}
