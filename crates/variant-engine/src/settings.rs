//! Configuration for a combinations behavior.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Default HTTP request timeout for combination fetches, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// The part of the selection UI a behavior operates within.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentScope {
    /// Every attribute the UI declares.
    #[default]
    All,
    /// Only attributes rendered inside the named container.
    Element(String),
}

impl ContentScope {
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element(name.into())
    }

    /// Whether an attribute rendered inside `container` belongs to this scope.
    pub fn contains(&self, container: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Element(name) => container == Some(name.as_str()),
        }
    }
}

impl fmt::Display for ContentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Element(name) => f.write_str(name),
        }
    }
}

/// Where the combination list comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchSource {
    /// HTTP GET returning a JSON combination list.
    Url {
        url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    /// JSON file on disk.
    File { path: PathBuf },
}

fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

impl FetchSource {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url {
            url: url.into(),
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }
}

impl fmt::Display for FetchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url { url, .. } => f.write_str(url),
            Self::File { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Settings accepted when a behavior is created.
///
/// `fetch_source` is optional because hosts may hand the behavior any
/// [`CombinationSource`](crate::CombinationSource) directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorSettings {
    #[serde(default)]
    pub content_scope: ContentScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_source: Option<FetchSource>,
}

impl BehaviorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_content_scope(mut self, scope: ContentScope) -> Self {
        self.content_scope = scope;
        self
    }

    #[must_use]
    pub fn with_fetch_source(mut self, source: FetchSource) -> Self {
        self.fetch_source = Some(source);
        self
    }

    /// Load settings from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&text).map_err(|source| EngineError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if let ContentScope::Element(name) = &self.content_scope
            && name.trim().is_empty()
        {
            return Err(EngineError::Settings(
                "content scope element name is empty".to_string(),
            ));
        }
        match &self.fetch_source {
            Some(FetchSource::Url { url, .. }) if url.trim().is_empty() => {
                Err(EngineError::Settings("fetch url is empty".to_string()))
            }
            Some(FetchSource::Url { timeout_secs: 0, .. }) => Err(EngineError::Settings(
                "fetch timeout must be at least one second".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
