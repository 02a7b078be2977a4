//! Combination sources: where the combination list of a product comes from.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA, USER_AGENT};
use reqwest::Url;
use variant_model::Combination;

use crate::error::FetchError;
use crate::settings::FetchSource;

/// User agent string for combination requests.
const USER_AGENT_VALUE: &str = concat!("variant-engine/", env!("CARGO_PKG_VERSION"));

/// Asynchronously yields the combination list of one product.
pub trait CombinationSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Combination>, FetchError>> + Send;
}

/// Fixed combinations held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCombinationSource {
    combinations: Vec<Combination>,
}

impl StaticCombinationSource {
    pub fn new(combinations: Vec<Combination>) -> Self {
        Self { combinations }
    }
}

impl CombinationSource for StaticCombinationSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Combination>, FetchError>> + Send {
        let combinations = self.combinations.clone();
        async move { Ok(combinations) }
    }
}

/// Adapts any async closure into a [`CombinationSource`].
#[derive(Debug, Clone)]
pub struct FnCombinationSource<F> {
    fetch: F,
}

impl<F, Fut> FnCombinationSource<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Vec<Combination>, FetchError>> + Send,
{
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F, Fut> CombinationSource for FnCombinationSource<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Vec<Combination>, FetchError>> + Send,
{
    fn fetch(&self) -> impl Future<Output = Result<Vec<Combination>, FetchError>> + Send {
        (self.fetch)()
    }
}

/// Reads a JSON combination list from disk.
#[derive(Debug, Clone)]
pub struct FileCombinationSource {
    path: PathBuf,
}

impl FileCombinationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CombinationSource for FileCombinationSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Combination>, FetchError>> + Send {
        let path = self.path.clone();
        async move {
            tracing::debug!(path = %path.display(), "reading combinations");
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| FetchError::Io { path, source })?;
            Ok(serde_json::from_slice(&bytes)?)
        }
    }
}

/// Fetches the combination list with an uncached HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpCombinationSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCombinationSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let url = Url::parse(url)
            .map_err(|e| FetchError::Network(format!("invalid url {url}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request URL with a `_` timestamp parameter so intermediaries never serve a stale list.
    fn request_url(&self) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("_", &chrono::Utc::now().timestamp_millis().to_string());
        url
    }
}

impl CombinationSource for HttpCombinationSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Combination>, FetchError>> + Send {
        let client = self.client.clone();
        let url = self.request_url();
        async move {
            tracing::debug!(%url, "fetching combinations");
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                });
            }
            let combinations = response.json::<Vec<Combination>>().await?;
            Ok(combinations)
        }
    }
}

/// The source described by [`FetchSource`] settings.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpCombinationSource),
    File(FileCombinationSource),
}

impl ConfiguredSource {
    pub fn from_settings(source: &FetchSource) -> Result<Self, FetchError> {
        match source {
            FetchSource::Url { url, timeout_secs } => Ok(Self::Http(HttpCombinationSource::new(
                url,
                Duration::from_secs(*timeout_secs),
            )?)),
            FetchSource::File { path } => Ok(Self::File(FileCombinationSource::new(path.clone()))),
        }
    }
}

impl CombinationSource for ConfiguredSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Combination>, FetchError>> + Send {
        let source = self.clone();
        async move {
            match source {
                Self::Http(source) => source.fetch().await,
                Self::File(source) => source.fetch().await,
            }
        }
    }
}
