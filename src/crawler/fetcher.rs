//! HTTP fetcher implementation
//!
//! This module handles every network read the pipeline makes:
//! - GET requests for page bodies
//! - HEAD probes to learn whether a link is an HTML page
//! - Ranged GET requests for the leading bytes of audio files
//! - Local `file://` reads with the same contract
//! - Error classification into transport and status failures
//!
//! All requests share one client and one semaphore that caps how many are
//! in flight at once.

use crate::config::Config;
use reqwest::header::{CONTENT_TYPE, RANGE};
use reqwest::{Client, Response};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::sync::Semaphore;
use url::Url;

/// Why a fetch produced nothing usable
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, body read, local I/O)
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The URL could not be turned into a request
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Outcome of a HEAD probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// Content-Type header value, if the server sent one
    pub content_type: Option<String>,
}

impl Probe {
    /// Returns true when the reported Content-Type is `text/html`
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("text/html"))
            .unwrap_or(false)
    }
}

/// Builds an HTTP client with the configured identity and timeout
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use tune_sieve::crawler::build_http_client;
///
/// let client = build_http_client("Mozilla/5.0", Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Shared network client with a global in-flight request limit
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    permits: Arc<Semaphore>,
}

impl HttpFetcher {
    /// Wraps an existing client, allowing `max_in_flight` concurrent requests
    pub fn new(client: Client, max_in_flight: usize) -> Self {
        Self {
            client,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    /// Builds a fetcher from the crawler and user agent settings
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.user_agent.value,
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;
        Ok(Self::new(
            client,
            config.crawler.max_concurrent_requests as usize,
        ))
    }

    /// Fetches a page body as text
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        if let Some(path) = local_path(url)? {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| transport(url, e.to_string()))?;
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }

        let _permit = self.acquire(url).await?;
        let response = self.send(self.client.get(url), url).await?;
        response
            .text()
            .await
            .map_err(|e| transport(url, classify_reqwest_error(&e)))
    }

    /// Sends a HEAD request and reports the Content-Type
    ///
    /// Local files report no Content-Type; the caller falls back to the
    /// file extension.
    pub async fn probe(&self, url: &str) -> Result<Probe, FetchError> {
        if let Some(path) = local_path(url)? {
            let metadata = tokio::fs::metadata(&path)
                .await
                .map_err(|e| transport(url, e.to_string()))?;
            if !metadata.is_file() {
                return Err(transport(url, "not a regular file".to_string()));
            }
            return Ok(Probe { content_type: None });
        }

        let _permit = self.acquire(url).await?;
        let response = self.send(self.client.head(url), url).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(Probe { content_type })
    }

    /// Fetches at most `len` leading bytes of a resource
    ///
    /// Sends `Range: bytes=0-(len-1)` and accepts both `206 Partial Content`
    /// and a plain `200`; the body is cut at `len` bytes either way.
    pub async fn fetch_prefix(&self, url: &str, len: u64) -> Result<Vec<u8>, FetchError> {
        let limit = len.max(1);

        if let Some(path) = local_path(url)? {
            let file = tokio::fs::File::open(&path)
                .await
                .map_err(|e| transport(url, e.to_string()))?;
            let mut buffer = Vec::new();
            file.take(limit)
                .read_to_end(&mut buffer)
                .await
                .map_err(|e| transport(url, e.to_string()))?;
            return Ok(buffer);
        }

        let _permit = self.acquire(url).await?;
        let request = self
            .client
            .get(url)
            .header(RANGE, format!("bytes=0-{}", limit - 1));
        let mut response = self.send(request, url).await?;

        let limit = limit as usize;
        let mut buffer = Vec::with_capacity(limit);
        while buffer.len() < limit {
            let chunk = response
                .chunk()
                .await
                .map_err(|e| transport(url, classify_reqwest_error(&e)))?;
            match chunk {
                Some(bytes) => {
                    let take = (limit - buffer.len()).min(bytes.len());
                    buffer.extend_from_slice(&bytes[..take]);
                }
                None => break,
            }
        }

        Ok(buffer)
    }

    async fn acquire(&self, url: &str) -> Result<tokio::sync::SemaphorePermit<'_>, FetchError> {
        self.permits
            .acquire()
            .await
            .map_err(|_| transport(url, "request limiter closed".to_string()))
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<Response, FetchError> {
        let response = request
            .send()
            .await
            .map_err(|e| transport(url, classify_reqwest_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

/// Maps a `file://` URL to a local path; `None` for every other scheme
fn local_path(url: &str) -> Result<Option<PathBuf>, FetchError> {
    let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl {
        url: url.to_string(),
    })?;

    if parsed.scheme() != "file" {
        return Ok(None);
    }

    parsed
        .to_file_path()
        .map(Some)
        .map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })
}

fn transport(url: &str, message: String) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        message,
    }
}

/// Gives timeouts and refused connections a short, stable description
fn classify_reqwest_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    }
}
