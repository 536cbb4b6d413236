//! Source fetching from URLs, files, and stdin.
//!
//! URLs are fetched over HTTP(S) and returned as raw HTML; [`fetch_article`]
//! additionally runs [`extract_text`](crate::extract::extract_text) so callers
//! get plain text ready for the pipeline.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::extract::{ExtractedText, extract_text};
use crate::{Result, TersaError};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Tersa/0.3".to_string(),
        }
    }
}

/// Checks that `url` is an absolute http or https URL.
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| TersaError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(TersaError::InvalidUrl(format!("unsupported scheme '{}', expected http or https", other))),
    }
}

/// Fetches HTML content from a URL.
///
/// Follows redirects and respects the configured timeout. A response with a
/// non-success status is reported as [`TersaError::HttpStatus`].
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = parse_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(TersaError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| if e.is_timeout() { TersaError::Timeout { timeout: config.timeout } } else { TersaError::HttpError(e) })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url, status = status.as_u16(), "fetch returned non-success status");
        return Err(TersaError::HttpStatus { status: status.as_u16() });
    }

    let content = response.text().await?;
    tracing::debug!(url, bytes = content.len(), "fetched page");

    Ok(content)
}

/// Fetches a page and extracts its title and main text.
pub async fn fetch_article(url: &str, config: &FetchConfig) -> Result<ExtractedText> {
    let html = fetch_url(url, config).await?;
    extract_text(&html)
}

/// Reads a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(TersaError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(TersaError::from)
    }
}

/// Reads all of standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(TersaError::from)?;

    Ok(buffer)
}
