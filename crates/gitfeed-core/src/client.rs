//! HTTP client for the event feed endpoint.
//!
//! The server side (the webhook receiver that formats and stores events) is
//! an external collaborator; this client only issues `GET /api/events` and
//! decodes the JSON array of pre-formatted strings it returns.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Standard User-Agent header for gitfeed requests.
pub const USER_AGENT: &str = concat!("gitfeed/", env!("CARGO_PKG_VERSION"));

/// Path of the events endpoint, relative to the configured base URL.
pub const EVENTS_PATH: &str = "/api/events";

/// Resolves the feed base URL with precedence: env > config > default.
///
/// # Errors
/// Returns an error if the chosen URL is not well-formed.
pub fn resolve_base_url(config: &Config) -> Result<String> {
    if let Ok(env_url) = std::env::var("GITFEED_BASE_URL") {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config.base_url.as_deref() {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(Config::DEFAULT_BASE_URL.to_string())
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid feed base URL: {url}"))?;
    Ok(())
}

/// Failure category for a poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedErrorKind {
    /// HTTP status outside the 2xx range
    HttpStatus,
    /// Connection or request timeout
    Timeout,
    /// Network-level failure (DNS, refused connection, reset, ...)
    Transport,
    /// Response body was not a JSON array of strings
    Parse,
}

impl fmt::Display for FeedErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedErrorKind::HttpStatus => write!(f, "http_status"),
            FeedErrorKind::Timeout => write!(f, "timeout"),
            FeedErrorKind::Transport => write!(f, "transport"),
            FeedErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured fetch failure with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedError {
    /// Error category
    pub kind: FeedErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl FeedError {
    /// Creates a new feed error.
    pub fn new(kind: FeedErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error with a `<code> <status text>` message.
    pub fn http_status(status: reqwest::StatusCode) -> Self {
        let message = match status.canonical_reason() {
            Some(reason) => format!("{} {reason}", status.as_u16()),
            None => status.as_u16().to_string(),
        };
        Self::new(FeedErrorKind::HttpStatus, message)
    }

    fn transport(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FeedErrorKind::Timeout
        } else {
            FeedErrorKind::Transport
        };
        Self::new(kind, err.to_string())
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

impl std::error::Error for FeedError {}

/// Client for the event feed endpoint.
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// Builds a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Builds a client from loaded configuration (env-aware base URL).
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot
    /// be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = resolve_base_url(config)?;
        Self::new(base_url, config.request_timeout())
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the current event list: one GET, status check, JSON decode.
    ///
    /// The returned strings are opaque, already formatted by the server, and
    /// ordered newest first as the server stores them.
    ///
    /// # Errors
    /// Returns a [`FeedError`] describing the failed request, non-2xx
    /// status, or undecodable body.
    pub async fn fetch_events(&self) -> Result<Vec<String>, FeedError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), EVENTS_PATH);
        tracing::debug!(%url, "fetching events");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FeedError::transport(&err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::http_status(status));
        }

        response.json::<Vec<String>>().await.map_err(|err| {
            if err.is_decode() {
                FeedError::new(FeedErrorKind::Parse, err.to_string())
            } else {
                FeedError::transport(&err)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_config_base_url() {
        // Env precedence is covered end to end in the CLI tests; here we
        // only exercise the config/default fallback to keep env mutation
        // out of parallel unit tests.
        let config = Config {
            base_url: Some("http://feed.example:8080".to_string()),
            ..Config::default()
        };
        if std::env::var("GITFEED_BASE_URL").is_err() {
            assert_eq!(
                resolve_base_url(&config).unwrap(),
                "http://feed.example:8080"
            );
        }
    }

    #[test]
    fn blank_config_url_falls_back_to_default() {
        let config = Config {
            base_url: Some("   ".to_string()),
            ..Config::default()
        };
        if std::env::var("GITFEED_BASE_URL").is_err() {
            assert_eq!(resolve_base_url(&config).unwrap(), Config::DEFAULT_BASE_URL);
        }
    }

    #[test]
    fn invalid_config_url_is_rejected() {
        let config = Config {
            base_url: Some("not a url".to_string()),
            ..Config::default()
        };
        if std::env::var("GITFEED_BASE_URL").is_err() {
            assert!(resolve_base_url(&config).is_err());
        }
    }

    #[test]
    fn http_status_error_keeps_status_text_shape() {
        let err = FeedError::http_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind, FeedErrorKind::HttpStatus);
        assert_eq!(err.message, "500 Internal Server Error");
    }
}
