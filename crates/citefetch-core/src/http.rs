//! HTTP client plumbing.
//!
//! Requests are made with async reqwest on a shared tokio runtime, but callers
//! see a blocking interface: each request is driven to completion with
//! `block_on` before control returns.

use std::sync::LazyLock;
use std::time::Duration;

/// Errors from a single HTTP exchange
#[derive(Debug)]
pub enum HttpError {
    /// Transport failure or non-success status
    Http {
        status: Option<u16>,
        message: String,
    },
    /// Response body did not have the expected shape
    Decode(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Decode(msg) => write!(f, "invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Build from a reqwest error, dropping the request URL from the message
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.without_url().to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            Self::Decode(_) => None,
        }
    }
}

/// Build a pooled HTTP client.
///
/// `timeout` bounds each whole request; `None` waits indefinitely.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, HttpError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("citefetch/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(1);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(HttpError::from_reqwest)
}

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http_with_status() {
        let err = HttpError::Http {
            status: Some(429),
            message: "too many requests".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP 429: too many requests");
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn display_http_without_status() {
        let err = HttpError::Http {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn display_decode() {
        let err = HttpError::Decode("expected a JSON array".to_string());
        assert!(format!("{err}").starts_with("invalid response body"));
    }

    #[test]
    fn client_builds_with_and_without_timeout() {
        assert!(build_client(None).is_ok());
        assert!(build_client(Some(Duration::from_secs(5))).is_ok());
    }
}
