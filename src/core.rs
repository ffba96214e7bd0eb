use governor::{
    Quota, RateLimiter, clock::DefaultClock, middleware::NoOpMiddleware, state::InMemoryState,
    state::NotKeyed,
};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use super::config::{EdgarConfig, EdgarUrls};
use super::error::{EdgarError, Result};

const PREVIEW_CHARS: usize = 200;

type Governor = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

#[derive(Debug, Clone)]
pub struct Edgar {
    /// HTTP client for making requests
    pub(crate) client: reqwest::Client,

    /// Token bucket rate limiter for SEC compliance
    pub(crate) rate_limiter: Arc<Governor>,

    /// Base URL for EDGAR data API
    pub(crate) edgar_data_url: String,

    /// Base URL for EDGAR files
    pub(crate) edgar_files_url: String,

    /// Timeout applied to the company facts download
    pub(crate) facts_timeout: Duration,
}

/// HTTP client for the SEC EDGAR endpoints used by the quarterly analysis.
///
/// The `Edgar` client is the entry point for resolving tickers and downloading XBRL
/// company facts. Every request carries the configured `User-Agent` header, as SEC.gov's
/// fair access policy requires, and passes through a token bucket rate limiter.
///
/// # Rate Limiting
///
/// The SEC requires that automated systems respect fair access guidelines, limiting requests to
/// no more than 10 per second. This client uses a token bucket algorithm to enforce this limit:
///
/// ```text
/// Token Bucket (capacity: 10 tokens)
/// ┌──────────────────────────┐
/// │ ████████████████████████ │  ← Tokens refill at 10/sec
/// └──────────────────────────┘
///      ↓ consume on request
/// ```
///
/// # Error Handling
///
/// Failed requests are never retried. A transport error, a non-success status or an HTML
/// error page in place of JSON is returned immediately and ends the analysis that issued it.
///
/// # Examples
///
/// Basic client initialization:
///
/// ```rust
/// # use edgar_quarterly::Edgar;
/// let edgar = Edgar::new("my_app/1.0 (my@email.com)")?;
/// # Ok::<(), edgar_quarterly::EdgarError>(())
/// ```
///
/// With custom configuration:
///
/// ```rust
/// # use edgar_quarterly::{Edgar, EdgarConfig, EdgarUrls};
/// # use std::time::Duration;
/// let config = EdgarConfig {
///     user_agent: "custom_app/2.0".to_string(),
///     rate_limit: 5,
///     timeout: Duration::from_secs(30),
///     facts_timeout: Duration::from_secs(90),
///     base_urls: EdgarUrls::default(),
/// };
/// let edgar = Edgar::with_config(config)?;
/// # Ok::<(), edgar_quarterly::EdgarError>(())
/// ```
impl Edgar {
    /// Creates a new Edgar client with sensible defaults for most use cases.
    ///
    /// This constructor initializes the client with a rate limit of 10 requests per second
    /// (as required by SEC.gov), a 30-second timeout for ordinary requests, a 60-second
    /// timeout for company facts, and the standard SEC.gov base URLs.
    ///
    /// # Arguments
    ///
    /// * `user_agent` - A descriptive identifier for your application, following the format
    ///   "AppName contact@email.com". The SEC requires this to contact you if your
    ///   application causes issues.
    pub fn new(user_agent: &str) -> Result<Self> {
        let config = EdgarConfig {
            user_agent: user_agent.to_string(),
            ..EdgarConfig::default()
        };
        Self::with_config(config)
    }

    /// Creates an Edgar client with custom configuration settings.
    ///
    /// Use this constructor when you need to customize the rate limit, timeouts, or base
    /// URLs, for example when pointing the client at a mock server in tests.
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::ConfigError` if the user agent is malformed, the rate limit
    /// is zero, or the HTTP client cannot be built with the provided configuration.
    pub fn with_config(config: EdgarConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| EdgarError::ConfigError(format!("Invalid user agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| EdgarError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            NonZeroU32::new(config.rate_limit).ok_or_else(|| {
                EdgarError::ConfigError("Rate limit must be greater than zero".to_string())
            })?,
        )));

        let EdgarUrls { data, files } = config.base_urls;

        Ok(Edgar {
            client,
            rate_limiter,
            edgar_data_url: data,
            edgar_files_url: files,
            facts_timeout: config.facts_timeout,
        })
    }

    /// Fetches text content from a URL using the client-wide timeout.
    ///
    /// See [`Edgar::get_with_timeout`] for the status and content-type handling.
    pub async fn get(&self, url: &str) -> Result<String> {
        self.fetch(url, None).await
    }

    /// Fetches text content from a URL, overriding the client-wide timeout.
    ///
    /// # Content-Type Validation
    ///
    /// For URLs ending in `.json`, the method validates that the response isn't HTML (which
    /// typically indicates an error page). The SEC sometimes returns JSON with a `text/html`
    /// content-type header, so the body is sniffed before giving up. If it really is HTML,
    /// an `UnexpectedContentType` error is returned with a preview of the content.
    ///
    /// # Errors
    ///
    /// * `EdgarError::UnexpectedContentType` - JSON URL returned HTML content
    /// * `EdgarError::NotFound` - Resource doesn't exist (HTTP 404)
    /// * `EdgarError::RateLimitExceeded` - The server answered HTTP 429
    /// * `EdgarError::RequestError` - Network failure or timeout
    /// * `EdgarError::InvalidResponse` - Any other status, with a content preview
    pub async fn get_with_timeout(&self, url: &str, timeout: Duration) -> Result<String> {
        self.fetch(url, Some(timeout)).await
    }

    async fn fetch(&self, url: &str, timeout: Option<Duration>) -> Result<String> {
        self.rate_limiter.until_ready().await;

        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("GET {}", url);
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Request failed for {}: {}", url, e);
            EdgarError::RequestError(e)
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|val| val.to_str().ok())
            .map(str::to_string);

        if url.ends_with(".json") && status.is_success() {
            if let Some(ct) = content_type.as_deref() {
                if ct.to_lowercase().contains("text/html") {
                    let body_text = response.text().await.map_err(EdgarError::RequestError)?;

                    if body_text.trim_start().starts_with('{')
                        || body_text.trim_start().starts_with('[')
                    {
                        tracing::warn!(
                            "Received text/html content-type for .json URL, but content appears to be JSON: {}",
                            url
                        );
                        return Ok(body_text);
                    }

                    return Err(EdgarError::UnexpectedContentType {
                        url: url.to_string(),
                        expected_pattern: "application/json".to_string(),
                        got_content_type: ct.to_string(),
                        content_preview: preview(&body_text),
                    });
                }
            }
        }

        match status {
            reqwest::StatusCode::OK => response.text().await.map_err(EdgarError::RequestError),
            reqwest::StatusCode::NOT_FOUND => Err(EdgarError::NotFound(url.to_string())),
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!("Rate limit hit (429) for {}", url);
                Err(EdgarError::RateLimitExceeded)
            }
            other_status => {
                let error_body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error body".to_string());

                Err(EdgarError::InvalidResponse(format!(
                    "Unexpected status code: {} for URL: {}. Response preview: {}",
                    other_status,
                    url,
                    preview(&error_body)
                )))
            }
        }
    }

    /// Returns the base URL for EDGAR data.
    pub fn data_url(&self) -> &str {
        &self.edgar_data_url
    }

    /// Returns the base URL for EDGAR files.
    pub fn files_url(&self) -> &str {
        &self.edgar_files_url
    }
}

fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}
