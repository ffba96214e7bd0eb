use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Ticker '{0}' not found in SEC records")]
    TickerNotFound(String),

    #[error("No 10-Q filings found for {0}")]
    NoQuarterlyFilings(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error(
        "Unexpected content type from URL {url}. Expected pattern {expected_pattern}, but got Content-Type: {got_content_type}. Content preview: {content_preview}..."
    )]
    UnexpectedContentType {
        url: String,
        expected_pattern: String, // e.g., "application/json"
        got_content_type: String,
        content_preview: String,
    },
}

/// Coarse classification of an [`EdgarError`], used to decide how a failed
/// analysis is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown ticker or no qualifying quarterly filings. User-correctable.
    NotFound,
    /// The filer directory or fact store could not be read.
    Upstream,
    /// Invalid client configuration, e.g. a malformed user agent.
    Configuration,
    /// A price or narrative collaborator failed.
    Collaborator,
}

impl EdgarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EdgarError::TickerNotFound(_) | EdgarError::NoQuarterlyFilings(_) => {
                ErrorKind::NotFound
            }
            // An HTTP 404 from the fact store means the upstream failed for a
            // filer we already resolved.
            EdgarError::RequestError(_)
            | EdgarError::NotFound(_)
            | EdgarError::InvalidResponse(_)
            | EdgarError::RateLimitExceeded
            | EdgarError::JsonError(_)
            | EdgarError::UnexpectedContentType { .. } => ErrorKind::Upstream,
            EdgarError::ConfigError(_) => ErrorKind::Configuration,
            EdgarError::Collaborator(_) => ErrorKind::Collaborator,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, EdgarError>;
