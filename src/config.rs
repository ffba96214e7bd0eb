use std::time::Duration;

/// Environment variable holding the SEC.gov-required user agent.
pub const USER_AGENT_ENV: &str = "SEC_USER_AGENT";

const DEFAULT_USER_AGENT: &str = "EdgarQuarterly admin@example.com";

/// Configuration for the Edgar client
#[derive(Debug, Clone)]
pub struct EdgarConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Rate limit in requests per second
    pub rate_limit: u32,
    /// Timeout for ordinary requests, including the ticker directory
    pub timeout: Duration,
    /// Timeout for the company facts download, which can be tens of megabytes
    pub facts_timeout: Duration,
    /// Base URLs for different EDGAR services
    pub base_urls: EdgarUrls,
}

/// Base URLs for different EDGAR services
#[derive(Debug, Clone)]
pub struct EdgarUrls {
    /// Base URL for EDGAR data (XBRL company facts)
    pub data: String,
    /// Base URL for EDGAR files (ticker directory)
    pub files: String,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rate_limit: 10,
            timeout: Duration::from_secs(30),
            facts_timeout: Duration::from_secs(60),
            base_urls: EdgarUrls::default(),
        }
    }
}

impl EdgarConfig {
    /// Creates a new EdgarConfig with custom settings
    ///
    /// # Basic usage
    ///
    /// ```rust
    /// use edgar_quarterly::{Edgar, EdgarConfig};
    /// use std::time::Duration;
    /// let config = EdgarConfig::new(
    ///     "YourAppName contact@example.com",
    ///     10, // requests per second
    ///     Duration::from_secs(30),
    ///     None,
    /// );
    /// let edgar = Edgar::with_config(config)?;
    /// # Ok::<(), edgar_quarterly::EdgarError>(())
    /// ```
    pub fn new(
        user_agent: impl Into<String>,
        rate_limit: u32,
        timeout: Duration,
        base_urls: Option<EdgarUrls>,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            rate_limit,
            timeout,
            base_urls: base_urls.unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Builds a config from the process environment.
    ///
    /// Reads the user agent from `SEC_USER_AGENT`, falling back to a generic
    /// identifier. Everything else uses the defaults.
    pub fn from_env() -> Self {
        let user_agent = std::env::var(USER_AGENT_ENV)
            .ok()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Self {
            user_agent,
            ..Self::default()
        }
    }

    pub fn with_base_urls(mut self, base_urls: EdgarUrls) -> Self {
        self.base_urls = base_urls;
        self
    }

    pub fn with_facts_timeout(mut self, facts_timeout: Duration) -> Self {
        self.facts_timeout = facts_timeout;
        self
    }
}

impl Default for EdgarUrls {
    fn default() -> Self {
        Self {
            data: "https://data.sec.gov".to_string(),
            files: "https://www.sec.gov/files".to_string(),
        }
    }
}

impl EdgarUrls {
    /// Points both services at a single host, e.g. a local mock server.
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            data: base.to_string(),
            files: format!("{}/files", base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EdgarConfig::default();
        assert_eq!(config.rate_limit, 10);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.facts_timeout, Duration::from_secs(60));
        assert_eq!(config.base_urls.files, "https://www.sec.gov/files");
    }

    #[test]
    fn test_urls_from_base() {
        let urls = EdgarUrls::from_base("http://127.0.0.1:8080/");
        assert_eq!(urls.data, "http://127.0.0.1:8080");
        assert_eq!(urls.files, "http://127.0.0.1:8080/files");
    }
}
