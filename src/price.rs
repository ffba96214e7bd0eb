//! HTTP price lookup.
//!
//! Talks to a quote service exposing `GET {base}/prices/fetch/{symbol}` and answering
//! `{ "price": <number> }`.

use super::PriceSource;
use super::error::{EdgarError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Environment variable holding the price service base URL.
pub const PRICE_API_URL_ENV: &str = "PRICE_API_URL";

pub const DEFAULT_PRICE_API_URL: &str = "http://localhost:3001/api";

#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[serde(default)]
    price: Option<f64>,
}

/// [`PriceSource`] backed by an HTTP quote service.
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPriceSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| EdgarError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Uses `PRICE_API_URL`, or the local default when unset.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(PRICE_API_URL_ENV)
            .unwrap_or_else(|_| DEFAULT_PRICE_API_URL.to_string());
        Self::new(base_url)
    }

    fn price_url(&self, symbol: &str) -> String {
        format!("{}/prices/fetch/{}", self.base_url, symbol)
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn current_price(&self, symbol: &str) -> Result<Option<f64>> {
        let url = self.price_url(symbol);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EdgarError::Collaborator(format!(
                "Failed to fetch price for {}: {}",
                symbol, status
            )));
        }

        let body: PriceResponse = response.json().await?;
        Ok(body.price)
    }
}
