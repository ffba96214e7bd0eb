//! Trait definitions for the I/O seams of the analysis.
//!
//! The pipeline talks to three outside systems: SEC EDGAR (identity and facts), a price
//! service and a narrative generator. Each is reached through a trait so the `Edgar`
//! client and the HTTP collaborators can be swapped for in-memory implementations in
//! tests.

use super::company::{CompanyFacts, CompanyTicker, FilerIdentity};
use super::error::Result;
use async_trait::async_trait;

/// Operations for resolving filers and retrieving their XBRL facts.
///
/// Company data is retrieved from SEC's data API, which provides JSON-formatted company
/// facts based on XBRL filings.
#[async_trait]
pub trait CompanyOperations {
    /// Retrieves the full ticker directory from EDGAR, in file order.
    async fn company_tickers(&self) -> Result<Vec<CompanyTicker>>;
    /// Resolves a ticker symbol (any case) to a filer identity.
    async fn company_identity(&self, ticker: &str) -> Result<FilerIdentity>;
    /// Retrieves the complete company facts for a raw or zero-padded CIK.
    async fn company_facts(&self, cik: &str) -> Result<CompanyFacts>;
}

/// Source of a current market price for a symbol.
///
/// Implementations may return `Ok(None)` when the service has no quote. The analysis
/// treats errors the same way: a missing price never aborts it.
#[async_trait]
pub trait PriceSource {
    async fn current_price(&self, symbol: &str) -> Result<Option<f64>>;
}

/// Turns a formatted analysis prompt into free text.
#[async_trait]
pub trait Narrator {
    async fn narrate(&self, prompt: &str) -> Result<String>;
}
