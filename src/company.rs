//! Company identity and XBRL company-facts endpoints.
//!
//! This module covers the two SEC-provided datasets the quarterly analysis starts from:
//! - The ticker directory (`company_tickers.json`), used to resolve a ticker symbol into
//!   a filer identity (CIK plus display name).
//! - XBRL "company facts", the complete set of structured facts a filer has reported,
//!   grouped by taxonomy, concept and unit.
//!
//! Most callers will start with `company_identity("AAPL")` and then pass the padded CIK
//! to `company_facts`.

use super::CompanyOperations;
use super::Edgar;
use super::error::{EdgarError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json;
use std::collections::HashMap;
use std::fmt::Display;

/// Width of a zero-padded CIK as used in EDGAR data URLs.
pub const CIK_WIDTH: usize = 10;

/// Mapping between stock ticker symbols and company CIKs.
///
/// This structure represents a company's stock ticker along with its Central Index Key
/// (CIK) and official title. The SEC maintains this mapping to help users discover
/// company identifiers for EDGAR queries. Note that companies can have multiple tickers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanyTicker {
    #[serde(rename = "cik_str")]
    pub cik: u64,
    pub ticker: String,
    pub title: String,
}

/// A ticker resolved to a filer.
///
/// Both the raw CIK and its zero-padded form are kept; the padded form is what the
/// company facts endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilerIdentity {
    pub ticker: String,
    pub cik: u64,
    pub cik_padded: String,
    pub name: String,
}

impl FilerIdentity {
    /// Finds `ticker` in a directory listing, ignoring ASCII case.
    ///
    /// The first matching entry wins, so the listing should be in directory order.
    pub fn lookup(directory: &[CompanyTicker], ticker: &str) -> Result<Self> {
        let wanted = ticker.trim();

        directory
            .iter()
            .find(|entry| entry.ticker.eq_ignore_ascii_case(wanted))
            .map(|entry| Self {
                ticker: entry.ticker.to_uppercase(),
                cik: entry.cik,
                cik_padded: pad_cik(entry.cik),
                name: entry.title.clone(),
            })
            .ok_or_else(|| EdgarError::TickerNotFound(wanted.to_uppercase()))
    }
}

/// Left-pads a CIK with zeros to the ten characters EDGAR uses in data URLs.
///
/// Already padded input is returned unchanged.
pub fn pad_cik(cik: impl Display) -> String {
    format!("{:0>width$}", cik.to_string(), width = CIK_WIDTH)
}

/// Complete set of XBRL facts reported by a company across all filings.
///
/// Facts are organized by taxonomy (`us-gaap`, `dei`, sometimes `ifrs-full` or `srt`) and
/// then by concept tag. Each concept holds data points grouped by unit, covering every
/// period and filing the company has reported it in. The structure is treated as read-only
/// once downloaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyFacts {
    pub cik: u64,
    #[serde(rename = "entityName")]
    pub entity_name: String,
    #[serde(rename = "facts", default)]
    pub taxonomies: HashMap<String, HashMap<String, Fact>>,
}

impl CompanyFacts {
    /// Looks up a single concept in a taxonomy namespace.
    pub fn concept(&self, taxonomy: &str, name: &str) -> Option<&Fact> {
        self.taxonomies.get(taxonomy)?.get(name)
    }

    /// Data points for a concept in one unit, or an empty slice when either is missing.
    pub fn data_points(&self, taxonomy: &str, name: &str, unit: &str) -> &[DataPoint] {
        self.concept(taxonomy, name)
            .and_then(|fact| fact.units.get(unit))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A single XBRL concept with its data points across different units of measure.
///
/// The same concept may be reported in different units (USD, USD/shares, shares), so data
/// points are grouped by unit. Labels and descriptions help interpret what the concept
/// represents in human-readable terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub units: HashMap<String, Vec<DataPoint>>,
}

/// A single data point representing a reported value for a specific time period.
///
/// Balance sheet items are instantaneous and carry only `end`; income statement and cash
/// flow items span a period and also carry `start`.
///
/// The `val` field can contain either a number or a string, as some XBRL concepts are
/// non-numeric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    pub end: String,
    pub val: serde_json::Value, // Can be number or string
    pub accn: String,
    #[serde(default)]
    pub fy: Option<i32>,
    #[serde(default)]
    pub fp: Option<String>,
    pub form: String,
    pub filed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
}

impl DataPoint {
    /// The reported value as a float, if it is numeric.
    pub fn numeric_value(&self) -> Option<f64> {
        self.val.as_f64()
    }
}

#[derive(Debug)]
enum CompanyUrlType {
    CompanyTickers,
    CompanyFacts,
}

/// Builds EDGAR API URLs for company/XBRL endpoints.
impl Edgar {
    fn build_company_url(&self, url_type: CompanyUrlType, params: &[&str]) -> String {
        match url_type {
            CompanyUrlType::CompanyTickers => {
                format!("{}/company_tickers.json", self.edgar_files_url)
            }
            CompanyUrlType::CompanyFacts => format!(
                "{}/api/xbrl/companyfacts/CIK{}.json",
                self.edgar_data_url,
                pad_cik(params[0])
            ),
        }
    }
}

/// Parses the ticker directory, keeping the order of the SEC file.
///
/// The directory is a JSON object keyed by row number ("0", "1", ...). Deserializing into a
/// map loses that order, so rows are sorted back by their numeric key.
pub fn parse_ticker_directory(content: &str) -> Result<Vec<CompanyTicker>> {
    let map: HashMap<String, CompanyTicker> = serde_json::from_str(content)?;
    let mut rows: Vec<(String, CompanyTicker)> = map.into_iter().collect();
    rows.sort_by_key(|(key, _)| key.parse::<u64>().unwrap_or(u64::MAX));
    Ok(rows.into_iter().map(|(_, ticker)| ticker).collect())
}

/// Company identity and fact retrieval against SEC EDGAR.
///
/// # Examples
///
/// ```ignore
/// # use edgar_quarterly::{Edgar, CompanyOperations};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let edgar = Edgar::new("MyApp contact@example.com")?;
///
/// let identity = edgar.company_identity("aapl").await?;
/// let facts = edgar.company_facts(&identity.cik_padded).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
impl CompanyOperations for Edgar {
    /// Retrieves the SEC ticker directory in file order.
    ///
    /// # Errors
    ///
    /// * `EdgarError::RequestError` - If there was an error sending the request or reading the response.
    /// * `EdgarError::NotFound` - If the company_tickers.json file was not found.
    /// * `EdgarError::JsonError` - If the response couldn't be parsed as expected.
    async fn company_tickers(&self) -> Result<Vec<CompanyTicker>> {
        let url = self.build_company_url(CompanyUrlType::CompanyTickers, &[]);
        let response = self.get(&url).await?;
        parse_ticker_directory(&response)
    }

    /// Resolves a ticker symbol to a filer identity, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::TickerNotFound` if no directory entry matches, or any error
    /// from `company_tickers` if the directory could not be read.
    async fn company_identity(&self, ticker: &str) -> Result<FilerIdentity> {
        let directory = self.company_tickers().await?;
        let identity = FilerIdentity::lookup(&directory, ticker)?;
        tracing::debug!(
            "Resolved {} to CIK {} ({})",
            identity.ticker,
            identity.cik_padded,
            identity.name
        );
        Ok(identity)
    }

    /// Retrieves all XBRL company facts for a CIK.
    ///
    /// The CIK may be raw (`320193`) or padded (`0000320193`). One request is made, using
    /// the client's facts timeout; failures are not retried.
    ///
    /// # Errors
    ///
    /// * `EdgarError::NotFound` - No facts exist for this CIK (HTTP 404)
    /// * `EdgarError::InvalidResponse` - Any other non-success status
    /// * `EdgarError::JsonError` - The body is not a company facts document
    async fn company_facts(&self, cik: &str) -> Result<CompanyFacts> {
        let url = self.build_company_url(CompanyUrlType::CompanyFacts, &[cik]);
        let response = self.get_with_timeout(&url, self.facts_timeout).await?;
        Ok(serde_json::from_str(&response)?)
    }
}
