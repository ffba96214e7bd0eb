//! # EdgarQuarterly - Quarterly fundamentals from SEC EDGAR
//!
//! EdgarQuarterly turns a stock ticker into a compact quarterly report: it resolves the
//! ticker to a filer, pulls the filer's XBRL company facts from the SEC, reconstructs the
//! most recent 10-Q periods, and derives headline metrics, margins and trends from them.
//!
//! ## Features
//!
//! - **Rate-limited HTTP client** - Complies with SEC.gov fair access rules
//! - **Company information** - Resolve tickers and retrieve XBRL company facts
//! - **Concept synonyms** - Each metric is read from an ordered list of us-gaap concepts
//! - **Quarterly metrics** - Revenue, income, EPS, margins, balance sheet and cash flow per period
//! - **Trend analysis** - Direction of revenue, margins and EPS across the selected quarters
//! - **Collaborators** - Optional current price and generated narrative, both degrading gracefully
//!
//! ## Requirements
//!
//! EdgarQuarterly is async-first and requires an async runtime. We recommend
//! [tokio](https://tokio.rs).
//!
//! ## Basic Usage
//!
//! ```ignore
//! use edgar_quarterly::{AnalysisOptions, DisabledNarrator, Edgar, HttpPriceSource, analyze_stock};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Initialize with a proper user agent (required by SEC.gov)
//!     let edgar = Edgar::new("YourAppName contact@example.com")?;
//!     let prices = HttpPriceSource::from_env()?;
//!
//!     let options = AnalysisOptions::new().with_num_quarters(4);
//!     let report = analyze_stock(&edgar, &prices, &DisabledNarrator, "aapl", &options).await?;
//!
//!     for quarter in &report.quarterly_metrics {
//!         println!("{}: revenue {:?}", quarter.period_end, quarter.revenue);
//!     }
//!     println!("Revenue trend: {}", report.trend_analysis.revenue_trend);
//!
//!     Ok(())
//! }
//! ```

mod analysis;
mod company;
pub mod concepts;
mod config;
mod core;
mod error;
mod metrics;
mod narrative;
mod periods;
mod price;
mod prompts;
mod traits;
mod trends;

// Core Edgar functionality
pub use config::{EdgarConfig, EdgarUrls, USER_AGENT_ENV};
pub use core::Edgar;
pub use error::{EdgarError, ErrorKind, Result};

// Company data
pub use company::{
    CIK_WIDTH, CompanyFacts, CompanyTicker, DataPoint, Fact, FilerIdentity, pad_cik,
    parse_ticker_directory,
};
pub use concepts::{Metric, Observation, extract_values, metric_value, most_recent_value};

// Quarterly analysis
pub use analysis::{AnalysisOptions, AnalysisReport, analyze_stock};
pub use metrics::{PeriodMetrics, assemble, ratio};
pub use periods::{PeriodKey, select_periods};
pub use prompts::{PromptInput, build_prompt, format_metrics_for_prompt};
pub use trends::{MARGIN_STABILITY_THRESHOLD, Trend, TrendSummary, analyze_trends};

// Collaborators
pub use narrative::{ChatNarrator, DEFAULT_LLM_API_URL, DEFAULT_LLM_MODEL, DisabledNarrator};
pub use price::{DEFAULT_PRICE_API_URL, HttpPriceSource, PRICE_API_URL_ENV};

pub use traits::{CompanyOperations, Narrator, PriceSource};

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
