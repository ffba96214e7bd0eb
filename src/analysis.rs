//! End-to-end quarterly analysis of one ticker.
//!
//! The pipeline is a straight sequence of stages, each consuming the previous stage's
//! immutable output:
//!
//! ```text
//! ticker ─► FilerIdentity ─► CompanyFacts ─► [PeriodKey] ─► [PeriodMetrics] ─► TrendSummary
//!                                                                  │
//!                                         current price ───────────┤ (concurrent)
//!                                                                  ▼
//!                                                             narrative
//! ```
//!
//! Identity and fact retrieval errors end the run. Everything after that degrades
//! instead: missing metrics are `None`, a failed price lookup leaves the price empty, and
//! a failed narrative is replaced by a placeholder.

use super::company::FilerIdentity;
use super::concepts::QUARTERLY_FORM;
use super::error::{EdgarError, Result};
use super::metrics::{PeriodMetrics, assemble};
use super::periods::select_periods;
use super::prompts::{PromptInput, build_prompt};
use super::trends::{TrendSummary, analyze_trends};
use super::{CompanyOperations, Narrator, PriceSource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Options for a single analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Number of most recent 10-Q quarters to analyze.
    pub num_quarters: usize,
    /// Whether to look up the current price.
    pub include_current_price: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            num_quarters: 3,
            include_current_price: true,
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_quarters(mut self, num_quarters: usize) -> Self {
        self.num_quarters = num_quarters;
        self
    }

    pub fn with_current_price(mut self, include_current_price: bool) -> Self {
        self.include_current_price = include_current_price;
        self
    }
}

/// Complete result of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub company_name: String,
    pub cik: u64,
    pub current_price: Option<f64>,
    pub analysis_date: NaiveDate,
    pub quarterly_metrics: Vec<PeriodMetrics>,
    pub trend_analysis: TrendSummary,
    pub investment_summary: String,
}

/// Runs the full analysis for `ticker`.
///
/// Makes two EDGAR requests (ticker directory, then company facts), at most one price
/// request and one narrative request. The price lookup runs concurrently with metric
/// assembly; both finish before the narrative is requested.
///
/// # Errors
///
/// * `EdgarError::ConfigError` - `num_quarters` is zero
/// * `EdgarError::TickerNotFound` - the ticker is not in the SEC directory; no facts are fetched
/// * `EdgarError::NoQuarterlyFilings` - the filer has no 10-Q revenue facts
/// * any upstream error from the directory or facts request
pub async fn analyze_stock<C, P, N>(
    company: &C,
    prices: &P,
    narrator: &N,
    ticker: &str,
    options: &AnalysisOptions,
) -> Result<AnalysisReport>
where
    C: CompanyOperations + Sync + ?Sized,
    P: PriceSource + Sync + ?Sized,
    N: Narrator + Sync + ?Sized,
{
    if options.num_quarters == 0 {
        return Err(EdgarError::ConfigError(
            "num_quarters must be at least 1".to_string(),
        ));
    }

    let ticker = ticker.trim().to_uppercase();
    tracing::info!("Analyzing {} over {} quarters", ticker, options.num_quarters);

    let identity: FilerIdentity = company.company_identity(&ticker).await?;
    let facts = company.company_facts(&identity.cik_padded).await?;

    let periods = select_periods(&facts, QUARTERLY_FORM, options.num_quarters);
    if periods.is_empty() {
        return Err(EdgarError::NoQuarterlyFilings(ticker));
    }

    let price_lookup = async {
        if options.include_current_price {
            lookup_price(prices, &ticker).await
        } else {
            None
        }
    };
    let computation = async {
        let metrics = assemble(&facts, &periods, options.num_quarters);
        let trends = analyze_trends(&metrics);
        (metrics, trends)
    };
    let (current_price, (quarterly_metrics, trend_analysis)) =
        tokio::join!(price_lookup, computation);

    let prompt = build_prompt(&PromptInput {
        ticker: &ticker,
        company_name: &identity.name,
        metrics: &quarterly_metrics,
        current_price,
        trends: &trend_analysis,
    });
    let investment_summary = match narrator.narrate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Narrative unavailable for {}: {}", ticker, e);
            format!("(summary unavailable: {})", e)
        }
    };

    tracing::info!(
        "Analyzed {} ({}): {} quarters, revenue {}",
        ticker,
        identity.name,
        quarterly_metrics.len(),
        trend_analysis.revenue_trend
    );

    Ok(AnalysisReport {
        ticker,
        company_name: identity.name,
        cik: identity.cik,
        current_price,
        analysis_date: chrono::Local::now().date_naive(),
        quarterly_metrics,
        trend_analysis,
        investment_summary,
    })
}

async fn lookup_price<P>(prices: &P, ticker: &str) -> Option<f64>
where
    P: PriceSource + Sync + ?Sized,
{
    match prices.current_price(ticker).await {
        Ok(price) => price,
        Err(e) => {
            tracing::warn!("Price unavailable for {}: {}", ticker, e);
            None
        }
    }
}
