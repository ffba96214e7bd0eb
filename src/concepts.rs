//! Concept resolution: mapping synonymous XBRL tags onto a fixed set of metrics.
//!
//! Filers tag the same economic quantity under different US-GAAP concepts (a company may
//! report revenue as `Revenues` one year and as
//! `RevenueFromContractWithCustomerExcludingAssessedTax` the next). Each tracked
//! [`Metric`] therefore carries an ordered list of candidate concepts. Resolution scans
//! every candidate, merges all matching observations and orders them by period end, so a
//! metric is found regardless of which synonym a filer used for a given period.

use super::company::CompanyFacts;
use serde::{Deserialize, Serialize};

/// Taxonomy namespace all tracked metrics live in.
pub const US_GAAP: &str = "us-gaap";

/// Form type of a quarterly report.
pub const QUARTERLY_FORM: &str = "10-Q";

/// Unit of monetary facts.
pub const UNIT_USD: &str = "USD";

/// Unit of per-share facts.
pub const UNIT_USD_PER_SHARE: &str = "USD/shares";

pub const REVENUE_CONCEPTS: &[&str] = &[
    "Revenues",
    "RevenueFromContractWithCustomerExcludingAssessedTax",
    "RevenueFromContractWithCustomerIncludingAssessedTax",
    "SalesRevenueNet",
    "TotalRevenuesAndOtherIncome",
];

pub const NET_INCOME_CONCEPTS: &[&str] = &[
    "NetIncomeLoss",
    "NetIncomeLossAvailableToCommonStockholdersBasic",
    "ProfitLoss",
];

pub const EPS_BASIC_CONCEPTS: &[&str] = &["EarningsPerShareBasic"];

pub const EPS_DILUTED_CONCEPTS: &[&str] = &["EarningsPerShareDiluted"];

pub const GROSS_PROFIT_CONCEPTS: &[&str] = &["GrossProfit"];

pub const OPERATING_INCOME_CONCEPTS: &[&str] = &["OperatingIncomeLoss"];

pub const CASH_CONCEPTS: &[&str] = &[
    "CashAndCashEquivalentsAtCarryingValue",
    "Cash",
    "CashCashEquivalentsAndShortTermInvestments",
];

pub const ASSETS_CONCEPTS: &[&str] = &["Assets"];

pub const EQUITY_CONCEPTS: &[&str] = &[
    "StockholdersEquity",
    "StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest",
];

pub const OPERATING_CASH_FLOW_CONCEPTS: &[&str] = &["NetCashProvidedByUsedInOperatingActivities"];

/// The ten metrics tracked per quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Revenue,
    NetIncome,
    EpsBasic,
    EpsDiluted,
    GrossProfit,
    OperatingIncome,
    Cash,
    TotalAssets,
    StockholdersEquity,
    OperatingCashFlow,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::Revenue,
        Metric::NetIncome,
        Metric::EpsBasic,
        Metric::EpsDiluted,
        Metric::GrossProfit,
        Metric::OperatingIncome,
        Metric::Cash,
        Metric::TotalAssets,
        Metric::StockholdersEquity,
        Metric::OperatingCashFlow,
    ];

    /// Candidate concept names, highest priority first.
    pub fn concepts(self) -> &'static [&'static str] {
        match self {
            Metric::Revenue => REVENUE_CONCEPTS,
            Metric::NetIncome => NET_INCOME_CONCEPTS,
            Metric::EpsBasic => EPS_BASIC_CONCEPTS,
            Metric::EpsDiluted => EPS_DILUTED_CONCEPTS,
            Metric::GrossProfit => GROSS_PROFIT_CONCEPTS,
            Metric::OperatingIncome => OPERATING_INCOME_CONCEPTS,
            Metric::Cash => CASH_CONCEPTS,
            Metric::TotalAssets => ASSETS_CONCEPTS,
            Metric::StockholdersEquity => EQUITY_CONCEPTS,
            Metric::OperatingCashFlow => OPERATING_CASH_FLOW_CONCEPTS,
        }
    }

    /// Unit the metric is reported in.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::EpsBasic | Metric::EpsDiluted => UNIT_USD_PER_SHARE,
            _ => UNIT_USD,
        }
    }
}

/// One reported value of a concept, flattened out of the fact set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Concept the value was found under.
    pub concept: String,
    pub value: f64,
    pub period_end: String,
    pub fiscal_year: Option<i32>,
    pub fiscal_period: Option<String>,
    pub filed: String,
    pub accession: String,
}

/// Collects every observation of the given concepts matching a form type and unit.
///
/// Concepts are scanned in the order given and all matches are kept, not just those of
/// the first concept present. The combined list is then sorted by period end, most recent
/// first. The sort is stable, so observations sharing a period end stay in scan order:
/// higher-priority concepts first, then the order the fact store listed them.
///
/// Non-numeric values are skipped.
pub fn extract_values(
    facts: &CompanyFacts,
    concepts: &[&str],
    form: &str,
    unit: &str,
) -> Vec<Observation> {
    let mut results = Vec::new();

    for concept in concepts {
        for point in facts.data_points(US_GAAP, concept, unit) {
            if point.form != form {
                continue;
            }
            let Some(value) = point.numeric_value() else {
                tracing::debug!(
                    "Skipping non-numeric {} value for period {}",
                    concept,
                    point.end
                );
                continue;
            };
            results.push(Observation {
                concept: concept.to_string(),
                value,
                period_end: point.end.clone(),
                fiscal_year: point.fy,
                fiscal_period: point.fp.clone(),
                filed: point.filed.clone(),
                accession: point.accn.clone(),
            });
        }
    }

    results.sort_by(|a, b| b.period_end.cmp(&a.period_end));
    results
}

/// Value of the first observation whose period end equals `period_end` exactly.
///
/// Uses the ordering of [`extract_values`], so when several synonyms report the same
/// period the higher-priority concept wins.
pub fn most_recent_value(
    facts: &CompanyFacts,
    concepts: &[&str],
    period_end: &str,
    form: &str,
    unit: &str,
) -> Option<f64> {
    extract_values(facts, concepts, form, unit)
        .into_iter()
        .find(|obs| obs.period_end == period_end)
        .map(|obs| obs.value)
}

/// Resolves a tracked metric for one period of quarterly filings.
pub fn metric_value(facts: &CompanyFacts, metric: Metric, period_end: &str) -> Option<f64> {
    most_recent_value(
        facts,
        metric.concepts(),
        period_end,
        QUARTERLY_FORM,
        metric.unit(),
    )
}
