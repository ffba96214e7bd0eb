//! Per-period assembly of the normalized quarterly record.

use super::company::CompanyFacts;
use super::concepts::{Metric, QUARTERLY_FORM, metric_value};
use super::periods::PeriodKey;
use serde::{Deserialize, Serialize};

/// Financial metrics for a single quarter from 10-Q filings.
///
/// Every financial field is optional: it is `None` when no candidate concept reported a
/// value for the period. Margins are derived, never extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub period_end: String,
    pub form: String,
    pub fiscal_year: Option<i32>,
    pub fiscal_period: Option<String>,

    // Income statement
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub eps_basic: Option<f64>,
    pub eps_diluted: Option<f64>,
    pub gross_profit: Option<f64>,
    pub operating_income: Option<f64>,

    // Derived
    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,

    // Balance sheet
    pub cash: Option<f64>,
    pub total_assets: Option<f64>,
    pub stockholders_equity: Option<f64>,

    // Cash flow
    pub operating_cash_flow: Option<f64>,
}

impl PeriodMetrics {
    /// Resolves every tracked metric for one period and derives the margins.
    pub fn resolve(facts: &CompanyFacts, period: &PeriodKey) -> Self {
        let end = period.period_end.as_str();
        let value = |metric: Metric| metric_value(facts, metric, end);

        let revenue = value(Metric::Revenue);
        let gross_profit = value(Metric::GrossProfit);
        let operating_income = value(Metric::OperatingIncome);

        Self {
            period_end: period.period_end.clone(),
            form: QUARTERLY_FORM.to_string(),
            fiscal_year: period.fiscal_year,
            fiscal_period: period.fiscal_period.clone(),
            revenue,
            net_income: value(Metric::NetIncome),
            eps_basic: value(Metric::EpsBasic),
            eps_diluted: value(Metric::EpsDiluted),
            gross_profit,
            operating_income,
            gross_margin: ratio(gross_profit, revenue),
            operating_margin: ratio(operating_income, revenue),
            cash: value(Metric::Cash),
            total_assets: value(Metric::TotalAssets),
            stockholders_equity: value(Metric::StockholdersEquity),
            operating_cash_flow: value(Metric::OperatingCashFlow),
        }
    }
}

/// `numerator / denominator` when both are present and the denominator is positive.
///
/// Zero, negative or missing denominators give `None`, so the result is never infinite or
/// NaN. The numerator may be negative.
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d > 0.0 => Some(n / d).filter(|r| r.is_finite()),
        _ => None,
    }
}

/// Builds one record per period for the first `limit` periods, keeping their order.
///
/// Periods are resolved independently; a metric missing in one period has no effect on
/// any other.
pub fn assemble(facts: &CompanyFacts, periods: &[PeriodKey], limit: usize) -> Vec<PeriodMetrics> {
    periods
        .iter()
        .take(limit)
        .map(|period| PeriodMetrics::resolve(facts, period))
        .collect()
}
