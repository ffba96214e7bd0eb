//! Discovery of the reporting periods to analyze.
//!
//! Periods are discovered from the revenue concepts only. Revenue is the most
//! consistently tagged concept, so it anchors the period list; a quarter for which a
//! filer reported no revenue under any synonym is not analyzed, even when other metrics
//! exist for it.

use super::company::CompanyFacts;
use super::concepts::{REVENUE_CONCEPTS, UNIT_USD, US_GAAP};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A reporting period, identified by its end date (`YYYY-MM-DD`).
///
/// Keys order by period end, then fiscal year, then fiscal period label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    pub period_end: String,
    pub fiscal_year: Option<i32>,
    pub fiscal_period: Option<String>,
}

/// Selects up to `limit` distinct periods a filer reported revenue for, most recent first.
///
/// Periods are deduplicated on the full `(period_end, fiscal_year, fiscal_period)` triple.
/// A quarter restated in a later filing under a different fiscal label therefore shows up
/// twice with the same end date.
pub fn select_periods(facts: &CompanyFacts, form: &str, limit: usize) -> Vec<PeriodKey> {
    let mut periods = BTreeSet::new();

    for concept in REVENUE_CONCEPTS {
        for point in facts.data_points(US_GAAP, concept, UNIT_USD) {
            if point.form != form || point.end.is_empty() {
                continue;
            }
            periods.insert(PeriodKey {
                period_end: point.end.clone(),
                fiscal_year: point.fy,
                fiscal_period: point.fp.clone(),
            });
        }
    }

    tracing::debug!("Found {} distinct {} periods", periods.len(), form);

    periods.into_iter().rev().take(limit).collect()
}
