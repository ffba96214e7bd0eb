//! First-versus-last trend classification over an ordered run of quarters.
//!
//! Only the most recent and the oldest available value of each field are compared; this
//! is a directional signal for the narrative prompt, not a fitted trend line.

use super::metrics::PeriodMetrics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gross margin moves smaller than this (in absolute ratio terms) count as stable.
pub const MARGIN_STABILITY_THRESHOLD: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    Growing,
    Declining,
    Stable,
    Expanding,
    Contracting,
    #[default]
    InsufficientData,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Growing => "growing",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
            Trend::Expanding => "expanding",
            Trend::Contracting => "contracting",
            Trend::InsufficientData => "insufficient-data",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend analysis across multiple quarters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendSummary {
    pub revenue_trend: Trend,
    /// Total revenue growth from oldest to newest quarter, divided by the number of
    /// quarters with revenue.
    pub avg_revenue_growth: Option<f64>,
    pub margin_trend: Trend,
    pub eps_trend: Trend,
}

/// Classifies revenue, gross margin and diluted EPS over `periods`, most recent first.
///
/// Fields are filtered to the periods that report them before comparing; fewer than two
/// values yields [`Trend::InsufficientData`].
pub fn analyze_trends(periods: &[PeriodMetrics]) -> TrendSummary {
    let revenues = present(periods, |m| m.revenue);
    let margins = present(periods, |m| m.gross_margin);
    let eps = present(periods, |m| m.eps_diluted);

    TrendSummary {
        revenue_trend: direction(&revenues),
        avg_revenue_growth: average_growth(&revenues),
        margin_trend: margin_direction(&margins),
        eps_trend: direction(&eps),
    }
}

fn present(periods: &[PeriodMetrics], field: impl Fn(&PeriodMetrics) -> Option<f64>) -> Vec<f64> {
    periods.iter().filter_map(field).collect()
}

fn endpoints(values: &[f64]) -> Option<(f64, f64)> {
    match values {
        [first, .., last] => Some((*first, *last)),
        _ => None,
    }
}

fn direction(values: &[f64]) -> Trend {
    match endpoints(values) {
        Some((first, last)) if first > last => Trend::Growing,
        Some((first, last)) if first < last => Trend::Declining,
        Some(_) => Trend::Stable,
        None => Trend::InsufficientData,
    }
}

fn margin_direction(values: &[f64]) -> Trend {
    let Some((first, last)) = endpoints(values) else {
        return Trend::InsufficientData;
    };
    let diff = first - last;
    if diff.abs() < MARGIN_STABILITY_THRESHOLD {
        Trend::Stable
    } else if diff > 0.0 {
        Trend::Expanding
    } else {
        Trend::Contracting
    }
}

fn average_growth(revenues: &[f64]) -> Option<f64> {
    let (first, last) = endpoints(revenues)?;
    if last > 0.0 {
        Some((first - last) / last / revenues.len() as f64)
    } else {
        None
    }
}
