//! Prompt text handed to the narrative collaborator.
//!
//! The numeric work is done before this point; the prompt only restates it compactly so
//! the generated summary can cite figures.

use super::metrics::PeriodMetrics;
use super::trends::TrendSummary;

const NOT_AVAILABLE: &str = "N/A";

/// Everything the synthesis prompt mentions.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub ticker: &'a str,
    pub company_name: &'a str,
    pub metrics: &'a [PeriodMetrics],
    pub current_price: Option<f64>,
    pub trends: &'a TrendSummary,
}

/// Renders one line per quarter with whichever headline figures are present.
pub fn format_metrics_for_prompt(metrics: &[PeriodMetrics]) -> String {
    if metrics.is_empty() {
        return "No quarterly data available.".to_string();
    }

    metrics
        .iter()
        .map(|m| {
            let period = m.fiscal_period.as_deref().unwrap_or(&m.period_end);
            let mut parts = vec![format!("**{}**:", period)];

            if let Some(revenue) = m.revenue {
                parts.push(format!("Revenue ${:.2}B", revenue / 1e9));
            }
            if let Some(net_income) = m.net_income {
                parts.push(format!("Net Income ${:.2}B", net_income / 1e9));
            }
            if let Some(eps) = m.eps_diluted {
                parts.push(format!("EPS ${:.2}", eps));
            }
            if let Some(margin) = m.gross_margin {
                parts.push(format!("Gross Margin {:.1}%", margin * 100.0));
            }

            parts.join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the full synthesis prompt.
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    let metrics_summary = format_metrics_for_prompt(input.metrics);
    let current_price = input
        .current_price
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let avg_growth = input
        .trends
        .avg_revenue_growth
        .map(|g| format!("{:.1}%", g * 100.0))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    format!(
        r#"You are a professional investment analyst. Given the following financial metrics for {ticker} ({company_name}), provide a brief investment analysis.

QUARTERLY DATA (Most Recent 10-Q Filings):
{metrics_summary}

CURRENT PRICE: ${current_price}

TREND ANALYSIS:
- Revenue Trend: {revenue_trend}
- Average YoY Growth: {avg_growth}
- Margin Trend: {margin_trend}
- EPS Trend: {eps_trend}

Provide a concise 2-3 sentence investment summary that:
1. Summarizes the financial health based on the numbers
2. Notes key strengths or concerns
3. Gives a brief valuation perspective

Keep the response under 150 words. Be specific and cite numbers."#,
        ticker = input.ticker,
        company_name = input.company_name,
        revenue_trend = input.trends.revenue_trend,
        margin_trend = input.trends.margin_trend,
        eps_trend = input.trends.eps_trend,
    )
}
