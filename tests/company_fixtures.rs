mod common;

use common::{company_facts, read_fixture, ticker_directory};
use edgar_quarterly::concepts::{QUARTERLY_FORM, REVENUE_CONCEPTS, UNIT_USD};
use edgar_quarterly::{
    CompanyFacts, FilerIdentity, Metric, Trend, analyze_trends, assemble, extract_values,
    metric_value, select_periods,
};

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value should be present");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn parse_company_facts() {
    let content = read_fixture("tickers/companyfacts.json");
    let facts: CompanyFacts = serde_json::from_str(&content).unwrap();

    assert_eq!(facts.cik, 320193);
    assert_eq!(facts.entity_name, "Apple Inc.");
    assert!(facts.taxonomies.contains_key("dei"));

    let net_income = facts.concept("us-gaap", "NetIncomeLoss").unwrap();
    assert_eq!(
        net_income.label,
        Some("Net Income (Loss) Attributable to Parent".to_string())
    );

    let point = &facts.data_points("us-gaap", "NetIncomeLoss", "USD")[0];
    assert_eq!(point.val, 33_916_000_000u64);
    assert_eq!(point.form, "10-Q");
    assert_eq!(point.fp.as_deref(), Some("Q1"));
    assert_eq!(point.filed, "2024-02-02");
}

#[test]
fn parse_ticker_directory_in_file_order() {
    let directory = ticker_directory();
    assert_eq!(directory.len(), 7);
    assert_eq!(directory[0].ticker, "AAPL");
    assert_eq!(directory[6].ticker, "BRK-B");
}

#[test]
fn resolve_identity_from_directory() {
    let identity = FilerIdentity::lookup(&ticker_directory(), "goog").unwrap();
    assert_eq!(identity.ticker, "GOOG");
    assert_eq!(identity.cik, 1652044);
    assert_eq!(identity.cik_padded, "0001652044");
    assert_eq!(identity.name, "Alphabet Inc.");

    assert!(FilerIdentity::lookup(&ticker_directory(), "ZZZZZZ").is_err());
}

#[test]
fn revenue_synonyms_are_combined() {
    let facts = company_facts();
    let observations = extract_values(&facts, REVENUE_CONCEPTS, QUARTERLY_FORM, UNIT_USD);

    // Three quarters under the current concept plus one legacy quarter, no 10-K.
    assert_eq!(observations.len(), 4);
    assert_eq!(observations[0].period_end, "2024-06-29");
    assert_eq!(observations[3].period_end, "2018-06-30");
    assert_eq!(observations[3].concept, "Revenues");
}

#[test]
fn select_most_recent_quarters() {
    let facts = company_facts();

    let periods = select_periods(&facts, QUARTERLY_FORM, 3);
    let ends: Vec<&str> = periods.iter().map(|p| p.period_end.as_str()).collect();
    assert_eq!(ends, vec!["2024-06-29", "2024-03-30", "2023-12-30"]);
    assert_eq!(periods[0].fiscal_period.as_deref(), Some("Q3"));

    let all = select_periods(&facts, QUARTERLY_FORM, 10);
    assert_eq!(all.len(), 4);

    assert_eq!(select_periods(&facts, "10-K", 10).len(), 1);
}

#[test]
fn metric_values_for_quarter() {
    let facts = company_facts();
    approx(metric_value(&facts, Metric::Revenue, "2024-06-29"), 85_777_000_000.0);
    approx(metric_value(&facts, Metric::EpsDiluted, "2024-06-29"), 1.40);
    approx(metric_value(&facts, Metric::Cash, "2024-03-30"), 32_695_000_000.0);
    assert_eq!(metric_value(&facts, Metric::NetIncome, "2018-06-30"), None);
}

#[test]
fn assemble_and_analyze_quarters() {
    let facts = company_facts();
    let periods = select_periods(&facts, QUARTERLY_FORM, 3);
    let metrics = assemble(&facts, &periods, 3);

    assert_eq!(metrics.len(), 3);
    let latest = &metrics[0];
    assert_eq!(latest.period_end, "2024-06-29");
    assert_eq!(latest.form, "10-Q");
    assert_eq!(latest.fiscal_year, Some(2024));
    approx(latest.revenue, 85_777_000_000.0);
    approx(latest.net_income, 21_448_000_000.0);
    approx(latest.gross_margin, 39_678.0 / 85_777.0);
    approx(latest.operating_margin, 25_352.0 / 85_777.0);
    approx(latest.total_assets, 331_612_000_000.0);
    approx(latest.stockholders_equity, 66_708_000_000.0);
    approx(latest.operating_cash_flow, 91_443_000_000.0);

    let trends = analyze_trends(&metrics);
    assert_eq!(trends.revenue_trend, Trend::Declining);
    assert_eq!(trends.margin_trend, Trend::Stable);
    assert_eq!(trends.eps_trend, Trend::Declining);
    approx(
        trends.avg_revenue_growth,
        (85_777.0 - 119_575.0) / 119_575.0 / 3.0,
    );
}

#[test]
fn legacy_quarter_has_revenue_only() {
    let facts = company_facts();
    let periods = select_periods(&facts, QUARTERLY_FORM, 10);
    let metrics = assemble(&facts, &periods, 10);

    let legacy = metrics.last().unwrap();
    assert_eq!(legacy.period_end, "2018-06-30");
    approx(legacy.revenue, 53_265_000_000.0);
    assert_eq!(legacy.gross_margin, None);
    assert_eq!(legacy.eps_diluted, None);
}
