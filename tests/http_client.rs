mod common;

use common::read_fixture;
use edgar_quarterly::{
    AnalysisOptions, ChatNarrator, CompanyOperations, DisabledNarrator, Edgar, EdgarConfig,
    EdgarError, EdgarUrls, ErrorKind, HttpPriceSource, Narrator, PriceSource, analyze_stock,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "EdgarQuarterlyTests test@example.com";
const TICKERS_PATH: &str = "/files/company_tickers.json";
const FACTS_PATH: &str = "/api/xbrl/companyfacts/CIK0000320193.json";

fn json_body(body: impl Into<Vec<u8>>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/json")
}

fn edgar_for(server: &MockServer) -> Edgar {
    let config = EdgarConfig::new(USER_AGENT, 10, std::time::Duration::from_secs(5), None)
        .with_base_urls(EdgarUrls::from_base(&server.uri()));
    Edgar::with_config(config).unwrap()
}

async fn mount_tickers(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(TICKERS_PATH))
        .and(header("user-agent", USER_AGENT))
        .respond_with(json_body(read_fixture("tickers/company_tickers.json")))
        .mount(server)
        .await;
}

#[tokio::test]
async fn identity_lookup_sends_user_agent() {
    let server = MockServer::start().await;
    mount_tickers(&server).await;
    let edgar = edgar_for(&server);

    let identity = edgar.company_identity("nvda").await.unwrap();
    assert_eq!(identity.ticker, "NVDA");
    assert_eq!(identity.cik_padded, "0001045810");
    assert_eq!(identity.name, "NVIDIA CORP");
}

#[tokio::test]
async fn company_facts_by_padded_or_raw_cik() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FACTS_PATH))
        .respond_with(json_body(read_fixture("tickers/companyfacts.json")))
        .expect(2)
        .mount(&server)
        .await;
    let edgar = edgar_for(&server);

    let padded = edgar.company_facts("0000320193").await.unwrap();
    let raw = edgar.company_facts("320193").await.unwrap();
    assert_eq!(padded.entity_name, "Apple Inc.");
    assert_eq!(raw.cik, 320193);
}

#[tokio::test]
async fn unknown_ticker_never_requests_facts() {
    let server = MockServer::start().await;
    mount_tickers(&server).await;
    Mock::given(method("GET"))
        .and(path(FACTS_PATH))
        .respond_with(json_body(read_fixture("tickers/companyfacts.json")))
        .expect(0)
        .mount(&server)
        .await;
    let edgar = edgar_for(&server);

    let err = analyze_stock(
        &edgar,
        &HttpPriceSource::new(format!("{}/api", server.uri())).unwrap(),
        &DisabledNarrator,
        "ZZZZZZ",
        &AnalysisOptions::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, EdgarError::TickerNotFound(_)));
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;
    mount_tickers(&server).await;
    Mock::given(method("GET"))
        .and(path(FACTS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;
    let edgar = edgar_for(&server);

    let err = analyze_stock(
        &edgar,
        &HttpPriceSource::new(format!("{}/api", server.uri())).unwrap(),
        &DisabledNarrator,
        "AAPL",
        &AnalysisOptions::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, EdgarError::InvalidResponse(_)));
    assert_eq!(err.kind(), ErrorKind::Upstream);
}

#[tokio::test]
async fn rate_limit_response_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TICKERS_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;
    let edgar = edgar_for(&server);

    let err = edgar.company_identity("AAPL").await.unwrap_err();
    assert!(matches!(err, EdgarError::RateLimitExceeded));
    assert_eq!(err.kind(), ErrorKind::Upstream);
}

#[tokio::test]
async fn missing_facts_are_an_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FACTS_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let edgar = edgar_for(&server);

    let err = edgar.company_facts("320193").await.unwrap_err();
    assert!(matches!(err, EdgarError::NotFound(_)));
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn html_error_page_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TICKERS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>Request Rate Threshold Exceeded</body></html>", "text/html"),
        )
        .mount(&server)
        .await;
    let edgar = edgar_for(&server);

    let err = edgar.company_tickers().await.unwrap_err();
    assert!(matches!(err, EdgarError::UnexpectedContentType { .. }));
}

#[tokio::test]
async fn price_source_reads_quote() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/prices/fetch/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"symbol": "AAPL", "price": 227.52})))
        .mount(&server)
        .await;

    let prices = HttpPriceSource::new(format!("{}/api", server.uri())).unwrap();
    assert_eq!(prices.current_price("AAPL").await.unwrap(), Some(227.52));
}

#[tokio::test]
async fn price_source_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/prices/fetch/AAPL"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let prices = HttpPriceSource::new(format!("{}/api", server.uri())).unwrap();
    let err = prices.current_price("AAPL").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Collaborator);
}

#[tokio::test]
async fn chat_narrator_posts_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "messages": [{"role": "user", "content": "Summarize AAPL"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Steady quarter."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let narrator =
        ChatNarrator::new(&format!("{}/v1", server.uri()), Some("secret"), "test-model").unwrap();
    assert_eq!(narrator.narrate("Summarize AAPL").await.unwrap(), "Steady quarter.");
}

#[tokio::test]
async fn end_to_end_against_mock_services() {
    let server = MockServer::start().await;
    mount_tickers(&server).await;
    Mock::given(method("GET"))
        .and(path(FACTS_PATH))
        .and(header("user-agent", USER_AGENT))
        .respond_with(json_body(read_fixture("tickers/companyfacts.json")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/prices/fetch/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"price": 227.52})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Revenue declined while margins held."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let edgar = edgar_for(&server);
    let prices = HttpPriceSource::new(format!("{}/api", server.uri())).unwrap();
    let narrator = ChatNarrator::new(&format!("{}/v1", server.uri()), None, "test-model").unwrap();

    let report = analyze_stock(&edgar, &prices, &narrator, "aapl", &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(report.ticker, "AAPL");
    assert_eq!(report.current_price, Some(227.52));
    assert_eq!(report.quarterly_metrics.len(), 3);
    assert_eq!(report.investment_summary, "Revenue declined while margins held.");
}
