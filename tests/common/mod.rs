use edgar_quarterly::{CompanyFacts, CompanyTicker, Edgar, parse_ticker_directory};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

#[allow(dead_code)]
pub fn company_facts() -> CompanyFacts {
    serde_json::from_str(&read_fixture("tickers/companyfacts.json"))
        .expect("company facts fixture should parse")
}

#[allow(dead_code)]
pub fn ticker_directory() -> Vec<CompanyTicker> {
    parse_ticker_directory(&read_fixture("tickers/company_tickers.json"))
        .expect("ticker directory fixture should parse")
}

#[allow(dead_code)]
pub fn edgar() -> Edgar {
    Edgar::new("test_agent example@example.com").unwrap()
}
