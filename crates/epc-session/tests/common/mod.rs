//! Common fixtures for session integration tests.

use epc_client::MockRegistry;
use epc_core::{CertificateRecord, SearchResultPage};
use epc_session::SearchSession;

/// A search result row with an address and UPRN.
pub fn listing(address: &str, uprn: &str) -> CertificateRecord {
    CertificateRecord::from_pairs([("address", address), ("uprn", uprn)])
}

/// A page of `count` listings numbered from `start`.
pub fn listings(start: usize, count: usize) -> SearchResultPage {
    SearchResultPage::new(
        (start..start + count)
            .map(|n| listing(&format!("{n} Downing Street"), &format!("1000{n}")))
            .collect(),
    )
}

/// A full single-record page for the detail lookup.
pub fn certificate(uprn: &str, postcode: &str, efficiency: &str, rating: &str) -> SearchResultPage {
    SearchResultPage::new(vec![CertificateRecord::from_pairs([
        ("address", "10 Downing Street"),
        ("uprn", uprn),
        ("postcode", postcode),
        ("current-energy-efficiency", efficiency),
        ("current-energy-rating", rating),
    ])])
}

/// A same-postcode sample with the given efficiency scores.
pub fn sample(efficiencies: &[&str]) -> SearchResultPage {
    SearchResultPage::new(
        efficiencies
            .iter()
            .map(|e| CertificateRecord::from_pairs([("current-energy-efficiency", *e)]))
            .collect(),
    )
}

/// A session over a mock registry.
pub fn session(registry: MockRegistry) -> SearchSession<MockRegistry> {
    SearchSession::new(registry)
}
