//! Integration tests for selecting a property and analysing it.

use epc_client::{MockFailure, MockRegistry};
use epc_core::{AveragingPolicy, CertificateRecord, EnergyBand, EpcError, SearchParams, SearchResultPage};
use epc_view::AnalysisOutcome;

use crate::common::{certificate, listing, listings, sample, session};

#[tokio::test]
async fn test_select_shows_detail_and_comparison() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 3))
            .with_page(certificate("10001", "SW1A 2AA", "62", "D"))
            .with_page(sample(&["80", "90", "70"])),
    );
    session.submit("SW1A 2AA").await.unwrap();

    let selection = session.select(1).await.expect("selection");

    let detail = selection.detail.expect("detail table");
    assert!(detail.rows().contains(&("postcode".to_string(), "SW1A 2AA".to_string())));
    assert_eq!(
        selection.analysis.to_string(),
        "Comparison with properties with the same postcode: \
         Current property efficiency - D (62), \
         Average efficiency of similar properties - C (80)"
    );

    let calls = session.registry().calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1], SearchParams::single_record("10001"));
    assert_eq!(calls[2], SearchParams::same_postcode("SW1A 2AA"));

    let list = session.results().and_then(|r| r.list()).unwrap();
    assert_eq!(list.selected_index(), Some(1));
    assert_eq!(session.analysis(), Some(&selection.analysis));
}

#[tokio::test]
async fn test_selection_is_exclusive() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 3))
            .with_page(certificate("10000", "", "50", "E"))
            .with_page(certificate("10002", "", "50", "E")),
    );
    session.submit("SW1A 2AA").await.unwrap();

    session.select(0).await.unwrap();
    session.select(2).await.unwrap();

    let list = session.results().and_then(|r| r.list()).unwrap();
    let selected: Vec<bool> = list.entries().iter().map(|e| e.selected).collect();
    assert_eq!(selected, vec![false, false, true]);
}

#[tokio::test]
async fn test_missing_postcode_issues_no_sample_request() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 1))
            .with_page(certificate("10000", "", "50", "E")),
    );
    session.submit("Downing Street").await.unwrap();

    let selection = session.select(0).await.unwrap();
    assert_eq!(selection.analysis, AnalysisOutcome::NoPostcode);
    assert_eq!(session.registry().call_count(), 2);
    assert_eq!(session.registry().remaining(), 0);
}

#[tokio::test]
async fn test_empty_detail_lookup_is_no_data() {
    let mut session = session(MockRegistry::new().with_empty_body());

    let selection = session.show_uprn("999").await.unwrap();
    assert!(selection.detail.is_none());
    assert_eq!(selection.analysis, AnalysisOutcome::NoData);
    assert!(session.selected().is_none());
    assert_eq!(session.registry().call_count(), 1);
}

#[tokio::test]
async fn test_empty_sample_is_no_comparables() {
    let mut session = session(
        MockRegistry::new()
            .with_page(certificate("10000", "SW1A 2AA", "62", "D"))
            .with_page(SearchResultPage::default()),
    );

    let selection = session.show_uprn("10000").await.unwrap();
    assert_eq!(selection.analysis, AnalysisOutcome::NoComparables);
    assert_eq!(
        selection.analysis.to_string(),
        "No data available for properties with the same postcode."
    );
}

#[tokio::test]
async fn test_averaging_policy_changes_average() {
    let scores = ["80", "", "70", "n/a"];

    let mut skip = session(
        MockRegistry::new()
            .with_page(certificate("1", "SW1A 2AA", "62", "D"))
            .with_page(sample(&scores)),
    );
    let mut zero = session(
        MockRegistry::new()
            .with_page(certificate("1", "SW1A 2AA", "62", "D"))
            .with_page(sample(&scores)),
    )
    .with_averaging(AveragingPolicy::ZeroFill);

    let AnalysisOutcome::Comparison(skipped) = skip.show_uprn("1").await.unwrap().analysis else {
        panic!("expected a comparison");
    };
    let AnalysisOutcome::Comparison(zeroed) = zero.show_uprn("1").await.unwrap().analysis else {
        panic!("expected a comparison");
    };

    assert_eq!(skipped.rounded_average(), 75);
    assert_eq!(skipped.average_band, EnergyBand::C);
    assert_eq!(skipped.sample_size, 2);
    assert_eq!(zeroed.rounded_average(), 38);
    assert_eq!(zeroed.average_band, EnergyBand::F);
    assert_eq!(zeroed.sample_size, 4);
}

#[tokio::test]
async fn test_select_out_of_range() {
    let mut session = session(MockRegistry::new().with_page(listings(0, 2)));
    session.submit("SW1A 2AA").await.unwrap();

    let err = session.select(5).await.unwrap_err();
    assert!(matches!(err, EpcError::InvalidSelection(_)));
    assert_eq!(session.registry().call_count(), 1);
    let list = session.results().and_then(|r| r.list()).unwrap();
    assert_eq!(list.selected_index(), None);
}

#[tokio::test]
async fn test_select_entry_without_uprn() {
    let page = SearchResultPage::new(vec![
        listing("1 Downing Street", "10001"),
        CertificateRecord::from_pairs([("address", "2 Downing Street")]),
    ]);
    let mut session = session(MockRegistry::new().with_page(page));
    session.submit("SW1A 2AA").await.unwrap();

    let err = session.select(1).await.unwrap_err();
    assert!(err.to_string().contains("2 Downing Street"));
    assert_eq!(session.registry().call_count(), 1);
}

#[tokio::test]
async fn test_detail_failure_keeps_previous_selection() {
    let mut session = session(
        MockRegistry::new()
            .with_page(certificate("10000", "", "62", "D"))
            .with_failure(MockFailure::Transport("connection reset".to_string())),
    );
    session.show_uprn("10000").await.unwrap();
    let before = session.selected().cloned();

    let err = session.show_uprn("10001").await.unwrap_err();
    assert!(matches!(err, EpcError::TransportFailed { .. }));
    assert_eq!(session.selected().cloned(), before);
    assert_eq!(session.analysis(), Some(&AnalysisOutcome::NoPostcode));
}
