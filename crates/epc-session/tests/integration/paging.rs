//! Integration tests for searching and paging.

use epc_client::MockFailure;
use epc_client::MockRegistry;
use epc_core::{EpcError, SearchParams};
use epc_view::ResultsView;

use crate::common::{listings, session};

#[tokio::test]
async fn test_postcode_search_then_next_page() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 10))
            .with_page(listings(10, 10)),
    );

    let first = session.submit("SW1A 1AA").await.expect("first page");
    assert_eq!(first.page, 1);
    assert_eq!(first.list().unwrap().len(), 10);
    assert!(!first.pagination.previous_enabled);
    assert!(first.pagination.next_enabled);

    let second = session.next_page().await.expect("second page");
    assert_eq!(second.page, 2);
    assert!(second.pagination.previous_enabled);
    assert_eq!(session.current_page(), 2);

    let calls = session.registry().calls();
    assert_eq!(
        calls,
        vec![
            SearchParams::default()
                .with_postcode("SW1A 1AA")
                .with_from(0)
                .with_size(10),
            SearchParams::default()
                .with_postcode("SW1A 1AA")
                .with_from(10)
                .with_size(10),
        ]
    );
}

#[tokio::test]
async fn test_address_search_uses_address_parameter() {
    let mut session = session(MockRegistry::new().with_page(listings(0, 3)));

    let panel = session.submit("Downing Street").await.unwrap();
    assert!(!panel.pagination.next_enabled);

    let calls = session.registry().calls();
    assert_eq!(calls[0].address.as_deref(), Some("Downing Street"));
    assert!(calls[0].postcode.is_none());
}

#[tokio::test]
async fn test_previous_on_first_page_issues_no_request() {
    let mut session = session(MockRegistry::new().with_page(listings(0, 10)));
    session.submit("SW1A 1AA").await.unwrap();

    let panel = session.previous_page().await.expect("current results");
    assert_eq!(panel.page, 1);
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.registry().call_count(), 1);
}

#[tokio::test]
async fn test_previous_page_goes_back() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 10))
            .with_page(listings(10, 10))
            .with_page(listings(0, 10)),
    );
    session.submit("SW1A 1AA").await.unwrap();
    session.next_page().await.unwrap();

    let panel = session.previous_page().await.unwrap();
    assert_eq!(panel.page, 1);
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.registry().calls()[2].from, Some(0));
}

#[tokio::test]
async fn test_paging_past_the_end_shows_no_results() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 10))
            .with_empty_body(),
    );
    session.submit("SW1A 1AA").await.unwrap();

    let panel = session.next_page().await.unwrap();
    assert_eq!(
        panel.view,
        ResultsView::NoResults {
            term: "SW1A 1AA".to_string()
        }
    );
    assert!(!panel.pagination.previous_enabled);
    assert!(!panel.pagination.next_enabled);
    assert_eq!(panel.to_string(), "No results for 'SW1A 1AA'\npage 2  [-prev] [-next]");
    assert_eq!(session.current_page(), 2);
}

#[tokio::test]
async fn test_malformed_response_leaves_state_unchanged() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 10))
            .with_failure(MockFailure::MalformedBody("<html>oops</html>".to_string())),
    );
    let before = session.submit("SW1A 1AA").await.unwrap().clone();

    let err = session.next_page().await.unwrap_err();
    assert!(matches!(err, EpcError::ParseFailed { .. }));
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.results(), Some(&before));
}

#[tokio::test]
async fn test_failed_submit_keeps_previous_results() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 4))
            .with_failure(MockFailure::Status(401)),
    );
    let before = session.submit("SW1A 1AA").await.unwrap().clone();

    let err = session.submit("EC1A 1BB").await.unwrap_err();
    assert!(err.is_registry_failure());
    assert_eq!(session.results(), Some(&before));
    assert_eq!(session.last_term(), Some("SW1A 1AA"));
}

#[tokio::test]
async fn test_next_after_failed_submit_pages_previous_term() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 10))
            .with_failure(MockFailure::Status(503))
            .with_page(listings(10, 10)),
    );
    session.submit("SW1A 1AA").await.unwrap();
    session.submit("EC1A 1BB").await.unwrap_err();

    session.next_page().await.unwrap();
    assert_eq!(session.current_page(), 2);
    let calls = session.registry().calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].postcode.as_deref(), Some("SW1A 1AA"));
    assert_eq!(calls[2].from, Some(10));
}

#[tokio::test]
async fn test_new_search_keeps_page_cursor() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 10))
            .with_page(listings(10, 10))
            .with_page(listings(10, 2)),
    );
    session.submit("SW1A 1AA").await.unwrap();
    session.next_page().await.unwrap();

    let panel = session.submit("EC1A 1BB").await.unwrap();
    assert_eq!(panel.page, 2);
    assert_eq!(session.registry().calls()[2].from, Some(10));
}

#[tokio::test]
async fn test_reset_page_before_new_search() {
    let mut session = session(
        MockRegistry::new()
            .with_page(listings(0, 10))
            .with_page(listings(10, 10))
            .with_page(listings(0, 2)),
    );
    session.submit("SW1A 1AA").await.unwrap();
    session.next_page().await.unwrap();

    session.reset_page();
    let panel = session.submit("EC1A 1BB").await.unwrap();
    assert_eq!(panel.page, 1);
    assert_eq!(session.registry().calls()[2].from, Some(0));
}
