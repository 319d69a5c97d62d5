//! Search term classification.
//!
//! Decides whether free text typed into the search box is a UK postcode or
//! an address fragment. Only the shape is checked; whether the postcode
//! exists is left to the registry.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::SearchMode;

/// ASCII letters and digits only.
#[allow(clippy::expect_used)]
static POSTCODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{1,2}[0-9][A-Za-z0-9]?\s?[0-9][A-Za-z]{2}$")
        .expect("postcode pattern compiles")
});

/// Returns `true` if `term` has the shape of a UK postcode.
pub fn is_postcode(term: &str) -> bool {
    POSTCODE_PATTERN.is_match(term.trim())
}

/// Classifies a raw search term as a postcode or an address search.
pub fn classify(term: &str) -> SearchMode {
    if is_postcode(term) {
        SearchMode::Postcode
    } else {
        SearchMode::Address
    }
}
