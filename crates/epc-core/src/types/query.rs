//! Search queries and the registry request parameters built from them.

use serde::{Deserialize, Serialize};

use crate::postcode::classify;

/// Rows requested per results page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Rows requested when sampling properties that share a postcode.
pub const SAME_POSTCODE_SAMPLE_SIZE: u32 = 100;

/// How a search term is sent to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Term matched the UK postcode pattern.
    Postcode,
    /// Anything else; sent as a free-text address fragment.
    Address,
}

/// One page-sized search built from user input.
///
/// Constructed fresh for every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Postcode or address search
    pub mode: SearchMode,
    /// Search term with surrounding whitespace removed
    pub term: String,
    /// Zero-based row offset (`from` parameter)
    pub offset: u32,
    /// Rows per page (`size` parameter)
    pub page_size: u32,
}

impl SearchQuery {
    /// Builds the query for `page` (1-based) of the results for `term`.
    ///
    /// A page of 0 is treated as page 1.
    pub fn for_page(term: &str, page: u32, page_size: u32) -> Self {
        let term = term.trim();
        Self {
            mode: classify(term),
            term: term.to_string(),
            offset: offset_for_page(page, page_size),
            page_size,
        }
    }

    /// Converts the query into registry request parameters.
    pub fn params(&self) -> SearchParams {
        let base = match self.mode {
            SearchMode::Postcode => SearchParams::default().with_postcode(&self.term),
            SearchMode::Address => SearchParams::default().with_address(&self.term),
        };
        base.with_from(self.offset).with_size(self.page_size)
    }
}

/// Row offset of the first row on `page` (1-based).
pub fn offset_for_page(page: u32, page_size: u32) -> u32 {
    page.max(1).saturating_sub(1).saturating_mul(page_size)
}

/// Query-string parameters for one call to the registry search endpoint.
///
/// Absent parameters are left out of the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Exact postcode filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// Free-text address filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Unique property reference number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uprn: Option<String>,
    /// Zero-based row offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    /// Maximum rows to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl SearchParams {
    /// Parameters fetching the single certificate for a UPRN.
    pub fn single_record(uprn: impl Into<String>) -> Self {
        Self::default().with_uprn(uprn).with_size(1)
    }

    /// Parameters sampling properties that share `postcode`.
    pub fn same_postcode(postcode: impl Into<String>) -> Self {
        Self::default()
            .with_postcode(postcode)
            .with_size(SAME_POSTCODE_SAMPLE_SIZE)
    }

    /// Sets the postcode filter.
    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    /// Sets the address filter.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the UPRN filter.
    pub fn with_uprn(mut self, uprn: impl Into<String>) -> Self {
        self.uprn = Some(uprn.into());
        self
    }

    /// Sets the row offset.
    pub fn with_from(mut self, from: u32) -> Self {
        self.from = Some(from);
        self
    }

    /// Sets the page size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Parameters as ordered `(name, value)` pairs, absent ones omitted.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(postcode) = &self.postcode {
            pairs.push(("postcode", postcode.clone()));
        }
        if let Some(address) = &self.address {
            pairs.push(("address", address.clone()));
        }
        if let Some(uprn) = &self.uprn {
            pairs.push(("uprn", uprn.clone()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        pairs
    }
}
