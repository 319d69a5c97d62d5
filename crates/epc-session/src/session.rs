//! The search controller.
//!
//! [`SearchSession`] owns the page cursor, the last search term, the
//! selected property, and what each panel currently shows. Each action awaits its registry calls in order
//! (search, then detail, then analysis) and commits state only once the
//! call it depends on has succeeded.

use std::fmt;

use epc_client::Registry;
use epc_core::{
    AveragingPolicy, DEFAULT_PAGE_SIZE, EpcError, Result, SearchParams, SearchQuery,
    SearchResultPage,
};
use epc_view::{AnalysisOutcome, DetailTable, ResultsPanel};
use serde::Serialize;

use crate::analysis::AnalysisEngine;

/// Detail and analysis produced by selecting a property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Detail table, `None` when the lookup returned no record
    pub detail: Option<DetailTable>,
    /// Analysis panel
    pub analysis: AnalysisOutcome,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => writeln!(f, "{detail}")?,
            None => writeln!(f, "No certificate found.")?,
        }
        write!(f, "{}", self.analysis)
    }
}

/// One user's search session.
#[derive(Debug)]
pub struct SearchSession<R> {
    registry: R,
    engine: AnalysisEngine,
    page_size: u32,
    current_page: u32,
    last_term: Option<String>,
    results: Option<ResultsPanel>,
    selected: Option<SearchResultPage>,
    detail: Option<DetailTable>,
    analysis: Option<AnalysisOutcome>,
}

impl<R: Registry> SearchSession<R> {
    /// Creates a session on page 1 with nothing searched or selected.
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            engine: AnalysisEngine::default(),
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
            last_term: None,
            results: None,
            selected: None,
            detail: None,
            analysis: None,
        }
    }

    /// Sets how the postcode average treats rows without a score.
    pub fn with_averaging(mut self, policy: AveragingPolicy) -> Self {
        self.engine = AnalysisEngine::new(policy);
        self
    }

    /// The registry this session queries.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Current 1-based page number.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Moves the cursor back to page 1 without searching.
    ///
    /// Submitting a new search never does this on its own.
    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// Moves the cursor to `page` without searching. Page 0 means page 1.
    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Rows requested per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Term of the most recent search.
    pub fn last_term(&self) -> Option<&str> {
        self.last_term.as_deref()
    }

    /// What the results area currently shows.
    pub fn results(&self) -> Option<&ResultsPanel> {
        self.results.as_ref()
    }

    /// The most recently fetched single-record page.
    pub fn selected(&self) -> Option<&SearchResultPage> {
        self.selected.as_ref()
    }

    /// What the detail area currently shows.
    pub fn detail(&self) -> Option<&DetailTable> {
        self.detail.as_ref()
    }

    /// What the analysis area currently shows.
    pub fn analysis(&self) -> Option<&AnalysisOutcome> {
        self.analysis.as_ref()
    }

    /// Searches for `term` on the current page.
    ///
    /// The page cursor is deliberately left where it is, so a new term is
    /// searched at whatever page the previous one was on. The term becomes
    /// the one paged by [`next_page`](Self::next_page) only once its search
    /// succeeds.
    pub async fn submit(&mut self, term: &str) -> Result<&ResultsPanel> {
        let term = term.trim();
        let panel = self.fetch_results(term, self.current_page).await?;
        self.last_term = Some(term.to_string());
        Ok(self.results.insert(panel))
    }

    /// Advances to the next page of the last search.
    ///
    /// There is no upper bound: paging past the end yields the no-results
    /// notice. The cursor only moves if the request succeeds.
    pub async fn next_page(&mut self) -> Result<&ResultsPanel> {
        let term = self.active_term()?;
        let page = self.current_page.saturating_add(1);
        let panel = self.fetch_results(&term, page).await?;
        self.current_page = page;
        Ok(self.results.insert(panel))
    }

    /// Goes back one page of the last search.
    ///
    /// On page 1 nothing is requested and the current results are returned.
    pub async fn previous_page(&mut self) -> Result<&ResultsPanel> {
        let term = self.active_term()?;
        if self.current_page <= 1 {
            return self.results.as_ref().ok_or(EpcError::NoActiveSearch);
        }
        let page = self.current_page - 1;
        let panel = self.fetch_results(&term, page).await?;
        self.current_page = page;
        Ok(self.results.insert(panel))
    }

    /// Selects the result at `index` (0-based) and shows its detail and analysis.
    pub async fn select(&mut self, index: usize) -> Result<Selection> {
        let panel = self.results.as_mut().ok_or(EpcError::NoActiveSearch)?;
        let available = panel.list().map_or(0, |list| list.len());
        let entry = panel.select(index).ok_or_else(|| {
            EpcError::InvalidSelection(format!(
                "no result {} on this page ({available} available)",
                index + 1
            ))
        })?;
        let uprn = entry.uprn.clone().ok_or_else(|| {
            EpcError::InvalidSelection(format!("'{}' has no UPRN", entry.label))
        })?;

        self.show_uprn(&uprn).await
    }

    /// Fetches the certificate for `uprn`, shows it, then analyses it.
    ///
    /// The selected property and detail are replaced as soon as the lookup
    /// succeeds. If the analysis request then fails, the previous analysis
    /// is left in place and the error is returned.
    pub async fn show_uprn(&mut self, uprn: &str) -> Result<Selection> {
        tracing::info!(%uprn, "Fetching certificate");
        let page = self
            .registry
            .search(&SearchParams::single_record(uprn))
            .await?;

        self.selected = page;
        self.detail = self
            .selected
            .as_ref()
            .and_then(SearchResultPage::first)
            .map(DetailTable::from_record);

        let analysis = self
            .engine
            .run(&self.registry, self.selected.as_ref())
            .await?;
        self.analysis = Some(analysis.clone());

        Ok(Selection {
            detail: self.detail.clone(),
            analysis,
        })
    }

    fn active_term(&self) -> Result<String> {
        self.last_term.clone().ok_or(EpcError::NoActiveSearch)
    }

    async fn fetch_results(&self, term: &str, page: u32) -> Result<ResultsPanel> {
        let query = SearchQuery::for_page(term, page, self.page_size);
        tracing::info!(
            term = %query.term,
            mode = ?query.mode,
            page,
            offset = query.offset,
            "Searching"
        );
        let response = self.registry.search(&query.params()).await?;
        Ok(ResultsPanel::render(
            response.as_ref(),
            term,
            page,
            self.page_size,
        ))
    }
}
