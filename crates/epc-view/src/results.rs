//! Search result list and pagination state.

use std::fmt;

use epc_core::SearchResultPage;
use serde::Serialize;

/// Label used for a record that has no address field.
pub const MISSING_ADDRESS_LABEL: &str = "(no address)";

/// One selectable entry in the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    /// The record's `address` field
    pub label: String,
    /// The record's `uprn` field, used for the detail fetch
    pub uprn: Option<String>,
    /// Whether this entry is the selected one
    pub selected: bool,
}

/// Selectable entries for one page, at most one selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultList {
    entries: Vec<ResultEntry>,
}

impl ResultList {
    /// Entries in registry order.
    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the selected entry, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.selected)
    }

    /// Selects the entry at `index` and clears every other selection.
    ///
    /// Returns the entry, or `None` (leaving the selection unchanged) when
    /// the index is out of range.
    pub fn select(&mut self, index: usize) -> Option<&ResultEntry> {
        if index >= self.entries.len() {
            return None;
        }
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.selected = i == index;
        }
        self.entries.get(index)
    }
}

/// Enabled state of the previous / next controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    /// Previous is enabled past the first page
    pub previous_enabled: bool,
    /// Next is enabled when the page came back full
    pub next_enabled: bool,
}

impl PaginationState {
    /// Pagination for a page of `row_count` rows.
    ///
    /// A short page disables "next", but a full page is no guarantee that
    /// another page exists: the registry never reports a total.
    pub fn for_page(current_page: u32, row_count: usize, page_size: u32) -> Self {
        Self {
            previous_enabled: current_page > 1,
            next_enabled: row_count >= page_size as usize,
        }
    }
}

/// What the results area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsView {
    /// The search matched nothing.
    NoResults {
        /// Raw search term
        term: String,
    },
    /// One or more selectable entries.
    Entries {
        /// The entries
        list: ResultList,
    },
}

/// The results area plus its pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsPanel {
    /// Page number these results belong to
    pub page: u32,
    /// Entries or the no-results notice
    pub view: ResultsView,
    /// Control state
    pub pagination: PaginationState,
}

impl ResultsPanel {
    /// Renders a search response.
    ///
    /// `None` (empty body) and a page with no rows both produce the
    /// no-results notice with both controls disabled.
    pub fn render(
        page: Option<&SearchResultPage>,
        term: &str,
        current_page: u32,
        page_size: u32,
    ) -> Self {
        let rows = page.map(|p| p.rows.as_slice()).unwrap_or_default();
        if rows.is_empty() {
            return Self {
                page: current_page,
                view: ResultsView::NoResults {
                    term: term.to_string(),
                },
                pagination: PaginationState::default(),
            };
        }

        let entries = rows
            .iter()
            .map(|record| ResultEntry {
                label: record
                    .address()
                    .unwrap_or(MISSING_ADDRESS_LABEL)
                    .to_string(),
                uprn: record.uprn().map(str::to_string),
                selected: false,
            })
            .collect();

        Self {
            page: current_page,
            view: ResultsView::Entries {
                list: ResultList { entries },
            },
            pagination: PaginationState::for_page(current_page, rows.len(), page_size),
        }
    }

    /// The entry list, if there are results.
    pub fn list(&self) -> Option<&ResultList> {
        match &self.view {
            ResultsView::Entries { list } => Some(list),
            ResultsView::NoResults { .. } => None,
        }
    }

    /// Selects the entry at `index`; see [`ResultList::select`].
    pub fn select(&mut self, index: usize) -> Option<&ResultEntry> {
        match &mut self.view {
            ResultsView::Entries { list } => list.select(index),
            ResultsView::NoResults { .. } => None,
        }
    }
}

impl fmt::Display for ResultsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.view {
            ResultsView::NoResults { term } => writeln!(f, "No results for '{term}'")?,
            ResultsView::Entries { list } => {
                let width = list.len().to_string().len();
                for (i, entry) in list.entries().iter().enumerate() {
                    let marker = if entry.selected { '>' } else { ' ' };
                    writeln!(f, "{marker} {:>width$}. {}", i + 1, entry.label)?;
                }
            }
        }
        write!(
            f,
            "page {}  [{}prev] [{}next]",
            self.page,
            if self.pagination.previous_enabled { "" } else { "-" },
            if self.pagination.next_enabled { "" } else { "-" },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use epc_core::CertificateRecord;

    fn page_with(count: usize) -> SearchResultPage {
        SearchResultPage::new(
            (0..count)
                .map(|i| {
                    CertificateRecord::from_pairs([
                        ("address", format!("{} High Street", i + 1)),
                        ("uprn", format!("{}", 1000 + i)),
                    ])
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_page_renders_no_results() {
        let panel = ResultsPanel::render(Some(&page_with(0)), "ZZ9 9ZZ", 1, 10);
        assert_eq!(
            panel.view,
            ResultsView::NoResults {
                term: "ZZ9 9ZZ".to_string()
            }
        );
        assert_eq!(panel.pagination, PaginationState::default());
        assert!(panel.to_string().starts_with("No results for 'ZZ9 9ZZ'"));
    }

    #[test]
    fn test_missing_page_renders_no_results() {
        let panel = ResultsPanel::render(None, "nowhere", 2, 10);
        assert!(panel.list().is_none());
        assert!(panel.to_string().contains("No results for 'nowhere'"));
    }

    #[test]
    fn test_entries_labelled_by_address() {
        let panel = ResultsPanel::render(Some(&page_with(3)), "High Street", 1, 10);
        let list = panel.list().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.entries()[0].label, "1 High Street");
        assert_eq!(list.entries()[2].uprn.as_deref(), Some("1002"));
        assert!(list.selected_index().is_none());
    }

    #[test]
    fn test_missing_address_label() {
        let page = SearchResultPage::new(vec![CertificateRecord::from_pairs([("uprn", "9")])]);
        let panel = ResultsPanel::render(Some(&page), "x", 1, 10);
        assert_eq!(panel.list().unwrap().entries()[0].label, MISSING_ADDRESS_LABEL);
    }

    #[test]
    fn test_selection_is_exclusive() {
        let mut panel = ResultsPanel::render(Some(&page_with(3)), "High Street", 1, 10);

        let uprn = panel.select(0).unwrap().uprn.clone();
        assert_eq!(uprn.as_deref(), Some("1000"));

        panel.select(2);
        let list = panel.list().unwrap();
        assert_eq!(list.selected_index(), Some(2));
        assert_eq!(list.entries().iter().filter(|e| e.selected).count(), 1);
    }

    #[test]
    fn test_out_of_range_selection_keeps_previous() {
        let mut panel = ResultsPanel::render(Some(&page_with(2)), "High Street", 1, 10);
        panel.select(1);
        assert!(panel.select(5).is_none());
        assert_eq!(panel.list().unwrap().selected_index(), Some(1));
    }

    #[test]
    fn test_pagination_full_first_page() {
        let panel = ResultsPanel::render(Some(&page_with(10)), "High Street", 1, 10);
        assert!(!panel.pagination.previous_enabled);
        assert!(panel.pagination.next_enabled);
    }

    #[test]
    fn test_pagination_short_later_page() {
        let panel = ResultsPanel::render(Some(&page_with(4)), "High Street", 3, 10);
        assert!(panel.pagination.previous_enabled);
        assert!(!panel.pagination.next_enabled);
    }

    #[test]
    fn test_display_marks_selection_and_controls() {
        let mut panel = ResultsPanel::render(Some(&page_with(2)), "High Street", 1, 10);
        panel.select(1);
        let text = panel.to_string();
        assert!(text.contains("  1. 1 High Street"));
        assert!(text.contains("> 2. 2 High Street"));
        assert!(text.ends_with("page 1  [-prev] [-next]"));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let panel = ResultsPanel::render(None, "nowhere", 1, 10);
        let json = serde_json::to_value(&panel).unwrap();
        assert_eq!(json["view"]["kind"], "no_results");
        assert_eq!(json["view"]["term"], "nowhere");
    }
}
