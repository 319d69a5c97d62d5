//! Core data types.

pub mod query;
pub mod record;

pub use query::{
    DEFAULT_PAGE_SIZE, SAME_POSTCODE_SAMPLE_SIZE, SearchMode, SearchParams, SearchQuery,
    offset_for_page,
};
pub use record::{CertificateRecord, SearchResultPage};
