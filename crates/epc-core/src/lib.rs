//! EPC Core: shared types, grading, classification, errors, and configuration.
//!
//! This crate has no internal dependencies and no HTTP stack.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: Search queries, request parameters, certificate records
//! - [`grade`]: Score → A–G band mapping
//! - [`postcode`]: Postcode / address classification of search terms
//! - [`config`]: Config file, environment overrides, credentials

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod grade;
pub mod postcode;
pub mod types;

// Re-export key types at crate root for convenience
pub use config::{AveragingPolicy, Credentials, EpcConfig, RegistryConfig};
pub use error::{EpcError, Result};
pub use grade::{EnergyBand, grade_for};
pub use postcode::{classify, is_postcode};
pub use types::{
    CertificateRecord, DEFAULT_PAGE_SIZE, SAME_POSTCODE_SAMPLE_SIZE, SearchMode, SearchParams,
    SearchQuery, SearchResultPage,
};
