#![doc = include_str!("../README.md")]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod detail;
pub mod results;

pub use analysis::{AnalysisOutcome, Comparison, round_half_up};
pub use detail::DetailTable;
pub use results::{PaginationState, ResultEntry, ResultList, ResultsPanel, ResultsView};
