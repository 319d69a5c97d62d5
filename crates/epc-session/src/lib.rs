#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod session;

pub use analysis::{AnalysisEngine, SampleAverage, average_efficiency};
pub use session::{SearchSession, Selection};
