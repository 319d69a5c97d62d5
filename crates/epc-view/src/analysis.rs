//! Analysis panel: how the selected property compares with its postcode.

use std::fmt;

use epc_core::EnergyBand;
use serde::Serialize;

/// Shown when a value is missing from the selected certificate.
const UNKNOWN: &str = "unknown";

/// The selected property against the same-postcode sample average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Letter rating printed on the selected certificate
    pub current_rating: Option<String>,
    /// Efficiency score printed on the selected certificate
    pub current_efficiency: Option<String>,
    /// Mean efficiency of the sample
    pub average: f64,
    /// Band of the mean
    pub average_band: EnergyBand,
    /// Rows the mean was taken over
    pub sample_size: usize,
}

impl Comparison {
    /// Mean rounded to the nearest integer, halves rounding up.
    pub fn rounded_average(&self) -> i64 {
        round_half_up(self.average)
    }
}

/// Rounds to the nearest integer with halves going towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// What the analysis panel shows. Each run replaces the previous outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// No selected property, or it has no rows.
    NoData,
    /// The selected property has no postcode.
    NoPostcode,
    /// The postcode sample came back empty.
    NoComparables,
    /// The comparison sentence.
    Comparison(Comparison),
}

impl fmt::Display for AnalysisOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisOutcome::NoData => write!(f, "No data for analysis."),
            AnalysisOutcome::NoPostcode => {
                write!(f, "No address available for the current property.")
            }
            AnalysisOutcome::NoComparables => {
                write!(f, "No data available for properties with the same postcode.")
            }
            AnalysisOutcome::Comparison(c) => write!(
                f,
                "Comparison with properties with the same postcode: \
                 Current property efficiency - {} ({}), \
                 Average efficiency of similar properties - {} ({})",
                c.current_rating.as_deref().unwrap_or(UNKNOWN),
                c.current_efficiency.as_deref().unwrap_or(UNKNOWN),
                c.average_band,
                c.rounded_average(),
            ),
        }
    }
}
