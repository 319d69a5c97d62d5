//! Same-postcode efficiency analysis.
//!
//! Given the selected property, samples up to
//! [`SAME_POSTCODE_SAMPLE_SIZE`](epc_core::SAME_POSTCODE_SAMPLE_SIZE)
//! certificates sharing its postcode, averages their current efficiency
//! and grades the average. The sample is best effort: postcodes with more
//! certificates than the sample size are silently truncated.

use epc_client::Registry;
use epc_core::{
    AveragingPolicy, CertificateRecord, Result, SearchParams, SearchResultPage, grade_for,
};
use epc_core::types::record::{FIELD_CURRENT_EFFICIENCY, FIELD_CURRENT_RATING};
use epc_view::{AnalysisOutcome, Comparison};

/// Mean efficiency over a sample and the number of rows it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleAverage {
    /// Arithmetic mean
    pub mean: f64,
    /// Rows in the denominator
    pub count: usize,
}

/// Averages `current-energy-efficiency` over `rows`.
///
/// Returns `None` when nothing is left to average: no rows at all, or under
/// [`AveragingPolicy::SkipMissing`] no row with a numeric score.
pub fn average_efficiency(
    rows: &[CertificateRecord],
    policy: AveragingPolicy,
) -> Option<SampleAverage> {
    let (sum, count) = match policy {
        AveragingPolicy::ZeroFill => (
            rows.iter()
                .map(|r| r.current_efficiency().unwrap_or(0.0))
                .sum::<f64>(),
            rows.len(),
        ),
        AveragingPolicy::SkipMissing => rows
            .iter()
            .filter_map(CertificateRecord::current_efficiency)
            .fold((0.0, 0), |(sum, n), v| (sum + v, n + 1)),
    };

    if count == 0 {
        return None;
    }
    Some(SampleAverage {
        mean: sum / count as f64,
        count,
    })
}

/// Runs the same-postcode comparison for a selected property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisEngine {
    policy: AveragingPolicy,
}

impl AnalysisEngine {
    /// Creates an engine with the given averaging policy.
    pub fn new(policy: AveragingPolicy) -> Self {
        Self { policy }
    }

    /// The averaging policy in use.
    pub fn policy(&self) -> AveragingPolicy {
        self.policy
    }

    /// Analyses `selected` against its postcode.
    ///
    /// Short-circuits without touching the registry when there is no
    /// selected record or it has no postcode. Registry failures are
    /// returned as errors.
    pub async fn run<R>(
        &self,
        registry: &R,
        selected: Option<&SearchResultPage>,
    ) -> Result<AnalysisOutcome>
    where
        R: Registry + ?Sized,
    {
        let Some(record) = selected.and_then(SearchResultPage::first) else {
            tracing::debug!("No selected property to analyse");
            return Ok(AnalysisOutcome::NoData);
        };

        let Some(postcode) = record.postcode() else {
            tracing::debug!(uprn = ?record.uprn(), "Selected property has no postcode");
            return Ok(AnalysisOutcome::NoPostcode);
        };

        tracing::info!(%postcode, "Sampling properties with the same postcode");
        let sample = registry
            .search(&SearchParams::same_postcode(postcode))
            .await?;
        let rows = sample.as_ref().map(|p| p.rows.as_slice()).unwrap_or_default();

        let Some(average) = average_efficiency(rows, self.policy) else {
            tracing::info!(%postcode, rows = rows.len(), "No comparable properties");
            return Ok(AnalysisOutcome::NoComparables);
        };

        if average.count < rows.len() {
            tracing::debug!(
                skipped = rows.len() - average.count,
                "Rows without a numeric efficiency left out of the average"
            );
        }

        Ok(AnalysisOutcome::Comparison(Comparison {
            current_rating: record.non_empty(FIELD_CURRENT_RATING).map(str::to_string),
            current_efficiency: record
                .non_empty(FIELD_CURRENT_EFFICIENCY)
                .map(str::to_string),
            average: average.mean,
            average_band: grade_for(average.mean),
            sample_size: average.count,
        }))
    }
}
