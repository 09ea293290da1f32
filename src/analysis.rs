//! The analysis pipeline: filter, subgroup, limits, capability, distribution.
//!
//! [`analyze`] is a pure function of its request. It keeps no state between
//! calls, so running it twice on the same request yields identical results.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capability::{CapabilityMetrics, SpecLimits};
use crate::distribution::Distribution;
use crate::error::{Result, SelectionField, SpcError};
use crate::measurement::{filter_measurements, RawMeasurement};
use crate::spc::{build_subgroups, ControlChartData, SubgroupSize, SubgroupStatistics};

/// Input snapshot for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Inspection records, in measurement order.
    pub measurements: Vec<RawMeasurement>,
    /// Shifts to include; must not be empty.
    pub selected_shift_ids: Vec<i64>,
    /// Subgroup size, 1 through 5.
    pub subgroup_size: usize,
}

impl AnalyzeRequest {
    /// Creates a request.
    pub fn new(
        measurements: Vec<RawMeasurement>,
        selected_shift_ids: Vec<i64>,
        subgroup_size: usize,
    ) -> Self {
        Self {
            measurements,
            selected_shift_ids,
            subgroup_size,
        }
    }
}

/// Output of one analysis run, consumed by chart and report renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    /// Capability figures.
    pub metrics: CapabilityMetrics,
    /// X-bar and Range chart series and limits.
    pub control_charts: ControlChartData,
    /// Histogram of the filtered values with summary stats.
    pub distribution: Distribution,
}

/// Runs the full analysis on a request.
///
/// # Errors
///
/// - [`SpcError::EmptySelection`] if no shift is selected
/// - [`SpcError::UnsupportedSubgroupSize`] if the size is outside `1..=5`
/// - [`SpcError::NoValidData`] if no record passes the filter
/// - [`SpcError::InsufficientData`] if no complete subgroup can be formed
///
/// # Examples
///
/// ```
/// use u_spc::analysis::{analyze, AnalyzeRequest};
/// use u_spc::measurement::RawMeasurement;
///
/// let measurements = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0]
///     .iter()
///     .map(|&v| RawMeasurement::new(v, 5.0, 15.0, 1))
///     .collect();
/// let result = analyze(&AnalyzeRequest::new(measurements, vec![1], 3)).unwrap();
///
/// let limits = result.control_charts.limits;
/// assert_eq!(result.control_charts.x_bar_series.len(), 2);
/// assert_eq!(limits.x_bar_ucl, 10.0);
/// assert_eq!(limits.x_bar_lcl, 10.0);
/// assert_eq!(limits.range_ucl, 0.0);
/// assert_eq!(result.distribution.stats.target, 10.0);
/// ```
pub fn analyze(request: &AnalyzeRequest) -> Result<AnalyzeResult> {
    debug!(
        records = request.measurements.len(),
        shifts = ?request.selected_shift_ids,
        subgroup_size = request.subgroup_size,
        "starting SPC analysis"
    );

    if request.selected_shift_ids.is_empty() {
        return Err(SpcError::EmptySelection {
            field: SelectionField::Shifts,
        });
    }
    let size = SubgroupSize::new(request.subgroup_size)?;

    let measurements = filter_measurements(&request.measurements, &request.selected_shift_ids)?;
    let spec = measurements
        .first()
        .map(SpecLimits::from_measurement)
        .ok_or(SpcError::NoValidData)?;
    let values: Vec<f64> = measurements.iter().map(|m| m.actual_value).collect();

    let subgroups = build_subgroups(&values, size)?;
    let stats = SubgroupStatistics::from_subgroups(&subgroups, size)?;

    let control_charts = ControlChartData::compute(&stats, size);
    let metrics = CapabilityMetrics::compute(&stats, spec, size);
    let distribution = Distribution::compute(&values, &metrics, spec);

    debug!(
        subgroups = stats.len(),
        cp = metrics.cp,
        cpk = metrics.cpk,
        bins = distribution.bin_count,
        "SPC analysis complete"
    );

    Ok(AnalyzeResult {
        metrics,
        control_charts,
        distribution,
    })
}
