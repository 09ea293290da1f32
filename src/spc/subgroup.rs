//! Subgroup builder: consecutive fixed-size windows over the measurement series.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use u_numflow::stats;

use super::constants::SubgroupSize;
use crate::error::{Result, SpcError};

/// One complete subgroup of consecutive measurements.
///
/// # Invariants
///
/// - `values.len()` equals the subgroup size it was built with
/// - `mean` and `range` are finite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgroup {
    /// The measurements, in their original order.
    pub values: Vec<f64>,
    /// Arithmetic mean of `values`.
    pub mean: f64,
    /// `max - min` of `values`.
    pub range: f64,
}

impl Subgroup {
    /// Builds a subgroup from a window, or `None` if its mean or range is
    /// not finite.
    fn from_window(window: &[f64]) -> Option<Self> {
        let mean = stats::mean(window)?;
        let range = window_range(window);
        if !mean.is_finite() || !range.is_finite() {
            return None;
        }
        Some(Self {
            values: window.to_vec(),
            mean,
            range,
        })
    }
}

/// Partitions `values` into consecutive non-overlapping subgroups of `size`.
///
/// A trailing window shorter than `size` is discarded, and so is any window
/// whose mean or range is not finite. Output order follows input order and
/// indexes the chart X-axis.
///
/// # Errors
///
/// [`SpcError::InsufficientData`] if no complete subgroup results.
///
/// # Examples
///
/// ```
/// use u_spc::spc::{build_subgroups, SubgroupSize};
///
/// let size = SubgroupSize::new(2).unwrap();
/// let groups = build_subgroups(&[1.0, 3.0, 2.0, 2.0, 9.0], size).unwrap();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].mean, 2.0);
/// assert_eq!(groups[0].range, 2.0);
/// assert_eq!(groups[1].range, 0.0);
/// ```
pub fn build_subgroups(values: &[f64], size: SubgroupSize) -> Result<Vec<Subgroup>> {
    let n = size.get();
    let windows = values.chunks_exact(n);
    let leftover = windows.remainder().len();

    let mut subgroups = Vec::with_capacity(values.len() / n);
    for (i, window) in windows.enumerate() {
        match Subgroup::from_window(window) {
            Some(sg) => subgroups.push(sg),
            None => warn!(subgroup = i + 1, "dropping subgroup with non-finite statistics"),
        }
    }

    debug!(
        values = values.len(),
        subgroup_size = n,
        subgroups = subgroups.len(),
        leftover,
        "built subgroups"
    );

    if subgroups.is_empty() {
        return Err(SpcError::InsufficientData {
            subgroup_size: n,
            valid_count: values.len(),
        });
    }
    Ok(subgroups)
}

/// Per-subgroup series and their averages.
///
/// Feeds both the control limits and the capability estimate; the averages
/// are kept unrounded.
#[derive(Debug, Clone, PartialEq)]
pub struct SubgroupStatistics {
    /// Subgroup means in chart order.
    pub means: Vec<f64>,
    /// Subgroup ranges in chart order.
    pub ranges: Vec<f64>,
    /// Average of the subgroup means (X-double-bar).
    pub grand_mean: f64,
    /// Average of the subgroup ranges (R-bar).
    pub range_mean: f64,
}

impl SubgroupStatistics {
    /// Summarizes a subgroup sequence.
    ///
    /// An average that cannot be formed (overflow) is stored as NaN and is
    /// reported as `0` downstream.
    ///
    /// # Errors
    ///
    /// [`SpcError::InsufficientData`] if `subgroups` is empty.
    pub fn from_subgroups(subgroups: &[Subgroup], size: SubgroupSize) -> Result<Self> {
        if subgroups.is_empty() {
            return Err(SpcError::InsufficientData {
                subgroup_size: size.get(),
                valid_count: 0,
            });
        }
        let means: Vec<f64> = subgroups.iter().map(|sg| sg.mean).collect();
        let ranges: Vec<f64> = subgroups.iter().map(|sg| sg.range).collect();
        let grand_mean = stats::mean(&means).unwrap_or(f64::NAN);
        let range_mean = stats::mean(&ranges).unwrap_or(f64::NAN);

        Ok(Self {
            means,
            ranges,
            grand_mean,
            range_mean,
        })
    }

    /// Number of subgroups.
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// Always `false` for values built by [`SubgroupStatistics::from_subgroups`].
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

/// `max - min` of a window.
fn window_range(window: &[f64]) -> f64 {
    let max = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = window.iter().cloned().fold(f64::INFINITY, f64::min);
    max - min
}
