//! Distribution of the measured values: histogram binning and summary stats.
//!
//! The histogram uses the square-root rule, k = ⌈√n⌉ bins of equal width
//! spanning `[min, max]` of the values.
//!
//! # Examples
//!
//! ```
//! use u_spc::distribution::sqrt_histogram;
//!
//! let data = [1.0, 2.0, 2.5, 3.0, 4.0, 5.0, 5.0, 6.0, 7.0];
//! let hist = sqrt_histogram(&data);
//! assert_eq!(hist.bin_count, 3);
//! let total: usize = hist.bins.iter().map(|b| b.count).sum();
//! assert_eq!(total, data.len());
//! ```

use serde::{Deserialize, Serialize};

use crate::capability::{CapabilityMetrics, SpecLimits};
use crate::numeric::round_metric;

/// One histogram bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionBin {
    /// Midpoint of the bin interval.
    pub center: f64,
    /// Number of values falling in the bin.
    pub count: usize,
}

/// Result of histogram binning.
///
/// # Invariants
///
/// - `bins.len() == bin_count` whenever at least one finite value was given
/// - all bins share `bin_width`
/// - the counts sum to the number of finite input values
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bins in ascending order, including empty ones.
    pub bins: Vec<DistributionBin>,
    /// Number of bins.
    pub bin_count: usize,
    /// Common bin width (`1` when all values are equal).
    pub bin_width: f64,
    /// Smallest finite value, or NaN if there is none.
    pub min: f64,
    /// Largest finite value, or NaN if there is none.
    pub max: f64,
}

/// Bins `values` into ⌈√n⌉ equal-width bins over their range.
///
/// Non-finite values are ignored and `n` counts finite values only; at
/// least one bin is produced whenever a finite value exists. When every
/// value is equal the width is forced to `1` so all values land in the
/// first bin. A value's bin is `floor((value - min) / width)`, clamped to
/// the last bin so the maximum is counted.
///
/// An input without finite values yields no bins and `bin_count == 0`.
pub fn sqrt_histogram(values: &[f64]) -> Histogram {
    let valid: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if valid.is_empty() {
        return Histogram {
            bins: Vec::new(),
            bin_count: 0,
            bin_width: 0.0,
            min: f64::NAN,
            max: f64::NAN,
        };
    }

    let bin_count = ((valid.len() as f64).sqrt().ceil() as usize).max(1);
    let min = valid.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = valid.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let raw_width = (max - min) / bin_count as f64;
    let bin_width = if raw_width == 0.0 || !raw_width.is_finite() {
        1.0
    } else {
        raw_width
    };

    let mut counts = vec![0_usize; bin_count];
    for &x in &valid {
        let bin = ((x - min) / bin_width).floor() as usize;
        let bin = bin.min(bin_count - 1); // the maximum sits on the upper edge
        counts[bin] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| DistributionBin {
            center: min + i as f64 * bin_width + bin_width / 2.0,
            count,
        })
        .collect();

    Histogram {
        bins,
        bin_count,
        bin_width,
        min,
        max,
    }
}

/// Summary figures drawn over the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionStats {
    /// Process mean.
    pub mean: f64,
    /// Process standard deviation.
    pub std_dev: f64,
    /// Nominal target, the midpoint of the specification limits.
    pub target: f64,
}

/// Histogram plus summary, as handed to the distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    /// Histogram bins.
    pub bins: Vec<DistributionBin>,
    /// Mean, standard deviation and target.
    pub stats: DistributionStats,
    /// Number of bins.
    pub bin_count: usize,
}

impl Distribution {
    /// Bins the raw values and attaches the run's mean, sigma and target.
    ///
    /// Mean and sigma come from the capability figures so the chart and the
    /// metrics agree; all stats are rounded to 4 decimals.
    pub fn compute(values: &[f64], metrics: &CapabilityMetrics, spec: SpecLimits) -> Self {
        let hist = sqrt_histogram(values);
        Self {
            bins: hist.bins,
            stats: DistributionStats {
                mean: metrics.x_bar,
                std_dev: metrics.std_dev_overall,
                target: round_metric(spec.target()),
            },
            bin_count: hist.bin_count,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn counts_sum_to_n(
            data in proptest::collection::vec(-1e3_f64..1e3, 1..=200)
        ) {
            let h = sqrt_histogram(&data);
            let total: usize = h.bins.iter().map(|b| b.count).sum();
            prop_assert_eq!(total, data.len());
            prop_assert_eq!(h.bins.len(), h.bin_count);
            prop_assert!(h.bin_count >= 1);
        }

        #[test]
        fn duplicates_and_edges_are_counted(
            base in proptest::collection::vec(-10_i32..10, 1..=50),
        ) {
            // integer-valued data hits bin edges exactly
            let data: Vec<f64> = base.iter().map(|&v| f64::from(v)).collect();
            let h = sqrt_histogram(&data);
            let total: usize = h.bins.iter().map(|b| b.count).sum();
            prop_assert_eq!(total, data.len());
        }
    }
}
