//! X-bar and Range chart data: plotted series and control limits.
//!
//! # Algorithm
//!
//! 1. For each subgroup, take its mean (X-bar) and range (R).
//! 2. Average them into the grand mean (X-double-bar) and R-bar.
//! 3. X-bar limits: UCL/LCL = X-double-bar +/- A2 * R-bar.
//! 4. R limits: UCL = D4 * R-bar, LCL = D3 * R-bar.
//!
//! # Reference
//!
//! Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//! Chapter 6: Control Charts for Variables.

use serde::{Deserialize, Serialize};

use super::constants::SubgroupSize;
use super::subgroup::SubgroupStatistics;
use crate::numeric::round_metric;

/// Control limits for the X-bar and Range charts.
///
/// All values are finite and rounded to 4 decimals; a limit that cannot be
/// computed is reported as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlLimits {
    /// X-bar chart upper control limit.
    pub x_bar_ucl: f64,
    /// X-bar chart lower control limit.
    pub x_bar_lcl: f64,
    /// X-bar chart center line (grand mean).
    pub x_bar_mean: f64,
    /// Range chart upper control limit.
    pub range_ucl: f64,
    /// Range chart lower control limit.
    pub range_lcl: f64,
    /// Range chart center line (R-bar).
    pub range_mean: f64,
}

impl ControlLimits {
    /// Computes the limits from subgroup statistics.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_spc::spc::{build_subgroups, ControlLimits, SubgroupSize, SubgroupStatistics};
    ///
    /// let size = SubgroupSize::new(5).unwrap();
    /// let groups = build_subgroups(&[45.0, 47.0, 50.0, 53.0, 55.0], size).unwrap();
    /// let stats = SubgroupStatistics::from_subgroups(&groups, size).unwrap();
    /// let limits = ControlLimits::compute(&stats, size);
    ///
    /// // UCL = 50 + 0.483 * 10
    /// assert_eq!(limits.x_bar_ucl, 54.83);
    /// assert_eq!(limits.range_mean, 10.0);
    /// ```
    pub fn compute(stats: &SubgroupStatistics, size: SubgroupSize) -> Self {
        let c = size.constants();
        let x_bar = stats.grand_mean;
        let r_bar = stats.range_mean;

        Self {
            x_bar_ucl: round_metric(x_bar + c.a2 * r_bar),
            x_bar_lcl: round_metric(x_bar - c.a2 * r_bar),
            x_bar_mean: round_metric(x_bar),
            range_ucl: round_metric(c.d4 * r_bar),
            range_lcl: round_metric(c.d3 * r_bar),
            range_mean: round_metric(r_bar),
        }
    }
}

/// A single plotted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// One-based subgroup position on the X-axis.
    pub index: usize,
    /// The plotted statistic (subgroup mean or range).
    pub value: f64,
}

/// Everything the chart renderer needs for the X-bar and Range charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlChartData {
    /// Subgroup means.
    pub x_bar_series: Vec<ChartPoint>,
    /// Subgroup ranges.
    pub range_series: Vec<ChartPoint>,
    /// Limits for both charts.
    pub limits: ControlLimits,
}

impl ControlChartData {
    /// Builds both series and their limits.
    pub fn compute(stats: &SubgroupStatistics, size: SubgroupSize) -> Self {
        Self {
            x_bar_series: series(&stats.means),
            range_series: series(&stats.ranges),
            limits: ControlLimits::compute(stats, size),
        }
    }
}

fn series(values: &[f64]) -> Vec<ChartPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| ChartPoint {
            index: i + 1,
            value,
        })
        .collect()
}
