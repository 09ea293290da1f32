//! Statistical Process Control (SPC) chart data.
//!
//! Turns the filtered measurement series into X-bar and Range chart data.
//!
//! # Stages
//!
//! - [`build_subgroups`]: consecutive fixed-size subgroups (n = 1..=5)
//! - [`SubgroupStatistics`]: subgroup means, ranges and their averages
//! - [`ControlLimits`] / [`ControlChartData`]: X-bar/R limits and plotted series
//!
//! # Factors
//!
//! - [`ControlChartConstants`]: A2, D3, D4 keyed by [`SubgroupSize`]
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587: Standard Practice for Use of Control Charts

mod constants;
mod limits;
mod subgroup;

pub use constants::{ControlChartConstants, SubgroupSize, MAX_SUBGROUP_SIZE, MIN_SUBGROUP_SIZE};
pub use limits::{ChartPoint, ControlChartData, ControlLimits};
pub use subgroup::{build_subgroups, Subgroup, SubgroupStatistics};
