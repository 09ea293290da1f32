//! Process capability indices (Cp, Cpk, Pp, Ppk) for one analysis run.
//!
//! Only one dispersion estimate is formed from the available data, so the
//! long-term indices (Pp, Ppk) carry the same values as the short-term ones
//! (Cp, Cpk), and the overall and within standard deviations are equal.
//!
//! # Sigma estimate
//!
//! - n = 1: sample standard deviation (n - 1 divisor) of the subgroup means
//! - n > 1: R-bar / d2, with d2 from [`SubgroupSize::d2`]
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41--52.

use serde::{Deserialize, Serialize};
use u_numflow::stats;

use crate::measurement::Measurement;
use crate::numeric::round_metric;
use crate::spc::{SubgroupSize, SubgroupStatistics};

/// Specification limits of a run.
///
/// A run's limits are taken from its first valid measurement and assumed
/// constant across the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecLimits {
    /// Lower specification limit.
    pub lsl: f64,
    /// Upper specification limit.
    pub usl: f64,
}

impl SpecLimits {
    /// Creates limits from explicit values.
    pub fn new(lsl: f64, usl: f64) -> Self {
        Self { lsl, usl }
    }

    /// Takes the limits recorded on a measurement.
    pub fn from_measurement(m: &Measurement) -> Self {
        Self {
            lsl: m.lower_spec,
            usl: m.upper_spec,
        }
    }

    /// Midpoint of the tolerance band, `(usl + lsl) / 2`.
    pub fn target(&self) -> f64 {
        (self.usl + self.lsl) / 2.0
    }
}

/// Capability figures reported for a run.
///
/// All values are finite and rounded to 4 decimals; any figure that cannot
/// be computed (for example Cp when sigma is zero) is reported as `0`.
///
/// # Index interpretation
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cp/Pp | >= 1.33 | Process is capable |
/// | Cpk/Ppk | >= 1.33 | Process is capable and centered |
///
/// See [`Interpretation`](super::Interpretation) for the report wording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityMetrics {
    /// Grand mean of the subgroup means.
    pub x_bar: f64,
    /// Overall standard deviation (same estimate as `std_dev_within`).
    pub std_dev_overall: f64,
    /// Within-subgroup standard deviation.
    pub std_dev_within: f64,
    /// Average subgroup range (R-bar).
    pub moving_range: f64,
    /// Cp = (USL - LSL) / (6 * sigma).
    pub cp: f64,
    /// Cpu = (USL - mean) / (3 * sigma).
    #[serde(rename = "cpkUpper")]
    pub cpu: f64,
    /// Cpl = (mean - LSL) / (3 * sigma).
    #[serde(rename = "cpkLower")]
    pub cpl: f64,
    /// Cpk = min(Cpu, Cpl).
    pub cpk: f64,
    /// Pp, equal to Cp.
    pub pp: f64,
    /// Ppu, equal to Cpu.
    pub ppu: f64,
    /// Ppl, equal to Cpl.
    pub ppl: f64,
    /// Ppk, equal to Cpk.
    pub ppk: f64,
    /// Lower specification limit.
    pub lsl: f64,
    /// Upper specification limit.
    pub usl: f64,
}

impl CapabilityMetrics {
    /// Computes the capability figures for a run.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_spc::capability::{CapabilityMetrics, SpecLimits};
    /// use u_spc::spc::{build_subgroups, SubgroupSize, SubgroupStatistics};
    ///
    /// let size = SubgroupSize::new(2).unwrap();
    /// let data = [9.9, 10.1, 10.0, 10.2, 9.8, 10.0];
    /// let groups = build_subgroups(&data, size).unwrap();
    /// let stats = SubgroupStatistics::from_subgroups(&groups, size).unwrap();
    ///
    /// let m = CapabilityMetrics::compute(&stats, SpecLimits::new(9.0, 11.0), size);
    /// assert!(m.cp > 1.33);
    /// assert_eq!(m.cpk, m.cpu.min(m.cpl));
    /// assert_eq!(m.pp, m.cp);
    /// ```
    pub fn compute(stats: &SubgroupStatistics, spec: SpecLimits, size: SubgroupSize) -> Self {
        let sigma = estimate_sigma(stats, size);
        let mean = stats.grand_mean;
        let SpecLimits { lsl, usl } = spec;

        let cp = round_metric((usl - lsl) / (6.0 * sigma));
        let cpu = round_metric((usl - mean) / (3.0 * sigma));
        let cpl = round_metric((mean - lsl) / (3.0 * sigma));
        // cpu and cpl are already rounded and finite
        let cpk = cpu.min(cpl);

        Self {
            x_bar: round_metric(mean),
            std_dev_overall: round_metric(sigma),
            std_dev_within: round_metric(sigma),
            moving_range: round_metric(stats.range_mean),
            cp,
            cpu,
            cpl,
            cpk,
            pp: cp,
            ppu: cpu,
            ppl: cpl,
            ppk: cpk,
            lsl: round_metric(lsl),
            usl: round_metric(usl),
        }
    }
}

/// Estimates the process standard deviation from subgroup statistics.
///
/// Returns NaN when no estimate exists (a single subgroup at n = 1); the
/// figures derived from it are then reported as `0`.
pub fn estimate_sigma(stats: &SubgroupStatistics, size: SubgroupSize) -> f64 {
    if size.get() == 1 {
        stats::std_dev(&stats.means).unwrap_or(f64::NAN)
    } else {
        stats.range_mean / size.d2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spc::build_subgroups;

    fn stats_for(data: &[f64], n: usize) -> (SubgroupStatistics, SubgroupSize) {
        let size = SubgroupSize::new(n).expect("valid size");
        let groups = build_subgroups(data, size).expect("enough data");
        let stats = SubgroupStatistics::from_subgroups(&groups, size).expect("non-empty");
        (stats, size)
    }

    #[test]
    fn individuals_use_sample_std_dev() {
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let (stats, size) = stats_for(&data, 1);

        let sigma = estimate_sigma(&stats, size);
        assert!((sigma - 3.02765).abs() < 1e-4, "sigma = {sigma}");

        let m = CapabilityMetrics::compute(&stats, SpecLimits::new(0.0, 11.0), size);
        assert!((m.cp - 0.6055).abs() < 1e-3, "cp = {}", m.cp);
        assert_eq!(m.x_bar, 5.5);
        assert_eq!(m.std_dev_overall, 3.0277);
        assert_eq!(m.std_dev_within, m.std_dev_overall);
        assert_eq!(m.cpu, m.cpl);
        assert_eq!(m.cpk, m.cpu);
    }

    #[test]
    fn n2_uses_d2_1128() {
        let (stats, size) = stats_for(&[10.0, 11.128, 10.0, 11.128], 2);
        let sigma = estimate_sigma(&stats, size);
        assert!((sigma - 1.0).abs() < 1e-9, "sigma = {sigma}");
    }

    #[test]
    fn larger_subgroups_use_sqrt_n() {
        let (stats, size) = stats_for(&[0.0, 2.0, 1.0, 1.0], 4);
        // R-bar = 2, d2 ~ sqrt(4) = 2
        assert!((estimate_sigma(&stats, size) - 1.0).abs() < 1e-12);

        let m = CapabilityMetrics::compute(&stats, SpecLimits::new(-5.0, 7.0), size);
        // mean 1, sigma 1
        assert_eq!(m.cp, 2.0);
        assert_eq!(m.cpu, 2.0);
        assert_eq!(m.cpl, 2.0);
        assert_eq!(m.moving_range, 2.0);
    }

    #[test]
    fn off_center_cpk_is_lower_side() {
        let (stats, size) = stats_for(&[8.0, 10.0, 8.0, 10.0], 2);
        // mean 9, R-bar 2, sigma = 2 / 1.128
        let m = CapabilityMetrics::compute(&stats, SpecLimits::new(0.0, 12.0), size);
        assert!(m.cpu < m.cpl);
        assert_eq!(m.cpk, m.cpu);
        assert_eq!(m.ppk, m.cpk);
        assert_eq!(m.ppu, m.cpu);
        assert_eq!(m.ppl, m.cpl);
    }

    #[test]
    fn zero_spread_degrades_to_zero() {
        for n in 1..=5 {
            let data = vec![10.0; n * 3];
            let (stats, size) = stats_for(&data, n);
            let m = CapabilityMetrics::compute(&stats, SpecLimits::new(5.0, 15.0), size);
            assert_eq!(m.std_dev_overall, 0.0, "n = {n}");
            assert_eq!(m.cp, 0.0, "n = {n}");
            assert_eq!(m.cpk, 0.0, "n = {n}");
            assert_eq!(m.pp, 0.0, "n = {n}");
            assert_eq!(m.ppk, 0.0, "n = {n}");
            assert_eq!(m.x_bar, 10.0);
        }
    }

    #[test]
    fn single_individual_has_no_sigma() {
        let (stats, size) = stats_for(&[4.2], 1);
        assert!(estimate_sigma(&stats, size).is_nan());
        let m = CapabilityMetrics::compute(&stats, SpecLimits::new(4.0, 5.0), size);
        assert_eq!(m.std_dev_overall, 0.0);
        assert_eq!(m.cp, 0.0);
        assert_eq!(m.x_bar, 4.2);
    }

    #[test]
    fn unreadable_spec_degrades_to_zero() {
        let (stats, size) = stats_for(&[1.0, 2.0, 3.0], 1);
        let m = CapabilityMetrics::compute(&stats, SpecLimits::new(f64::NAN, 4.0), size);
        assert_eq!(m.lsl, 0.0);
        assert_eq!(m.cp, 0.0);
        assert_eq!(m.cpl, 0.0);
        assert!(m.cpu > 0.0);
    }

    #[test]
    fn target_is_midpoint() {
        assert_eq!(SpecLimits::new(9.0, 11.0).target(), 10.0);
    }

    #[test]
    fn wire_names() {
        let (stats, size) = stats_for(&[1.0, 2.0, 3.0], 1);
        let m = CapabilityMetrics::compute(&stats, SpecLimits::new(0.0, 4.0), size);
        let json = serde_json::to_value(m).unwrap();
        for key in [
            "xBar", "stdDevOverall", "stdDevWithin", "movingRange", "cp", "cpkUpper",
            "cpkLower", "cpk", "pp", "ppu", "ppl", "ppk", "lsl", "usl",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
