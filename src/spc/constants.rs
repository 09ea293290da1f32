//! Control-chart factors and the supported subgroup sizes.
//!
//! The factor table covers subgroup sizes 1 through 5, the sizes the
//! inspection report offers. Index 0 corresponds to n = 1.
//!
//! The A2 column reproduces the values the report has always used. They sit
//! one row below the ASTM E2587 table (which gives A2 = 1.880 for n = 2),
//! so published reports stay reproducible.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587: Standard Practice for Use of Control Charts

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpcError};

/// Smallest supported subgroup size.
pub const MIN_SUBGROUP_SIZE: usize = 1;

/// Largest supported subgroup size.
pub const MAX_SUBGROUP_SIZE: usize = 5;

/// Factors for X-bar and Range chart limits at one subgroup size.
///
/// - X-bar chart: UCL/LCL = X-double-bar +/- A2 * R-bar
/// - R chart: UCL = D4 * R-bar, LCL = D3 * R-bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlChartConstants {
    /// A2 factor for X-bar limits.
    pub a2: f64,
    /// D3 factor for the R chart lower limit.
    pub d3: f64,
    /// D4 factor for the R chart upper limit.
    pub d4: f64,
}

const TABLE: [ControlChartConstants; MAX_SUBGROUP_SIZE] = [
    ControlChartConstants { a2: 1.880, d3: 0.0, d4: 3.267 },
    ControlChartConstants { a2: 1.023, d3: 0.0, d4: 3.267 },
    ControlChartConstants { a2: 0.729, d3: 0.0, d4: 2.575 },
    ControlChartConstants { a2: 0.577, d3: 0.0, d4: 2.282 },
    ControlChartConstants { a2: 0.483, d3: 0.0, d4: 2.115 },
];

impl ControlChartConstants {
    /// Looks up the factors for subgroup size `n`.
    ///
    /// # Errors
    ///
    /// [`SpcError::UnsupportedSubgroupSize`] if `n` is outside `1..=5`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_spc::spc::ControlChartConstants;
    ///
    /// let c = ControlChartConstants::for_size(4).unwrap();
    /// assert_eq!(c.a2, 0.577);
    /// assert!(ControlChartConstants::for_size(6).is_err());
    /// ```
    pub fn for_size(n: usize) -> Result<Self> {
        SubgroupSize::new(n).map(SubgroupSize::constants)
    }
}

/// A subgroup size validated against the factor table.
///
/// Defaults to 1 (individual observations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SubgroupSize(usize);

impl SubgroupSize {
    /// Validates `n`.
    ///
    /// # Errors
    ///
    /// [`SpcError::UnsupportedSubgroupSize`] if `n` is outside `1..=5`.
    pub fn new(n: usize) -> Result<Self> {
        if (MIN_SUBGROUP_SIZE..=MAX_SUBGROUP_SIZE).contains(&n) {
            Ok(Self(n))
        } else {
            Err(SpcError::UnsupportedSubgroupSize(n))
        }
    }

    /// The size as a plain integer.
    pub fn get(self) -> usize {
        self.0
    }

    /// Control-chart factors for this size.
    pub fn constants(self) -> ControlChartConstants {
        TABLE[self.0 - MIN_SUBGROUP_SIZE]
    }

    /// Divisor turning R-bar into a sigma estimate for sizes above 1.
    ///
    /// Uses 1.128 (the tabulated d2) for n = 2 and `sqrt(n)` for larger
    /// subgroups. `sqrt(n)` is an approximation, not the tabulated d2
    /// (1.693, 2.059, 2.326 for n = 3, 4, 5); it is kept so capability
    /// figures match previously issued reports. For n = 1 the sigma comes
    /// from the subgroup means instead and this returns 1.
    pub fn d2(self) -> f64 {
        match self.0 {
            1 => 1.0,
            2 => 1.128,
            n => (n as f64).sqrt(),
        }
    }
}

impl Default for SubgroupSize {
    fn default() -> Self {
        Self(MIN_SUBGROUP_SIZE)
    }
}

impl TryFrom<usize> for SubgroupSize {
    type Error = SpcError;

    fn try_from(n: usize) -> Result<Self> {
        Self::new(n)
    }
}

impl From<SubgroupSize> for usize {
    fn from(size: SubgroupSize) -> Self {
        size.0
    }
}
