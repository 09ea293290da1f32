//! Process capability analysis.
//!
//! Relates the run's specification limits to its spread and centering.
//!
//! # Indices
//!
//! - **Cp**: Potential capability (spread vs tolerance)
//! - **Cpk**: Actual capability (centering considered)
//! - **Pp**, **Ppk**: Reported alongside, equal to Cp and Cpk (single sigma estimate)
//!
//! # Interpretation
//!
//! - [`Interpretation`]: 1.33-threshold verdicts and report wording
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod indices;
mod interpretation;

pub use indices::{estimate_sigma, CapabilityMetrics, SpecLimits};
pub use interpretation::{Interpretation, Verdict, CAPABILITY_THRESHOLD};
