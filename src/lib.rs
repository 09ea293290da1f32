//! # u-spc
//!
//! Statistical process control (SPC) report engine for dimensional
//! inspection data: X-bar/R control charts, process capability and the
//! distribution of measured values.
//!
//! The engine is a pure, synchronous computation. It takes a snapshot of
//! inspection records plus a selection and returns a complete result; it
//! performs no I/O and keeps no state between calls.
//!
//! ## Pipeline
//!
//! 1. [`measurement`]: Filter records by shift and numeric validity
//! 2. [`spc`]: Subgroups, X-bar/R series and control limits (n = 1..=5)
//! 3. [`capability`]: Cp, Cpk, Pp, Ppk against the specification limits
//! 4. [`distribution`]: Square-root-rule histogram of the measured values
//!
//! [`analysis::analyze`] runs all four; [`source`] defines the seam to the
//! inspection service that supplies the records.
//!
//! ## Design Philosophy
//!
//! - **Degrade, don't fail**: non-finite figures are reported as `0`
//! - **Report-compatible**: factors and sigma estimate reproduce the
//!   figures of previously issued reports
//! - **Numerical stability**: Leverages `u-numflow` for stable statistics

pub mod analysis;
pub mod capability;
pub mod distribution;
pub mod error;
pub mod measurement;
mod numeric;
pub mod source;
pub mod spc;

pub use analysis::{analyze, AnalyzeRequest, AnalyzeResult};
pub use error::{Result, SelectionField, SpcError};
