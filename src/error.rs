//! Error types for the analysis pipeline.

use std::fmt;

use thiserror::Error;

/// A required piece of the filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    /// The set of shifts to include.
    Shifts,
    /// The material code.
    Material,
    /// The operation code.
    Operation,
    /// The gauge code.
    Gauge,
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionField::Shifts => "shift",
            SelectionField::Material => "material",
            SelectionField::Operation => "operation",
            SelectionField::Gauge => "gauge",
        };
        f.write_str(name)
    }
}

/// Failure of one analysis invocation.
///
/// Errors are local to the invocation that raised them. Non-finite
/// arithmetic is never reported here; it degrades to `0` in the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpcError {
    /// A required selection is empty.
    #[error("please select all required fields: no {field} selected")]
    EmptySelection {
        /// The field that was left empty.
        field: SelectionField,
    },

    /// No record survived filtering.
    #[error("no valid data available for analysis")]
    NoValidData,

    /// Not enough valid values to form one complete subgroup.
    #[error(
        "insufficient data for subgroup size {subgroup_size}: {valid_count} valid value(s)"
    )]
    InsufficientData {
        /// Requested subgroup size.
        subgroup_size: usize,
        /// Number of valid values supplied to the subgroup builder.
        valid_count: usize,
    },

    /// Subgroup size outside the control-chart constants table.
    #[error("unsupported subgroup size {0}: expected 1..=5")]
    UnsupportedSubgroupSize(usize),

    /// The measurement data source failed.
    #[error("data source error: {0}")]
    Source(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpcError>;
