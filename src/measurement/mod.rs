//! Inspection records and the measurement filter.
//!
//! The data source delivers records with textual numeric fields; this
//! module parses them and keeps only the ones usable for analysis.
//!
//! - [`RawMeasurement`]: record as received (string or number fields)
//! - [`Measurement`]: parsed record with a finite actual value
//! - [`filter_measurements`]: shift selection plus numeric validation

mod filter;
mod record;

pub use filter::filter_measurements;
pub use record::{Measurement, NumericField, RawMeasurement};
