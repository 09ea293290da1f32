//! Seam to the measurement data source.
//!
//! The inspection service supplies the lookup lists that drive the
//! selection form (shifts, materials, operations, gauges) and the raw
//! inspection records for a complete selection. This crate does not talk
//! to the service itself; hosts implement [`InspectionSource`] over their
//! transport, including any retry policy it needs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{analyze, AnalyzeRequest, AnalyzeResult};
use crate::error::{Result, SelectionField, SpcError};
use crate::measurement::RawMeasurement;

/// Date format the inspection service expects in query parameters.
pub const QUERY_DATE_FORMAT: &str = "%d/%m/%Y";

/// A production shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShiftInfo {
    /// Shift identifier, matched against a record's shift code.
    pub shift_id: i64,
    /// Display name.
    pub shift_name: String,
}

/// A material produced in the selected period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MaterialInfo {
    /// Material code.
    pub material_code: String,
    /// Display name.
    pub material_name: String,
}

/// An operation performed on a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationInfo {
    /// Operation code.
    pub operation_code: String,
    /// Display name.
    pub operation_name: String,
}

/// A gauge (inspected characteristic) of an operation.
///
/// The service spells the fields `GuageCode`/`GuageName`; both spellings
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeInfo {
    /// Gauge code.
    #[serde(rename = "GuageCode", alias = "GaugeCode")]
    pub gauge_code: String,
    /// Display name.
    #[serde(rename = "GuageName", alias = "GaugeName")]
    pub gauge_name: String,
}

/// Inclusive date range of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// The range as `FromDate`/`ToDate` query parameters in `dd/MM/yyyy` form.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use u_spc::source::DateRange;
    ///
    /// let range = DateRange::new(
    ///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    /// );
    /// let params = range.query_params();
    /// assert_eq!(params[0], ("FromDate", "01/03/2024".to_string()));
    /// assert_eq!(params[1], ("ToDate", "31/03/2024".to_string()));
    /// ```
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("FromDate", self.from.format(QUERY_DATE_FORMAT).to_string()),
            ("ToDate", self.to.format(QUERY_DATE_FORMAT).to_string()),
        ]
    }
}

/// A complete selection for fetching inspection records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionQuery {
    /// Period to fetch.
    pub range: DateRange,
    /// Selected shifts.
    pub shift_ids: Vec<i64>,
    /// Material code.
    pub material_code: String,
    /// Operation code.
    pub operation_code: String,
    /// Gauge code.
    pub gauge_code: String,
}

impl InspectionQuery {
    /// Checks that every part of the selection is filled in.
    ///
    /// # Errors
    ///
    /// [`SpcError::EmptySelection`] naming the first empty field, checked in
    /// the order shifts, material, operation, gauge.
    pub fn validate(&self) -> Result<()> {
        let missing = if self.shift_ids.is_empty() {
            Some(SelectionField::Shifts)
        } else if self.material_code.trim().is_empty() {
            Some(SelectionField::Material)
        } else if self.operation_code.trim().is_empty() {
            Some(SelectionField::Operation)
        } else if self.gauge_code.trim().is_empty() {
            Some(SelectionField::Gauge)
        } else {
            None
        };
        match missing {
            Some(field) => Err(SpcError::EmptySelection { field }),
            None => Ok(()),
        }
    }

    /// Query parameters for the inspection-data request; the shift ids
    /// travel separately as the request body.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = self.range.query_params().into();
        params.push(("MaterialCode", self.material_code.clone()));
        params.push(("OperationCode", self.operation_code.clone()));
        params.push(("GuageCode", self.gauge_code.clone()));
        params
    }
}

/// Supplier of lookup lists and inspection records.
///
/// Each lookup narrows on the selections made before it, mirroring the
/// cascading selection form.
pub trait InspectionSource {
    /// Transport or decoding failure.
    type Error: std::fmt::Display;

    /// All shifts.
    fn shifts(&self) -> std::result::Result<Vec<ShiftInfo>, Self::Error>;

    /// Materials with inspections in `range` on the given shifts.
    fn materials(
        &self,
        range: DateRange,
        shift_ids: &[i64],
    ) -> std::result::Result<Vec<MaterialInfo>, Self::Error>;

    /// Operations for a material.
    fn operations(
        &self,
        range: DateRange,
        material_code: &str,
        shift_ids: &[i64],
    ) -> std::result::Result<Vec<OperationInfo>, Self::Error>;

    /// Gauges for a material and operation.
    fn gauges(
        &self,
        range: DateRange,
        material_code: &str,
        operation_code: &str,
        shift_ids: &[i64],
    ) -> std::result::Result<Vec<GaugeInfo>, Self::Error>;

    /// Inspection records matching a complete selection.
    fn inspection_data(
        &self,
        query: &InspectionQuery,
    ) -> std::result::Result<Vec<RawMeasurement>, Self::Error>;
}

/// Validates the selection, fetches its records and analyzes them.
///
/// # Errors
///
/// [`SpcError::EmptySelection`] for an incomplete selection,
/// [`SpcError::Source`] if the fetch fails, otherwise whatever [`analyze`]
/// reports.
pub fn run_analysis<S: InspectionSource>(
    source: &S,
    query: &InspectionQuery,
    subgroup_size: usize,
) -> Result<AnalyzeResult> {
    query.validate()?;

    let measurements = source
        .inspection_data(query)
        .map_err(|e| SpcError::Source(e.to_string()))?;
    debug!(
        records = measurements.len(),
        material = %query.material_code,
        operation = %query.operation_code,
        gauge = %query.gauge_code,
        "fetched inspection records"
    );

    analyze(&AnalyzeRequest::new(
        measurements,
        query.shift_ids.clone(),
        subgroup_size,
    ))
}
