//! Measurement filter: narrows raw records to the analyzable subset.

use tracing::{debug, warn};

use super::record::{Measurement, RawMeasurement};
use crate::error::{Result, SelectionField, SpcError};

/// Keeps the records whose shift is selected and whose actual value parses
/// to a finite number, preserving input order.
///
/// Records with an unreadable actual value are dropped silently; they never
/// fail the run on their own.
///
/// # Errors
///
/// - [`SpcError::EmptySelection`] if `selected_shifts` is empty.
/// - [`SpcError::NoValidData`] if no record survives.
///
/// # Examples
///
/// ```
/// use u_spc::measurement::{filter_measurements, RawMeasurement};
///
/// let records = vec![
///     RawMeasurement::new(10.0, 9.0, 11.0, 1),
///     RawMeasurement::new(10.2, 9.0, 11.0, 2),
///     RawMeasurement::new(f64::NAN, 9.0, 11.0, 1),
/// ];
/// let kept = filter_measurements(&records, &[1]).unwrap();
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].actual_value, 10.0);
/// ```
pub fn filter_measurements(
    records: &[RawMeasurement],
    selected_shifts: &[i64],
) -> Result<Vec<Measurement>> {
    if selected_shifts.is_empty() {
        return Err(SpcError::EmptySelection {
            field: SelectionField::Shifts,
        });
    }

    let kept: Vec<Measurement> = records
        .iter()
        .filter(|r| selected_shifts.contains(&r.shift_code))
        .filter_map(RawMeasurement::parse)
        .collect();

    debug!(
        total = records.len(),
        kept = kept.len(),
        rejected = records.len() - kept.len(),
        "filtered inspection records"
    );

    if kept.is_empty() {
        warn!(
            total = records.len(),
            shifts = ?selected_shifts,
            "no record matched the selected shifts with a numeric value"
        );
        return Err(SpcError::NoValidData);
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::NumericField;

    fn text_record(actual: &str, shift: i64) -> RawMeasurement {
        RawMeasurement {
            actual_value: Some(NumericField::from(actual)),
            from_specification: Some(NumericField::from("9.0")),
            to_specification: Some(NumericField::from("11.0")),
            shift_code: shift,
            date: None,
        }
    }

    #[test]
    fn empty_selection_fails_first() {
        let records = vec![RawMeasurement::new(10.0, 9.0, 11.0, 1)];
        assert_eq!(
            filter_measurements(&records, &[]),
            Err(SpcError::EmptySelection {
                field: SelectionField::Shifts
            })
        );
        // even with no records at all
        assert!(matches!(
            filter_measurements(&[], &[]),
            Err(SpcError::EmptySelection { .. })
        ));
    }

    #[test]
    fn keeps_selected_shifts_in_order() {
        let records = vec![
            text_record("10.1", 1),
            text_record("10.2", 3),
            text_record("10.3", 2),
            text_record("10.4", 1),
        ];
        let kept = filter_measurements(&records, &[1, 2]).unwrap();
        let values: Vec<f64> = kept.iter().map(|m| m.actual_value).collect();
        assert_eq!(values, vec![10.1, 10.3, 10.4]);
    }

    #[test]
    fn drops_non_numeric_silently() {
        let records = vec![
            text_record("OK", 1),
            text_record("10.0", 1),
            text_record("", 1),
            text_record("Infinity", 1),
        ];
        let kept = filter_measurements(&records, &[1]).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].actual_value, 10.0);
        assert_eq!(kept[0].lower_spec, 9.0);
        assert_eq!(kept[0].upper_spec, 11.0);
    }

    #[test]
    fn nothing_usable_is_no_valid_data() {
        let records = vec![text_record("x", 1), text_record("10.0", 2)];
        assert_eq!(filter_measurements(&records, &[1]), Err(SpcError::NoValidData));
        assert_eq!(filter_measurements(&[], &[1]), Err(SpcError::NoValidData));
    }
}
