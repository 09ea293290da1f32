//! Inspection records as delivered by the data source, and their parsed form.

use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A numeric field that may arrive either as a JSON number or as text.
///
/// The inspection service sends dimensional values as strings; callers
/// assembling requests by hand usually send numbers. Both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    /// A value already in numeric form.
    Number(f64),
    /// A textual value, parsed leniently by [`NumericField::value`].
    Text(String),
}

impl NumericField {
    /// Returns the numeric value, or `None` if the field does not parse.
    ///
    /// Text is parsed by taking the longest leading decimal literal after
    /// any leading whitespace, so `"12.5 mm"` yields `12.5` and `"n/a"`
    /// yields `None`. The result may still be non-finite for `Number`
    /// inputs or for literals that overflow (`"1e999"`).
    ///
    /// # Examples
    ///
    /// ```
    /// use u_spc::measurement::NumericField;
    ///
    /// assert_eq!(NumericField::Text(" 10.25".into()).value(), Some(10.25));
    /// assert_eq!(NumericField::Text("4.0mm".into()).value(), Some(4.0));
    /// assert_eq!(NumericField::Text("OK".into()).value(), None);
    /// assert_eq!(NumericField::Number(3.5).value(), Some(3.5));
    /// ```
    pub fn value(&self) -> Option<f64> {
        match self {
            NumericField::Number(v) => Some(*v),
            NumericField::Text(s) => parse_leading_float(s),
        }
    }

    /// Returns the value if it parses to a finite number.
    pub fn finite_value(&self) -> Option<f64> {
        self.value().filter(|v| v.is_finite())
    }
}

impl From<f64> for NumericField {
    fn from(v: f64) -> Self {
        NumericField::Number(v)
    }
}

impl From<&str> for NumericField {
    fn from(s: &str) -> Self {
        NumericField::Text(s.to_owned())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientField {
    Readable(NumericField),
    Unreadable(IgnoredAny),
}

/// Deserializes a numeric field, mapping `null`, booleans, arrays and objects
/// to `None` so one bad reading cannot reject a whole payload.
fn lenient_numeric<'de, D>(deserializer: D) -> Result<Option<NumericField>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientField::deserialize(deserializer)? {
        LenientField::Readable(field) => Some(field),
        LenientField::Unreadable(_) => None,
    })
}

/// One raw inspection record.
///
/// Field names follow the analysis request (`actualValue`, ...); the
/// inspection service's own names (`ActualSpecification`, ...) are accepted
/// as aliases so service payloads deserialize directly. Numeric fields that
/// are missing, `null` or not a number or string deserialize as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurement {
    /// Measured dimension.
    #[serde(default, alias = "ActualSpecification", deserialize_with = "lenient_numeric")]
    pub actual_value: Option<NumericField>,
    /// Lower specification limit.
    #[serde(default, alias = "FromSpecification", deserialize_with = "lenient_numeric")]
    pub from_specification: Option<NumericField>,
    /// Upper specification limit.
    #[serde(default, alias = "ToSpecification", deserialize_with = "lenient_numeric")]
    pub to_specification: Option<NumericField>,
    /// Shift the measurement was taken in.
    #[serde(alias = "ShiftCode")]
    pub shift_code: i64,
    /// Transaction date as sent by the source.
    #[serde(default, alias = "TrnDate")]
    pub date: Option<String>,
}

impl RawMeasurement {
    /// Builds a record from numeric values, mostly useful for tests and
    /// callers that already hold parsed data.
    pub fn new(actual: f64, lsl: f64, usl: f64, shift_code: i64) -> Self {
        Self {
            actual_value: Some(actual.into()),
            from_specification: Some(lsl.into()),
            to_specification: Some(usl.into()),
            shift_code,
            date: None,
        }
    }

    /// Sets the transaction date text.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Parses this record, returning `None` if the actual value is absent or
    /// not a finite number.
    ///
    /// Specification bounds that are absent or do not parse become NaN; they are only
    /// read from the first valid record and any resulting non-finite metric
    /// is reported as `0`.
    pub fn parse(&self) -> Option<Measurement> {
        let actual_value = self.actual_value.as_ref()?.finite_value()?;
        Some(Measurement {
            actual_value,
            lower_spec: spec_bound(self.from_specification.as_ref()),
            upper_spec: spec_bound(self.to_specification.as_ref()),
            shift_id: self.shift_code,
            date: self.date.as_deref().and_then(parse_record_date),
        })
    }
}

fn spec_bound(field: Option<&NumericField>) -> f64 {
    field.and_then(NumericField::value).unwrap_or(f64::NAN)
}

/// A validated measurement ready for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Measured dimension, always finite.
    pub actual_value: f64,
    /// Lower specification limit (LSL).
    pub lower_spec: f64,
    /// Upper specification limit (USL).
    pub upper_spec: f64,
    /// Shift identifier.
    pub shift_id: i64,
    /// Calendar date of the measurement, when the source supplied a readable one.
    pub date: Option<NaiveDate>,
}

/// Parses the longest leading decimal literal of `s`.
///
/// Accepts `[+-]digits[.digits][(e|E)[+-]digits]` with at least one digit
/// in the mantissa. An exponent marker without digits is not consumed.
fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Parses a transaction date in ISO (`2024-03-01`, optionally followed by a
/// time part) or day-first (`01/03/2024`) form.
fn parse_record_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(iso) = s.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
            return Some(date);
        }
    }
    let day_first = s.split_whitespace().next().unwrap_or(s);
    NaiveDate::parse_from_str(day_first, "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_float_accepts_plain_literals() {
        assert_eq!(parse_leading_float("12"), Some(12.0));
        assert_eq!(parse_leading_float("-3.25"), Some(-3.25));
        assert_eq!(parse_leading_float("+0.5"), Some(0.5));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("5."), Some(5.0));
        assert_eq!(parse_leading_float("1.5e2"), Some(150.0));
    }

    #[test]
    fn leading_float_ignores_trailing_text() {
        assert_eq!(parse_leading_float("  7.5 mm"), Some(7.5));
        assert_eq!(parse_leading_float("2e"), Some(2.0));
        assert_eq!(parse_leading_float("2e+"), Some(2.0));
        assert_eq!(parse_leading_float("1.2.3"), Some(1.2));
    }

    #[test]
    fn leading_float_rejects_non_numeric() {
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("   "), None);
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("NaN"), None);
        assert_eq!(parse_leading_float("inf"), None);
    }

    #[test]
    fn overflowing_literal_is_not_finite() {
        let field = NumericField::Text("1e999".into());
        assert_eq!(field.value(), Some(f64::INFINITY));
        assert_eq!(field.finite_value(), None);
    }

    #[test]
    fn parse_rejects_bad_actual_value() {
        let mut raw = RawMeasurement::new(1.0, 0.0, 2.0, 1);
        raw.actual_value = Some(NumericField::Text("--".into()));
        assert!(raw.parse().is_none());

        let raw = RawMeasurement::new(f64::NAN, 0.0, 2.0, 1);
        assert!(raw.parse().is_none());
    }

    #[test]
    fn parse_keeps_unreadable_spec_as_nan() {
        let mut raw = RawMeasurement::new(1.0, 0.0, 2.0, 1);
        raw.to_specification = Some(NumericField::Text("".into()));
        let m = raw.parse().expect("actual value is valid");
        assert!(m.upper_spec.is_nan());
        assert_eq!(m.lower_spec, 0.0);
    }

    #[test]
    fn record_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(parse_record_date("2024-03-01"), expected);
        assert_eq!(parse_record_date("2024-03-01T08:30:00"), expected);
        assert_eq!(parse_record_date("01/03/2024"), expected);
        assert_eq!(parse_record_date("01/03/2024 08:30"), expected);
        assert_eq!(parse_record_date("yesterday"), None);
    }

    #[test]
    fn deserializes_service_payload() {
        let json = r#"{
            "TrnDate": "2024-03-01T00:00:00",
            "ShiftCode": 2,
            "ShiftName": "B",
            "GuageCode": "G1",
            "FromSpecification": "9.95",
            "ToSpecification": "10.05",
            "ActualSpecification": "10.01"
        }"#;
        let raw: RawMeasurement = serde_json::from_str(json).expect("valid payload");
        let m = raw.parse().expect("valid record");
        assert_eq!(m.shift_id, 2);
        assert!((m.actual_value - 10.01).abs() < 1e-12);
        assert!((m.lower_spec - 9.95).abs() < 1e-12);
        assert!((m.upper_spec - 10.05).abs() < 1e-12);
        assert_eq!(m.date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn deserializes_request_payload_with_numbers() {
        let json = r#"{
            "actualValue": 4.5,
            "fromSpecification": 4,
            "toSpecification": "5",
            "shiftCode": 1
        }"#;
        let raw: RawMeasurement = serde_json::from_str(json).expect("valid payload");
        let m = raw.parse().expect("valid record");
        assert_eq!(m.actual_value, 4.5);
        assert_eq!(m.lower_spec, 4.0);
        assert_eq!(m.upper_spec, 5.0);
        assert_eq!(m.date, None);
    }

    #[test]
    fn unreadable_fields_deserialize_as_absent() {
        let json = r#"[
            {"ActualSpecification": null, "FromSpecification": "9", "ToSpecification": "11", "ShiftCode": 1},
            {"FromSpecification": "9", "ToSpecification": "11", "ShiftCode": 1},
            {"ActualSpecification": true, "FromSpecification": "9", "ToSpecification": "11", "ShiftCode": 1},
            {"ActualSpecification": "10.2", "FromSpecification": null, "ShiftCode": 1}
        ]"#;
        let raws: Vec<RawMeasurement> = serde_json::from_str(json).expect("lenient payload");
        assert_eq!(raws[0].actual_value, None);
        assert_eq!(raws[1].actual_value, None);
        assert_eq!(raws[2].actual_value, None);
        assert!(raws[..3].iter().all(|r| r.parse().is_none()));

        let m = raws[3].parse().expect("actual value is valid");
        assert_eq!(m.actual_value, 10.2);
        assert!(m.lower_spec.is_nan());
        assert!(m.upper_spec.is_nan());
    }
}
