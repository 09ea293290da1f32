//! Finite-checking and fixed-precision rounding of reported numbers.
//!
//! Every statistic handed to consumers passes through [`round_metric`], so
//! the engine never emits NaN or infinity: a non-finite result degrades to
//! `0` instead of breaking the chart or report that renders it.

/// Number of decimal digits kept in reported metrics.
pub(crate) const METRIC_DECIMALS: i32 = 4;

/// Rounds a metric to [`METRIC_DECIMALS`] digits, mapping non-finite values to `0`.
///
/// Rounding works on the exact decimal expansion of the binary value, so
/// `3.02765` (stored just below the tie) becomes `3.0276`. Exact ties round
/// half away from zero.
pub(crate) fn round_metric(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    if is_exact_tie(value) {
        // value * 10^4 is exact here, so rounding the scaled value is exact too
        let scale = 10_f64.powi(METRIC_DECIMALS);
        return (value * scale).round() / scale;
    }
    format!("{:.*}", METRIC_DECIMALS as usize, value)
        .parse()
        .unwrap_or(value)
}

/// A double lies exactly halfway between two 4-decimal numbers iff it is
/// `k / 20000` for odd `k`, which for a dyadic rational means `value * 32`
/// is an odd integer.
fn is_exact_tie(value: f64) -> bool {
    let scaled = value * 32.0;
    scaled.is_finite() && scaled.fract() == 0.0 && scaled.rem_euclid(2.0) == 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_four_decimals() {
        assert_eq!(round_metric(0.605_566_2), 0.6056);
        assert_eq!(round_metric(-1.234_56), -1.2346);
        assert_eq!(round_metric(10.0), 10.0);
    }

    #[test]
    fn rounds_the_exact_decimal_value() {
        // 3.02765 is stored as 3.02764999...
        assert_eq!(round_metric(3.02765), 3.0276);
        assert_eq!(round_metric(-3.02765), -3.0276);
        // 1.00005 is stored as 1.00005000000000010...
        assert_eq!(round_metric(1.00005), 1.0001);
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert!(is_exact_tie(1.03125));
        assert!(!is_exact_tie(1.0625));
        assert!(!is_exact_tie(3.02765));
        assert_eq!(round_metric(1.03125), 1.0313);
        assert_eq!(round_metric(-1.03125), -1.0313);
        assert_eq!(round_metric(0.15625), 0.1563);
        assert_eq!(round_metric(2.5), 2.5);
    }

    #[test]
    fn non_finite_becomes_zero() {
        assert_eq!(round_metric(f64::NAN), 0.0);
        assert_eq!(round_metric(f64::INFINITY), 0.0);
        assert_eq!(round_metric(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn huge_values_survive() {
        assert_eq!(round_metric(f64::MAX), f64::MAX);
    }
}
