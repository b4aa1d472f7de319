//! Numeric helpers shared by every scoring pass.

/// Upper bound of every reported score.
pub const MAX_SCORE: u8 = 100;

/// Rounds `value` and bounds it to `[0, 100]`.
///
/// Callers are expected to pass numeric values; `NaN` is treated as zero so the
/// function stays total.
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }

    value.round().clamp(0.0, MAX_SCORE as f64) as u8
}

/// Sums `value * weight` across all terms. An empty slice yields `0.0`.
pub fn weighted_sum(terms: &[(f64, f64)]) -> f64 {
    terms.iter().map(|(value, weight)| value * weight).sum()
}

/// Expresses `numerator / denominator` as a clamped percentage.
///
/// A zero denominator yields `0` rather than a division error.
pub fn ratio_to_percent(numerator: u64, denominator: u64) -> u8 {
    if denominator == 0 {
        return 0;
    }

    clamp_score(numerator as f64 / denominator as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_score_rounds_and_bounds() {
        assert_eq!(clamp_score(42.4), 42);
        assert_eq!(clamp_score(42.5), 43);
        assert_eq!(clamp_score(-12.0), 0);
        assert_eq!(clamp_score(250.0), 100);
        assert_eq!(clamp_score(f64::INFINITY), 100);
        assert_eq!(clamp_score(f64::NEG_INFINITY), 0);
        assert_eq!(clamp_score(f64::NAN), 0);
    }

    #[test]
    fn weighted_sum_of_empty_terms_is_zero() {
        assert_eq!(weighted_sum(&[]), 0.0);
    }

    #[test]
    fn weighted_sum_multiplies_each_term() {
        let total = weighted_sum(&[(10.0, 0.5), (4.0, 2.0), (3.0, -1.0)]);
        assert!((total - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_to_percent_handles_zero_denominator() {
        for numerator in [0, 1, 17, u64::MAX] {
            assert_eq!(ratio_to_percent(numerator, 0), 0);
        }
    }

    #[test]
    fn ratio_to_percent_clamps_overflowing_ratios() {
        assert_eq!(ratio_to_percent(1, 3), 33);
        assert_eq!(ratio_to_percent(2, 3), 67);
        assert_eq!(ratio_to_percent(9, 3), 100);
    }
}
