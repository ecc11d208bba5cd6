//! Per-user accuracy aggregation.

/// Percentage of attempts marked correct, rounded to one decimal place.
///
/// Zero total is defined as `0.0` rather than a division error.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn accuracy_percent(correct: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = (correct as f64 / total as f64) * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_zero_not_an_error() {
        assert_eq!(accuracy_percent(0, 0), 0.0);
    }

    #[test]
    fn one_of_two_is_fifty() {
        assert_eq!(accuracy_percent(1, 2), 50.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(accuracy_percent(1, 3), 33.3);
        assert_eq!(accuracy_percent(2, 3), 66.7);
    }

    #[test]
    fn all_correct_is_hundred() {
        assert_eq!(accuracy_percent(5, 5), 100.0);
    }
}
