//! Small numeric helpers shared by the statistics calculators.

/// Round to a number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Arithmetic mean, 0 for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(4.26, 1), 4.3);
        assert_eq!(round_to(74.5, 0), 75.0);
        assert_eq!(round_to(3.0, 1), 3.0);
    }

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(Vec::<f64>::new()), 0.0);
        assert_eq!(mean([1.0, 2.0, 4.0]), 7.0 / 3.0);
    }
}
