/// Relative strength index over the last `period` price changes.
///
/// Positive changes accumulate into the gain sum, negative changes into the
/// loss sum. A window with zero total loss reads as maximal strength
/// (100.0) rather than dividing by zero. Returns `None` when the series
/// holds `period` or fewer values, since `period` changes need
/// `period + 1` prices.
pub fn rsi(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() <= period {
        return None;
    }
    let mut gain = 0.0;
    let mut loss = 0.0;
    for i in values.len() - period..values.len() {
        let diff = values[i] - values[i - 1];
        if diff > 0.0 {
            gain += diff;
        } else {
            loss -= diff;
        }
    }
    if loss == 0.0 {
        return Some(100.0);
    }
    let rs = gain / loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_more_prices_than_the_period() {
        let exact: Vec<f64> = (0..14).map(|i| i as f64).collect();
        assert_eq!(rsi(&exact, 14), None);
        let enough: Vec<f64> = (0..15).map(|i| i as f64).collect();
        assert!(rsi(&enough, 14).is_some());
    }

    #[test]
    fn monotonic_rise_is_maximal_strength() {
        let values: Vec<f64> = (10..30).map(|i| i as f64).collect();
        assert_eq!(rsi(&values, 14), Some(100.0));
    }

    #[test]
    fn flat_series_is_maximal_strength() {
        // No losses in the window, even with zero gains.
        let values = vec![50.0; 20];
        assert_eq!(rsi(&values, 14), Some(100.0));
    }

    #[test]
    fn monotonic_fall_is_zero() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let value = rsi(&values, 14).unwrap();
        assert!(value.abs() < 1e-12);
    }

    #[test]
    fn stays_within_bounds() {
        let values: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let value = rsi(&values, 14).unwrap();
        assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn balanced_moves_read_neutral() {
        // Alternating +1/-1 changes: gain == loss, RSI = 50.
        let values: Vec<f64> = (0..21)
            .map(|i| if i % 2 == 0 { 10.0 } else { 11.0 })
            .collect();
        let value = rsi(&values, 14).unwrap();
        assert!((value - 50.0).abs() < 1e-9);
    }
}
