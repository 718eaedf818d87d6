/// Exponential moving average over the trailing `period` window, seeded
/// with the oldest value inside the window and rolled forward with
/// smoothing factor `2 / (period + 1)`.
///
/// Returns `None` when the series is shorter than `period`.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    let start = values.len() - period;
    let mut ema = values[start];
    for &price in &values[start + 1..] {
        ema = alpha * price + (1.0 - alpha) * ema;
    }
    Some(ema)
}
