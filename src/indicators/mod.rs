pub mod ema;
pub mod rsi;

pub use ema::*;
pub use rsi::*;

/// Arithmetic mean of the last `period` values.
///
/// Returns `None` when the series is shorter than `period`.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let sum: f64 = values[values.len() - period..].iter().sum();
    Some(sum / period as f64)
}
