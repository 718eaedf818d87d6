use serde::Serialize;

/// Technical indicator snapshot over one close series. A zero means the
/// series was too short for the corresponding window.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct IndicatorSet {
    pub sma20: f64,
    pub ema20: f64,
    pub rsi14: f64,
}

/// The externally visible prediction summary for one request. Always fully
/// populated: degraded inputs show up as zero sentinels, never as missing
/// fields.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub ticker: String,
    pub ahead: i64,
    pub current: f64,
    pub prediction: f64,
    #[serde(flatten)]
    pub indicators: IndicatorSet,
    pub closes: Vec<f64>,
}
