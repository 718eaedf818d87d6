use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::indicators::{ema, rsi, sma};
use crate::market::MarketData;
use crate::model::{ForecastModel, LinearTrend};
use crate::types::{IndicatorSet, Prediction};

/// Fewer closes than this carry no signal worth modeling.
const MIN_CLOSES: usize = 5;

const MIN_HORIZON_MINUTES: i64 = 1;
const MAX_HORIZON_MINUTES: i64 = 120;

const SMA_PERIOD: usize = 20;
const EMA_PERIOD: usize = 20;
const RSI_PERIOD: usize = 14;

/// Clamps a requested horizon into the supported range. Out-of-range input
/// is corrected silently, never rejected.
pub fn clamp_horizon(minutes: i64) -> i64 {
    minutes.clamp(MIN_HORIZON_MINUTES, MAX_HORIZON_MINUTES)
}

/// Per-request prediction orchestrator.
///
/// Holds only shared stateless collaborators; everything derived for one
/// request lives and dies on that request's stack, so concurrent requests
/// cannot observe each other.
pub struct Predictor {
    market: Arc<dyn MarketData>,
    model: Arc<dyn ForecastModel>,
}

impl Predictor {
    pub fn new(market: Arc<dyn MarketData>, model: Arc<dyn ForecastModel>) -> Self {
        Self { market, model }
    }

    /// Produces a fully populated prediction for `ticker`, `ahead_minutes`
    /// into the future.
    ///
    /// This never fails: an unreachable provider degrades to an empty
    /// series, a short series to a zero result, and a missing remote
    /// forecast to the in-process trend extrapolation.
    pub async fn predict(&self, ticker: &str, ahead_minutes: i64) -> Prediction {
        let ahead = clamp_horizon(ahead_minutes);

        let bars = match self.market.recent_bars(ticker).await {
            Ok(bars) => bars,
            Err(e) => {
                warn!("market data fetch for {} failed: {}", ticker, e);
                Vec::new()
            }
        };
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        if closes.len() < MIN_CLOSES {
            debug!(
                "{}: only {} closes, answering the zero result",
                ticker,
                closes.len()
            );
            return Prediction {
                ticker: ticker.to_string(),
                ahead,
                current: 0.0,
                prediction: 0.0,
                indicators: IndicatorSet::default(),
                closes,
            };
        }

        // Indicators are for the caller's charting and are computed no
        // matter which model ends up answering the price.
        let indicators = IndicatorSet {
            sma20: sma(&closes, SMA_PERIOD).unwrap_or(0.0),
            ema20: ema(&closes, EMA_PERIOD).unwrap_or(0.0),
            rsi14: rsi(&closes, RSI_PERIOD).unwrap_or(0.0),
        };

        // Fit the fallback on the synthetic index axis 0..n-1 and
        // extrapolate `ahead` steps past the last observed sample.
        let xs: Vec<f64> = (0..closes.len()).map(|i| i as f64).collect();
        let trend = LinearTrend::fit(&xs, &closes);
        let future_index = (closes.len() - 1) as f64 + ahead as f64;
        let fallback = trend.predict(future_index);

        let remote = self.model.forecast(ticker, ahead, &closes).await;
        let prediction = remote.unwrap_or(fallback);

        info!(
            "{}: +{}min -> {:.4} via {}",
            ticker,
            ahead,
            prediction,
            if remote.is_some() {
                "remote model"
            } else {
                "trend fallback"
            },
        );

        let current = closes.last().copied().unwrap_or(0.0);

        Prediction {
            ticker: ticker.to_string(),
            ahead,
            current,
            prediction,
            indicators,
            closes,
        }
    }
}
