use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::AppState;

const DEFAULT_TICKER: &str = "AAPL";
const DEFAULT_AHEAD_MINUTES: i64 = 1;

#[derive(Debug, Default, Deserialize)]
pub struct PredictQuery {
    pub ticker: Option<String>,
    /// Taken as raw text so that unparseable input silently falls back to
    /// the default instead of failing extraction.
    pub ahead: Option<String>,
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn get_prediction(
    State(state): State<AppState>,
    Query(query): Query<PredictQuery>,
) -> impl IntoResponse {
    let ticker = query
        .ticker
        .as_deref()
        .map(str::trim)
        .filter(|ticker| !ticker.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| DEFAULT_TICKER.to_string());

    let ahead = query
        .ahead
        .as_deref()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(DEFAULT_AHEAD_MINUTES);

    let prediction = state.predictor.predict(&ticker, ahead).await;
    Json(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::market::MockMarketData;
    use crate::model::MockForecastModel;
    use crate::pipeline::Predictor;
    use crate::types::Bar;

    fn test_state() -> AppState {
        let mut market = MockMarketData::new();
        market.expect_recent_bars().returning(|_| {
            Ok((1..=20)
                .map(|i| Bar {
                    close: 100.0 + i as f64,
                    volume: 500.0,
                })
                .collect())
        });
        let mut model = MockForecastModel::new();
        model.expect_forecast().returning(|_, _, _| None);
        AppState {
            predictor: Arc::new(Predictor::new(Arc::new(market), Arc::new(model))),
        }
    }

    async fn run_query(query: PredictQuery) -> serde_json::Value {
        let response = get_prediction(State(test_state()), Query(query)).await;
        let body = axum::body::to_bytes(response.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn defaults_fill_missing_parameters() {
        let value = run_query(PredictQuery::default()).await;
        assert_eq!(value["ticker"], "AAPL");
        assert_eq!(value["ahead"], 1);
        assert_eq!(value["current"], 120.0);
        assert_eq!(value["closes"].as_array().unwrap().len(), 20);
        // Flattened indicator fields sit at the top level.
        assert!(value["sma20"].is_number());
        assert!(value["rsi14"].is_number());
    }

    #[tokio::test]
    async fn unparseable_horizon_falls_back_to_the_default() {
        let query = PredictQuery {
            ticker: Some("msft".to_string()),
            ahead: Some("soon".to_string()),
        };
        let value = run_query(query).await;
        assert_eq!(value["ticker"], "MSFT");
        assert_eq!(value["ahead"], 1);
    }

    #[tokio::test]
    async fn out_of_range_horizon_is_clamped() {
        let query = PredictQuery {
            ticker: None,
            ahead: Some("500".to_string()),
        };
        let value = run_query(query).await;
        assert_eq!(value["ahead"], 120);
    }
}
