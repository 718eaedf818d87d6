use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_ML_ENDPOINT: &str = "http://localhost:6000/predict_from_series";

const FORECAST_TIMEOUT: Duration = Duration::from_secs(10);

/// Horizon-conditioned point forecast from an external predictor.
///
/// `None` means the model declined or could not be reached. Callers are
/// expected to fall back, never to fail: an unreachable forecaster is a
/// normal outcome.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastModel: Send + Sync {
    async fn forecast(&self, ticker: &str, horizon_minutes: i64, closes: &[f64]) -> Option<f64>;
}

/// Client for the out-of-process ML service.
#[derive(Debug, Clone)]
pub struct MlServiceClient {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct SeriesRequest<'a> {
    ticker: &'a str,
    horizon: i64,
    closes: &'a [f64],
}

impl MlServiceClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl ForecastModel for MlServiceClient {
    async fn forecast(&self, ticker: &str, horizon_minutes: i64, closes: &[f64]) -> Option<f64> {
        let body = SeriesRequest {
            ticker,
            horizon: horizon_minutes,
            closes,
        };

        let resp = match self
            .client
            .post(&self.endpoint)
            .timeout(FORECAST_TIMEOUT)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                debug!("ML service unreachable: {}", e);
                return None;
            }
        };

        if !resp.status().is_success() {
            debug!("ML service answered with status {}", resp.status());
            return None;
        }

        let value = match resp.json::<serde_json::Value>().await {
            Ok(value) => value,
            Err(e) => {
                debug!("ML service response not decodable: {}", e);
                return None;
            }
        };

        extract_prediction(&value)
    }
}

/// Pulls the top-level `prediction` number out of an ML service response.
/// A non-positive value means the model declined to answer; it is not a
/// price.
fn extract_prediction(value: &serde_json::Value) -> Option<f64> {
    let prediction = value.get("prediction")?.as_f64()?;
    if prediction > 0.0 {
        Some(prediction)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positive_prediction_is_accepted() {
        let value = json!({ "prediction": 187.23, "model": "h1" });
        assert_eq!(extract_prediction(&value), Some(187.23));
    }

    #[test]
    fn non_positive_prediction_is_declined() {
        assert_eq!(extract_prediction(&json!({ "prediction": -5 })), None);
        assert_eq!(extract_prediction(&json!({ "prediction": 0.0 })), None);
    }

    #[test]
    fn missing_or_non_numeric_field_is_absent() {
        assert_eq!(extract_prediction(&json!({ "error": "no model" })), None);
        assert_eq!(extract_prediction(&json!({ "prediction": "187.2" })), None);
        assert_eq!(extract_prediction(&json!(null)), None);
    }

    #[test]
    fn request_body_matches_the_service_contract() {
        let body = SeriesRequest {
            ticker: "AAPL",
            horizon: 60,
            closes: &[101.0, 102.5],
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(
            encoded,
            json!({ "ticker": "AAPL", "horizon": 60, "closes": [101.0, 102.5] })
        );
    }
}
