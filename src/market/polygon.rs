use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::MarketData;
use crate::types::Bar;

const POLYGON_API: &str = "https://api.polygon.io";

/// Lookback window and record cap for one aggregates fetch. 1-minute bars
/// over the last 2 calendar days keep the series fresh without paging.
const LOOKBACK_DAYS: i64 = 2;
const BAR_LIMIT: u32 = 2000;

/// Anything shorter cannot hold a single bar record.
const MIN_AGGS_PAYLOAD: usize = 20;

#[derive(Debug, Clone)]
pub struct PolygonClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PolygonClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: POLYGON_API.to_string(),
        }
    }
}

#[async_trait]
impl MarketData for PolygonClient {
    async fn recent_bars(&self, ticker: &str) -> anyhow::Result<Vec<Bar>> {
        let to = Utc::now().date_naive();
        let from = to - Duration::days(LOOKBACK_DAYS);

        let url = format!(
            "{}/v2/aggs/ticker/{}/range/1/minute/{}/{}?adjusted=true&sort=asc&limit={}&apiKey={}",
            self.base_url, ticker, from, to, BAR_LIMIT, self.api_key
        );

        let payload = self.client.get(&url).send().await?.text().await?;
        let bars = parse_aggregates(&payload);
        debug!("fetched {} bars for {}", bars.len(), ticker);

        Ok(bars)
    }
}

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    #[serde(default)]
    results: Vec<AggregateRecord>,
}

#[derive(Debug, Deserialize)]
struct AggregateRecord {
    #[serde(rename = "c")]
    close: f64,
    #[serde(rename = "v")]
    volume: f64,
}

impl From<AggregateRecord> for Bar {
    fn from(record: AggregateRecord) -> Self {
        Bar {
            close: record.close,
            volume: record.volume,
        }
    }
}

/// Parses a Polygon aggregates payload into bars, in provider order.
///
/// Tolerates truncation: a payload that fails the document parse is
/// salvaged record by record, and the first record that no longer yields
/// both numeric fields ends the scan. Whatever parsed up to that point is
/// returned; this function never errors.
pub fn parse_aggregates(payload: &str) -> Vec<Bar> {
    if payload.len() < MIN_AGGS_PAYLOAD {
        return Vec::new();
    }

    if let Ok(doc) = serde_json::from_str::<AggregatesResponse>(payload) {
        return doc.results.into_iter().map(Bar::from).collect();
    }

    salvage_bars(payload)
}

/// Record-by-record scan for payloads the document parse rejects. Bar
/// records are flat objects, so brace matching does not need to nest.
fn salvage_bars(payload: &str) -> Vec<Bar> {
    let start = payload.find("\"results\"").unwrap_or(0);
    let mut rest = &payload[start..];
    let mut bars = Vec::new();

    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        let record = &rest[open..=open + len];
        match serde_json::from_str::<AggregateRecord>(record) {
            Ok(record) => bars.push(record.into()),
            Err(_) => break,
        }
        rest = &rest[open + len + 1..];
    }

    bars
}
