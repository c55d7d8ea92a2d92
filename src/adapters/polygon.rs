// ============================================================================
// Polygon Price Source
// Previous-close aggregate from the Polygon.io REST API (blocking)
// ============================================================================

use crate::domain::PolygonConfig;
use crate::interfaces::{PriceSource, PriceSourceError};
use reqwest::blocking::Client;
use serde::Deserialize;

/// `GET /v2/aggs/ticker/{ticker}/prev` response, only the fields we use
#[derive(Debug, Deserialize)]
struct PreviousCloseResponse {
    #[serde(default)]
    results: Vec<AggregateBar>,
}

#[derive(Debug, Deserialize)]
struct AggregateBar {
    #[serde(rename(deserialize = "c"))]
    close: f64,
}

/// Fetches the previous close for a ticker
pub struct PolygonPriceSource {
    client: Client,
    config: PolygonConfig,
}

impl PolygonPriceSource {
    pub fn new(config: PolygonConfig) -> Result<Self, PriceSourceError> {
        config.validate().map_err(PriceSourceError::InvalidConfig)?;

        let client = Client::builder()
            .user_agent(concat!("price-bridge/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| PriceSourceError::Http(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, symbol: &str) -> String {
        format!(
            "{}/v2/aggs/ticker/{}/prev",
            self.config.base_url.trim_end_matches('/'),
            symbol.to_uppercase()
        )
    }
}

impl PriceSource for PolygonPriceSource {
    fn name(&self) -> &str {
        "polygon"
    }

    fn latest_price(&self, symbol: &str) -> Result<f64, PriceSourceError> {
        let response = self
            .client
            .get(self.endpoint(symbol))
            .query(&[("adjusted", "true"), ("apiKey", self.config.api_key.as_str())])
            .send()
            // The URL carries the API key
            .map_err(|e| PriceSourceError::Http(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceSourceError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| PriceSourceError::Http(e.without_url().to_string()))?;

        tracing::debug!("Polygon response for {}: {} bytes", symbol, body.len());
        parse_previous_close(symbol, &body)
    }
}

/// Extract `results[0].c` from a previous-close document
fn parse_previous_close(symbol: &str, body: &str) -> Result<f64, PriceSourceError> {
    let parsed: PreviousCloseResponse =
        serde_json::from_str(body).map_err(|e| PriceSourceError::Malformed(e.to_string()))?;

    parsed
        .results
        .first()
        .map(|bar| bar.close)
        .ok_or_else(|| PriceSourceError::NoData(symbol.to_string()))
}
