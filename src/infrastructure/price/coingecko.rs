//! CoinGecko price feed

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use super::rate_limiter::{RequestSpacer, DEFAULT_MIN_REQUEST_INTERVAL};
use crate::domain::price::PriceFeed;
use crate::domain::token::TokenRegistry;
use crate::shared::errors::PriceError;

pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

const MS_PER_DAY: f64 = 86_400_000.0;

/// `/coins/{id}/market_chart` payload, `prices` is `[timestamp_ms, price]` pairs
#[derive(Debug, Deserialize)]
struct MarketChart {
    prices: Vec<(f64, f64)>,
}

/// Price feed backed by the public CoinGecko API.
///
/// Token ids (mint address or symbol) are resolved to CoinGecko ids through the
/// token registry; tokens without a feed id are rejected before any request.
pub struct CoinGeckoPriceFeed {
    http_client: Client,
    base_url: String,
    registry: Arc<TokenRegistry>,
    spacer: RequestSpacer,
}

impl CoinGeckoPriceFeed {
    pub fn new(
        base_url: impl Into<String>,
        min_request_interval: Duration,
        registry: Arc<TokenRegistry>,
    ) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            registry,
            spacer: RequestSpacer::new(min_request_interval),
        }
    }

    fn feed_id(&self, token_id: &str) -> Result<String, PriceError> {
        self.registry
            .lookup(token_id)
            .and_then(|t| t.price_feed_id.clone())
            .ok_or_else(|| PriceError::unavailable(token_id, "No CoinGecko ID found for token"))
    }

    async fn make_request(
        &self,
        token_id: &str,
        endpoint: &str,
    ) -> Result<serde_json::Value, PriceError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("CoinGecko request: {}", url);

        self.spacer
            .run(async {
                let response = self
                    .http_client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| PriceError::unavailable(token_id, e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(PriceError::unavailable(
                        token_id,
                        format!("CoinGecko API error: {}", status),
                    ));
                }

                response
                    .json::<serde_json::Value>()
                    .await
                    .map_err(|e| PriceError::unavailable(token_id, e.to_string()))
            })
            .await
    }
}

impl Default for CoinGeckoPriceFeed {
    fn default() -> Self {
        Self::new(DEFAULT_COINGECKO_URL, DEFAULT_MIN_REQUEST_INTERVAL, TokenRegistry::global())
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoPriceFeed {
    async fn get_price(&self, token_id: &str, quote_currency: &str) -> Result<f64, PriceError> {
        let result = async {
            let feed_id = self.feed_id(token_id)?;
            let data = self
                .make_request(
                    token_id,
                    &format!("/simple/price?ids={}&vs_currencies={}", feed_id, quote_currency),
                )
                .await?;
            parse_simple_price(&data, token_id, &feed_id, quote_currency)
        }
        .await;

        if let Err(e) = &result {
            error!("Error fetching price for {}: {}", token_id, e);
        }
        result
    }

    async fn get_historical_prices(
        &self,
        token_id: &str,
        days: u32,
    ) -> Result<Vec<f64>, PriceError> {
        let feed_id = self.feed_id(token_id)?;
        let data = self
            .make_request(
                token_id,
                &format!(
                    "/coins/{}/market_chart?vs_currency=usd&days={}&interval=daily",
                    feed_id, days
                ),
            )
            .await?;
        parse_market_chart(data, token_id, days)
    }
}

/// Extract `data[feed_id][quote]` from a `/simple/price` response
pub fn parse_simple_price(
    data: &serde_json::Value,
    token_id: &str,
    feed_id: &str,
    quote_currency: &str,
) -> Result<f64, PriceError> {
    data.get(feed_id)
        .and_then(|quotes| quotes.get(quote_currency))
        .and_then(|price| price.as_f64())
        .ok_or_else(|| {
            PriceError::unavailable(
                token_id,
                format!("Price data not found for {} in {}", feed_id, quote_currency),
            )
        })
}

/// One price per UTC day from a `/market_chart` response, oldest first.
///
/// Points are bucketed by day and the last point of each day wins, so hourly
/// payloads collapse to daily closes. At most `days` trailing entries are kept.
pub fn parse_market_chart(
    data: serde_json::Value,
    token_id: &str,
    days: u32,
) -> Result<Vec<f64>, PriceError> {
    let chart: MarketChart = serde_json::from_value(data)
        .map_err(|e| PriceError::unavailable(token_id, format!("Invalid market chart: {}", e)))?;

    let mut daily: Vec<(i64, f64)> = Vec::with_capacity(days as usize + 1);
    for (timestamp_ms, price) in chart.prices {
        let day = (timestamp_ms / MS_PER_DAY).floor() as i64;
        match daily.last_mut() {
            Some((last_day, last_price)) if *last_day == day => *last_price = price,
            _ => daily.push((day, price)),
        }
    }

    let skip = daily.len().saturating_sub(days as usize);
    Ok(daily.into_iter().skip(skip).map(|(_, price)| price).collect())
}
