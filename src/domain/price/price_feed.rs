//! Price feed interface

use async_trait::async_trait;

use crate::shared::errors::PriceError;

/// Upstream source of spot and historical prices.
///
/// Implementations own their rate limiting; the service layer only caches.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Spot price of `token_id` (mint address or symbol) in `quote_currency`
    async fn get_price(&self, token_id: &str, quote_currency: &str) -> Result<f64, PriceError>;

    /// Daily USD prices over the trailing `days`, oldest first
    async fn get_historical_prices(&self, token_id: &str, days: u32)
        -> Result<Vec<f64>, PriceError>;
}
