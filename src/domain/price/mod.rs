//! Price domain - spot and historical token prices

mod price_feed;
mod price_service;

pub use price_feed::PriceFeed;
pub use price_service::{flat_series, PriceService};

use std::time::Duration;
use tokio::time::Instant;

/// Cached entries older than this are ignored and refetched
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

pub const DEFAULT_QUOTE_CURRENCY: &str = "usd";

/// Cached price point, replaced wholesale on refresh
#[derive(Debug, Clone, Copy)]
pub struct PriceCacheEntry {
    pub price: f64,
    pub fetched_at: Instant,
}
