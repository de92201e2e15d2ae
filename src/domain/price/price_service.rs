//! Cached price lookups on top of a pluggable feed

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::{PriceCacheEntry, PriceFeed, DEFAULT_CACHE_TTL, DEFAULT_QUOTE_CURRENCY};
use crate::infrastructure::price::CoinGeckoPriceFeed;
use crate::shared::errors::PriceError;

/// Price service shared by every collector.
///
/// Concurrent misses on the same key are not deduplicated; each caller hits
/// the feed and the last write wins.
pub struct PriceService {
    feed: Arc<dyn PriceFeed>,
    cache: RwLock<HashMap<(String, String), PriceCacheEntry>>,
    cache_ttl: Duration,
}

impl PriceService {
    pub fn new(feed: Arc<dyn PriceFeed>) -> Self {
        Self::with_cache_ttl(feed, DEFAULT_CACHE_TTL)
    }

    pub fn with_cache_ttl(feed: Arc<dyn PriceFeed>, cache_ttl: Duration) -> Self {
        Self {
            feed,
            cache: RwLock::new(HashMap::new()),
            cache_ttl,
        }
    }

    /// USD spot price
    pub async fn get_price(&self, token_id: &str) -> Result<f64, PriceError> {
        self.get_price_in(token_id, DEFAULT_QUOTE_CURRENCY).await
    }

    pub async fn get_price_in(
        &self,
        token_id: &str,
        quote_currency: &str,
    ) -> Result<f64, PriceError> {
        let key = (token_id.to_string(), quote_currency.to_string());

        if let Some(entry) = self.cache.read().await.get(&key) {
            if entry.fetched_at.elapsed() < self.cache_ttl {
                debug!("Price cache hit for {}:{}", token_id, quote_currency);
                return Ok(entry.price);
            }
        }

        let price = self.feed.get_price(token_id, quote_currency).await?;
        self.cache.write().await.insert(
            key,
            PriceCacheEntry {
                price,
                fetched_at: Instant::now(),
            },
        );

        Ok(price)
    }

    /// Trailing daily prices, oldest first. Never fails: a feed error yields
    /// a flat series of ones, which reads as zero volatility downstream.
    pub async fn get_historical_prices(&self, token_id: &str, days: u32) -> Vec<f64> {
        match self.feed.get_historical_prices(token_id, days).await {
            Ok(prices) => prices,
            Err(e) => {
                warn!("Historical prices unavailable for {}, using flat fallback: {}", token_id, e);
                flat_series(days)
            }
        }
    }
}

impl Default for PriceService {
    fn default() -> Self {
        Self::new(Arc::new(CoinGeckoPriceFeed::default()))
    }
}

/// Fallback series used when history cannot be fetched
pub fn flat_series(days: u32) -> Vec<f64> {
    vec![1.0; days as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Feed that returns an incrementing price so repeated upstream calls are visible
    struct CountingFeed {
        price_calls: AtomicUsize,
        fail_history: bool,
        fail_prices: bool,
        last_quote: Mutex<Option<String>>,
    }

    impl CountingFeed {
        fn new() -> Self {
            Self {
                price_calls: AtomicUsize::new(0),
                fail_history: false,
                fail_prices: false,
                last_quote: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl PriceFeed for CountingFeed {
        async fn get_price(&self, token_id: &str, quote_currency: &str) -> Result<f64, PriceError> {
            *self.last_quote.lock().unwrap() = Some(quote_currency.to_string());
            if self.fail_prices {
                return Err(PriceError::unavailable(token_id, "feed down"));
            }
            let n = self.price_calls.fetch_add(1, Ordering::SeqCst);
            Ok(100.0 + n as f64)
        }

        async fn get_historical_prices(
            &self,
            token_id: &str,
            days: u32,
        ) -> Result<Vec<f64>, PriceError> {
            if self.fail_history {
                return Err(PriceError::unavailable(token_id, "history down"));
            }
            Ok((0..days).map(|d| 10.0 + d as f64).collect())
        }
    }

    #[tokio::test]
    async fn test_cached_price_is_reused_within_ttl() {
        let feed = Arc::new(CountingFeed::new());
        let service = PriceService::new(feed.clone());

        let first = service.get_price("SOL").await.unwrap();
        let second = service.get_price("SOL").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(feed.price_calls.load(Ordering::SeqCst), 1);
        assert_eq!(feed.last_quote.lock().unwrap().as_deref(), Some("usd"));
    }

    #[tokio::test]
    async fn test_cache_is_keyed_by_quote_currency() {
        let feed = Arc::new(CountingFeed::new());
        let service = PriceService::new(feed.clone());

        service.get_price_in("SOL", "usd").await.unwrap();
        service.get_price_in("SOL", "eur").await.unwrap();
        service.get_price_in("SOL", "eur").await.unwrap();

        assert_eq!(feed.price_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_is_refetched() {
        let feed = Arc::new(CountingFeed::new());
        let service = PriceService::new(feed.clone());

        let first = service.get_price("SOL").await.unwrap();
        tokio::time::advance(DEFAULT_CACHE_TTL - Duration::from_secs(1)).await;
        assert_eq!(service.get_price("SOL").await.unwrap(), first);

        tokio::time::advance(Duration::from_secs(2)).await;
        let refreshed = service.get_price("SOL").await.unwrap();

        assert_ne!(refreshed, first);
        assert_eq!(feed.price_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_feed_failure_propagates_and_is_not_cached() {
        let mut feed = CountingFeed::new();
        feed.fail_prices = true;
        let service = PriceService::new(Arc::new(feed));

        let err = service.get_price("SOL").await.unwrap_err();
        assert!(matches!(err, PriceError::Unavailable { .. }));
        assert!(service.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_historical_prices_pass_through() {
        let service = PriceService::new(Arc::new(CountingFeed::new()));
        let prices = service.get_historical_prices("SOL", 3).await;
        assert_eq!(prices, vec![10.0, 11.0, 12.0]);
    }

    #[tokio::test]
    async fn test_historical_prices_degrade_to_flat_series() {
        let mut feed = CountingFeed::new();
        feed.fail_history = true;
        let service = PriceService::new(Arc::new(feed));

        let prices = service.get_historical_prices("SOL", 30).await;
        assert_eq!(prices.len(), 30);
        assert!(prices.iter().all(|p| *p == 1.0));
    }
}
