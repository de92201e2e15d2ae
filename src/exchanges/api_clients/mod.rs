pub mod raydium_pool_client;

use async_trait::async_trait;

use crate::exchanges::raydium::types::RaydiumApiResponse;
use crate::shared::errors::CollectorError;

pub use raydium_pool_client::{RaydiumApiClient, DEFAULT_RAYDIUM_API_URL};

/// Off-chain source of Raydium pool records
#[async_trait]
pub trait RaydiumPoolSource: Send + Sync {
    /// One batched request for all `pool_ids`
    async fn fetch_pools(&self, pool_ids: &[String]) -> Result<RaydiumApiResponse, CollectorError>;
}
