use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use super::RaydiumPoolSource;
use crate::exchanges::raydium::types::RaydiumApiResponse;
use crate::shared::errors::CollectorError;

pub const DEFAULT_RAYDIUM_API_URL: &str = "https://api-v3.raydium.io";

/// Raydium v3 REST client
pub struct RaydiumApiClient {
    http_client: Client,
    base_url: String,
}

impl RaydiumApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn pools_url(&self, pool_ids: &[String]) -> String {
        format!("{}/pools/info/ids?ids={}", self.base_url, pool_ids.join(","))
    }
}

impl Default for RaydiumApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_RAYDIUM_API_URL)
    }
}

#[async_trait]
impl RaydiumPoolSource for RaydiumApiClient {
    async fn fetch_pools(&self, pool_ids: &[String]) -> Result<RaydiumApiResponse, CollectorError> {
        let url = self.pools_url(pool_ids);
        info!("Fetching Raydium pool info from: {}", url);

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CollectorError::Transport(format!(
                "Raydium API request failed with status: {}",
                response.status()
            )));
        }

        Ok(response.json::<RaydiumApiResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_ids_are_comma_joined() {
        let client = RaydiumApiClient::new("https://api-v3.raydium.io/");
        let url = client.pools_url(&["a".to_string(), "b".to_string()]);
        assert_eq!(url, "https://api-v3.raydium.io/pools/info/ids?ids=a,b");
    }
}
