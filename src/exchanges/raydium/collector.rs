use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use super::types::{RaydiumApiResponse, RaydiumPeriodStats, RaydiumPool, RaydiumToken};
use crate::domain::collector::{retain_configs, YieldCollector};
use crate::domain::metrics::{
    proxy_impermanent_loss, range_volatility, select_window_apy, tvl_volatility_risk_score,
    AprWindow,
};
use crate::exchanges::api_clients::{RaydiumApiClient, RaydiumPoolSource};
use crate::shared::errors::{CollectorError, ConfigError};
use crate::shared::types::{CollectorConfig, ProtocolTag, RaydiumPoolConfig, YieldOpportunity};
use crate::shared::utils::{asset_label, opportunity_id};

/// Collector for Raydium pools indexed by the Raydium v3 API
pub struct RaydiumCollector {
    configs: Vec<RaydiumPoolConfig>,
    source: Arc<dyn RaydiumPoolSource>,
}

impl RaydiumCollector {
    pub fn new(
        configs: &[CollectorConfig],
        source: Arc<dyn RaydiumPoolSource>,
    ) -> Result<Self, ConfigError> {
        let configs = retain_configs(configs, ProtocolTag::Raydium, |c| match c {
            CollectorConfig::Raydium(raydium) => Some(raydium.clone()),
            _ => None,
        })?;

        Ok(Self { configs, source })
    }

    /// Collector talking to the public Raydium API
    pub fn with_default_client(configs: &[CollectorConfig]) -> Result<Self, ConfigError> {
        Self::new(configs, Arc::new(RaydiumApiClient::default()))
    }

    fn pool_ids(&self) -> Vec<String> {
        self.configs.iter().map(|c| c.pool_id.clone()).collect()
    }

    /// Decode and normalize every pool in the response, dropping the ones that fail
    pub fn process_pool_data(&self, response: RaydiumApiResponse) -> Vec<YieldOpportunity> {
        if !response.success {
            error!("Invalid Raydium API response format");
            return Vec::new();
        }

        response
            .data
            .into_iter()
            .filter_map(|raw| {
                let pool: RaydiumPool = match serde_json::from_value(raw) {
                    Ok(pool) => pool,
                    Err(e) => {
                        warn!("Skipping undecodable Raydium pool: {}", e);
                        return None;
                    }
                };

                match parse_pool(&pool) {
                    Ok(opportunity) => Some(opportunity),
                    Err(e) => {
                        warn!(
                            "Skipping Raydium pool {}: {}",
                            pool.id.as_deref().unwrap_or("unknown"),
                            e
                        );
                        None
                    }
                }
            })
            .collect()
    }
}

#[async_trait]
impl YieldCollector for RaydiumCollector {
    async fn collect(&self) -> Vec<YieldOpportunity> {
        let ids = self.pool_ids();
        info!("Collecting {} Raydium pools", ids.len());

        match self.source.fetch_pools(&ids).await {
            Ok(response) => {
                let opportunities = self.process_pool_data(response);
                info!("Raydium: {} opportunities from {} pools", opportunities.len(), ids.len());
                opportunities
            }
            Err(e) => {
                error!("Failed to fetch Raydium pool data: {}", e);
                Vec::new()
            }
        }
    }

    fn protocol_name(&self) -> &'static str {
        ProtocolTag::Raydium.display_name()
    }

    fn configurations(&self) -> Vec<CollectorConfig> {
        self.configs.iter().cloned().map(CollectorConfig::Raydium).collect()
    }
}

/// Normalize one raw pool record
pub fn parse_pool(pool: &RaydiumPool) -> Result<YieldOpportunity, CollectorError> {
    let pool_id = pool
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CollectorError::DataIntegrity("missing pool id".to_string()))?;
    let symbol_a = token_symbol(pool.mint_a.as_ref(), "mintA")?;
    let symbol_b = token_symbol(pool.mint_b.as_ref(), "mintB")?;
    let tvl = pool
        .tvl
        .filter(|tvl| tvl.is_finite() && *tvl > 0.0)
        .ok_or_else(|| CollectorError::DataIntegrity("missing or non-positive tvl".to_string()))?;

    let apy = select_window_apy(&[
        pool.month.as_ref().map(apr_window),
        pool.week.as_ref().map(apr_window),
        pool.day.as_ref().map(apr_window),
    ]);

    let volatility = pool
        .month
        .as_ref()
        .map(|m| range_volatility(m.price_min, m.price_max))
        .unwrap_or(0.0);

    Ok(YieldOpportunity {
        id: opportunity_id(ProtocolTag::Raydium.as_str(), symbol_a, symbol_b),
        protocol: ProtocolTag::Raydium.display_name().to_string(),
        asset: asset_label(symbol_a, symbol_b),
        pool_id: pool_id.to_string(),
        total_apy: apy.total_apy,
        fee_apy: apy.fee_apy,
        reward_apy: apy.reward_apy,
        tvl_usd: tvl,
        risk_score: tvl_volatility_risk_score(tvl, volatility),
        impermanent_loss_risk: proxy_impermanent_loss(volatility),
        reward_tokens: pool.reward_symbols(),
    })
}

fn token_symbol<'a>(
    token: Option<&'a RaydiumToken>,
    field: &str,
) -> Result<&'a str, CollectorError> {
    token
        .and_then(|t| t.symbol.as_deref())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CollectorError::DataIntegrity(format!("missing {}", field)))
}

fn apr_window(stats: &RaydiumPeriodStats) -> AprWindow {
    AprWindow {
        apr: stats.apr,
        fee_apr: stats.fee_apr,
    }
}
