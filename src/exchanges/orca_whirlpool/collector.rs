use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{join_all, try_join_all};
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, info, warn};

use crate::domain::collector::{retain_configs, YieldCollector};
use crate::domain::metrics::{
    annual_reward_value, estimated_fee_apy, historical_impermanent_loss, reward_apy,
    tvl_tier_risk_score,
};
use crate::domain::price::PriceService;
use crate::domain::token::TokenRegistry;
use crate::infrastructure::blockchain::{RewardEmission, WhirlpoolReader, WhirlpoolState};
use crate::shared::errors::{CollectorError, ConfigError, PriceError};
use crate::shared::types::{CollectorConfig, OrcaPoolConfig, ProtocolTag, YieldOpportunity};
use crate::shared::utils::{asset_label, opportunity_id, to_ui_amount};

/// Days of price history used for the impermanent-loss estimate
pub const HISTORY_DAYS: u32 = 30;

/// Collector reading Orca Whirlpools straight from chain
pub struct OrcaCollector {
    configs: Vec<OrcaPoolConfig>,
    price_service: Arc<PriceService>,
    reader: Arc<dyn WhirlpoolReader>,
    registry: Arc<TokenRegistry>,
}

impl OrcaCollector {
    pub fn new(
        configs: &[CollectorConfig],
        price_service: Arc<PriceService>,
        reader: Arc<dyn WhirlpoolReader>,
        registry: Arc<TokenRegistry>,
    ) -> Result<Self, ConfigError> {
        let configs = retain_configs(configs, ProtocolTag::Orca, |c| match c {
            CollectorConfig::Orca(orca) => Some(orca.clone()),
            _ => None,
        })?;

        Ok(Self {
            configs,
            price_service,
            reader,
            registry,
        })
    }

    async fn collect_pool(
        &self,
        config: &OrcaPoolConfig,
    ) -> Result<YieldOpportunity, CollectorError> {
        let mint_one = parse_mint(&config.mint_one)?;
        let mint_two = parse_mint(&config.mint_two)?;
        let address = self
            .reader
            .derive_whirlpool_address(&mint_one, &mint_two, config.tick_spacing());
        debug!("{}: reading Whirlpool {}", config.collector_id, address);

        let state = self.reader.get_whirlpool(&address).await?;
        let mint_a = state.token_mint_a.to_string();
        let mint_b = state.token_mint_b.to_string();

        let (raw_a, raw_b) = tokio::try_join!(
            self.reader.get_token_account_balance(&state.token_vault_a),
            self.reader.get_token_account_balance(&state.token_vault_b),
        )?;
        let amount_a = to_ui_amount(raw_a, self.registry.decimals_or_default(&mint_a));
        let amount_b = to_ui_amount(raw_b, self.registry.decimals_or_default(&mint_b));

        let (price_a, price_b) = tokio::try_join!(
            self.price_service.get_price(&mint_a),
            self.price_service.get_price(&mint_b),
        )?;

        let tvl = amount_a * price_a + amount_b * price_b;
        if !tvl.is_finite() || tvl <= 0.0 {
            return Err(CollectorError::DataIntegrity(format!(
                "Whirlpool {} has non-positive TVL: {}",
                address, tvl
            )));
        }

        let rewards = active_rewards(&state);
        let fee_apy = estimated_fee_apy(state.fee_rate_decimal(), tvl);
        let reward_apy = reward_apy(self.yearly_reward_value(&rewards).await?, tvl);

        let (history_a, history_b) = tokio::join!(
            self.price_service.get_historical_prices(&mint_a, HISTORY_DAYS),
            self.price_service.get_historical_prices(&mint_b, HISTORY_DAYS),
        );
        let impermanent_loss_risk = historical_impermanent_loss(&history_a, &history_b)?;

        let symbol_a = self.registry.symbol_or_unknown(&mint_a);
        let symbol_b = self.registry.symbol_or_unknown(&mint_b);
        let reward_tokens = rewards
            .iter()
            .map(|r| self.registry.symbol_or_unknown(&r.mint.to_string()))
            .collect();

        Ok(YieldOpportunity {
            id: opportunity_id(ProtocolTag::Orca.as_str(), &symbol_a, &symbol_b),
            protocol: ProtocolTag::Orca.display_name().to_string(),
            asset: asset_label(&symbol_a, &symbol_b),
            pool_id: address.to_string(),
            total_apy: fee_apy + reward_apy,
            fee_apy,
            reward_apy,
            tvl_usd: tvl,
            risk_score: tvl_tier_risk_score(tvl),
            impermanent_loss_risk,
            reward_tokens,
        })
    }

    /// Summed USD value emitted per year across reward streams
    async fn yearly_reward_value(&self, rewards: &[&RewardEmission]) -> Result<f64, PriceError> {
        let values = try_join_all(rewards.iter().map(|reward| async move {
            let price = self.price_service.get_price(&reward.mint.to_string()).await?;
            Ok::<_, PriceError>(annual_reward_value(reward.emissions_per_second_x64, price))
        }))
        .await?;

        Ok(values.into_iter().sum())
    }
}

#[async_trait]
impl YieldCollector for OrcaCollector {
    async fn collect(&self) -> Vec<YieldOpportunity> {
        info!("Collecting {} Orca Whirlpools", self.configs.len());

        let results = join_all(self.configs.iter().map(|config| self.collect_pool(config))).await;

        let opportunities: Vec<YieldOpportunity> = results
            .into_iter()
            .zip(&self.configs)
            .filter_map(|(result, config)| match result {
                Ok(opportunity) => Some(opportunity),
                Err(e) => {
                    warn!("Skipping Orca pool {} ({}): {}", config.collector_id, config.pair, e);
                    None
                }
            })
            .collect();

        info!("Orca: {} opportunities from {} pools", opportunities.len(), self.configs.len());
        opportunities
    }

    fn protocol_name(&self) -> &'static str {
        ProtocolTag::Orca.display_name()
    }

    fn configurations(&self) -> Vec<CollectorConfig> {
        self.configs.iter().cloned().map(CollectorConfig::Orca).collect()
    }
}

fn parse_mint(mint: &str) -> Result<Pubkey, CollectorError> {
    Pubkey::from_str(mint)
        .map_err(|e| CollectorError::DataIntegrity(format!("Invalid mint {}: {}", mint, e)))
}

/// Reward slots with a real mint; the all-zero mint marks an unused slot
fn active_rewards(state: &WhirlpoolState) -> Vec<&RewardEmission> {
    state
        .rewards
        .iter()
        .filter(|r| r.mint != Pubkey::default())
        .collect()
}
