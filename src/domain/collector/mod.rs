//! Collector domain - the protocol-agnostic collection contract

use async_trait::async_trait;
use tracing::warn;

use crate::shared::errors::ConfigError;
use crate::shared::types::{CollectorConfig, ProtocolTag, YieldOpportunity};

/// A per-protocol source of yield opportunities
#[async_trait]
pub trait YieldCollector: Send + Sync {
    /// Collect opportunities for every retained pool. Never fails: pools that
    /// cannot be read are logged and skipped, a dead upstream yields nothing.
    async fn collect(&self) -> Vec<YieldOpportunity>;

    /// Human-readable protocol name
    fn protocol_name(&self) -> &'static str;

    /// Configurations retained at construction
    fn configurations(&self) -> Vec<CollectorConfig>;
}

/// Keep only enabled entries for `protocol`, failing fast on an empty input
/// or when nothing survives the filter.
pub fn retain_configs<T>(
    configs: &[CollectorConfig],
    protocol: ProtocolTag,
    select: impl Fn(&CollectorConfig) -> Option<T>,
) -> Result<Vec<T>, ConfigError> {
    if configs.is_empty() {
        return Err(ConfigError::Empty);
    }

    let retained: Vec<T> = configs
        .iter()
        .filter(|c| c.protocol() == protocol && c.enabled())
        .filter_map(select)
        .collect();

    if retained.is_empty() {
        warn!("No enabled configurations found for collector type: {}", protocol.as_str());
        return Err(ConfigError::NoMatchingConfigs(protocol.as_str().to_string()));
    }

    Ok(retained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::{OrcaPoolConfig, RaydiumPoolConfig};

    fn raydium(id: &str, enabled: bool) -> CollectorConfig {
        CollectorConfig::Raydium(RaydiumPoolConfig {
            collector_id: format!("raydium-{}", id),
            pair: "SOL/USDC".to_string(),
            enabled,
            pool_id: id.to_string(),
        })
    }

    fn orca(enabled: bool) -> CollectorConfig {
        CollectorConfig::Orca(OrcaPoolConfig {
            collector_id: "orca-sol-usdc".to_string(),
            pair: "SOL/USDC".to_string(),
            enabled,
            mint_one: "So11111111111111111111111111111111111111112".to_string(),
            mint_two: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            tick_spacing: None,
        })
    }

    fn select_raydium(c: &CollectorConfig) -> Option<RaydiumPoolConfig> {
        match c {
            CollectorConfig::Raydium(r) => Some(r.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = retain_configs(&[], ProtocolTag::Raydium, select_raydium).unwrap_err();
        assert_eq!(err, ConfigError::Empty);
    }

    #[test]
    fn test_disabled_and_foreign_entries_are_dropped() {
        let configs = vec![orca(true), raydium("a", false), raydium("b", true)];
        let retained = retain_configs(&configs, ProtocolTag::Raydium, select_raydium).unwrap();

        assert_eq!(retained.len(), 1);
        assert_eq!(retained[0].pool_id, "b");
    }

    #[test]
    fn test_all_filtered_out_is_rejected() {
        let configs = vec![orca(true), raydium("a", false)];
        let err = retain_configs(&configs, ProtocolTag::Raydium, select_raydium).unwrap_err();
        assert_eq!(err, ConfigError::NoMatchingConfigs("raydium".to_string()));
    }
}
