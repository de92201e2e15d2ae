use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::Path};

use crate::domain::price::DEFAULT_CACHE_TTL;
use crate::exchanges::api_clients::DEFAULT_RAYDIUM_API_URL;
use crate::infrastructure::blockchain::DEFAULT_RPC_URL;
use crate::infrastructure::price::{DEFAULT_COINGECKO_URL, DEFAULT_MIN_REQUEST_INTERVAL};
use crate::shared::errors::ConfigError;
use crate::shared::types::CollectorConfig;

pub const DEFAULT_CONFIG_PATH: &str = "Collectors.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpcCfg {
    pub url: String,
}

impl Default for RpcCfg {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceCfg {
    pub base_url: String,
    pub min_request_interval_ms: u64,
    pub cache_ttl_secs: u64,
}

impl PriceCfg {
    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for PriceCfg {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COINGECKO_URL.to_string(),
            min_request_interval_ms: DEFAULT_MIN_REQUEST_INTERVAL.as_millis() as u64,
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RaydiumCfg {
    pub base_url: String,
}

impl Default for RaydiumCfg {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RAYDIUM_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rpc: RpcCfg,
    pub price: PriceCfg,
    pub raydium: RaydiumCfg,
    pub collectors: Vec<CollectorConfig>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("read {}: {}", path.display(), e)))?;
        Self::from_toml(&s).map_err(|e| match e {
            ConfigError::Load(msg) => {
                ConfigError::Load(format!("parse {}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s).map_err(|e| ConfigError::Load(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.price.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid("price.cache_ttl_secs must be positive".to_string()));
        }
        let mut seen = std::collections::HashSet::new();
        for collector in &self.collectors {
            if !seen.insert(collector.collector_id()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate collector_id: {}",
                    collector.collector_id()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::ProtocolTag;

    #[test]
    fn test_defaults_apply_to_missing_sections() {
        let cfg = Config::from_toml(
            r#"
            [[collectors]]
            collector = "orca"
            collector_id = "orca-sol-usdc"
            pair = "SOL/USDC"
            enabled = true
            mint_one = "So11111111111111111111111111111111111111112"
            mint_two = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.rpc.url, DEFAULT_RPC_URL);
        assert_eq!(cfg.price.min_request_interval(), Duration::from_millis(1100));
        assert_eq!(cfg.price.cache_ttl(), Duration::from_secs(300));
        assert_eq!(cfg.raydium.base_url, DEFAULT_RAYDIUM_API_URL);
        assert_eq!(cfg.collectors.len(), 1);
        assert_eq!(cfg.collectors[0].protocol(), ProtocolTag::Orca);
    }

    #[test]
    fn test_overrides_and_mixed_collectors() {
        let cfg = Config::from_toml(
            r#"
            [rpc]
            url = "http://localhost:8899"

            [price]
            min_request_interval_ms = 0
            cache_ttl_secs = 60

            [[collectors]]
            collector = "raydium"
            collector_id = "raydium-sol-usdc"
            pair = "SOL/USDC"
            enabled = false
            pool_id = "58oQChx4yWmvKdwLLZzBi4ChoCc2fqCUWBkwMihLYQo2"

            [[collectors]]
            collector = "orca"
            collector_id = "orca-orca-usdc"
            pair = "ORCA/USDC"
            enabled = true
            mint_one = "orcaEKTdK7LKz57vaAYr9QeNsVEPfiu6QeMU1kektZE"
            mint_two = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"
            tick_spacing = 8
            "#,
        )
        .unwrap();

        assert_eq!(cfg.rpc.url, "http://localhost:8899");
        assert_eq!(cfg.price.min_request_interval(), Duration::ZERO);
        assert_eq!(cfg.price.base_url, DEFAULT_COINGECKO_URL);
        assert_eq!(cfg.collectors.len(), 2);
        assert!(!cfg.collectors[0].enabled());
        match &cfg.collectors[1] {
            CollectorConfig::Orca(orca) => assert_eq!(orca.tick_spacing(), 8),
            other => panic!("unexpected collector: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_files() {
        assert!(matches!(Config::from_toml("rpc = 5"), Err(ConfigError::Load(_))));
        assert!(matches!(
            Config::from_toml("[price]\ncache_ttl_secs = 0"),
            Err(ConfigError::Invalid(_))
        ));

        let duplicate = r#"
            [[collectors]]
            collector = "raydium"
            collector_id = "same"
            pair = "SOL/USDC"
            enabled = true
            pool_id = "a"

            [[collectors]]
            collector = "raydium"
            collector_id = "same"
            pair = "SOL/USDC"
            enabled = true
            pool_id = "b"
        "#;
        assert!(matches!(Config::from_toml(duplicate), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = Config::from_file("/nonexistent/Collectors.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
