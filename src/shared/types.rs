//! Common types used across the collectors

use serde::{Deserialize, Serialize};

/// Default tick spacing used to derive a Whirlpool address.
pub const DEFAULT_TICK_SPACING: u16 = 64;

/// Static token metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub address: String,
    pub decimals: u8,
    /// CoinGecko coin id
    pub price_feed_id: Option<String>,
}

/// Protocol tag of a collector config entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolTag {
    Raydium,
    Orca,
}

impl ProtocolTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolTag::Raydium => "raydium",
            ProtocolTag::Orca => "orca",
        }
    }

    /// Human-readable protocol name emitted on opportunities
    pub fn display_name(&self) -> &'static str {
        match self {
            ProtocolTag::Raydium => "Raydium",
            ProtocolTag::Orca => "Orca",
        }
    }
}

impl std::str::FromStr for ProtocolTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raydium" => Ok(ProtocolTag::Raydium),
            "orca" | "whirlpool" => Ok(ProtocolTag::Orca),
            _ => Err(format!("Unknown protocol: {}", s)),
        }
    }
}

/// Raydium pool config, addressed by the pool id the Raydium API indexes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaydiumPoolConfig {
    pub collector_id: String,
    pub pair: String,
    pub enabled: bool,
    pub pool_id: String,
}

/// Orca Whirlpool config, addressed by its token mints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrcaPoolConfig {
    pub collector_id: String,
    pub pair: String,
    pub enabled: bool,
    pub mint_one: String,
    pub mint_two: String,
    #[serde(default)]
    pub tick_spacing: Option<u16>,
}

impl OrcaPoolConfig {
    pub fn tick_spacing(&self) -> u16 {
        self.tick_spacing.unwrap_or(DEFAULT_TICK_SPACING)
    }
}

/// One configured pool, tagged by the protocol that serves it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "collector", rename_all = "lowercase")]
pub enum CollectorConfig {
    Raydium(RaydiumPoolConfig),
    Orca(OrcaPoolConfig),
}

impl CollectorConfig {
    pub fn protocol(&self) -> ProtocolTag {
        match self {
            CollectorConfig::Raydium(_) => ProtocolTag::Raydium,
            CollectorConfig::Orca(_) => ProtocolTag::Orca,
        }
    }

    pub fn collector_id(&self) -> &str {
        match self {
            CollectorConfig::Raydium(c) => &c.collector_id,
            CollectorConfig::Orca(c) => &c.collector_id,
        }
    }

    pub fn pair(&self) -> &str {
        match self {
            CollectorConfig::Raydium(c) => &c.pair,
            CollectorConfig::Orca(c) => &c.pair,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            CollectorConfig::Raydium(c) => c.enabled,
            CollectorConfig::Orca(c) => c.enabled,
        }
    }
}

/// Normalized yield opportunity emitted by every collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldOpportunity {
    pub id: String,
    pub protocol: String,
    pub asset: String,
    pub pool_id: String,
    pub total_apy: f64,
    pub fee_apy: f64,
    /// `total_apy - fee_apy`; may be negative when upstream windows disagree
    pub reward_apy: f64,
    pub tvl_usd: f64,
    pub risk_score: u8,
    pub impermanent_loss_risk: f64,
    pub reward_tokens: Vec<String>,
}
