//! Raw Raydium v3 API records, reduced to the fields the collector reads.
//! Anything else in the payload is ignored so its shape cannot drop a pool.

use serde::Deserialize;
use serde_json::Value;

/// `GET /pools/info/ids` envelope; pools stay raw until decoded one by one
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaydiumApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaydiumPool {
    pub id: Option<String>,
    pub mint_a: Option<RaydiumToken>,
    pub mint_b: Option<RaydiumToken>,
    pub tvl: Option<f64>,
    pub day: Option<RaydiumPeriodStats>,
    pub week: Option<RaydiumPeriodStats>,
    pub month: Option<RaydiumPeriodStats>,
    /// Kept raw: only `mint.symbol` is read and a `null` list is legal
    pub reward_default_infos: Option<Vec<Value>>,
}

impl RaydiumPool {
    /// Non-empty reward mint symbols, in listing order
    pub fn reward_symbols(&self) -> Vec<String> {
        self.reward_default_infos
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|info| info.pointer("/mint/symbol")?.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaydiumToken {
    pub symbol: Option<String>,
}

/// Aggregates for one time window (day, week or month). APR figures are percentages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaydiumPeriodStats {
    pub apr: Option<f64>,
    pub fee_apr: Option<f64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}
