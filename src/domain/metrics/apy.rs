//! APY derivation: window selection, fee heuristics and reward emissions

/// Seconds in a 365-day year
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// Share of TVL assumed to trade each day when no volume data exists
pub const ASSUMED_DAILY_VOLUME_SHARE: f64 = 0.1;

/// 2^64, the scale of Q64.64 fixed-point values
const Q64: f64 = 18_446_744_073_709_551_616.0;

/// APR figures reported for one aggregation window, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AprWindow {
    pub apr: Option<f64>,
    pub fee_apr: Option<f64>,
}

/// Blended APY split into its fee and reward components (decimal fractions)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApyBreakdown {
    pub total_apy: f64,
    pub fee_apy: f64,
    pub reward_apy: f64,
}

impl ApyBreakdown {
    /// Reward part is whatever the total does not explain; it is not floored at zero.
    pub fn from_total_and_fee(total_apy: f64, fee_apy: f64) -> Self {
        Self {
            total_apy,
            fee_apy,
            reward_apy: total_apy - fee_apy,
        }
    }

    pub fn from_components(fee_apy: f64, reward_apy: f64) -> Self {
        Self {
            total_apy: fee_apy + reward_apy,
            fee_apy,
            reward_apy,
        }
    }
}

/// Pick APR and fee APR from the first window (in priority order) that reports
/// each figure. The two figures are selected independently.
pub fn select_window_apy(windows: &[Option<AprWindow>]) -> ApyBreakdown {
    let total = windows
        .iter()
        .flatten()
        .find_map(|w| w.apr)
        .unwrap_or(0.0);
    let fee = windows
        .iter()
        .flatten()
        .find_map(|w| w.fee_apr)
        .unwrap_or(0.0);

    ApyBreakdown::from_total_and_fee(total / 100.0, fee / 100.0)
}

/// Fee APY assuming 10% of TVL trades daily: `fee_rate * (0.1 * tvl) * 365 / tvl`.
/// Callers must reject non-positive TVL first.
pub fn estimated_fee_apy(fee_rate: f64, tvl: f64) -> f64 {
    let assumed_daily_volume = tvl * ASSUMED_DAILY_VOLUME_SHARE;
    fee_rate * assumed_daily_volume * 365.0 / tvl
}

/// Convert a Q64.64 per-second emission rate to a decimal rate
pub fn emissions_per_second(emissions_per_second_x64: u128) -> f64 {
    emissions_per_second_x64 as f64 / Q64
}

/// USD value emitted per year by one reward stream
pub fn annual_reward_value(emissions_per_second_x64: u128, reward_price: f64) -> f64 {
    emissions_per_second(emissions_per_second_x64) * SECONDS_PER_YEAR * reward_price
}

/// Summed annual reward value over TVL
pub fn reward_apy(total_annual_reward_value: f64, tvl: f64) -> f64 {
    total_annual_reward_value / tvl
}
