//! Yield metrics - pure APY, risk score and impermanent-loss derivations

pub mod apy;
pub mod risk;

pub use apy::{
    annual_reward_value, emissions_per_second, estimated_fee_apy, reward_apy, select_window_apy,
    ApyBreakdown, AprWindow,
};
pub use risk::{
    clamp_risk_score, historical_impermanent_loss, proxy_impermanent_loss, range_volatility,
    tvl_tier_risk_score, tvl_volatility_risk_score,
};
