//! Domain layer - tokens, prices, yield metrics and the collector contract

pub mod collector;
pub mod metrics;
pub mod price;
pub mod token;
