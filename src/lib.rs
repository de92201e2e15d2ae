//! Yield Collector - normalized yield opportunities across Solana DEX protocols
//! Built with Domain-Driven Design principles

pub mod config;
pub mod domain;
pub mod exchanges;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use domain::collector::YieldCollector;
pub use domain::price::{PriceFeed, PriceService};
pub use domain::token::TokenRegistry;
pub use exchanges::{OrcaCollector, RaydiumCollector};
pub use shared::errors::{CollectorError, ConfigError, PriceError};
pub use shared::types::{CollectorConfig, YieldOpportunity};
