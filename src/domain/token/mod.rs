//! Token domain - static token metadata

mod token_registry;

pub use token_registry::{TokenRegistry, UNKNOWN_DECIMALS, UNKNOWN_SYMBOL};
