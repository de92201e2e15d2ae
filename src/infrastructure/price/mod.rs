//! Price feed implementations

pub mod coingecko;
pub mod rate_limiter;

pub use coingecko::{CoinGeckoPriceFeed, DEFAULT_COINGECKO_URL};
pub use rate_limiter::{RequestSpacer, DEFAULT_MIN_REQUEST_INTERVAL};
