pub mod collector;
pub mod types;

pub use collector::{parse_pool, RaydiumCollector};
