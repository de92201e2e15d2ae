//! Protocol collectors and their upstream clients

pub mod api_clients;
pub mod orca_whirlpool;
pub mod raydium;

pub use orca_whirlpool::OrcaCollector;
pub use raydium::RaydiumCollector;
