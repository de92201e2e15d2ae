//! Infrastructure layer - price feeds and chain access

pub mod blockchain;
pub mod price;
