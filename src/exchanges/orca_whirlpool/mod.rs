pub mod collector;

pub use collector::{OrcaCollector, HISTORY_DAYS};
