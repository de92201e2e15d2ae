//! Direct blockchain reading for Orca Whirlpools

pub mod orca_structures;
pub mod rpc_client;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::shared::errors::CollectorError;

pub use orca_structures::{RewardEmission, Whirlpool, WhirlpoolState};
pub use rpc_client::{SolanaRpcClient, DEFAULT_RPC_URL};

/// Read-only on-chain access needed to price a Whirlpool
#[async_trait]
pub trait WhirlpoolReader: Send + Sync {
    /// Deterministic pool address for a mint pair and tick spacing
    fn derive_whirlpool_address(
        &self,
        mint_a: &Pubkey,
        mint_b: &Pubkey,
        tick_spacing: u16,
    ) -> Pubkey;

    async fn get_whirlpool(&self, address: &Pubkey) -> Result<WhirlpoolState, CollectorError>;

    /// Raw (undecimaled) balance of an SPL token account
    async fn get_token_account_balance(
        &self,
        token_account: &Pubkey,
    ) -> Result<u64, CollectorError>;
}
