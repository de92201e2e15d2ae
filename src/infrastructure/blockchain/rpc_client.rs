//! Solana RPC client for direct Whirlpool reads

use std::sync::Arc;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::Account as TokenAccount;
use tracing::debug;

use super::orca_structures::{
    derive_whirlpool_address, Whirlpool, WhirlpoolState, ORCA_WHIRLPOOLS_CONFIG,
    ORCA_WHIRLPOOL_PROGRAM_ID,
};
use super::WhirlpoolReader;
use crate::shared::errors::CollectorError;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Read-only Whirlpool access over JSON-RPC
pub struct SolanaRpcClient {
    client: Arc<RpcClient>,
    program_id: Pubkey,
    whirlpools_config: Pubkey,
}

impl SolanaRpcClient {
    pub fn new(rpc_url: String) -> Self {
        Self {
            client: Arc::new(RpcClient::new_with_commitment(
                rpc_url,
                CommitmentConfig::confirmed(),
            )),
            program_id: ORCA_WHIRLPOOL_PROGRAM_ID,
            whirlpools_config: ORCA_WHIRLPOOLS_CONFIG,
        }
    }

    async fn get_account_data(
        &self,
        address: &Pubkey,
    ) -> Result<(Pubkey, Vec<u8>), CollectorError> {
        let account = self.client.get_account(address).await.map_err(|e| {
            CollectorError::Chain(format!("Failed to get account {}: {}", address, e))
        })?;
        Ok((account.owner, account.data))
    }
}

#[async_trait]
impl WhirlpoolReader for SolanaRpcClient {
    fn derive_whirlpool_address(
        &self,
        mint_a: &Pubkey,
        mint_b: &Pubkey,
        tick_spacing: u16,
    ) -> Pubkey {
        derive_whirlpool_address(
            &self.program_id,
            &self.whirlpools_config,
            mint_a,
            mint_b,
            tick_spacing,
        )
    }

    async fn get_whirlpool(&self, address: &Pubkey) -> Result<WhirlpoolState, CollectorError> {
        let (owner, data) = self.get_account_data(address).await?;
        debug!("Fetched {} bytes from Whirlpool {}", data.len(), address);
        decode_whirlpool_account(address, &owner, &data, &self.program_id)
    }

    async fn get_token_account_balance(
        &self,
        token_account: &Pubkey,
    ) -> Result<u64, CollectorError> {
        let (_, data) = self.get_account_data(token_account).await?;
        parse_token_amount(&data).map_err(|e| {
            CollectorError::DataIntegrity(format!("Token account {}: {}", token_account, e))
        })
    }
}

/// Whirlpool state from a fetched account, rejecting accounts the program does not own
pub fn decode_whirlpool_account(
    address: &Pubkey,
    owner: &Pubkey,
    data: &[u8],
    program_id: &Pubkey,
) -> Result<WhirlpoolState, CollectorError> {
    if owner != program_id {
        return Err(CollectorError::DataIntegrity(format!(
            "Invalid pool owner. Expected: {}, Got: {}",
            program_id, owner
        )));
    }

    let whirlpool = Whirlpool::try_deserialize(data)
        .map_err(|e| CollectorError::DataIntegrity(format!("Whirlpool {}: {}", address, e)))?;
    Ok(whirlpool.into_state(*address))
}

/// Raw amount held by an SPL token account. Extension bytes past the base
/// layout are ignored.
pub fn parse_token_amount(data: &[u8]) -> Result<u64, String> {
    if data.len() < TokenAccount::LEN {
        return Err(format!("account too short: {} bytes", data.len()));
    }
    TokenAccount::unpack(&data[..TokenAccount::LEN])
        .map(|account| account.amount)
        .map_err(|e| format!("Failed to parse token account: {}", e))
}
