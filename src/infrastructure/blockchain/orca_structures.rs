//! Orca Whirlpool account structures

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

/// Orca Whirlpool program
pub const ORCA_WHIRLPOOL_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");

/// Orca's main WhirlpoolsConfig account
pub const ORCA_WHIRLPOOLS_CONFIG: Pubkey =
    solana_sdk::pubkey!("2LecshUwdy9xi7meFgHtFJQNSKk4KdTrcpvaB56dP2NQ");

/// Anchor discriminator of the `Whirlpool` account
pub const WHIRLPOOL_DISCRIMINATOR: [u8; 8] = [63, 149, 209, 12, 225, 128, 99, 9];

/// Serialized size of a Whirlpool account
pub const WHIRLPOOL_ACCOUNT_LEN: usize = 653;

/// Number of reward slots on a Whirlpool
pub const NUM_REWARDS: usize = 3;

/// Orca Whirlpool pool account, in on-chain field order
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, Default, PartialEq)]
pub struct Whirlpool {
    pub discriminator: [u8; 8],
    pub whirlpools_config: [u8; 32],
    pub whirlpool_bump: [u8; 1],
    pub tick_spacing: u16,
    pub tick_spacing_seed: [u8; 2],
    /// Hundredths of a basis point (3000 = 0.3%)
    pub fee_rate: u16,
    pub protocol_fee_rate: u16,
    pub liquidity: u128,
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub protocol_fee_owed_a: u64,
    pub protocol_fee_owed_b: u64,
    pub token_mint_a: [u8; 32],
    pub token_vault_a: [u8; 32],
    pub fee_growth_global_a: u128,
    pub token_mint_b: [u8; 32],
    pub token_vault_b: [u8; 32],
    pub fee_growth_global_b: u128,
    pub reward_last_updated_timestamp: u64,
    pub reward_infos: [WhirlpoolRewardInfo; NUM_REWARDS],
}

/// Orca Whirlpool reward info
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, Default, PartialEq)]
pub struct WhirlpoolRewardInfo {
    /// Reward mint, all zeroes when the slot is unused
    pub mint: [u8; 32],
    pub vault: [u8; 32],
    pub authority: [u8; 32],
    /// Q64.64 tokens emitted per second
    pub emissions_per_second_x64: u128,
    pub growth_global_x64: u128,
}

/// One active reward stream
#[derive(Debug, Clone, PartialEq)]
pub struct RewardEmission {
    pub mint: Pubkey,
    pub emissions_per_second_x64: u128,
}

/// Whirlpool fields needed to price a pool
#[derive(Debug, Clone, PartialEq)]
pub struct WhirlpoolState {
    pub address: Pubkey,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_vault_b: Pubkey,
    pub fee_rate: u16,
    pub tick_spacing: u16,
    /// Initialized reward slots only
    pub rewards: Vec<RewardEmission>,
}

impl WhirlpoolState {
    /// Fee rate as a decimal fraction
    pub fn fee_rate_decimal(&self) -> f64 {
        self.fee_rate as f64 / 1_000_000.0
    }
}

impl Whirlpool {
    /// Check if account data represents a valid Whirlpool
    pub fn is_valid_whirlpool(data: &[u8]) -> bool {
        data.len() >= WHIRLPOOL_ACCOUNT_LEN && data[..8] == WHIRLPOOL_DISCRIMINATOR
    }

    /// Try to deserialize account data into Whirlpool
    pub fn try_deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if !Self::is_valid_whirlpool(data) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Invalid Whirlpool account data",
            ));
        }

        Self::deserialize(&mut &data[..WHIRLPOOL_ACCOUNT_LEN])
    }

    pub fn into_state(self, address: Pubkey) -> WhirlpoolState {
        let rewards = self
            .reward_infos
            .iter()
            .map(|r| RewardEmission {
                mint: Pubkey::new_from_array(r.mint),
                emissions_per_second_x64: r.emissions_per_second_x64,
            })
            .filter(|r| r.mint != Pubkey::default())
            .collect();

        WhirlpoolState {
            address,
            token_mint_a: Pubkey::new_from_array(self.token_mint_a),
            token_mint_b: Pubkey::new_from_array(self.token_mint_b),
            token_vault_a: Pubkey::new_from_array(self.token_vault_a),
            token_vault_b: Pubkey::new_from_array(self.token_vault_b),
            fee_rate: self.fee_rate,
            tick_spacing: self.tick_spacing,
            rewards,
        }
    }
}

/// Program-derived Whirlpool address for a config, mint pair and tick spacing
pub fn derive_whirlpool_address(
    program_id: &Pubkey,
    whirlpools_config: &Pubkey,
    mint_a: &Pubkey,
    mint_b: &Pubkey,
    tick_spacing: u16,
) -> Pubkey {
    let tick_spacing_bytes = tick_spacing.to_le_bytes();
    let seeds: &[&[u8]] = &[
        b"whirlpool",
        whirlpools_config.as_ref(),
        mint_a.as_ref(),
        mint_b.as_ref(),
        &tick_spacing_bytes,
    ];
    Pubkey::find_program_address(seeds, program_id).0
}
