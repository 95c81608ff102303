//! Reflection Engine Program
//!
//! Fee-on-transfer accounting for a reflection token. A share of every
//! taxed transfer is spread over all included holders through a global
//! per-token accumulator; holders realize it lazily when next touched.
//!
//! The token wrapper (the config `authority`) delegates every balance
//! change here and reads balances through `get_real_balance`. Burn fees are
//! only signalled (`BurnRequested`); the wrapper burns and confirms with
//! `apply_burn`.

use anchor_lang::prelude::*;

pub mod error;
pub mod holder_set;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod state;

use instructions::*;
use math::FeeRates;

declare_id!("FxqNvv49qmgq8HToP7H9Czvpuz9y4ddJ4gg73TLYUdHF");

#[program]
pub mod reflection_engine {
    use super::*;

    /// Create the engine config for the token mint; the signer becomes authority
    pub fn initialize_engine(ctx: Context<InitializeEngine>) -> Result<()> {
        instructions::initialize::initialize_engine_handler(ctx)
    }

    /// Set fee rates and recipients (one shot)
    pub fn initialize_fees(
        ctx: Context<ConfigureFees>,
        rates: FeeRates,
        creator: Pubkey,
        liquidity_pool: Pubkey,
    ) -> Result<()> {
        instructions::initialize::initialize_fees_handler(ctx, rates, creator, liquidity_pool)
    }

    /// Replace fee rates and recipients after initialization
    pub fn update_fees(
        ctx: Context<ConfigureFees>,
        rates: FeeRates,
        creator: Pubkey,
        liquidity_pool: Pubkey,
    ) -> Result<()> {
        instructions::initialize::update_fees_handler(ctx, rates, creator, liquidity_pool)
    }

    /// Create the holder record of `owner`, checkpointed at the current accumulator
    pub fn open_holder(ctx: Context<OpenHolder>, owner: Pubkey) -> Result<()> {
        instructions::holder::open_holder_handler(ctx, owner)
    }

    /// Credit new supply to `owner`
    pub fn mint_to(ctx: Context<MintTo>, owner: Pubkey, amount: u64) -> Result<()> {
        instructions::supply::mint_to_handler(ctx, owner, amount)
    }

    /// Confirm a burn performed for signalled burn fees
    pub fn apply_burn(ctx: Context<ApplyBurn>, amount: u64) -> Result<()> {
        instructions::supply::apply_burn_handler(ctx, amount)
    }

    /// Move `amount` from `sender` to `recipient`, charging fees
    /// Holder PDAs are passed as remaining accounts
    pub fn process_transfer<'info>(
        ctx: Context<'_, '_, 'info, 'info, ProcessTransfer<'info>>,
        sender: Pubkey,
        recipient: Pubkey,
        amount: u64,
    ) -> Result<TransferOutcome> {
        instructions::transfer::process_transfer_handler(ctx, sender, recipient, amount)
    }

    /// Transfer from `sender` to up to 99 recipients after an aggregate balance check
    pub fn process_batch_transfer<'info>(
        ctx: Context<'_, '_, 'info, 'info, ProcessTransfer<'info>>,
        sender: Pubkey,
        recipients: Vec<Pubkey>,
        amounts: Vec<u64>,
    ) -> Result<TransferOutcome> {
        instructions::transfer::process_batch_transfer_handler(ctx, sender, recipients, amounts)
    }

    /// Apply owed reflection to the stored balance of `owner`
    pub fn update_reflected_balance(
        ctx: Context<UpdateReflectedBalance>,
        owner: Pubkey,
    ) -> Result<()> {
        instructions::holder::update_reflected_balance_handler(ctx, owner)
    }

    /// Balance of `owner` including unsettled reflection
    pub fn get_real_balance(ctx: Context<GetRealBalance>, owner: Pubkey) -> Result<u64> {
        instructions::holder::get_real_balance_handler(ctx, owner)
    }

    pub fn set_reflection_exclusion(
        ctx: Context<SetExclusion>,
        owner: Pubkey,
        excluded: bool,
    ) -> Result<()> {
        instructions::exclusion::set_reflection_exclusion_handler(ctx, owner, excluded)
    }

    pub fn set_fee_exclusion(ctx: Context<SetExclusion>, owner: Pubkey, excluded: bool) -> Result<()> {
        instructions::exclusion::set_fee_exclusion_handler(ctx, owner, excluded)
    }

    pub fn set_batch_reflection_exclusion<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetBatchExclusion<'info>>,
        owners: Vec<Pubkey>,
        flags: Vec<bool>,
    ) -> Result<()> {
        instructions::exclusion::set_batch_reflection_exclusion_handler(ctx, owners, flags)
    }

    pub fn set_batch_fee_exclusion<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetBatchExclusion<'info>>,
        owners: Vec<Pubkey>,
        flags: Vec<bool>,
    ) -> Result<()> {
        instructions::exclusion::set_batch_fee_exclusion_handler(ctx, owners, flags)
    }
}
