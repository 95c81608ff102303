use anchor_lang::prelude::*;

use crate::error::ReflectionError;
use crate::holder_set::HolderSet;
use crate::ledger::Ledger;
use crate::state::{HolderAccount, ReflectionConfig};

// ============================================================================
// Single Holder
// ============================================================================

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct SetExclusion<'info> {
    #[account(
        mut,
        seeds = [ReflectionConfig::SEED, config.token.as_ref()],
        bump = config.bump,
        has_one = authority @ ReflectionError::Unauthorized
    )]
    pub config: Account<'info, ReflectionConfig>,

    #[account(
        mut,
        seeds = [HolderAccount::SEED, config.key().as_ref(), owner.as_ref()],
        bump = holder.bump,
    )]
    pub holder: Account<'info, HolderAccount>,

    pub authority: Signer<'info>,
}

pub fn set_reflection_exclusion_handler(
    ctx: Context<SetExclusion>,
    owner: Pubkey,
    excluded: bool,
) -> Result<()> {
    let config_key = ctx.accounts.config.key();
    let config: &mut ReflectionConfig = &mut ctx.accounts.config;
    let holder: &mut HolderAccount = &mut ctx.accounts.holder;

    let mut ledger = Ledger::new(config, std::slice::from_mut(holder));
    if ledger.set_reflection_exclusion(&owner, excluded)? {
        emit_reflection_exclusion(config_key, &ledger, &owner)?;
    }
    Ok(())
}

pub fn set_fee_exclusion_handler(
    ctx: Context<SetExclusion>,
    owner: Pubkey,
    excluded: bool,
) -> Result<()> {
    let config_key = ctx.accounts.config.key();
    let config: &mut ReflectionConfig = &mut ctx.accounts.config;
    let holder: &mut HolderAccount = &mut ctx.accounts.holder;

    let mut ledger = Ledger::new(config, std::slice::from_mut(holder));
    if ledger.set_fee_exclusion(&owner, excluded)? {
        emit!(FeeExclusionSet {
            config: config_key,
            owner,
            excluded,
        });
    }
    Ok(())
}

// ============================================================================
// Batch
// ============================================================================

/// Holder PDAs of every listed owner are passed as writable remaining accounts
#[derive(Accounts)]
pub struct SetBatchExclusion<'info> {
    #[account(
        mut,
        seeds = [ReflectionConfig::SEED, config.token.as_ref()],
        bump = config.bump,
        has_one = authority @ ReflectionError::Unauthorized
    )]
    pub config: Account<'info, ReflectionConfig>,

    pub authority: Signer<'info>,
}

pub fn set_batch_reflection_exclusion_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetBatchExclusion<'info>>,
    owners: Vec<Pubkey>,
    flags: Vec<bool>,
) -> Result<()> {
    let config_key = ctx.accounts.config.key();
    let mut holders = HolderSet::load(&config_key, ctx.remaining_accounts)?;
    let config: &mut ReflectionConfig = &mut ctx.accounts.config;

    let mut ledger = Ledger::new(config, &mut holders.states);
    ledger.set_batch_reflection_exclusion(&owners, &flags)?;

    for owner in &owners {
        emit_reflection_exclusion(config_key, &ledger, owner)?;
    }
    holders.commit()?;

    msg!("Reflection exclusion updated for {} holders", owners.len());
    Ok(())
}

pub fn set_batch_fee_exclusion_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetBatchExclusion<'info>>,
    owners: Vec<Pubkey>,
    flags: Vec<bool>,
) -> Result<()> {
    let config_key = ctx.accounts.config.key();
    let mut holders = HolderSet::load(&config_key, ctx.remaining_accounts)?;
    let config: &mut ReflectionConfig = &mut ctx.accounts.config;

    let mut ledger = Ledger::new(config, &mut holders.states);
    ledger.set_batch_fee_exclusion(&owners, &flags)?;

    for (owner, &excluded) in owners.iter().zip(&flags) {
        emit!(FeeExclusionSet {
            config: config_key,
            owner: *owner,
            excluded,
        });
    }
    holders.commit()?;

    msg!("Fee exclusion updated for {} holders", owners.len());
    Ok(())
}

fn emit_reflection_exclusion(config_key: Pubkey, ledger: &Ledger<'_>, owner: &Pubkey) -> Result<()> {
    let holder = ledger.holder(owner)?;
    emit!(ReflectionExclusionSet {
        config: config_key,
        owner: *owner,
        excluded: holder.reflection_excluded,
        balance: holder.real_balance(ledger.config().reflection_per_token)?,
        excluded_supply: ledger.config().excluded_supply,
    });
    Ok(())
}

#[event]
pub struct ReflectionExclusionSet {
    pub config: Pubkey,
    pub owner: Pubkey,
    pub excluded: bool,
    pub balance: u64,
    pub excluded_supply: u64,
}

#[event]
pub struct FeeExclusionSet {
    pub config: Pubkey,
    pub owner: Pubkey,
    pub excluded: bool,
}
