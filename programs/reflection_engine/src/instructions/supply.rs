use anchor_lang::prelude::*;

use crate::error::ReflectionError;
use crate::ledger::Ledger;
use crate::state::{HolderAccount, ReflectionConfig};

// ============================================================================
// Mint
// ============================================================================

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct MintTo<'info> {
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

pub fn mint_to_handler(ctx: Context<MintTo>, owner: Pubkey, amount: u64) -> Result<()> {
    let config_key = ctx.accounts.config.key();
    let config: &mut ReflectionConfig = &mut ctx.accounts.config;
    let holder: &mut HolderAccount = &mut ctx.accounts.holder;

    let mut ledger = Ledger::new(config, std::slice::from_mut(holder));
    ledger.mint(&owner, amount)?;
    let total_supply = ledger.config().total_supply;

    emit!(Minted {
        config: config_key,
        owner,
        amount,
        total_supply,
    });

    msg!("Minted {} to {}", amount, owner);
    Ok(())
}

// ============================================================================
// Burn Confirmation
// ============================================================================

#[derive(Accounts)]
pub struct ApplyBurn<'info> {
    #[account(
        mut,
        seeds = [ReflectionConfig::SEED, config.token.as_ref()],
        bump = config.bump,
        has_one = authority @ ReflectionError::Unauthorized
    )]
    pub config: Account<'info, ReflectionConfig>,

    pub authority: Signer<'info>,
}

pub fn apply_burn_handler(ctx: Context<ApplyBurn>, amount: u64) -> Result<()> {
    let config_key = ctx.accounts.config.key();
    let config = &mut ctx.accounts.config;
    config.apply_burn(amount)?;

    emit!(BurnApplied {
        config: config_key,
        amount,
        total_supply: config.total_supply,
        pending_burn: config.pending_burn,
    });

    msg!("Burn applied: {} (pending {})", amount, config.pending_burn);
    Ok(())
}

#[event]
pub struct Minted {
    pub config: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub total_supply: u64,
}

#[event]
pub struct BurnApplied {
    pub config: Pubkey,
    pub amount: u64,
    pub total_supply: u64,
    pub pending_burn: u64,
}
