use anchor_lang::prelude::*;

use crate::state::{HolderAccount, ReflectionConfig};

// ============================================================================
// Open Holder
// ============================================================================

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct OpenHolder<'info> {
    #[account(
        seeds = [ReflectionConfig::SEED, config.token.as_ref()],
        bump = config.bump,
    )]
    pub config: Account<'info, ReflectionConfig>,

    #[account(
        init,
        payer = payer,
        space = HolderAccount::SIZE,
        seeds = [HolderAccount::SEED, config.key().as_ref(), owner.as_ref()],
        bump
    )]
    pub holder: Account<'info, HolderAccount>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn open_holder_handler(ctx: Context<OpenHolder>, owner: Pubkey) -> Result<()> {
    let config = &ctx.accounts.config;
    let holder = &mut ctx.accounts.holder;

    holder.open(
        config.key(),
        owner,
        config.reflection_per_token,
        ctx.bumps.holder,
    );

    emit!(HolderOpened {
        config: config.key(),
        owner,
        checkpoint: holder.checkpoint,
    });

    msg!("Holder opened for {}", owner);
    Ok(())
}

// ============================================================================
// Settle / Read Balance
// ============================================================================

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct UpdateReflectedBalance<'info> {
    #[account(
        seeds = [ReflectionConfig::SEED, config.token.as_ref()],
        bump = config.bump,
    )]
    pub config: Account<'info, ReflectionConfig>,

    #[account(
        mut,
        seeds = [HolderAccount::SEED, config.key().as_ref(), owner.as_ref()],
        bump = holder.bump,
    )]
    pub holder: Account<'info, HolderAccount>,
}

/// Permissionless: settling only realizes what the holder is already owed
pub fn update_reflected_balance_handler(
    ctx: Context<UpdateReflectedBalance>,
    owner: Pubkey,
) -> Result<()> {
    let accumulator = ctx.accounts.config.reflection_per_token;
    let holder = &mut ctx.accounts.holder;

    let before = holder.reflected_balance;
    holder.settle(accumulator)?;

    emit!(BalanceSettled {
        config: ctx.accounts.config.key(),
        owner,
        accrued: holder.reflected_balance.saturating_sub(before),
        balance: holder.reflected_balance,
        checkpoint: holder.checkpoint,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct GetRealBalance<'info> {
    #[account(
        seeds = [ReflectionConfig::SEED, config.token.as_ref()],
        bump = config.bump,
    )]
    pub config: Account<'info, ReflectionConfig>,

    #[account(
        seeds = [HolderAccount::SEED, config.key().as_ref(), owner.as_ref()],
        bump = holder.bump,
    )]
    pub holder: Account<'info, HolderAccount>,
}

pub fn get_real_balance_handler(ctx: Context<GetRealBalance>, _owner: Pubkey) -> Result<u64> {
    ctx.accounts
        .holder
        .real_balance(ctx.accounts.config.reflection_per_token)
}

#[event]
pub struct HolderOpened {
    pub config: Pubkey,
    pub owner: Pubkey,
    pub checkpoint: u128,
}

#[event]
pub struct BalanceSettled {
    pub config: Pubkey,
    pub owner: Pubkey,
    pub accrued: u64,
    pub balance: u64,
    pub checkpoint: u128,
}
