use anchor_lang::prelude::*;

use crate::state::{LockManager, ManagerTier};

#[derive(Accounts)]
#[instruction(tier: ManagerTier)]
pub struct InitializeManager<'info> {
    #[account(
        init,
        payer = creator,
        space = LockManager::SIZE,
        seeds = [LockManager::SEED, creator.key().as_ref(), &[tier as u8]],
        bump
    )]
    pub manager: Account<'info, LockManager>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeManager>,
    tier: ManagerTier,
    delegate: Option<Pubkey>,
) -> Result<()> {
    let clock = Clock::get()?;
    let manager = &mut ctx.accounts.manager;

    manager.initialize(
        ctx.accounts.creator.key(),
        tier,
        delegate,
        clock.unix_timestamp,
        ctx.bumps.manager,
    )?;

    emit!(ManagerInitialized {
        manager: manager.key(),
        creator: manager.creator,
        tier,
        delegate: manager.delegate,
        timestamp: clock.unix_timestamp,
    });

    msg!("Lock manager initialized: tier {:?}, creator {}", tier, manager.creator);
    if manager.has_delegate() {
        msg!("Delegate interface manager: {}", manager.delegate);
    }

    Ok(())
}

#[event]
pub struct ManagerInitialized {
    pub manager: Pubkey,
    pub creator: Pubkey,
    pub tier: ManagerTier,
    pub delegate: Pubkey,
    pub timestamp: i64,
}
