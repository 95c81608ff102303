use anchor_lang::prelude::*;
use ecies_engine::program::EciesEngine;

use crate::engine::{self, SealParams};
use crate::error::LockManagerError;
use crate::state::{CiphertextRecord, LockManager, LockState, ManagerTier, TierLock};

#[derive(Accounts)]
#[instruction(data_id: [u8; 32])]
pub struct Lock<'info> {
    #[account(
        mut,
        seeds = [LockManager::SEED, manager.creator.as_ref(), &[manager.tier as u8]],
        bump = manager.bump,
        constraint = manager.is_owner(&caller.key()) @ LockManagerError::Unauthorized
    )]
    pub manager: Account<'info, LockManager>,

    /// CHECK: only the address and executable flag are read
    #[account(constraint = target.executable @ LockManagerError::TargetNotContract)]
    pub target: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        space = CiphertextRecord::SIZE,
        seeds = [CiphertextRecord::SEED, manager.key().as_ref(), data_id.as_ref()],
        bump
    )]
    pub ciphertext_record: Account<'info, CiphertextRecord>,

    #[account(
        init_if_needed,
        payer = payer,
        space = LockState::SIZE,
        seeds = [LockState::SEED, manager.key().as_ref(), target.key().as_ref()],
        bump
    )]
    pub lock_state: Account<'info, LockState>,

    /// Manager owner; also the caller the ECIES engine sees
    pub caller: Signer<'info>,

    /// Funds the record and lock-state rent
    #[account(mut)]
    pub payer: Signer<'info>,

    pub ecies_program: Program<'info, EciesEngine>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Lock>, data_id: [u8; 32], params: SealParams) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let manager_key = accounts.manager.key();
    let target_key = accounts.target.key();

    let mut lock = TierLock {
        manager: manager_key,
        state: &mut *accounts.lock_state,
        record: &mut *accounts.ciphertext_record,
        state_bump: ctx.bumps.lock_state,
        record_bump: ctx.bumps.ciphertext_record,
    };
    lock.ensure_ready()?;

    let sealed = engine::seal(
        accounts.ecies_program.to_account_info(),
        accounts.caller.to_account_info(),
        &params,
    )?;

    lock.apply(target_key, data_id, sealed)?;
    accounts.manager.record_lock()?;

    let tier = accounts.manager.tier;
    emit!(Locked {
        manager: manager_key,
        tier,
        target: target_key,
        data_id,
        timestamp: sealed.created_at,
    });

    msg!("Target {} locked ({:?}) under data id {:?}", target_key, tier, &data_id[0..8]);
    Ok(())
}

#[event]
pub struct Locked {
    pub manager: Pubkey,
    pub tier: ManagerTier,
    pub target: Pubkey,
    pub data_id: [u8; 32],
    pub timestamp: i64,
}
