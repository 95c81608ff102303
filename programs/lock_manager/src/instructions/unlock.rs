use anchor_lang::prelude::*;
use ecies_engine::program::EciesEngine;

use crate::engine::{self, OpenParams};
use crate::error::LockManagerError;
use crate::state::{CiphertextRecord, LockManager, LockState, ManagerTier};

#[derive(Accounts)]
#[instruction(data_id: [u8; 32])]
pub struct Unlock<'info> {
    #[account(
        mut,
        seeds = [LockManager::SEED, manager.creator.as_ref(), &[manager.tier as u8]],
        bump = manager.bump,
    )]
    pub manager: Account<'info, LockManager>,

    /// CHECK: lock flags are keyed by this address only
    pub target: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [LockState::SEED, manager.key().as_ref(), target.key().as_ref()],
        bump = lock_state.bump,
        constraint = lock_state.locked @ LockManagerError::NotLocked,
        constraint = lock_state.is_held_by(&data_id) @ LockManagerError::CiphertextNotFound
    )]
    pub lock_state: Account<'info, LockState>,

    /// Closed on success; rent goes back to the caller
    #[account(
        mut,
        close = caller,
        seeds = [CiphertextRecord::SEED, manager.key().as_ref(), data_id.as_ref()],
        bump = ciphertext_record.bump,
        constraint = ciphertext_record.is_for(&target.key()) @ LockManagerError::CiphertextNotFound
    )]
    pub ciphertext_record: Account<'info, CiphertextRecord>,

    /// Final owner or backup wallet (checked by the engine)
    #[account(mut)]
    pub caller: Signer<'info>,

    pub ecies_program: Program<'info, EciesEngine>,
}

pub fn handler(
    ctx: Context<Unlock>,
    data_id: [u8; 32],
    recipient_priv: [u8; 32],
    pin: u32,
) -> Result<[u8; 32]> {
    let manager = &ctx.accounts.manager;
    require!(manager.owner_finalized, LockManagerError::OwnerNotFinalized);

    let plaintext = engine::open(
        ctx.accounts.ecies_program.to_account_info(),
        ctx.accounts.caller.to_account_info(),
        ctx.accounts.ciphertext_record.ciphertext,
        &OpenParams {
            recipient_priv,
            pin,
            pin_hash: manager.pin_hash,
            owner: manager.final_owner,
            backup_wallet: manager.backup_wallet,
        },
    )?;

    ctx.accounts.lock_state.release()?;
    ctx.accounts.manager.record_unlock()?;

    let tier = ctx.accounts.manager.tier;
    let target_key = ctx.accounts.target.key();
    emit!(Unlocked {
        manager: ctx.accounts.manager.key(),
        tier,
        target: target_key,
        data_id,
        caller: ctx.accounts.caller.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Target {} unlocked ({:?}); ciphertext record closed", target_key, tier);
    Ok(plaintext)
}

#[event]
pub struct Unlocked {
    pub manager: Pubkey,
    pub tier: ManagerTier,
    pub target: Pubkey,
    pub data_id: [u8; 32],
    pub caller: Pubkey,
    pub timestamp: i64,
}
