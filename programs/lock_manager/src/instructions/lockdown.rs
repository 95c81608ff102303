use anchor_lang::prelude::*;
use ecies_engine::program::EciesEngine;

use crate::engine::{self, SealParams};
use crate::error::LockManagerError;
use crate::instructions::lock::Locked;
use crate::state::{self, CiphertextRecord, LockManager, LockState, ManagerTier, TierLock};

/// Composite lock: sets the interface lock on the delegate manager and the
/// full lock on this manager in one instruction. Both sub-locks are checked
/// before anything is written, and one seal is stored under `data_id` in
/// both managers so each tier can later be released on its own.
///
/// Uses Box<Account<>> to keep the accounts off the 4KB stack.
#[derive(Accounts)]
#[instruction(data_id: [u8; 32])]
pub struct Lockdown<'info> {
    #[account(
        mut,
        seeds = [LockManager::SEED, full_manager.creator.as_ref(), &[full_manager.tier as u8]],
        bump = full_manager.bump,
        constraint = full_manager.tier == ManagerTier::FullLockdown @ LockManagerError::WrongTier,
        constraint = full_manager.delegate == interface_manager.key() @ LockManagerError::DelegateMismatch,
        constraint = full_manager.is_owner(&caller.key()) @ LockManagerError::Unauthorized
    )]
    pub full_manager: Box<Account<'info, LockManager>>,

    #[account(
        mut,
        seeds = [LockManager::SEED, interface_manager.creator.as_ref(), &[interface_manager.tier as u8]],
        bump = interface_manager.bump,
        constraint = interface_manager.tier == ManagerTier::Interface @ LockManagerError::WrongTier,
        constraint = interface_manager.is_owner(&caller.key()) @ LockManagerError::Unauthorized
    )]
    pub interface_manager: Box<Account<'info, LockManager>>,

    /// CHECK: only the address and executable flag are read
    #[account(constraint = target.executable @ LockManagerError::TargetNotContract)]
    pub target: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        space = LockState::SIZE,
        seeds = [LockState::SEED, full_manager.key().as_ref(), target.key().as_ref()],
        bump
    )]
    pub full_lock_state: Box<Account<'info, LockState>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = LockState::SIZE,
        seeds = [LockState::SEED, interface_manager.key().as_ref(), target.key().as_ref()],
        bump
    )]
    pub interface_lock_state: Box<Account<'info, LockState>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = CiphertextRecord::SIZE,
        seeds = [CiphertextRecord::SEED, full_manager.key().as_ref(), data_id.as_ref()],
        bump
    )]
    pub full_record: Box<Account<'info, CiphertextRecord>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = CiphertextRecord::SIZE,
        seeds = [CiphertextRecord::SEED, interface_manager.key().as_ref(), data_id.as_ref()],
        bump
    )]
    pub interface_record: Box<Account<'info, CiphertextRecord>>,

    /// Owner of both managers; also the caller the ECIES engine sees
    pub caller: Signer<'info>,

    /// Funds the record and lock-state rent
    #[account(mut)]
    pub payer: Signer<'info>,

    pub ecies_program: Program<'info, EciesEngine>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Lockdown>, data_id: [u8; 32], params: SealParams) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let interface_key = accounts.interface_manager.key();
    let full_key = accounts.full_manager.key();
    let target_key = accounts.target.key();

    let mut interface = TierLock {
        manager: interface_key,
        state: &mut **accounts.interface_lock_state,
        record: &mut **accounts.interface_record,
        state_bump: ctx.bumps.interface_lock_state,
        record_bump: ctx.bumps.interface_record,
    };
    let mut full = TierLock {
        manager: full_key,
        state: &mut **accounts.full_lock_state,
        record: &mut **accounts.full_record,
        state_bump: ctx.bumps.full_lock_state,
        record_bump: ctx.bumps.full_record,
    };
    state::check_lockdown(&interface, &full)?;

    let sealed = engine::seal(
        accounts.ecies_program.to_account_info(),
        accounts.caller.to_account_info(),
        &params,
    )?;
    let now = sealed.created_at;

    state::apply_lockdown(&mut interface, &mut full, target_key, data_id, sealed)?;
    accounts.interface_manager.record_lock()?;
    accounts.full_manager.record_lock()?;

    emit!(Locked {
        manager: interface_key,
        tier: ManagerTier::Interface,
        target: target_key,
        data_id,
        timestamp: now,
    });
    emit!(Locked {
        manager: full_key,
        tier: ManagerTier::FullLockdown,
        target: target_key,
        data_id,
        timestamp: now,
    });
    emit!(LockdownEngaged {
        full_manager: full_key,
        interface_manager: interface_key,
        target: target_key,
        data_id,
        timestamp: now,
    });

    msg!("Full lockdown engaged on {}", target_key);
    Ok(())
}

#[event]
pub struct LockdownEngaged {
    pub full_manager: Pubkey,
    pub interface_manager: Pubkey,
    pub target: Pubkey,
    pub data_id: [u8; 32],
    pub timestamp: i64,
}
