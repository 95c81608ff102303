use anchor_lang::prelude::*;

use crate::error::LockManagerError;
use crate::guard;
use crate::state::{LockManager, ManagerTier};

// ============================================================================
// Assert Access (dependent-program gate)
// ============================================================================

#[derive(Accounts)]
pub struct AssertAccess<'info> {
    #[account(
        constraint = interface_manager.tier == ManagerTier::Interface @ LockManagerError::WrongTier
    )]
    pub interface_manager: Account<'info, LockManager>,

    #[account(
        constraint = full_manager.tier == ManagerTier::FullLockdown @ LockManagerError::WrongTier
    )]
    pub full_manager: Account<'info, LockManager>,

    /// CHECK: lock flags are keyed by this address only
    pub target: UncheckedAccount<'info>,

    /// CHECK: PDA address and owner verified by guard::lock_flag; may be uninitialized
    pub interface_lock: UncheckedAccount<'info>,

    /// CHECK: PDA address and owner verified by guard::lock_flag; may be uninitialized
    pub full_lock: UncheckedAccount<'info>,
}

pub fn assert_access_handler(ctx: Context<AssertAccess>, allow_internal: bool) -> Result<()> {
    let target = ctx.accounts.target.key();
    let gate = guard::gate(
        &ctx.accounts.interface_manager.key(),
        &ctx.accounts.interface_lock.to_account_info(),
        &ctx.accounts.full_manager.key(),
        &ctx.accounts.full_lock.to_account_info(),
        &target,
    )?;

    gate.check(allow_internal)
}

// ============================================================================
// Is Locked (view)
// ============================================================================

#[derive(Accounts)]
pub struct IsLocked<'info> {
    pub manager: Account<'info, LockManager>,

    /// CHECK: lock flags are keyed by this address only
    pub target: UncheckedAccount<'info>,

    /// CHECK: PDA address and owner verified by guard::lock_flag; may be uninitialized
    pub lock_state: UncheckedAccount<'info>,
}

pub fn is_locked_handler(ctx: Context<IsLocked>) -> Result<bool> {
    guard::lock_flag(
        &ctx.accounts.lock_state.to_account_info(),
        &ctx.accounts.manager.key(),
        &ctx.accounts.target.key(),
    )
}
