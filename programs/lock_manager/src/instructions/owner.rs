use anchor_lang::prelude::*;

use crate::error::LockManagerError;
use crate::guard::is_program_controlled;
use crate::state::LockManager;

// ============================================================================
// Set Final Owner
// ============================================================================

#[derive(Accounts)]
pub struct SetOwner<'info> {
    #[account(
        mut,
        seeds = [LockManager::SEED, manager.creator.as_ref(), &[manager.tier as u8]],
        bump = manager.bump,
    )]
    pub manager: Account<'info, LockManager>,

    /// CHECK: only the address and program-control flags are read
    pub new_owner: UncheckedAccount<'info>,

    pub caller: Signer<'info>,
}

pub fn set_owner_handler(ctx: Context<SetOwner>, pin: u32) -> Result<()> {
    let new_owner = &ctx.accounts.new_owner;
    let manager = &mut ctx.accounts.manager;

    manager.finalize_owner(
        &ctx.accounts.caller.key(),
        &new_owner.key(),
        is_program_controlled(&new_owner.to_account_info()),
        pin,
    )?;

    emit!(OwnerFinalized {
        manager: manager.key(),
        final_owner: manager.final_owner,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Final owner set to {}", manager.final_owner);
    Ok(())
}

// ============================================================================
// Update Deployer Owner
// ============================================================================

#[derive(Accounts)]
pub struct UpdateOwner<'info> {
    #[account(
        mut,
        seeds = [LockManager::SEED, manager.creator.as_ref(), &[manager.tier as u8]],
        bump = manager.bump,
    )]
    pub manager: Account<'info, LockManager>,

    pub caller: Signer<'info>,
}

pub fn update_owner_handler(ctx: Context<UpdateOwner>, new_owner: Pubkey) -> Result<()> {
    let manager = &mut ctx.accounts.manager;
    let previous = manager.deployer_owner;

    manager.update_deployer_owner(&ctx.accounts.caller.key(), &new_owner)?;

    emit!(DeployerOwnerUpdated {
        manager: manager.key(),
        previous,
        new_owner,
    });

    msg!("Deployer owner updated: {} -> {}", previous, new_owner);
    Ok(())
}

// ============================================================================
// Set Backup Wallet
// ============================================================================

#[derive(Accounts)]
pub struct SetBackupWallet<'info> {
    #[account(
        mut,
        seeds = [LockManager::SEED, manager.creator.as_ref(), &[manager.tier as u8]],
        bump = manager.bump,
        constraint = manager.owner_finalized @ LockManagerError::OwnerNotFinalized
    )]
    pub manager: Account<'info, LockManager>,

    pub caller: Signer<'info>,
}

pub fn set_backup_wallet_handler(ctx: Context<SetBackupWallet>, backup_wallet: Pubkey) -> Result<()> {
    let clock = Clock::get()?;
    let manager = &mut ctx.accounts.manager;

    manager.set_backup_wallet(&ctx.accounts.caller.key(), &backup_wallet, clock.unix_timestamp)?;

    emit!(BackupWalletSet {
        manager: manager.key(),
        backup_wallet,
        timestamp: clock.unix_timestamp,
    });

    msg!("Backup wallet registered: {}", backup_wallet);
    Ok(())
}

#[event]
pub struct OwnerFinalized {
    pub manager: Pubkey,
    pub final_owner: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct DeployerOwnerUpdated {
    pub manager: Pubkey,
    pub previous: Pubkey,
    pub new_owner: Pubkey,
}

#[event]
pub struct BackupWalletSet {
    pub manager: Pubkey,
    pub backup_wallet: Pubkey,
    pub timestamp: i64,
}
