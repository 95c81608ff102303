//! Lock Manager Program
//!
//! Gates the callable surface of a target program behind a sealed secret.
//! One program serves both tiers:
//! - Interface managers block the target's external entry points
//! - FullLockdown managers block everything, and can lock their delegate
//!   interface manager in the same instruction (`lockdown`)
//!
//! Locking seals a caller-chosen 32-byte secret through the ECIES engine and
//! stores the ciphertext under a data identifier. Unlocking opens it again
//! (final owner or backup wallet, 24h window, PIN) and clears the record.
//!
//! Dependent programs read the flags through `guard` or CPI `assert_access`.

use anchor_lang::prelude::*;

pub mod engine;
pub mod error;
pub mod guard;
pub mod instructions;
pub mod state;

use engine::SealParams;
use instructions::*;
use state::ManagerTier;

declare_id!("DDANN5os3QiWh9jyq6AdrzkU8zPux3eQ9AhmvNiw1VhP");

#[program]
pub mod lock_manager {
    use super::*;

    /// Create a manager instance; the signer becomes creator and deployer owner
    pub fn initialize_manager(
        ctx: Context<InitializeManager>,
        tier: ManagerTier,
        delegate: Option<Pubkey>,
    ) -> Result<()> {
        instructions::initialize_manager::handler(ctx, tier, delegate)
    }

    /// Set the final owner and PIN (one shot, owner only)
    pub fn set_owner(ctx: Context<SetOwner>, pin: u32) -> Result<()> {
        instructions::owner::set_owner_handler(ctx, pin)
    }

    /// Replace the deployer owner (before the final owner is set)
    pub fn update_owner(ctx: Context<UpdateOwner>, new_owner: Pubkey) -> Result<()> {
        instructions::owner::update_owner_handler(ctx, new_owner)
    }

    /// Register the backup wallet (final owner, once, within 12h of deployment)
    pub fn set_backup_wallet(ctx: Context<SetBackupWallet>, backup_wallet: Pubkey) -> Result<()> {
        instructions::owner::set_backup_wallet_handler(ctx, backup_wallet)
    }

    /// Seal a secret under `data_id` and lock the target on this manager
    pub fn lock(ctx: Context<Lock>, data_id: [u8; 32], params: SealParams) -> Result<()> {
        instructions::lock::handler(ctx, data_id, params)
    }

    /// Open the secret stored under `data_id` and unlock the target
    /// Returns the recovered plaintext
    pub fn unlock(
        ctx: Context<Unlock>,
        data_id: [u8; 32],
        recipient_priv: [u8; 32],
        pin: u32,
    ) -> Result<[u8; 32]> {
        instructions::unlock::handler(ctx, data_id, recipient_priv, pin)
    }

    /// Lock the delegate interface manager and this full-lockdown manager together
    pub fn lockdown(ctx: Context<Lockdown>, data_id: [u8; 32], params: SealParams) -> Result<()> {
        instructions::lockdown::handler(ctx, data_id, params)
    }

    /// Fail if the target is locked; `allow_internal` ignores the interface lock
    pub fn assert_access(ctx: Context<AssertAccess>, allow_internal: bool) -> Result<()> {
        instructions::access::assert_access_handler(ctx, allow_internal)
    }

    /// Current lock flag of the target under one manager
    pub fn is_locked(ctx: Context<IsLocked>) -> Result<bool> {
        instructions::access::is_locked_handler(ctx)
    }
}
