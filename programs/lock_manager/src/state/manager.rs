use anchor_lang::prelude::*;

use ecies_engine::ecies::{pin_hash, MAX_PIN};

use crate::error::LockManagerError;

/// The backup wallet can only be registered this long after deployment
pub const BACKUP_WINDOW_SECONDS: i64 = 12 * 60 * 60;

/// Which gate a manager instance controls
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ManagerTier {
    /// Blocks the target's external surface; internal callers stay allowed
    #[default]
    Interface,
    /// Blocks everything on the target
    FullLockdown,
}

/// Identity record and counters of one lock manager instance
/// Size: 8 (discriminator) + 219 = 227 bytes
#[account]
#[derive(Default)]
pub struct LockManager {
    /// Signer that created this manager (PDA seed, never changes)
    pub creator: Pubkey,

    /// Gate controlled by this manager
    pub tier: ManagerTier,

    /// Mutable owner, replaceable until the final owner is set
    pub deployer_owner: Pubkey,

    /// One-time owner (default = unset)
    pub final_owner: Pubkey,

    /// Set together with final_owner and pin_hash
    pub owner_finalized: bool,

    /// Secondary decrypt identity (default = unset)
    pub backup_wallet: Pubkey,

    /// sha256 of the unlock PIN
    pub pin_hash: [u8; 32],

    /// Unix timestamp of initialization
    pub deployed_at: i64,

    /// Interface manager locked alongside this one by `lockdown` (default = none)
    pub delegate: Pubkey,

    /// Successful locks
    pub lock_count: u64,

    /// Successful unlocks
    pub unlock_count: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl LockManager {
    pub const SIZE: usize = 8 + // discriminator
        32 + // creator
        1 +  // tier
        32 + // deployer_owner
        32 + // final_owner
        1 +  // owner_finalized
        32 + // backup_wallet
        32 + // pin_hash
        8 +  // deployed_at
        32 + // delegate
        8 +  // lock_count
        8 +  // unlock_count
        1;   // bump
    // Total: 227 bytes

    pub const SEED: &'static [u8] = b"lock_manager";

    pub fn initialize(
        &mut self,
        creator: Pubkey,
        tier: ManagerTier,
        delegate: Option<Pubkey>,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        if let Some(delegate) = delegate {
            require!(tier == ManagerTier::FullLockdown, LockManagerError::WrongTier);
            require!(delegate != Pubkey::default(), LockManagerError::ZeroAddress);
        }

        self.creator = creator;
        self.tier = tier;
        self.deployer_owner = creator;
        self.final_owner = Pubkey::default();
        self.owner_finalized = false;
        self.backup_wallet = Pubkey::default();
        self.pin_hash = [0u8; 32];
        self.deployed_at = now;
        self.delegate = delegate.unwrap_or_default();
        self.lock_count = 0;
        self.unlock_count = 0;
        self.bump = bump;
        Ok(())
    }

    /// Deployer owner, or the final owner once it is set
    pub fn is_owner(&self, caller: &Pubkey) -> bool {
        *caller == self.deployer_owner || (self.owner_finalized && *caller == self.final_owner)
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate != Pubkey::default()
    }

    /// Set the final owner and PIN hash together. One shot.
    pub fn finalize_owner(
        &mut self,
        caller: &Pubkey,
        new_owner: &Pubkey,
        new_owner_is_program: bool,
        pin: u32,
    ) -> Result<()> {
        require!(self.is_owner(caller), LockManagerError::Unauthorized);
        require!(!self.owner_finalized, LockManagerError::OwnerAlreadySet);
        require!(*new_owner != Pubkey::default(), LockManagerError::ZeroAddress);
        require!(new_owner_is_program, LockManagerError::OwnerNotContract);
        require!(pin <= MAX_PIN, LockManagerError::InvalidPin);

        self.final_owner = *new_owner;
        self.pin_hash = pin_hash(pin);
        self.owner_finalized = true;
        Ok(())
    }

    /// Replace the deployer owner; only before finalization
    pub fn update_deployer_owner(&mut self, caller: &Pubkey, new_owner: &Pubkey) -> Result<()> {
        require!(self.is_owner(caller), LockManagerError::Unauthorized);
        require!(!self.owner_finalized, LockManagerError::OwnerAlreadySet);
        require!(*new_owner != Pubkey::default(), LockManagerError::ZeroAddress);

        self.deployer_owner = *new_owner;
        Ok(())
    }

    /// Register the backup wallet: final owner only, once, within 12h of deployment
    pub fn set_backup_wallet(&mut self, caller: &Pubkey, backup: &Pubkey, now: i64) -> Result<()> {
        require!(self.owner_finalized, LockManagerError::OwnerNotFinalized);
        require_keys_eq!(*caller, self.final_owner, LockManagerError::Unauthorized);

        let window_end = self
            .deployed_at
            .checked_add(BACKUP_WINDOW_SECONDS)
            .ok_or(LockManagerError::ArithmeticOverflow)?;
        require!(now <= window_end, LockManagerError::BackupWindowClosed);

        require!(
            self.backup_wallet == Pubkey::default(),
            LockManagerError::BackupAlreadySet
        );
        require!(*backup != Pubkey::default(), LockManagerError::ZeroAddress);

        self.backup_wallet = *backup;
        Ok(())
    }

    pub fn record_lock(&mut self) -> Result<()> {
        self.lock_count = self
            .lock_count
            .checked_add(1)
            .ok_or(LockManagerError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn record_unlock(&mut self) -> Result<()> {
        self.unlock_count = self
            .unlock_count
            .checked_add(1)
            .ok_or(LockManagerError::ArithmeticOverflow)?;
        Ok(())
    }
}
