use anchor_lang::prelude::*;

use crate::error::LockManagerError;

/// Lock flag of one target under one manager
/// A missing account reads as unlocked
#[account]
#[derive(Default)]
pub struct LockState {
    /// Manager that owns this flag
    pub manager: Pubkey,

    /// Program being gated
    pub target: Pubkey,

    /// Whether the target is currently locked
    pub locked: bool,

    /// Data identifier of the active lock (zero when unlocked)
    pub data_id: [u8; 32],

    /// Unix timestamp of the active lock (0 when unlocked)
    pub locked_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl LockState {
    pub const SIZE: usize = 8 + // discriminator
        32 + // manager
        32 + // target
        1 +  // locked
        32 + // data_id
        8 +  // locked_at
        1;   // bump
    // Total: 114 bytes

    pub const SEED: &'static [u8] = b"lock_state";

    pub fn ensure_unlocked(&self) -> Result<()> {
        require!(!self.locked, LockManagerError::AlreadyLocked);
        Ok(())
    }

    /// Locked under exactly this data id
    pub fn is_held_by(&self, data_id: &[u8; 32]) -> bool {
        self.locked && self.data_id == *data_id
    }

    pub fn engage(
        &mut self,
        manager: Pubkey,
        target: Pubkey,
        data_id: [u8; 32],
        now: i64,
        bump: u8,
    ) -> Result<()> {
        self.ensure_unlocked()?;
        self.manager = manager;
        self.target = target;
        self.locked = true;
        self.data_id = data_id;
        self.locked_at = now;
        self.bump = bump;
        Ok(())
    }

    pub fn release(&mut self) -> Result<()> {
        require!(self.locked, LockManagerError::NotLocked);
        self.locked = false;
        self.data_id = [0u8; 32];
        self.locked_at = 0;
        Ok(())
    }
}
