use anchor_lang::prelude::*;

use crate::math;

/// Balance record of one holder under one reflection engine
/// Size: 8 (discriminator) + 99 = 107 bytes
#[account]
#[derive(Default)]
pub struct HolderAccount {
    /// ReflectionConfig this holder belongs to
    pub config: Pubkey,

    /// Wallet the balance belongs to
    pub owner: Pubkey,

    /// Stored balance that accrues reflection (settled lazily)
    pub reflected_balance: u64,

    /// Flat balance while excluded from reflection
    pub excluded_balance: u64,

    /// Accumulator value at the last settlement
    pub checkpoint: u128,

    /// Transfers involving this holder pay no fee
    pub fee_excluded: bool,

    /// Holder does not accrue reflection
    pub reflection_excluded: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl HolderAccount {
    pub const SIZE: usize = 8 + // discriminator
        32 + // config
        32 + // owner
        8 +  // reflected_balance
        8 +  // excluded_balance
        16 + // checkpoint
        1 +  // fee_excluded
        1 +  // reflection_excluded
        1;   // bump
    // Total: 107 bytes

    pub const SEED: &'static [u8] = b"holder";

    /// Start accounting at the current accumulator so past reflection is not claimable
    pub fn open(&mut self, config: Pubkey, owner: Pubkey, accumulator: u128, bump: u8) {
        self.config = config;
        self.owner = owner;
        self.reflected_balance = 0;
        self.excluded_balance = 0;
        self.checkpoint = accumulator;
        self.fee_excluded = false;
        self.reflection_excluded = false;
        self.bump = bump;
    }

    /// Balance including unsettled reflection, without mutating state
    pub fn real_balance(&self, accumulator: u128) -> Result<u64> {
        if self.reflection_excluded {
            return Ok(self.excluded_balance);
        }
        let (balance, _) = math::settle(self.reflected_balance, self.checkpoint, accumulator)?;
        Ok(balance)
    }

    /// Apply owed reflection and advance the checkpoint
    /// Excluded holders are left untouched
    pub fn settle(&mut self, accumulator: u128) -> Result<()> {
        if self.reflection_excluded {
            return Ok(());
        }
        let (balance, checkpoint) =
            math::settle(self.reflected_balance, self.checkpoint, accumulator)?;
        self.reflected_balance = balance;
        self.checkpoint = checkpoint;
        Ok(())
    }
}
