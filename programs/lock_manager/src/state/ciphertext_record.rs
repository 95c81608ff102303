use anchor_lang::prelude::*;

use ecies_engine::state::Ciphertext;

use crate::error::LockManagerError;

/// Sealed secret stored under a caller-chosen data identifier
/// Closed (rent refunded) when the lock it guards is released
/// Size: 8 (discriminator) + 233 = 241 bytes
#[account]
#[derive(Default)]
pub struct CiphertextRecord {
    /// Manager that stored this record
    pub manager: Pubkey,

    /// Caller-chosen identifier, unique per manager
    pub data_id: [u8; 32],

    /// Target the sealed secret unlocks
    pub target: Pubkey,

    /// Output of the ECIES engine's encrypt
    pub ciphertext: Ciphertext,

    /// PDA bump seed
    pub bump: u8,
}

impl CiphertextRecord {
    pub const SIZE: usize = 8 + // discriminator
        32 + // manager
        32 + // data_id
        32 + // target
        Ciphertext::SIZE + // ciphertext (136)
        1;   // bump
    // Total: 241 bytes

    pub const SEED: &'static [u8] = b"ciphertext";

    pub fn is_in_use(&self) -> bool {
        self.ciphertext.is_present()
    }

    pub fn ensure_available(&self) -> Result<()> {
        require!(!self.is_in_use(), LockManagerError::DataIdInUse);
        Ok(())
    }

    pub fn is_for(&self, target: &Pubkey) -> bool {
        self.is_in_use() && self.target == *target
    }

    pub fn store(
        &mut self,
        manager: Pubkey,
        data_id: [u8; 32],
        target: Pubkey,
        ciphertext: Ciphertext,
        bump: u8,
    ) -> Result<()> {
        self.ensure_available()?;
        self.manager = manager;
        self.data_id = data_id;
        self.target = target;
        self.ciphertext = ciphertext;
        self.bump = bump;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LockState;

    fn sealed(created_at: i64) -> Ciphertext {
        Ciphertext {
            ciphertext: [0x11; 32],
            mac: [0x22; 32],
            created_at,
            ..Ciphertext::default()
        }
    }

    #[test]
    fn data_id_cannot_be_reused_while_present() {
        let manager = Pubkey::new_unique();
        let target = Pubkey::new_unique();
        let mut record = CiphertextRecord::default();
        assert!(!record.is_in_use());

        record.store(manager, [0xaa; 32], target, sealed(10), 254).unwrap();
        assert!(record.is_for(&target));
        assert!(!record.is_for(&Pubkey::new_unique()));

        let err = record
            .store(manager, [0xaa; 32], Pubkey::new_unique(), sealed(20), 254)
            .unwrap_err();
        assert_eq!(err, LockManagerError::DataIdInUse.into());
        assert_eq!(record.target, target);
        assert_eq!(record.ciphertext.created_at, 10);
    }

    #[test]
    fn second_lock_on_same_target_is_rejected() {
        let manager = Pubkey::new_unique();
        let target = Pubkey::new_unique();
        let mut state = LockState::default();
        let mut first = CiphertextRecord::default();
        let second = CiphertextRecord::default();

        first.store(manager, [0xaa; 32], target, sealed(10), 1).unwrap();
        state.engage(manager, target, [0xaa; 32], 10, 1).unwrap();

        // A different, unused data id still hits the lock flag
        second.ensure_available().unwrap();
        let err = state.ensure_unlocked().unwrap_err();
        assert_eq!(err, LockManagerError::AlreadyLocked.into());
        assert!(state.locked);
        assert_eq!(state.data_id, [0xaa; 32]);
        assert!(first.is_for(&target));
    }

    #[test]
    fn release_requires_a_lock() {
        let mut state = LockState::default();
        let err = state.release().unwrap_err();
        assert_eq!(err, LockManagerError::NotLocked.into());

        state
            .engage(Pubkey::new_unique(), Pubkey::new_unique(), [1; 32], 5, 1)
            .unwrap();
        state.release().unwrap();
        assert!(!state.locked);
        assert_eq!(state.locked_at, 0);
    }
}
