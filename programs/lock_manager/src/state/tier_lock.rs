use anchor_lang::prelude::*;

use ecies_engine::state::Ciphertext;

use crate::error::LockManagerError;
use crate::state::{CiphertextRecord, LockState};

/// The two accounts one manager writes when it locks a target
pub struct TierLock<'a> {
    pub manager: Pubkey,
    pub state: &'a mut LockState,
    pub record: &'a mut CiphertextRecord,
    pub state_bump: u8,
    pub record_bump: u8,
}

impl TierLock<'_> {
    /// Data id unused and target not yet locked
    pub fn ensure_ready(&self) -> Result<()> {
        self.record.ensure_available()?;
        self.state.ensure_unlocked()
    }

    pub fn apply(&mut self, target: Pubkey, data_id: [u8; 32], sealed: Ciphertext) -> Result<()> {
        self.record
            .store(self.manager, data_id, target, sealed, self.record_bump)?;
        self.state.engage(
            self.manager,
            target,
            data_id,
            sealed.created_at,
            self.state_bump,
        )
    }
}

/// Every sub-lock of a lockdown must be possible before either is written
pub fn check_lockdown(interface: &TierLock, full: &TierLock) -> Result<()> {
    require!(!full.state.locked, LockManagerError::AlreadyFullyLocked);
    interface.ensure_ready()?;
    full.ensure_ready()
}

pub fn apply_lockdown(
    interface: &mut TierLock,
    full: &mut TierLock,
    target: Pubkey,
    data_id: [u8; 32],
    sealed: Ciphertext,
) -> Result<()> {
    check_lockdown(interface, full)?;
    interface.apply(target, data_id, sealed)?;
    full.apply(target, data_id, sealed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA_ID: [u8; 32] = [0xd1; 32];

    fn sealed(created_at: i64) -> Ciphertext {
        Ciphertext {
            ciphertext: [0x11; 32],
            mac: [0x22; 32],
            created_at,
            ..Ciphertext::default()
        }
    }

    struct Tier {
        manager: Pubkey,
        state: LockState,
        record: CiphertextRecord,
    }

    impl Tier {
        fn new() -> Self {
            Self {
                manager: Pubkey::new_unique(),
                state: LockState::default(),
                record: CiphertextRecord::default(),
            }
        }

        fn lock(&mut self) -> TierLock<'_> {
            TierLock {
                manager: self.manager,
                state: &mut self.state,
                record: &mut self.record,
                state_bump: 253,
                record_bump: 254,
            }
        }
    }

    fn lockdown(interface: &mut Tier, full: &mut Tier, target: Pubkey, now: i64) -> Result<()> {
        apply_lockdown(
            &mut interface.lock(),
            &mut full.lock(),
            target,
            DATA_ID,
            sealed(now),
        )
    }

    #[test]
    fn lockdown_locks_both_tiers_with_one_seal() {
        let target = Pubkey::new_unique();
        let mut interface = Tier::new();
        let mut full = Tier::new();

        lockdown(&mut interface, &mut full, target, 100).unwrap();

        for tier in [&interface, &full] {
            assert!(tier.state.locked);
            assert_eq!(tier.state.manager, tier.manager);
            assert_eq!(tier.state.data_id, DATA_ID);
            assert_eq!(tier.state.locked_at, 100);
            assert_eq!(tier.state.bump, 253);
            assert!(tier.record.is_for(&target));
            assert_eq!(tier.record.manager, tier.manager);
            assert_eq!(tier.record.data_id, DATA_ID);
            assert_eq!(tier.record.bump, 254);
        }
        assert_eq!(interface.record.ciphertext, full.record.ciphertext);
    }

    #[test]
    fn lockdown_rejected_when_fully_locked() {
        let target = Pubkey::new_unique();
        let mut interface = Tier::new();
        let mut full = Tier::new();
        full.lock().apply(target, [0xaa; 32], sealed(10)).unwrap();

        let err = lockdown(&mut interface, &mut full, target, 100).unwrap_err();
        assert_eq!(err, LockManagerError::AlreadyFullyLocked.into());

        assert!(!interface.state.locked);
        assert!(!interface.record.is_in_use());
        assert!(full.state.locked);
        assert_eq!(full.state.data_id, [0xaa; 32]);
        assert_eq!(full.record.ciphertext.created_at, 10);
    }

    #[test]
    fn lockdown_rejected_when_interface_already_locked() {
        let target = Pubkey::new_unique();
        let mut interface = Tier::new();
        let mut full = Tier::new();
        interface.lock().apply(target, [0xbb; 32], sealed(10)).unwrap();

        let err = lockdown(&mut interface, &mut full, target, 100).unwrap_err();
        assert_eq!(err, LockManagerError::AlreadyLocked.into());

        assert!(interface.state.locked);
        assert_eq!(interface.state.data_id, [0xbb; 32]);
        assert_eq!(interface.record.ciphertext.created_at, 10);
        assert!(!full.state.locked);
        assert!(!full.record.is_in_use());
    }

    #[test]
    fn lockdown_rejected_when_full_data_id_taken() {
        let target = Pubkey::new_unique();
        let mut interface = Tier::new();
        let mut full = Tier::new();
        full.record
            .store(full.manager, DATA_ID, Pubkey::new_unique(), sealed(10), 1)
            .unwrap();

        let err = lockdown(&mut interface, &mut full, target, 100).unwrap_err();
        assert_eq!(err, LockManagerError::DataIdInUse.into());

        assert!(!interface.state.locked);
        assert!(!interface.record.is_in_use());
        assert!(!full.state.locked);
        assert_eq!(full.record.ciphertext.created_at, 10);
    }

    #[test]
    fn data_id_reusable_after_unlock() {
        let target = Pubkey::new_unique();
        let mut tier = Tier::new();
        tier.lock().apply(target, DATA_ID, sealed(10)).unwrap();

        // unlock releases the flag and closes the record; init_if_needed
        // recreates the record zeroed
        tier.state.release().unwrap();
        tier.record = CiphertextRecord::default();

        tier.lock().ensure_ready().unwrap();
        tier.lock().apply(target, DATA_ID, sealed(20)).unwrap();
        assert!(tier.state.locked);
        assert_eq!(tier.state.locked_at, 20);
        assert_eq!(tier.record.ciphertext.created_at, 20);
    }
}
