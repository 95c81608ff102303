//! Access gate helpers for programs that are locked by the managers
//!
//! A dependent program passes the two lock-state PDAs for its own program
//! id and refuses to run when either flag is set. Entry points reserved for
//! privileged or internal callers use `allow_internal`, which only honours
//! the full lockdown.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable;
use solana_sdk_ids::{bpf_loader, bpf_loader_deprecated};

use crate::error::LockManagerError;
use crate::state::LockState;

/// Snapshot of both lock flags for one target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessGate {
    pub interface_locked: bool,
    pub fully_locked: bool,
}

impl AccessGate {
    pub fn check(&self, allow_internal: bool) -> Result<()> {
        require!(!self.fully_locked, LockManagerError::FullyLocked);
        if !allow_internal {
            require!(!self.interface_locked, LockManagerError::InterfaceLocked);
        }
        Ok(())
    }
}

pub fn lock_state_address(manager: &Pubkey, target: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[LockState::SEED, manager.as_ref(), target.as_ref()],
        &crate::ID,
    )
    .0
}

/// Read a lock flag; an account that was never created reads as unlocked
pub fn lock_flag(lock_state: &AccountInfo, manager: &Pubkey, target: &Pubkey) -> Result<bool> {
    require_keys_eq!(
        lock_state.key(),
        lock_state_address(manager, target),
        LockManagerError::InvalidLockState
    );
    if lock_state.data_is_empty() {
        return Ok(false);
    }
    require_keys_eq!(*lock_state.owner, crate::ID, LockManagerError::InvalidLockState);

    let data = lock_state.try_borrow_data()?;
    let state = LockState::try_deserialize(&mut &data[..])?;
    Ok(state.locked)
}

/// Refuse when either the interface lock or the full lock is set
pub fn require_unlocked(
    interface_manager: &Pubkey,
    interface_lock: &AccountInfo,
    full_manager: &Pubkey,
    full_lock: &AccountInfo,
    target: &Pubkey,
) -> Result<()> {
    gate(interface_manager, interface_lock, full_manager, full_lock, target)?.check(false)
}

/// Refuse only when the full lock is set
pub fn require_not_fully_locked(
    full_manager: &Pubkey,
    full_lock: &AccountInfo,
    target: &Pubkey,
) -> Result<()> {
    AccessGate {
        interface_locked: false,
        fully_locked: lock_flag(full_lock, full_manager, target)?,
    }
    .check(true)
}

pub fn gate(
    interface_manager: &Pubkey,
    interface_lock: &AccountInfo,
    full_manager: &Pubkey,
    full_lock: &AccountInfo,
    target: &Pubkey,
) -> Result<AccessGate> {
    Ok(AccessGate {
        interface_locked: lock_flag(interface_lock, interface_manager, target)?,
        fully_locked: lock_flag(full_lock, full_manager, target)?,
    })
}

/// A final owner has to be an account a program can sign for through
/// `invoke_signed`: not executable, and owned by a program that is neither
/// System nor one of the loaders
pub fn is_program_controlled(account: &AccountInfo) -> bool {
    let owner = account.owner;
    !account.executable
        && *owner != anchor_lang::system_program::ID
        && *owner != bpf_loader::ID
        && *owner != bpf_loader_deprecated::ID
        && *owner != bpf_loader_upgradeable::ID
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_lock_blocks_external_only() {
        let gate = AccessGate {
            interface_locked: true,
            fully_locked: false,
        };
        assert_eq!(
            gate.check(false).unwrap_err(),
            LockManagerError::InterfaceLocked.into()
        );
        assert!(gate.check(true).is_ok());
    }

    #[test]
    fn full_lock_blocks_everyone() {
        let gate = AccessGate {
            interface_locked: false,
            fully_locked: true,
        };
        assert_eq!(gate.check(true).unwrap_err(), LockManagerError::FullyLocked.into());
        assert_eq!(gate.check(false).unwrap_err(), LockManagerError::FullyLocked.into());
    }

    #[test]
    fn open_gate_passes() {
        assert!(AccessGate::default().check(false).is_ok());
    }

    #[test]
    fn program_control_detection() {
        let key = Pubkey::new_unique();
        let system = anchor_lang::system_program::ID;

        let mut lamports = 0u64;
        let mut data: [u8; 0] = [];
        let wallet = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system, false, 0);
        assert!(!is_program_controlled(&wallet));

        let mut lamports = 0u64;
        let mut data: [u8; 0] = [];
        let other_program = Pubkey::new_unique();
        let vault = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &other_program, false, 0);
        assert!(is_program_controlled(&vault));
    }

    #[test]
    fn executable_accounts_cannot_own() {
        let key = Pubkey::new_unique();

        let mut lamports = 0u64;
        let mut data: [u8; 0] = [];
        let loader = bpf_loader_upgradeable::ID;
        let program = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &loader, true, 0);
        assert!(!is_program_controlled(&program));

        // the System Program sits at the all-zero address
        let zero = Pubkey::default();
        let native_loader = Pubkey::new_unique();
        let mut lamports = 1u64;
        let mut data: [u8; 0] = [];
        let system = AccountInfo::new(&zero, false, false, &mut lamports, &mut data, &native_loader, true, 0);
        assert!(!is_program_controlled(&system));
    }

    #[test]
    fn loader_owned_accounts_cannot_own() {
        let key = Pubkey::new_unique();
        let mut lamports = 0u64;
        let mut data: [u8; 0] = [];
        let loader = bpf_loader_upgradeable::ID;
        let program_data = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &loader, false, 0);
        assert!(!is_program_controlled(&program_data));
    }
}
