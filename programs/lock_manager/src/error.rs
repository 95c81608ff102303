use anchor_lang::prelude::*;

#[error_code]
pub enum LockManagerError {
    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Address must not be the zero address")]
    ZeroAddress,

    #[msg("Final owner has already been set")]
    OwnerAlreadySet,

    #[msg("Final owner has not been set yet")]
    OwnerNotFinalized,

    #[msg("New owner must be a program-controlled account")]
    OwnerNotContract,

    #[msg("Invalid PIN (must be at most 6 digits)")]
    InvalidPin,

    #[msg("Backup wallet has already been set")]
    BackupAlreadySet,

    #[msg("Backup wallet window has closed")]
    BackupWindowClosed,

    #[msg("Target must be an executable program")]
    TargetNotContract,

    #[msg("Data identifier already holds a ciphertext")]
    DataIdInUse,

    #[msg("No ciphertext stored for this data identifier and target")]
    CiphertextNotFound,

    #[msg("Target is already locked")]
    AlreadyLocked,

    #[msg("Target is already fully locked")]
    AlreadyFullyLocked,

    #[msg("Target is not locked")]
    NotLocked,

    #[msg("Target interface is locked")]
    InterfaceLocked,

    #[msg("Target is fully locked")]
    FullyLocked,

    #[msg("Manager tier does not allow this operation")]
    WrongTier,

    #[msg("Delegate manager does not match")]
    DelegateMismatch,

    #[msg("Lock state account does not match manager and target")]
    InvalidLockState,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
