use anchor_lang::prelude::*;

#[error_code]
pub enum ReflectionError {
    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Address must not be the zero address")]
    ZeroAddress,

    #[msg("Invalid fee basis points (each < 10000, total < 10000)")]
    InvalidFeeBps,

    #[msg("Fees have already been initialized")]
    FeesAlreadyInitialized,

    #[msg("Fees have not been initialized")]
    FeesNotInitialized,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Total supply is zero")]
    ZeroSupply,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Fee components do not add up to the total fee")]
    FeeRoundingMismatch,

    #[msg("Total fee must be less than the transfer amount")]
    FeeExceedsAmount,

    #[msg("Batch must hold between 1 and 99 entries")]
    InvalidBatchSize,

    #[msg("Batch array lengths do not match")]
    BatchLengthMismatch,

    #[msg("Holder account was not provided")]
    HolderNotProvided,

    #[msg("Holder account provided more than once")]
    DuplicateHolder,

    #[msg("Holder account belongs to another engine")]
    HolderConfigMismatch,

    #[msg("Holder account must be writable")]
    HolderNotWritable,

    #[msg("Burn amount exceeds the pending burn")]
    BurnExceedsPending,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
