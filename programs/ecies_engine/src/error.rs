use anchor_lang::prelude::*;

#[error_code]
pub enum EciesError {
    #[msg("Invalid public key (zero coordinate or not on secp256k1)")]
    InvalidPublicKey,

    #[msg("Invalid scalar (must be a canonical secp256k1 scalar)")]
    InvalidScalar,

    #[msg("Point multiplication produced the point at infinity")]
    DegeneratePoint,

    #[msg("Caller is neither the owner nor the backup wallet")]
    Unauthorized,

    #[msg("Decryption window has expired")]
    DecryptWindowExpired,

    #[msg("Invalid PIN (must be at most 6 digits)")]
    InvalidPin,

    #[msg("PIN does not match the stored hash")]
    PinMismatch,

    #[msg("MAC verification failed")]
    MacMismatch,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
