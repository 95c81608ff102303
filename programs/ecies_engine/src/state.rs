use anchor_lang::prelude::*;

/// Sealed 32-byte secret
///
/// Returned by `encrypt` and handed back verbatim to `decrypt`. The engine
/// keeps no storage of its own: callers persist this value wherever they
/// key their secrets.
/// Size: 136 bytes
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Ciphertext {
    /// Ephemeral public key x coordinate (k * G)
    pub ephemeral_pub_x: [u8; 32],

    /// Ephemeral public key y coordinate (k * G)
    pub ephemeral_pub_y: [u8; 32],

    /// Plaintext XOR symmetric key
    pub ciphertext: [u8; 32],

    /// sha256(ciphertext || ephemeral_pub_x || ephemeral_pub_y)
    pub mac: [u8; 32],

    /// Unix timestamp of encryption (0 = absent)
    pub created_at: i64,
}

impl Ciphertext {
    pub const SIZE: usize = 32 + // ephemeral_pub_x
        32 + // ephemeral_pub_y
        32 + // ciphertext
        32 + // mac
        8;   // created_at
    // Total: 136 bytes

    /// Zero is never a valid timestamp, so it doubles as the unset marker
    pub fn is_present(&self) -> bool {
        self.created_at != 0
    }
}
