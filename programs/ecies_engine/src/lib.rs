//! ECIES Engine
//!
//! Stateless sealing primitive over secp256k1. `encrypt` seals a 32-byte
//! secret to a recipient public key and returns the ciphertext as return
//! data; `decrypt` opens it again within a 24 hour window, gated on the
//! caller identity and a 6-digit PIN.
//!
//! The lock manager program drives both instructions by CPI and owns the
//! storage of sealed secrets.

use anchor_lang::prelude::*;

pub mod ec;
pub mod ecies;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;
use state::Ciphertext;

declare_id!("4Jj6SKFfG8QJd3c3Ah9rqMgiA7ZHo8DHJJyXZdyKLKsk");

#[program]
pub mod ecies_engine {
    use super::*;

    /// Seal 32 bytes to (recipient_pub_x, recipient_pub_y) with a caller-chosen ephemeral key
    pub fn encrypt(
        ctx: Context<Encrypt>,
        data: [u8; 32],
        recipient_pub_x: [u8; 32],
        recipient_pub_y: [u8; 32],
        ephemeral_priv: [u8; 32],
    ) -> Result<Ciphertext> {
        instructions::encrypt::handler(ctx, data, recipient_pub_x, recipient_pub_y, ephemeral_priv)
    }

    /// Open a ciphertext (owner or backup wallet, within 24h, correct PIN, intact MAC)
    pub fn decrypt(
        ctx: Context<Decrypt>,
        sealed: Ciphertext,
        recipient_priv: [u8; 32],
        pin: u32,
        pin_hash: [u8; 32],
        owner: Pubkey,
        backup_wallet: Pubkey,
    ) -> Result<[u8; 32]> {
        instructions::decrypt::handler(
            ctx,
            sealed,
            recipient_priv,
            pin,
            pin_hash,
            owner,
            backup_wallet,
        )
    }
}
