//! CPI into the ECIES engine
//!
//! Both instructions return their result through Solana return data; the
//! Anchor-generated client reads it back with `Return::get`. The caller's
//! signer privilege carries through the CPI, so the engine sees the same
//! caller identity as this program.

use anchor_lang::prelude::*;
use ecies_engine::cpi::accounts::{Decrypt, Encrypt};
use ecies_engine::state::Ciphertext;

/// Plaintext and recipient material for one seal
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct SealParams {
    /// Secret to seal
    pub data: [u8; 32],
    /// Recipient public key x coordinate
    pub recipient_pub_x: [u8; 32],
    /// Recipient public key y coordinate
    pub recipient_pub_y: [u8; 32],
    /// Single-use ephemeral private key
    pub ephemeral_priv: [u8; 32],
}

/// Identity and PIN material checked by the engine on open
pub struct OpenParams {
    pub recipient_priv: [u8; 32],
    pub pin: u32,
    pub pin_hash: [u8; 32],
    pub owner: Pubkey,
    pub backup_wallet: Pubkey,
}

pub fn seal<'info>(
    ecies_program: AccountInfo<'info>,
    caller: AccountInfo<'info>,
    params: &SealParams,
) -> Result<Ciphertext> {
    let cpi_ctx = CpiContext::new(ecies_program, Encrypt { caller });
    let sealed = ecies_engine::cpi::encrypt(
        cpi_ctx,
        params.data,
        params.recipient_pub_x,
        params.recipient_pub_y,
        params.ephemeral_priv,
    )?;
    Ok(sealed.get())
}

pub fn open<'info>(
    ecies_program: AccountInfo<'info>,
    caller: AccountInfo<'info>,
    sealed: Ciphertext,
    params: &OpenParams,
) -> Result<[u8; 32]> {
    let cpi_ctx = CpiContext::new(ecies_program, Decrypt { caller });
    let plaintext = ecies_engine::cpi::decrypt(
        cpi_ctx,
        sealed,
        params.recipient_priv,
        params.pin,
        params.pin_hash,
        params.owner,
        params.backup_wallet,
    )?;
    Ok(plaintext.get())
}
