use anchor_lang::prelude::*;

use crate::ecies::{self, Credentials};
use crate::state::Ciphertext;

#[derive(Accounts)]
pub struct Decrypt<'info> {
    /// Must be the owner or the backup wallet passed in
    pub caller: Signer<'info>,
}

pub fn handler(
    ctx: Context<Decrypt>,
    sealed: Ciphertext,
    recipient_priv: [u8; 32],
    pin: u32,
    pin_hash: [u8; 32],
    owner: Pubkey,
    backup_wallet: Pubkey,
) -> Result<[u8; 32]> {
    let clock = Clock::get()?;
    let caller = ctx.accounts.caller.key();

    let credentials = Credentials {
        caller,
        owner,
        backup_wallet,
        pin,
        pin_hash,
    };
    let opened = ecies::open(&sealed, &recipient_priv, &credentials, clock.unix_timestamp)?;

    emit!(DataDecrypted {
        caller,
        key_fingerprint: ecies::key_fingerprint(&opened.symmetric_key),
        timestamp: clock.unix_timestamp,
    });

    msg!("Ciphertext opened by {}", caller);

    Ok(opened.plaintext)
}

#[event]
pub struct DataDecrypted {
    pub caller: Pubkey,
    /// sha256 of the derived symmetric key
    pub key_fingerprint: [u8; 32],
    pub timestamp: i64,
}
