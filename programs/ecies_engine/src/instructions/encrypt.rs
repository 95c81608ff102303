use anchor_lang::prelude::*;

use crate::ecies;
use crate::state::Ciphertext;

#[derive(Accounts)]
pub struct Encrypt<'info> {
    pub caller: Signer<'info>,
}

pub fn handler(
    ctx: Context<Encrypt>,
    data: [u8; 32],
    recipient_pub_x: [u8; 32],
    recipient_pub_y: [u8; 32],
    ephemeral_priv: [u8; 32],
) -> Result<Ciphertext> {
    let clock = Clock::get()?;

    let sealed = ecies::seal(
        &data,
        &recipient_pub_x,
        &recipient_pub_y,
        &ephemeral_priv,
        clock.unix_timestamp,
    )?;

    emit!(DataEncrypted {
        caller: ctx.accounts.caller.key(),
        recipient_pub_x,
        recipient_pub_y,
        ciphertext: sealed.ciphertext,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Sealed 32 bytes for recipient {:?} (caller {})",
        &recipient_pub_x[0..8],
        ctx.accounts.caller.key()
    );

    Ok(sealed)
}

#[event]
pub struct DataEncrypted {
    pub caller: Pubkey,
    pub recipient_pub_x: [u8; 32],
    pub recipient_pub_y: [u8; 32],
    pub ciphertext: [u8; 32],
    pub timestamp: i64,
}
