use anchor_lang::prelude::*;

use crate::error::ReflectionError;
use crate::holder_set::HolderSet;
use crate::ledger::{Ledger, TransferReceipt};
use crate::state::ReflectionConfig;

/// Returned by `process_transfer` and `process_batch_transfer`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct TransferOutcome {
    pub net_amount: u64,
    pub total_fees: u64,
}

/// Holder PDAs of every party (sender, recipients, fee recipients that
/// receive a non-zero share) are passed as writable remaining accounts.
#[derive(Accounts)]
pub struct ProcessTransfer<'info> {
    #[account(
        mut,
        seeds = [ReflectionConfig::SEED, config.token.as_ref()],
        bump = config.bump,
        has_one = authority @ ReflectionError::Unauthorized
    )]
    pub config: Account<'info, ReflectionConfig>,

    pub authority: Signer<'info>,
}

pub fn process_transfer_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ProcessTransfer<'info>>,
    sender: Pubkey,
    recipient: Pubkey,
    amount: u64,
) -> Result<TransferOutcome> {
    let config_key = ctx.accounts.config.key();
    let mut holders = HolderSet::load(&config_key, ctx.remaining_accounts)?;
    let config: &mut ReflectionConfig = &mut ctx.accounts.config;

    let mut ledger = Ledger::new(config, &mut holders.states);
    let receipt = ledger.transfer(&sender, &recipient, amount)?;
    emit_receipt(config_key, ledger.config(), &sender, &recipient, amount, &receipt);
    holders.commit()?;

    Ok(TransferOutcome {
        net_amount: receipt.net_amount,
        total_fees: receipt.fees.total,
    })
}

pub fn process_batch_transfer_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ProcessTransfer<'info>>,
    sender: Pubkey,
    recipients: Vec<Pubkey>,
    amounts: Vec<u64>,
) -> Result<TransferOutcome> {
    let config_key = ctx.accounts.config.key();
    let mut holders = HolderSet::load(&config_key, ctx.remaining_accounts)?;
    let config: &mut ReflectionConfig = &mut ctx.accounts.config;

    let mut ledger = Ledger::new(config, &mut holders.states);
    let receipts = ledger.batch_transfer(&sender, &recipients, &amounts)?;

    let mut outcome = TransferOutcome::default();
    for ((recipient, &amount), receipt) in recipients.iter().zip(&amounts).zip(&receipts) {
        emit_receipt(config_key, ledger.config(), &sender, recipient, amount, receipt);
        outcome.net_amount = outcome
            .net_amount
            .checked_add(receipt.net_amount)
            .ok_or(ReflectionError::ArithmeticOverflow)?;
        outcome.total_fees = outcome
            .total_fees
            .checked_add(receipt.fees.total)
            .ok_or(ReflectionError::ArithmeticOverflow)?;
    }
    holders.commit()?;

    msg!("Batch transfer: {} legs from {}", receipts.len(), sender);
    Ok(outcome)
}

fn emit_receipt(
    config_key: Pubkey,
    config: &ReflectionConfig,
    sender: &Pubkey,
    recipient: &Pubkey,
    amount: u64,
    receipt: &TransferReceipt,
) {
    emit!(ReflectionTransfer {
        config: config_key,
        sender: *sender,
        recipient: *recipient,
        amount,
        net_amount: receipt.net_amount,
        creator_fee: receipt.fees.creator,
        reflection_fee: receipt.fees.reflection,
        liquidity_fee: receipt.fees.liquidity,
        burn_fee: receipt.fees.burn,
    });

    if receipt.fees.reflection > 0 {
        emit!(ReflectionDistributed {
            config: config_key,
            amount: receipt.fees.reflection,
            reflection_per_token: config.reflection_per_token,
            total_reflected: config.total_reflected,
        });
    }

    if receipt.fees.burn > 0 {
        emit!(BurnRequested {
            config: config_key,
            amount: receipt.fees.burn,
            pending_burn: config.pending_burn,
        });
    }
}

#[event]
pub struct ReflectionTransfer {
    pub config: Pubkey,
    pub sender: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub net_amount: u64,
    pub creator_fee: u64,
    pub reflection_fee: u64,
    pub liquidity_fee: u64,
    pub burn_fee: u64,
}

#[event]
pub struct ReflectionDistributed {
    pub config: Pubkey,
    pub amount: u64,
    pub reflection_per_token: u128,
    pub total_reflected: u64,
}

/// The token wrapper burns `amount` and confirms it with `apply_burn`
#[event]
pub struct BurnRequested {
    pub config: Pubkey,
    pub amount: u64,
    pub pending_burn: u64,
}
