//! Holder accounts passed through `remaining_accounts`
//!
//! Transfers touch a variable set of holders (sender, recipients, creator,
//! pool), so they arrive as remaining accounts. Each must be a writable
//! `HolderAccount` of the same config, listed once. State is copied out for
//! the ledger and written back with `commit`.

use anchor_lang::prelude::*;

use crate::error::ReflectionError;
use crate::state::HolderAccount;

pub struct HolderSet<'info> {
    accounts: Vec<Account<'info, HolderAccount>>,
    pub states: Vec<HolderAccount>,
}

impl<'info> HolderSet<'info> {
    pub fn load(config: &Pubkey, infos: &'info [AccountInfo<'info>]) -> Result<Self> {
        let mut accounts: Vec<Account<'info, HolderAccount>> = Vec::with_capacity(infos.len());

        for info in infos {
            require!(info.is_writable, ReflectionError::HolderNotWritable);
            require!(
                accounts.iter().all(|account| account.key() != info.key()),
                ReflectionError::DuplicateHolder
            );

            let account = Account::<HolderAccount>::try_from(info)?;
            require_keys_eq!(
                account.config,
                *config,
                ReflectionError::HolderConfigMismatch
            );
            accounts.push(account);
        }

        let states = accounts.iter().map(|account| (**account).clone()).collect();
        Ok(Self { accounts, states })
    }

    /// Write the ledger's changes back to the accounts
    pub fn commit(self) -> Result<()> {
        let HolderSet {
            mut accounts,
            states,
        } = self;

        for (account, state) in accounts.iter_mut().zip(states) {
            account.set_inner(state);
            account.exit(&crate::ID)?;
        }
        Ok(())
    }
}
