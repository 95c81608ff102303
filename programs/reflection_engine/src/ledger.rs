//! Balance ledger over one config and the holders touched by an instruction
//!
//! Every operation settles the holders it reads before comparing or moving
//! balances. Included holders keep `reflected_balance` + checkpoint; excluded
//! holders keep a flat `excluded_balance` mirrored in `excluded_supply`.

use anchor_lang::prelude::*;

use crate::error::ReflectionError;
use crate::math::{self, FeeBreakdown};
use crate::state::{HolderAccount, ReflectionConfig};

/// Batches must hold fewer entries than this
pub const MAX_BATCH_SIZE: usize = 100;

/// Outcome of one transfer leg
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct TransferReceipt {
    pub net_amount: u64,
    pub fees: FeeBreakdown,
}

pub struct Ledger<'a> {
    config: &'a mut ReflectionConfig,
    holders: &'a mut [HolderAccount],
}

pub fn validate_batch_len(len: usize) -> Result<()> {
    require!(len > 0 && len < MAX_BATCH_SIZE, ReflectionError::InvalidBatchSize);
    Ok(())
}

impl<'a> Ledger<'a> {
    pub fn new(config: &'a mut ReflectionConfig, holders: &'a mut [HolderAccount]) -> Self {
        Self { config, holders }
    }

    pub fn config(&self) -> &ReflectionConfig {
        &*self.config
    }

    pub fn holder(&self, owner: &Pubkey) -> Result<&HolderAccount> {
        let index = self.position(owner)?;
        Ok(&self.holders[index])
    }

    fn position(&self, owner: &Pubkey) -> Result<usize> {
        self.holders
            .iter()
            .position(|holder| holder.owner == *owner)
            .ok_or_else(|| error!(ReflectionError::HolderNotProvided))
    }

    fn settle_at(&mut self, index: usize) -> Result<()> {
        let accumulator = self.config.reflection_per_token;
        self.holders[index].settle(accumulator)
    }

    /// Stored balance of a settled holder
    fn balance_at(&self, index: usize) -> u64 {
        let holder = &self.holders[index];
        if holder.reflection_excluded {
            holder.excluded_balance
        } else {
            holder.reflected_balance
        }
    }

    fn credit(&mut self, index: usize, amount: u64) -> Result<()> {
        let holder = &mut self.holders[index];
        if holder.reflection_excluded {
            holder.excluded_balance = holder
                .excluded_balance
                .checked_add(amount)
                .ok_or(ReflectionError::ArithmeticOverflow)?;
            self.config.excluded_supply = self
                .config
                .excluded_supply
                .checked_add(amount)
                .ok_or(ReflectionError::ArithmeticOverflow)?;
        } else {
            holder.reflected_balance = holder
                .reflected_balance
                .checked_add(amount)
                .ok_or(ReflectionError::ArithmeticOverflow)?;
        }
        Ok(())
    }

    fn debit(&mut self, index: usize, amount: u64) -> Result<()> {
        let holder = &mut self.holders[index];
        if holder.reflection_excluded {
            holder.excluded_balance = holder
                .excluded_balance
                .checked_sub(amount)
                .ok_or(ReflectionError::InsufficientBalance)?;
            self.config.excluded_supply = self
                .config
                .excluded_supply
                .checked_sub(amount)
                .ok_or(ReflectionError::ArithmeticOverflow)?;
        } else {
            holder.reflected_balance = holder
                .reflected_balance
                .checked_sub(amount)
                .ok_or(ReflectionError::InsufficientBalance)?;
        }
        Ok(())
    }

    /// Settle `owner` and return the settled balance
    pub fn settle(&mut self, owner: &Pubkey) -> Result<u64> {
        let index = self.position(owner)?;
        self.settle_at(index)?;
        Ok(self.balance_at(index))
    }

    pub fn real_balance(&self, owner: &Pubkey) -> Result<u64> {
        self.holder(owner)?
            .real_balance(self.config.reflection_per_token)
    }

    /// Credit newly minted supply to `owner`
    pub fn mint(&mut self, owner: &Pubkey, amount: u64) -> Result<()> {
        require!(amount > 0, ReflectionError::InvalidAmount);
        require!(*owner != Pubkey::default(), ReflectionError::ZeroAddress);

        let index = self.position(owner)?;
        self.settle_at(index)?;

        self.config.total_supply = self
            .config
            .total_supply
            .checked_add(amount)
            .ok_or(ReflectionError::ArithmeticOverflow)?;
        self.credit(index, amount)
    }

    /// Spread `amount` over the reflectable supply
    /// Returns false when nothing was distributed
    pub fn distribute(&mut self, amount: u64) -> Result<bool> {
        if amount == 0 {
            return Ok(false);
        }
        let reflectable = self.config.reflectable_supply()?;
        if reflectable == 0 {
            return Ok(false);
        }

        let increment = math::accumulator_increment(amount, reflectable)?;
        self.config.reflection_per_token = self
            .config
            .reflection_per_token
            .checked_add(increment)
            .ok_or(ReflectionError::ArithmeticOverflow)?;
        self.config.total_reflected = self
            .config
            .total_reflected
            .checked_add(amount)
            .ok_or(ReflectionError::ArithmeticOverflow)?;
        Ok(true)
    }

    pub fn transfer(
        &mut self,
        sender: &Pubkey,
        recipient: &Pubkey,
        amount: u64,
    ) -> Result<TransferReceipt> {
        require!(self.config.fees_initialized, ReflectionError::FeesNotInitialized);
        require!(amount > 0, ReflectionError::InvalidAmount);
        require!(
            *sender != Pubkey::default() && *recipient != Pubkey::default(),
            ReflectionError::ZeroAddress
        );
        require!(self.config.total_supply > 0, ReflectionError::ZeroSupply);

        let from = self.position(sender)?;
        let to = self.position(recipient)?;
        self.settle_at(from)?;
        self.settle_at(to)?;

        let exempt = self.holders[from].fee_excluded
            || self.holders[to].fee_excluded
            || self.config.total_fee_bps == 0;
        if exempt {
            self.debit(from, amount)?;
            self.credit(to, amount)?;
            return Ok(TransferReceipt {
                net_amount: amount,
                fees: FeeBreakdown::default(),
            });
        }

        let fees = self
            .config
            .fee_rates()
            .split(amount, self.config.total_fee_bps)?;
        let net_amount = amount
            .checked_sub(fees.total)
            .ok_or(ReflectionError::FeeExceedsAmount)?;

        self.debit(from, amount)?;
        self.credit(to, net_amount)?;

        if fees.creator > 0 {
            let creator = self.config.creator;
            let index = self.position(&creator)?;
            self.settle_at(index)?;
            self.credit(index, fees.creator)?;
        }
        if fees.liquidity > 0 {
            let pool = self.config.liquidity_pool;
            let index = self.position(&pool)?;
            self.settle_at(index)?;
            self.credit(index, fees.liquidity)?;
        }

        self.distribute(fees.reflection)?;

        if fees.burn > 0 {
            self.config.total_burn_requested = self
                .config
                .total_burn_requested
                .checked_add(fees.burn)
                .ok_or(ReflectionError::ArithmeticOverflow)?;
            self.config.pending_burn = self
                .config
                .pending_burn
                .checked_add(fees.burn)
                .ok_or(ReflectionError::ArithmeticOverflow)?;
        }

        Ok(TransferReceipt { net_amount, fees })
    }

    /// Validate the whole batch and the sender's aggregate balance, then run each leg
    pub fn batch_transfer(
        &mut self,
        sender: &Pubkey,
        recipients: &[Pubkey],
        amounts: &[u64],
    ) -> Result<Vec<TransferReceipt>> {
        validate_batch_len(recipients.len())?;
        require!(
            recipients.len() == amounts.len(),
            ReflectionError::BatchLengthMismatch
        );
        require!(
            amounts.iter().all(|&amount| amount > 0),
            ReflectionError::InvalidAmount
        );
        require!(
            recipients.iter().all(|r| *r != Pubkey::default()),
            ReflectionError::ZeroAddress
        );

        let total = amounts
            .iter()
            .try_fold(0u64, |acc, &amount| acc.checked_add(amount))
            .ok_or(ReflectionError::ArithmeticOverflow)?;
        require!(
            self.settle(sender)? >= total,
            ReflectionError::InsufficientBalance
        );

        recipients
            .iter()
            .zip(amounts)
            .map(|(recipient, &amount)| self.transfer(sender, recipient, amount))
            .collect()
    }

    /// Move `owner` in or out of reflection. Returns false when already in the requested state
    pub fn set_reflection_exclusion(&mut self, owner: &Pubkey, excluded: bool) -> Result<bool> {
        require!(*owner != Pubkey::default(), ReflectionError::ZeroAddress);
        let index = self.position(owner)?;
        if self.holders[index].reflection_excluded == excluded {
            return Ok(false);
        }

        let accumulator = self.config.reflection_per_token;
        if excluded {
            self.settle_at(index)?;
            let balance = self.holders[index].reflected_balance;
            let excluded_supply = self
                .config
                .excluded_supply
                .checked_add(balance)
                .ok_or(ReflectionError::ArithmeticOverflow)?;
            require!(
                excluded_supply <= self.config.total_supply,
                ReflectionError::ArithmeticOverflow
            );

            let holder = &mut self.holders[index];
            holder.reflected_balance = 0;
            holder.excluded_balance = balance;
            holder.reflection_excluded = true;
            self.config.excluded_supply = excluded_supply;
        } else {
            let balance = self.holders[index].excluded_balance;
            self.config.excluded_supply = self
                .config
                .excluded_supply
                .checked_sub(balance)
                .ok_or(ReflectionError::ArithmeticOverflow)?;

            let holder = &mut self.holders[index];
            holder.excluded_balance = 0;
            holder.reflected_balance = balance;
            holder.checkpoint = accumulator;
            holder.reflection_excluded = false;
        }
        Ok(true)
    }

    pub fn set_fee_exclusion(&mut self, owner: &Pubkey, excluded: bool) -> Result<bool> {
        require!(*owner != Pubkey::default(), ReflectionError::ZeroAddress);
        let index = self.position(owner)?;
        let holder = &mut self.holders[index];
        if holder.fee_excluded == excluded {
            return Ok(false);
        }
        holder.fee_excluded = excluded;
        Ok(true)
    }

    pub fn set_batch_reflection_exclusion(
        &mut self,
        owners: &[Pubkey],
        flags: &[bool],
    ) -> Result<()> {
        self.validate_owner_batch(owners, flags)?;
        for (owner, &excluded) in owners.iter().zip(flags) {
            self.set_reflection_exclusion(owner, excluded)?;
        }
        Ok(())
    }

    pub fn set_batch_fee_exclusion(&mut self, owners: &[Pubkey], flags: &[bool]) -> Result<()> {
        self.validate_owner_batch(owners, flags)?;
        for (owner, &excluded) in owners.iter().zip(flags) {
            self.set_fee_exclusion(owner, excluded)?;
        }
        Ok(())
    }

    fn validate_owner_batch(&self, owners: &[Pubkey], flags: &[bool]) -> Result<()> {
        validate_batch_len(owners.len())?;
        require!(owners.len() == flags.len(), ReflectionError::BatchLengthMismatch);
        for owner in owners {
            require!(*owner != Pubkey::default(), ReflectionError::ZeroAddress);
            self.position(owner)?;
        }
        Ok(())
    }
}
