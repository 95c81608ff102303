use anchor_lang::prelude::*;

use crate::error::ReflectionError;
use crate::math::FeeRates;

/// Per-token reflection configuration and global accumulator
/// Size: 8 (discriminator) + 196 = 204 bytes
#[account]
#[derive(Default)]
pub struct ReflectionConfig {
    /// Token wrapper allowed to drive balance mutations
    pub authority: Pubkey,

    /// Token this engine accounts for (PDA seed)
    pub token: Pubkey,

    /// Fee credited to the creator, in basis points
    pub creator_bps: u16,

    /// Fee reflected to all included holders, in basis points
    pub reflection_bps: u16,

    /// Fee credited to the liquidity pool, in basis points
    pub liquidity_bps: u16,

    /// Fee signalled for burning, in basis points
    pub burn_bps: u16,

    /// Cached sum of the four rates
    pub total_fee_bps: u16,

    /// Creator fee recipient
    pub creator: Pubkey,

    /// Liquidity fee recipient
    pub liquidity_pool: Pubkey,

    /// Set once by initialize_fees
    pub fees_initialized: bool,

    /// Supply tracked by this engine
    pub total_supply: u64,

    /// Cumulative amount distributed as reflection
    pub total_reflected: u64,

    /// Sum of balances held by reflection-excluded holders
    pub excluded_supply: u64,

    /// Reflection per token, scaled by 1e18
    pub reflection_per_token: u128,

    /// Cumulative burn fees signalled to the token wrapper
    pub total_burn_requested: u64,

    /// Signalled burns not yet confirmed by apply_burn
    pub pending_burn: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl ReflectionConfig {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // token
        2 +  // creator_bps
        2 +  // reflection_bps
        2 +  // liquidity_bps
        2 +  // burn_bps
        2 +  // total_fee_bps
        32 + // creator
        32 + // liquidity_pool
        1 +  // fees_initialized
        8 +  // total_supply
        8 +  // total_reflected
        8 +  // excluded_supply
        16 + // reflection_per_token
        8 +  // total_burn_requested
        8 +  // pending_burn
        1;   // bump
    // Total: 204 bytes

    pub const SEED: &'static [u8] = b"reflection_config";

    pub fn fee_rates(&self) -> FeeRates {
        FeeRates {
            creator_bps: self.creator_bps,
            reflection_bps: self.reflection_bps,
            liquidity_bps: self.liquidity_bps,
            burn_bps: self.burn_bps,
        }
    }

    /// One-shot fee setup
    pub fn initialize_fees(
        &mut self,
        rates: FeeRates,
        creator: Pubkey,
        liquidity_pool: Pubkey,
    ) -> Result<()> {
        require!(!self.fees_initialized, ReflectionError::FeesAlreadyInitialized);
        self.write_fees(rates, creator, liquidity_pool)?;
        self.fees_initialized = true;
        Ok(())
    }

    pub fn update_fees(
        &mut self,
        rates: FeeRates,
        creator: Pubkey,
        liquidity_pool: Pubkey,
    ) -> Result<()> {
        require!(self.fees_initialized, ReflectionError::FeesNotInitialized);
        self.write_fees(rates, creator, liquidity_pool)
    }

    fn write_fees(&mut self, rates: FeeRates, creator: Pubkey, liquidity_pool: Pubkey) -> Result<()> {
        require!(
            creator != Pubkey::default() && liquidity_pool != Pubkey::default(),
            ReflectionError::ZeroAddress
        );
        let total = rates.validate()?;

        self.creator_bps = rates.creator_bps;
        self.reflection_bps = rates.reflection_bps;
        self.liquidity_bps = rates.liquidity_bps;
        self.burn_bps = rates.burn_bps;
        self.total_fee_bps = total;
        self.creator = creator;
        self.liquidity_pool = liquidity_pool;
        Ok(())
    }

    /// Confirm a burn the token wrapper performed for signalled burn fees
    pub fn apply_burn(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, ReflectionError::InvalidAmount);
        require!(amount <= self.pending_burn, ReflectionError::BurnExceedsPending);

        let total_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(ReflectionError::ArithmeticOverflow)?;
        require!(
            total_supply >= self.excluded_supply,
            ReflectionError::InsufficientBalance
        );
        let pending_burn = self
            .pending_burn
            .checked_sub(amount)
            .ok_or(ReflectionError::ArithmeticOverflow)?;

        self.total_supply = total_supply;
        self.pending_burn = pending_burn;
        Ok(())
    }

    /// Supply that currently receives reflection
    pub fn reflectable_supply(&self) -> Result<u64> {
        self.total_supply
            .checked_sub(self.excluded_supply)
            .ok_or_else(|| error!(ReflectionError::ArithmeticOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn rates(creator: u16, reflection: u16, liquidity: u16, burn: u16) -> FeeRates {
        FeeRates {
            creator_bps: creator,
            reflection_bps: reflection,
            liquidity_bps: liquidity,
            burn_bps: burn,
        }
    }

    #[test]
    fn fees_are_one_shot() {
        let mut config = ReflectionConfig::default();
        config
            .initialize_fees(rates(100, 200, 300, 400), key(1), key(2))
            .unwrap();
        assert!(config.fees_initialized);
        assert_eq!(config.total_fee_bps, 1_000);

        let err = config
            .initialize_fees(rates(1, 1, 1, 1), key(1), key(2))
            .unwrap_err();
        assert_eq!(err, ReflectionError::FeesAlreadyInitialized.into());
        assert_eq!(config.creator_bps, 100);
    }

    #[test]
    fn full_fee_sum_is_rejected() {
        let mut config = ReflectionConfig::default();
        let err = config
            .initialize_fees(rates(3000, 3000, 2000, 2000), key(1), key(2))
            .unwrap_err();
        assert_eq!(err, ReflectionError::InvalidFeeBps.into());
        assert!(!config.fees_initialized);

        config
            .initialize_fees(rates(3000, 3000, 2000, 1999), key(1), key(2))
            .unwrap();
        assert_eq!(config.total_fee_bps, 9_999);
    }

    #[test]
    fn recipients_must_be_set() {
        let mut config = ReflectionConfig::default();
        let err = config
            .initialize_fees(rates(1, 1, 1, 1), Pubkey::default(), key(2))
            .unwrap_err();
        assert_eq!(err, ReflectionError::ZeroAddress.into());

        let err = config
            .initialize_fees(rates(1, 1, 1, 1), key(1), Pubkey::default())
            .unwrap_err();
        assert_eq!(err, ReflectionError::ZeroAddress.into());
    }

    #[test]
    fn update_requires_initialized_fees() {
        let mut config = ReflectionConfig::default();
        let err = config
            .update_fees(rates(1, 1, 1, 1), key(1), key(2))
            .unwrap_err();
        assert_eq!(err, ReflectionError::FeesNotInitialized.into());

        config.initialize_fees(rates(1, 1, 1, 1), key(1), key(2)).unwrap();
        config.update_fees(rates(0, 500, 0, 0), key(3), key(4)).unwrap();
        assert_eq!(config.total_fee_bps, 500);
        assert_eq!(config.creator, key(3));
        assert_eq!(config.liquidity_pool, key(4));
    }

    #[test]
    fn burn_is_bounded_by_pending_and_excluded_supply() {
        let mut config = ReflectionConfig {
            total_supply: 10_000,
            excluded_supply: 9_000,
            pending_burn: 1_500,
            ..ReflectionConfig::default()
        };

        let err = config.apply_burn(0).unwrap_err();
        assert_eq!(err, ReflectionError::InvalidAmount.into());

        let err = config.apply_burn(1_501).unwrap_err();
        assert_eq!(err, ReflectionError::BurnExceedsPending.into());

        // would leave less supply than the excluded holders hold
        let err = config.apply_burn(1_500).unwrap_err();
        assert_eq!(err, ReflectionError::InsufficientBalance.into());
        assert_eq!(config.total_supply, 10_000);
        assert_eq!(config.pending_burn, 1_500);

        config.apply_burn(600).unwrap();
        assert_eq!(config.total_supply, 9_400);
        assert_eq!(config.pending_burn, 900);

        config.apply_burn(400).unwrap();
        assert_eq!(config.total_supply, 9_000);
        assert_eq!(config.pending_burn, 500);
    }
}
