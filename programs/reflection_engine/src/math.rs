//! Fixed-point reflection math
//!
//! The accumulator `reflection_per_token` grows by
//! `amount * PRECISION / reflectable_supply` on each distribution. A holder
//! with stored balance `b` and checkpoint `c` is owed
//! `b * (accumulator - c) / PRECISION`, applied lazily the next time the
//! holder is touched.

use anchor_lang::prelude::*;

use crate::error::ReflectionError;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// 1e18 fixed-point scale of the accumulator
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Reflection owed since `checkpoint`
pub fn owed(stored: u64, checkpoint: u128, accumulator: u128) -> Result<u64> {
    let delta = accumulator
        .checked_sub(checkpoint)
        .ok_or(ReflectionError::ArithmeticOverflow)?;
    if delta == 0 || stored == 0 {
        return Ok(0);
    }

    let owed = (stored as u128)
        .checked_mul(delta)
        .ok_or(ReflectionError::ArithmeticOverflow)?
        / PRECISION;
    u64::try_from(owed).map_err(|_| error!(ReflectionError::ArithmeticOverflow))
}

/// (stored, checkpoint, accumulator) -> (settled balance, new checkpoint)
pub fn settle(stored: u64, checkpoint: u128, accumulator: u128) -> Result<(u64, u128)> {
    let balance = stored
        .checked_add(owed(stored, checkpoint, accumulator)?)
        .ok_or(ReflectionError::ArithmeticOverflow)?;
    Ok((balance, accumulator))
}

/// Accumulator growth for distributing `amount` over `reflectable_supply`
pub fn accumulator_increment(amount: u64, reflectable_supply: u64) -> Result<u128> {
    if reflectable_supply == 0 {
        return Ok(0);
    }
    let scaled = (amount as u128)
        .checked_mul(PRECISION)
        .ok_or(ReflectionError::ArithmeticOverflow)?;
    Ok(scaled / reflectable_supply as u128)
}

/// `amount * bps / 10000`, truncating
pub fn bps_of(amount: u64, bps: u16) -> Result<u64> {
    let value = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(ReflectionError::ArithmeticOverflow)?
        / BPS_DENOMINATOR as u128;
    u64::try_from(value).map_err(|_| error!(ReflectionError::ArithmeticOverflow))
}

/// Fee rates of a reflection engine, in basis points
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct FeeRates {
    pub creator_bps: u16,
    pub reflection_bps: u16,
    pub liquidity_bps: u16,
    pub burn_bps: u16,
}

impl FeeRates {
    /// Each rate and their sum must stay strictly below 100%
    pub fn validate(&self) -> Result<u16> {
        let rates = [
            self.creator_bps,
            self.reflection_bps,
            self.liquidity_bps,
            self.burn_bps,
        ];
        require!(
            rates.iter().all(|&bps| (bps as u64) < BPS_DENOMINATOR),
            ReflectionError::InvalidFeeBps
        );

        let total: u64 = rates.iter().map(|&bps| bps as u64).sum();
        require!(total < BPS_DENOMINATOR, ReflectionError::InvalidFeeBps);
        Ok(total as u16)
    }

    /// Split `amount` into fee components.
    ///
    /// Components are truncated independently and must add up to the total
    /// computed from `total_fee_bps`, otherwise the transfer is rejected.
    pub fn split(&self, amount: u64, total_fee_bps: u16) -> Result<FeeBreakdown> {
        let creator = bps_of(amount, self.creator_bps)?;
        let reflection = bps_of(amount, self.reflection_bps)?;
        let liquidity = bps_of(amount, self.liquidity_bps)?;
        let burn = bps_of(amount, self.burn_bps)?;
        let total = bps_of(amount, total_fee_bps)?;

        let sum = [creator, reflection, liquidity, burn]
            .iter()
            .try_fold(0u64, |acc, &fee| acc.checked_add(fee))
            .ok_or(ReflectionError::ArithmeticOverflow)?;
        require!(sum == total, ReflectionError::FeeRoundingMismatch);
        require!(amount > total, ReflectionError::FeeExceedsAmount);

        Ok(FeeBreakdown {
            creator,
            reflection,
            liquidity,
            burn,
            total,
        })
    }
}

/// Fee components charged on one transfer
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct FeeBreakdown {
    pub creator: u64,
    pub reflection: u64,
    pub liquidity: u64,
    pub burn: u64,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_adds_pro_rata_share() {
        // accumulator moved by 0.5 per token
        let (balance, checkpoint) = settle(1_000, PRECISION, PRECISION + PRECISION / 2).unwrap();
        assert_eq!(balance, 1_500);
        assert_eq!(checkpoint, PRECISION + PRECISION / 2);
    }

    #[test]
    fn settle_is_noop_at_checkpoint() {
        assert_eq!(settle(777, 42, 42).unwrap(), (777, 42));
        assert_eq!(settle(0, 0, PRECISION).unwrap(), (0, PRECISION));
    }

    #[test]
    fn settle_truncates() {
        // 3 * (1/3 of a token) rounds down to 0 for each unit
        let third = PRECISION / 3;
        assert_eq!(owed(2, 0, third).unwrap(), 0);
        assert_eq!(owed(3, 0, third).unwrap(), 0);
        assert_eq!(owed(4, 0, third).unwrap(), 1);
    }

    #[test]
    fn checkpoint_ahead_of_accumulator_is_rejected() {
        let err = settle(1, 10, 9).unwrap_err();
        assert_eq!(err, ReflectionError::ArithmeticOverflow.into());
    }

    #[test]
    fn owed_overflow_is_rejected() {
        let err = owed(u64::MAX, 0, u128::MAX).unwrap_err();
        assert_eq!(err, ReflectionError::ArithmeticOverflow.into());
    }

    #[test]
    fn increment_scales_by_precision() {
        assert_eq!(accumulator_increment(1_000, 1_000_000).unwrap(), PRECISION / 1_000);
        assert_eq!(accumulator_increment(5, 0).unwrap(), 0);
    }

    #[test]
    fn bps_truncates() {
        assert_eq!(bps_of(10_000, 250).unwrap(), 250);
        assert_eq!(bps_of(9_999, 1).unwrap(), 0);
        assert_eq!(bps_of(u64::MAX, 9_999).unwrap(), (u64::MAX as u128 * 9_999 / 10_000) as u64);
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
    fn fee_sum_must_stay_below_denominator() {
        let err = rates(3000, 3000, 2000, 2000).validate().unwrap_err();
        assert_eq!(err, ReflectionError::InvalidFeeBps.into());

        assert_eq!(rates(3000, 3000, 2000, 1999).validate().unwrap(), 9999);
        assert_eq!(rates(0, 0, 0, 0).validate().unwrap(), 0);
    }

    #[test]
    fn single_rate_at_denominator_is_rejected() {
        let err = rates(10_000, 0, 0, 0).validate().unwrap_err();
        assert_eq!(err, ReflectionError::InvalidFeeBps.into());
    }

    #[test]
    fn split_assigns_each_component() {
        let fees = rates(100, 200, 300, 400);
        let total = fees.validate().unwrap();
        let breakdown = fees.split(1_000_000, total).unwrap();
        assert_eq!(
            breakdown,
            FeeBreakdown {
                creator: 10_000,
                reflection: 20_000,
                liquidity: 30_000,
                burn: 40_000,
                total: 100_000,
            }
        );
    }

    #[test]
    fn split_rejects_inconsistent_rounding() {
        // each component truncates to 0 while the total truncates to 2
        let fees = rates(3333, 3333, 3333, 0);
        let total = fees.validate().unwrap();
        let err = fees.split(3, total).unwrap_err();
        assert_eq!(err, ReflectionError::FeeRoundingMismatch.into());
    }
}
