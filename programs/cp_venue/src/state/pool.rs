use anchor_lang::prelude::*;

use crate::errors::VenueError;
use crate::math::{
    amounts_for_burn, encode_price, get_amount_out, liquidity_to_mint, optimal_deposit,
    MINIMUM_LIQUIDITY,
};

/// Constant-product pool for a sorted mint pair (`mint_0 < mint_1`)
#[account]
pub struct Pool {
    /// Venue this pool belongs to
    pub venue: Pubkey,

    pub mint_0: Pubkey,
    pub mint_1: Pubkey,

    /// Pool-owned token vaults
    pub vault_0: Pubkey,
    pub vault_1: Pubkey,

    /// Liquidity token mint (pool is the mint authority)
    pub lp_mint: Pubkey,

    /// Reserves as of the last pool update
    pub reserve_0: u64,
    pub reserve_1: u64,

    /// Outstanding liquidity, including the permanently locked minimum
    pub total_liquidity: u64,

    /// Time-integrated Q64.64 prices (token 0 in token 1, token 1 in token 0).
    /// Wrapping arithmetic; consumers must difference two readings.
    pub price_0_cumulative: u128,
    pub price_1_cumulative: u128,

    /// Timestamp of the last accumulator update
    pub last_update: i64,

    /// Swap fee in basis points
    pub swap_fee_bps: u16,

    /// PDA bump
    pub bump: u8,
}

impl Pool {
    pub const SIZE: usize = 8 + (32 * 6) + (8 * 3) + (16 * 2) + 8 + 2 + 1;

    /// Cumulative prices as they would read at `now`, extrapolating the current
    /// reserves over the time elapsed since the last update
    pub fn cumulative_prices_at(&self, now: i64) -> Result<(u128, u128)> {
        let mut price_0_cumulative = self.price_0_cumulative;
        let mut price_1_cumulative = self.price_1_cumulative;

        let elapsed = now.saturating_sub(self.last_update);
        if elapsed > 0 && self.reserve_0 > 0 && self.reserve_1 > 0 {
            let elapsed = elapsed as u128;
            price_0_cumulative = price_0_cumulative
                .wrapping_add(encode_price(self.reserve_1, self.reserve_0)?.wrapping_mul(elapsed));
            price_1_cumulative = price_1_cumulative
                .wrapping_add(encode_price(self.reserve_0, self.reserve_1)?.wrapping_mul(elapsed));
        }

        Ok((price_0_cumulative, price_1_cumulative))
    }

    /// Accumulates prices over the elapsed interval using the old reserves, then
    /// records the new reserves
    pub fn update(&mut self, reserve_0: u64, reserve_1: u64, now: i64) -> Result<()> {
        let (price_0_cumulative, price_1_cumulative) = self.cumulative_prices_at(now)?;
        self.price_0_cumulative = price_0_cumulative;
        self.price_1_cumulative = price_1_cumulative;
        self.reserve_0 = reserve_0;
        self.reserve_1 = reserve_1;
        if now > self.last_update {
            self.last_update = now;
        }
        Ok(())
    }

    /// Books a deposit at the pool ratio. Returns `(amount_0, amount_1, liquidity)`
    /// to collect from and mint to the provider.
    pub fn apply_deposit(
        &mut self,
        amount_0_desired: u64,
        amount_1_desired: u64,
        amount_0_min: u64,
        amount_1_min: u64,
        now: i64,
    ) -> Result<(u64, u64, u64)> {
        let (amount_0, amount_1) = optimal_deposit(
            amount_0_desired,
            amount_1_desired,
            amount_0_min,
            amount_1_min,
            self.reserve_0,
            self.reserve_1,
        )?;
        let liquidity = liquidity_to_mint(
            amount_0,
            amount_1,
            self.reserve_0,
            self.reserve_1,
            self.total_liquidity,
        )?;

        // First deposit permanently locks the minimum
        let locked = if self.total_liquidity == 0 { MINIMUM_LIQUIDITY } else { 0 };
        self.total_liquidity = self
            .total_liquidity
            .checked_add(liquidity)
            .and_then(|total| total.checked_add(locked))
            .ok_or(VenueError::MathOverflow)?;

        let reserve_0 = self.reserve_0.checked_add(amount_0).ok_or(VenueError::MathOverflow)?;
        let reserve_1 = self.reserve_1.checked_add(amount_1).ok_or(VenueError::MathOverflow)?;
        self.update(reserve_0, reserve_1, now)?;

        Ok((amount_0, amount_1, liquidity))
    }

    /// Books a burn of `liquidity`. Returns the amounts owed to the provider.
    pub fn apply_withdrawal(
        &mut self,
        liquidity: u64,
        amount_0_min: u64,
        amount_1_min: u64,
        now: i64,
    ) -> Result<(u64, u64)> {
        require!(liquidity > 0, VenueError::InsufficientLiquidityBurned);
        let (amount_0, amount_1) =
            amounts_for_burn(liquidity, self.reserve_0, self.reserve_1, self.total_liquidity)?;
        require!(amount_0 >= amount_0_min, VenueError::InsufficientAmount0);
        require!(amount_1 >= amount_1_min, VenueError::InsufficientAmount1);

        self.total_liquidity -= liquidity;
        self.update(self.reserve_0 - amount_0, self.reserve_1 - amount_1, now)?;

        Ok((amount_0, amount_1))
    }

    /// Books an exact-input swap. Returns the output owed to the trader.
    pub fn apply_swap(
        &mut self,
        amount_in: u64,
        amount_out_min: u64,
        zero_for_one: bool,
        now: i64,
    ) -> Result<u64> {
        let (reserve_in, reserve_out) = if zero_for_one {
            (self.reserve_0, self.reserve_1)
        } else {
            (self.reserve_1, self.reserve_0)
        };

        let amount_out = get_amount_out(amount_in, reserve_in, reserve_out, self.swap_fee_bps)?;
        require!(amount_out >= amount_out_min, VenueError::InsufficientOutputAmount);
        require!(amount_out < reserve_out, VenueError::InsufficientLiquidity);

        let reserve_in = reserve_in.checked_add(amount_in).ok_or(VenueError::MathOverflow)?;
        let reserve_out = reserve_out - amount_out;
        if zero_for_one {
            self.update(reserve_in, reserve_out, now)?;
        } else {
            self.update(reserve_out, reserve_in, now)?;
        }

        Ok(amount_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(reserve_0: u64, reserve_1: u64, last_update: i64) -> Pool {
        Pool {
            venue: Pubkey::default(),
            mint_0: Pubkey::default(),
            mint_1: Pubkey::default(),
            vault_0: Pubkey::default(),
            vault_1: Pubkey::default(),
            lp_mint: Pubkey::default(),
            reserve_0,
            reserve_1,
            total_liquidity: 0,
            price_0_cumulative: 0,
            price_1_cumulative: 0,
            last_update,
            swap_fee_bps: 30,
            bump: 255,
        }
    }

    #[test]
    fn test_cumulative_prices_extrapolate() {
        let pool = pool(100, 400, 1_000);
        let (p0, p1) = pool.cumulative_prices_at(1_010).unwrap();
        assert_eq!(p0, (4u128 << 64) * 10);
        assert_eq!(p1, (1u128 << 62) * 10);
    }

    #[test]
    fn test_empty_pool_does_not_accumulate() {
        let pool = pool(0, 0, 1_000);
        assert_eq!(pool.cumulative_prices_at(5_000).unwrap(), (0, 0));
    }

    #[test]
    fn test_deposit_then_withdraw() {
        let mut pool = pool(0, 0, 0);
        let (a0, a1, minted) = pool.apply_deposit(1_000_000, 4_000_000, 0, 0, 10).unwrap();
        assert_eq!((a0, a1), (1_000_000, 4_000_000));
        assert_eq!(minted, 2_000_000 - MINIMUM_LIQUIDITY);
        assert_eq!(pool.total_liquidity, 2_000_000);

        let (out_0, out_1) = pool.apply_withdrawal(minted, 1, 1, 20).unwrap();
        assert_eq!((out_0, out_1), (999_500, 3_998_000));
        assert_eq!(pool.total_liquidity, MINIMUM_LIQUIDITY);
        assert_eq!((pool.reserve_0, pool.reserve_1), (500, 2_000));
    }

    #[test]
    fn test_withdraw_minimums_enforced() {
        let mut pool = pool(0, 0, 0);
        let (_, _, minted) = pool.apply_deposit(1_000_000, 1_000_000, 0, 0, 0).unwrap();
        assert_eq!(
            pool.apply_withdrawal(minted, 1_000_000, 0, 1).unwrap_err(),
            anchor_lang::error::Error::from(VenueError::InsufficientAmount0)
        );
    }

    #[test]
    fn test_swap_enforces_minimum_output() {
        let mut pool = pool(1_000_000, 1_000_000, 0);
        assert_eq!(
            pool.apply_swap(1_000, 1_000, true, 5).unwrap_err(),
            anchor_lang::error::Error::from(VenueError::InsufficientOutputAmount)
        );

        let out = pool.apply_swap(1_000, 990, true, 5).unwrap();
        assert_eq!(out, 996);
        assert_eq!((pool.reserve_0, pool.reserve_1), (1_001_000, 999_004));
    }

    #[test]
    fn test_update_uses_previous_reserves() {
        let mut pool = pool(100, 200, 0);
        pool.update(300, 1_500, 30).unwrap();
        assert_eq!(pool.price_0_cumulative, (2u128 << 64) * 30);
        assert_eq!((pool.reserve_0, pool.reserve_1, pool.last_update), (300, 1_500, 30));

        let (p0, _) = pool.cumulative_prices_at(180).unwrap();
        assert_eq!(p0, (2u128 << 64) * 30 + (5u128 << 64) * 150);
    }
}
