use anchor_lang::prelude::*;
use ethnum::U256;
use integer_sqrt::IntegerSquareRoot;

use crate::errors::VenueError;

/// Liquidity locked forever by the first deposit
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Swap fees are expressed in basis points
pub const FEE_DENOMINATOR: u64 = 10_000;

/// Upper bound for a venue swap fee (10%)
pub const MAX_SWAP_FEE_BPS: u16 = 1_000;

/// Fractional bits of the Q64.64 price encoding
pub const Q64_RESOLUTION: u32 = 64;

/// Encodes `numerator / denominator` as an unsigned Q64.64 fixed-point price.
/// The numerator is a u64, so the shifted value always fits in a u128.
pub fn encode_price(numerator: u64, denominator: u64) -> Result<u128> {
    require!(denominator > 0, VenueError::InsufficientLiquidity);
    Ok(((numerator as u128) << Q64_RESOLUTION) / denominator as u128)
}

/// Given some amount of one asset and the pair reserves, returns the equivalent
/// amount of the other asset at the current reserve ratio
pub fn quote(amount_a: u64, reserve_a: u64, reserve_b: u64) -> Result<u64> {
    require!(amount_a > 0, VenueError::InsufficientInputAmount);
    require!(reserve_a > 0 && reserve_b > 0, VenueError::InsufficientLiquidity);

    let amount_b = (amount_a as u128)
        .checked_mul(reserve_b as u128)
        .ok_or(VenueError::MathOverflow)?
        / reserve_a as u128;

    u64::try_from(amount_b).map_err(|_| error!(VenueError::MathOverflow))
}

/// Constant-product output for an exact input, after the swap fee
pub fn get_amount_out(amount_in: u64, reserve_in: u64, reserve_out: u64, fee_bps: u16) -> Result<u64> {
    require!(amount_in > 0, VenueError::InsufficientInputAmount);
    require!(reserve_in > 0 && reserve_out > 0, VenueError::InsufficientLiquidity);

    let amount_in_with_fee = (amount_in as u128)
        .checked_mul((FEE_DENOMINATOR - fee_bps as u64) as u128)
        .ok_or(VenueError::MathOverflow)?;
    let numerator = U256::from(amount_in_with_fee) * U256::from(reserve_out as u128);
    let denominator = U256::from(reserve_in as u128) * U256::from(FEE_DENOMINATOR as u128)
        + U256::from(amount_in_with_fee);

    let amount_out = numerator / denominator;
    require!(amount_out <= U256::from(u64::MAX as u128), VenueError::MathOverflow);
    Ok(amount_out.as_u64())
}

/// Picks the deposit amounts that keep the pool ratio, never exceeding the desired
/// amounts and rejecting when the ratio pushes either side below its minimum
pub fn optimal_deposit(
    amount_0_desired: u64,
    amount_1_desired: u64,
    amount_0_min: u64,
    amount_1_min: u64,
    reserve_0: u64,
    reserve_1: u64,
) -> Result<(u64, u64)> {
    if reserve_0 == 0 && reserve_1 == 0 {
        return Ok((amount_0_desired, amount_1_desired));
    }

    let amount_1_optimal = quote(amount_0_desired, reserve_0, reserve_1)?;
    if amount_1_optimal <= amount_1_desired {
        require!(amount_1_optimal >= amount_1_min, VenueError::InsufficientAmount1);
        return Ok((amount_0_desired, amount_1_optimal));
    }

    let amount_0_optimal = quote(amount_1_desired, reserve_1, reserve_0)?;
    require!(amount_0_optimal <= amount_0_desired, VenueError::MathOverflow);
    require!(amount_0_optimal >= amount_0_min, VenueError::InsufficientAmount0);
    Ok((amount_0_optimal, amount_1_desired))
}

/// Liquidity minted for a deposit. `total_liquidity` includes the locked minimum,
/// so the first depositor receives `sqrt(amount_0 * amount_1) - MINIMUM_LIQUIDITY`.
pub fn liquidity_to_mint(
    amount_0: u64,
    amount_1: u64,
    reserve_0: u64,
    reserve_1: u64,
    total_liquidity: u64,
) -> Result<u64> {
    let liquidity = if total_liquidity == 0 {
        let root = ((amount_0 as u128) * (amount_1 as u128)).integer_sqrt() as u64;
        root.saturating_sub(MINIMUM_LIQUIDITY)
    } else {
        require!(reserve_0 > 0 && reserve_1 > 0, VenueError::InsufficientLiquidity);
        let by_0 = (amount_0 as u128) * (total_liquidity as u128) / reserve_0 as u128;
        let by_1 = (amount_1 as u128) * (total_liquidity as u128) / reserve_1 as u128;
        u64::try_from(by_0.min(by_1)).map_err(|_| error!(VenueError::MathOverflow))?
    };

    require!(liquidity > 0, VenueError::InsufficientLiquidityMinted);
    Ok(liquidity)
}

/// Pro-rata amounts released by burning `liquidity`
pub fn amounts_for_burn(
    liquidity: u64,
    reserve_0: u64,
    reserve_1: u64,
    total_liquidity: u64,
) -> Result<(u64, u64)> {
    require!(
        total_liquidity > 0 && liquidity <= total_liquidity,
        VenueError::InsufficientLiquidity
    );

    let amount_0 = (liquidity as u128) * (reserve_0 as u128) / total_liquidity as u128;
    let amount_1 = (liquidity as u128) * (reserve_1 as u128) / total_liquidity as u128;
    require!(amount_0 > 0 && amount_1 > 0, VenueError::InsufficientLiquidityBurned);

    // Both are bounded by the reserves
    Ok((amount_0 as u64, amount_1 as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: u64 = 1_000_000_000;

    #[test]
    fn test_encode_price() {
        assert_eq!(encode_price(4, 1).unwrap(), 4u128 << 64);
        assert_eq!(encode_price(1, 2).unwrap(), 1u128 << 63);
        assert!(encode_price(1, 0).is_err());
    }

    #[test]
    fn test_get_amount_out_matches_constant_product() {
        // 2 in against 800/800 at 30 bps
        let out = get_amount_out(2 * ONE, 800 * ONE, 800 * ONE, 30).unwrap();
        let expected = (2 * ONE as u128 * 9_970 * 800 * ONE as u128)
            / (800 * ONE as u128 * 10_000 + 2 * ONE as u128 * 9_970);
        assert_eq!(out as u128, expected);
        assert!(out < 2 * ONE);
    }

    #[test]
    fn test_get_amount_out_rejects_empty_pool() {
        assert!(get_amount_out(ONE, 0, ONE, 30).is_err());
        assert!(get_amount_out(0, ONE, ONE, 30).is_err());
    }

    #[test]
    fn test_optimal_deposit_initial_takes_desired() {
        assert_eq!(optimal_deposit(10, 40, 0, 0, 0, 0).unwrap(), (10, 40));
    }

    #[test]
    fn test_optimal_deposit_clamps_to_ratio() {
        // Pool at 1:4, depositing 10 A and 36 B uses 9 A
        let (a, b) = optimal_deposit(10 * ONE, 36 * ONE, 0, 0, 100 * ONE, 400 * ONE).unwrap();
        assert_eq!((a, b), (9 * ONE, 36 * ONE));

        // Minimum on the clamped side trips
        let err = optimal_deposit(10 * ONE, 36 * ONE, 9 * ONE + 1, 0, 100 * ONE, 400 * ONE);
        assert_eq!(err.unwrap_err(), anchor_lang::error::Error::from(VenueError::InsufficientAmount0));

        let err = optimal_deposit(10 * ONE, 40 * ONE, 0, 40 * ONE + 1, 100 * ONE, 400 * ONE);
        assert_eq!(err.unwrap_err(), anchor_lang::error::Error::from(VenueError::InsufficientAmount1));
    }

    #[test]
    fn test_liquidity_first_deposit_locks_minimum() {
        let minted = liquidity_to_mint(ONE, 4 * ONE, 0, 0, 0).unwrap();
        assert_eq!(minted, 2 * ONE - MINIMUM_LIQUIDITY);
    }

    #[test]
    fn test_liquidity_subsequent_deposit_is_pro_rata() {
        let minted = liquidity_to_mint(9 * ONE, 36 * ONE, 100 * ONE, 400 * ONE, 200 * ONE).unwrap();
        assert_eq!(minted, 18 * ONE);
    }

    #[test]
    fn test_amounts_for_burn() {
        let (a, b) = amounts_for_burn(2 * ONE, 2 * ONE, 8 * ONE, 4 * ONE).unwrap();
        assert_eq!((a, b), (ONE, 4 * ONE));
        assert!(amounts_for_burn(5, 2, 8, 4).is_err());
    }
}
