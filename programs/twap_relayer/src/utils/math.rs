use anchor_lang::prelude::*;
use ethnum::U256;
use integer_sqrt::IntegerSquareRoot;

use crate::constants::PARTS_PER_MILLION;
use crate::errors::RelayerError;

/// floor(a * b / denominator) with a 256-bit intermediate
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator > 0, RelayerError::MathOverflow);
    let result = U256::from(a) * U256::from(b) / U256::from(denominator);
    require!(result <= U256::from(u128::MAX), RelayerError::MathOverflow);
    Ok(result.as_u128())
}

/// Narrows to u64 or fails with `MathOverflow`
pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(RelayerError::MathOverflow))
}

/// `amount * price` for a Q64.64 price
pub fn mul_q64(amount: u64, price: u128) -> Result<u64> {
    let result: U256 = (U256::from(amount as u128) * U256::from(price)) >> 64u32;
    require!(result <= U256::from(u64::MAX as u128), RelayerError::MathOverflow);
    Ok(result.as_u64())
}

/// `amount * (1 - tolerance)`
pub fn reduce_by_tolerance(amount: u64, tolerance_ppm: u32) -> Result<u64> {
    let factor = PARTS_PER_MILLION
        .checked_sub(tolerance_ppm as u64)
        .ok_or(RelayerError::InvalidTolerance)?;
    to_u64(mul_div(amount as u128, factor as u128, PARTS_PER_MILLION as u128)?)
}

/// `amount / (1 + tolerance)`
pub fn discount_by_tolerance(amount: u64, tolerance_ppm: u32) -> Result<u64> {
    let factor = PARTS_PER_MILLION + tolerance_ppm as u64;
    to_u64(mul_div(amount as u128, PARTS_PER_MILLION as u128, factor as u128)?)
}

/// Square root of a Q64.64 value, as Q32.32
pub fn sqrt_q64(value: u128) -> u128 {
    value.integer_sqrt()
}

/// Geometric mean of the reserves, `sqrt(reserve_a * reserve_b)`
pub fn geometric_mean(reserve_a: u64, reserve_b: u64) -> u64 {
    // Product of two u64 fits in u128 and its root fits in u64
    ((reserve_a as u128) * (reserve_b as u128)).integer_sqrt() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q64: u128 = 1 << 64;

    #[test]
    fn test_mul_div_wide_intermediate() {
        assert_eq!(mul_div(u128::MAX, 2, 4).unwrap(), u128::MAX / 2);
        assert!(mul_div(u128::MAX, 2, 1).is_err());
        assert!(mul_div(1, 1, 0).is_err());
    }

    #[test]
    fn test_mul_q64() {
        assert_eq!(mul_q64(1_000, Q64).unwrap(), 1_000);
        assert_eq!(mul_q64(1_000, Q64 / 4).unwrap(), 250);
        assert!(mul_q64(u64::MAX, 2 * Q64).is_err());
    }

    #[test]
    fn test_tolerance_scaling() {
        // 1% is 10_000 ppm
        assert_eq!(reduce_by_tolerance(1_000_000, 10_000).unwrap(), 990_000);
        assert_eq!(discount_by_tolerance(1_010_000, 10_000).unwrap(), 1_000_000);
        assert_eq!(reduce_by_tolerance(123, 0).unwrap(), 123);
    }

    #[test]
    fn test_roots() {
        assert_eq!(sqrt_q64(4 * Q64), 2 << 32);
        assert_eq!(geometric_mean(800, 200), 400);
    }
}
