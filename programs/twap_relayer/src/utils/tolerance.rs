use anchor_lang::prelude::*;

use crate::constants::PARTS_PER_MILLION;
use crate::errors::RelayerError;
use crate::state::{OrderAmounts, Twap};
use crate::utils::math::{
    discount_by_tolerance, geometric_mean, mul_div, reduce_by_tolerance, sqrt_q64, to_u64,
};
use crate::venue::{PoolSnapshot, VenueCall};

/// 1.0 in Q32.32, the scale of `sqrt_q64` results
const Q32: u128 = 1 << 32;

/// Deposit minimums that make the venue reject a spot price outside
/// `[twap * (1 - tol), twap * (1 + tol)]`. Returns `(amount_a_min, amount_b_min)`.
pub fn provision_limits(
    twap: &Twap,
    amount_a_desired: u64,
    amount_b_desired: u64,
    tolerance_ppm: u32,
) -> Result<(u64, u64)> {
    let amount_b_min = reduce_by_tolerance(twap.consult(true, amount_a_desired)?, tolerance_ppm)?;
    let amount_a_min = discount_by_tolerance(twap.consult(false, amount_b_desired)?, tolerance_ppm)?;
    Ok((amount_a_min, amount_b_min))
}

/// Withdrawal minimums for burning `liquidity`. With `c = liquidity * sqrt(ra * rb) / total`,
/// the pool pays `c / sqrt(p)` of A and `c * sqrt(p)` of B at price `p`, so bounding
/// `p` by the tolerance band bounds both legs. Never lower than the order's own minimums.
pub fn removal_limits(
    twap: &Twap,
    snapshot: &PoolSnapshot,
    liquidity: u64,
    amount_a_min: u64,
    amount_b_min: u64,
    tolerance_ppm: u32,
) -> Result<(u64, u64)> {
    require!(
        snapshot.total_liquidity > 0 && snapshot.reserve_a > 0 && snapshot.reserve_b > 0,
        RelayerError::ReservesTooLow
    );

    let c = mul_div(
        liquidity as u128,
        geometric_mean(snapshot.reserve_a, snapshot.reserve_b) as u128,
        snapshot.total_liquidity as u128,
    )?;

    let ppm = PARTS_PER_MILLION as u128;
    let price_high = mul_div(twap.price_a, ppm + tolerance_ppm as u128, ppm)?;
    let low_factor = ppm
        .checked_sub(tolerance_ppm as u128)
        .ok_or(RelayerError::InvalidTolerance)?;
    let price_low = mul_div(twap.price_a, low_factor, ppm)?;

    let sqrt_high = sqrt_q64(price_high);
    require!(sqrt_high > 0, RelayerError::MathOverflow);

    let a_limit = to_u64(mul_div(c, Q32, sqrt_high)?)?;
    let b_limit = to_u64(mul_div(c, sqrt_q64(price_low), Q32)?)?;

    Ok((amount_a_min.max(a_limit), amount_b_min.max(b_limit)))
}

/// Minimum acceptable output for an exact-input swap: `consult(amount) * (1 - tol)`
pub fn swap_min_out(twap: &Twap, a_to_b: bool, amount_in: u64, tolerance_ppm: u32) -> Result<u64> {
    reduce_by_tolerance(twap.consult(a_to_b, amount_in)?, tolerance_ppm)
}

/// Venue call for an oracle-gated order, bounded by the TWAP tolerance band
pub fn plan_gated(
    amounts: &OrderAmounts,
    tolerance_ppm: u32,
    twap: &Twap,
    snapshot: &PoolSnapshot,
) -> Result<VenueCall> {
    let call = match *amounts {
        OrderAmounts::Provision { amount_a_desired, amount_b_desired } => {
            let (amount_a_min, amount_b_min) =
                provision_limits(twap, amount_a_desired, amount_b_desired, tolerance_ppm)?;
            VenueCall::Provide { amount_a_desired, amount_b_desired, amount_a_min, amount_b_min }
        }
        OrderAmounts::Removal { liquidity, amount_a_min, amount_b_min } => {
            let (amount_a_min, amount_b_min) = removal_limits(
                twap,
                snapshot,
                liquidity,
                amount_a_min,
                amount_b_min,
                tolerance_ppm,
            )?;
            VenueCall::Remove { liquidity, amount_a_min, amount_b_min }
        }
        OrderAmounts::Swap { amount_in, amount_out } => {
            let a_to_b = amount_in > 0;
            let amount = if a_to_b { amount_in } else { amount_out };
            VenueCall::Swap {
                a_to_b,
                amount_in: amount,
                min_out: swap_min_out(twap, a_to_b, amount, tolerance_ppm)?,
            }
        }
    };
    Ok(call)
}

/// Venue call for the fast path: amounts as given, no reference price.
/// Swaps never take the fast path.
pub fn plan_immediate(amounts: &OrderAmounts) -> Result<VenueCall> {
    match *amounts {
        OrderAmounts::Provision { amount_a_desired, amount_b_desired } => Ok(VenueCall::Provide {
            amount_a_desired,
            amount_b_desired,
            amount_a_min: 0,
            amount_b_min: 0,
        }),
        OrderAmounts::Removal { liquidity, amount_a_min, amount_b_min } => {
            Ok(VenueCall::Remove { liquidity, amount_a_min, amount_b_min })
        }
        OrderAmounts::Swap { .. } => err!(RelayerError::MissingOracle),
    }
}
