use anchor_lang::prelude::*;

use crate::errors::RelayerError;
use crate::utils::math::mul_q64;
use crate::venue::PoolSnapshot;

/// Observations needed to derive a TWAP
pub const OBSERVATION_LIMIT: u8 = 2;

/// One capture of a pool's cumulative prices and reserves
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Observation {
    pub timestamp: i64,
    pub price_a_cumulative: u128,
    pub price_b_cumulative: u128,
    pub reserve_a: u64,
    pub reserve_b: u64,
}

impl Observation {
    pub const SIZE: usize = 8 + 16 + 16 + 8 + 8;
}

/// Proof of acting for the oracle's owner. Only the registry can produce one
/// that matches, since the owner is its program-derived address.
#[derive(Clone, Copy, Debug)]
pub struct OracleCapability {
    holder: Pubkey,
}

impl OracleCapability {
    pub fn new(holder: Pubkey) -> Self {
        Self { holder }
    }
}

/// Average Q64.64 prices over the observed window.
/// `price_a` is token A quoted in token B; `price_b` the converse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Twap {
    pub price_a: u128,
    pub price_b: u128,
}

impl Twap {
    /// Converts `amount` of one side of the pair into the other at the average price
    pub fn consult(&self, from_a: bool, amount: u64) -> Result<u64> {
        let price = if from_a { self.price_a } else { self.price_b };
        mul_q64(amount, price)
    }
}

/// Two-slot cumulative price accumulator tied to one order
#[account]
pub struct PriceOracle {
    /// Only this key may append observations (the relayer PDA)
    pub owner: Pubkey,

    pub order: Pubkey,

    /// Pool observed
    pub pool: Pubkey,

    /// Minimum spacing between the two observations
    pub window: i64,

    pub observations: [Observation; 2],

    pub observation_count: u8,

    pub bump: u8,
}

impl PriceOracle {
    pub const SIZE: usize = 8 + 32 + 32 + 32 + 8 + Observation::SIZE * 2 + 1 + 1;

    pub fn new(owner: Pubkey, order: Pubkey, pool: Pubkey, window: i64, bump: u8) -> Self {
        Self {
            owner,
            order,
            pool,
            window,
            observations: [Observation::default(); 2],
            observation_count: 0,
            bump,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.observation_count == OBSERVATION_LIMIT
    }

    /// Checks capability identity, not caller identity
    pub fn authorize(&self, capability: &OracleCapability) -> Result<()> {
        require_keys_eq!(capability.holder, self.owner, RelayerError::Unauthorized);
        Ok(())
    }

    /// Appends an observation of `snapshot` taken at `now`
    pub fn record_observation(
        &mut self,
        capability: &OracleCapability,
        snapshot: &PoolSnapshot,
        now: i64,
    ) -> Result<u8> {
        self.authorize(capability)?;
        require!(
            self.observation_count < OBSERVATION_LIMIT,
            RelayerError::ObservationWindowClosed
        );

        if self.observation_count == 1 {
            let elapsed = now
                .checked_sub(self.observations[0].timestamp)
                .ok_or(RelayerError::MathOverflow)?;
            require!(elapsed >= self.window, RelayerError::RefreshPeriodNotElapsed);
        }

        self.observations[self.observation_count as usize] = Observation {
            timestamp: now,
            price_a_cumulative: snapshot.price_a_cumulative,
            price_b_cumulative: snapshot.price_b_cumulative,
            reserve_a: snapshot.reserve_a,
            reserve_b: snapshot.reserve_b,
        };
        self.observation_count += 1;

        Ok(self.observation_count)
    }

    /// Average prices between the two observations
    pub fn twap(&self) -> Result<Twap> {
        require!(self.is_finalized(), RelayerError::ObservationWindowRunning);

        let [first, second] = &self.observations;
        let elapsed = second
            .timestamp
            .checked_sub(first.timestamp)
            .ok_or(RelayerError::MathOverflow)?;
        require!(elapsed > 0, RelayerError::ZeroElapsedTime);

        // Accumulators wrap; the difference is still exact
        let elapsed = elapsed as u128;
        Ok(Twap {
            price_a: second.price_a_cumulative.wrapping_sub(first.price_a_cumulative) / elapsed,
            price_b: second.price_b_cumulative.wrapping_sub(first.price_b_cumulative) / elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q64: u128 = 1 << 64;

    fn oracle(owner: Pubkey) -> PriceOracle {
        PriceOracle::new(owner, Pubkey::new_unique(), Pubkey::new_unique(), 300, 255)
    }

    fn snapshot(price_a_cumulative: u128, price_b_cumulative: u128) -> PoolSnapshot {
        PoolSnapshot {
            price_a_cumulative,
            price_b_cumulative,
            reserve_a: 800,
            reserve_b: 800,
            total_liquidity: 800,
            swap_fee_bps: 30,
        }
    }

    #[test]
    fn test_foreign_capability_rejected() {
        let owner = Pubkey::new_unique();
        let mut oracle = oracle(owner);
        let res = oracle.record_observation(
            &OracleCapability::new(Pubkey::new_unique()),
            &snapshot(0, 0),
            1_000,
        );
        assert_eq!(
            res.unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::Unauthorized)
        );
        assert_eq!(oracle.observation_count, 0);
    }

    #[test]
    fn test_spacing_and_cap() {
        let owner = Pubkey::new_unique();
        let cap = OracleCapability::new(owner);
        let mut oracle = oracle(owner);

        assert_eq!(oracle.record_observation(&cap, &snapshot(0, 0), 1_000).unwrap(), 1);
        assert_eq!(
            oracle.record_observation(&cap, &snapshot(0, 0), 1_299).unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::RefreshPeriodNotElapsed)
        );
        assert_eq!(oracle.record_observation(&cap, &snapshot(0, 0), 1_300).unwrap(), 2);
        assert_eq!(
            oracle.record_observation(&cap, &snapshot(0, 0), 1_000_000).unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::ObservationWindowClosed)
        );
    }

    #[test]
    fn test_twap_requires_two_observations() {
        let owner = Pubkey::new_unique();
        let cap = OracleCapability::new(owner);
        let mut oracle = oracle(owner);
        assert_eq!(
            oracle.twap().unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::ObservationWindowRunning)
        );
        oracle.record_observation(&cap, &snapshot(0, 0), 10).unwrap();
        assert_eq!(
            oracle.twap().unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::ObservationWindowRunning)
        );
    }

    #[test]
    fn test_twap_across_wrapped_accumulator() {
        let owner = Pubkey::new_unique();
        let cap = OracleCapability::new(owner);
        let mut oracle = oracle(owner);

        // Price A = 2 B over 300s, starting just below the wrap point
        let start = u128::MAX - Q64;
        let end = start.wrapping_add(2 * Q64 * 300);
        oracle.record_observation(&cap, &snapshot(start, 0), 100).unwrap();
        oracle.record_observation(&cap, &snapshot(end, Q64 / 2 * 300), 400).unwrap();

        let twap = oracle.twap().unwrap();
        assert_eq!(twap.price_a, 2 * Q64);
        assert_eq!(twap.price_b, Q64 / 2);
        assert_eq!(twap.consult(true, 1_000).unwrap(), 2_000);
        assert_eq!(twap.consult(false, 1_000).unwrap(), 500);
    }

    #[test]
    fn test_zero_window_rejected_at_twap() {
        let owner = Pubkey::new_unique();
        let cap = OracleCapability::new(owner);
        let mut oracle = PriceOracle::new(owner, Pubkey::new_unique(), Pubkey::new_unique(), 0, 255);
        oracle.record_observation(&cap, &snapshot(0, 0), 50).unwrap();
        oracle.record_observation(&cap, &snapshot(0, 0), 50).unwrap();
        assert_eq!(
            oracle.twap().unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::ZeroElapsedTime)
        );
    }
}
