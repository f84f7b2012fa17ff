use anchor_lang::prelude::*;
use cp_venue::state::Pool;

use crate::constants::VAULT_SEED;
use crate::errors::RelayerError;
use crate::state::{OracleCapability, Order, PriceOracle, Relayer, Twap};
use crate::utils::tolerance::plan_gated;
use crate::utils::validation::OrderParams;
use crate::venue::{match_pool, orient, PoolSnapshot, VenueCall};

/// Checks and reserves the treasury lamports a new order's native leg needs.
/// Orders settled at creation spend them right away and reserve nothing.
pub fn reserve_native(
    relayer: &mut Relayer,
    params: &OrderParams,
    native_input: u64,
    spendable: u64,
) -> Result<()> {
    if params.takes_fast_path() {
        relayer.ensure_native_available(spendable, native_input)
    } else {
        relayer.commit_native(spendable, native_input)
    }
}

/// Appends an observation of the order's oracle pool to its oracle. The
/// observation is recorded under the relayer's capability, keyed by its PDA.
pub fn refresh_observation(
    relayer_key: &Pubkey,
    order: &Order,
    oracle_key: &Pubkey,
    oracle: &mut PriceOracle,
    pool_key: &Pubkey,
    pool: &Pool,
    now: i64,
) -> Result<(u8, PoolSnapshot)> {
    order.ensure_active()?;
    order.ensure_oracle(oracle_key)?;
    require_keys_eq!(*pool_key, order.oracle_pool, RelayerError::InvalidPoolAddress);

    let a_is_zero = orient(pool, &order.token_a, &order.token_b)?;
    let snapshot = PoolSnapshot::capture(pool, a_is_zero, now)?;
    snapshot.ensure_reserves(order.min_reserve_a, order.min_reserve_b)?;

    let capability = OracleCapability::new(*relayer_key);
    let count = oracle.record_observation(&capability, &snapshot, now)?;
    Ok((count, snapshot))
}

/// Venue call an execution issues, with what it was derived from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub call: VenueCall,
    /// Token A is the settlement pool's token 0
    pub a_is_zero: bool,
    pub twap: Twap,
    pub snapshot: PoolSnapshot,
}

/// Gates an oracle-path order and derives its tolerance-bounded venue call
pub fn plan_execution(
    relayer: &Relayer,
    order: &Order,
    oracle_key: &Pubkey,
    oracle: &PriceOracle,
    pool_key: &Pubkey,
    pool: &Pool,
    now: i64,
) -> Result<ExecutionPlan> {
    order.ensure_executable(now)?;
    order.ensure_oracle(oracle_key)?;
    let twap = oracle.twap()?;

    require_keys_eq!(*pool_key, order.pool, RelayerError::InvalidPoolAddress);
    let a_is_zero = match_pool(
        pool,
        &relayer.venue_key(order.settlement_venue()),
        &order.token_a,
        &order.token_b,
    )?;
    let snapshot = PoolSnapshot::capture(pool, a_is_zero, now)?;
    let call = plan_gated(&order.amounts, order.price_tolerance, &twap, &snapshot)?;

    Ok(ExecutionPlan {
        call,
        a_is_zero,
        twap,
        snapshot,
    })
}

/// Accounts paying back one token leg of a withdrawn order
#[derive(Clone, Copy, Debug)]
pub struct RefundLeg {
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub recipient_mint: Pubkey,
    pub recipient_owner: Pubkey,
}

/// The leg for `token` must come out of the relayer's pooled vault for it and
/// land in an account of the same mint held by the owner
pub fn check_refund_leg(relayer_key: &Pubkey, owner: &Pubkey, token: &Pubkey, leg: &RefundLeg) -> Result<()> {
    let (expected_vault, _) = Pubkey::find_program_address(
        &[VAULT_SEED, relayer_key.as_ref(), token.as_ref()],
        &crate::ID,
    );
    require_keys_eq!(leg.mint, *token, RelayerError::InvalidVault);
    require_keys_eq!(leg.vault, expected_vault, RelayerError::InvalidVault);
    require_keys_eq!(leg.recipient_mint, *token, RelayerError::InvalidVault);
    require_keys_eq!(leg.recipient_owner, *owner, RelayerError::InvalidRecipient);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(relayer: &Pubkey, owner: &Pubkey, token: &Pubkey) -> RefundLeg {
        let (vault, _) = Pubkey::find_program_address(
            &[VAULT_SEED, relayer.as_ref(), token.as_ref()],
            &crate::ID,
        );
        RefundLeg {
            mint: *token,
            vault,
            recipient_mint: *token,
            recipient_owner: *owner,
        }
    }

    #[test]
    fn test_refund_goes_to_owner() {
        let (relayer, owner, token) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        assert!(check_refund_leg(&relayer, &owner, &token, &leg(&relayer, &owner, &token)).is_ok());

        let mut stranger = leg(&relayer, &owner, &token);
        stranger.recipient_owner = Pubkey::new_unique();
        assert_eq!(
            check_refund_leg(&relayer, &owner, &token, &stranger).unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::InvalidRecipient)
        );
    }

    #[test]
    fn test_refund_vault_and_mint_must_match() {
        let (relayer, owner, token) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());

        let mut other_vault = leg(&relayer, &owner, &token);
        other_vault.vault = Pubkey::new_unique();
        assert_eq!(
            check_refund_leg(&relayer, &owner, &token, &other_vault).unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::InvalidVault)
        );

        let mut other_mint = leg(&relayer, &owner, &token);
        other_mint.recipient_mint = Pubkey::new_unique();
        assert_eq!(
            check_refund_leg(&relayer, &owner, &token, &other_mint).unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::InvalidVault)
        );
    }
}
