use anchor_lang::prelude::*;

use crate::constants::MAX_PRICE_TOLERANCE;
use crate::errors::RelayerError;
use crate::state::{OrderAmounts, OrderKind, Relayer, VenueKind};

/// Caller-supplied order parameters
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OrderParams {
    pub amounts: OrderAmounts,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub price_tolerance: u32,
    pub min_reserve_a: u64,
    pub min_reserve_b: u64,
    pub max_window_time: i64,
    pub deadline: i64,
    pub venue: VenueKind,
}

impl OrderParams {
    /// Liquidity orders without a reserve floor execute immediately
    pub fn takes_fast_path(&self) -> bool {
        self.amounts.kind() != OrderKind::Swap
            && self.min_reserve_a == 0
            && self.min_reserve_b == 0
    }
}

/// Kind-specific amount rules
pub fn validate_amounts(amounts: &OrderAmounts) -> Result<()> {
    match *amounts {
        OrderAmounts::Provision { amount_a_desired, amount_b_desired } => {
            require!(
                amount_a_desired > 0 && amount_b_desired > 0,
                RelayerError::InvalidTokenAmount
            );
        }
        OrderAmounts::Removal { liquidity, amount_a_min, amount_b_min } => {
            require!(
                liquidity > 0 && amount_a_min > 0 && amount_b_min > 0,
                RelayerError::InvalidLiquidityAmount
            );
        }
        OrderAmounts::Swap { amount_in, amount_out } => {
            require!(
                (amount_in == 0) != (amount_out == 0),
                RelayerError::InvalidTokenAmount
            );
        }
    }
    Ok(())
}

/// Checks a creation request. The order of checks fixes which reason a
/// request violating several rules is rejected with.
pub fn validate_order(
    relayer: &Relayer,
    params: &OrderParams,
    venue: &Pubkey,
    caller: &Pubkey,
    now: i64,
) -> Result<()> {
    require_keys_eq!(*venue, relayer.venue_key(params.venue), RelayerError::UnknownVenue);
    relayer.ensure_owner(caller)?;
    require_keys_neq!(params.token_a, params.token_b, RelayerError::InvalidPair);
    require!(params.token_a < params.token_b, RelayerError::WrongTokenOrder);
    validate_amounts(&params.amounts)?;
    require!(
        params.price_tolerance <= MAX_PRICE_TOLERANCE,
        RelayerError::InvalidTolerance
    );
    require!(params.deadline > now, RelayerError::DeadlineReached);
    if !params.takes_fast_path() {
        require!(params.max_window_time > 0, RelayerError::InvalidWindow);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BountyPolicy;

    const NOW: i64 = 1_000;

    fn relayer() -> Relayer {
        Relayer {
            owner: Pubkey::new_unique(),
            home_venue: Pubkey::new_unique(),
            reference_venue: Pubkey::new_unique(),
            bounty_policy: BountyPolicy::Fixed { lamports: 0 },
            next_order_id: 0,
            committed_native: 0,
            bump: 255,
            treasury_bump: 255,
        }
    }

    fn swap_params() -> OrderParams {
        OrderParams {
            amounts: OrderAmounts::Swap { amount_in: 2_000, amount_out: 0 },
            token_a: Pubkey::new_from_array([1u8; 32]),
            token_b: Pubkey::new_from_array([2u8; 32]),
            price_tolerance: 10_000,
            min_reserve_a: 2_000,
            min_reserve_b: 2_000,
            max_window_time: 300,
            deadline: NOW + 3_600,
            venue: VenueKind::Home,
        }
    }

    fn check(relayer: &Relayer, params: &OrderParams) -> Result<()> {
        validate_order(relayer, params, &relayer.home_venue, &relayer.owner, NOW)
    }

    fn assert_rejects(res: Result<()>, error: RelayerError) {
        assert_eq!(res.unwrap_err(), anchor_lang::error::Error::from(error));
    }

    #[test]
    fn test_valid_swap_accepted() {
        let relayer = relayer();
        assert!(check(&relayer, &swap_params()).is_ok());
    }

    #[test]
    fn test_unknown_venue_checked_before_owner() {
        let relayer = relayer();
        let res = validate_order(
            &relayer,
            &swap_params(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            NOW,
        );
        assert_rejects(res, RelayerError::UnknownVenue);

        // Reference venue key under the home kind is still unknown
        let res = validate_order(&relayer, &swap_params(), &relayer.reference_venue, &relayer.owner, NOW);
        assert_rejects(res, RelayerError::UnknownVenue);
    }

    #[test]
    fn test_non_owner_rejected() {
        let relayer = relayer();
        let res = validate_order(
            &relayer,
            &swap_params(),
            &relayer.home_venue,
            &Pubkey::new_unique(),
            NOW,
        );
        assert_rejects(res, RelayerError::Unauthorized);
    }

    #[test]
    fn test_pair_rules() {
        let relayer = relayer();
        let mut params = swap_params();
        params.token_b = params.token_a;
        assert_rejects(check(&relayer, &params), RelayerError::InvalidPair);

        let mut params = swap_params();
        std::mem::swap(&mut params.token_a, &mut params.token_b);
        assert_rejects(check(&relayer, &params), RelayerError::WrongTokenOrder);
    }

    #[test]
    fn test_amount_rules() {
        let relayer = relayer();
        let mut params = swap_params();

        params.amounts = OrderAmounts::Swap { amount_in: 1, amount_out: 1 };
        assert_rejects(check(&relayer, &params), RelayerError::InvalidTokenAmount);
        params.amounts = OrderAmounts::Swap { amount_in: 0, amount_out: 0 };
        assert_rejects(check(&relayer, &params), RelayerError::InvalidTokenAmount);

        params.amounts = OrderAmounts::Provision { amount_a_desired: 0, amount_b_desired: 5 };
        assert_rejects(check(&relayer, &params), RelayerError::InvalidTokenAmount);

        params.amounts = OrderAmounts::Removal { liquidity: 0, amount_a_min: 1, amount_b_min: 1 };
        assert_rejects(check(&relayer, &params), RelayerError::InvalidLiquidityAmount);
        params.amounts = OrderAmounts::Removal { liquidity: 5, amount_a_min: 0, amount_b_min: 1 };
        assert_rejects(check(&relayer, &params), RelayerError::InvalidLiquidityAmount);
        params.amounts = OrderAmounts::Removal { liquidity: 5, amount_a_min: 1, amount_b_min: 0 };
        assert_rejects(check(&relayer, &params), RelayerError::InvalidLiquidityAmount);
    }

    #[test]
    fn test_tolerance_and_deadline() {
        let relayer = relayer();
        let mut params = swap_params();
        params.price_tolerance = 1_000_000_000;
        assert_rejects(check(&relayer, &params), RelayerError::InvalidTolerance);
        params.price_tolerance = MAX_PRICE_TOLERANCE;
        assert!(check(&relayer, &params).is_ok());

        params.deadline = NOW;
        assert_rejects(check(&relayer, &params), RelayerError::DeadlineReached);
    }

    #[test]
    fn test_window_required_only_on_oracle_path() {
        let relayer = relayer();
        let mut params = swap_params();
        params.max_window_time = 0;
        assert_rejects(check(&relayer, &params), RelayerError::InvalidWindow);

        params.amounts = OrderAmounts::Provision { amount_a_desired: 5, amount_b_desired: 5 };
        params.min_reserve_a = 0;
        params.min_reserve_b = 0;
        assert!(params.takes_fast_path());
        assert!(check(&relayer, &params).is_ok());
    }

    #[test]
    fn test_swaps_never_take_fast_path() {
        let mut params = swap_params();
        params.min_reserve_a = 0;
        params.min_reserve_b = 0;
        assert!(!params.takes_fast_path());
    }
}
