use anchor_lang::prelude::*;

use crate::constants::NATIVE_SENTINEL;
use crate::errors::RelayerError;
use crate::state::VenueKind;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderKind {
    Provision,
    Removal,
    Swap,
}

/// Kind-specific amounts. For swaps exactly one of `amount_in` / `amount_out`
/// is nonzero: `amount_in` sells token A, `amount_out` sells token B.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderAmounts {
    Provision { amount_a_desired: u64, amount_b_desired: u64 },
    Removal { liquidity: u64, amount_a_min: u64, amount_b_min: u64 },
    Swap { amount_in: u64, amount_out: u64 },
}

impl OrderAmounts {
    pub const SIZE: usize = 1 + 8 * 3;

    pub fn kind(&self) -> OrderKind {
        match self {
            OrderAmounts::Provision { .. } => OrderKind::Provision,
            OrderAmounts::Removal { .. } => OrderKind::Removal,
            OrderAmounts::Swap { .. } => OrderKind::Swap,
        }
    }
}

/// Venue an order settles on. Liquidity always moves on the home venue; the
/// order's venue only supplies the price. Swaps trade where they are priced.
pub fn settlement_venue(kind: OrderKind, venue: VenueKind) -> VenueKind {
    match kind {
        OrderKind::Provision | OrderKind::Removal => VenueKind::Home,
        OrderKind::Swap => venue,
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Active,
    Executed,
    Withdrawn,
}

/// A queued venue operation held by the relayer until executed or withdrawn
#[account]
pub struct Order {
    pub relayer: Pubkey,

    /// Sequential id assigned at creation
    pub order_id: u64,

    pub amounts: OrderAmounts,

    /// Canonically ordered pair, `token_a < token_b`. Either may be the native sentinel.
    pub token_a: Pubkey,
    pub token_b: Pubkey,

    /// Accepted deviation from the TWAP, in parts per million
    pub price_tolerance: u32,

    /// Reserve floor the pool must hold for a refresh to be accepted
    pub min_reserve_a: u64,
    pub min_reserve_b: u64,

    /// Minimum spacing (seconds) between the two oracle observations
    pub max_window_time: i64,

    /// Last instant at which the order may execute
    pub deadline: i64,

    /// Venue the oracle observes
    pub venue: VenueKind,

    /// Pool on the order's venue, read by the oracle
    pub oracle_pool: Pubkey,

    /// Pool the order settles on
    pub pool: Pubkey,

    /// Liquidity token of the settlement pool
    pub lp_mint: Pubkey,

    pub status: OrderStatus,

    /// Present only for orders taking the oracle path
    pub oracle: Option<Pubkey>,

    pub created_at: i64,

    pub bump: u8,
}

impl Order {
    pub const SIZE: usize = 8
        + 32
        + 8
        + OrderAmounts::SIZE
        + 32
        + 32
        + 4
        + 8
        + 8
        + 8
        + 8
        + 1
        + 32
        + 32
        + 32
        + 1
        + (1 + 32)
        + 8
        + 1;

    pub fn kind(&self) -> OrderKind {
        self.amounts.kind()
    }

    pub fn settlement_venue(&self) -> VenueKind {
        settlement_venue(self.kind(), self.venue)
    }

    /// `oracle` must be the oracle registered for this order
    pub fn ensure_oracle(&self, oracle: &Pubkey) -> Result<()> {
        let expected = self.oracle.ok_or(RelayerError::MissingOracle)?;
        require_keys_eq!(*oracle, expected, RelayerError::InvalidOracle);
        Ok(())
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(self.status == OrderStatus::Active, RelayerError::OrderNotActive);
        Ok(())
    }

    /// Active and not past its deadline
    pub fn ensure_executable(&self, now: i64) -> Result<()> {
        self.ensure_active()?;
        require!(now <= self.deadline, RelayerError::DeadlineReached);
        Ok(())
    }

    pub fn mark_executed(&mut self, now: i64) -> Result<()> {
        self.ensure_executable(now)?;
        self.status = OrderStatus::Executed;
        Ok(())
    }

    /// Active and strictly past its deadline
    pub fn mark_withdrawn(&mut self, now: i64) -> Result<()> {
        self.ensure_active()?;
        require!(now > self.deadline, RelayerError::DeadlineNotReached);
        self.status = OrderStatus::Withdrawn;
        Ok(())
    }

    /// Inputs the relayer must spend to execute this order, as `(token, amount)`.
    /// These are what a withdrawal hands back.
    pub fn escrowed_inputs(&self) -> Vec<(Pubkey, u64)> {
        match self.amounts {
            OrderAmounts::Provision { amount_a_desired, amount_b_desired } => vec![
                (self.token_a, amount_a_desired),
                (self.token_b, amount_b_desired),
            ],
            OrderAmounts::Removal { liquidity, .. } => vec![(self.lp_mint, liquidity)],
            OrderAmounts::Swap { amount_in, amount_out } => {
                if amount_in > 0 {
                    vec![(self.token_a, amount_in)]
                } else {
                    vec![(self.token_b, amount_out)]
                }
            }
        }
    }

    /// Lamports the order spends from the treasury on its native leg
    pub fn native_input(&self) -> u64 {
        self.escrowed_inputs()
            .iter()
            .filter(|(token, _)| *token == NATIVE_SENTINEL)
            .map(|(_, amount)| *amount)
            .sum()
    }
}
