use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::native_mint;
use anchor_spl::token_interface::{self, Mint, SyncNative, TokenAccount, TokenInterface};
use cp_venue::program::CpVenue;
use cp_venue::state::Pool;

use crate::constants::{NATIVE_SENTINEL, RELAYER_SEED};
use crate::errors::RelayerError;
use crate::state::{settlement_venue, Relayer, Treasury};
use crate::utils::validation::OrderParams;

/// Mint a pair token trades as on the venue; native SOL trades as wrapped SOL
pub fn resolve_mint(token: &Pubkey) -> Pubkey {
    if *token == NATIVE_SENTINEL {
        native_mint::ID
    } else {
        *token
    }
}

/// Checks that `pool` lives on `venue` and trades exactly the order's pair.
/// Returns whether token A is the pool's token 0.
pub fn match_pool(pool: &Pool, venue: &Pubkey, token_a: &Pubkey, token_b: &Pubkey) -> Result<bool> {
    require_keys_eq!(pool.venue, *venue, RelayerError::InvalidPoolAddress);
    orient(pool, token_a, token_b)
}

/// Whether token A is the pool's token 0; fails if the pool trades another pair
pub fn orient(pool: &Pool, token_a: &Pubkey, token_b: &Pubkey) -> Result<bool> {
    let mint_a = resolve_mint(token_a);
    let mint_b = resolve_mint(token_b);
    if pool.mint_0 == mint_a && pool.mint_1 == mint_b {
        Ok(true)
    } else if pool.mint_0 == mint_b && pool.mint_1 == mint_a {
        Ok(false)
    } else {
        err!(RelayerError::InvalidPoolAddress)
    }
}

/// Pools resolved for a new order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderRoute {
    /// Token A is the settlement pool's token 0
    pub a_is_zero: bool,
    /// Liquidity token of the settlement pool
    pub lp_mint: Pubkey,
}

/// Resolves the pool the oracle reads (on the order's venue) and the pool the
/// order settles on (home venue for liquidity orders). Both must trade the pair;
/// a swap is priced and settled on the same pool.
pub fn route_order(
    relayer: &Relayer,
    params: &OrderParams,
    oracle_pool_key: &Pubkey,
    oracle_pool: &Pool,
    pool_key: &Pubkey,
    pool: &Pool,
) -> Result<OrderRoute> {
    match_pool(
        oracle_pool,
        &relayer.venue_key(params.venue),
        &params.token_a,
        &params.token_b,
    )?;

    let settles_on = settlement_venue(params.amounts.kind(), params.venue);
    if settles_on == params.venue {
        require_keys_eq!(*pool_key, *oracle_pool_key, RelayerError::InvalidPoolAddress);
    }
    let a_is_zero = match_pool(
        pool,
        &relayer.venue_key(settles_on),
        &params.token_a,
        &params.token_b,
    )?;

    Ok(OrderRoute {
        a_is_zero,
        lp_mint: pool.lp_mint,
    })
}

/// Pool state seen from the order's side of the pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    /// Cumulative Q64.64 price of A in B
    pub price_a_cumulative: u128,
    /// Cumulative Q64.64 price of B in A
    pub price_b_cumulative: u128,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub total_liquidity: u64,
    pub swap_fee_bps: u16,
}

impl PoolSnapshot {
    /// Reads `pool` as of `now`, extrapolating its accumulators past the last update
    pub fn capture(pool: &Pool, a_is_zero: bool, now: i64) -> Result<Self> {
        let (price_0_cumulative, price_1_cumulative) = pool.cumulative_prices_at(now)?;
        let snapshot = if a_is_zero {
            PoolSnapshot {
                price_a_cumulative: price_0_cumulative,
                price_b_cumulative: price_1_cumulative,
                reserve_a: pool.reserve_0,
                reserve_b: pool.reserve_1,
                total_liquidity: pool.total_liquidity,
                swap_fee_bps: pool.swap_fee_bps,
            }
        } else {
            PoolSnapshot {
                price_a_cumulative: price_1_cumulative,
                price_b_cumulative: price_0_cumulative,
                reserve_a: pool.reserve_1,
                reserve_b: pool.reserve_0,
                total_liquidity: pool.total_liquidity,
                swap_fee_bps: pool.swap_fee_bps,
            }
        };
        Ok(snapshot)
    }

    pub fn ensure_reserves(&self, min_reserve_a: u64, min_reserve_b: u64) -> Result<()> {
        require!(
            self.reserve_a >= min_reserve_a && self.reserve_b >= min_reserve_b,
            RelayerError::ReservesTooLow
        );
        Ok(())
    }
}

/// A venue write with its acceptance limits, expressed in the order's A/B terms
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VenueCall {
    Provide {
        amount_a_desired: u64,
        amount_b_desired: u64,
        amount_a_min: u64,
        amount_b_min: u64,
    },
    Remove {
        liquidity: u64,
        amount_a_min: u64,
        amount_b_min: u64,
    },
    /// Exact-input swap; `a_to_b` sells token A
    Swap {
        a_to_b: bool,
        amount_in: u64,
        min_out: u64,
    },
}

impl VenueCall {
    /// Amount of token A the call spends from the relayer
    pub fn spends_a(&self) -> u64 {
        match *self {
            VenueCall::Provide { amount_a_desired, .. } => amount_a_desired,
            VenueCall::Remove { .. } => 0,
            VenueCall::Swap { a_to_b, amount_in, .. } => {
                if a_to_b {
                    amount_in
                } else {
                    0
                }
            }
        }
    }
}

/// Orders an A/B pair as the pool's 0/1
fn to_pool_order<T>(a: T, b: T, a_is_zero: bool) -> (T, T) {
    if a_is_zero {
        (a, b)
    } else {
        (b, a)
    }
}

/// Venue and relayer accounts needed to read a pool and act on it
#[derive(Accounts)]
pub struct VenueDispatch<'info> {
    /// Settlement pool
    #[account(mut)]
    pub pool: Box<Account<'info, Pool>>,

    pub mint_0: Box<InterfaceAccount<'info, Mint>>,
    pub mint_1: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub pool_vault_0: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub pool_vault_1: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Relayer holdings of the pool's token 0, token 1 and liquidity token
    #[account(mut)]
    pub relayer_vault_0: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub relayer_vault_1: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub relayer_lp_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub venue_program: Program<'info, CpVenue>,
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> VenueDispatch<'info> {
    /// The user-side accounts must be the relayer's own holdings of the pool's mints
    pub fn verify_relayer_vaults(&self, relayer: &Pubkey) -> Result<()> {
        for (vault, mint) in [
            (&self.relayer_vault_0, self.pool.mint_0),
            (&self.relayer_vault_1, self.pool.mint_1),
            (&self.relayer_lp_vault, self.pool.lp_mint),
        ] {
            require_keys_eq!(vault.owner, *relayer, RelayerError::InvalidVault);
            require_keys_eq!(vault.mint, mint, RelayerError::InvalidVault);
        }
        Ok(())
    }

    /// Wraps `lamports` from the treasury into the relayer's wrapped-SOL vault for token A
    fn wrap_native(
        &self,
        treasury: &Account<'info, Treasury>,
        a_is_zero: bool,
        lamports: u64,
    ) -> Result<()> {
        let vault = if a_is_zero { &self.relayer_vault_0 } else { &self.relayer_vault_1 };
        require_keys_eq!(vault.mint, native_mint::ID, RelayerError::InvalidVault);

        Treasury::debit(treasury, &vault.to_account_info(), lamports)?;
        token_interface::sync_native(CpiContext::new(
            self.token_program.to_account_info(),
            SyncNative {
                account: vault.to_account_info(),
            },
        ))
    }

    /// Performs `call` on the venue with the relayer PDA as the trading party
    pub fn execute(
        &self,
        relayer: &AccountInfo<'info>,
        relayer_bump: u8,
        treasury: &Account<'info, Treasury>,
        call: &VenueCall,
        a_is_zero: bool,
        native_a: bool,
        deadline: i64,
    ) -> Result<()> {
        if native_a {
            let lamports = call.spends_a();
            if lamports > 0 {
                self.wrap_native(treasury, a_is_zero, lamports)?;
            }
        }

        let bump = [relayer_bump];
        let signer_seeds: &[&[&[u8]]] = &[&[RELAYER_SEED, &bump]];
        let cpi_ctx = CpiContext::new_with_signer(
            self.venue_program.to_account_info(),
            cp_venue::cpi::accounts::PoolContext {
                user: relayer.clone(),
                pool: self.pool.to_account_info(),
                mint_0: self.mint_0.to_account_info(),
                mint_1: self.mint_1.to_account_info(),
                vault_0: self.pool_vault_0.to_account_info(),
                vault_1: self.pool_vault_1.to_account_info(),
                lp_mint: self.lp_mint.to_account_info(),
                user_token_0: self.relayer_vault_0.to_account_info(),
                user_token_1: self.relayer_vault_1.to_account_info(),
                user_lp: self.relayer_lp_vault.to_account_info(),
                token_program: self.token_program.to_account_info(),
            },
            signer_seeds,
        );

        match *call {
            VenueCall::Provide { amount_a_desired, amount_b_desired, amount_a_min, amount_b_min } => {
                let (desired_0, desired_1) = to_pool_order(amount_a_desired, amount_b_desired, a_is_zero);
                let (min_0, min_1) = to_pool_order(amount_a_min, amount_b_min, a_is_zero);
                cp_venue::cpi::add_liquidity(cpi_ctx, desired_0, desired_1, min_0, min_1, deadline)
            }
            VenueCall::Remove { liquidity, amount_a_min, amount_b_min } => {
                let (min_0, min_1) = to_pool_order(amount_a_min, amount_b_min, a_is_zero);
                cp_venue::cpi::remove_liquidity(cpi_ctx, liquidity, min_0, min_1, deadline)
            }
            VenueCall::Swap { a_to_b, amount_in, min_out } => {
                cp_venue::cpi::swap_exact_input(cpi_ctx, amount_in, min_out, a_to_b == a_is_zero, deadline)
            }
        }
    }
}
