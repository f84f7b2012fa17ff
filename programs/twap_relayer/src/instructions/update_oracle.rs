use anchor_lang::prelude::*;
use cp_venue::state::Pool;
use crate::errors::RelayerError;
use crate::state::{OracleCapability, Order, PriceOracle};
use crate::venue::{orient, PoolSnapshot};

/// Direct access to the oracle primitive. The capability is derived from the
/// signer, so only the oracle's owner could pass; external parties are rejected.
#[derive(Accounts)]
pub struct UpdateOracle<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        has_one = order @ RelayerError::InvalidOracle,
        has_one = pool @ RelayerError::InvalidPoolAddress
    )]
    pub oracle: Account<'info, PriceOracle>,

    pub order: Account<'info, Order>,

    pub pool: Account<'info, Pool>,
}

pub fn handler(ctx: Context<UpdateOracle>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let order = &ctx.accounts.order;

    let capability = OracleCapability::new(ctx.accounts.authority.key());
    ctx.accounts.oracle.authorize(&capability)?;

    let a_is_zero = orient(&ctx.accounts.pool, &order.token_a, &order.token_b)?;
    let snapshot = PoolSnapshot::capture(&ctx.accounts.pool, a_is_zero, now)?;

    let count = ctx
        .accounts
        .oracle
        .record_observation(&capability, &snapshot, now)?;

    msg!("Oracle {} observation {} recorded", ctx.accounts.oracle.key(), count);

    Ok(())
}
