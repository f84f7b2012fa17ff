use anchor_lang::prelude::*;
use cp_venue::state::Pool;
use crate::constants::{RELAYER_SEED, TREASURY_SEED};
use crate::events::OracleRefreshed;
use crate::state::{Order, PriceOracle, Relayer, Treasury};
use crate::utils::lifecycle::refresh_observation;

/// Open to any caller; the relayer records the observation on their behalf and pays a bounty
#[derive(Accounts)]
pub struct RefreshOracle<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(seeds = [RELAYER_SEED], bump = relayer.bump)]
    pub relayer: Account<'info, Relayer>,

    #[account(has_one = relayer)]
    pub order: Account<'info, Order>,

    #[account(mut)]
    pub oracle: Account<'info, PriceOracle>,

    /// The order's oracle pool
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [TREASURY_SEED, relayer.key().as_ref()],
        bump = relayer.treasury_bump
    )]
    pub treasury: Account<'info, Treasury>,
}

pub fn handler(ctx: Context<RefreshOracle>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let order = &ctx.accounts.order;

    let oracle_key = ctx.accounts.oracle.key();
    let (observation_count, snapshot) = refresh_observation(
        &ctx.accounts.relayer.key(),
        order,
        &oracle_key,
        &mut ctx.accounts.oracle,
        &ctx.accounts.pool.key(),
        &ctx.accounts.pool,
        now,
    )?;

    // The payout never blocks the observation: it shrinks to the lamports no order has reserved
    let bounty = ctx
        .accounts
        .relayer
        .refresh_bounty(Treasury::spendable(&ctx.accounts.treasury)?)?;
    Treasury::debit(
        &ctx.accounts.treasury,
        &ctx.accounts.caller.to_account_info(),
        bounty,
    )?;

    emit!(OracleRefreshed {
        order_id: order.order_id,
        observation_count,
        caller: ctx.accounts.caller.key(),
        bounty,
    });

    msg!(
        "Order {} oracle observation {} recorded (reserves {} / {}), bounty {}",
        order.order_id,
        observation_count,
        snapshot.reserve_a,
        snapshot.reserve_b,
        bounty
    );

    Ok(())
}
