use anchor_lang::prelude::*;
use crate::constants::{NATIVE_SENTINEL, RELAYER_SEED, TREASURY_SEED};
use crate::events::OrderExecuted;
use crate::state::{Order, PriceOracle, Relayer, Treasury};
use crate::utils::lifecycle::plan_execution;
use crate::venue::*;

/// Permissionless settlement of an order whose oracle window has closed
#[derive(Accounts)]
pub struct ExecuteOrder<'info> {
    pub caller: Signer<'info>,

    #[account(mut, seeds = [RELAYER_SEED], bump = relayer.bump)]
    pub relayer: Box<Account<'info, Relayer>>,

    #[account(mut, has_one = relayer)]
    pub order: Box<Account<'info, Order>>,

    pub oracle: Box<Account<'info, PriceOracle>>,

    #[account(
        mut,
        seeds = [TREASURY_SEED, relayer.key().as_ref()],
        bump = relayer.treasury_bump
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    /// Settlement pool and relayer holdings
    pub dispatch: VenueDispatch<'info>,
}

pub fn handler(ctx: Context<ExecuteOrder>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let relayer_key = ctx.accounts.relayer.key();
    let order = &ctx.accounts.order;

    let plan = plan_execution(
        &ctx.accounts.relayer,
        order,
        &ctx.accounts.oracle.key(),
        &ctx.accounts.oracle,
        &ctx.accounts.dispatch.pool.key(),
        &ctx.accounts.dispatch.pool,
        now,
    )?;
    ctx.accounts.dispatch.verify_relayer_vaults(&relayer_key)?;

    msg!(
        "Order {} executing at twap {} (fee {} bps): {:?}",
        order.order_id,
        plan.twap.price_a,
        plan.snapshot.swap_fee_bps,
        plan.call
    );

    let order_id = order.order_id;
    let native_a = order.token_a == NATIVE_SENTINEL;
    let native_input = order.native_input();
    let deadline = order.deadline;

    // Committed before the venue is called; the reservation turns into the wrap below
    ctx.accounts.order.mark_executed(now)?;
    ctx.accounts.relayer.release_native(native_input)?;
    ctx.accounts.order.exit(&crate::ID)?;
    ctx.accounts.relayer.exit(&crate::ID)?;

    ctx.accounts.dispatch.execute(
        &ctx.accounts.relayer.to_account_info(),
        ctx.accounts.relayer.bump,
        &ctx.accounts.treasury,
        &plan.call,
        plan.a_is_zero,
        native_a,
        deadline,
    )?;

    emit!(OrderExecuted { order_id });
    msg!("Order {} executed", order_id);

    Ok(())
}
