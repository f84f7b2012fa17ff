use anchor_lang::prelude::*;
use cp_venue::state::{Pool, Venue};
use crate::constants::{NATIVE_SENTINEL, ORACLE_SEED, ORDER_SEED, TREASURY_SEED, RELAYER_SEED};
use crate::errors::RelayerError;
use crate::events::{OrderCreated, OrderExecuted};
use crate::state::{Order, OrderStatus, PriceOracle, Relayer, Treasury};
use crate::utils::lifecycle::reserve_native;
use crate::utils::tolerance::plan_immediate;
use crate::utils::validation::{validate_order, OrderParams};
use crate::venue::*;

#[derive(Accounts)]
pub struct CreateOrder<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(mut, seeds = [RELAYER_SEED], bump = relayer.bump)]
    pub relayer: Box<Account<'info, Relayer>>,

    #[account(
        init,
        payer = caller,
        space = Order::SIZE,
        seeds = [
            ORDER_SEED,
            relayer.key().as_ref(),
            relayer.next_order_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub order: Box<Account<'info, Order>>,

    /// Required on the oracle path, absent on the fast path
    #[account(
        init,
        payer = caller,
        space = PriceOracle::SIZE,
        seeds = [ORACLE_SEED, order.key().as_ref()],
        bump
    )]
    pub oracle: Option<Box<Account<'info, PriceOracle>>>,

    #[account(
        mut,
        seeds = [TREASURY_SEED, relayer.key().as_ref()],
        bump = relayer.treasury_bump
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    /// The order's venue and its pool for the pair; the oracle reads this pool
    pub venue: Box<Account<'info, Venue>>,
    pub oracle_pool: Box<Account<'info, Pool>>,

    /// Settlement pool and relayer holdings
    pub dispatch: VenueDispatch<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateOrder>, params: OrderParams) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let relayer_key = ctx.accounts.relayer.key();
    let order_key = ctx.accounts.order.key();

    validate_order(
        &ctx.accounts.relayer,
        &params,
        &ctx.accounts.venue.key(),
        &ctx.accounts.caller.key(),
        now,
    )?;

    let order_id = ctx.accounts.relayer.allocate_order_id()?;
    let order = &mut ctx.accounts.order;
    order.relayer = relayer_key;
    order.order_id = order_id;
    order.amounts = params.amounts;
    order.token_a = params.token_a;
    order.token_b = params.token_b;
    order.price_tolerance = params.price_tolerance;
    order.min_reserve_a = params.min_reserve_a;
    order.min_reserve_b = params.min_reserve_b;
    order.max_window_time = params.max_window_time;
    order.deadline = params.deadline;
    order.venue = params.venue;
    order.status = OrderStatus::Active;
    order.oracle = None;
    order.created_at = now;
    order.bump = ctx.bumps.order;

    let spendable = Treasury::spendable(&ctx.accounts.treasury)?;
    let native_input = ctx.accounts.order.native_input();
    reserve_native(&mut ctx.accounts.relayer, &params, native_input, spendable)?;

    let route = route_order(
        &ctx.accounts.relayer,
        &params,
        &ctx.accounts.oracle_pool.key(),
        &ctx.accounts.oracle_pool,
        &ctx.accounts.dispatch.pool.key(),
        &ctx.accounts.dispatch.pool,
    )?;
    let order = &mut ctx.accounts.order;
    order.oracle_pool = ctx.accounts.oracle_pool.key();
    order.pool = ctx.accounts.dispatch.pool.key();
    order.lp_mint = route.lp_mint;

    emit!(OrderCreated {
        order_id,
        kind: params.amounts.kind(),
    });
    msg!(
        "Order {} created: {:?} priced on {:?} venue, settles on {}",
        order_id,
        params.amounts.kind(),
        params.venue,
        order.pool
    );

    if params.takes_fast_path() {
        require!(ctx.accounts.oracle.is_none(), RelayerError::InvalidOracle);
        let call = plan_immediate(&params.amounts)?;
        ctx.accounts.dispatch.verify_relayer_vaults(&relayer_key)?;

        // Committed before the venue is called
        ctx.accounts.order.mark_executed(now)?;
        ctx.accounts.order.exit(&crate::ID)?;
        ctx.accounts.relayer.exit(&crate::ID)?;

        ctx.accounts.dispatch.execute(
            &ctx.accounts.relayer.to_account_info(),
            ctx.accounts.relayer.bump,
            &ctx.accounts.treasury,
            &call,
            route.a_is_zero,
            params.token_a == NATIVE_SENTINEL,
            params.deadline,
        )?;

        emit!(OrderExecuted { order_id });
        msg!("Order {} executed without oracle", order_id);
        return Ok(());
    }

    let oracle_bump = ctx.bumps.oracle.ok_or(RelayerError::MissingOracle)?;
    let oracle = ctx
        .accounts
        .oracle
        .as_mut()
        .ok_or(RelayerError::MissingOracle)?;
    oracle.set_inner(PriceOracle::new(
        relayer_key,
        order_key,
        ctx.accounts.order.oracle_pool,
        params.max_window_time,
        oracle_bump,
    ));
    ctx.accounts.order.oracle = Some(oracle.key());

    msg!(
        "Order {} awaiting oracle {}, {} lamports reserved",
        order_id,
        oracle.key(),
        native_input
    );

    Ok(())
}
