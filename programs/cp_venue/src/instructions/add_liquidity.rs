use anchor_lang::prelude::*;
use crate::events::LiquidityAdded;
use crate::instructions::pool::{check_deadline, PoolContext};

pub fn handler(
    ctx: Context<PoolContext>,
    amount_0_desired: u64,
    amount_1_desired: u64,
    amount_0_min: u64,
    amount_1_min: u64,
    deadline: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    check_deadline(deadline, now)?;

    let (amount_0, amount_1, liquidity) = ctx.accounts.pool.apply_deposit(
        amount_0_desired,
        amount_1_desired,
        amount_0_min,
        amount_1_min,
        now,
    )?;

    ctx.accounts.pay_in(true, amount_0)?;
    ctx.accounts.pay_in(false, amount_1)?;
    ctx.accounts.mint_liquidity(liquidity)?;

    emit!(LiquidityAdded {
        pool: ctx.accounts.pool.key(),
        provider: ctx.accounts.user.key(),
        amount_0,
        amount_1,
        liquidity,
    });

    msg!("Added {} / {} for {} liquidity", amount_0, amount_1, liquidity);

    Ok(())
}
