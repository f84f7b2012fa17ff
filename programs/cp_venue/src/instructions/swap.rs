use anchor_lang::prelude::*;
use crate::events::Swapped;
use crate::instructions::pool::{check_deadline, PoolContext};

pub fn handler(
    ctx: Context<PoolContext>,
    amount_in: u64,
    amount_out_min: u64,
    zero_for_one: bool,
    deadline: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    check_deadline(deadline, now)?;

    let amount_out = ctx
        .accounts
        .pool
        .apply_swap(amount_in, amount_out_min, zero_for_one, now)?;

    ctx.accounts.pay_in(zero_for_one, amount_in)?;
    ctx.accounts.pay_out(!zero_for_one, amount_out)?;

    emit!(Swapped {
        pool: ctx.accounts.pool.key(),
        trader: ctx.accounts.user.key(),
        zero_for_one,
        amount_in,
        amount_out,
    });

    msg!(
        "Swapped {} {} for {}",
        amount_in,
        if zero_for_one { "token0" } else { "token1" },
        amount_out
    );

    Ok(())
}
