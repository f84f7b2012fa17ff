use anchor_lang::prelude::*;
use crate::events::LiquidityRemoved;
use crate::instructions::pool::{check_deadline, PoolContext};

pub fn handler(
    ctx: Context<PoolContext>,
    liquidity: u64,
    amount_0_min: u64,
    amount_1_min: u64,
    deadline: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    check_deadline(deadline, now)?;

    let (amount_0, amount_1) =
        ctx.accounts
            .pool
            .apply_withdrawal(liquidity, amount_0_min, amount_1_min, now)?;

    ctx.accounts.burn_liquidity(liquidity)?;
    ctx.accounts.pay_out(true, amount_0)?;
    ctx.accounts.pay_out(false, amount_1)?;

    emit!(LiquidityRemoved {
        pool: ctx.accounts.pool.key(),
        provider: ctx.accounts.user.key(),
        amount_0,
        amount_1,
        liquidity,
    });

    msg!("Removed {} liquidity for {} / {}", liquidity, amount_0, amount_1);

    Ok(())
}
