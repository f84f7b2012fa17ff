use anchor_lang::prelude::*;
use crate::errors::RelayerError;
use crate::state::{Order, PriceOracle};

#[derive(Accounts)]
pub struct Consult<'info> {
    pub order: Account<'info, Order>,

    #[account(has_one = order @ RelayerError::InvalidOracle)]
    pub oracle: Account<'info, PriceOracle>,
}

/// Quotes `amount` of `token` in the other token of the order's pair at the TWAP
pub fn handler(ctx: Context<Consult>, token: Pubkey, amount: u64) -> Result<u64> {
    let order = &ctx.accounts.order;
    let from_a = if token == order.token_a {
        true
    } else if token == order.token_b {
        false
    } else {
        return err!(RelayerError::InvalidPair);
    };

    let quote = ctx.accounts.oracle.twap()?.consult(from_a, amount)?;
    msg!("Order {} consult: {} -> {}", order.order_id, amount, quote);

    Ok(quote)
}
