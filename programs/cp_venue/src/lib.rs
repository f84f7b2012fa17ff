use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;

declare_id!("GXsECAGS8YrtGfN3Wdkg8ZLJSjeAgXwL3mHejrcLarRS");

#[program]
pub mod cp_venue {
    use super::*;

    /// Registers a venue (pool factory) with a default swap fee for its pools
    pub fn initialize_venue(
        ctx: Context<InitializeVenue>,
        venue_id: u8,
        swap_fee_bps: u16,
    ) -> Result<()> {
        instructions::initialize_venue::handler(ctx, venue_id, swap_fee_bps)
    }

    /// Creates an empty pool for a sorted mint pair on a venue
    pub fn create_pool(ctx: Context<CreatePool>) -> Result<()> {
        instructions::create_pool::handler(ctx)
    }

    pub fn add_liquidity(
        ctx: Context<PoolContext>,
        amount_0_desired: u64,
        amount_1_desired: u64,
        amount_0_min: u64,
        amount_1_min: u64,
        deadline: i64,
    ) -> Result<()> {
        instructions::add_liquidity::handler(
            ctx,
            amount_0_desired,
            amount_1_desired,
            amount_0_min,
            amount_1_min,
            deadline,
        )
    }

    pub fn remove_liquidity(
        ctx: Context<PoolContext>,
        liquidity: u64,
        amount_0_min: u64,
        amount_1_min: u64,
        deadline: i64,
    ) -> Result<()> {
        instructions::remove_liquidity::handler(ctx, liquidity, amount_0_min, amount_1_min, deadline)
    }

    pub fn swap_exact_input(
        ctx: Context<PoolContext>,
        amount_in: u64,
        amount_out_min: u64,
        zero_for_one: bool,
        deadline: i64,
    ) -> Result<()> {
        instructions::swap::handler(ctx, amount_in, amount_out_min, zero_for_one, deadline)
    }
}
