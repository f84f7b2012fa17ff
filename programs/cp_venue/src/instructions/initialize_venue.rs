use anchor_lang::prelude::*;
use crate::errors::VenueError;
use crate::math::MAX_SWAP_FEE_BPS;
use crate::state::Venue;

#[derive(Accounts)]
#[instruction(venue_id: u8)]
pub struct InitializeVenue<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = Venue::SIZE,
        seeds = [b"venue", authority.key().as_ref(), &[venue_id]],
        bump
    )]
    pub venue: Account<'info, Venue>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeVenue>, venue_id: u8, swap_fee_bps: u16) -> Result<()> {
    require!(swap_fee_bps <= MAX_SWAP_FEE_BPS, VenueError::InvalidSwapFee);

    let venue = &mut ctx.accounts.venue;
    venue.authority = ctx.accounts.authority.key();
    venue.venue_id = venue_id;
    venue.swap_fee_bps = swap_fee_bps;
    venue.pool_count = 0;
    venue.bump = ctx.bumps.venue;

    msg!("Venue {} initialized: fee {} bps", venue.key(), swap_fee_bps);

    Ok(())
}
