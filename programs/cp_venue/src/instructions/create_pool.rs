use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::errors::VenueError;
use crate::state::{Pool, Venue};

/// Decimals of the liquidity token
pub const LP_DECIMALS: u8 = 9;

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut)]
    pub venue: Account<'info, Venue>,

    #[account(
        constraint = mint_0.key() < mint_1.key() @ VenueError::UnsortedMints
    )]
    pub mint_0: InterfaceAccount<'info, Mint>,
    pub mint_1: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        space = Pool::SIZE,
        seeds = [
            b"pool",
            venue.key().as_ref(),
            mint_0.key().as_ref(),
            mint_1.key().as_ref()
        ],
        bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = payer,
        seeds = [b"pool_vault", pool.key().as_ref(), mint_0.key().as_ref()],
        bump,
        token::mint = mint_0,
        token::authority = pool,
        token::token_program = token_program
    )]
    pub vault_0: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init,
        payer = payer,
        seeds = [b"pool_vault", pool.key().as_ref(), mint_1.key().as_ref()],
        bump,
        token::mint = mint_1,
        token::authority = pool,
        token::token_program = token_program
    )]
    pub vault_1: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init,
        payer = payer,
        seeds = [b"lp_mint", pool.key().as_ref()],
        bump,
        mint::decimals = LP_DECIMALS,
        mint::authority = pool,
        mint::token_program = token_program
    )]
    pub lp_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreatePool>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.pool;
    pool.venue = ctx.accounts.venue.key();
    pool.mint_0 = ctx.accounts.mint_0.key();
    pool.mint_1 = ctx.accounts.mint_1.key();
    pool.vault_0 = ctx.accounts.vault_0.key();
    pool.vault_1 = ctx.accounts.vault_1.key();
    pool.lp_mint = ctx.accounts.lp_mint.key();
    pool.reserve_0 = 0;
    pool.reserve_1 = 0;
    pool.total_liquidity = 0;
    pool.price_0_cumulative = 0;
    pool.price_1_cumulative = 0;
    pool.last_update = now;
    pool.swap_fee_bps = ctx.accounts.venue.swap_fee_bps;
    pool.bump = ctx.bumps.pool;

    let venue = &mut ctx.accounts.venue;
    venue.pool_count = venue
        .pool_count
        .checked_add(1)
        .ok_or(VenueError::MathOverflow)?;

    msg!(
        "Pool created on venue {}: {} / {}",
        venue.key(),
        pool.mint_0,
        pool.mint_1
    );

    Ok(())
}
