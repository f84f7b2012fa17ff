use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    self, Burn, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
};
use crate::errors::VenueError;
use crate::state::Pool;

/// Accounts shared by every pool interaction (deposit, withdrawal, swap).
/// `user` owns the three user-side token accounts; it may be a PDA signing
/// through CPI.
#[derive(Accounts)]
pub struct PoolContext<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        has_one = mint_0 @ VenueError::InvalidMint,
        has_one = mint_1 @ VenueError::InvalidMint,
        has_one = vault_0 @ VenueError::InvalidVault,
        has_one = vault_1 @ VenueError::InvalidVault,
        has_one = lp_mint @ VenueError::InvalidMint
    )]
    pub pool: Account<'info, Pool>,

    pub mint_0: InterfaceAccount<'info, Mint>,
    pub mint_1: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub vault_0: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub vault_1: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub lp_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = user_token_0.mint == mint_0.key() @ VenueError::InvalidMint
    )]
    pub user_token_0: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_token_1.mint == mint_1.key() @ VenueError::InvalidMint
    )]
    pub user_token_1: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_lp.mint == lp_mint.key() @ VenueError::InvalidMint
    )]
    pub user_lp: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> PoolContext<'info> {
    /// Moves tokens from the user into the pool vault for the given side
    pub fn pay_in(&self, zero: bool, amount: u64) -> Result<()> {
        let (from, mint, to) = if zero {
            (&self.user_token_0, &self.mint_0, &self.vault_0)
        } else {
            (&self.user_token_1, &self.mint_1, &self.vault_1)
        };

        token_interface::transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: from.to_account_info(),
                    mint: mint.to_account_info(),
                    to: to.to_account_info(),
                    authority: self.user.to_account_info(),
                },
            ),
            amount,
            mint.decimals,
        )
    }

    /// Moves tokens from the pool vault to the user, signed by the pool
    pub fn pay_out(&self, zero: bool, amount: u64) -> Result<()> {
        let (from, mint, to) = if zero {
            (&self.vault_0, &self.mint_0, &self.user_token_0)
        } else {
            (&self.vault_1, &self.mint_1, &self.user_token_1)
        };

        let pool = &self.pool;
        let bump = [pool.bump];
        let signer_seeds: &[&[&[u8]]] = &[&[
            b"pool",
            pool.venue.as_ref(),
            pool.mint_0.as_ref(),
            pool.mint_1.as_ref(),
            &bump,
        ]];

        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: from.to_account_info(),
                    mint: mint.to_account_info(),
                    to: to.to_account_info(),
                    authority: self.pool.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
            mint.decimals,
        )
    }

    pub fn mint_liquidity(&self, amount: u64) -> Result<()> {
        let pool = &self.pool;
        let bump = [pool.bump];
        let signer_seeds: &[&[&[u8]]] = &[&[
            b"pool",
            pool.venue.as_ref(),
            pool.mint_0.as_ref(),
            pool.mint_1.as_ref(),
            &bump,
        ]];

        token_interface::mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.lp_mint.to_account_info(),
                    to: self.user_lp.to_account_info(),
                    authority: self.pool.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )
    }

    pub fn burn_liquidity(&self, amount: u64) -> Result<()> {
        token_interface::burn(
            CpiContext::new(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.lp_mint.to_account_info(),
                    from: self.user_lp.to_account_info(),
                    authority: self.user.to_account_info(),
                },
            ),
            amount,
        )
    }
}

/// Rejects a request whose deadline has passed
pub fn check_deadline(deadline: i64, now: i64) -> Result<()> {
    require!(now <= deadline, VenueError::Expired);
    Ok(())
}
