use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::{RELAYER_SEED, VAULT_SEED};
use crate::state::Relayer;

/// Opens the relayer's pooled holding account for a mint. Anyone may pay for it.
#[derive(Accounts)]
pub struct OpenVault<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(seeds = [RELAYER_SEED], bump = relayer.bump)]
    pub relayer: Account<'info, Relayer>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        seeds = [VAULT_SEED, relayer.key().as_ref(), mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = relayer,
        token::token_program = token_program
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<OpenVault>) -> Result<()> {
    msg!(
        "Vault {} opened for mint {}",
        ctx.accounts.vault.key(),
        ctx.accounts.mint.key()
    );

    Ok(())
}
