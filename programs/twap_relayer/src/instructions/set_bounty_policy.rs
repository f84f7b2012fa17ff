use anchor_lang::prelude::*;
use crate::constants::RELAYER_SEED;
use crate::errors::RelayerError;
use crate::events::BountyPolicyUpdated;
use crate::state::{BountyPolicy, Relayer};

#[derive(Accounts)]
pub struct SetBountyPolicy<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [RELAYER_SEED],
        bump = relayer.bump,
        has_one = owner @ RelayerError::Unauthorized
    )]
    pub relayer: Account<'info, Relayer>,
}

pub fn handler(ctx: Context<SetBountyPolicy>, policy: BountyPolicy) -> Result<()> {
    // Reject policies whose payout cannot be computed
    policy.bounty_lamports()?;

    ctx.accounts.relayer.bounty_policy = policy;

    emit!(BountyPolicyUpdated { policy });
    msg!("Bounty policy updated: {:?}", policy);

    Ok(())
}
