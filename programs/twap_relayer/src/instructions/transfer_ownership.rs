use anchor_lang::prelude::*;
use crate::constants::{NATIVE_SENTINEL, RELAYER_SEED};
use crate::errors::RelayerError;
use crate::events::OwnershipChanged;
use crate::state::Relayer;

#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [RELAYER_SEED],
        bump = relayer.bump,
        has_one = owner @ RelayerError::Unauthorized
    )]
    pub relayer: Account<'info, Relayer>,
}

pub fn handler(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
    require_keys_neq!(new_owner, NATIVE_SENTINEL, RelayerError::InvalidOwner);

    let relayer = &mut ctx.accounts.relayer;
    let previous_owner = relayer.owner;
    relayer.owner = new_owner;

    emit!(OwnershipChanged {
        previous_owner,
        new_owner,
    });

    msg!("Ownership transferred: {} -> {}", previous_owner, new_owner);

    Ok(())
}
