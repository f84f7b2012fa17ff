use anchor_lang::prelude::*;
use crate::constants::{NATIVE_SENTINEL, RELAYER_SEED, TREASURY_SEED};
use crate::errors::RelayerError;
use crate::program::TwapRelayer;
use crate::state::{BountyPolicy, Relayer, Treasury};

/// The singleton configuration can only be created by the program's upgrade authority
#[derive(Accounts)]
pub struct InitializeRelayer<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(constraint = program.programdata_address()? == Some(program_data.key()) @ RelayerError::Unauthorized)]
    pub program: Program<'info, TwapRelayer>,

    pub program_data: Account<'info, ProgramData>,

    #[account(
        init,
        payer = payer,
        space = Relayer::SIZE,
        seeds = [RELAYER_SEED],
        bump
    )]
    pub relayer: Account<'info, Relayer>,

    #[account(
        init,
        payer = payer,
        space = Treasury::SIZE,
        seeds = [TREASURY_SEED, relayer.key().as_ref()],
        bump
    )]
    pub treasury: Account<'info, Treasury>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeRelayer>,
    owner: Pubkey,
    home_venue: Pubkey,
    reference_venue: Pubkey,
    bounty_policy: BountyPolicy,
) -> Result<()> {
    ensure_deployer(
        ctx.accounts.program_data.upgrade_authority_address,
        &ctx.accounts.payer.key(),
    )?;
    require_keys_neq!(owner, NATIVE_SENTINEL, RelayerError::InvalidOwner);
    require_keys_neq!(home_venue, reference_venue, RelayerError::InvalidVenueConfig);

    let relayer = &mut ctx.accounts.relayer;
    relayer.owner = owner;
    relayer.home_venue = home_venue;
    relayer.reference_venue = reference_venue;
    relayer.bounty_policy = bounty_policy;
    relayer.next_order_id = 0;
    relayer.committed_native = 0;
    relayer.bump = ctx.bumps.relayer;
    relayer.treasury_bump = ctx.bumps.treasury;

    let treasury = &mut ctx.accounts.treasury;
    treasury.relayer = relayer.key();
    treasury.bump = ctx.bumps.treasury;

    msg!(
        "Relayer initialized: owner {}, home {}, reference {}",
        owner,
        home_venue,
        reference_venue
    );

    Ok(())
}

/// `signer` must be the program's current upgrade authority
pub fn ensure_deployer(upgrade_authority: Option<Pubkey>, signer: &Pubkey) -> Result<()> {
    require!(upgrade_authority == Some(*signer), RelayerError::Unauthorized);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_upgrade_authority_initializes() {
        let deployer = Pubkey::new_unique();
        assert!(ensure_deployer(Some(deployer), &deployer).is_ok());
        assert_eq!(
            ensure_deployer(Some(deployer), &Pubkey::new_unique()).unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::Unauthorized)
        );

        // An immutable program has no authority left to initialize it
        assert_eq!(
            ensure_deployer(None, &deployer).unwrap_err(),
            anchor_lang::error::Error::from(RelayerError::Unauthorized)
        );
    }
}
