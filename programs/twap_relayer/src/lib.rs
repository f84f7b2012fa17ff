use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;
pub mod venue;

use instructions::*;
use state::BountyPolicy;
use utils::validation::OrderParams;

declare_id!("8NUn2FVjPYRkviWB4dYob1EnzyoLxEesrPC3pmqenbAQ");

#[program]
pub mod twap_relayer {
    use super::*;

    /// Creates the relayer configuration and its native treasury
    pub fn initialize_relayer(
        ctx: Context<InitializeRelayer>,
        owner: Pubkey,
        home_venue: Pubkey,
        reference_venue: Pubkey,
        bounty_policy: BountyPolicy,
    ) -> Result<()> {
        instructions::initialize_relayer::handler(
            ctx,
            owner,
            home_venue,
            reference_venue,
            bounty_policy,
        )
    }

    pub fn open_vault(ctx: Context<OpenVault>) -> Result<()> {
        instructions::open_vault::handler(ctx)
    }

    /// Owner-only. Liquidity orders without a reserve floor execute immediately;
    /// everything else waits for a two-observation oracle.
    pub fn create_order(ctx: Context<CreateOrder>, params: OrderParams) -> Result<()> {
        instructions::create_order::handler(ctx, params)
    }

    /// Open to anyone; pays the caller a bounty from the treasury
    pub fn refresh_oracle(ctx: Context<RefreshOracle>) -> Result<()> {
        instructions::refresh_oracle::handler(ctx)
    }

    /// Direct oracle write, gated on the oracle owner's capability
    pub fn update_oracle(ctx: Context<UpdateOracle>) -> Result<()> {
        instructions::update_oracle::handler(ctx)
    }

    pub fn consult(ctx: Context<Consult>, token: Pubkey, amount: u64) -> Result<u64> {
        instructions::consult::handler(ctx, token, amount)
    }

    pub fn execute_order(ctx: Context<ExecuteOrder>) -> Result<()> {
        instructions::execute_order::handler(ctx)
    }

    pub fn withdraw_expired_order(ctx: Context<WithdrawExpiredOrder>) -> Result<()> {
        instructions::withdraw_expired_order::handler(ctx)
    }

    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        instructions::transfer_ownership::handler(ctx, new_owner)
    }

    pub fn set_bounty_policy(ctx: Context<SetBountyPolicy>, policy: BountyPolicy) -> Result<()> {
        instructions::set_bounty_policy::handler(ctx, policy)
    }
}
