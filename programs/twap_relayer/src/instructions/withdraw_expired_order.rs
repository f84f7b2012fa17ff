use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use crate::constants::{NATIVE_SENTINEL, RELAYER_SEED, TREASURY_SEED};
use crate::errors::RelayerError;
use crate::events::OrderWithdrawn;
use crate::state::{Order, Relayer, Treasury};
use crate::utils::lifecycle::{check_refund_leg, RefundLeg};

/// Returns an expired order's inputs to the owner. Leg `i` of the order's
/// escrowed inputs is paid from `vault_i` to `recipient_i`; a native leg is paid
/// in lamports from the treasury to the owner and needs no token accounts.
/// Token recipients must be held by the owner.
#[derive(Accounts)]
pub struct WithdrawExpiredOrder<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [RELAYER_SEED],
        bump = relayer.bump,
        has_one = owner @ RelayerError::Unauthorized
    )]
    pub relayer: Account<'info, Relayer>,

    #[account(mut, has_one = relayer)]
    pub order: Account<'info, Order>,

    #[account(
        mut,
        seeds = [TREASURY_SEED, relayer.key().as_ref()],
        bump = relayer.treasury_bump
    )]
    pub treasury: Account<'info, Treasury>,

    pub mint_0: Option<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub vault_0: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub recipient_0: Option<InterfaceAccount<'info, TokenAccount>>,

    pub mint_1: Option<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub vault_1: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub recipient_1: Option<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<WithdrawExpiredOrder>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let order = &mut ctx.accounts.order;
    order.mark_withdrawn(now)?;
    let order_id = order.order_id;
    let legs = order.escrowed_inputs();
    let native_input = order.native_input();
    ctx.accounts.relayer.release_native(native_input)?;
    ctx.accounts.order.exit(&crate::ID)?;
    ctx.accounts.relayer.exit(&crate::ID)?;

    let accounts = &ctx.accounts;
    for (index, (token, amount)) in legs.into_iter().enumerate() {
        if amount == 0 {
            continue;
        }

        if token == NATIVE_SENTINEL {
            Treasury::debit(&accounts.treasury, &accounts.owner.to_account_info(), amount)?;
            msg!("Order {} returned {} lamports", order_id, amount);
            continue;
        }

        let (mint, vault, recipient) = if index == 0 {
            (&accounts.mint_0, &accounts.vault_0, &accounts.recipient_0)
        } else {
            (&accounts.mint_1, &accounts.vault_1, &accounts.recipient_1)
        };
        let (mint, vault, recipient) = match (mint, vault, recipient) {
            (Some(mint), Some(vault), Some(recipient)) => (mint, vault, recipient),
            _ => return err!(RelayerError::MissingWithdrawalAccount),
        };

        check_refund_leg(
            &accounts.relayer.key(),
            &accounts.relayer.owner,
            &token,
            &RefundLeg {
                mint: mint.key(),
                vault: vault.key(),
                recipient_mint: recipient.mint,
                recipient_owner: recipient.owner,
            },
        )?;

        let bump = [accounts.relayer.bump];
        let signer_seeds: &[&[&[u8]]] = &[&[RELAYER_SEED, &bump]];
        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                accounts.token_program.to_account_info(),
                TransferChecked {
                    from: vault.to_account_info(),
                    mint: mint.to_account_info(),
                    to: recipient.to_account_info(),
                    authority: accounts.relayer.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
            mint.decimals,
        )?;

        msg!("Order {} returned {} of {}", order_id, amount, token);
    }

    emit!(OrderWithdrawn { order_id });
    msg!("Order {} withdrawn", order_id);

    Ok(())
}
