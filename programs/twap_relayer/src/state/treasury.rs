use anchor_lang::prelude::*;

use crate::errors::RelayerError;

/// Holds the relayer's native balance. Funded by plain lamport transfers;
/// pays bounties and native order legs.
#[account]
pub struct Treasury {
    pub relayer: Pubkey,
    pub bump: u8,
}

/// Lamports above the rent-exempt minimum
pub fn spendable_lamports(balance: u64, rent_exempt_minimum: u64) -> u64 {
    balance.saturating_sub(rent_exempt_minimum)
}

/// Bounty actually paid: the policy amount capped at what the treasury can spare
pub fn capped_bounty(owed: u64, spendable: u64) -> u64 {
    owed.min(spendable)
}

/// Spendable lamports left after paying `lamports`; fails rather than dip into rent
pub fn debit_lamports(spendable: u64, lamports: u64) -> Result<u64> {
    spendable
        .checked_sub(lamports)
        .ok_or_else(|| error!(RelayerError::InsufficientNativeBalance))
}

impl Treasury {
    pub const SIZE: usize = 8 + 32 + 1;

    /// Lamports the treasury can pay out without dropping below rent exemption
    pub fn spendable<'info>(account: &Account<'info, Treasury>) -> Result<u64> {
        let info = account.to_account_info();
        let minimum = Rent::get()?.minimum_balance(info.data_len());
        Ok(spendable_lamports(info.lamports(), minimum))
    }

    /// Moves lamports out of the program-owned treasury. Fails if the amount
    /// would dip into the rent-exempt reserve.
    pub fn debit<'info>(
        account: &Account<'info, Treasury>,
        to: &AccountInfo<'info>,
        lamports: u64,
    ) -> Result<()> {
        if lamports == 0 {
            return Ok(());
        }
        debit_lamports(Self::spendable(account)?, lamports)?;

        let from = account.to_account_info();
        **from.try_borrow_mut_lamports()? = from
            .lamports()
            .checked_sub(lamports)
            .ok_or(RelayerError::MathOverflow)?;
        **to.try_borrow_mut_lamports()? = to
            .lamports()
            .checked_add(lamports)
            .ok_or(RelayerError::MathOverflow)?;
        Ok(())
    }
}
