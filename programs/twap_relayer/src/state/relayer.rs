use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, SIGNATURE_FEE_LAMPORTS};
use crate::errors::RelayerError;
use crate::state::capped_bounty;

/// The two whitelisted venues an order may target
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VenueKind {
    Home,
    Reference,
}

/// How much a refresh caller is paid for advancing an oracle
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BountyPolicy {
    /// Flat payout per refresh
    Fixed { lamports: u64 },
    /// Refund of the signature fees of the refresh transaction plus a margin
    FeeRefund { signatures: u8, margin_bps: u16 },
}

impl BountyPolicy {
    pub const SIZE: usize = 1 + 8;

    /// Bounty owed for one refresh, before capping at the treasury balance
    pub fn bounty_lamports(&self) -> Result<u64> {
        match *self {
            BountyPolicy::Fixed { lamports } => Ok(lamports),
            BountyPolicy::FeeRefund { signatures, margin_bps } => {
                let fees = SIGNATURE_FEE_LAMPORTS
                    .checked_mul(signatures as u64)
                    .ok_or(RelayerError::MathOverflow)?;
                let total = (fees as u128)
                    .checked_mul((BPS_DENOMINATOR + margin_bps as u64) as u128)
                    .ok_or(RelayerError::MathOverflow)?
                    / BPS_DENOMINATOR as u128;
                u64::try_from(total).map_err(|_| error!(RelayerError::MathOverflow))
            }
        }
    }
}

/// Registry configuration: the single owner, the venue whitelist and order numbering
#[account]
pub struct Relayer {
    /// Identity allowed to create and withdraw orders
    pub owner: Pubkey,

    /// Venue account registered as the home venue
    pub home_venue: Pubkey,

    /// Venue account registered as the reference venue
    pub reference_venue: Pubkey,

    pub bounty_policy: BountyPolicy,

    /// Id assigned to the next order
    pub next_order_id: u64,

    /// Treasury lamports reserved for the native legs of active orders
    pub committed_native: u64,

    /// PDA bumps
    pub bump: u8,
    pub treasury_bump: u8,
}

impl Relayer {
    pub const SIZE: usize = 8 + 32 + 32 + 32 + BountyPolicy::SIZE + 8 + 8 + 1 + 1;

    pub fn venue_key(&self, kind: VenueKind) -> Pubkey {
        match kind {
            VenueKind::Home => self.home_venue,
            VenueKind::Reference => self.reference_venue,
        }
    }

    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, RelayerError::Unauthorized);
        Ok(())
    }

    /// Hands out the next order id
    pub fn allocate_order_id(&mut self) -> Result<u64> {
        let order_id = self.next_order_id;
        self.next_order_id = order_id.checked_add(1).ok_or(RelayerError::MathOverflow)?;
        Ok(order_id)
    }

    /// Part of the treasury's `spendable` lamports not reserved for an active order
    pub fn uncommitted_native(&self, spendable: u64) -> u64 {
        spendable.saturating_sub(self.committed_native)
    }

    pub fn ensure_native_available(&self, spendable: u64, lamports: u64) -> Result<()> {
        require!(
            self.uncommitted_native(spendable) >= lamports,
            RelayerError::InsufficientNativeBalance
        );
        Ok(())
    }

    /// Reserves `lamports` for an order that will spend them later
    pub fn commit_native(&mut self, spendable: u64, lamports: u64) -> Result<()> {
        self.ensure_native_available(spendable, lamports)?;
        self.committed_native = self
            .committed_native
            .checked_add(lamports)
            .ok_or(RelayerError::MathOverflow)?;
        Ok(())
    }

    /// Frees a reservation once the order spends or refunds it
    pub fn release_native(&mut self, lamports: u64) -> Result<()> {
        self.committed_native = self
            .committed_native
            .checked_sub(lamports)
            .ok_or(RelayerError::MathOverflow)?;
        Ok(())
    }

    /// Bounty for one refresh, paid only out of uncommitted lamports
    pub fn refresh_bounty(&self, spendable: u64) -> Result<u64> {
        let owed = self.bounty_policy.bounty_lamports()?;
        Ok(capped_bounty(owed, self.uncommitted_native(spendable)))
    }
}
