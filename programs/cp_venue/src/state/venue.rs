use anchor_lang::prelude::*;

/// A liquidity venue: a namespace of pools sharing one default swap fee
#[account]
pub struct Venue {
    /// Authority that registered the venue
    pub authority: Pubkey,

    /// Discriminates venues registered by the same authority
    pub venue_id: u8,

    /// Swap fee (basis points) applied to pools created on this venue
    pub swap_fee_bps: u16,

    /// Number of pools created on this venue
    pub pool_count: u64,

    /// PDA bump
    pub bump: u8,
}

impl Venue {
    pub const SIZE: usize = 8 + 32 + 1 + 2 + 8 + 1;
}
