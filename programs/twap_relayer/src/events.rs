use anchor_lang::prelude::*;

use crate::state::{BountyPolicy, OrderKind};

#[event]
pub struct OrderCreated {
    pub order_id: u64,
    pub kind: OrderKind,
}

#[event]
pub struct OrderExecuted {
    pub order_id: u64,
}

#[event]
pub struct OrderWithdrawn {
    pub order_id: u64,
}

#[event]
pub struct OwnershipChanged {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

/// Emitted when a refresh appends an observation and pays its bounty
#[event]
pub struct OracleRefreshed {
    pub order_id: u64,
    pub observation_count: u8,
    pub caller: Pubkey,
    pub bounty: u64,
}

#[event]
pub struct BountyPolicyUpdated {
    pub policy: BountyPolicy,
}
