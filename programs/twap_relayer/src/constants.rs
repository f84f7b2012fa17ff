use anchor_lang::prelude::*;

pub const RELAYER_SEED: &[u8] = b"relayer";
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const ORDER_SEED: &[u8] = b"order";
pub const ORACLE_SEED: &[u8] = b"oracle";
pub const VAULT_SEED: &[u8] = b"vault";

/// Denominator of `price_tolerance`
pub const PARTS_PER_MILLION: u64 = 1_000_000;

/// Largest accepted tolerance; 100% and above are rejected
pub const MAX_PRICE_TOLERANCE: u32 = 999_999;

/// Stands for native SOL in place of a mint. Sorts before every real mint.
pub const NATIVE_SENTINEL: Pubkey = Pubkey::new_from_array([0u8; 32]);

/// Base fee charged per transaction signature
pub const SIGNATURE_FEE_LAMPORTS: u64 = 5_000;

/// Basis point denominator for bounty margins
pub const BPS_DENOMINATOR: u64 = 10_000;
