use anchor_lang::prelude::*;

#[error_code]
pub enum VenueError {
    #[msg("Deadline expired")]
    Expired,

    #[msg("Swap fee exceeds maximum")]
    InvalidSwapFee,

    #[msg("Pool mints must be sorted and distinct")]
    UnsortedMints,

    #[msg("Invalid mint for pool")]
    InvalidMint,

    #[msg("Invalid pool vault")]
    InvalidVault,

    #[msg("Insufficient token 0 amount")]
    InsufficientAmount0,

    #[msg("Insufficient token 1 amount")]
    InsufficientAmount1,

    #[msg("Insufficient input amount")]
    InsufficientInputAmount,

    #[msg("Insufficient output amount")]
    InsufficientOutputAmount,

    #[msg("Insufficient liquidity")]
    InsufficientLiquidity,

    #[msg("Insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    #[msg("Insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    #[msg("Math overflow")]
    MathOverflow,
}
