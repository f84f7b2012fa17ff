use anchor_lang::prelude::*;

#[error_code]
pub enum RelayerError {
    #[msg("Venue is not one of the registered venues")]
    UnknownVenue,

    #[msg("Caller is not authorized")]
    Unauthorized,

    #[msg("Token pair is invalid")]
    InvalidPair,

    #[msg("Tokens must be supplied in canonical order")]
    WrongTokenOrder,

    #[msg("Invalid token amount for order kind")]
    InvalidTokenAmount,

    #[msg("Invalid liquidity amount")]
    InvalidLiquidityAmount,

    #[msg("Price tolerance exceeds maximum")]
    InvalidTolerance,

    #[msg("Deadline reached")]
    DeadlineReached,

    #[msg("Observation window must be positive")]
    InvalidWindow,

    #[msg("Insufficient native balance")]
    InsufficientNativeBalance,

    #[msg("Pool does not match venue and pair")]
    InvalidPoolAddress,

    #[msg("Pool reserves below order floor")]
    ReservesTooLow,

    #[msg("Refresh period not elapsed")]
    RefreshPeriodNotElapsed,

    #[msg("Observation window already closed")]
    ObservationWindowClosed,

    #[msg("Observation window still running")]
    ObservationWindowRunning,

    #[msg("Deadline not reached")]
    DeadlineNotReached,

    #[msg("Order is not active")]
    OrderNotActive,

    #[msg("Order has no oracle")]
    MissingOracle,

    #[msg("Oracle does not belong to order")]
    InvalidOracle,

    #[msg("Invalid relayer vault")]
    InvalidVault,

    #[msg("Missing account for withdrawal leg")]
    MissingWithdrawalAccount,

    #[msg("Withdrawal recipient is not held by the owner")]
    InvalidRecipient,

    #[msg("Invalid owner")]
    InvalidOwner,

    #[msg("Home and reference venues must differ")]
    InvalidVenueConfig,

    #[msg("Zero elapsed time between observations")]
    ZeroElapsedTime,

    #[msg("Math overflow")]
    MathOverflow,
}
