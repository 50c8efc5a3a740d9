use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    #[msg("Too small amount, minimum deposit not reached")]
    InsufficientAmount,

    #[msg("Too fast payment required, payout interval not elapsed")]
    TooEarlyForPayout,

    #[msg("Round time limit elapsed, round must be finalized first")]
    RoundExpired,

    #[msg("Unauthorized authority for this operation")]
    Unauthorized,

    #[msg("Investor not found in registry")]
    InvestorNotFound,

    #[msg("Investor registry is full")]
    RegistryFull,

    #[msg("Ledger is settling a previous call")]
    ReentrantCall,

    #[msg("Round is neither expired nor exhausted")]
    RoundStillActive,

    #[msg("Invalid parameter value")]
    InvalidParameter,

    #[msg("Missing account for disbursement recipient")]
    MissingRecipientAccount,

    #[msg("Pool lamports do not cover the disbursement")]
    InsufficientLiquidity,

    #[msg("Math overflow")]
    MathOverflow,
}

#[cfg(test)]
pub(crate) fn assert_pool_error<T: std::fmt::Debug>(result: Result<T>, expected: PoolError) {
    let err = result.expect_err("operation should have failed");
    assert_eq!(err, anchor_lang::error::Error::from(expected));
}
