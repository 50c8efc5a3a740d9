use solana_program::native_token::LAMPORTS_PER_SOL;

/// PDA seeds
pub const POOL_CONFIG_SEED: &[u8] = b"pool_config";
pub const POOL_STATE_SEED: &[u8] = b"pool_state";
pub const REGISTRY_SEED: &[u8] = b"investor_registry";

/// Time constants
pub const SECONDS_PER_DAY: i64 = 86400;

/// Basis points
pub const MAX_BPS: u64 = 10000;

/// Deposit split
pub const OWNER_FEE_BPS: u64 = 2000;
pub const REFERRAL_BONUS_BPS: u64 = 300;
pub const CASHBACK_BPS: u64 = 300;

/// Dividend accrual per full day, pro-rated by the second
pub const DAILY_DIVIDEND_BPS: u64 = 300;

/// Share of the leader's qualifying deposit paid out when a round closes
pub const KOTH_BONUS_BPS: u64 = 300;

/// Values used by `PoolParams::default()`
pub const DEFAULT_MIN_DEPOSIT_LAMPORTS: u64 = LAMPORTS_PER_SOL / 100;
pub const DEFAULT_PAYOUT_INTERVAL_SECS: i64 = 10 * 60;
/// Every investor paid in one page is a writable account of the transaction
pub const DEFAULT_MASS_TRANSACTION_LIMIT: u32 = 20;
pub const DEFAULT_ROUND_DURATION_SECS: i64 = 30 * SECONDS_PER_DAY;

/// Liquidity at or below this, after a dividend had to be capped, closes the round
pub const EXHAUSTION_THRESHOLD_LAMPORTS: u64 = LAMPORTS_PER_SOL / 1000;
