use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub owner: Pubkey,
    pub registry: Pubkey,
    pub min_deposit_amount: u64,
    pub payout_interval_secs: i64,
    pub mass_transaction_limit: u32,
    pub round_duration_secs: i64,
    pub timestamp: i64,
}

#[event]
pub struct DepositReceived {
    pub investor: Pubkey,
    pub amount: u64,
    pub owner_fee: u64,
    pub referral_bonus: u64,
    pub cashback: u64,
    pub to_pool: u64,
    pub new_investor: bool,
    pub nominal_balance: u64,
    pub round: u64,
    pub timestamp: i64,
}

#[event]
pub struct ReferrerBound {
    pub investor: Pubkey,
    pub referrer: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct KothLeaderChanged {
    pub leader: Pubkey,
    pub amount: u64,
    pub round: u64,
    pub timestamp: i64,
}

#[event]
pub struct DividendPaid {
    pub investor: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct PayoutPage {
    pub investors_paid: u32,
    pub total_paid: u64,
    pub shortfall: u64,
    pub cursor: u32,
    pub sweep_completed: bool,
    pub timestamp: i64,
}

#[event]
pub struct RoundFinalized {
    pub round: u64,
    pub koth_leader: Option<Pubkey>,
    pub koth_bonus: u64,
    pub carried_liquidity: u64,
    pub next_round: u64,
    pub timestamp: i64,
}

#[event]
pub struct ConfigUpdated {
    pub min_deposit_amount: u64,
    pub payout_interval_secs: i64,
    pub mass_transaction_limit: u32,
    pub timestamp: i64,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
    pub timestamp: i64,
}
