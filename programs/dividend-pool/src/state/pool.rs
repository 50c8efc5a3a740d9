use anchor_lang::prelude::*;

use crate::constants::EXHAUSTION_THRESHOLD_LAMPORTS;

/// Largest single deposit seen since the current round started
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KothRecord {
    /// Current leader, meaningful only when `amount > 0`
    pub leader: Pubkey,

    /// Qualifying deposit amount
    pub amount: u64,

    /// When the leader's qualifying deposit landed
    pub timestamp: i64,
}

impl KothRecord {
    pub const LEN: usize = 32 + // leader
        8 + // amount
        8; // timestamp

    pub fn leader(&self) -> Option<Pubkey> {
        (self.amount > 0).then_some(self.leader)
    }

    /// Records a deposit and returns true when it takes the lead.
    ///
    /// A deposit equal to the leader's amount also takes the lead, so ties
    /// resolve to the most recent depositor rather than the first one.
    pub fn observe(&mut self, depositor: Pubkey, amount: u64, now: i64) -> bool {
        if amount == 0 || amount < self.amount {
            return false;
        }
        *self = KothRecord {
            leader: depositor,
            amount,
            timestamp: now,
        };
        true
    }

    pub fn clear(&mut self) {
        *self = KothRecord::default();
    }
}

/// Round-scoped pool accounting. The account also holds the pool's lamports.
#[account]
#[derive(Default, Debug)]
pub struct PoolState {
    /// Investor registry account
    pub registry: Pubkey,

    /// Lamports available for dividends and bonuses (rent excluded)
    pub liquidity: u64,

    /// Sum of nominal balances of active investors
    pub total_nominal_deposited: u64,

    /// Number of investors with a non-zero nominal balance
    pub investor_count: u32,

    /// Current round number, starting at 1
    pub round: u64,

    /// When the current round started
    pub round_start_ts: i64,

    /// Registry index where the next batch payout resumes
    pub payout_cursor: u32,

    /// King-of-the-hill leader for the current round
    pub koth: KothRecord,

    /// Lifetime dividends paid across all rounds
    pub total_dividends_paid: u64,

    /// Set between a ledger mutation and the end of its disbursements
    pub settling: bool,

    /// A dividend had to be capped at liquidity during this round
    pub shortfall_observed: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

impl PoolState {
    pub const LEN: usize = 8 + // discriminator
        32 + // registry
        8 + // liquidity
        8 + // total_nominal_deposited
        4 + // investor_count
        8 + // round
        8 + // round_start_ts
        4 + // payout_cursor
        KothRecord::LEN + // koth
        8 + // total_dividends_paid
        1 + // settling
        1 + // shortfall_observed
        1 + // bump
        32; // _reserved

    pub fn is_expired(&self, now: i64, round_duration_secs: i64) -> bool {
        now.saturating_sub(self.round_start_ts) > round_duration_secs
    }

    /// The pool ran dry paying dividends: a payment was capped and little is left.
    pub fn is_exhausted(&self) -> bool {
        self.investor_count > 0
            && self.shortfall_observed
            && self.liquidity <= EXHAUSTION_THRESHOLD_LAMPORTS
    }

    pub fn begin_settlement(&mut self) {
        self.settling = true;
    }

    pub fn complete_settlement(&mut self) {
        self.settling = false;
    }

    /// Resets round-scoped counters. Liquidity carries over.
    pub fn start_new_round(&mut self, now: i64) {
        self.round += 1;
        self.round_start_ts = now;
        self.total_nominal_deposited = 0;
        self.investor_count = 0;
        self.payout_cursor = 0;
        self.shortfall_observed = false;
        self.koth.clear();
    }
}
