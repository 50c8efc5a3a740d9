//! Pool accounting over the config, state and registry accounts.
//!
//! Every mutating operation validates first, applies all state changes,
//! marks the pool as settling and hands back a [`Settlement`]. The caller
//! moves the lamports and then clears the flag.

pub mod deposit;
pub mod fees;
pub mod payout;
pub mod round;

#[cfg(test)]
pub(crate) mod testing;

pub use deposit::*;
pub use fees::*;
pub use payout::*;
pub use round::*;

use anchor_lang::prelude::*;

use crate::{
    errors::PoolError,
    settlement::Settlement,
    state::{PoolConfig, PoolState, RegistryBook},
};

pub struct Ledger<'a> {
    config: &'a PoolConfig,
    state: &'a mut PoolState,
    registry: RegistryBook<'a>,
}

impl<'a> Ledger<'a> {
    pub fn new(
        config: &'a PoolConfig,
        state: &'a mut PoolState,
        registry: RegistryBook<'a>,
    ) -> Self {
        Self {
            config,
            state,
            registry,
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        require!(!self.state.settling, PoolError::ReentrantCall);
        Ok(())
    }

    fn ensure_round_open(&self, now: i64) -> Result<()> {
        require!(
            !self
                .state
                .is_expired(now, self.config.round_duration_secs),
            PoolError::RoundExpired
        );
        Ok(())
    }

    fn begin_settlement(&mut self, settlement: Settlement) -> Settlement {
        self.state.begin_settlement();
        settlement
    }

    /// Clears the settling flag once every disbursement has been executed.
    pub fn complete_settlement(&mut self) {
        self.state.complete_settlement();
    }

    pub fn investor_deposit(&self, investor: &Pubkey) -> u64 {
        self.registry
            .get(investor)
            .map_or(0, |record| record.balance_in(self.state.round))
    }

    pub fn investor_payout_date(&self, investor: &Pubkey) -> Option<i64> {
        self.registry.get(investor).map(|record| record.last_payout_ts)
    }

    /// Dividend accrued since the investor's last payout, before any liquidity cap
    pub fn investor_unpaid_amount(&self, investor: &Pubkey, now: i64) -> u64 {
        self.registry.get(investor).map_or(0, |record| {
            dividend_for(
                record.balance_in(self.state.round),
                record.elapsed_since_payout(now),
            )
        })
    }

    /// Dividends received by the investor over the life of the pool
    pub fn investor_total_paid(&self, investor: &Pubkey) -> u64 {
        self.registry.get(investor).map_or(0, |record| record.total_paid)
    }

    pub fn investor_count(&self) -> u32 {
        self.state.investor_count
    }

    pub fn deposit_amount(&self) -> u64 {
        self.state.total_nominal_deposited
    }

    pub fn round(&self) -> u64 {
        self.state.round
    }

    pub fn owner(&self) -> Pubkey {
        self.config.owner
    }

    pub fn koth_leader(&self) -> Option<Pubkey> {
        self.state.koth.leader()
    }

    pub fn payout_cumulative_interval(&self) -> i64 {
        self.config.payout_interval_secs
    }

    pub fn liquidity(&self) -> u64 {
        self.state.liquidity
    }

    pub fn total_dividends_paid(&self) -> u64 {
        self.state.total_dividends_paid
    }

    /// Owner override of an investor's accrual start.
    pub fn set_date_payout(&mut self, caller: &Pubkey, investor: &Pubkey, ts: i64) -> Result<()> {
        self.config.ensure_owner(caller)?;
        self.ensure_idle()?;

        let record = self
            .registry
            .get_mut(investor)
            .ok_or(PoolError::InvestorNotFound)?;
        record.last_payout_ts = ts;
        Ok(())
    }
}
