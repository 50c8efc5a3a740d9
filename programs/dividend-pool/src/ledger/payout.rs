use anchor_lang::prelude::*;

use super::{Ledger, RoundSummary};
use crate::{
    constants::*,
    errors::PoolError,
    settlement::{DisbursementKind, Settlement},
};

/// Dividend accrued on `nominal` over `elapsed` seconds at the daily rate.
/// Non-positive elapsed time accrues nothing.
pub fn dividend_for(nominal: u64, elapsed: i64) -> u64 {
    if elapsed <= 0 {
        return 0;
    }
    let accrued = (nominal as u128)
        .saturating_mul(DAILY_DIVIDEND_BPS as u128)
        .saturating_mul(elapsed as u128)
        / (MAX_BPS as u128 * SECONDS_PER_DAY as u128);
    u64::try_from(accrued).unwrap_or(u64::MAX)
}

#[derive(Debug)]
pub struct PayoutReceipt {
    pub investor: Pubkey,
    /// Dividend owed for the window
    pub accrued: u64,
    /// Amount actually disbursed after the liquidity cap
    pub paid: u64,
    pub settlement: Settlement,
}

#[derive(Debug, Default)]
pub struct PayoutReport {
    pub investors_paid: u32,
    pub total_paid: u64,
    /// Accrued dividends left unpaid because liquidity ran out
    pub shortfall: u64,
    /// Where the next call resumes
    pub cursor: u32,
    pub sweep_completed: bool,
    pub round_closed: Option<RoundSummary>,
    pub settlement: Settlement,
}

impl<'a> Ledger<'a> {
    /// Pays the caller's accrued dividend.
    pub fn payout_self(&mut self, investor: &Pubkey, now: i64) -> Result<PayoutReceipt> {
        self.ensure_idle()?;
        self.ensure_round_open(now)?;

        let index = self
            .registry
            .find(investor)
            .ok_or(PoolError::InvestorNotFound)?;
        let elapsed = self.registry.record(index).elapsed_since_payout(now);
        require!(
            elapsed >= self.config.payout_interval_secs,
            PoolError::TooEarlyForPayout
        );

        let (accrued, paid) = self.disburse_dividend(index, now)?;

        let mut settlement = Settlement::default();
        settlement.push(*investor, paid, DisbursementKind::Dividend);

        Ok(PayoutReceipt {
            investor: *investor,
            accrued,
            paid,
            settlement: self.begin_settlement(settlement),
        })
    }

    /// Pays the next page of eligible investors starting at the stored cursor.
    ///
    /// `limit == 0` pages up to the mass transaction limit. A call on an
    /// expired round closes it instead of paying dividends, and a completed
    /// sweep that leaves the pool exhausted closes it as well.
    pub fn payout(&mut self, limit: u32, now: i64) -> Result<PayoutReport> {
        let page = self.config.batch_size(limit);
        self.payout_page(page, now)
    }

    /// Same as [`Ledger::payout`] with the page size already resolved.
    /// The handler narrows it to the recipient accounts it was given.
    pub fn payout_page(&mut self, page: usize, now: i64) -> Result<PayoutReport> {
        self.ensure_idle()?;

        let mut report = PayoutReport::default();

        if self.state.is_expired(now, self.config.round_duration_secs) {
            let summary = self.close_round(now, &mut report.settlement)?;
            report.round_closed = Some(summary);
            report.cursor = self.state.payout_cursor;
            report.settlement = self.begin_settlement(report.settlement);
            return Ok(report);
        }

        let round = self.state.round;
        let len = self.registry.len();
        let mut index = self.state.payout_cursor as usize;

        while (report.investors_paid as usize) < page && index < len {
            let record = self.registry.record(index);
            let elapsed = record.elapsed_since_payout(now);
            let eligible = record.is_active_in(round)
                && elapsed > 0
                && elapsed >= self.config.payout_interval_secs;

            if eligible {
                let recipient = record.address;
                let (accrued, paid) = self.disburse_dividend(index, now)?;
                report.settlement.push(recipient, paid, DisbursementKind::Dividend);
                report.investors_paid += 1;
                report.total_paid = report.total_paid.saturating_add(paid);
                report.shortfall = report.shortfall.saturating_add(accrued - paid);
            }
            index += 1;
        }

        if index >= len {
            index = 0;
            report.sweep_completed = true;
        }
        self.state.payout_cursor = index as u32;
        report.cursor = self.state.payout_cursor;

        if report.sweep_completed && self.state.is_exhausted() {
            let summary = self.close_round(now, &mut report.settlement)?;
            report.round_closed = Some(summary);
            report.cursor = self.state.payout_cursor;
        }

        report.settlement = self.begin_settlement(report.settlement);
        Ok(report)
    }

    /// Books one investor's dividend, capped at liquidity, and restarts the clock.
    fn disburse_dividend(&mut self, index: usize, now: i64) -> Result<(u64, u64)> {
        let round = self.state.round;
        let record = self.registry.record_mut(index);
        let accrued = dividend_for(record.balance_in(round), record.elapsed_since_payout(now));
        let paid = accrued.min(self.state.liquidity);
        if paid < accrued {
            self.state.shortfall_observed = true;
            msg!(
                "Dividend for {} capped at pool liquidity: {} of {}",
                record.address,
                paid,
                accrued
            );
        }

        record.last_payout_ts = now;
        record.total_paid = record
            .total_paid
            .checked_add(paid)
            .ok_or(PoolError::MathOverflow)?;
        self.state.liquidity -= paid;
        self.state.total_dividends_paid = self
            .state
            .total_dividends_paid
            .checked_add(paid)
            .ok_or(PoolError::MathOverflow)?;

        Ok((accrued, paid))
    }
}
