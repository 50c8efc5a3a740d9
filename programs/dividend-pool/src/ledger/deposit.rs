use anchor_lang::prelude::*;

use super::{split_deposit, FeeSplit, Ledger, ReferralTier};
use crate::{
    errors::PoolError,
    settlement::{DisbursementKind, Settlement},
};

#[derive(Debug)]
pub struct DepositReceipt {
    pub investor: Pubkey,
    pub amount: u64,
    pub split: FeeSplit,
    /// First deposit ever made by this address
    pub new_investor: bool,
    /// Referrer in effect for this deposit
    pub referrer: Option<Pubkey>,
    /// The referrer was bound by this call
    pub referrer_bound: bool,
    pub koth_leader_changed: bool,
    pub nominal_balance: u64,
    pub settlement: Settlement,
}

impl<'a> Ledger<'a> {
    /// Credits a deposit that has already reached the pool account.
    pub fn deposit(
        &mut self,
        sender: Pubkey,
        amount: u64,
        referrer_candidate: Option<Pubkey>,
        now: i64,
    ) -> Result<DepositReceipt> {
        self.ensure_idle()?;
        self.ensure_round_open(now)?;
        require!(
            amount >= self.config.min_deposit_amount,
            PoolError::InsufficientAmount
        );

        let existing = self.registry.find(&sender);
        if existing.is_none() {
            require!(self.registry.has_free_slot(), PoolError::RegistryFull);
        }
        let new_investor = existing.is_none();

        let bound = existing.and_then(|i| self.registry.record(i).referrer());
        let (referrer, referrer_bound) = match bound {
            Some(referrer) => (Some(referrer), false),
            None => {
                let resolved = self.resolve_referrer(&sender, referrer_candidate);
                (resolved, resolved.is_some())
            }
        };

        let tier = match referrer {
            None => ReferralTier::None,
            Some(_) if new_investor => ReferralTier::BonusWithCashback,
            Some(_) => ReferralTier::Bonus,
        };
        let split = split_deposit(amount, !self.config.is_renounced(), tier)?;

        let round = self.state.round;
        let prior_balance = existing.map_or(0, |i| self.registry.record(i).balance_in(round));
        let nominal_balance = prior_balance
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        let total_nominal_deposited = self
            .state
            .total_nominal_deposited
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        let liquidity = self
            .state
            .liquidity
            .checked_add(split.to_pool)
            .ok_or(PoolError::MathOverflow)?;
        let investor_count = if prior_balance == 0 {
            self.state
                .investor_count
                .checked_add(1)
                .ok_or(PoolError::MathOverflow)?
        } else {
            self.state.investor_count
        };

        let index = match existing {
            Some(index) => index,
            None => self.registry.register(sender)?,
        };
        let record = self.registry.record_mut(index);
        if let (true, Some(referrer)) = (referrer_bound, referrer) {
            record.bind_referrer(referrer);
        }
        record.nominal_balance = nominal_balance;
        record.round = round;
        record.last_payout_ts = now;

        self.state.total_nominal_deposited = total_nominal_deposited;
        self.state.liquidity = liquidity;
        self.state.investor_count = investor_count;
        let koth_leader_changed = self.state.koth.observe(sender, amount, now);

        let mut settlement = Settlement::default();
        settlement.push(self.config.owner, split.owner_fee, DisbursementKind::OwnerFee);
        if let Some(referrer) = referrer {
            settlement.push(referrer, split.referral_bonus, DisbursementKind::ReferralBonus);
        }
        settlement.push(sender, split.cashback, DisbursementKind::Cashback);

        Ok(DepositReceipt {
            investor: sender,
            amount,
            split,
            new_investor,
            referrer,
            referrer_bound,
            koth_leader_changed,
            nominal_balance,
            settlement: self.begin_settlement(settlement),
        })
    }

    /// A candidate counts only when it is a known investor other than the sender.
    fn resolve_referrer(&self, sender: &Pubkey, candidate: Option<Pubkey>) -> Option<Pubkey> {
        let candidate = candidate?;
        if candidate == *sender || candidate == Pubkey::default() {
            msg!("Ignoring referrer {}: not a distinct address", candidate);
            return None;
        }
        if !self.registry.is_registered(&candidate) {
            msg!("Ignoring referrer {}: not a registered investor", candidate);
            return None;
        }
        Some(candidate)
    }
}
