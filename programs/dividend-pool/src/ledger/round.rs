use anchor_lang::prelude::*;

use super::{bps_of, Ledger};
use crate::{
    constants::KOTH_BONUS_BPS,
    errors::PoolError,
    settlement::{DisbursementKind, Settlement},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    /// Round that was closed
    pub round: u64,
    pub koth_leader: Option<Pubkey>,
    pub koth_bonus: u64,
    /// Liquidity carried into the next round
    pub carried_liquidity: u64,
    pub next_round: u64,
    pub started_at: i64,
}

#[derive(Debug)]
pub struct RoundClosure {
    pub summary: RoundSummary,
    pub settlement: Settlement,
}

impl<'a> Ledger<'a> {
    /// Closes an expired or exhausted round. Anyone may call this.
    pub fn finalize_round(&mut self, now: i64) -> Result<RoundClosure> {
        self.ensure_idle()?;
        require!(
            self.state.is_expired(now, self.config.round_duration_secs)
                || self.state.is_exhausted(),
            PoolError::RoundStillActive
        );

        let mut settlement = Settlement::default();
        let summary = self.close_round(now, &mut settlement)?;

        Ok(RoundClosure {
            summary,
            settlement: self.begin_settlement(settlement),
        })
    }

    /// Pays the KOTH bonus and opens the next round. Balances credited in the
    /// closed round read as zero from then on, so the registry is not touched.
    pub(crate) fn close_round(
        &mut self,
        now: i64,
        settlement: &mut Settlement,
    ) -> Result<RoundSummary> {
        let round = self.state.round;
        let koth_leader = self.state.koth.leader();
        let koth_bonus = match koth_leader {
            Some(_) => bps_of(self.state.koth.amount, KOTH_BONUS_BPS)?.min(self.state.liquidity),
            None => 0,
        };

        if let Some(leader) = koth_leader {
            self.state.liquidity -= koth_bonus;
            settlement.push(leader, koth_bonus, DisbursementKind::KothBonus);
        }

        self.state.start_new_round(now);

        Ok(RoundSummary {
            round,
            koth_leader,
            koth_bonus,
            carried_liquidity: self.state.liquidity,
            next_round: self.state.round,
            started_at: now,
        })
    }
}
