pub mod admin;
pub mod deposit;
pub mod finalize_round;
pub mod initialize_pool;
pub mod payout;

pub use admin::*;
pub use deposit::*;
pub use finalize_round::*;
pub use initialize_pool::*;
pub use payout::*;

use anchor_lang::prelude::*;

use crate::{
    events::{DividendPaid, RoundFinalized},
    ledger::{Ledger, RoundSummary},
    settlement::{self, DisbursementKind, Settlement},
    state::{InvestorRegistry, PoolConfig, PoolState, RegistryBook},
};

/// Runs a ledger operation over the registry account's raw data.
///
/// The registry is read through [`RegistryBook`] rather than `load_mut`
/// because its record slots trail the fixed header and grow over time.
pub(crate) fn with_ledger<'info, T>(
    config: &PoolConfig,
    state: &mut PoolState,
    registry: &AccountLoader<'info, InvestorRegistry>,
    op: impl FnOnce(&mut Ledger<'_>) -> Result<T>,
) -> Result<T> {
    let registry_info = registry.to_account_info();
    let mut data = registry_info.try_borrow_mut_data()?;
    let book = RegistryBook::from_account_data(&mut data[..])?;
    let mut ledger = Ledger::new(config, state, book);
    op(&mut ledger)
}

/// Pays out a settlement from the pool account, keeping it rent exempt.
pub(crate) fn execute_settlement<'info>(
    settlement: &Settlement,
    pool: &AccountInfo<'info>,
    recipients: &[AccountInfo<'info>],
) -> Result<()> {
    if settlement.is_empty() {
        return Ok(());
    }
    let reserve = Rent::get()?.minimum_balance(pool.data_len());
    settlement::execute(settlement, pool, recipients, reserve)
}

pub(crate) fn emit_dividends(settlement: &Settlement, timestamp: i64) {
    for disbursement in settlement
        .iter()
        .filter(|d| d.kind == DisbursementKind::Dividend)
    {
        emit!(DividendPaid {
            investor: disbursement.recipient,
            amount: disbursement.amount,
            timestamp,
        });
    }
}

pub(crate) fn emit_round_finalized(summary: &RoundSummary) {
    emit!(RoundFinalized {
        round: summary.round,
        koth_leader: summary.koth_leader,
        koth_bonus: summary.koth_bonus,
        carried_liquidity: summary.carried_liquidity,
        next_round: summary.next_round,
        timestamp: summary.started_at,
    });
}
