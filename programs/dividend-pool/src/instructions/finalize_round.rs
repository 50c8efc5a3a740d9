use anchor_lang::prelude::*;

use crate::{
    constants::*,
    instructions::{emit_round_finalized, execute_settlement, with_ledger},
    state::{InvestorRegistry, PoolConfig, PoolState},
};

#[derive(Accounts)]
pub struct FinalizeRound<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [POOL_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, PoolConfig>,

    #[account(
        mut,
        seeds = [POOL_STATE_SEED],
        bump = pool_state.bump,
        has_one = registry
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(mut)]
    pub registry: AccountLoader<'info, InvestorRegistry>,
    // Remaining accounts: KOTH leader wallet
}

pub fn finalize_round<'info>(ctx: Context<'_, '_, '_, 'info, FinalizeRound<'info>>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let closure = with_ledger(
        &ctx.accounts.config,
        &mut ctx.accounts.pool_state,
        &ctx.accounts.registry,
        |ledger| ledger.finalize_round(now),
    )?;

    execute_settlement(
        &closure.settlement,
        &ctx.accounts.pool_state.to_account_info(),
        ctx.remaining_accounts,
    )?;
    ctx.accounts.pool_state.complete_settlement();

    emit_round_finalized(&closure.summary);
    Ok(())
}
