use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::PayoutPage,
    instructions::{emit_dividends, emit_round_finalized, execute_settlement, with_ledger},
    state::{InvestorRegistry, PoolConfig, PoolState},
};

#[derive(Accounts)]
pub struct PayoutSelf<'info> {
    #[account(mut)]
    pub investor: Signer<'info>,

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
}

pub fn payout_self(ctx: Context<PayoutSelf>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let investor = ctx.accounts.investor.key();

    let receipt = with_ledger(
        &ctx.accounts.config,
        &mut ctx.accounts.pool_state,
        &ctx.accounts.registry,
        |ledger| ledger.payout_self(&investor, now),
    )?;

    execute_settlement(
        &receipt.settlement,
        &ctx.accounts.pool_state.to_account_info(),
        &[ctx.accounts.investor.to_account_info()],
    )?;
    ctx.accounts.pool_state.complete_settlement();

    emit_dividends(&receipt.settlement, now);
    Ok(())
}

#[derive(Accounts)]
pub struct Payout<'info> {
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
    // Remaining accounts: wallets of the investors on this page, plus the
    // KOTH leader's wallet when the call may close the round
}

pub fn payout<'info>(ctx: Context<'_, '_, '_, 'info, Payout<'info>>, limit: u32) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // Every investor paid on this page needs its wallet among the remaining accounts
    let page = ctx
        .accounts
        .config
        .batch_size(limit)
        .min(ctx.remaining_accounts.len());
    let report = with_ledger(
        &ctx.accounts.config,
        &mut ctx.accounts.pool_state,
        &ctx.accounts.registry,
        |ledger| ledger.payout_page(page, now),
    )?;

    execute_settlement(
        &report.settlement,
        &ctx.accounts.pool_state.to_account_info(),
        ctx.remaining_accounts,
    )?;
    ctx.accounts.pool_state.complete_settlement();

    emit_dividends(&report.settlement, now);
    emit!(PayoutPage {
        investors_paid: report.investors_paid,
        total_paid: report.total_paid,
        shortfall: report.shortfall,
        cursor: report.cursor,
        sweep_completed: report.sweep_completed,
        timestamp: now,
    });
    if let Some(summary) = &report.round_closed {
        emit_round_finalized(summary);
    }

    Ok(())
}
