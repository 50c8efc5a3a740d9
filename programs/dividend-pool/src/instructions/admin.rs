use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::{ConfigUpdated, OwnershipTransferred},
    instructions::with_ledger,
    state::{InvestorRegistry, PoolConfig, PoolState},
};

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, PoolConfig>,
}

fn emit_config_updated(config: &PoolConfig) -> Result<()> {
    emit!(ConfigUpdated {
        min_deposit_amount: config.min_deposit_amount,
        payout_interval_secs: config.payout_interval_secs,
        mass_transaction_limit: config.mass_transaction_limit,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_minimum_deposit_amount(ctx: Context<UpdateConfig>, amount: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;
    config.set_min_deposit_amount(&authority, amount)?;
    emit_config_updated(config)
}

pub fn set_payout_cumulative_interval(ctx: Context<UpdateConfig>, secs: i64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;
    config.set_payout_interval(&authority, secs)?;
    emit_config_updated(config)
}

pub fn set_mass_transaction_limit(ctx: Context<UpdateConfig>, limit: u32) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;
    config.set_mass_transaction_limit(&authority, limit)?;
    emit_config_updated(config)
}

pub fn transfer_ownership(ctx: Context<UpdateConfig>, new_owner: Pubkey) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let previous_owner = ctx
        .accounts
        .config
        .transfer_ownership(&authority, new_owner)?;

    emit!(OwnershipTransferred {
        previous_owner,
        new_owner,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetDatePayout<'info> {
    pub authority: Signer<'info>,

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

pub fn set_date_payout(ctx: Context<SetDatePayout>, investor: Pubkey, ts: i64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    with_ledger(
        &ctx.accounts.config,
        &mut ctx.accounts.pool_state,
        &ctx.accounts.registry,
        |ledger| ledger.set_date_payout(&authority, &investor, ts),
    )?;

    msg!("Payout date of {} set to {}", investor, ts);
    Ok(())
}
