use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::PoolInitialized,
    state::{InvestorRegistry, PoolConfig, PoolParams, PoolState},
};

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = authority,
        space = PoolConfig::LEN,
        seeds = [POOL_CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, PoolConfig>,

    #[account(
        init,
        payer = authority,
        space = PoolState::LEN,
        seeds = [POOL_STATE_SEED],
        bump
    )]
    pub pool_state: Account<'info, PoolState>,

    /// Starts with no record slots; deposits grow it as investors arrive
    #[account(
        init,
        payer = authority,
        space = InvestorRegistry::LEN,
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: AccountLoader<'info, InvestorRegistry>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_pool(ctx: Context<InitializePool>, params: PoolParams) -> Result<()> {
    params.validate()?;
    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.authority.key();

    let mut registry = ctx.accounts.registry.load_init()?;
    registry.pool = ctx.accounts.pool_state.key();

    let config = &mut ctx.accounts.config;
    config.set_inner(PoolConfig::new(owner, params, ctx.bumps.config));

    let pool_state = &mut ctx.accounts.pool_state;
    pool_state.registry = ctx.accounts.registry.key();
    pool_state.round = 1;
    pool_state.round_start_ts = now;
    pool_state.bump = ctx.bumps.pool_state;

    emit!(PoolInitialized {
        owner,
        registry: pool_state.registry,
        min_deposit_amount: params.min_deposit_amount,
        payout_interval_secs: params.payout_interval_secs,
        mass_transaction_limit: params.mass_transaction_limit,
        round_duration_secs: params.round_duration_secs,
        timestamp: now,
    });

    Ok(())
}
