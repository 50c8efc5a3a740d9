use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod settlement;
pub mod state;

use instructions::*;
use state::PoolParams;

declare_id!("83p12qNP8f4ETio3xKqPRVAXx517ns3Lto1m9ffG6skg");

#[program]
pub mod dividend_pool {
    use super::*;

    /// Create the pool config, pool state and investor registry
    pub fn initialize_pool(ctx: Context<InitializePool>, params: PoolParams) -> Result<()> {
        instructions::initialize_pool(ctx, params)
    }

    /// Invest `amount` lamports, optionally naming a referrer
    pub fn deposit<'info>(
        ctx: Context<'_, '_, '_, 'info, Deposit<'info>>,
        amount: u64,
        referrer: Option<Pubkey>,
    ) -> Result<()> {
        instructions::deposit(ctx, amount, referrer)
    }

    /// Withdraw the caller's accrued dividend
    pub fn payout_self(ctx: Context<PayoutSelf>) -> Result<()> {
        instructions::payout_self(ctx)
    }

    /// Pay the next page of investors (permissionless, resumes at the stored cursor)
    pub fn payout<'info>(ctx: Context<'_, '_, '_, 'info, Payout<'info>>, limit: u32) -> Result<()> {
        instructions::payout(ctx, limit)
    }

    /// Close an expired or exhausted round
    pub fn finalize_round<'info>(
        ctx: Context<'_, '_, '_, 'info, FinalizeRound<'info>>,
    ) -> Result<()> {
        instructions::finalize_round(ctx)
    }

    pub fn set_minimum_deposit_amount(ctx: Context<UpdateConfig>, amount: u64) -> Result<()> {
        instructions::set_minimum_deposit_amount(ctx, amount)
    }

    pub fn set_payout_cumulative_interval(ctx: Context<UpdateConfig>, secs: i64) -> Result<()> {
        instructions::set_payout_cumulative_interval(ctx, secs)
    }

    pub fn set_mass_transaction_limit(ctx: Context<UpdateConfig>, limit: u32) -> Result<()> {
        instructions::set_mass_transaction_limit(ctx, limit)
    }

    /// Hand ownership to `new_owner`; the default key renounces it
    pub fn transfer_ownership(ctx: Context<UpdateConfig>, new_owner: Pubkey) -> Result<()> {
        instructions::transfer_ownership(ctx, new_owner)
    }

    /// Override an investor's last payout timestamp (test support)
    pub fn set_date_payout(ctx: Context<SetDatePayout>, investor: Pubkey, ts: i64) -> Result<()> {
        instructions::set_date_payout(ctx, investor, ts)
    }
}
