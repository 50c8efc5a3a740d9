use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use solana_program::system_instruction::MAX_PERMITTED_DATA_LENGTH;

use crate::{
    constants::*,
    errors::PoolError,
    events::{DepositReceived, KothLeaderChanged, ReferrerBound},
    instructions::{execute_settlement, with_ledger},
    state::{InvestorRegistry, PoolConfig, PoolState, RegistryBook},
};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub sender: Signer<'info>,

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

    pub system_program: Program<'info, System>,
    // Remaining accounts: owner wallet and referrer wallet, as writable
}

/// Grows the registry by one record slot when a new investor has none free.
/// The sender pays the extra rent.
fn ensure_registry_slot<'info>(
    registry: &AccountInfo<'info>,
    sender: &Signer<'info>,
    system_program: &Program<'info, System>,
) -> Result<()> {
    let (needs_slot, len) = {
        let mut data = registry.try_borrow_mut_data()?;
        let book = RegistryBook::from_account_data(&mut data[..])?;
        (
            !book.is_registered(sender.key) && !book.has_free_slot(),
            book.len(),
        )
    };
    if !needs_slot {
        return Ok(());
    }

    let old_size = registry.data_len();
    let new_size = InvestorRegistry::space_for(len + 1);
    require!(
        new_size as u64 <= MAX_PERMITTED_DATA_LENGTH,
        PoolError::RegistryFull
    );

    let rent = Rent::get()?;
    let top_up = rent
        .minimum_balance(new_size)
        .saturating_sub(registry.lamports());
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.to_account_info(),
                Transfer {
                    from: sender.to_account_info(),
                    to: registry.clone(),
                },
            ),
            top_up,
        )?;
    }

    registry.realloc(new_size, true)?;
    msg!("Registry grown: {} -> {} bytes", old_size, new_size);
    Ok(())
}

pub fn deposit<'info>(
    ctx: Context<'_, '_, '_, 'info, Deposit<'info>>,
    amount: u64,
    referrer: Option<Pubkey>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let sender = ctx.accounts.sender.key();

    ensure_registry_slot(
        &ctx.accounts.registry.to_account_info(),
        &ctx.accounts.sender,
        &ctx.accounts.system_program,
    )?;
    let receipt = with_ledger(
        &ctx.accounts.config,
        &mut ctx.accounts.pool_state,
        &ctx.accounts.registry,
        |ledger| ledger.deposit(sender, amount, referrer, now),
    )?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.sender.to_account_info(),
                to: ctx.accounts.pool_state.to_account_info(),
            },
        ),
        amount,
    )?;

    let mut recipients = ctx.remaining_accounts.to_vec();
    recipients.push(ctx.accounts.sender.to_account_info());
    execute_settlement(
        &receipt.settlement,
        &ctx.accounts.pool_state.to_account_info(),
        &recipients,
    )?;
    ctx.accounts.pool_state.complete_settlement();

    let round = ctx.accounts.pool_state.round;
    if let (true, Some(referrer)) = (receipt.referrer_bound, receipt.referrer) {
        emit!(ReferrerBound {
            investor: sender,
            referrer,
            timestamp: now,
        });
    }
    if receipt.koth_leader_changed {
        emit!(KothLeaderChanged {
            leader: sender,
            amount,
            round,
            timestamp: now,
        });
    }
    emit!(DepositReceived {
        investor: sender,
        amount,
        owner_fee: receipt.split.owner_fee,
        referral_bonus: receipt.split.referral_bonus,
        cashback: receipt.split.cashback,
        to_pool: receipt.split.to_pool,
        new_investor: receipt.new_investor,
        nominal_balance: receipt.nominal_balance,
        round,
        timestamp: now,
    });

    Ok(())
}
