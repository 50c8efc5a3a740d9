use anchor_lang::prelude::*;

use crate::{constants::*, errors::PoolError};

/// How a deposit's lamports are divided
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub owner_fee: u64,
    pub referral_bonus: u64,
    pub cashback: u64,
    /// Remainder credited to pool liquidity
    pub to_pool: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferralTier {
    None,
    Bonus,
    BonusWithCashback,
}

impl ReferralTier {
    pub fn pays_bonus(self) -> bool {
        !matches!(self, ReferralTier::None)
    }

    pub fn pays_cashback(self) -> bool {
        matches!(self, ReferralTier::BonusWithCashback)
    }
}

/// `amount * bps / 10_000`, rounded down
pub fn bps_of(amount: u64, bps: u64) -> Result<u64> {
    let scaled = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(PoolError::MathOverflow)?
        / MAX_BPS as u128;
    u64::try_from(scaled).map_err(|_| error!(PoolError::MathOverflow))
}

/// Splits a deposit. With ownership renounced the operator fee stays in the pool.
pub fn split_deposit(amount: u64, owner_active: bool, tier: ReferralTier) -> Result<FeeSplit> {
    let owner_fee = if owner_active {
        bps_of(amount, OWNER_FEE_BPS)?
    } else {
        0
    };
    let referral_bonus = if tier.pays_bonus() {
        bps_of(amount, REFERRAL_BONUS_BPS)?
    } else {
        0
    };
    let cashback = if tier.pays_cashback() {
        bps_of(amount, CASHBACK_BPS)?
    } else {
        0
    };

    let to_pool = amount
        .checked_sub(owner_fee)
        .and_then(|v| v.checked_sub(referral_bonus))
        .and_then(|v| v.checked_sub(cashback))
        .ok_or(PoolError::MathOverflow)?;

    Ok(FeeSplit {
        owner_fee,
        referral_bonus,
        cashback,
        to_pool,
    })
}
