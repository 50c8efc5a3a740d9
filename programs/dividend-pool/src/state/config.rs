use anchor_lang::prelude::*;

use crate::{constants::*, errors::PoolError};

/// Owner-tunable parameters supplied at initialization
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolParams {
    pub min_deposit_amount: u64,
    pub payout_interval_secs: i64,
    pub mass_transaction_limit: u32,
    pub round_duration_secs: i64,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            min_deposit_amount: DEFAULT_MIN_DEPOSIT_LAMPORTS,
            payout_interval_secs: DEFAULT_PAYOUT_INTERVAL_SECS,
            mass_transaction_limit: DEFAULT_MASS_TRANSACTION_LIMIT,
            round_duration_secs: DEFAULT_ROUND_DURATION_SECS,
        }
    }
}

impl PoolParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.min_deposit_amount > 0, PoolError::InvalidParameter);
        require!(self.payout_interval_secs >= 0, PoolError::InvalidParameter);
        require!(self.mass_transaction_limit > 0, PoolError::InvalidParameter);
        require!(self.round_duration_secs > 0, PoolError::InvalidParameter);
        Ok(())
    }
}

/// Admin configuration, persists across rounds
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Owner receiving the operator fee; the default key means renounced
    pub owner: Pubkey,

    /// Smallest accepted deposit
    pub min_deposit_amount: u64,

    /// Minimum wait between two payouts of the same investor
    pub payout_interval_secs: i64,

    /// Upper bound on investors paid by one batch payout call
    pub mass_transaction_limit: u32,

    /// Round time limit
    pub round_duration_secs: i64,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

impl PoolConfig {
    pub const LEN: usize = 8 + // discriminator
        32 + // owner
        8 + // min_deposit_amount
        8 + // payout_interval_secs
        4 + // mass_transaction_limit
        8 + // round_duration_secs
        1 + // bump
        32; // _reserved

    pub fn new(owner: Pubkey, params: PoolParams, bump: u8) -> Self {
        Self {
            owner,
            min_deposit_amount: params.min_deposit_amount,
            payout_interval_secs: params.payout_interval_secs,
            mass_transaction_limit: params.mass_transaction_limit,
            round_duration_secs: params.round_duration_secs,
            bump,
            _reserved: [0; 32],
        }
    }

    pub fn is_renounced(&self) -> bool {
        self.owner == Pubkey::default()
    }

    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require!(
            !self.is_renounced() && self.owner == *caller,
            PoolError::Unauthorized
        );
        Ok(())
    }

    /// Number of investors one batch call may pay; zero requests the full cap.
    pub fn batch_size(&self, requested: u32) -> usize {
        let cap = self.mass_transaction_limit.max(1);
        let size = if requested == 0 { cap } else { requested.min(cap) };
        size as usize
    }

    pub fn set_min_deposit_amount(&mut self, caller: &Pubkey, amount: u64) -> Result<()> {
        self.ensure_owner(caller)?;
        require!(amount > 0, PoolError::InvalidParameter);
        self.min_deposit_amount = amount;
        Ok(())
    }

    pub fn set_payout_interval(&mut self, caller: &Pubkey, secs: i64) -> Result<()> {
        self.ensure_owner(caller)?;
        require!(secs >= 0, PoolError::InvalidParameter);
        self.payout_interval_secs = secs;
        Ok(())
    }

    pub fn set_mass_transaction_limit(&mut self, caller: &Pubkey, limit: u32) -> Result<()> {
        self.ensure_owner(caller)?;
        require!(limit > 0, PoolError::InvalidParameter);
        self.mass_transaction_limit = limit;
        Ok(())
    }

    /// Hands ownership over in a single step and returns the previous owner.
    /// Passing the default key renounces ownership for good.
    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        self.ensure_owner(caller)?;
        let previous = self.owner;
        self.owner = new_owner;
        if self.is_renounced() {
            msg!("Ownership renounced, owner-gated operations are disabled");
        }
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_pool_error;

    fn config_owned_by(owner: Pubkey) -> PoolConfig {
        PoolConfig::new(owner, PoolParams::default(), 255)
    }

    #[test]
    fn test_pool_config_size() {
        let config = config_owned_by(Pubkey::new_unique());
        let mut bytes = Vec::new();
        config.serialize(&mut bytes).unwrap();

        assert_eq!(bytes.len() + 8, PoolConfig::LEN);
    }

    #[test]
    fn test_params_validation() {
        assert!(PoolParams::default().validate().is_ok());

        let zero_interval = PoolParams {
            payout_interval_secs: 0,
            ..Default::default()
        };
        assert!(zero_interval.validate().is_ok());

        let no_batch = PoolParams {
            mass_transaction_limit: 0,
            ..Default::default()
        };
        assert_pool_error(no_batch.validate(), PoolError::InvalidParameter);

        let no_minimum = PoolParams {
            min_deposit_amount: 0,
            ..Default::default()
        };
        assert_pool_error(no_minimum.validate(), PoolError::InvalidParameter);
    }

    #[test]
    fn test_setters_are_owner_gated() {
        let owner = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut config = config_owned_by(owner);

        assert_pool_error(
            config.set_min_deposit_amount(&stranger, 1),
            PoolError::Unauthorized,
        );
        assert_pool_error(config.set_payout_interval(&stranger, 0), PoolError::Unauthorized);
        assert_pool_error(
            config.set_mass_transaction_limit(&stranger, 5),
            PoolError::Unauthorized,
        );
        assert_pool_error(
            config.transfer_ownership(&stranger, stranger),
            PoolError::Unauthorized,
        );
        assert_eq!(config, config_owned_by(owner));

        config.set_min_deposit_amount(&owner, 7).unwrap();
        config.set_payout_interval(&owner, 0).unwrap();
        config.set_mass_transaction_limit(&owner, 5).unwrap();
        assert_eq!(config.min_deposit_amount, 7);
        assert_eq!(config.payout_interval_secs, 0);
        assert_eq!(config.mass_transaction_limit, 5);
    }

    #[test]
    fn test_setters_reject_invalid_values() {
        let owner = Pubkey::new_unique();
        let mut config = config_owned_by(owner);

        assert_pool_error(config.set_payout_interval(&owner, -1), PoolError::InvalidParameter);
        assert_pool_error(
            config.set_mass_transaction_limit(&owner, 0),
            PoolError::InvalidParameter,
        );
        assert_pool_error(config.set_min_deposit_amount(&owner, 0), PoolError::InvalidParameter);
    }

    #[test]
    fn test_transfer_ownership_is_immediate() {
        let owner = Pubkey::new_unique();
        let successor = Pubkey::new_unique();
        let mut config = config_owned_by(owner);

        assert_eq!(config.transfer_ownership(&owner, successor).unwrap(), owner);
        assert_eq!(config.owner, successor);
        assert_pool_error(config.set_payout_interval(&owner, 0), PoolError::Unauthorized);
        config.set_payout_interval(&successor, 0).unwrap();
    }

    #[test]
    fn test_renounce_locks_out_every_caller() {
        let owner = Pubkey::new_unique();
        let mut config = config_owned_by(owner);

        config.transfer_ownership(&owner, Pubkey::default()).unwrap();

        assert!(config.is_renounced());
        assert_pool_error(config.set_payout_interval(&owner, 0), PoolError::Unauthorized);
        assert_pool_error(
            config.set_payout_interval(&Pubkey::default(), 0),
            PoolError::Unauthorized,
        );
    }

    #[test]
    fn test_batch_size_is_capped_by_mass_transaction_limit() {
        let mut config = config_owned_by(Pubkey::new_unique());
        config.mass_transaction_limit = 10;

        assert_eq!(config.batch_size(0), 10);
        assert_eq!(config.batch_size(3), 3);
        assert_eq!(config.batch_size(50), 10);
    }
}
