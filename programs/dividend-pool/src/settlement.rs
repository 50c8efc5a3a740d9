use anchor_lang::prelude::*;

use crate::errors::PoolError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisbursementKind {
    OwnerFee,
    ReferralBonus,
    Cashback,
    Dividend,
    KothBonus,
}

/// One outbound lamport transfer from the pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disbursement {
    pub recipient: Pubkey,
    pub amount: u64,
    pub kind: DisbursementKind,
}

/// Transfers owed by a ledger operation whose state changes are already applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    disbursements: Vec<Disbursement>,
}

impl Settlement {
    /// Queues a transfer; zero amounts are dropped.
    pub fn push(&mut self, recipient: Pubkey, amount: u64, kind: DisbursementKind) {
        if amount == 0 {
            return;
        }
        self.disbursements.push(Disbursement {
            recipient,
            amount,
            kind,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Disbursement> {
        self.disbursements.iter()
    }

    pub fn len(&self) -> usize {
        self.disbursements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disbursements.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.iter().fold(0u64, |acc, d| acc.saturating_add(d.amount))
    }

    pub fn total_for(&self, kind: DisbursementKind) -> u64 {
        self.iter()
            .filter(|d| d.kind == kind)
            .fold(0u64, |acc, d| acc.saturating_add(d.amount))
    }
}

/// Moves lamports out of the program-owned pool account.
///
/// `reserve` is the rent-exempt minimum that must stay on the pool account.
/// Each recipient must be present (and writable) in `recipients`.
pub fn execute<'info>(
    settlement: &Settlement,
    pool: &AccountInfo<'info>,
    recipients: &[AccountInfo<'info>],
    reserve: u64,
) -> Result<()> {
    for disbursement in settlement.iter() {
        let recipient = recipients
            .iter()
            .find(|account| *account.key == disbursement.recipient && account.is_writable)
            .ok_or(PoolError::MissingRecipientAccount)?;

        let available = pool.lamports().saturating_sub(reserve);
        require!(
            available >= disbursement.amount,
            PoolError::InsufficientLiquidity
        );

        let credited = recipient
            .lamports()
            .checked_add(disbursement.amount)
            .ok_or(PoolError::MathOverflow)?;

        **pool.try_borrow_mut_lamports()? -= disbursement.amount;
        **recipient.try_borrow_mut_lamports()? = credited;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_pool_error;

    #[test]
    fn test_push_skips_zero_amounts() {
        let mut settlement = Settlement::default();
        let who = Pubkey::new_unique();

        settlement.push(who, 0, DisbursementKind::Dividend);
        settlement.push(who, 10, DisbursementKind::Dividend);
        settlement.push(who, 5, DisbursementKind::Cashback);

        assert_eq!(settlement.len(), 2);
        assert_eq!(settlement.total(), 15);
        assert_eq!(settlement.total_for(DisbursementKind::Dividend), 10);
        assert_eq!(settlement.total_for(DisbursementKind::OwnerFee), 0);
    }

    #[test]
    fn test_execute_moves_lamports_to_recipients() {
        let program_id = Pubkey::new_unique();
        let system = Pubkey::default();
        let pool_key = Pubkey::new_unique();
        let investor_key = Pubkey::new_unique();

        let mut pool_lamports = 1_000u64;
        let mut investor_lamports = 50u64;
        let mut pool_data = [0u8; 0];
        let mut investor_data = [0u8; 0];
        let pool = AccountInfo::new(
            &pool_key,
            false,
            true,
            &mut pool_lamports,
            &mut pool_data,
            &program_id,
            false,
            0,
        );
        let investor = AccountInfo::new(
            &investor_key,
            false,
            true,
            &mut investor_lamports,
            &mut investor_data,
            &system,
            false,
            0,
        );

        let mut settlement = Settlement::default();
        settlement.push(investor_key, 300, DisbursementKind::Dividend);
        execute(&settlement, &pool, &[investor.clone()], 100).unwrap();

        assert_eq!(pool.lamports(), 700);
        assert_eq!(investor.lamports(), 350);

        let mut overdraw = Settlement::default();
        overdraw.push(investor_key, 601, DisbursementKind::Dividend);
        assert_pool_error(
            execute(&overdraw, &pool, &[investor.clone()], 100),
            PoolError::InsufficientLiquidity,
        );
    }

    #[test]
    fn test_execute_requires_recipient_account() {
        let program_id = Pubkey::new_unique();
        let pool_key = Pubkey::new_unique();
        let mut pool_lamports = 1_000u64;
        let mut pool_data = [0u8; 0];
        let pool = AccountInfo::new(
            &pool_key,
            false,
            true,
            &mut pool_lamports,
            &mut pool_data,
            &program_id,
            false,
            0,
        );

        let mut settlement = Settlement::default();
        settlement.push(Pubkey::new_unique(), 10, DisbursementKind::OwnerFee);

        assert_pool_error(
            execute(&settlement, &pool, &[], 0),
            PoolError::MissingRecipientAccount,
        );
        assert_eq!(pool.lamports(), 1_000);
    }
}
