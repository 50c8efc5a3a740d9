use std::collections::HashMap;

use anchor_lang::prelude::*;
use solana_program::native_token::LAMPORTS_PER_SOL;

use super::{DepositReceipt, Ledger};
use crate::{
    constants::SECONDS_PER_DAY,
    settlement::Settlement,
    state::{InvestorRecord, InvestorRegistry, PoolConfig, PoolParams, PoolState, RegistryBook},
};

pub(crate) const SOL: u64 = LAMPORTS_PER_SOL;
pub(crate) const DAY: i64 = SECONDS_PER_DAY;
pub(crate) const START_TS: i64 = 1_700_000_000;

/// In-memory pool with a wallet map standing in for recipient accounts.
///
/// The record slots grow the way the deposit handler reallocates the
/// registry account: one spare slot is always available.
pub(crate) struct TestPool {
    pub config: PoolConfig,
    pub state: PoolState,
    pub registry: InvestorRegistry,
    pub slots: Vec<InvestorRecord>,
    pub wallets: HashMap<Pubkey, u64>,
}

impl TestPool {
    pub fn new() -> Self {
        Self::with_params(PoolParams::default())
    }

    pub fn with_params(params: PoolParams) -> Self {
        let mut registry: InvestorRegistry = bytemuck::Zeroable::zeroed();
        registry.pool = Pubkey::new_unique();

        let state = PoolState {
            registry: Pubkey::new_unique(),
            round: 1,
            round_start_ts: START_TS,
            ..Default::default()
        };

        Self {
            config: PoolConfig::new(Pubkey::new_unique(), params, 255),
            state,
            registry,
            slots: Vec::new(),
            wallets: HashMap::new(),
        }
    }

    pub fn owner(&self) -> Pubkey {
        self.config.owner
    }

    pub fn ledger(&mut self) -> Ledger<'_> {
        if self.slots.len() <= self.registry.len as usize {
            self.slots.push(InvestorRecord::default());
        }
        Ledger::new(
            &self.config,
            &mut self.state,
            RegistryBook::new(&mut self.registry, &mut self.slots),
        )
    }

    /// Ledger over the occupied slots only, as if the account could not grow.
    pub fn ledger_without_spare_slot(&mut self) -> Ledger<'_> {
        let len = self.registry.len as usize;
        Ledger::new(
            &self.config,
            &mut self.state,
            RegistryBook::new(&mut self.registry, &mut self.slots[..len]),
        )
    }

    pub fn record(&self, investor: &Pubkey) -> &InvestorRecord {
        let len = self.registry.len as usize;
        self.slots[..len]
            .iter()
            .find(|record| record.address == *investor)
            .unwrap()
    }

    pub fn index_of(&self, investor: &Pubkey) -> usize {
        let len = self.registry.len as usize;
        self.slots[..len]
            .iter()
            .position(|record| record.address == *investor)
            .unwrap()
    }

    pub fn wallet(&self, key: &Pubkey) -> u64 {
        self.wallets.get(key).copied().unwrap_or(0)
    }

    /// Credits every disbursement to its wallet and clears the settling flag.
    pub fn settle(&mut self, settlement: &Settlement) {
        for disbursement in settlement.iter() {
            *self.wallets.entry(disbursement.recipient).or_default() += disbursement.amount;
        }
        self.ledger().complete_settlement();
    }

    pub fn deposit(
        &mut self,
        sender: Pubkey,
        amount: u64,
        referrer: Option<Pubkey>,
        now: i64,
    ) -> DepositReceipt {
        let receipt = self
            .ledger()
            .deposit(sender, amount, referrer, now)
            .unwrap();
        self.settle(&receipt.settlement);
        receipt
    }

    pub fn snapshot(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.state.serialize(&mut bytes).unwrap();
        bytes.extend_from_slice(bytemuck::bytes_of(&self.registry));
        let len = self.registry.len as usize;
        bytes.extend_from_slice(bytemuck::cast_slice(&self.slots[..len]));
        bytes
    }
}
