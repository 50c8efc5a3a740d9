use anchor_lang::{error::ErrorCode, prelude::*};

use crate::errors::PoolError;

/// Per-investor accounting entry, stored in the registry's record slots
#[zero_copy]
#[derive(Default, Debug)]
pub struct InvestorRecord {
    /// Investor wallet address
    pub address: Pubkey,

    /// Bound referrer, meaningful only when `has_referrer == 1`
    pub referrer: Pubkey,

    /// Principal used for dividend accrual (gross of fees), valid in `round` only
    pub nominal_balance: u64,

    /// Start of the current accrual window
    pub last_payout_ts: i64,

    /// Lifetime dividends received
    pub total_paid: u64,

    /// Round in which `nominal_balance` was credited
    pub round: u64,

    pub has_referrer: u8,

    pub _padding: [u8; 7],
}

impl InvestorRecord {
    pub const LEN: usize = std::mem::size_of::<InvestorRecord>();

    pub fn new(address: Pubkey) -> Self {
        Self {
            address,
            ..Default::default()
        }
    }

    pub fn referrer(&self) -> Option<Pubkey> {
        (self.has_referrer != 0).then_some(self.referrer)
    }

    /// Binds the referrer once; later calls are ignored.
    pub fn bind_referrer(&mut self, referrer: Pubkey) {
        if self.has_referrer != 0 || referrer == self.address {
            return;
        }
        self.referrer = referrer;
        self.has_referrer = 1;
    }

    /// Nominal balance as seen from `round`. Balances from earlier rounds read as zero.
    pub fn balance_in(&self, round: u64) -> u64 {
        if self.round == round {
            self.nominal_balance
        } else {
            0
        }
    }

    pub fn is_active_in(&self, round: u64) -> bool {
        self.balance_in(round) > 0
    }

    /// Seconds since the last payout; negative when the payout date lies in the future.
    pub fn elapsed_since_payout(&self, now: i64) -> i64 {
        now.saturating_sub(self.last_payout_ts)
    }
}

/// Header of the investor registry account.
///
/// The account data is the discriminator, this header, then a run of
/// `InvestorRecord` slots. The account grows by one slot whenever a new
/// investor arrives and no free slot is left. An investor keeps the index
/// assigned on its first deposit for the lifetime of the pool.
#[account(zero_copy)]
pub struct InvestorRegistry {
    /// Pool state this registry belongs to
    pub pool: Pubkey,

    /// Number of occupied record slots
    pub len: u32,

    pub _padding: [u8; 4],
}

// 32 + 32 + 8 + 8 + 8 + 8 + 1 + 7
const _: () = assert!(std::mem::size_of::<InvestorRecord>() == 104);
const _: () = assert!(std::mem::size_of::<InvestorRegistry>() == 40);

impl InvestorRegistry {
    pub const LEN: usize = 8 + // discriminator
        std::mem::size_of::<InvestorRegistry>();

    /// Account size needed for `slots` records
    pub const fn space_for(slots: usize) -> usize {
        Self::LEN + slots * InvestorRecord::LEN
    }
}

/// Mutable view over the registry header and its record slots
pub struct RegistryBook<'a> {
    header: &'a mut InvestorRegistry,
    slots: &'a mut [InvestorRecord],
}

impl<'a> RegistryBook<'a> {
    pub fn new(header: &'a mut InvestorRegistry, slots: &'a mut [InvestorRecord]) -> Self {
        Self { header, slots }
    }

    /// Splits raw registry account data into header and slots.
    pub fn from_account_data(data: &'a mut [u8]) -> Result<Self> {
        require!(
            data.len() >= InvestorRegistry::LEN,
            ErrorCode::AccountDidNotDeserialize
        );
        let (head, tail) = data.split_at_mut(InvestorRegistry::LEN);
        let slot_bytes = tail.len() / InvestorRecord::LEN * InvestorRecord::LEN;

        let header = bytemuck::try_from_bytes_mut(&mut head[8..])
            .map_err(|_| error!(ErrorCode::AccountDidNotDeserialize))?;
        let slots = bytemuck::try_cast_slice_mut(&mut tail[..slot_bytes])
            .map_err(|_| error!(ErrorCode::AccountDidNotDeserialize))?;

        let book = Self { header, slots };
        require!(
            book.len() <= book.capacity(),
            ErrorCode::AccountDidNotDeserialize
        );
        Ok(book)
    }

    pub fn len(&self) -> usize {
        self.header.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.header.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn has_free_slot(&self) -> bool {
        self.len() < self.capacity()
    }

    pub fn records(&self) -> &[InvestorRecord] {
        &self.slots[..self.len()]
    }

    pub fn record(&self, index: usize) -> &InvestorRecord {
        &self.records()[index]
    }

    pub fn record_mut(&mut self, index: usize) -> &mut InvestorRecord {
        let len = self.len();
        &mut self.slots[..len][index]
    }

    pub fn find(&self, address: &Pubkey) -> Option<usize> {
        self.records().iter().position(|r| r.address == *address)
    }

    pub fn get(&self, address: &Pubkey) -> Option<&InvestorRecord> {
        self.find(address).map(|i| self.record(i))
    }

    pub fn get_mut(&mut self, address: &Pubkey) -> Option<&mut InvestorRecord> {
        let index = self.find(address)?;
        Some(self.record_mut(index))
    }

    pub fn is_registered(&self, address: &Pubkey) -> bool {
        self.find(address).is_some()
    }

    /// Appends a fresh record in the next free slot and returns its index.
    pub fn register(&mut self, address: Pubkey) -> Result<usize> {
        require!(self.has_free_slot(), PoolError::RegistryFull);

        let index = self.len();
        self.slots[index] = InvestorRecord::new(address);
        self.header.len += 1;
        Ok(index)
    }
}
