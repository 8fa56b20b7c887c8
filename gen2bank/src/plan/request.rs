// gen2bank/src/plan/request.rs

use crate::constants::FULL_BANK_WORD_COUNT;
use crate::types::{BankSet, MemoryBank};
use crate::{Error, Result};

/// How many words to read from each bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadLength {
    /// The whole bank where the reader supports it, the minimum otherwise.
    #[default]
    FullBank,
    /// An explicit, non-zero word count.
    Words(u8),
}

/// The read-data operation sent to a reader.
///
/// With no enabled banks this is a single-bank read of `primary` and the
/// reader returns raw bank data. With enabled banks the reader returns one
/// packed segment per enabled bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BankRequest {
    primary: MemoryBank,
    banks: BankSet,
    word_offset: u32,
    word_count: u8,
}

impl BankRequest {
    /// Read of one bank; the reader returns its raw data.
    pub fn single(bank: MemoryBank, word_offset: u32, word_count: u8) -> Self {
        Self {
            primary: bank,
            banks: BankSet::EMPTY,
            word_offset,
            word_count,
        }
    }

    /// Read of every bank in `banks`. Fails on an empty set.
    pub fn multi(primary: MemoryBank, banks: BankSet, word_offset: u32, word_count: u8) -> Result<Self> {
        if banks.is_empty() {
            return Err(Error::InvalidRequest(
                "multi-bank read needs at least one enabled bank".into(),
            ));
        }
        Ok(Self {
            primary,
            banks,
            word_offset,
            word_count,
        })
    }

    /// `primary | enable flags`.
    pub fn selector(&self) -> u8 {
        self.primary.id() | self.banks.flags()
    }

    /// True when any enable flag is set.
    pub fn is_multi_bank(&self) -> bool {
        !self.banks.is_empty()
    }

    /// Bank addressed by the selector's low bits.
    pub fn primary(&self) -> MemoryBank {
        self.primary
    }

    /// Enabled banks; empty for a single-bank read.
    pub fn banks(&self) -> BankSet {
        self.banks
    }

    /// Banks a response to this request covers.
    pub fn requested_banks(&self) -> BankSet {
        if self.is_multi_bank() {
            self.banks
        } else {
            BankSet::EMPTY.with(self.primary)
        }
    }

    /// First word read in each bank.
    pub fn word_offset(&self) -> u32 {
        self.word_offset
    }

    /// Words read per bank; 0 reads the whole bank.
    pub fn word_count(&self) -> u8 {
        self.word_count
    }

    /// True when the word count asks for the whole bank.
    pub fn reads_full_bank(&self) -> bool {
        self.word_count == FULL_BANK_WORD_COUNT
    }
}
