//! Tags reported by a population scan.

pub use crate::types::Epc;

use crate::error::TagOpError;
use crate::protocol::DecodedBankResult;
use crate::types::{AntennaId, MemoryBank};

/// One tag drained from a scan, with the result of the embedded bank read
/// if the plan carried one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    epc: Epc,
    antenna: Option<AntennaId>,
    banks: Option<Result<DecodedBankResult, TagOpError>>,
}

impl TagRecord {
    /// Record for a tag and its optional operation result.
    pub fn new(
        epc: Epc,
        antenna: Option<AntennaId>,
        banks: Option<Result<DecodedBankResult, TagOpError>>,
    ) -> Self {
        Self { epc, antenna, banks }
    }

    /// Tag identifier.
    pub fn epc(&self) -> &Epc {
        &self.epc
    }

    /// Antenna the tag was seen on.
    pub fn antenna(&self) -> Option<AntennaId> {
        self.antenna
    }

    /// `None` when the reader attached no operation output to this tag.
    pub fn banks(&self) -> Option<&Result<DecodedBankResult, TagOpError>> {
        self.banks.as_ref()
    }

    /// Consume the record into its operation result.
    pub fn into_banks(self) -> Option<Result<DecodedBankResult, TagOpError>> {
        self.banks
    }

    /// The decoded banks, when the embedded read succeeded.
    pub fn decoded(&self) -> Option<&DecodedBankResult> {
        self.banks.as_ref().and_then(|r| r.as_ref().ok())
    }

    /// The per-tag failure, when the embedded read failed.
    pub fn error(&self) -> Option<&TagOpError> {
        self.banks.as_ref().and_then(|r| r.as_ref().err())
    }

    /// Shorthand for the data of one successfully read bank.
    pub fn bank_data(&self, bank: MemoryBank) -> Option<&[u8]> {
        self.decoded().and_then(|d| d.data(bank))
    }
}
