// gen2bank/src/types.rs

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use derive_more::Display;

use crate::constants::{BANK_ENABLE_BASE, BANK_ENABLE_FLAGS};
use crate::{Error, Result};

/// Gen2 memory bank.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryBank {
    /// Kill and access passwords.
    #[display(fmt = "reserved")]
    Reserved = 0,
    /// Stored CRC, PC word and identifier.
    #[display(fmt = "EPC")]
    Epc = 1,
    /// Tag and vendor identification.
    #[display(fmt = "TID")]
    Tid = 2,
    /// Application data.
    #[display(fmt = "user")]
    User = 3,
}

impl MemoryBank {
    /// Every bank, in id order.
    pub const ALL: [MemoryBank; 4] = [
        MemoryBank::Reserved,
        MemoryBank::Epc,
        MemoryBank::Tid,
        MemoryBank::User,
    ];

    /// Map a wire bank id to a bank. Ids outside 0..=3 are not Gen2 banks.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Reserved),
            1 => Some(Self::Epc),
            2 => Some(Self::Tid),
            3 => Some(Self::User),
            _ => None,
        }
    }

    /// Wire id of the bank.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Flag OR-ed into the read-data bank selector to enable this bank.
    pub const fn enable_flag(self) -> u8 {
        BANK_ENABLE_BASE << (self as u8)
    }
}

/// Set of enabled banks, stored as the selector enable flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BankSet(u8);

impl BankSet {
    /// No bank enabled: a single-bank read.
    pub const EMPTY: Self = Self(0);

    /// Build a set from raw enable flags. Bits outside 0x3C are rejected.
    pub fn from_flags(flags: u8) -> Result<Self> {
        if flags & !BANK_ENABLE_FLAGS != 0 {
            return Err(Error::InvalidRequest(format!(
                "bank enable flags {:#04x} outside {:#04x}",
                flags, BANK_ENABLE_FLAGS
            )));
        }
        Ok(Self(flags))
    }

    /// Set holding `banks`.
    pub fn from_banks(banks: &[MemoryBank]) -> Self {
        banks.iter().copied().collect()
    }

    /// Copy of the set with `bank` added.
    pub const fn with(self, bank: MemoryBank) -> Self {
        Self(self.0 | bank.enable_flag())
    }

    /// Whether `bank` is enabled.
    pub fn contains(&self, bank: MemoryBank) -> bool {
        self.0 & bank.enable_flag() != 0
    }

    /// True when no bank is enabled.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of enabled banks.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Raw enable flags.
    pub fn flags(&self) -> u8 {
        self.0
    }

    /// Banks in the set, in enum order.
    pub fn iter(&self) -> impl Iterator<Item = MemoryBank> {
        let set = *self;
        MemoryBank::ALL.into_iter().filter(move |b| set.contains(*b))
    }
}

impl FromIterator<MemoryBank> for BankSet {
    fn from_iter<I: IntoIterator<Item = MemoryBank>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, bank| set.with(bank))
    }
}

/// Per-bank error code reported in the lower nibble of a segment control
/// byte. 0 means success and is never wrapped in this type by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BankErrorCode(u8);

impl BankErrorCode {
    /// Command or parameter not supported.
    pub const NOT_SUPPORTED: Self = Self(0x01);
    /// Tag is not in the secured state.
    pub const INSUFFICIENT_PRIVILEGES: Self = Self(0x02);
    /// Read ran past the end of the bank.
    pub const MEMORY_OVERRUN: Self = Self(0x03);
    /// Bank is read-locked.
    pub const MEMORY_LOCKED: Self = Self(0x04);
    /// Tag lacks power to complete the operation.
    pub const INSUFFICIENT_POWER: Self = Self(0x0B);
    /// Tag does not report a specific reason.
    pub const NON_SPECIFIC: Self = Self(0x0F);

    /// Wrap a code; only the low nibble is kept.
    pub const fn new(code: u8) -> Self {
        Self(code & crate::constants::BANK_ERROR_MASK)
    }

    /// Raw code.
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Gen2 tag error code meaning.
    pub fn description(&self) -> &'static str {
        match self.0 {
            0x00 => "other error",
            0x01 => "not supported",
            0x02 => "insufficient privileges",
            0x03 => "memory overrun",
            0x04 => "memory locked",
            0x05 => "crypto suite error",
            0x06 => "command not encapsulated",
            0x07 => "response buffer overflow",
            0x08 => "security timeout",
            0x0B => "insufficient power",
            0x0F => "non-specific error",
            _ => "reserved error code",
        }
    }
}

impl fmt::Display for BankErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x} ({})", self.0, self.description())
    }
}

/// Reader antenna port. Ports are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "{}", _0)]
pub struct AntennaId(u8);

impl AntennaId {
    /// Port number; 0 is rejected.
    pub fn new(port: u8) -> Result<Self> {
        if port == 0 {
            return Err(Error::InvalidAntenna("antenna ports start at 1".into()));
        }
        Ok(Self(port))
    }

    /// Port number.
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for AntennaId {
    type Error = Error;

    fn try_from(port: u8) -> Result<Self> {
        Self::new(port)
    }
}

impl FromStr for AntennaId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let port = token.parse::<u8>().map_err(|_| {
            Error::InvalidAntenna(format!(
                "can't parse '{}' as an 8-bit unsigned integer value",
                token
            ))
        })?;
        Self::new(port)
    }
}

/// Air protocol a read plan targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagProtocol {
    /// EPC Class 1 Gen2, the only protocol with bank reads.
    #[default]
    #[display(fmt = "GEN2")]
    Gen2,
    /// ISO 18000-6B.
    #[display(fmt = "ISO18000-6B")]
    Iso180006b,
}

/// Tag identifier as reported by the reader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epc(Vec<u8>);

impl Epc {
    /// Wrap identifier bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Identifier bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an empty identifier.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex rendering, as used by `Display`.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl From<&[u8]> for Epc {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for Epc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
