// gen2bank/src/plan/filter.rs

use crate::types::{Epc, MemoryBank};
use crate::{Error, Result};

/// Gen2 select filter: compares `bit_length` bits of `bank`, starting at
/// `bit_pointer`, against the leading bits of `mask`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSelectFilter"))]
pub struct SelectFilter {
    bank: MemoryBank,
    bit_pointer: u32,
    bit_length: u16,
    mask: Vec<u8>,
    invert: bool,
}

/// Field-for-field form of [`SelectFilter`] as read from a config file.
/// Every deserialized filter passes through [`SelectFilter::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSelectFilter {
    bank: MemoryBank,
    bit_pointer: u32,
    bit_length: u16,
    mask: Vec<u8>,
    #[serde(default)]
    invert: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSelectFilter> for SelectFilter {
    type Error = Error;

    fn try_from(raw: RawSelectFilter) -> Result<Self> {
        let filter = SelectFilter::new(raw.bank, raw.bit_pointer, raw.bit_length, raw.mask)?;
        Ok(if raw.invert { filter.inverted() } else { filter })
    }
}

impl SelectFilter {
    /// Fails with [`Error::InvalidFilter`] when `mask` holds fewer than
    /// `bit_length` bits.
    pub fn new(bank: MemoryBank, bit_pointer: u32, bit_length: u16, mask: Vec<u8>) -> Result<Self> {
        let mask_bits = mask.len() * 8;
        if mask_bits < usize::from(bit_length) {
            return Err(Error::InvalidFilter(format!(
                "mask holds {} bits, filter compares {}",
                mask_bits, bit_length
            )));
        }
        Ok(Self {
            bank,
            bit_pointer,
            bit_length,
            mask,
            invert: false,
        })
    }

    /// Select tags whose bits differ from the mask instead.
    pub fn inverted(mut self) -> Self {
        self.invert = true;
        self
    }

    /// Bank the filter compares against.
    pub fn bank(&self) -> MemoryBank {
        self.bank
    }

    /// First compared bit, counted MSB-first from the start of the bank.
    pub fn bit_pointer(&self) -> u32 {
        self.bit_pointer
    }

    /// Number of compared bits.
    pub fn bit_length(&self) -> u16 {
        self.bit_length
    }

    /// Expected bit pattern; only its leading `bit_length` bits count.
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// True when the filter selects non-matching tags.
    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    /// Apply the filter to the contents of its bank. Memory too short to
    /// hold the compared range never equals the mask.
    pub fn matches(&self, bank_bytes: &[u8]) -> bool {
        self.bits_equal(bank_bytes) != self.invert
    }

    fn bits_equal(&self, memory: &[u8]) -> bool {
        let start = self.bit_pointer as usize;
        let len = usize::from(self.bit_length);
        if len > self.mask.len() * 8 || start + len > memory.len() * 8 {
            return false;
        }
        (0..len).all(|i| bit_at(memory, start + i) == bit_at(&self.mask, i))
    }
}

/// MSB-first bit addressing, as Gen2 memory is addressed.
fn bit_at(bytes: &[u8], idx: usize) -> bool {
    (bytes[idx / 8] >> (7 - idx % 8)) & 1 == 1
}

/// Predicate choosing which tags a plan or operation applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagFilter {
    /// Bit-range comparison on one memory bank.
    Select(SelectFilter),
    /// One specific tag, by identifier.
    Epc(Epc),
}

impl TagFilter {
    /// Non-inverted select filter; see [`SelectFilter::new`].
    pub fn select(bank: MemoryBank, bit_pointer: u32, bit_length: u16, mask: Vec<u8>) -> Result<Self> {
        SelectFilter::new(bank, bit_pointer, bit_length, mask).map(Self::Select)
    }

    /// Select filter that matches tags whose bits differ from `mask`.
    pub fn select_inverted(
        bank: MemoryBank,
        bit_pointer: u32,
        bit_length: u16,
        mask: Vec<u8>,
    ) -> Result<Self> {
        SelectFilter::new(bank, bit_pointer, bit_length, mask).map(|f| Self::Select(f.inverted()))
    }

    /// Select filter with the mask given as hex, e.g. `"E2801105"`.
    pub fn select_hex(bank: MemoryBank, bit_pointer: u32, bit_length: u16, mask: &str) -> Result<Self> {
        let mask = crate::utils::parse_hex(mask).map_err(Error::InvalidFilter)?;
        Self::select(bank, bit_pointer, bit_length, mask)
    }

    /// Filter on one tag identifier.
    pub fn epc(epc: Epc) -> Self {
        Self::Epc(epc)
    }

    /// Polarity of the filter. EPC filters are never inverted.
    pub fn is_inverted(&self) -> bool {
        match self {
            Self::Select(f) => f.is_inverted(),
            Self::Epc(_) => false,
        }
    }

    /// Evaluate the filter against one tag. `bank_bytes` returns the
    /// contents of a bank of that tag.
    pub fn matches<'a>(&self, epc: &Epc, bank_bytes: impl Fn(MemoryBank) -> &'a [u8]) -> bool {
        match self {
            Self::Select(f) => f.matches(bank_bytes(f.bank())),
            Self::Epc(wanted) => wanted == epc,
        }
    }
}
