// gen2bank/src/protocol/multibank.rs

use crate::error::BankFault;
use crate::protocol::segment::{BankSegment, decode_segment};
use crate::types::MemoryBank;
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Per-bank results of one read-data response, in the order the segments
/// appeared on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DecodedBankResult {
    segments: Vec<BankSegment>,
}

impl DecodedBankResult {
    /// Build a result from segments. A bank id may appear only once.
    pub fn from_segments(segments: Vec<BankSegment>) -> Result<Self> {
        let mut out = Self::default();
        for segment in segments {
            out.push(segment, 0)?;
        }
        Ok(out)
    }

    /// Result of a single-bank read: the raw data of that bank.
    pub fn single(bank: MemoryBank, data: Vec<u8>) -> Self {
        Self {
            segments: vec![BankSegment::success(bank, data)],
        }
    }

    fn push(&mut self, segment: BankSegment, offset: usize) -> Result<()> {
        if self.segments.iter().any(|s| s.id() == segment.id()) {
            return Err(Error::DuplicateBank {
                id: segment.id(),
                offset,
            });
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Outcome for `bank`, or `None` if the response had no segment for it.
    pub fn get(&self, bank: MemoryBank) -> Option<&std::result::Result<Vec<u8>, BankFault>> {
        self.segment(bank).map(BankSegment::outcome)
    }

    /// Segment for `bank`.
    pub fn segment(&self, bank: MemoryBank) -> Option<&BankSegment> {
        self.segments.iter().find(|s| s.bank() == Some(bank))
    }

    /// Data of `bank` if it was read successfully.
    pub fn data(&self, bank: MemoryBank) -> Option<&[u8]> {
        self.segment(bank).and_then(BankSegment::data)
    }

    /// Fault reported for `bank`.
    pub fn fault(&self, bank: MemoryBank) -> Option<&BankFault> {
        self.segment(bank).and_then(BankSegment::fault)
    }

    /// True if the response carried a segment for `bank`, failed or not.
    pub fn contains(&self, bank: MemoryBank) -> bool {
        self.segment(bank).is_some()
    }

    /// Known banks present, in wire order.
    pub fn banks(&self) -> impl Iterator<Item = MemoryBank> + '_ {
        self.segments.iter().filter_map(BankSegment::bank)
    }

    /// All segments, unknown ids included.
    pub fn segments(&self) -> &[BankSegment] {
        &self.segments
    }

    /// Iterate the segments in wire order.
    pub fn iter(&self) -> std::slice::Iter<'_, BankSegment> {
        self.segments.iter()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if no segment was decoded.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Keep only the segments for which `keep` returns true.
    pub(crate) fn retain(&mut self, keep: impl FnMut(&BankSegment) -> bool) {
        self.segments.retain(keep);
    }

    /// Encode back into the packed layout, segment order preserved.
    pub fn to_packed(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for segment in &self.segments {
            segment.encode_into(&mut out)?;
        }
        Ok(out)
    }
}

impl IntoIterator for DecodedBankResult {
    type Item = BankSegment;
    type IntoIter = std::vec::IntoIter<BankSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecodedBankResult {
    type Item = &'a BankSegment;
    type IntoIter = std::slice::Iter<'a, BankSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Decode a whole packed response.
///
/// Segments are decoded back to back until the end of `data`. Any structural
/// problem (a header or body running past the end, a bank reported twice)
/// fails the whole call; a partially filled result is never returned.
pub fn decode_multi_bank(data: &[u8]) -> Result<DecodedBankResult> {
    let mut result = DecodedBankResult::default();
    let mut cursor = 0usize;

    while cursor < data.len() {
        let (segment, next) = decode_segment(data, cursor)?;
        log::trace!(
            "segment at {}: bank id {:#04x}, {}",
            cursor,
            segment.id(),
            match segment.outcome() {
                Ok(bytes) => format!("{} bytes [{}]", bytes.len(), bytes_to_hex_spaced(bytes)),
                Err(fault) => fault.to_string(),
            }
        );
        result.push(segment, cursor)?;
        cursor = next;
    }

    Ok(result)
}
