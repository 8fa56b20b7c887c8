// gen2bank/src/protocol/segment.rs

use crate::constants::{
    BANK_ERROR_MASK, BANK_ID_MASK, BANK_ID_SHIFT, BYTES_PER_WORD, MAX_SEGMENT_WORDS,
    SEGMENT_HEADER_LEN,
};
use crate::error::BankFault;
use crate::protocol::parser;
use crate::types::{BankErrorCode, MemoryBank};
use crate::{Error, Result};

/// Highest bank id that fits the control byte when encoding.
const MAX_ENCODABLE_ID: u8 = 0x0F;

/// One decoded bank segment: the raw bank id and either the bank's data or
/// the reason it has none.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BankSegment {
    id: u8,
    outcome: std::result::Result<Vec<u8>, BankFault>,
}

impl BankSegment {
    /// Successful read of `bank` carrying `data`.
    pub fn success(bank: MemoryBank, data: Vec<u8>) -> Self {
        Self {
            id: bank.id(),
            outcome: Ok(data),
        }
    }

    /// Bank the tag reported an error code for.
    pub fn failed(bank: MemoryBank, code: BankErrorCode) -> Self {
        Self {
            id: bank.id(),
            outcome: Err(BankFault::Tag { bank, code }),
        }
    }

    /// Segment whose id is not a Gen2 bank.
    pub fn unknown(id: u8) -> Self {
        Self {
            id,
            outcome: Err(BankFault::UnknownBank { id }),
        }
    }

    /// Bank id as it appeared on the wire.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// The Gen2 bank, or `None` for an unrecognized id.
    pub fn bank(&self) -> Option<MemoryBank> {
        MemoryBank::from_id(self.id)
    }

    /// Data on success, the fault otherwise.
    pub fn outcome(&self) -> &std::result::Result<Vec<u8>, BankFault> {
        &self.outcome
    }

    /// Consume the segment into its outcome.
    pub fn into_outcome(self) -> std::result::Result<Vec<u8>, BankFault> {
        self.outcome
    }

    /// Bank data on success. An empty slice is a legitimately empty bank,
    /// not a failure.
    pub fn data(&self) -> Option<&[u8]> {
        self.outcome.as_ref().ok().map(Vec::as_slice)
    }

    /// The fault, if the bank has no data.
    pub fn fault(&self) -> Option<&BankFault> {
        self.outcome.as_ref().err()
    }

    /// Append this segment in packed form. Faults are written header-only;
    /// an unknown bank is written as an empty successful segment so that it
    /// decodes back to the same unknown id.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.id > MAX_ENCODABLE_ID {
            return Err(Error::InvalidRequest(format!(
                "bank id {:#04x} does not fit a control byte",
                self.id
            )));
        }
        let bank_bits = self.id << BANK_ID_SHIFT;

        match &self.outcome {
            Ok(data) => {
                if data.len() % BYTES_PER_WORD != 0 {
                    return Err(Error::InvalidRequest(format!(
                        "bank data of {} bytes is not whole words",
                        data.len()
                    )));
                }
                let words = data.len() / BYTES_PER_WORD;
                if words > MAX_SEGMENT_WORDS {
                    return Err(Error::InvalidRequest(format!(
                        "{} words exceed one segment",
                        words
                    )));
                }
                out.push(bank_bits);
                out.push(words as u8);
                out.extend_from_slice(data);
            }
            Err(BankFault::Tag { code, .. }) => {
                if code.as_u8() == 0 {
                    return Err(Error::InvalidRequest(
                        "error code 0 is reserved for success".into(),
                    ));
                }
                out.push(bank_bits | code.as_u8());
                out.push(0);
            }
            Err(BankFault::UnknownBank { .. }) => {
                out.push(bank_bits);
                out.push(0);
            }
        }
        Ok(())
    }
}

/// Decode exactly one segment starting at `cursor` and return it together
/// with the cursor of the next segment.
///
/// Layout: control(1) + length_in_words(1) + data(length * 2). The bank id is
/// `(control >> 4) & 0x1F`, the error code `control & 0x0F`. A segment with
/// a non-zero error code has no data: its length byte is ignored and only the
/// header is consumed. Unknown bank ids are consumed with the same rules so
/// the following segments stay aligned.
pub fn decode_segment(data: &[u8], cursor: usize) -> Result<(BankSegment, usize)> {
    parser::ensure_remaining(data, cursor, SEGMENT_HEADER_LEN)?;

    let control = parser::byte_at(data, cursor)?;
    let id = (control >> BANK_ID_SHIFT) & BANK_ID_MASK;
    let code = control & BANK_ERROR_MASK;
    let body = cursor + SEGMENT_HEADER_LEN;
    let bank = MemoryBank::from_id(id);

    if code != 0 {
        let segment = match bank {
            Some(bank) => BankSegment::failed(bank, BankErrorCode::new(code)),
            None => BankSegment::unknown(id),
        };
        return Ok((segment, body));
    }

    let declared = parser::byte_at(data, cursor + 1)? as usize * BYTES_PER_WORD;
    parser::ensure_remaining(data, cursor, SEGMENT_HEADER_LEN + declared)
        .map_err(|e| with_bank_id(e, id))?;
    let bytes = parser::slice_at(data, body, declared)?;

    let segment = match bank {
        Some(bank) => BankSegment::success(bank, bytes.to_vec()),
        None => BankSegment::unknown(id),
    };
    Ok((segment, body + declared))
}

fn with_bank_id(err: Error, id: u8) -> Error {
    match err {
        Error::TruncatedSegment {
            offset,
            needed,
            available,
            ..
        } => Error::TruncatedSegment {
            offset,
            needed,
            available,
            bank_id: Some(id),
        },
        other => other,
    }
}
