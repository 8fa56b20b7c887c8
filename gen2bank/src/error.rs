// gen2bank/src/error.rs

use thiserror::Error;

use crate::types::{AntennaId, BankErrorCode, Epc, MemoryBank};

/// Common error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A segment header or body runs past the end of the buffer.
    /// `bank_id` is `None` when the header itself is cut short.
    #[error(
        "truncated segment{} at offset {offset}: need {needed} bytes, {available} remain",
        bank_context(.bank_id)
    )]
    TruncatedSegment {
        /// Start of the segment.
        offset: usize,
        /// Bytes the segment declares, header included.
        needed: usize,
        /// Bytes left from `offset`.
        available: usize,
        /// Bank id from the control byte.
        bank_id: Option<u8>,
    },

    /// The same bank id was decoded twice in one response.
    #[error("bank id {id:#04x} appears twice (second segment at offset {offset})")]
    DuplicateBank {
        /// Repeated bank id.
        id: u8,
        /// Offset of the second segment.
        offset: usize,
    },

    /// A requested bank has no segment in the response.
    #[error("requested {bank} bank missing from response")]
    MissingBank {
        /// The bank with no segment.
        bank: MemoryBank,
    },

    /// The caller's response buffer is too small for the reply.
    #[error("response needs {required} bytes but buffer holds {capacity}")]
    OutOfMemory {
        /// Size of the reply.
        required: usize,
        /// Size of the caller's buffer.
        capacity: usize,
    },

    /// The reader did not finish within the plan timeout.
    #[error("operation timed out")]
    Timeout,

    /// Any other reader-side failure.
    #[error("device fault: {0}")]
    DeviceFault(String),

    /// The reader's tag buffer filled up during a scan.
    #[error("tag id buffer full")]
    TagIdBufferFull,

    /// A standalone operation found no tag to act on.
    #[error("no tag matched the operation filter")]
    NoTagFound,

    /// A standalone operation failed on the tag with a reader status code.
    #[error("tag operation failed: code={code:#06x}")]
    TagOperationFailed {
        /// Reader status code.
        code: u16,
    },

    /// Antenna port 0, or an unparsable antenna list.
    #[error("invalid antenna: {0}")]
    InvalidAntenna(String),

    /// An explicit antenna list names the same port twice.
    #[error("antenna {antenna} listed more than once")]
    DuplicateAntenna {
        /// The repeated port.
        antenna: AntennaId,
    },

    /// Rejected plan or operation parameters.
    #[error("invalid read request: {0}")]
    InvalidRequest(String),

    /// A filter whose mask cannot cover its bit length, or bad mask hex.
    #[error("invalid tag filter: {0}")]
    InvalidFilter(String),

    /// The reader cannot perform the requested operation.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// Result alias with the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

fn bank_context(bank_id: &Option<u8>) -> String {
    match bank_id {
        Some(id) => format!(" (bank id {:#04x})", id),
        None => String::new(),
    }
}

/// Failure of one bank inside an otherwise well-formed response.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BankFault {
    /// The tag reported an error code for a known bank.
    #[error("{bank} bank read failed: {code}")]
    Tag {
        /// Failed bank.
        bank: MemoryBank,
        /// Gen2 tag error code.
        code: BankErrorCode,
    },

    /// The segment carried a bank id outside the Gen2 banks.
    #[error("unknown bank id {id:#04x}")]
    UnknownBank {
        /// Id from the control byte.
        id: u8,
    },
}

/// Failure of the embedded operation for one tag seen during a scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagOpError {
    /// The reader flagged the operation as failed and supplied a code.
    #[error("embedded operation failed on tag {epc}: code={code:#06x}")]
    OperationFailed {
        /// Tag identifier.
        epc: Epc,
        /// Reader status code.
        code: u16,
    },

    /// The failure flag was set but the payload was not a 2-byte code.
    #[error("malformed failure payload on tag {epc}: {len} bytes")]
    MalformedPayload {
        /// Tag identifier.
        epc: Epc,
        /// Payload size in bytes.
        len: usize,
    },

    /// The bank data returned for the tag did not decode.
    #[error("bank data of tag {epc} could not be decoded: {source}")]
    Decode {
        /// Tag identifier.
        epc: Epc,
        /// Structural decode error.
        #[source]
        source: Error,
    },
}

impl TagOpError {
    /// Identifier of the tag this failure belongs to.
    pub fn epc(&self) -> &Epc {
        match self {
            TagOpError::OperationFailed { epc, .. }
            | TagOpError::MalformedPayload { epc, .. }
            | TagOpError::Decode { epc, .. } => epc,
        }
    }
}
