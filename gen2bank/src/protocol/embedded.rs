// gen2bank/src/protocol/embedded.rs

use crate::constants::{EMBEDDED_FAILURE_PAYLOAD_LEN, EMBEDDED_OP_FAILED};
use crate::protocol::parser;
use crate::Result;

/// What a tag read carries from its embedded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedData<'a> {
    /// No operation output was attached to this tag.
    Empty,
    /// Operation output, to be decoded as bank data.
    Data(&'a [u8]),
    /// The operation failed on this tag; `code` is the reader status.
    Failed {
        /// Reader status code.
        code: u16,
    },
    /// The failure flag was set but the payload is not a 2-byte code.
    Malformed {
        /// Payload size in bytes.
        len: usize,
    },
}

/// Classify an embedded payload by its declared length.
///
/// The top bit of `declared_len` marks a failed operation whose payload is a
/// big-endian 16-bit code. Otherwise `declared_len` is the number of valid
/// bytes in `bytes`; a declaration longer than the payload is a truncation.
pub fn classify_embedded(declared_len: u16, bytes: &[u8]) -> Result<EmbeddedData<'_>> {
    if declared_len & EMBEDDED_OP_FAILED != 0 {
        if bytes.len() != EMBEDDED_FAILURE_PAYLOAD_LEN {
            return Ok(EmbeddedData::Malformed { len: bytes.len() });
        }
        let code = parser::be_u16_at(bytes, 0)?;
        return Ok(EmbeddedData::Failed { code });
    }

    let len = usize::from(declared_len);
    if len == 0 {
        return Ok(EmbeddedData::Empty);
    }
    Ok(EmbeddedData::Data(parser::slice_at(bytes, 0, len)?))
}
