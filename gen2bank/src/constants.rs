// gen2bank/src/constants.rs
//! Protocol constants shared by the decoders, the composer and the executors.

/// Right shift applied to a segment control byte to obtain the bank id.
pub const BANK_ID_SHIFT: u8 = 4;

/// Mask applied after the shift; bank ids are 5 bits wide on the wire.
pub const BANK_ID_MASK: u8 = 0x1F;

/// Lower nibble of the control byte holds the per-bank error code.
pub const BANK_ERROR_MASK: u8 = 0x0F;

/// Control byte + length byte.
pub const SEGMENT_HEADER_LEN: usize = 2;

/// Lengths on the wire are counted in 16-bit words.
pub const BYTES_PER_WORD: usize = 2;

/// Largest word count a single length byte can declare.
pub const MAX_SEGMENT_WORDS: usize = u8::MAX as usize;

/// Enable flag of the reserved bank; the other banks follow at 0x08, 0x10, 0x20.
pub const BANK_ENABLE_BASE: u8 = 0x04;

/// Union of all four bank enable flags.
pub const BANK_ENABLE_FLAGS: u8 = 0x3C;

/// Top bit of an embedded payload length: the per-tag operation failed.
pub const EMBEDDED_OP_FAILED: u16 = 0x8000;

/// Size of the failure code carried by a failed embedded operation.
pub const EMBEDDED_FAILURE_PAYLOAD_LEN: usize = 2;

/// Word count that asks capable readers for the whole bank.
pub const FULL_BANK_WORD_COUNT: u8 = 0;

/// Word count substituted on readers that treat 0 as "minimum length".
pub const MIN_READ_WORDS: u8 = 2;

/// Response buffer size used by the reference samples.
pub const DEFAULT_RESPONSE_CAPACITY: usize = 258;
