// gen2bank/src/protocol/mod.rs
//! Pure decoders for the packed multi-bank response layout.
//!
//! Nothing in this module performs I/O or keeps state between calls; every
//! decode owns its cursor and output, so decoders can run on any thread as
//! long as each call gets its own buffer.

/// Classification of a tag's embedded operation output.
pub mod embedded;
/// Whole-response decoding.
pub mod multibank;
/// Bounds-checked byte access.
pub mod parser;
/// Request-aware decoding shared by both executors.
pub mod response;
/// Single segment layout.
pub mod segment;

pub use embedded::{EmbeddedData, classify_embedded};
pub use multibank::{DecodedBankResult, decode_multi_bank};
pub use response::decode_bank_response;
pub use segment::{BankSegment, decode_segment};
