// gen2bank/src/lib.rs

//! gen2bank
//!
//! Read planning and multi-bank response decoding for Gen2 UHF RFID
//! readers. Compose a read plan, run it embedded in a population scan or
//! standalone against one tag, and decode the packed per-bank results.
#![warn(missing_docs)]

pub mod constants;
/// Crate, per-bank and per-tag error types.
pub mod error;
pub mod executor;
pub mod plan;
/// Common imports.
pub mod prelude;
pub mod protocol;
pub mod reader;
pub mod tag;
pub mod test_support;
/// Bank, antenna, protocol and identifier newtypes.
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
