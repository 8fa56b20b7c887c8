//! Running a composed read against a reader.
//!
//! The embedded path binds the bank read to the plan so the reader runs it
//! on every tag it finds; the standalone path runs it once against a single
//! tag. Both decode through [`decode_bank_response`](crate::protocol::decode_bank_response).

/// Bank reads bound to a population scan.
pub mod embedded;
/// One-shot bank reads against a single tag.
pub mod standalone;

pub use embedded::{EmbeddedExecutor, Idle, PlanCommitted, Scan, decode_tag_read, run_embedded};
pub use standalone::{StandaloneExecutor, run_standalone};
