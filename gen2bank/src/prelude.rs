// gen2bank/src/prelude.rs

pub use crate::executor::{EmbeddedExecutor, StandaloneExecutor, run_embedded, run_standalone};
pub use crate::plan::{
    AntennaSet, BankRequest, CapabilityTable, ComposedRead, ReadLength, ReadPlan, ReadPlanBuilder,
    ReadPlanConfig, SelectFilter, TagFilter, compose_read_plan,
};
pub use crate::protocol::{BankSegment, DecodedBankResult, decode_bank_response, decode_multi_bank};
pub use crate::reader::TagReader;
pub use crate::tag::TagRecord;
pub use crate::{
    AntennaId, BankErrorCode, BankFault, BankSet, Epc, Error, MemoryBank, Result, TagOpError,
    TagProtocol,
};

// Re-export small utilities for convenience
pub use crate::utils::{DEFAULT_PLAN_TIMEOUT_MS, DEFAULT_SCAN_TIMEOUT_MS, bytes_to_hex, parse_hex};
