//! Default timeouts, in milliseconds, as used by the reader samples.

/// Per-operation timeout carried by a read plan.
pub const DEFAULT_PLAN_TIMEOUT_MS: u32 = 1000;

/// Duration of one population scan.
pub const DEFAULT_SCAN_TIMEOUT_MS: u32 = 500;
