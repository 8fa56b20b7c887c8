//! Small helpers used across the crate: hex rendering for EPCs and bank
//! data, and the default timeouts used by read plans and scans.

pub mod hex;
pub mod timeout;

pub use self::hex::*;
pub use self::timeout::*;
