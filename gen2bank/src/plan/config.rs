// gen2bank/src/plan/config.rs

use crate::plan::filter::TagFilter;
use crate::plan::request::ReadLength;
use crate::types::{MemoryBank, TagProtocol};
use crate::utils::DEFAULT_PLAN_TIMEOUT_MS;

/// Plain description of a read plan, before validation and the capability
/// probe. Every field has a default, so a partial config file is enough.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReadPlanConfig {
    /// Antenna ports; `None` uses the reader's own configuration.
    pub antennas: Option<Vec<u8>>,
    /// Tag protocol; must be Gen2.
    pub protocol: TagProtocol,
    /// Per-operation timeout, non-zero.
    pub timeout_ms: u32,
    /// Tags the plan and operation apply to; `None` for all.
    pub filter: Option<TagFilter>,
    /// Bank whose data a single-bank read returns.
    pub primary_bank: MemoryBank,
    /// Banks enabled for a multi-bank read. Empty means single-bank.
    pub banks: Vec<MemoryBank>,
    /// First word read in each bank.
    pub word_offset: u32,
    /// Words to read per bank.
    pub read_length: ReadLength,
}

impl Default for ReadPlanConfig {
    fn default() -> Self {
        Self {
            antennas: None,
            protocol: TagProtocol::Gen2,
            timeout_ms: DEFAULT_PLAN_TIMEOUT_MS,
            filter: None,
            primary_bank: MemoryBank::User,
            banks: Vec::new(),
            word_offset: 0,
            read_length: ReadLength::FullBank,
        }
    }
}
