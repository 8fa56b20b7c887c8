// gen2bank/src/plan/builder.rs

use crate::plan::antenna::AntennaSet;
use crate::plan::capability::CapabilityTable;
use crate::plan::config::ReadPlanConfig;
use crate::plan::filter::TagFilter;
use crate::plan::request::ReadLength;
use crate::plan::{ComposedRead, compose_read_plan};
use crate::reader::TagReader;
use crate::types::{MemoryBank, TagProtocol};
use crate::Result;

/// Fluent front end to [`compose_read_plan`].
#[derive(Debug, Clone, Default)]
pub struct ReadPlanBuilder {
    config: ReadPlanConfig,
    capabilities: CapabilityTable,
}

impl ReadPlanBuilder {
    /// Default config: single full-bank read of the user bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded config with the default capability table.
    pub fn from_config(config: ReadPlanConfig) -> Self {
        Self {
            config,
            capabilities: CapabilityTable::default(),
        }
    }

    /// Read on these ports. Validated at build time.
    pub fn antennas(mut self, ports: &[u8]) -> Self {
        self.config.antennas = Some(ports.to_vec());
        self
    }

    /// Antennas in the `"1,2"` form. The list is validated here.
    pub fn antenna_list(mut self, list: &str) -> Result<Self> {
        let set: AntennaSet = list.parse()?;
        self.config.antennas = Some(set.antennas().iter().map(|a| a.as_u8()).collect());
        Ok(self)
    }

    /// Tag protocol. Only Gen2 supports bank reads.
    pub fn protocol(mut self, protocol: TagProtocol) -> Self {
        self.config.protocol = protocol;
        self
    }

    /// Plan timeout, non-zero.
    pub fn timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.config.timeout_ms = timeout_ms;
        self
    }

    /// Restrict the read to tags matching `filter`.
    pub fn filter(mut self, filter: TagFilter) -> Self {
        self.config.filter = Some(filter);
        self
    }

    /// Single-bank read of `bank`.
    pub fn read_bank(mut self, bank: MemoryBank) -> Self {
        self.config.primary_bank = bank;
        self.config.banks.clear();
        self
    }

    /// Multi-bank read of `banks`, with `primary` as the active bank.
    pub fn read_banks(mut self, primary: MemoryBank, banks: &[MemoryBank]) -> Self {
        self.config.primary_bank = primary;
        self.config.banks = banks.to_vec();
        self
    }

    /// First word read in each bank.
    pub fn word_offset(mut self, word_offset: u32) -> Self {
        self.config.word_offset = word_offset;
        self
    }

    /// Words to read per bank.
    pub fn read_length(mut self, length: ReadLength) -> Self {
        self.config.read_length = length;
        self
    }

    /// Replace the full-bank capability table.
    pub fn capabilities(mut self, capabilities: CapabilityTable) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// The config as built so far.
    pub fn config(&self) -> &ReadPlanConfig {
        &self.config
    }

    /// Validate the configuration and probe `reader` if needed.
    pub fn build<R: TagReader + ?Sized>(self, reader: &mut R) -> Result<ComposedRead> {
        compose_read_plan(&self.config, &self.capabilities, reader)
    }
}
