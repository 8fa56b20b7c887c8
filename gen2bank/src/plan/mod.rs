//! Read plan composition.
//!
//! A [`ComposedRead`] bundles everything a reader needs to run a bank read:
//! the plan (antennas, protocol, timeout), the read-data operation and an
//! optional tag filter. [`compose_read_plan`] validates a
//! [`ReadPlanConfig`] and resolves the "full bank" word count by asking the
//! reader for its model.

/// Antenna selection.
pub mod antenna;
/// Fluent plan builder.
pub mod builder;
/// Per-model full-bank support.
pub mod capability;
/// Serializable plan configuration.
pub mod config;
/// Tag select filters.
pub mod filter;
/// The read-data operation.
pub mod request;

pub use antenna::AntennaSet;
pub use builder::ReadPlanBuilder;
pub use capability::CapabilityTable;
pub use config::ReadPlanConfig;
pub use filter::{SelectFilter, TagFilter};
pub use request::{BankRequest, ReadLength};

pub use crate::types::BankSet;

use crate::reader::TagReader;
use crate::types::{AntennaId, TagProtocol};
use crate::{Error, Result};

/// Where and how a reader searches for tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPlan {
    antennas: AntennaSet,
    protocol: TagProtocol,
    timeout_ms: u32,
    tagop_antenna: Option<AntennaId>,
}

impl ReadPlan {
    /// The first explicit antenna doubles as the antenna for standalone
    /// tag operations.
    pub fn new(antennas: AntennaSet, protocol: TagProtocol, timeout_ms: u32) -> Result<Self> {
        if timeout_ms == 0 {
            return Err(Error::InvalidRequest("plan timeout must be non-zero".into()));
        }
        let tagop_antenna = antennas.first();
        Ok(Self {
            antennas,
            protocol,
            timeout_ms,
            tagop_antenna,
        })
    }

    /// Antennas searched.
    pub fn antennas(&self) -> &AntennaSet {
        &self.antennas
    }

    /// Tag protocol searched for.
    pub fn protocol(&self) -> TagProtocol {
        self.protocol
    }

    /// Per-operation timeout.
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Antenna used by standalone operations, if any was chosen.
    pub fn tagop_antenna(&self) -> Option<AntennaId> {
        self.tagop_antenna
    }
}

/// Output of the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedRead {
    /// Validated plan.
    pub plan: ReadPlan,
    /// Bank read with its word count resolved.
    pub operation: BankRequest,
    /// Optional tag filter, shared by plan and operation.
    pub filter: Option<TagFilter>,
}

/// Validate `config` and build the plan, operation and filter for `reader`.
///
/// Everything that can be checked locally is checked before the reader is
/// touched. The reader's model is queried only when the config asks for
/// full-bank reads.
pub fn compose_read_plan<R: TagReader + ?Sized>(
    config: &ReadPlanConfig,
    capabilities: &CapabilityTable,
    reader: &mut R,
) -> Result<ComposedRead> {
    if config.protocol != TagProtocol::Gen2 {
        return Err(Error::UnsupportedOperation(format!(
            "bank reads are not defined for {}",
            config.protocol
        )));
    }
    if config.read_length == ReadLength::Words(0) {
        return Err(Error::InvalidRequest(
            "explicit word count must be non-zero".into(),
        ));
    }

    let antennas = match &config.antennas {
        Some(ports) => AntennaSet::explicit(ports)?,
        None => AntennaSet::DeviceDefault,
    };
    let plan = ReadPlan::new(antennas, config.protocol, config.timeout_ms)?;
    let banks: BankSet = config.banks.iter().copied().collect();

    let word_count = capabilities.resolve_word_count(reader, config.read_length)?;
    let operation = if banks.is_empty() {
        BankRequest::single(config.primary_bank, config.word_offset, word_count)
    } else {
        BankRequest::multi(config.primary_bank, banks, config.word_offset, word_count)?
    };

    log::debug!(
        "composed read: antennas={:?} selector={:#04x} offset={} words={} full_bank={} filter={}",
        plan.antennas().antennas(),
        operation.selector(),
        operation.word_offset(),
        operation.word_count(),
        operation.reads_full_bank(),
        config.filter.is_some()
    );

    Ok(ComposedRead {
        plan,
        operation,
        filter: config.filter.clone(),
    })
}
