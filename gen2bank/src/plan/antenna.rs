// gen2bank/src/plan/antenna.rs

use std::str::FromStr;

use crate::types::AntennaId;
use crate::{Error, Result};

/// Antennas a plan reads on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AntennaSet {
    /// Whatever the reader is configured to use.
    #[default]
    DeviceDefault,
    /// Caller-chosen ports, in order, without duplicates.
    Explicit(Vec<AntennaId>),
}

impl AntennaSet {
    /// Validate raw port numbers into an explicit set.
    pub fn explicit(ports: &[u8]) -> Result<Self> {
        let ids = ports
            .iter()
            .map(|&p| AntennaId::new(p))
            .collect::<Result<Vec<_>>>()?;
        Self::from_ids(ids)
    }

    /// Explicit set from validated ids. Empty and repeated lists fail.
    pub fn from_ids(ids: Vec<AntennaId>) -> Result<Self> {
        if ids.is_empty() {
            return Err(Error::InvalidAntenna("empty antenna list".into()));
        }
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) {
                return Err(Error::DuplicateAntenna { antenna: *id });
            }
        }
        Ok(Self::Explicit(ids))
    }

    /// True for [`AntennaSet::DeviceDefault`].
    pub fn is_device_default(&self) -> bool {
        matches!(self, Self::DeviceDefault)
    }

    /// Explicit ports; empty for the device default.
    pub fn antennas(&self) -> &[AntennaId] {
        match self {
            Self::DeviceDefault => &[],
            Self::Explicit(ids) => ids,
        }
    }

    /// First explicit port.
    pub fn first(&self) -> Option<AntennaId> {
        self.antennas().first().copied()
    }

    /// Whether a tag seen on `antenna` belongs to this set. Tags with no
    /// antenna information, and the device default set, always match.
    pub fn includes(&self, antenna: Option<AntennaId>) -> bool {
        match (self, antenna) {
            (Self::DeviceDefault, _) | (_, None) => true,
            (Self::Explicit(ids), Some(a)) => ids.contains(&a),
        }
    }
}

/// Parses the comma separated form used on reader command lines: `"1,2"`.
impl FromStr for AntennaSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(Error::InvalidAntenna("missing antenna list".into()));
        }
        let ids = s
            .split(',')
            .map(AntennaId::from_str)
            .collect::<Result<Vec<_>>>()?;
        Self::from_ids(ids)
    }
}
