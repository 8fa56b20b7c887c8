// gen2bank/src/plan/capability.rs

use crate::constants::{FULL_BANK_WORD_COUNT, MIN_READ_WORDS};
use crate::plan::request::ReadLength;
use crate::reader::TagReader;
use crate::{Error, Result};

const FULL_BANK_MODELS: [&str; 8] = [
    "M6e",
    "M6e PRC",
    "M6e Micro",
    "Mercury6",
    "Astra-EX",
    "M6e JIC",
    "Sargas",
    "Izar",
];

/// Reader models that read the whole bank when asked for 0 words. Every
/// other model treats 0 as the minimum read length.
///
/// Model names are compared exactly, as the reader reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityTable {
    full_bank_models: Vec<String>,
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::new(FULL_BANK_MODELS)
    }
}

impl CapabilityTable {
    /// Table listing exactly `models`.
    pub fn new<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            full_bank_models: models.into_iter().map(Into::into).collect(),
        }
    }

    /// A table where no model supports full-bank reads.
    pub fn empty() -> Self {
        Self {
            full_bank_models: Vec::new(),
        }
    }

    /// Add a model; duplicates are ignored.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        if !self.supports_full_bank_read(&model) {
            self.full_bank_models.push(model);
        }
        self
    }

    /// Whether `model` reads the whole bank on a word count of 0.
    pub fn supports_full_bank_read(&self, model: &str) -> bool {
        self.full_bank_models.iter().any(|m| m == model)
    }

    /// Listed models.
    pub fn models(&self) -> &[String] {
        &self.full_bank_models
    }

    /// Turn a requested length into the word count sent to `reader`.
    ///
    /// Only `FullBank` needs the reader's model; explicit counts are used
    /// as given without touching the device.
    pub fn resolve_word_count<R: TagReader + ?Sized>(
        &self,
        reader: &mut R,
        length: ReadLength,
    ) -> Result<u8> {
        match length {
            ReadLength::Words(0) => Err(Error::InvalidRequest(
                "explicit word count must be non-zero".into(),
            )),
            ReadLength::Words(n) => Ok(n),
            ReadLength::FullBank => {
                let model = reader.query_device_model()?;
                if self.supports_full_bank_read(&model) {
                    log::debug!("model '{}' reads full banks with word count 0", model);
                    Ok(FULL_BANK_WORD_COUNT)
                } else {
                    log::debug!(
                        "model '{}' has no full-bank read, using {} words",
                        model,
                        MIN_READ_WORDS
                    );
                    Ok(MIN_READ_WORDS)
                }
            }
        }
    }
}
