// gen2bank/src/reader/traits.rs

use crate::constants::EMBEDDED_OP_FAILED;
use crate::plan::{BankRequest, ReadPlan, TagFilter};
use crate::protocol::{EmbeddedData, classify_embedded};
use crate::types::{AntennaId, Epc};
use crate::Result;

/// Blocking calls into an RFID reader. Timeouts and cancellation are the
/// implementation's concern.
pub trait TagReader {
    /// Model identifier, e.g. `"M6e Micro"`.
    fn query_device_model(&mut self) -> Result<String>;

    /// Install a plan, optionally with an operation to run on every tag
    /// found and a filter restricting which tags are reported.
    fn commit_read_plan(
        &mut self,
        plan: &ReadPlan,
        operation: Option<&BankRequest>,
        filter: Option<&TagFilter>,
    ) -> Result<()>;

    /// Run one population scan with the committed plan.
    ///
    /// `Err(Error::TagIdBufferFull)` means more tags were seen than the
    /// reader could buffer; the buffered tags are still available through
    /// [`next_tag_record`](Self::next_tag_record).
    fn begin_population_scan(&mut self, timeout_ms: u32) -> Result<()>;

    /// Next buffered tag of the last scan, `None` once drained.
    fn next_tag_record(&mut self) -> Result<Option<RawTagRead>>;

    /// Run `operation` on one tag and write the response into `out`,
    /// returning the number of bytes written. A response larger than
    /// `out` fails with `Error::OutOfMemory`.
    fn execute_read_operation(
        &mut self,
        plan: &ReadPlan,
        operation: &BankRequest,
        filter: Option<&TagFilter>,
        out: &mut [u8],
    ) -> Result<usize>;
}

impl<T: TagReader + ?Sized> TagReader for Box<T> {
    fn query_device_model(&mut self) -> Result<String> {
        (**self).query_device_model()
    }

    fn commit_read_plan(
        &mut self,
        plan: &ReadPlan,
        operation: Option<&BankRequest>,
        filter: Option<&TagFilter>,
    ) -> Result<()> {
        (**self).commit_read_plan(plan, operation, filter)
    }

    fn begin_population_scan(&mut self, timeout_ms: u32) -> Result<()> {
        (**self).begin_population_scan(timeout_ms)
    }

    fn next_tag_record(&mut self) -> Result<Option<RawTagRead>> {
        (**self).next_tag_record()
    }

    fn execute_read_operation(
        &mut self,
        plan: &ReadPlan,
        operation: &BankRequest,
        filter: Option<&TagFilter>,
        out: &mut [u8],
    ) -> Result<usize> {
        (**self).execute_read_operation(plan, operation, filter, out)
    }
}

/// Output of the embedded operation attached to one tag read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbeddedPayload {
    /// Byte count, or [`EMBEDDED_OP_FAILED`] plus flags on failure.
    pub declared_len: u16,
    /// Payload as received.
    pub bytes: Vec<u8>,
}

impl EmbeddedPayload {
    /// No embedded operation output.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Successful output. Lengths beyond 0x7FFF cannot be declared.
    pub fn data(bytes: Vec<u8>) -> Result<Self> {
        let declared_len = u16::try_from(bytes.len())
            .ok()
            .filter(|len| len & EMBEDDED_OP_FAILED == 0)
            .ok_or_else(|| {
                crate::Error::InvalidRequest(format!(
                    "embedded payload of {} bytes is too long",
                    bytes.len()
                ))
            })?;
        Ok(Self {
            declared_len,
            bytes,
        })
    }

    /// The operation failed with reader status `code`.
    pub fn failed(code: u16) -> Self {
        Self {
            declared_len: EMBEDDED_OP_FAILED,
            bytes: code.to_be_bytes().to_vec(),
        }
    }

    /// See [`classify_embedded`].
    pub fn classify(&self) -> Result<EmbeddedData<'_>> {
        classify_embedded(self.declared_len, &self.bytes)
    }
}

/// One tag as buffered by the reader during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTagRead {
    /// Tag identifier.
    pub epc: Epc,
    /// Antenna the tag was seen on, when the reader reports it.
    pub antenna: Option<AntennaId>,
    /// Embedded operation output.
    pub payload: EmbeddedPayload,
}

impl RawTagRead {
    /// Bundle one buffered tag.
    pub fn new(epc: Epc, antenna: Option<AntennaId>, payload: EmbeddedPayload) -> Self {
        Self {
            epc,
            antenna,
            payload,
        }
    }
}
