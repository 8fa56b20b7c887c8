// gen2bank/src/reader/mock.rs

use std::collections::VecDeque;

use crate::constants::{BYTES_PER_WORD, MIN_READ_WORDS};
use crate::plan::{BankRequest, CapabilityTable, ReadPlan, TagFilter};
use crate::protocol::{BankSegment, DecodedBankResult};
use crate::reader::traits::{EmbeddedPayload, RawTagRead, TagReader};
use crate::types::{AntennaId, BankErrorCode, Epc, MemoryBank};
use crate::{Error, Result};

/// Reader status codes for Gen2 tag errors start here; the tag's own error
/// code is added to it.
pub const GEN2_TAG_ERROR_BASE: u16 = 0x0420;

/// A tag in the mock reader's field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedTag {
    /// Tag identifier.
    pub epc: Epc,
    /// Antenna the tag is seen on; `None` is seen everywhere.
    pub antenna: Option<AntennaId>,
    memory: [Vec<u8>; 4],
    faults: Vec<(MemoryBank, BankErrorCode)>,
    embedded_failure: Option<u16>,
}

impl SimulatedTag {
    /// A tag with the given identifier. The EPC bank holds the stored CRC,
    /// the PC word and the identifier, as on a real Gen2 tag.
    pub fn new(epc: &[u8]) -> Self {
        let mut tag = Self {
            epc: Epc::from(epc),
            antenna: None,
            memory: Default::default(),
            faults: Vec::new(),
            embedded_failure: None,
        };
        tag.memory[MemoryBank::Epc.id() as usize] = epc_bank(epc);
        tag
    }

    /// Replace the contents of `bank`.
    pub fn with_bank(mut self, bank: MemoryBank, data: &[u8]) -> Self {
        self.memory[bank.id() as usize] = data.to_vec();
        self
    }

    /// Every read of `bank` fails with `code`.
    pub fn with_fault(mut self, bank: MemoryBank, code: BankErrorCode) -> Self {
        self.faults.retain(|(b, _)| *b != bank);
        self.faults.push((bank, code));
        self
    }

    /// The embedded operation fails on this tag with reader status `code`.
    pub fn with_embedded_failure(mut self, code: u16) -> Self {
        self.embedded_failure = Some(code);
        self
    }

    /// Place the tag in front of antenna `port`.
    pub fn on_antenna(mut self, port: u8) -> Result<Self> {
        self.antenna = Some(AntennaId::new(port)?);
        Ok(self)
    }

    /// Contents of `bank`.
    pub fn bank(&self, bank: MemoryBank) -> &[u8] {
        &self.memory[bank.id() as usize]
    }

    fn matches(&self, filter: Option<&TagFilter>) -> bool {
        filter.is_none_or(|f| f.matches(&self.epc, |b| self.bank(b)))
    }

    fn read_words(
        &self,
        bank: MemoryBank,
        word_offset: u32,
        word_count: Option<u8>,
    ) -> std::result::Result<Vec<u8>, BankErrorCode> {
        if let Some((_, code)) = self.faults.iter().find(|(b, _)| *b == bank) {
            return Err(*code);
        }
        let memory = self.bank(bank);
        let start = word_offset as usize * BYTES_PER_WORD;
        let end = match word_count {
            Some(n) => start + usize::from(n) * BYTES_PER_WORD,
            None => memory.len(),
        };
        memory
            .get(start..end)
            .map(<[u8]>::to_vec)
            .ok_or(BankErrorCode::MEMORY_OVERRUN)
    }
}

/// CRC-16/GENIBUS over `data`, the stored CRC of a Gen2 EPC bank.
fn gen2_crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    !crc
}

fn epc_bank(epc: &[u8]) -> Vec<u8> {
    let words = epc.len().div_ceil(BYTES_PER_WORD) as u16;
    let pc = (words & 0x1F) << 11;
    let mut body = pc.to_be_bytes().to_vec();
    body.extend_from_slice(epc);
    if body.len() % BYTES_PER_WORD != 0 {
        body.push(0);
    }
    let mut bank = gen2_crc16(&body).to_be_bytes().to_vec();
    bank.extend_from_slice(&body);
    bank
}

/// Plan, operation and filter as last committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedPlan {
    /// Plan as committed.
    pub plan: ReadPlan,
    /// Embedded operation, if one was bound to the plan.
    pub operation: Option<BankRequest>,
    /// Filter sent with the plan.
    pub filter: Option<TagFilter>,
}

/// In-memory reader for unit tests. Serves simulated tags, records every
/// call and can be scripted with raw tag reads and standalone responses.
#[derive(Debug, Default)]
pub struct MockReader {
    /// Model name reported by `query_device_model`.
    pub model: String,
    /// Tags in the field.
    pub tags: Vec<SimulatedTag>,
    /// Tags buffered per scan; a scan seeing more reports a full buffer.
    pub tag_buffer_limit: Option<usize>,
    /// Order multi-bank segments are emitted in. Empty means bank order.
    pub bank_order: Vec<MemoryBank>,
    /// Raw reads served by the next scan in addition to simulated tags.
    pub scripted_reads: Vec<RawTagRead>,
    /// Responses served by standalone reads, before any simulated tag.
    pub scripted_responses: VecDeque<Result<Vec<u8>>>,
    /// Fail every model query.
    pub fail_model_query: bool,
    /// Error returned by the next scan instead of running it.
    pub fail_next_scan: Option<Error>,
    /// `(n, err)`: the n-th `next_tag_record` call of a scan (0-based)
    /// returns `err` instead of a tag. Fires once.
    pub fail_next_record: Option<(usize, Error)>,
    /// Last plan committed.
    pub committed: Option<CommittedPlan>,
    /// Number of model queries seen.
    pub model_queries: usize,
    /// Timeout of every scan started.
    pub scans: Vec<u32>,
    /// Every standalone operation executed.
    pub executed: Vec<(BankRequest, Option<TagFilter>)>,
    pending: VecDeque<RawTagRead>,
    records_served: usize,
}

impl MockReader {
    /// Empty field, reporting `model` when queried.
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..Self::default()
        }
    }

    /// Put a tag in the field.
    pub fn add_tag(&mut self, tag: SimulatedTag) {
        self.tags.push(tag);
    }

    /// Serve `read` verbatim on the next scan.
    pub fn push_tag_read(&mut self, read: RawTagRead) {
        self.scripted_reads.push(read);
    }

    /// Queue a standalone response.
    pub fn push_response(&mut self, bytes: Vec<u8>) {
        self.scripted_responses.push_back(Ok(bytes));
    }

    /// Queue a standalone failure.
    pub fn push_error(&mut self, err: Error) {
        self.scripted_responses.push_back(Err(err));
    }

    fn full_bank_on_zero(&self) -> bool {
        CapabilityTable::default().supports_full_bank_read(&self.model)
    }

    fn word_count(&self, request: &BankRequest) -> Option<u8> {
        if !request.reads_full_bank() {
            Some(request.word_count())
        } else if self.full_bank_on_zero() {
            None
        } else {
            Some(MIN_READ_WORDS)
        }
    }

    fn bank_order(&self) -> Vec<MemoryBank> {
        if self.bank_order.is_empty() {
            MemoryBank::ALL.to_vec()
        } else {
            self.bank_order.clone()
        }
    }

    /// Bytes the reader returns for `request` on `tag`, or the reader
    /// status when the whole operation fails.
    fn respond(&self, tag: &SimulatedTag, request: &BankRequest) -> std::result::Result<Vec<u8>, u16> {
        let count = self.word_count(request);
        let offset = request.word_offset();

        if !request.is_multi_bank() {
            return tag
                .read_words(request.primary(), offset, count)
                .map_err(|code| GEN2_TAG_ERROR_BASE | u16::from(code.as_u8()));
        }

        let segments = self
            .bank_order()
            .into_iter()
            .filter(|b| request.banks().contains(*b))
            .map(|bank| match tag.read_words(bank, offset, count) {
                Ok(data) => BankSegment::success(bank, data),
                Err(code) => BankSegment::failed(bank, code),
            })
            .collect::<Vec<_>>();

        DecodedBankResult::from_segments(segments)
            .and_then(|r| r.to_packed())
            .map_err(|_| GEN2_TAG_ERROR_BASE | u16::from(BankErrorCode::NON_SPECIFIC.as_u8()))
    }

    fn embedded_payload(&self, tag: &SimulatedTag, operation: Option<&BankRequest>) -> EmbeddedPayload {
        let Some(request) = operation else {
            return EmbeddedPayload::empty();
        };
        if let Some(code) = tag.embedded_failure {
            return EmbeddedPayload::failed(code);
        }
        match self.respond(tag, request) {
            Ok(bytes) => EmbeddedPayload::data(bytes).unwrap_or_else(|_| {
                EmbeddedPayload::failed(GEN2_TAG_ERROR_BASE | u16::from(BankErrorCode::NON_SPECIFIC.as_u8()))
            }),
            Err(code) => EmbeddedPayload::failed(code),
        }
    }
}

impl TagReader for MockReader {
    fn query_device_model(&mut self) -> Result<String> {
        self.model_queries += 1;
        if self.fail_model_query {
            return Err(Error::DeviceFault("model query failed".into()));
        }
        Ok(self.model.clone())
    }

    fn commit_read_plan(
        &mut self,
        plan: &ReadPlan,
        operation: Option<&BankRequest>,
        filter: Option<&TagFilter>,
    ) -> Result<()> {
        self.committed = Some(CommittedPlan {
            plan: plan.clone(),
            operation: operation.copied(),
            filter: filter.cloned(),
        });
        Ok(())
    }

    fn begin_population_scan(&mut self, timeout_ms: u32) -> Result<()> {
        let committed = self
            .committed
            .clone()
            .ok_or_else(|| Error::InvalidRequest("no read plan committed".into()))?;
        self.scans.push(timeout_ms);
        if let Some(err) = self.fail_next_scan.take() {
            self.pending.clear();
            return Err(err);
        }

        let mut seen: Vec<RawTagRead> = self
            .tags
            .iter()
            .filter(|t| committed.plan.antennas().includes(t.antenna))
            .filter(|t| t.matches(committed.filter.as_ref()))
            .map(|t| {
                RawTagRead::new(
                    t.epc.clone(),
                    t.antenna,
                    self.embedded_payload(t, committed.operation.as_ref()),
                )
            })
            .collect();
        seen.append(&mut self.scripted_reads);

        let overflow = matches!(self.tag_buffer_limit, Some(limit) if seen.len() > limit);
        if let Some(limit) = self.tag_buffer_limit {
            seen.truncate(limit);
        }
        self.pending = seen.into();
        self.records_served = 0;

        if overflow {
            Err(Error::TagIdBufferFull)
        } else {
            Ok(())
        }
    }

    fn next_tag_record(&mut self) -> Result<Option<RawTagRead>> {
        if matches!(&self.fail_next_record, Some((n, _)) if *n == self.records_served) {
            if let Some((_, err)) = self.fail_next_record.take() {
                return Err(err);
            }
        }
        let read = self.pending.pop_front();
        if read.is_some() {
            self.records_served += 1;
        }
        Ok(read)
    }

    fn execute_read_operation(
        &mut self,
        plan: &ReadPlan,
        operation: &BankRequest,
        filter: Option<&TagFilter>,
        out: &mut [u8],
    ) -> Result<usize> {
        self.executed.push((*operation, filter.cloned()));

        let bytes = match self.scripted_responses.pop_front() {
            Some(scripted) => scripted?,
            None => {
                let tag = self
                    .tags
                    .iter()
                    .filter(|t| match plan.tagop_antenna() {
                        Some(a) => t.antenna.is_none_or(|ta| ta == a),
                        None => true,
                    })
                    .find(|t| t.matches(filter))
                    .ok_or(Error::NoTagFound)?;
                self.respond(tag, operation)
                    .map_err(|code| Error::TagOperationFailed { code })?
            }
        };

        if bytes.len() > out.len() {
            return Err(Error::OutOfMemory {
                required: bytes.len(),
                capacity: out.len(),
            });
        }
        out[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}
