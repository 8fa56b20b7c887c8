// gen2bank/src/executor/embedded.rs

use crate::error::TagOpError;
use crate::plan::{BankRequest, ComposedRead};
use crate::protocol::{EmbeddedData, decode_bank_response};
use crate::reader::{RawTagRead, TagReader};
use crate::tag::TagRecord;
use crate::{Error, Result};

/// No plan committed yet.
#[derive(Debug, Default)]
pub struct Idle;

/// The reader holds a plan with an embedded bank read.
#[derive(Debug)]
pub struct PlanCommitted {
    composed: ComposedRead,
}

/// Runs embedded bank reads through population scans.
///
/// `EmbeddedExecutor<_, _, Idle>` can only commit; scanning needs a
/// committed plan. A scan borrows the executor until it is dropped or
/// drained, after which the same plan can be scanned again.
pub struct EmbeddedExecutor<'r, R: ?Sized, S> {
    reader: &'r mut R,
    state: S,
}

impl<'r, R: TagReader + ?Sized> EmbeddedExecutor<'r, R, Idle> {
    /// Wrap `reader`; nothing is sent until [`commit`](Self::commit).
    pub fn new(reader: &'r mut R) -> Self {
        Self {
            reader,
            state: Idle,
        }
    }

    /// Send the plan, its operation and filter to the reader.
    pub fn commit(self, composed: ComposedRead) -> Result<EmbeddedExecutor<'r, R, PlanCommitted>> {
        self.reader.commit_read_plan(
            &composed.plan,
            Some(&composed.operation),
            composed.filter.as_ref(),
        )?;
        log::debug!(
            "committed embedded read: selector={:#04x} words={} filter={}",
            composed.operation.selector(),
            composed.operation.word_count(),
            composed.filter.is_some()
        );
        Ok(EmbeddedExecutor {
            reader: self.reader,
            state: PlanCommitted { composed },
        })
    }
}

impl<'r, R: TagReader + ?Sized> EmbeddedExecutor<'r, R, PlanCommitted> {
    /// The committed plan and operation.
    pub fn composed(&self) -> &ComposedRead {
        &self.state.composed
    }

    /// Start a population scan and return its tags.
    ///
    /// A full tag buffer is logged and the buffered tags are still returned.
    pub fn scan(&mut self, timeout_ms: u32) -> Result<Scan<'_, R>> {
        log::debug!("starting population scan for {} ms", timeout_ms);
        let buffer_full = match self.reader.begin_population_scan(timeout_ms) {
            Ok(()) => false,
            Err(Error::TagIdBufferFull) => {
                log::warn!("tag id buffer full, draining buffered tags");
                true
            }
            Err(e) => return Err(e),
        };
        Ok(Scan {
            reader: &mut *self.reader,
            request: self.state.composed.operation,
            buffer_full,
            finished: false,
        })
    }

    /// Forget the committed plan.
    pub fn into_idle(self) -> EmbeddedExecutor<'r, R, Idle> {
        EmbeddedExecutor {
            reader: self.reader,
            state: Idle,
        }
    }
}

/// Tags of one scan, decoded as they are drained. Single pass.
pub struct Scan<'s, R: ?Sized> {
    reader: &'s mut R,
    request: BankRequest,
    buffer_full: bool,
    finished: bool,
}

impl<R: TagReader + ?Sized> Scan<'_, R> {
    /// Whether the reader dropped tags because its buffer was full.
    pub fn buffer_full(&self) -> bool {
        self.buffer_full
    }

    /// Move every remaining tag into `records`. A reader error ends the
    /// scan; the records drained before it stay in `records`.
    pub fn drain_into(&mut self, records: &mut Vec<TagRecord>) -> Result<()> {
        for record in self.by_ref() {
            records.push(record?);
        }
        Ok(())
    }

    /// Drain every remaining tag. A reader error ends the scan and the
    /// records drained before it are dropped with the rest; use
    /// [`Scan::drain_into`] to keep them.
    pub fn drain(mut self) -> Result<Vec<TagRecord>> {
        let mut records = Vec::new();
        self.drain_into(&mut records)?;
        Ok(records)
    }
}

impl<R: TagReader + ?Sized> Iterator for Scan<'_, R> {
    type Item = Result<TagRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.reader.next_tag_record() {
            Ok(Some(raw)) => Some(Ok(decode_tag_read(raw, &self.request))),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode the embedded output of one tag read. Failures stay on the
/// record; they never end the scan.
pub fn decode_tag_read(raw: RawTagRead, request: &BankRequest) -> TagRecord {
    let RawTagRead {
        epc,
        antenna,
        payload,
    } = raw;

    let banks = match payload.classify() {
        Ok(EmbeddedData::Empty) => None,
        Ok(EmbeddedData::Data(bytes)) => Some(
            decode_bank_response(request, bytes).map_err(|source| TagOpError::Decode {
                epc: epc.clone(),
                source,
            }),
        ),
        Ok(EmbeddedData::Failed { code }) => {
            log::warn!("embedded read failed on tag {}: code={:#06x}", epc, code);
            Some(Err(TagOpError::OperationFailed {
                epc: epc.clone(),
                code,
            }))
        }
        Ok(EmbeddedData::Malformed { len }) => {
            log::warn!("tag {} reported a {}-byte failure payload", epc, len);
            Some(Err(TagOpError::MalformedPayload {
                epc: epc.clone(),
                len,
            }))
        }
        Err(source) => Some(Err(TagOpError::Decode {
            epc: epc.clone(),
            source,
        })),
    };

    TagRecord::new(epc, antenna, banks)
}

/// Commit `composed`, run one scan and drain it.
pub fn run_embedded<R: TagReader + ?Sized>(
    reader: &mut R,
    composed: ComposedRead,
    timeout_ms: u32,
) -> Result<Vec<TagRecord>> {
    let mut executor = EmbeddedExecutor::new(reader).commit(composed)?;
    let records = executor.scan(timeout_ms)?.drain()?;
    log::debug!("embedded read drained {} tags", records.len());
    Ok(records)
}
