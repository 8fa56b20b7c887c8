// gen2bank/src/executor/standalone.rs

use crate::plan::ComposedRead;
use crate::protocol::{DecodedBankResult, decode_bank_response};
use crate::reader::TagReader;
use crate::{Error, Result};

/// Runs a bank read once, against the first tag the filter selects.
pub struct StandaloneExecutor<'r, R: ?Sized> {
    reader: &'r mut R,
}

impl<'r, R: TagReader + ?Sized> StandaloneExecutor<'r, R> {
    /// Wrap `reader`.
    pub fn new(reader: &'r mut R) -> Self {
        Self { reader }
    }

    /// Execute and decode. `buf` bounds the response size; a larger
    /// response fails with `Error::OutOfMemory` and nothing is decoded.
    pub fn run(&mut self, composed: &ComposedRead, buf: &mut [u8]) -> Result<DecodedBankResult> {
        log::debug!(
            "standalone read: selector={:#04x} antenna={:?} capacity={}",
            composed.operation.selector(),
            composed.plan.tagop_antenna().map(|a| a.as_u8()),
            buf.len()
        );
        let written = self.reader.execute_read_operation(
            &composed.plan,
            &composed.operation,
            composed.filter.as_ref(),
            buf,
        )?;
        let data = buf.get(..written).ok_or(Error::OutOfMemory {
            required: written,
            capacity: buf.len(),
        })?;
        decode_bank_response(&composed.operation, data)
    }
}

/// One-shot form of [`StandaloneExecutor::run`].
pub fn run_standalone<R: TagReader + ?Sized>(
    reader: &mut R,
    composed: &ComposedRead,
    buf: &mut [u8],
) -> Result<DecodedBankResult> {
    StandaloneExecutor::new(reader).run(composed, buf)
}
