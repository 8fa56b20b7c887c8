//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers build packed response buffers by hand and set up
//! `MockReader` instances so tests across the crate and the tests/
//! directory share the same fixtures.

use crate::constants::{BANK_ID_SHIFT, BYTES_PER_WORD};
use crate::plan::BankRequest;
use crate::reader::{MockReader, SimulatedTag};
use crate::types::{BankSet, MemoryBank};
use crate::Result;

/// Raw segment: control byte, word count, data. `data` is written as-is,
/// so odd lengths can be used to build broken buffers.
#[doc(hidden)]
pub fn raw_segment(id: u8, error: u8, words: u8, data: &[u8]) -> Vec<u8> {
    let mut out = vec![(id << BANK_ID_SHIFT) | (error & 0x0F), words];
    out.extend_from_slice(data);
    out
}

/// Successful segment for `bank`.
#[doc(hidden)]
pub fn segment(bank: MemoryBank, data: &[u8]) -> Vec<u8> {
    raw_segment(bank.id(), 0, (data.len() / BYTES_PER_WORD) as u8, data)
}

/// Header-only failed segment for `bank`.
#[doc(hidden)]
pub fn error_segment(bank: MemoryBank, code: u8) -> Vec<u8> {
    raw_segment(bank.id(), code, 0, &[])
}

/// Concatenate segments into one packed response.
#[doc(hidden)]
pub fn packed(segments: &[Vec<u8>]) -> Vec<u8> {
    segments.concat()
}

/// Multi-bank request for `banks` with the user bank as primary and a
/// full-bank word count.
#[doc(hidden)]
pub fn multi_request(banks: &[MemoryBank]) -> Result<BankRequest> {
    BankRequest::multi(MemoryBank::User, BankSet::from_banks(banks), 0, 0)
}

/// `MockReader` reporting `model` with `tags` in its field.
#[doc(hidden)]
pub fn mock_reader_with_tags(model: &str, tags: Vec<SimulatedTag>) -> MockReader {
    let mut reader = MockReader::new(model);
    for tag in tags {
        reader.add_tag(tag);
    }
    reader
}
