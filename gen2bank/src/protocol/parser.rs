// gen2bank/src/protocol/parser.rs

use crate::{Error, Result};

/// Ensure at least `needed` bytes remain starting at `offset`.
pub fn ensure_remaining(data: &[u8], offset: usize, needed: usize) -> Result<()> {
    let available = data.len().saturating_sub(offset);
    if available < needed {
        return Err(Error::TruncatedSegment {
            offset,
            needed,
            available,
            bank_id: None,
        });
    }
    Ok(())
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_remaining(data, idx, 1)?;
    Ok(data[idx])
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_remaining(data, idx, len)?;
    Ok(&data[idx..idx + len])
}

/// Read a big-endian u16 at `idx`.
pub fn be_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    let s = slice_at(data, idx, 2)?;
    Ok(u16::from_be_bytes([s[0], s[1]]))
}
