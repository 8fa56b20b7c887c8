// gen2bank/src/protocol/response.rs

use crate::plan::BankRequest;
use crate::protocol::multibank::{DecodedBankResult, decode_multi_bank};
use crate::{Error, Result};

/// Decode the bank data returned for `request`, whichever path produced it.
///
/// A single-bank request yields the primary bank's raw data. A multi-bank
/// request is decoded segment by segment; known banks the request did not
/// enable are dropped, and every enabled bank must be present.
pub fn decode_bank_response(request: &BankRequest, data: &[u8]) -> Result<DecodedBankResult> {
    if !request.is_multi_bank() {
        return Ok(DecodedBankResult::single(request.primary(), data.to_vec()));
    }

    let requested = request.requested_banks();
    let mut decoded = decode_multi_bank(data)?;

    decoded.retain(|segment| match segment.bank() {
        Some(bank) if !requested.contains(bank) => {
            log::warn!("dropping {} bank segment that was not requested", bank);
            false
        }
        _ => true,
    });

    if let Some(bank) = requested.iter().find(|bank| !decoded.contains(*bank)) {
        return Err(Error::MissingBank { bank });
    }

    log::debug!(
        "decoded {} bank segments from {} bytes (selector {:#04x})",
        decoded.len(),
        data.len(),
        request.selector()
    );
    Ok(decoded)
}
