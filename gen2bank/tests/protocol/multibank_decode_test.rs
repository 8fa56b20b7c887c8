#[path = "../common/mod.rs"]
mod common;

use gen2bank::plan::BankRequest;
use gen2bank::protocol::{BankSegment, DecodedBankResult, decode_bank_response, decode_multi_bank};
use gen2bank::test_support::{error_segment, packed, segment};
use gen2bank::{BankErrorCode, BankFault, BankSet, Error, MemoryBank};
use proptest::prelude::*;

#[test]
fn mixed_buffer_decodes_every_segment() {
    common::helpers::init_logger();
    let result = decode_multi_bank(&common::fixtures::mixed_four_bank_buffer()).unwrap();
    assert_eq!(result.len(), 4);
    assert_eq!(
        result.fault(MemoryBank::Reserved),
        Some(&BankFault::Tag {
            bank: MemoryBank::Reserved,
            code: BankErrorCode::MEMORY_OVERRUN
        })
    );
    assert_eq!(result.data(MemoryBank::Epc), Some(&[0xAB, 0xCD, 0x12, 0x34][..]));
    assert_eq!(result.data(MemoryBank::Tid), Some(&[][..]));
    assert_eq!(result.data(MemoryBank::User), Some(&[0xBE, 0xEF][..]));
}

#[test]
fn user_only_buffer_has_eight_bytes() {
    let result = decode_multi_bank(&common::fixtures::user_only_buffer()).unwrap();
    assert_eq!(result.banks().collect::<Vec<_>>(), vec![MemoryBank::User]);
    assert_eq!(result.data(MemoryBank::User).map(<[u8]>::len), Some(8));
}

#[test]
fn stray_bytes_after_error_header_are_next_segment() {
    let result = decode_multi_bank(&common::fixtures::error_segment_then_epc()).unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.data(MemoryBank::Reserved).is_none());
    assert_eq!(result.data(MemoryBank::Epc), Some(&[0xAA, 0xBB][..]));
}

#[test]
fn truncated_final_segment_returns_no_partial_result() {
    let err = decode_multi_bank(&common::fixtures::truncated_final_segment()).unwrap_err();
    assert_eq!(
        err,
        Error::TruncatedSegment {
            offset: 4,
            needed: 8,
            available: 4,
            bank_id: Some(3),
        }
    );
}

#[test]
fn order_follows_the_buffer() {
    let buf = packed(&[
        segment(MemoryBank::User, &[0x01, 0x02]),
        segment(MemoryBank::Tid, &[0x03, 0x04]),
        error_segment(MemoryBank::Reserved, 0x04),
    ]);
    let result = decode_multi_bank(&buf).unwrap();
    assert_eq!(
        result.banks().collect::<Vec<_>>(),
        vec![MemoryBank::User, MemoryBank::Tid, MemoryBank::Reserved]
    );
}

#[test]
fn repeated_bank_is_rejected() {
    let buf = packed(&[
        segment(MemoryBank::User, &[0x01, 0x02]),
        segment(MemoryBank::User, &[0x03, 0x04]),
    ]);
    assert_eq!(
        decode_multi_bank(&buf),
        Err(Error::DuplicateBank { id: 3, offset: 4 })
    );
}

#[test]
fn empty_buffer_is_empty_result() {
    assert_eq!(decode_multi_bank(&[]).unwrap(), DecodedBankResult::default());
}

fn arb_segment() -> impl Strategy<Value = BankSegment> {
    let bank = prop::sample::select(MemoryBank::ALL.to_vec());
    prop_oneof![
        (bank.clone(), prop::collection::vec(any::<[u8; 2]>(), 0..16))
            .prop_map(|(b, words)| BankSegment::success(b, words.concat())),
        (bank, 1u8..16).prop_map(|(b, c)| BankSegment::failed(b, BankErrorCode::new(c))),
        (4u8..16).prop_map(BankSegment::unknown),
    ]
}

fn dedup(segments: Vec<BankSegment>) -> Vec<BankSegment> {
    let mut out: Vec<BankSegment> = Vec::new();
    for s in segments {
        if !out.iter().any(|o| o.id() == s.id()) {
            out.push(s);
        }
    }
    out
}

proptest! {
    #[test]
    fn decoding_arbitrary_bytes_never_panics(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let _ = decode_multi_bank(&data);
    }

    #[test]
    fn requesting_every_present_bank_keeps_the_result(
        segments in prop::collection::vec(arb_segment(), 0..8)
    ) {
        let original = DecodedBankResult::from_segments(dedup(segments)).unwrap();
        let banks: Vec<MemoryBank> = original.banks().collect();
        prop_assume!(!banks.is_empty());

        let request = BankRequest::multi(MemoryBank::User, BankSet::from_banks(&banks), 0, 0).unwrap();
        let buf = original.to_packed().unwrap();
        prop_assert_eq!(decode_bank_response(&request, &buf).unwrap(), original);
    }
}
