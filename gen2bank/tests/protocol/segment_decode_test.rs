#[path = "../common/mod.rs"]
mod common;

use gen2bank::protocol::{BankSegment, decode_segment};
use gen2bank::test_support::{error_segment, raw_segment, segment};
use gen2bank::{BankErrorCode, BankFault, Error, MemoryBank};

#[test]
fn success_segment_advances_past_data() {
    let buf = segment(MemoryBank::Tid, &common::fixtures::tid_memory());
    let (seg, next) = decode_segment(&buf, 0).unwrap();
    assert_eq!(next, 2 + 6);
    assert_eq!(seg, BankSegment::success(MemoryBank::Tid, common::fixtures::tid_memory()));
}

#[test]
fn error_segment_consumes_header_only() {
    let buf = common::fixtures::error_segment_then_epc();
    let (seg, next) = decode_segment(&buf, 0).unwrap();
    assert_eq!(next, 2);
    assert_eq!(
        seg.fault(),
        Some(&BankFault::Tag {
            bank: MemoryBank::Reserved,
            code: BankErrorCode::MEMORY_LOCKED
        })
    );
    assert_eq!(seg.data(), None);

    let (epc, end) = decode_segment(&buf, next).unwrap();
    assert_eq!(epc.data(), Some(&[0xAA, 0xBB][..]));
    assert_eq!(end, buf.len());
}

#[test]
fn empty_bank_differs_from_failed_bank() {
    let empty = segment(MemoryBank::User, &[]);
    let failed = error_segment(MemoryBank::User, 0x0F);
    let (e, _) = decode_segment(&empty, 0).unwrap();
    let (f, _) = decode_segment(&failed, 0).unwrap();
    assert_eq!(e.data(), Some(&[][..]));
    assert!(e.fault().is_none());
    assert!(f.data().is_none());
    assert_ne!(e, f);
}

#[test]
fn unknown_bank_stays_in_sync() {
    let mut buf = raw_segment(0x09, 0, 1, &[0xDE, 0xAD]);
    buf.extend(segment(MemoryBank::User, &[0x01, 0x02]));
    let (unknown, next) = decode_segment(&buf, 0).unwrap();
    assert_eq!(unknown.id(), 0x09);
    assert_eq!(unknown.bank(), None);
    assert_eq!(unknown.fault(), Some(&BankFault::UnknownBank { id: 0x09 }));
    assert_eq!(next, 4);
    let (user, _) = decode_segment(&buf, next).unwrap();
    assert_eq!(user.data(), Some(&[0x01, 0x02][..]));
}

#[test]
fn header_needs_two_bytes() {
    let err = decode_segment(&[0x30], 0).unwrap_err();
    assert_eq!(
        err,
        Error::TruncatedSegment {
            offset: 0,
            needed: 2,
            available: 1,
            bank_id: None,
        }
    );
}

#[test]
fn body_overrun_names_the_bank() {
    // TID segment declaring 3 words with only one present
    let buf = raw_segment(MemoryBank::Tid.id(), 0, 3, &[0xE2, 0x80]);
    let err = decode_segment(&buf, 0).unwrap_err();
    assert_eq!(
        err,
        Error::TruncatedSegment {
            offset: 0,
            needed: 8,
            available: 4,
            bank_id: Some(2),
        }
    );
    assert!(err.to_string().contains("bank id 0x02"));
}
