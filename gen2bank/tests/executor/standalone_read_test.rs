#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{EPC_A, EPC_B, full_tag};
use gen2bank::constants::DEFAULT_RESPONSE_CAPACITY;
use gen2bank::executor::{StandaloneExecutor, run_standalone};
use gen2bank::plan::{ReadLength, ReadPlanBuilder, TagFilter};
use gen2bank::{Epc, Error, MemoryBank};

#[test]
fn reads_first_matching_tag() {
    common::helpers::init_logger();
    let mut reader =
        common::helpers::reader_with("M6e", vec![full_tag(&EPC_A), full_tag(&EPC_B)]);
    let composed = common::helpers::compose(
        &mut reader,
        ReadPlanBuilder::new()
            .read_banks(MemoryBank::User, &[MemoryBank::Tid, MemoryBank::User])
            .filter(TagFilter::epc(Epc::from(&EPC_B[..]))),
    );
    let mut buf = [0u8; DEFAULT_RESPONSE_CAPACITY];
    let result = run_standalone(&mut reader, &composed, &mut buf).unwrap();
    assert_eq!(result.banks().collect::<Vec<_>>(), vec![MemoryBank::Tid, MemoryBank::User]);
    assert_eq!(
        result.data(MemoryBank::Tid),
        Some(&common::fixtures::tid_memory()[..])
    );
    assert_eq!(reader.executed.len(), 1);
}

#[test]
fn response_larger_than_buffer_is_out_of_memory() {
    let big_user = vec![0x5A; 200];
    let mut reader = common::helpers::reader_with(
        "M6e",
        vec![full_tag(&EPC_A).with_bank(MemoryBank::User, &big_user)],
    );
    let composed = common::helpers::compose(
        &mut reader,
        ReadPlanBuilder::new().read_banks(MemoryBank::User, &MemoryBank::ALL),
    );
    let mut small = [0u8; 64];
    match run_standalone(&mut reader, &composed, &mut small) {
        Err(Error::OutOfMemory { required, capacity }) => {
            assert!(required > 64);
            assert_eq!(capacity, 64);
        }
        other => panic!("expected OutOfMemory, got {:?}", other),
    }

    // a larger buffer succeeds; nothing grows automatically
    let mut large = [0u8; DEFAULT_RESPONSE_CAPACITY * 2];
    let result = run_standalone(&mut reader, &composed, &mut large).unwrap();
    assert_eq!(result.data(MemoryBank::User), Some(&big_user[..]));
}

#[test]
fn nothing_matches_filter() {
    let mut reader = common::helpers::reader_with("M6e", vec![full_tag(&EPC_A)]);
    let composed = common::helpers::compose(
        &mut reader,
        ReadPlanBuilder::new().filter(TagFilter::epc(Epc::from(&EPC_B[..]))),
    );
    let mut buf = [0u8; DEFAULT_RESPONSE_CAPACITY];
    assert_eq!(
        run_standalone(&mut reader, &composed, &mut buf),
        Err(Error::NoTagFound)
    );
}

#[test]
fn minimum_length_reader_reads_two_words() {
    let mut reader = common::helpers::reader_with("M3e", vec![full_tag(&EPC_A)]);
    let composed = common::helpers::compose(
        &mut reader,
        ReadPlanBuilder::new().read_banks(MemoryBank::User, &[MemoryBank::Reserved]),
    );
    let mut buf = [0u8; DEFAULT_RESPONSE_CAPACITY];
    let result = run_standalone(&mut reader, &composed, &mut buf).unwrap();
    assert_eq!(result.data(MemoryBank::Reserved), Some(&[0, 0, 0, 0][..]));
}

#[test]
fn explicit_offset_past_bank_end_is_a_bank_fault() {
    let mut reader = common::helpers::reader_with("M6e", vec![full_tag(&EPC_A)]);
    let composed = common::helpers::compose(
        &mut reader,
        ReadPlanBuilder::new()
            .read_banks(MemoryBank::User, &[MemoryBank::Tid, MemoryBank::User])
            .word_offset(2)
            .read_length(ReadLength::Words(2)),
    );
    let mut buf = [0u8; DEFAULT_RESPONSE_CAPACITY];
    let result = StandaloneExecutor::new(&mut reader)
        .run(&composed, &mut buf)
        .unwrap();
    // TID has three words; user has two
    assert!(result.fault(MemoryBank::Tid).is_some());
    assert!(result.fault(MemoryBank::User).is_some());
}

#[test]
fn scripted_truncated_response_fails_whole_call() {
    let mut reader = common::helpers::reader_with("M6e", vec![]);
    reader.push_response(common::fixtures::truncated_final_segment());
    let composed = common::helpers::compose(
        &mut reader,
        ReadPlanBuilder::new().read_banks(MemoryBank::User, &[MemoryBank::Epc, MemoryBank::User]),
    );
    let mut buf = [0u8; DEFAULT_RESPONSE_CAPACITY];
    assert!(matches!(
        run_standalone(&mut reader, &composed, &mut buf),
        Err(Error::TruncatedSegment { .. })
    ));
}
