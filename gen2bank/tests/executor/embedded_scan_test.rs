#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{EPC_A, EPC_B, full_tag, locked_reserved_tag};
use gen2bank::executor::{EmbeddedExecutor, run_embedded};
use gen2bank::plan::{ReadPlanBuilder, TagFilter};
use gen2bank::reader::{EmbeddedPayload, RawTagRead, SimulatedTag};
use gen2bank::{BankErrorCode, BankFault, Epc, Error, MemoryBank, TagOpError};

#[test]
fn every_tag_gets_its_banks() {
    common::helpers::init_logger();
    let mut reader =
        common::helpers::reader_with("M6e", vec![full_tag(&EPC_A), locked_reserved_tag(&EPC_B)]);
    let composed = common::helpers::compose(
        &mut reader,
        ReadPlanBuilder::new().read_banks(MemoryBank::User, &MemoryBank::ALL),
    );
    let records = run_embedded(&mut reader, composed, 500).unwrap();
    assert_eq!(records.len(), 2);

    let a = &records[0];
    assert_eq!(a.epc().as_bytes(), &EPC_A);
    assert_eq!(
        a.bank_data(MemoryBank::User),
        Some(&common::fixtures::user_memory()[..])
    );
    let epc_bank = a.bank_data(MemoryBank::Epc).unwrap();
    assert_eq!(&epc_bank[4..], &EPC_A);

    let b = &records[1];
    assert_eq!(
        b.decoded().unwrap().fault(MemoryBank::Reserved),
        Some(&BankFault::Tag {
            bank: MemoryBank::Reserved,
            code: BankErrorCode::MEMORY_LOCKED
        })
    );
    assert_eq!(
        b.bank_data(MemoryBank::Tid),
        Some(&common::fixtures::tid_memory()[..])
    );
}

#[test]
fn per_tag_failure_does_not_stop_scan() {
    let mut reader = common::helpers::reader_with(
        "M6e",
        vec![
            full_tag(&EPC_A).with_embedded_failure(0x0424),
            full_tag(&EPC_B),
        ],
    );
    let composed = common::helpers::compose(&mut reader, ReadPlanBuilder::new());
    let records = run_embedded(&mut reader, composed, 500).unwrap();
    assert_eq!(records.len(), 2);
    match records[0].error() {
        Some(TagOpError::OperationFailed { epc, code }) => {
            assert_eq!(epc.as_bytes(), &EPC_A);
            assert_eq!(*code, 0x0424);
        }
        other => panic!("expected OperationFailed, got {:?}", other),
    }
    assert!(records[1].decoded().is_some());
}

#[test]
fn buffer_full_is_a_warning() {
    common::helpers::init_logger();
    let tags: Vec<SimulatedTag> = (0..5u8).map(|i| full_tag(&[i; 12])).collect();
    let mut reader = common::helpers::reader_with("M6e", tags);
    reader.tag_buffer_limit = Some(3);
    let composed = common::helpers::compose(&mut reader, ReadPlanBuilder::new());

    let mut executor = EmbeddedExecutor::new(&mut reader).commit(composed).unwrap();
    let scan = executor.scan(500).unwrap();
    assert!(scan.buffer_full());
    let records = scan.drain().unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.decoded().is_some()));
}

#[test]
fn plan_filter_limits_reported_tags() {
    let mut reader =
        common::helpers::reader_with("M6e", vec![full_tag(&EPC_A), full_tag(&EPC_B)]);
    let composed = common::helpers::compose(
        &mut reader,
        ReadPlanBuilder::new().filter(TagFilter::epc(Epc::from(&EPC_B[..]))),
    );
    let records = run_embedded(&mut reader, composed, 500).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].epc().as_bytes(), &EPC_B);
}

#[test]
fn antennas_limit_reported_tags() {
    let mut reader = common::helpers::reader_with(
        "M6e",
        vec![
            full_tag(&EPC_A).on_antenna(1).unwrap(),
            full_tag(&EPC_B).on_antenna(2).unwrap(),
        ],
    );
    let composed = common::helpers::compose(&mut reader, ReadPlanBuilder::new().antennas(&[2]));
    let records = run_embedded(&mut reader, composed, 500).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].antenna().map(|a| a.as_u8()), Some(2));
}

#[test]
fn scripted_sentinel_payload_is_not_decoded() {
    let mut reader = common::helpers::reader_with("M6e", vec![]);
    reader.push_tag_read(RawTagRead::new(
        Epc::from(&EPC_A[..]),
        None,
        EmbeddedPayload {
            declared_len: 0x8000,
            bytes: vec![0x30, 0x00],
        },
    ));
    let composed = common::helpers::compose(
        &mut reader,
        ReadPlanBuilder::new().read_banks(MemoryBank::User, &[MemoryBank::User]),
    );
    let records = run_embedded(&mut reader, composed, 500).unwrap();
    assert_eq!(
        records[0].error(),
        Some(&TagOpError::OperationFailed {
            epc: Epc::from(&EPC_A[..]),
            code: 0x3000
        })
    );
}

#[test]
fn scan_errors_are_fatal() {
    let mut reader = common::helpers::reader_with("M6e", vec![full_tag(&EPC_A)]);
    reader.fail_next_scan = Some(Error::Timeout);
    let composed = common::helpers::compose(&mut reader, ReadPlanBuilder::new());
    let mut executor = EmbeddedExecutor::new(&mut reader).commit(composed).unwrap();
    assert!(matches!(executor.scan(500), Err(Error::Timeout)));
    // the plan stays committed; the next scan works
    assert_eq!(executor.scan(500).unwrap().count(), 1);
}

#[test]
fn records_keep_the_reader_segment_order() {
    let mut reader = common::helpers::reader_with("M6e", vec![locked_reserved_tag(&EPC_A)]);
    reader.bank_order = vec![MemoryBank::User, MemoryBank::Tid, MemoryBank::Reserved];
    let composed = common::helpers::compose(
        &mut reader,
        ReadPlanBuilder::new().read_banks(
            MemoryBank::User,
            &[MemoryBank::Reserved, MemoryBank::Tid, MemoryBank::User],
        ),
    );
    let records = run_embedded(&mut reader, composed, 500).unwrap();
    let decoded = records[0].decoded().unwrap();
    assert_eq!(
        decoded.banks().collect::<Vec<_>>(),
        vec![MemoryBank::User, MemoryBank::Tid, MemoryBank::Reserved]
    );
    assert_eq!(
        decoded.data(MemoryBank::User),
        Some(&common::fixtures::user_memory()[..])
    );
    assert!(decoded.fault(MemoryBank::Reserved).is_some());
}

#[test]
fn reader_failure_mid_scan_keeps_earlier_tags() {
    common::helpers::init_logger();
    let mut reader =
        common::helpers::reader_with("M6e", vec![full_tag(&EPC_A), full_tag(&EPC_B)]);
    reader.fail_next_record = Some((1, Error::DeviceFault("reader reset".into())));
    let composed = common::helpers::compose(&mut reader, ReadPlanBuilder::new());

    let mut executor = EmbeddedExecutor::new(&mut reader).commit(composed).unwrap();
    let mut scan = executor.scan(500).unwrap();
    let mut records = Vec::new();
    assert!(matches!(
        scan.drain_into(&mut records),
        Err(Error::DeviceFault(_))
    ));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].epc().as_bytes(), &EPC_A);
    drop(scan);

    // the failure fires once; a new scan sees both tags
    assert_eq!(executor.scan(500).unwrap().drain().unwrap().len(), 2);
}
