//! Read every memory bank of the tags in the field, first embedded in a
//! population scan and then standalone against one tag.
//!
//! Runs against a simulated reader:
//!   RUST_LOG=debug cargo run -p gen2bank --example read_all_banks -- 1,2

use anyhow::Context;
use gen2bank::constants::DEFAULT_RESPONSE_CAPACITY;
use gen2bank::executor::{run_embedded, run_standalone};
use gen2bank::plan::{ComposedRead, ReadPlanBuilder, TagFilter};
use gen2bank::reader::{MockReader, SimulatedTag};
use gen2bank::tag::TagRecord;
use gen2bank::utils::{DEFAULT_SCAN_TIMEOUT_MS, bytes_to_hex};
use gen2bank::{BankErrorCode, DecodedBankResult, Epc, MemoryBank};

const EPC: [u8; 12] = [
    0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45, 0x67,
];

fn simulated_reader() -> anyhow::Result<MockReader> {
    let mut reader = MockReader::new("M6e Micro");
    reader.add_tag(
        SimulatedTag::new(&EPC)
            .with_bank(MemoryBank::Reserved, &[0x12, 0x34, 0x56, 0x78])
            .with_bank(MemoryBank::Tid, &[0xE2, 0x80, 0x11, 0x05, 0x20, 0x00])
            .with_bank(MemoryBank::User, &[0xFF, 0xF1, 0x11, 0x22])
            .on_antenna(1)?,
    );
    reader.add_tag(
        SimulatedTag::new(&[0xE2, 0x00, 0x00, 0x17])
            .with_bank(MemoryBank::User, &[0x00, 0x01])
            .with_fault(MemoryBank::Reserved, BankErrorCode::MEMORY_LOCKED)
            .on_antenna(2)?,
    );
    Ok(reader)
}

fn print_banks(banks: &DecodedBankResult) {
    for segment in banks {
        let name = segment
            .bank()
            .map(|b| b.to_string())
            .unwrap_or_else(|| format!("bank {:#04x}", segment.id()));
        match segment.outcome() {
            Ok(data) => println!("  {} data: {}", name, bytes_to_hex(data)),
            Err(fault) => println!("  {}: {}", name, fault),
        }
    }
}

fn print_record(record: &TagRecord) {
    println!("EPC: {}", record.epc());
    match record.banks() {
        Some(Ok(banks)) => print_banks(banks),
        Some(Err(err)) => println!("  {}", err),
        None => println!("  no operation data"),
    }
}

fn read_both_ways(reader: &mut MockReader, label: &str, composed: ComposedRead) -> anyhow::Result<()> {
    println!("== {} (embedded)", label);
    for record in run_embedded(reader, composed.clone(), DEFAULT_SCAN_TIMEOUT_MS)? {
        print_record(&record);
    }

    println!("== {} (standalone)", label);
    let mut buf = [0u8; DEFAULT_RESPONSE_CAPACITY];
    let banks = run_standalone(reader, &composed, &mut buf)
        .with_context(|| format!("standalone read: {}", label))?;
    print_banks(&banks);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let antennas = std::env::args().nth(1);
    let mut reader = simulated_reader()?;
    let filter = TagFilter::epc(Epc::from(&EPC[..]));

    let base = || -> anyhow::Result<ReadPlanBuilder> {
        Ok(match &antennas {
            Some(list) => ReadPlanBuilder::new().antenna_list(list)?,
            None => ReadPlanBuilder::new(),
        })
    };

    let runs: [(&str, ReadPlanBuilder); 6] = [
        ("user memory, no filter", base()?.read_bank(MemoryBank::User)),
        (
            "all banks, no filter",
            base()?.read_banks(MemoryBank::User, &MemoryBank::ALL),
        ),
        (
            "user memory, filtered",
            base()?.read_bank(MemoryBank::User).filter(filter.clone()),
        ),
        (
            "user and reserved, filtered",
            base()?
                .read_banks(MemoryBank::User, &[MemoryBank::User, MemoryBank::Reserved])
                .filter(filter.clone()),
        ),
        (
            "user, reserved and TID, filtered",
            base()?
                .read_banks(
                    MemoryBank::User,
                    &[MemoryBank::User, MemoryBank::Reserved, MemoryBank::Tid],
                )
                .filter(filter.clone()),
        ),
        (
            "all banks, filtered",
            base()?
                .read_banks(MemoryBank::User, &MemoryBank::ALL)
                .filter(filter.clone()),
        ),
    ];

    for (label, builder) in runs {
        let composed = builder.build(&mut reader)?;
        read_both_ways(&mut reader, label, composed)?;
    }
    Ok(())
}
