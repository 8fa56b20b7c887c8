// helpers.rs: logger and reader setup shared by the integration tests

use gen2bank::plan::{BankRequest, ComposedRead, ReadPlanBuilder};
use gen2bank::reader::{MockReader, SimulatedTag};
use gen2bank::test_support;
use gen2bank::types::MemoryBank;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn reader_with(model: &str, tags: Vec<SimulatedTag>) -> MockReader {
    test_support::mock_reader_with_tags(model, tags)
}

pub fn multi(banks: &[MemoryBank]) -> BankRequest {
    test_support::multi_request(banks).unwrap()
}

/// Compose through the public builder, so the capability probe runs.
pub fn compose(reader: &mut MockReader, builder: ReadPlanBuilder) -> ComposedRead {
    builder.build(reader).unwrap()
}
