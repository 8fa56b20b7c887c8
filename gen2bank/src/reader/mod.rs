//! The reader collaborator: the blocking device calls the executors and the
//! capability probe depend on, and an in-memory reader for tests.

/// In-memory reader with simulated tags.
pub mod mock;
/// The `TagReader` trait and its data types.
pub mod traits;

pub use mock::{MockReader, SimulatedTag};
pub use traits::{EmbeddedPayload, RawTagRead, TagReader};
