// Shared helpers for the integration test crates. Every aggregator pulls
// this in, and no single crate uses all of it.
#![allow(dead_code)]

pub mod helpers;
