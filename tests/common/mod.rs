//! Shared helpers for the integration tests
#![allow(dead_code)]

pub mod fake_containers;
pub mod test_helpers;

pub use fake_containers::FakeContainers;
pub use test_helpers::*;
