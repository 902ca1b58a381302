//! Shared helpers for backsync integration tests.

#![allow(dead_code)]

pub mod env;
pub mod remote;

pub use env::{TestEnv, TestResult};
pub use remote::{FakeRemote, Reply};
