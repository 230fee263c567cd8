//! Common test utilities for pipeline-acl

pub mod assertions;
pub mod fixtures;

pub use fixtures::{CREATED, NOW, TestState};
