//! Integration tests for pipeline-acl
//!
//! These tests drive the HTTP application with real in-memory or
//! file-backed stores, without mocking.

pub mod acl_api_tests;
pub mod config_tests;
pub mod pipeline_api_tests;
