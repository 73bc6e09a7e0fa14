//! Common test utilities for deploy-migrate
//!
//! Shared block catalog, script fixtures and source builders for the
//! integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;
