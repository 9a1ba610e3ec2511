//! Testing infrastructure for fixwatch integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `FakeGateway`: scripted in-memory stand-in for the remote gateway
//! - `fixtures`: sample record builders shared across test suites

pub mod fixtures;
pub mod gateway;

pub use gateway::{FakeGateway, Outcome};
