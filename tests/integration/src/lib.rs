//! Integration test utilities for the photo comment service
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API with a real PostgreSQL database.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
