//! # IronIDL Bench
//!
//! Benchmarking utilities for IronIDL performance testing.

pub mod fixtures;
pub mod protocol;
