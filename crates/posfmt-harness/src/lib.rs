//! Conformance harness for posfmt.
//!
//! This crate provides:
//! - Fixture loading: JSON fixture sets of templates, typed arguments and
//!   expected output or error kind
//! - Fixture verify: run every case under the strict and lenient scan policies
//! - Report generation: markdown + JSON conformance reports
//! - Structured JSONL logs with a SHA-256 artifact index

#![forbid(unsafe_code)]

pub mod config;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;

pub use config::HarnessConfig;
pub use fixtures::{FixtureArg, FixtureCase, FixtureError, FixtureSet};
pub use report::ConformanceReport;
pub use runner::{TestRunner, VerificationResult};
