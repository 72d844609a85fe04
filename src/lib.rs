//! Demora - Pure Rust Swift build time analyzer
//!
//! This library scans Xcode activity logs for the per-declaration compile
//! timings emitted under `-debug-time-function-bodies`, aggregates them per
//! physical source line, and streams progressively refined, ranked results
//! while the scan runs.

pub mod aggregate;
pub mod cli;
pub mod collector;
pub mod controller;
pub mod csv_output;
pub mod extract;
pub mod json_output;
pub mod matcher;
pub mod measure;
pub mod parser;
pub mod workspace;
