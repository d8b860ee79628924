//! Keyword file loading and report orchestration for kwgroup.
//!
//! This crate ties together keyword input, grouping, and URL generation
//! into the end-to-end report workflow (e.g., `build_report`).

pub mod input;
pub mod report;
