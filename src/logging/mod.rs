//! Structured logging with run context.
//!
//! Provides logging macros and utilities that include the run_id (and flow
//! index where relevant) in every log message for easy correlation.

pub mod structured;

pub use structured::*;
