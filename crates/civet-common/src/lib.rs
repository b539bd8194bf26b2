//! Shared diagnostics for the civet CSS engine.
//!
//! CSS 2.1 error handling is forgiving by design: malformed declarations,
//! unknown at-rules, and unparseable selectors are discarded, not fatal.
//! This crate provides the deduplicated warning channel through which the
//! engine reports what it threw away.

/// Deduplicated warning output for recoverable parse losses.
pub mod warning;

pub use warning::{clear_warnings, warn_once, warning_count};
