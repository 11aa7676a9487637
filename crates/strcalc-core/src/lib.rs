//! Core library for strcalc.
//!
//! Sums the integers encoded in a delimited string. Comma and newline always
//! separate numbers; an optional `//` header declares one extra delimiter.
//! Negative numbers are rejected and numbers above [`MAX_ADDEND`] are left
//! out of the sum.
//!
//! # Modules
//!
//! - [`calculator`] - The parse, validate and sum pipeline
//! - [`delimiter`] - Header parsing and tokenization
//! - [`config`] - Configuration loading for the CLI's ambient settings
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! assert_eq!(strcalc_core::add("1\n2,3").unwrap(), 6);
//! assert_eq!(strcalc_core::add("//[***]\n1***2***1001").unwrap(), 3);
//!
//! let err = strcalc_core::add("1,-2,-3").unwrap_err();
//! assert_eq!(err.to_string(), "negatives not allowed: -2, -3");
//! ```
#![deny(unsafe_code)]

pub mod calculator;
pub mod config;
pub mod delimiter;
pub mod error;

pub use calculator::{Calculation, MAX_ADDEND, add, evaluate, report_schema};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use delimiter::Delimiters;
pub use error::{CalcError, CalcResult, ConfigError, ConfigResult};

/// Default maximum input size in bytes (5 MiB).
///
/// Applied by the CLI before evaluation. Override via `max_input_bytes` in
/// config, or disable with `disable_input_limit = true`.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
