//! Error types for strcalc-core.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A source could not be read or did not match [`Config`](crate::Config).
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while summing an input string.
#[derive(Error, Debug)]
pub enum CalcError {
    /// One or more negative numbers appeared in the input.
    #[error("negatives not allowed: {}", join_values(.values))]
    NegativeNumbers {
        /// Every negative value, in input order.
        values: Vec<i64>,
    },

    /// A token was not an optionally-signed integer literal.
    #[error("malformed token {token:?} at index {index}")]
    MalformedToken {
        /// The offending token text.
        token: String,
        /// Zero-based position of the token in the token sequence.
        index: usize,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The `//` delimiter header could not be parsed.
    #[error("invalid delimiter header {header:?}: {reason}")]
    InvalidHeader {
        /// Header text following the `//` marker.
        header: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The delimiter automaton could not be built.
    #[error("failed to build delimiter matcher: {0}")]
    Matcher(#[from] aho_corasick::BuildError),
}

impl CalcError {
    /// Returns the negative values carried by a [`CalcError::NegativeNumbers`].
    pub fn negatives(&self) -> Option<&[i64]> {
        match self {
            Self::NegativeNumbers { values } => Some(values),
            _ => None,
        }
    }
}

/// Result type alias using [`CalcError`].
pub type CalcResult<T> = Result<T, CalcError>;

fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
