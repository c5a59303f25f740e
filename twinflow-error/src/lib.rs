// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the twinflow aggregation contract
//!
//! Aggregators report every internal failure through [`AggregateError`]. The
//! aggregation entry point catches these errors and turns them into a report, so
//! none of them ever escapes to the harness as an abrupt termination.
//!
//! # Examples
//!
//! ```
//! use twinflow_error::{AggregateError, Result};
//!
//! fn parse_count(raw: &str) -> Result<u64> {
//!     raw.trim()
//!         .parse()
//!         .map_err(|_| AggregateError::malformed_input("input1", 1, "expected a count"))
//! }
//!
//! assert!(parse_count("12").is_ok());
//! assert!(parse_count("twelve").is_err());
//! ```

/// Root error type for all twinflow operations
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// Reading from an input channel failed
    ///
    /// The channel keeps this error and reports it again on every later read.
    #[error("Input {channel} failed: {context}")]
    InputFailed {
        /// Name of the channel (`input1` or `input2`)
        channel: String,
        /// Description of the underlying I/O failure
        context: String,
    },

    /// Writing to or flushing the output channel failed
    #[error("Output failed: {context}")]
    OutputFailed {
        /// Description of the underlying I/O failure
        context: String,
    },

    /// An input record could not be interpreted by the aggregator
    #[error("Malformed input on {channel} line {line}: {message}")]
    MalformedInput {
        /// Name of the channel the record came from
        channel: String,
        /// 1-based line number within that channel
        line: u64,
        /// What was wrong with the record
        message: String,
    },

    /// An operation was attempted in an inappropriate state
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the invalid state
        message: String,
    },

    /// The harness configuration is unusable
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is wrong with the configuration
        message: String,
    },

    /// The aggregator panicked
    ///
    /// The entry point catches the unwind and converts it into this variant.
    #[error("Aggregator panicked: {context}")]
    AggregatorPanic {
        /// The panic payload, when it was a string
        context: String,
    },

    /// Custom error from aggregator code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Multiple errors occurred
    #[error("Multiple errors occurred: {count} errors")]
    MultipleErrors {
        /// Number of errors that occurred
        count: usize,
        /// The individual errors
        errors: Vec<AggregateError>,
    },
}

impl AggregateError {
    /// Create an input failure for the named channel
    pub fn input_failed(channel: impl Into<String>, context: impl Into<String>) -> Self {
        Self::InputFailed {
            channel: channel.into(),
            context: context.into(),
        }
    }

    /// Create an output failure with the given context
    pub fn output_failed(context: impl Into<String>) -> Self {
        Self::OutputFailed {
            context: context.into(),
        }
    }

    /// Create a malformed input error
    pub fn malformed_input(
        channel: impl Into<String>,
        line: u64,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedInput {
            channel: channel.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid state error with the given message
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a configuration error with the given message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a panic error from the panic context
    pub fn aggregator_panic(context: impl Into<String>) -> Self {
        Self::AggregatorPanic {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Aggregate several errors into a `MultipleErrors` variant
    #[must_use]
    pub fn multiple(errors: Vec<AggregateError>) -> Self {
        Self::MultipleErrors {
            count: errors.len(),
            errors,
        }
    }

    /// Check if this is a recoverable error
    ///
    /// A malformed record leaves the channels intact, so a caller may choose to
    /// skip it and keep reading.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}

/// Specialized Result type for twinflow operations
///
/// ```
/// use twinflow_error::Result;
///
/// fn process() -> Result<String> {
///     Ok("processed".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, AggregateError>;

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(AggregateError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(AggregateError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AggregateError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| attach_context(e.into(), context.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| attach_context(e.into(), f()))
    }
}

fn attach_context(error: AggregateError, context: String) -> AggregateError {
    match error {
        AggregateError::UserError(inner) => AggregateError::InvalidState {
            message: format!("{context}: {inner}"),
        },
        other => other,
    }
}

impl Clone for AggregateError {
    fn clone(&self) -> Self {
        match self {
            Self::InputFailed { channel, context } => Self::InputFailed {
                channel: channel.clone(),
                context: context.clone(),
            },
            Self::OutputFailed { context } => Self::OutputFailed {
                context: context.clone(),
            },
            Self::MalformedInput {
                channel,
                line,
                message,
            } => Self::MalformedInput {
                channel: channel.clone(),
                line: *line,
                message: message.clone(),
            },
            Self::InvalidState { message } => Self::InvalidState {
                message: message.clone(),
            },
            Self::Configuration { message } => Self::Configuration {
                message: message.clone(),
            },
            Self::AggregatorPanic { context } => Self::AggregatorPanic {
                context: context.clone(),
            },
            // The boxed error cannot be cloned, keep its message
            Self::UserError(e) => Self::InvalidState {
                message: format!("User error: {e}"),
            },
            Self::MultipleErrors { count, errors } => Self::MultipleErrors {
                count: *count,
                errors: errors.clone(),
            },
        }
    }
}

impl From<std::io::Error> for AggregateError {
    fn from(error: std::io::Error) -> Self {
        Self::user_error(error)
    }
}
