//! Error types for option parsing and option store access.

use thiserror::Error;

/// A string could not be converted into the requested option type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    /// Human-readable reason, suitable for embedding in a warning.
    pub message: String,
}

impl ParseError {
    /// Build a parse error from any displayable message.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors produced by [`crate::Options`] accessors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The option name is not part of the schema.
    #[error("Option {name} does not exist")]
    Inexistent {
        /// Name that was looked up.
        name: String,
    },
    /// The string value could not be parsed into the option's type.
    #[error("Could not parse option {name}: {source}")]
    Parse {
        /// Name of the option being set.
        name: String,
        /// Underlying parser failure.
        #[source]
        source: ParseError,
    },
    /// A typed value does not fit the option's declared kind.
    #[error("Option {name} is not compatible: {message}")]
    Incompatible {
        /// Name of the option.
        name: String,
        /// What went wrong.
        message: String,
    },
    /// An optional option was read while it has no value.
    #[error("Option {name} does not have a value")]
    NoValue {
        /// Name of the option.
        name: String,
    },
}

impl Error {
    /// The option name this error is about.
    pub fn name(&self) -> &str {
        match self {
            Self::Inexistent { name }
            | Self::Parse { name, .. }
            | Self::Incompatible { name, .. }
            | Self::NoValue { name } => name,
        }
    }
}
