//! Standardized error handling for the neblio wallet core
//!
//! This module provides the top-level error type. Coin selection and staking
//! report expected outcomes (insufficient funds, missing keys) as values; the
//! errors here cover precondition violations, configuration and I/O.
//!
//! # Usage
//!
//! ```
//! use neblio_common::error::{NeblioError, ErrorContext};
//!
//! fn some_operation() -> Result<(), NeblioError> {
//!     let _ = std::fs::File::open("config.toml")
//!         .context("Failed to open configuration file");
//!     Ok(())
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::io;
use thiserror::Error;

use crate::types::WalletError;

/// The main error type for the neblio wallet core
#[derive(Debug, Error)]
pub enum NeblioError {
    /// Wallet operation errors
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// Configuration errors
    #[error("Configuration error: {context}")]
    Config {
        context: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// I/O errors
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        context: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Unexpected errors that don't fit other categories
    #[error("Unexpected error: {context}")]
    Unexpected {
        context: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

/// Extension trait for adding context to error types
pub trait ErrorContext<T, E> {
    /// Add human-readable context while keeping the original error as the source
    fn context(self, context: impl Into<String>) -> Result<T, E>;
}

impl<T, E: Into<NeblioError>> ErrorContext<T, NeblioError> for Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T, NeblioError> {
        self.map_err(|err| match Into::<NeblioError>::into(err) {
            NeblioError::Config { source, .. } => NeblioError::Config {
                context: context.into(),
                source,
            },
            NeblioError::Io { source, .. } => NeblioError::Io {
                context: context.into(),
                source,
            },
            NeblioError::Serialization { source, .. } => NeblioError::Serialization {
                context: context.into(),
                source,
            },
            NeblioError::Unexpected { source, .. } => NeblioError::Unexpected {
                context: context.into(),
                source,
            },
            // Wallet errors already carry their own message
            other => NeblioError::Unexpected {
                context: context.into(),
                source: Some(Box::new(other)),
            },
        })
    }
}

impl From<io::Error> for NeblioError {
    fn from(err: io::Error) -> Self {
        NeblioError::Io {
            context: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for NeblioError {
    fn from(err: serde_json::Error) -> Self {
        NeblioError::Serialization {
            context: format!("JSON serialization error: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for NeblioError {
    fn from(err: toml::de::Error) -> Self {
        NeblioError::Serialization {
            context: format!("TOML deserialization error: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::ser::Error> for NeblioError {
    fn from(err: toml::ser::Error) -> Self {
        NeblioError::Serialization {
            context: format!("TOML serialization error: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

/// Create a new configuration error with context
pub fn config_error<S: Into<String>>(context: S) -> NeblioError {
    NeblioError::Config {
        context: context.into(),
        source: None,
    }
}

/// Type alias for a Result with NeblioError
pub type NeblioResult<T> = Result<T, NeblioError>;

// anyhow::Error does not implement std::error::Error, so it goes through a wrapper
pub fn from_anyhow<T>(result: Result<T, anyhow::Error>, context: impl Into<String>) -> NeblioResult<T> {
    result.map_err(|err| NeblioError::Config {
        context: context.into(),
        source: Some(Box::new(ErrorWrapper(err))),
    })
}

#[derive(Debug)]
struct ErrorWrapper(anyhow::Error);

impl fmt::Display for ErrorWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for ErrorWrapper {}

/// Error category for logging purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Wallet,
    Config,
    Io,
    Serialization,
    Unexpected,
}

impl ErrorCategory {
    /// Convert the error category to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Wallet => "Wallet",
            ErrorCategory::Config => "Config",
            ErrorCategory::Io => "Io",
            ErrorCategory::Serialization => "Serialization",
            ErrorCategory::Unexpected => "Unexpected",
        }
    }
}

impl NeblioError {
    /// Get the category of this error for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            NeblioError::Wallet(_) => ErrorCategory::Wallet,
            NeblioError::Config { .. } => ErrorCategory::Config,
            NeblioError::Io { .. } => ErrorCategory::Io,
            NeblioError::Serialization { .. } => ErrorCategory::Serialization,
            NeblioError::Unexpected { .. } => ErrorCategory::Unexpected,
        }
    }
}
