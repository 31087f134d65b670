// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for seekbench core operations.

use thiserror::Error;

/// Errors that can occur in core seekbench operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid input to a constructor or builder.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration file problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create an [`Error::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an [`Error::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
