//! Errors that can occur while reading, writing or interpreting a configuration.

use std::path::PathBuf;

use thiserror::Error;

/// The errors that can be thrown when parsing a configuration directory.
#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("unsupported configuration version {version} in {file_path}, expected {expected}")]
    UnsupportedVersion {
        file_path: PathBuf,
        version: u32,
        expected: u32,
    },

    #[error("I/O error on {file_path}: {inner}")]
    IoError {
        file_path: PathBuf,
        inner: std::io::Error,
    },
}

/// The errors that can be thrown when writing a configuration to a directory.
#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("could not serialize the configuration: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// The errors that can be thrown when turning a parsed configuration into a
/// runtime configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MakeRuntimeConfigurationError {
    #[error("resource '{resource}' declares no columns")]
    ResourceWithoutColumns { resource: String },

    #[error("constraint '{name}' must be positive")]
    NonPositiveConstraint { name: &'static str },
}
