//! Error types for Scanflow.
//!
//! All errors in Scanflow are represented by the `ScanflowError` enum,
//! which provides specific variants for different error categories.

use std::{io::ErrorKind, string::FromUtf8Error};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Scanflow operations.
///
/// Each variant represents a specific category of error that can occur
/// while authoring workflow definitions or detection rules.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum ScanflowError {
    /// Textual workflow form parsing errors.
    #[error("{0}")]
    Parse(String),

    /// Textual workflow form serialization errors.
    #[error("{0}")]
    Serialize(String),

    /// Data conversion errors (JSON, YAML values).
    #[error("{0}")]
    Convert(String),

    /// Workflow definition errors.
    #[error("{0}")]
    Workflow(String),

    /// Detection rule definition or validation errors.
    #[error("{0}")]
    Rule(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<ScanflowError> for String {
    fn from(val: ScanflowError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for ScanflowError {
    fn from(error: std::io::Error) -> Self {
        ScanflowError::IoError(error.to_string())
    }
}

impl From<ScanflowError> for std::io::Error {
    fn from(val: ScanflowError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<FromUtf8Error> for ScanflowError {
    fn from(_: FromUtf8Error) -> Self {
        ScanflowError::Convert("Error with utf-8 string convert".to_string())
    }
}

impl From<serde_json::Error> for ScanflowError {
    fn from(error: serde_json::Error) -> Self {
        ScanflowError::Convert(error.to_string())
    }
}
