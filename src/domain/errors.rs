// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Core error definitions for the extraction runner.
//!
//! This module provides a centralized `ExtractError` enum and a `Result` type
//! used throughout the crate to handle configuration, database, and file errors.
//!
//! None of the variants ever carry credentials: connection failures report the
//! resolved connection string and the driver's message only.

use thiserror::Error;

/// Error types encountered while configuring or running an extraction job.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A required job or data-source field is missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The data source could not be reached or rejected the credentials.
    #[error("Connection to {endpoint} failed: {reason}")]
    Connection { endpoint: String, reason: String },

    /// The query failed on an otherwise open connection.
    #[error("Query execution failed: {0}")]
    Query(String),

    /// The output format is not one of `.csv`, `.txt` or `.xlsx`.
    #[error("Unsupported output format: '{0}'")]
    UnsupportedFormat(String),

    /// Directory creation or file write failed.
    #[error("File operation failed for {path}: {reason}")]
    FileOperation { path: String, reason: String },

    /// The runner was asked to do something its current state does not allow.
    #[error("Invalid runner state: {0}")]
    InvalidState(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Builds a `FileOperation` error for `path` from any displayable cause.
    pub fn file_op(path: impl AsRef<std::path::Path>, reason: impl std::fmt::Display) -> Self {
        ExtractError::FileOperation {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A specialized Result type for the extraction runner.
pub type Result<T> = std::result::Result<T, ExtractError>;
