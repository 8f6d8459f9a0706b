// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for reading and writing the tabular datasets.

use std::path::PathBuf;

/// Errors from the dataset reader/writer collaborator.
///
/// These are the only fatal errors in the pipeline: if an input dataset
/// cannot be read, the whole run aborts. Per-pair decode and resolution
/// failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Failed to open, read, or write a dataset file.
    #[error("failed to access dataset {path}")]
    Io {
        /// The dataset location that could not be accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A dataset line could not be parsed into a record.
    #[error("failed to parse record at {path}:{line}")]
    Parse {
        /// The dataset location holding the malformed record
        path: PathBuf,
        /// 1-based line number of the malformed record
        line: usize,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

impl DatasetError {
    /// Create an `Io` error for a specific path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a `Parse` error for a specific path and line.
    pub fn parse(path: impl Into<PathBuf>, line: usize, source: serde_json::Error) -> Self {
        DatasetError::Parse {
            path: path.into(),
            line,
            source,
        }
    }
}
