// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Dataset reading and writing.
//!
//! A thin stand-in for the bulk ingestion/writing collaborator: the two
//! input datasets and the output dataset are JSON-lines files, one
//! record per line. The engine itself never touches these functions;
//! only the surrounding binary does.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::errors::DatasetError;
use crate::records::{LogRecord, SwapRecord, TransactionRecord};

/// Read the transactions dataset.
pub fn read_transactions(path: impl AsRef<Path>) -> Result<Vec<TransactionRecord>, DatasetError> {
    let records = read_lines(path.as_ref())?;
    info!(
        path = %path.as_ref().display(),
        records = records.len(),
        "Read transactions dataset"
    );
    Ok(records)
}

/// Read the logs dataset.
pub fn read_logs(path: impl AsRef<Path>) -> Result<Vec<LogRecord>, DatasetError> {
    let records = read_lines(path.as_ref())?;
    info!(
        path = %path.as_ref().display(),
        records = records.len(),
        "Read logs dataset"
    );
    Ok(records)
}

/// Write the output dataset, one record per line.
pub fn write_swap_records(
    path: impl AsRef<Path>,
    records: &[SwapRecord],
) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| DatasetError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for (index, record) in records.iter().enumerate() {
        write_line(&mut writer, path, index + 1, record)?;
    }
    writer.flush().map_err(|e| DatasetError::io(path, e))?;

    info!(path = %path.display(), records = records.len(), "Wrote swap records dataset");
    Ok(())
}

fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| DatasetError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record =
            serde_json::from_str(&line).map_err(|e| DatasetError::parse(path, index + 1, e))?;
        records.push(record);
    }
    Ok(records)
}

fn write_line<T: Serialize>(
    writer: &mut impl Write,
    path: &Path,
    line: usize,
    record: &T,
) -> Result<(), DatasetError> {
    let json = serde_json::to_string(record).map_err(|e| DatasetError::parse(path, line, e))?;
    writeln!(writer, "{json}").map_err(|e| DatasetError::io(path, e))
}
