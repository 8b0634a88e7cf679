//! File I/O utilities for ledger snapshots
//!
//! Reads JSON or YAML documents and writes them atomically, so a failed save
//! never leaves a half-written snapshot behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{InsightsError, InsightsResult};

/// Document formats a snapshot can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension (`.json`, `.yaml`, `.yml`)
    pub fn from_path(path: &Path) -> InsightsResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(InsightsError::Storage(format!(
                "Unsupported ledger file type: {} (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }
}

fn open_required(path: &Path) -> InsightsResult<BufReader<File>> {
    if !path.exists() {
        return Err(InsightsError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| InsightsError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    Ok(BufReader::new(file))
}

/// Read a JSON or YAML document, choosing the parser from the extension.
///
/// A missing file is an error.
pub fn read_document<T, P>(path: P) -> InsightsResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let reader = open_required(path)?;

    match format {
        DocumentFormat::Json => serde_json::from_reader(reader).map_err(|e| {
            InsightsError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        }),
        DocumentFormat::Yaml => serde_yaml::from_reader(reader).map_err(|e| {
            InsightsError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        }),
    }
}

/// Write a document atomically (write to temp, then rename)
pub fn write_document_atomic<T, P>(path: P, data: &T) -> InsightsResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            InsightsError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let file = File::create(&temp_path)
        .map_err(|e| InsightsError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    match format {
        DocumentFormat::Json => serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| InsightsError::Storage(format!("Failed to serialize data: {}", e)))?,
        DocumentFormat::Yaml => serde_yaml::to_writer(&mut writer, data)
            .map_err(|e| InsightsError::Storage(format!("Failed to serialize data: {}", e)))?,
    }

    writer
        .flush()
        .map_err(|e| InsightsError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| InsightsError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        InsightsError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
