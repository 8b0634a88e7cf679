//! JSON export of report results
//!
//! Results are wrapped in a [`ReportExport`] envelope carrying the schema
//! version and generation time; the payload keeps the engine's field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{InsightsError, InsightsResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Envelope around one exported report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExport<T> {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Generation timestamp
    pub exported_at: DateTime<Utc>,

    /// Library version that produced the export
    pub app_version: String,

    /// Report name, e.g. `summary` or `trend`
    pub report: String,

    /// The report payload
    pub data: T,
}

impl<T> ReportExport<T> {
    /// Wrap a report payload
    pub fn new(report: impl Into<String>, data: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            report: report.into(),
            data,
        }
    }
}

/// Write a report as pretty-printed JSON
pub fn export_json<T, W>(report: &str, data: &T, writer: &mut W) -> InsightsResult<()>
where
    T: Serialize,
    W: Write,
{
    let export = ReportExport::new(report, data);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| InsightsError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| InsightsError::Export(e.to_string()))?;
    Ok(())
}
