//! YAML export of report results

use std::io::Write;

use serde::Serialize;

use crate::error::{InsightsError, InsightsResult};
use crate::export::json::ReportExport;

/// Write a report as YAML, preceded by a comment header
pub fn export_yaml<T, W>(report: &str, data: &T, writer: &mut W) -> InsightsResult<()>
where
    T: Serialize,
    W: Write,
{
    let export = ReportExport::new(report, data);

    writeln!(writer, "# budget-insights {} report", export.report)
        .map_err(|e| InsightsError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| InsightsError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| InsightsError::Export(e.to_string()))?;

    Ok(())
}
