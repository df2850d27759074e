use super::file_writer::FileSystemWriter;
use crate::ports::outbound::ReportTableWriter;
use crate::report_consolidation::domain::ConsolidatedRow;
use crate::shared::Result;
use anyhow::Context;
use csv::Writer;
use std::path::{Path, PathBuf};

/// File name of the consolidated table inside the output directory
pub const CONSOLIDATED_REPORT_FILE: &str = "consolidated_security_report.csv";

/// CsvTableWriter adapter writing the consolidated table as CSV
///
/// Columns come from the serde names of [`ConsolidatedRow`]; the header row
/// is written once, before the first record.
pub struct CsvTableWriter {
    output_path: PathBuf,
}

impl CsvTableWriter {
    /// Writer for `<output_dir>/consolidated_security_report.csv`
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_path: output_dir.join(CONSOLIDATED_REPORT_FILE),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Renders rows to CSV bytes
    pub fn render(rows: &[ConsolidatedRow]) -> Result<Vec<u8>> {
        let mut wtr = Writer::from_writer(vec![]);
        for row in rows {
            wtr.serialize(row)
                .with_context(|| format!("Failed to serialize row {}", row.sequence))?;
        }
        let data = wtr
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
        Ok(data)
    }
}

impl ReportTableWriter for CsvTableWriter {
    fn write_rows(&self, rows: &[ConsolidatedRow]) -> Result<Option<PathBuf>> {
        if rows.is_empty() {
            tracing::warn!(path = %self.output_path.display(), "no rows to write, skipping table");
            return Ok(None);
        }

        let data = Self::render(rows)?;
        FileSystemWriter::new(self.output_path.clone()).write(&data)?;
        Ok(Some(self.output_path.clone()))
    }
}
