use crate::report_consolidation::domain::ConsolidatedRow;
use crate::shared::Result;
use std::path::PathBuf;

/// ReportTableWriter port for persisting the consolidated table
pub trait ReportTableWriter {
    /// Writes the rows in order, header first
    ///
    /// # Returns
    /// The path written, or `None` when `rows` is empty (nothing is created)
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written; this is fatal
    /// for the run
    fn write_rows(&self, rows: &[ConsolidatedRow]) -> Result<Option<PathBuf>>;
}
