use iq_report::prelude::*;
use std::path::PathBuf;

/// Mock ReportTableWriter for testing that keeps the rows in memory
#[derive(Default, Clone)]
pub struct MockTableWriter {
    pub rows: std::sync::Arc<std::sync::Mutex<Vec<ConsolidatedRow>>>,
    pub should_fail: bool,
}

impl MockTableWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn get_rows(&self) -> Vec<ConsolidatedRow> {
        self.rows.lock().unwrap().clone()
    }
}

impl ReportTableWriter for MockTableWriter {
    fn write_rows(&self, rows: &[ConsolidatedRow]) -> Result<Option<PathBuf>> {
        if self.should_fail {
            anyhow::bail!("Mock table writer failure");
        }
        if rows.is_empty() {
            return Ok(None);
        }
        self.rows.lock().unwrap().extend_from_slice(rows);
        Ok(Some(PathBuf::from(CONSOLIDATED_REPORT_FILE)))
    }
}
