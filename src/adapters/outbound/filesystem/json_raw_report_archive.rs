use super::file_writer::FileSystemWriter;
use crate::ports::outbound::RawReportArchive;
use crate::report_consolidation::domain::RawReportDocument;
use crate::shared::security::validate_path_segment;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// JsonRawReportArchive adapter storing each fetched report as pretty JSON
///
/// Files are named `{publicId}_{reportId}.json` inside the output directory.
pub struct JsonRawReportArchive {
    output_dir: PathBuf,
}

impl JsonRawReportArchive {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    fn file_name(public_id: &str, report_id: &str) -> Result<String> {
        validate_path_segment(public_id, "publicId")?;
        validate_path_segment(report_id, "reportId")?;
        Ok(format!("{}_{}.json", public_id, report_id))
    }
}

impl RawReportArchive for JsonRawReportArchive {
    fn archive(
        &self,
        public_id: &str,
        report_id: &str,
        document: &RawReportDocument,
    ) -> Result<PathBuf> {
        let path = self.output_dir.join(Self::file_name(public_id, report_id)?);
        let content = serde_json::to_vec_pretty(document)?;
        FileSystemWriter::new(path.clone()).write(&content)?;
        Ok(path)
    }
}
