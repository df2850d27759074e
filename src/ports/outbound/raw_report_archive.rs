use crate::report_consolidation::domain::RawReportDocument;
use crate::shared::Result;
use std::path::PathBuf;

/// RawReportArchive port for keeping a copy of each fetched report
pub trait RawReportArchive {
    /// Stores `document` under a name derived from the public and report IDs
    ///
    /// # Returns
    /// Location of the stored copy
    fn archive(
        &self,
        public_id: &str,
        report_id: &str,
        document: &RawReportDocument,
    ) -> Result<PathBuf>;
}
