use crate::application::dto::RunOutcome;
use std::fmt;
use std::path::PathBuf;

/// Why an application produced no report document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The application has never been evaluated
    NoReports,
    /// The latest report reference carried no usable ID
    NoReportId,
    /// The policy endpoint answered with an empty payload
    EmptyReport,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoReports => write!(f, "No reports found"),
            SkipReason::NoReportId => write!(f, "No report ID"),
            SkipReason::EmptyReport => write!(f, "No report data"),
        }
    }
}

/// Structured events emitted while the pipeline runs
///
/// `index` is 1-based; `total` is the number of listed applications.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    FetchingApplications {
        organization_id: Option<String>,
    },
    /// The application listing failed; the run continues with no applications
    ApplicationsListingFailed {
        error: String,
    },
    ApplicationsListed {
        count: usize,
        preview: Vec<(String, String)>,
    },
    ApplicationStarted {
        index: usize,
        total: usize,
        name: String,
    },
    ApplicationProcessed {
        index: usize,
        total: usize,
        name: String,
        report_id: String,
        violations: usize,
    },
    ApplicationSkipped {
        index: usize,
        total: usize,
        name: String,
        reason: SkipReason,
    },
    ApplicationFailed {
        index: usize,
        total: usize,
        name: String,
        error: String,
    },
    RawReportArchived {
        path: PathBuf,
    },
    RawReportArchiveFailed {
        public_id: String,
        error: String,
    },
    RowsConsolidated {
        documents: usize,
        rows: usize,
    },
    NoRowsConsolidated,
    TableWritten {
        path: PathBuf,
        rows: usize,
    },
    RunCompleted {
        processed: usize,
        succeeded: usize,
        failed: usize,
        outcome: RunOutcome,
        elapsed_ms: i64,
    },
}

/// ProgressReporter port for reporting pipeline progress
///
/// The use case only emits [`PipelineEvent`]s; formatting (colors, emoji,
/// progress bars) is entirely up to the adapter.
pub trait ProgressReporter {
    /// Reports one pipeline event
    fn report_event(&self, event: &PipelineEvent);
}
