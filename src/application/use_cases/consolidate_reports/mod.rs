use crate::application::dto::{ConsolidationRequest, RunSummary};
use crate::ports::outbound::{
    IqServerRepository, PipelineEvent, ProgressReporter, RawReportArchive, ReportTableWriter,
    SkipReason,
};
use crate::report_consolidation::domain::{Application, RawReportDocument};
use crate::report_consolidation::services::ReportAggregator;
use crate::shared::Result;
use anyhow::Context;
use chrono::Utc;

/// Number of applications shown in the listing preview
const PREVIEW_SIZE: usize = 5;

/// Outcome of fetching one application's report
enum FetchOutcome {
    Fetched {
        report_id: String,
        document: RawReportDocument,
    },
    Skipped(SkipReason),
}

/// ConsolidateReportsUseCase - Core use case for report consolidation
///
/// Fetches the latest policy report of every application, one at a time,
/// aggregates them and writes the consolidated table. A failure for one
/// application is reported and counted but never stops the run. A failed
/// application listing is reported and leaves nothing to process; only the
/// final table write is fatal.
///
/// # Type Parameters
/// * `IQ` - IqServerRepository implementation
/// * `TW` - ReportTableWriter implementation
/// * `PR` - ProgressReporter implementation
/// * `RA` - RawReportArchive implementation (optional)
pub struct ConsolidateReportsUseCase<IQ, TW, PR, RA> {
    iq_server: IQ,
    table_writer: TW,
    progress_reporter: PR,
    raw_archive: Option<RA>,
}

impl<IQ, TW, PR, RA> ConsolidateReportsUseCase<IQ, TW, PR, RA>
where
    IQ: IqServerRepository,
    TW: ReportTableWriter,
    PR: ProgressReporter,
    RA: RawReportArchive,
{
    /// Creates a new ConsolidateReportsUseCase with injected dependencies
    pub fn new(
        iq_server: IQ,
        table_writer: TW,
        progress_reporter: PR,
        raw_archive: Option<RA>,
    ) -> Self {
        Self {
            iq_server,
            table_writer,
            progress_reporter,
            raw_archive,
        }
    }

    /// Executes the consolidation use case
    ///
    /// # Returns
    /// Summary with processed/succeeded/failed counts and the written table
    ///
    /// # Errors
    /// Returns an error if the table cannot be written
    pub fn execute(&self, request: ConsolidationRequest) -> Result<RunSummary> {
        let started_at = Utc::now();

        // Step 1: List applications
        let applications = self.list_applications(&request);
        let total = applications.len();

        // Step 2: Fetch and tally each application's report
        let mut aggregator = ReportAggregator::new();
        let mut succeeded = 0;
        for (i, application) in applications.iter().enumerate() {
            if self.process_application(application, i + 1, total, &mut aggregator) {
                succeeded += 1;
            }
        }

        // Step 3: Build rows and write the table
        let rows = aggregator.build_rows();
        let output_path = if rows.is_empty() {
            self.progress_reporter
                .report_event(&PipelineEvent::NoRowsConsolidated);
            None
        } else {
            self.progress_reporter
                .report_event(&PipelineEvent::RowsConsolidated {
                    documents: aggregator.document_count(),
                    rows: rows.len(),
                });
            let written = self.table_writer.write_rows(&rows)?;
            if let Some(path) = &written {
                self.progress_reporter.report_event(&PipelineEvent::TableWritten {
                    path: path.clone(),
                    rows: rows.len(),
                });
            }
            written
        };

        let summary = RunSummary {
            processed: total,
            succeeded,
            failed: total - succeeded,
            rows: rows.len(),
            output_path,
            started_at,
            finished_at: Utc::now(),
        };

        self.progress_reporter.report_event(&PipelineEvent::RunCompleted {
            processed: summary.processed,
            succeeded: summary.succeeded,
            failed: summary.failed,
            outcome: summary.outcome(),
            elapsed_ms: summary.elapsed_ms(),
        });

        Ok(summary)
    }

    /// Lists applications; a failed listing is reported and yields none
    fn list_applications(&self, request: &ConsolidationRequest) -> Vec<Application> {
        self.progress_reporter
            .report_event(&PipelineEvent::FetchingApplications {
                organization_id: request.organization_id.clone(),
            });

        let applications = match self
            .iq_server
            .list_applications(request.organization_id.as_deref())
            .context("Failed to fetch applications from IQ Server")
        {
            Ok(applications) => applications,
            Err(e) => {
                tracing::debug!(error = %format!("{:#}", e), "application listing failed");
                self.progress_reporter
                    .report_event(&PipelineEvent::ApplicationsListingFailed {
                        error: format!("{:#}", e),
                    });
                return Vec::new();
            }
        };

        let preview = applications
            .iter()
            .take(PREVIEW_SIZE)
            .map(|app| (app.name.clone(), app.public_id.clone()))
            .collect();
        self.progress_reporter
            .report_event(&PipelineEvent::ApplicationsListed {
                count: applications.len(),
                preview,
            });

        applications
    }

    /// Processes one application; returns true if its report was aggregated
    fn process_application(
        &self,
        application: &Application,
        index: usize,
        total: usize,
        aggregator: &mut ReportAggregator,
    ) -> bool {
        let name = application.name.clone();
        self.progress_reporter
            .report_event(&PipelineEvent::ApplicationStarted {
                index,
                total,
                name: name.clone(),
            });

        match self.fetch_application_report(application) {
            Ok(FetchOutcome::Fetched {
                report_id,
                document,
            }) => {
                self.archive_if_requested(&application.public_id, &report_id, &document);

                self.progress_reporter
                    .report_event(&PipelineEvent::ApplicationProcessed {
                        index,
                        total,
                        name,
                        report_id,
                        violations: document.violation_count(),
                    });
                aggregator.ingest(document);
                true
            }
            Ok(FetchOutcome::Skipped(reason)) => {
                tracing::debug!(public_id = %application.public_id, %reason, "application skipped");
                self.progress_reporter
                    .report_event(&PipelineEvent::ApplicationSkipped {
                        index,
                        total,
                        name,
                        reason,
                    });
                false
            }
            Err(e) => {
                tracing::debug!(public_id = %application.public_id, error = %e, "application failed");
                self.progress_reporter
                    .report_event(&PipelineEvent::ApplicationFailed {
                        index,
                        total,
                        name,
                        error: format!("{:#}", e),
                    });
                false
            }
        }
    }

    fn fetch_application_report(&self, application: &Application) -> Result<FetchOutcome> {
        let Some(reference) = self
            .iq_server
            .get_latest_report_reference(&application.id)?
        else {
            return Ok(FetchOutcome::Skipped(SkipReason::NoReports));
        };

        let Some(report_id) = reference.resolve_report_id() else {
            return Ok(FetchOutcome::Skipped(SkipReason::NoReportId));
        };

        let Some(document) = self
            .iq_server
            .get_policy_violations(&application.public_id, &report_id)?
        else {
            return Ok(FetchOutcome::Skipped(SkipReason::EmptyReport));
        };

        Ok(FetchOutcome::Fetched {
            report_id,
            document,
        })
    }

    /// Archives the raw document; failures are reported as warnings only
    fn archive_if_requested(&self, public_id: &str, report_id: &str, document: &RawReportDocument) {
        let Some(archive) = &self.raw_archive else {
            return;
        };

        let event = match archive.archive(public_id, report_id, document) {
            Ok(path) => PipelineEvent::RawReportArchived { path },
            Err(e) => PipelineEvent::RawReportArchiveFailed {
                public_id: public_id.to_string(),
                error: format!("{:#}", e),
            },
        };
        self.progress_reporter.report_event(&event);
    }
}
