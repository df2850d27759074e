/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (IQ Server, file system, console).
pub mod iq_server_repository;
pub mod progress_reporter;
pub mod raw_report_archive;
pub mod table_writer;

pub use iq_server_repository::IqServerRepository;
pub use progress_reporter::{PipelineEvent, ProgressReporter, SkipReason};
pub use raw_report_archive::RawReportArchive;
pub use table_writer::ReportTableWriter;
