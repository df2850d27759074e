//! iq-report - Sonatype IQ Server policy violation report consolidation
//!
//! This library fetches the latest policy report of every application on an
//! IQ Server, tallies violations per severity bucket and flattens them into a
//! single consolidated table, following hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`report_consolidation`): Report model, severity policy, extraction and aggregation
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Config** (`config`): Layered CLI / environment / YAML configuration
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use iq_report::prelude::*;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # fn main() -> Result<()> {
//! let output_dir = prepare_output_directory(Path::new("raw_reports"))?;
//!
//! // Create adapters
//! let iq_server = IqServerClient::new(
//!     "https://iq.example.com",
//!     "admin",
//!     "secret",
//!     Duration::from_secs(30),
//! )?;
//! let table_writer = CsvTableWriter::new(&output_dir);
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ConsolidateReportsUseCase::new(
//!     iq_server,
//!     table_writer,
//!     progress_reporter,
//!     None::<JsonRawReportArchive>,
//! );
//!
//! // Execute
//! let summary = use_case.execute(ConsolidationRequest::default())?;
//! println!("{} rows", summary.rows);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod report_consolidation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        prepare_output_directory, CsvTableWriter, JsonRawReportArchive, CONSOLIDATED_REPORT_FILE,
    };
    pub use crate::adapters::outbound::network::IqServerClient;
    pub use crate::application::dto::{ConsolidationRequest, RunOutcome, RunSummary};
    pub use crate::application::use_cases::ConsolidateReportsUseCase;
    pub use crate::config::{AppConfig, CliOverrides, ConfigFile, EnvConfig};
    pub use crate::ports::outbound::{
        IqServerRepository, PipelineEvent, ProgressReporter, RawReportArchive, ReportTableWriter,
        SkipReason,
    };
    pub use crate::report_consolidation::domain::{
        Application, ApplicationDescriptor, Component, Condition, ConsolidatedRow, Constraint,
        RawReportDocument, ReportReference, SeverityBucket, SeverityTally, Violation,
        CONSOLIDATED_HEADER,
    };
    pub use crate::report_consolidation::policies::{Classification, SeverityClassifier};
    pub use crate::report_consolidation::services::{
        ExtractedViolation, ReportAggregator, ViolationExtractor,
    };
    pub use crate::shared::Result;
}
