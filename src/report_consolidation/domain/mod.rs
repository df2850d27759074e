pub mod application;
pub mod consolidated_row;
pub mod raw_report;
pub mod severity;

pub use application::{Application, ReportReference};
pub use consolidated_row::{ConsolidatedRow, CONSOLIDATED_HEADER, PLACEHOLDER_TIME};
pub use raw_report::{
    ApplicationDescriptor, Component, Condition, Constraint, RawReportDocument, Violation,
};
pub use severity::{SeverityBucket, SeverityTally};
