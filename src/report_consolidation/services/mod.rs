mod aggregator;
mod violation_extractor;

pub use aggregator::ReportAggregator;
pub use violation_extractor::{ExtractedViolation, ViolationExtractor};
