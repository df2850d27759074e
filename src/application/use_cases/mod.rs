/// Use cases module containing application business logic orchestration
mod consolidate_reports;

pub use consolidate_reports::ConsolidateReportsUseCase;
