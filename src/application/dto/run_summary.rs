use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Overall verdict of a run, derived from the success/failure counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every listed application produced a report
    AllSucceeded,
    /// Some applications were skipped or failed
    Partial,
    /// No application produced a report (or none were listed)
    NothingFetched,
}

/// RunSummary - Response DTO of the consolidation use case
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of applications listed and attempted
    pub processed: usize,
    /// Applications whose report was fetched and aggregated
    pub succeeded: usize,
    /// Applications skipped for missing data or failed on transport errors
    pub failed: usize,
    /// Number of rows in the consolidated table
    pub rows: usize,
    /// Written table, `None` when there were no rows
    pub output_path: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn outcome(&self) -> RunOutcome {
        if self.succeeded == 0 {
            RunOutcome::NothingFetched
        } else if self.succeeded == self.processed {
            RunOutcome::AllSucceeded
        } else {
            RunOutcome::Partial
        }
    }

    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn summary(processed: usize, succeeded: usize) -> RunSummary {
        let started_at = Utc::now();
        RunSummary {
            processed,
            succeeded,
            failed: processed - succeeded,
            rows: 0,
            output_path: None,
            started_at,
            finished_at: started_at + Duration::milliseconds(1500),
        }
    }

    #[test]
    fn test_outcome() {
        assert_eq!(summary(3, 3).outcome(), RunOutcome::AllSucceeded);
        assert_eq!(summary(3, 1).outcome(), RunOutcome::Partial);
        assert_eq!(summary(3, 0).outcome(), RunOutcome::NothingFetched);
        assert_eq!(summary(0, 0).outcome(), RunOutcome::NothingFetched);
    }

    #[test]
    fn test_elapsed_ms() {
        assert_eq!(summary(1, 1).elapsed_ms(), 1500);
    }
}
