use crate::application::dto::RunOutcome;
use crate::ports::outbound::{PipelineEvent, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::io::IsTerminal;

/// Severity of a console line, used to pick its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Success,
    Warning,
    Error,
}

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, turning pipeline
/// events into emoji-tagged lines on stderr and an indicatif progress bar
/// across applications. Colors are only used when stderr is a terminal.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
    color: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            color: std::io::stderr().is_terminal(),
        }
    }

    fn start_progress_bar(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        *self.progress_bar.borrow_mut() = Some(pb);
    }

    fn finish_progress_bar(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    fn paint(&self, message: &str, tone: Tone) -> String {
        if !self.color {
            return message.to_string();
        }
        match tone {
            Tone::Plain => message.to_string(),
            Tone::Success => message.green().to_string(),
            Tone::Warning => message.yellow().to_string(),
            Tone::Error => message.red().to_string(),
        }
    }

    /// Prints a line without tearing an active progress bar
    fn line(&self, message: &str, tone: Tone) {
        let painted = self.paint(message, tone);
        match self.progress_bar.borrow().as_ref() {
            Some(pb) => pb.suspend(|| eprintln!("{}", painted)),
            None => eprintln!("{}", painted),
        }
    }

    fn render(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::FetchingApplications { organization_id } => match organization_id {
                Some(org) => self.line(
                    &format!("🔍 Fetching applications of organization {} from IQ Server...", org),
                    Tone::Plain,
                ),
                None => self.line("🔍 Fetching applications from IQ Server...", Tone::Plain),
            },
            PipelineEvent::ApplicationsListingFailed { error } => {
                self.line(
                    &format!("❌ Could not list applications: {}", error),
                    Tone::Error,
                );
                self.line("😞 No applications to process", Tone::Warning);
            }
            PipelineEvent::ApplicationsListed { count, preview } => {
                if *count == 0 {
                    self.line("😞 No applications to process", Tone::Warning);
                    return;
                }
                self.line(&format!("🎯 Found {} applications!", count), Tone::Plain);
                self.line("📋 Applications preview:", Tone::Plain);
                for (i, (name, public_id)) in preview.iter().enumerate() {
                    self.line(&format!("   {}. {} ({})", i + 1, name, public_id), Tone::Plain);
                }
                if *count > preview.len() {
                    self.line(
                        &format!("   ... and {} more! 🚀", count - preview.len()),
                        Tone::Plain,
                    );
                }
                self.line(&format!("⚡ Processing {} applications...", count), Tone::Plain);
                self.start_progress_bar(*count);
            }
            PipelineEvent::ApplicationStarted { index, name, .. } => {
                if let Some(pb) = self.progress_bar.borrow().as_ref() {
                    pb.set_position(index.saturating_sub(1) as u64);
                    pb.set_message(name.clone());
                }
            }
            PipelineEvent::ApplicationProcessed {
                index,
                total,
                name,
                report_id,
                violations,
            } => {
                self.line(
                    &format!(
                        "✅ [{}/{}] {}: report {} with {} violation(s)",
                        index, total, name, report_id, violations
                    ),
                    Tone::Success,
                );
                self.advance(*index);
            }
            PipelineEvent::ApplicationSkipped {
                index,
                total,
                name,
                reason,
            } => {
                self.line(
                    &format!("⚠️  [{}/{}] {} for {}", index, total, reason, name),
                    Tone::Warning,
                );
                self.advance(*index);
            }
            PipelineEvent::ApplicationFailed {
                index,
                total,
                name,
                error,
            } => {
                self.line(
                    &format!("❌ [{}/{}] Error processing {}: {}", index, total, name, error),
                    Tone::Error,
                );
                self.advance(*index);
            }
            PipelineEvent::RawReportArchived { path } => {
                self.line(&format!("💾 Saved JSON: {}", path.display()), Tone::Plain);
            }
            PipelineEvent::RawReportArchiveFailed { public_id, error } => {
                self.line(
                    &format!("⚠️  Could not save raw report for {}: {}", public_id, error),
                    Tone::Warning,
                );
            }
            PipelineEvent::RowsConsolidated { documents, rows } => {
                self.finish_progress_bar();
                self.line(
                    &format!(
                        "🔍 Consolidated {} report(s) into {} row(s)",
                        documents, rows
                    ),
                    Tone::Plain,
                );
            }
            PipelineEvent::NoRowsConsolidated => {
                self.finish_progress_bar();
                self.line(
                    "❌ No data was consolidated! The CSV file was not written.",
                    Tone::Warning,
                );
            }
            PipelineEvent::TableWritten { path, rows } => {
                self.line(
                    &format!("💾 Consolidated CSV saved to: {}", path.display()),
                    Tone::Success,
                );
                self.line(&format!("📊 Generated {} consolidated rows.", rows), Tone::Plain);
            }
            PipelineEvent::RunCompleted {
                processed,
                succeeded,
                failed,
                outcome,
                elapsed_ms,
            } => {
                self.finish_progress_bar();
                self.report_summary(*processed, *succeeded, *failed, *outcome, *elapsed_ms);
            }
        }
    }

    fn advance(&self, index: usize) {
        if let Some(pb) = self.progress_bar.borrow().as_ref() {
            pb.set_position(index as u64);
        }
    }

    fn report_summary(
        &self,
        processed: usize,
        succeeded: usize,
        failed: usize,
        outcome: RunOutcome,
        elapsed_ms: i64,
    ) {
        eprintln!();
        self.line(&"=".repeat(50), Tone::Plain);
        self.line("🎉 Processing completed!", Tone::Plain);
        self.line(
            &format!(
                "✅ Successfully processed: {}/{} ({:.1}s)",
                succeeded,
                processed,
                elapsed_ms as f64 / 1000.0
            ),
            Tone::Plain,
        );

        match outcome {
            RunOutcome::AllSucceeded => {
                self.line("🏆 Perfect! All reports fetched successfully! 🎊", Tone::Success)
            }
            RunOutcome::Partial => {
                self.line(&format!("⚠️  {} reports failed to fetch", failed), Tone::Warning)
            }
            RunOutcome::NothingFetched => {
                self.line("😞 No reports were successfully fetched", Tone::Error)
            }
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report_event(&self, event: &PipelineEvent) {
        self.render(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::SkipReason;
    use std::path::PathBuf;

    #[test]
    fn test_progress_reporter_handles_full_event_sequence() {
        let reporter = StderrProgressReporter::new();
        // Can't easily test stderr output, but verify it doesn't panic
        let events = vec![
            PipelineEvent::FetchingApplications {
                organization_id: None,
            },
            PipelineEvent::ApplicationsListed {
                count: 7,
                preview: vec![("Web Shop".to_string(), "web-shop".to_string())],
            },
            PipelineEvent::ApplicationStarted {
                index: 1,
                total: 7,
                name: "Web Shop".to_string(),
            },
            PipelineEvent::ApplicationProcessed {
                index: 1,
                total: 7,
                name: "Web Shop".to_string(),
                report_id: "r1".to_string(),
                violations: 3,
            },
            PipelineEvent::ApplicationSkipped {
                index: 2,
                total: 7,
                name: "Billing".to_string(),
                reason: SkipReason::NoReports,
            },
            PipelineEvent::ApplicationFailed {
                index: 3,
                total: 7,
                name: "Search".to_string(),
                error: "timeout".to_string(),
            },
            PipelineEvent::RawReportArchived {
                path: PathBuf::from("web-shop_r1.json"),
            },
            PipelineEvent::RowsConsolidated {
                documents: 1,
                rows: 3,
            },
            PipelineEvent::TableWritten {
                path: PathBuf::from("report.csv"),
                rows: 3,
            },
            PipelineEvent::RunCompleted {
                processed: 7,
                succeeded: 1,
                failed: 6,
                outcome: RunOutcome::Partial,
                elapsed_ms: 1200,
            },
        ];
        for event in &events {
            reporter.report_event(event);
        }
        assert!(reporter.progress_bar.borrow().is_none());
    }

    #[test]
    fn test_paint_without_color_is_plain() {
        let reporter = StderrProgressReporter {
            progress_bar: RefCell::new(None),
            color: false,
        };
        assert_eq!(reporter.paint("hello", Tone::Error), "hello");
    }

    #[test]
    fn test_paint_with_color_adds_escape_codes() {
        let reporter = StderrProgressReporter {
            progress_bar: RefCell::new(None),
            color: true,
        };
        let painted = reporter.paint("hello", Tone::Warning);
        assert!(painted.contains("hello"));
        assert_ne!(painted, "hello");
    }

    #[test]
    fn test_listing_failure_then_empty_run_completes() {
        let reporter = StderrProgressReporter::default();
        let events = [
            PipelineEvent::ApplicationsListingFailed {
                error: "Failed to fetch applications from IQ Server: HTTP 401".to_string(),
            },
            PipelineEvent::NoRowsConsolidated,
            PipelineEvent::RunCompleted {
                processed: 0,
                succeeded: 0,
                failed: 0,
                outcome: RunOutcome::NothingFetched,
                elapsed_ms: 5,
            },
        ];
        for event in &events {
            reporter.report_event(event);
        }
        assert!(reporter.progress_bar.borrow().is_none());
    }

    #[test]
    fn test_empty_listing_does_not_start_progress_bar() {
        let reporter = StderrProgressReporter::default();
        reporter.report_event(&PipelineEvent::ApplicationsListed {
            count: 0,
            preview: vec![],
        });
        assert!(reporter.progress_bar.borrow().is_none());
    }
}
