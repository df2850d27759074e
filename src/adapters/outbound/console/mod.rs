/// Console adapters - progress output for interactive runs
mod progress_reporter;

pub use progress_reporter::StderrProgressReporter;
