/// Mock implementations for testing
mod mock_iq_server_repository;
mod mock_progress_reporter;
mod mock_table_writer;

pub use mock_iq_server_repository::MockIqServerRepository;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_table_writer::MockTableWriter;
