/// Filesystem adapters for writing the consolidated table and raw reports
mod csv_table_writer;
mod file_writer;
mod json_raw_report_archive;

pub use csv_table_writer::{CsvTableWriter, CONSOLIDATED_REPORT_FILE};
pub use file_writer::{prepare_output_directory, FileSystemWriter};
pub use json_raw_report_archive::JsonRawReportArchive;
