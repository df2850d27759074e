use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow schedulers and CI jobs to distinguish between
/// argument mistakes and runtime failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the run completed (individual applications may still have been skipped)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, server listing, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for report consolidation.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid configuration: {field}\nReason: {reason}\n\n💡 Hint: {hint}")]
    ConfigError {
        field: String,
        reason: String,
        hint: String,
    },

    #[error("Invalid IQ Server URL: {url}\nReason: {reason}\n\n💡 Hint: Use a full URL such as https://iq.example.com")]
    InvalidServerUrl { url: String, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Cannot prepare output directory: {path}\nDetails: {details}\n\n💡 Hint: Set OUTPUT_DIR or --output-dir to a writable location")]
    OutputDirectoryError { path: PathBuf, details: String },
}

/// Errors raised while talking to the IQ Server REST API.
///
/// The pipeline catches these per application; only a failure of the
/// initial application listing escalates to the process.
#[derive(Debug, Error)]
pub enum IqServerError {
    #[error("Authentication failed for {endpoint}\n\n💡 Hint: Check IQ_USERNAME and IQ_PASSWORD")]
    Unauthorized { endpoint: String },

    #[error("Access forbidden for {endpoint}\n\n💡 Hint: The account needs read access to the application's reports")]
    Forbidden { endpoint: String },

    #[error("Resource not found: {endpoint}")]
    NotFound { endpoint: String },

    #[error("IQ Server returned HTTP {status} for {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Request to {endpoint} failed: {details}")]
    Transport { endpoint: String, details: String },

    #[error("Unexpected response from {endpoint}: {details}")]
    InvalidResponse { endpoint: String, details: String },

    #[error("Security: {kind} '{value}' is not a valid path segment ({reason})")]
    InvalidPathSegment {
        kind: String,
        value: String,
        reason: String,
    },
}
