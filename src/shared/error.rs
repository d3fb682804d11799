use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems and wrapper scripts to distinguish
/// between different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the requested operation completed
    Success = 0,
    /// The reporting job failed or timed out on the platform side
    JobFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
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
            ExitCode::JobFailed => write!(f, "Job Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the report enrichment pipeline.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
///
/// Note that a row whose label blob fails to parse as JSON is NOT an
/// error value: it is a per-row skip tracked by the extractor's
/// `rows_malformed` counter. A lookup miss during the merge is likewise
/// an empty-string substitution plus a counter, never an error.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Input file not found: {path}\n\n💡 Hint: {suggestion}")]
    InputNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileRead { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWrite { path: PathBuf, details: String },

    #[error("Failed to read report records from {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is a UTF-8 CSV export with a header row")]
    ReportParse { path: PathBuf, details: String },

    #[error("Required environment variable missing: {name}\n\n💡 Hint: {hint}")]
    MissingEnvVar { name: String, hint: String },

    #[error("Environment variable {name} did not pass validation: {details}")]
    InvalidEnvVar { name: String, details: String },

    /// Validation error for configuration files and builder inputs
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Reporting API request failed with status {status}: {body}")]
    ApiRequest { status: u16, body: String },

    #[error("Unexpected reporting API response: {details}")]
    ApiContract { details: String },

    #[error("Report ID {id} not found in available reports\n\n💡 Hint: Run 'scan-enrich fetch list' to see available report IDs")]
    UnknownReportId { id: i64 },

    #[error("Reporting job {job_id} finished with status {status}")]
    JobFailed { job_id: i64, status: String },

    #[error("Reporting job {job_id} did not complete within {waited_secs} seconds\n\n💡 Hint: The job may still be running on the platform; check it manually or raise SECURE_POLL_TIMEOUT_SECS")]
    JobTimedOut { job_id: i64, waited_secs: u64 },
}

impl EnrichError {
    /// Maps an error to the process exit code the CLI should use.
    ///
    /// Job-level failures get their own code so schedulers can tell
    /// "the platform never produced the report" apart from local errors.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            EnrichError::JobFailed { .. } | EnrichError::JobTimedOut { .. } => ExitCode::JobFailed,
            _ => ExitCode::ApplicationError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::JobFailed.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::JobFailed), "Job Failed (1)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_input_not_found_display() {
        let error = EnrichError::InputNotFound {
            path: PathBuf::from("/data/v2-report.csv"),
            suggestion: "Run 'scan-enrich fetch report' first".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Input file not found"));
        assert!(display.contains("/data/v2-report.csv"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("fetch report"));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = EnrichError::FileWrite {
            path: PathBuf::from("/data/output.csv"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/data/output.csv"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_unknown_report_id_display() {
        let error = EnrichError::UnknownReportId { id: 42 };
        let display = format!("{}", error);
        assert!(display.contains("Report ID 42 not found"));
        assert!(display.contains("fetch list"));
    }

    #[test]
    fn test_job_errors_map_to_job_failed_exit_code() {
        let failed = EnrichError::JobFailed {
            job_id: 7,
            status: "FAILED".to_string(),
        };
        let timed_out = EnrichError::JobTimedOut {
            job_id: 7,
            waited_secs: 7200,
        };
        assert_eq!(failed.exit_code(), ExitCode::JobFailed);
        assert_eq!(timed_out.exit_code(), ExitCode::JobFailed);
    }

    #[test]
    fn test_io_errors_map_to_application_error_exit_code() {
        let error = EnrichError::FileRead {
            path: PathBuf::from("/tmp/x"),
            details: "gone".to_string(),
        };
        assert_eq!(error.exit_code(), ExitCode::ApplicationError);
    }
}
