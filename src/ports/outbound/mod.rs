/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (console, reporting API).
pub mod progress_reporter;
pub mod reporting_api;

pub use progress_reporter::ProgressReporter;
pub use reporting_api::{
    CreatedJob, JobRequest, JobState, JobStatus, ReportDefinition, ReportingApi, TimeFrame,
};
