/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_reporting_api;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_reporting_api::MockReportingApi;
