use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// A report definition as listed by the reporting platform.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportDefinition {
    pub id: i64,
    pub name: String,
}

/// Time window covered by an on-demand report, in epoch seconds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimeFrame {
    pub from: i64,
    pub to: i64,
}

/// Payload for launching an on-demand report-generation job.
///
/// Field names follow the platform's wire format (camelCase).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub job_type: String,
    pub report_format: String,
    pub compression: String,
    pub scheduled_on: String,
    pub zones: Vec<String>,
    pub time_frame: TimeFrame,
    pub report_id: i64,
    pub is_report_template: bool,
    pub job_name: String,
    pub file_name: String,
    pub timezone: String,
}

/// Response from job creation; only the id is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedJob {
    pub id: i64,
}

/// Lifecycle state of a report-generation job.
///
/// The platform reports a handful of intermediate states
/// (SCHEDULED, PROGRESS, ...); only the terminal ones matter here,
/// everything else keeps the poll loop running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Completed,
    Failed,
    InProgress,
}

/// One poll of the job-status endpoint.
///
/// The raw status string is kept verbatim for operator diagnostics;
/// `state()` classifies it. `file_path` is the signed download URL for
/// the finished artifact; the platform only sets it once the job has
/// completed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub id: i64,
    pub status: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl JobStatus {
    pub fn state(&self) -> JobState {
        match self.status.as_str() {
            "COMPLETED" => JobState::Completed,
            "FAILED" => JobState::Failed,
            _ => JobState::InProgress,
        }
    }
}

/// ReportingApi port for driving the platform's report-generation API
///
/// The core pipeline never consumes this API directly; it only learns
/// "input file now exists" or "input file was never produced" from the
/// fetch use case built on top of this port.
pub trait ReportingApi {
    /// Lists the report definitions available to the authenticated tenant
    ///
    /// # Errors
    /// Returns an error on any non-success HTTP response
    fn list_reports(&self) -> Result<Vec<ReportDefinition>>;

    /// Launches an on-demand report-generation job
    ///
    /// # Returns
    /// The created job's id, used for subsequent status polls
    fn create_job(&self, request: &JobRequest) -> Result<CreatedJob>;

    /// Polls the current status of a job
    fn job_status(&self, job_id: i64) -> Result<JobStatus>;

    /// Downloads the completed artifact from its signed URL
    ///
    /// # Returns
    /// The raw (compressed) artifact bytes
    fn download_artifact(&self, url: &str) -> Result<Vec<u8>>;
}
