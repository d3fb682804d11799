use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::adapters::outbound::filesystem::GzipArtifactWriter;
use crate::application::dto::{FetchRequest, FetchSummary};
use crate::ports::outbound::{
    JobRequest, JobState, ProgressReporter, ReportDefinition, ReportingApi, TimeFrame,
};
use crate::shared::error::EnrichError;
use crate::shared::Result;

/// FetchReportUseCase - drives the platform's report-generation API
///
/// Lists available report definitions, launches an on-demand job over a
/// trailing time window, polls until a terminal state, downloads the
/// compressed artifact and decompresses it to the pipeline's expected
/// input path. The rest of the pipeline only ever learns "input file now
/// exists" or "input file was never produced".
///
/// # Type Parameters
/// * `API` - ReportingApi implementation
/// * `PR` - ProgressReporter implementation
pub struct FetchReportUseCase<API, PR> {
    api: API,
    artifact_writer: GzipArtifactWriter,
    progress_reporter: PR,
    poll_interval: Duration,
    poll_timeout: Duration,
    timezone: String,
}

impl<API, PR> FetchReportUseCase<API, PR>
where
    API: ReportingApi,
    PR: ProgressReporter,
{
    pub fn new(
        api: API,
        artifact_writer: GzipArtifactWriter,
        progress_reporter: PR,
        poll_interval: Duration,
        poll_timeout: Duration,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            api,
            artifact_writer,
            progress_reporter,
            poll_interval,
            poll_timeout,
            timezone: timezone.into(),
        }
    }

    /// Lists the report definitions available to the tenant.
    pub fn list(&self) -> Result<Vec<ReportDefinition>> {
        self.api.list_reports()
    }

    /// Generates and downloads one report.
    ///
    /// # Errors
    /// Returns `UnknownReportId` before any job is created, `JobFailed`
    /// or `JobTimedOut` from the poll loop, and I/O errors from the
    /// download and decompression steps.
    pub fn execute(&self, request: FetchRequest) -> Result<FetchSummary> {
        // Step 1: validate the report id against available definitions
        let definitions = self.api.list_reports()?;
        if !definitions.iter().any(|d| d.id == request.report_id) {
            return Err(EnrichError::UnknownReportId {
                id: request.report_id,
            }
            .into());
        }

        // Step 2: launch the job over the trailing window
        let now = Utc::now();
        let to_ts = now.timestamp();
        let from_ts = to_ts - (request.window_hours as i64) * 3600;
        let job_request = JobRequest {
            job_type: "ON_DEMAND".to_string(),
            report_format: "csv".to_string(),
            compression: "gzip".to_string(),
            scheduled_on: now.to_rfc3339(),
            zones: vec![],
            time_frame: TimeFrame {
                from: from_ts,
                to: to_ts,
            },
            report_id: request.report_id,
            is_report_template: false,
            job_name: request.job_name.clone(),
            file_name: request.job_name.clone(),
            timezone: self.timezone.clone(),
        };

        let job = self.api.create_job(&job_request)?;
        self.progress_reporter.report("Reporting job created successfully");
        self.progress_reporter.report(&format!("Job ID: {}", job.id));
        self.progress_reporter.report(&format!(
            "Polling job status every {} seconds...",
            self.poll_interval.as_secs()
        ));

        // Step 3: poll until a terminal state or the overall timeout
        let status = self.poll_until_terminal(job.id)?;

        // Step 4: download and decompress the artifact
        let url = status.file_path.ok_or_else(|| EnrichError::ApiContract {
            details: format!("completed job {} did not include a download path", job.id),
        })?;
        self.progress_reporter
            .report(&format!("Downloading report from: {}", url));
        let bytes = self.api.download_artifact(&url)?;

        let compressed_path = self
            .artifact_writer
            .write_compressed(&request.output_path, &bytes)?;
        self.progress_reporter.report(&format!(
            "Report downloaded successfully: {}",
            compressed_path.display()
        ));

        let report_bytes = self
            .artifact_writer
            .decompress_to(&compressed_path, &request.output_path)?;
        self.progress_reporter.report_completion(&format!(
            "✅ Report extracted successfully: {}",
            request.output_path.display()
        ));

        Ok(FetchSummary {
            job_id: job.id,
            compressed_path,
            output_path: request.output_path,
            report_bytes,
        })
    }

    fn poll_until_terminal(&self, job_id: i64) -> Result<crate::ports::outbound::JobStatus> {
        let started = Instant::now();
        loop {
            thread::sleep(self.poll_interval);

            if started.elapsed() > self.poll_timeout {
                return Err(EnrichError::JobTimedOut {
                    job_id,
                    waited_secs: started.elapsed().as_secs(),
                }
                .into());
            }

            let status = self.api.job_status(job_id)?;
            self.progress_reporter
                .report(&format!("Current job status: {}", status.status));

            match status.state() {
                JobState::Completed => {
                    self.progress_reporter.report("Job completed successfully!");
                    return Ok(status);
                }
                JobState::Failed => {
                    return Err(EnrichError::JobFailed {
                        job_id,
                        status: status.status.clone(),
                    }
                    .into());
                }
                JobState::InProgress => continue,
            }
        }
    }
}
