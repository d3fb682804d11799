use std::time::Duration;

use reqwest::blocking::Client;

use crate::ports::outbound::{CreatedJob, JobRequest, JobStatus, ReportDefinition, ReportingApi};
use crate::shared::error::EnrichError;
use crate::shared::Result;

/// Reporting API client for the scanning platform
///
/// Drives the platform's report-generation REST API with a blocking
/// client: list definitions, launch jobs, poll status, download the
/// finished artifact from its signed URL.
pub struct HttpReportingClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpReportingClient {
    const TIMEOUT_SECONDS: u64 = 30;
    /// Artifact downloads can run to hundreds of megabytes; they get a
    /// much longer per-request timeout than API calls.
    const DOWNLOAD_TIMEOUT_SECONDS: u64 = 600;

    /// Creates a client for the given tenant hostname.
    pub fn new(tenant: &str, api_key: &str) -> Result<Self> {
        Self::with_base_url(
            format!("https://{}/api/platform/reporting/v1", tenant),
            api_key,
        )
    }

    /// Creates a client against an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>, api_key: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("scan-enrich/{}", version);
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.to_string(),
        })
    }

    fn reports_url(&self) -> String {
        format!("{}/reports", self.base_url)
    }

    fn jobs_url(&self) -> String {
        format!("{}/jobs", self.base_url)
    }

    fn job_url(&self, job_id: i64) -> String {
        format!("{}/jobs/{}", self.base_url, job_id)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Converts a non-success response into a typed error carrying the
    /// status code and response body.
    fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EnrichError::ApiRequest {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        Ok(response)
    }
}

impl ReportingApi for HttpReportingClient {
    fn list_reports(&self) -> Result<Vec<ReportDefinition>> {
        let response = self
            .client
            .get(self.reports_url())
            .header("Authorization", self.bearer())
            .send()?;
        let response = Self::check_status(response)?;
        let definitions: Vec<ReportDefinition> = response.json()?;
        Ok(definitions)
    }

    fn create_job(&self, request: &JobRequest) -> Result<CreatedJob> {
        let response = self
            .client
            .post(self.jobs_url())
            .header("Authorization", self.bearer())
            .json(request)
            .send()?;
        let response = Self::check_status(response)?;
        let job: CreatedJob = response.json()?;
        Ok(job)
    }

    fn job_status(&self, job_id: i64) -> Result<JobStatus> {
        let response = self
            .client
            .get(self.job_url(job_id))
            .header("Authorization", self.bearer())
            .send()?;
        let response = Self::check_status(response)?;
        let status: JobStatus = response.json()?;
        Ok(status)
    }

    fn download_artifact(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header("Authorization", self.bearer())
            .timeout(Duration::from_secs(Self::DOWNLOAD_TIMEOUT_SECONDS))
            .send()?;
        let response = Self::check_status(response)?;
        let bytes = response.bytes()?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_from_tenant() {
        let client = HttpReportingClient::new("secure.example.com", "token").unwrap();
        assert_eq!(
            client.reports_url(),
            "https://secure.example.com/api/platform/reporting/v1/reports"
        );
        assert_eq!(
            client.jobs_url(),
            "https://secure.example.com/api/platform/reporting/v1/jobs"
        );
        assert_eq!(
            client.job_url(42),
            "https://secure.example.com/api/platform/reporting/v1/jobs/42"
        );
    }

    #[test]
    fn test_with_base_url_keeps_url_verbatim() {
        let client = HttpReportingClient::with_base_url("http://127.0.0.1:8080/v1", "token").unwrap();
        assert_eq!(client.reports_url(), "http://127.0.0.1:8080/v1/reports");
    }
}
