use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use scan_enrich::prelude::*;

/// Mock ReportingApi with scripted responses
///
/// Job-status polls consume the configured statuses front to back; the
/// last one repeats if the poll loop asks again.
pub struct MockReportingApi {
    definitions: Vec<(i64, String)>,
    created_job_id: i64,
    statuses: Arc<Mutex<VecDeque<JobStatus>>>,
    artifact: Vec<u8>,
    pub created_requests: Arc<Mutex<Vec<JobRequest>>>,
    pub downloaded_urls: Arc<Mutex<Vec<String>>>,
}

impl MockReportingApi {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            created_job_id: 1,
            statuses: Arc::new(Mutex::new(VecDeque::new())),
            artifact: Vec::new(),
            created_requests: Arc::new(Mutex::new(Vec::new())),
            downloaded_urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_definition(mut self, id: i64, name: &str) -> Self {
        self.definitions.push((id, name.to_string()));
        self
    }

    pub fn with_job_id(mut self, id: i64) -> Self {
        self.created_job_id = id;
        self
    }

    pub fn with_status(self, status: &str, file_path: Option<&str>) -> Self {
        self.statuses.lock().unwrap().push_back(JobStatus {
            id: self.created_job_id,
            status: status.to_string(),
            file_path: file_path.map(str::to_string),
        });
        self
    }

    pub fn with_artifact(mut self, bytes: Vec<u8>) -> Self {
        self.artifact = bytes;
        self
    }
}

impl Default for MockReportingApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportingApi for MockReportingApi {
    fn list_reports(&self) -> Result<Vec<ReportDefinition>> {
        Ok(self
            .definitions
            .iter()
            .map(|(id, name)| ReportDefinition {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    fn create_job(&self, request: &JobRequest) -> Result<CreatedJob> {
        self.created_requests.lock().unwrap().push(request.clone());
        Ok(CreatedJob {
            id: self.created_job_id,
        })
    }

    fn job_status(&self, job_id: i64) -> Result<JobStatus> {
        let mut statuses = self.statuses.lock().unwrap();
        let status = if statuses.len() > 1 {
            statuses.pop_front().unwrap()
        } else {
            statuses
                .front()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no scripted status for job {}", job_id))?
        };
        Ok(status)
    }

    fn download_artifact(&self, url: &str) -> Result<Vec<u8>> {
        self.downloaded_urls.lock().unwrap().push(url.to_string());
        Ok(self.artifact.clone())
    }
}
