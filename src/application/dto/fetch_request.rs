use std::path::PathBuf;

/// Request for the report-fetch use case.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Id of the report definition to generate
    pub report_id: i64,
    /// Trailing time window the report covers, in hours
    pub window_hours: u64,
    /// Destination for the decompressed report CSV; the compressed
    /// download lands beside it with `.gz` appended
    pub output_path: PathBuf,
    /// Job and file name submitted to the platform
    pub job_name: String,
}

impl FetchRequest {
    pub fn new(
        report_id: i64,
        window_hours: u64,
        output_path: PathBuf,
        job_name: impl Into<String>,
    ) -> Self {
        Self {
            report_id,
            window_hours,
            output_path,
            job_name: job_name.into(),
        }
    }
}
